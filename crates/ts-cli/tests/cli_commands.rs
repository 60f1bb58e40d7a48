//! End-to-end tests for the `talespin` binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ARIA_JSON: &str = r#"{
  "background": "ranger",
  "gender": "f",
  "name": "Aria",
  "race": "elf"
}
"#;

fn talespin(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("talespin").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("ROLEPLAY_CHATGPT_KEY")
        .env_remove("RUST_LOG")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .env("NO_COLOR", "1");
    cmd
}

fn character_file(dir: &TempDir) -> PathBuf {
    dir.path().join("character.json")
}

/// Answer one chat completion request per scripted reply, then stop.
/// The join handle yields the request bodies received.
fn serve_replies(replies: Vec<&'static str>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!(
        "http://{}/v1/chat/completions",
        listener.local_addr().unwrap()
    );

    let handle = thread::spawn(move || {
        let mut bodies = Vec::new();
        for reply in replies {
            let (mut stream, _) = listener.accept().unwrap();
            bodies.push(read_request_body(&stream));

            let body = serde_json::json!({
                "id": "chatcmpl-test",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": reply}}
                ]
            })
            .to_string();
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .unwrap();
            stream.flush().unwrap();
        }
        bodies
    });

    (url, handle)
}

fn read_request_body(stream: &TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap();
            }
        }
    }
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).unwrap();
    String::from_utf8(body).unwrap()
}

fn messages(body: &str) -> Vec<(String, String)> {
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    json["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| {
            (
                m["role"].as_str().unwrap().to_string(),
                m["content"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_without_character() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("No character data found."));
}

#[test]
fn show_prints_saved_character() {
    let dir = TempDir::new().unwrap();
    fs::write(character_file(&dir), ARIA_JSON).unwrap();
    talespin(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Character loaded:")
                .and(predicate::str::contains("Aria"))
                .and(predicate::str::contains("ranger")),
        );
}

#[test]
fn show_reports_corrupt_file() {
    let dir = TempDir::new().unwrap();
    fs::write(character_file(&dir), "{ nope").unwrap();
    talespin(&dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn show_uses_file_option() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hero.json"), r#"{"name":"Brin"}"#).unwrap();
    talespin(&dir)
        .args(["show", "--file", "hero.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brin"));
}

#[test]
fn global_options_before_subcommand() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("hero.json"), r#"{"name":"Brin"}"#).unwrap();
    talespin(&dir)
        .args(["--file", "hero.json", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brin"));

    talespin(&dir)
        .args(["-v", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No character data found."));
}

#[test]
fn play_option_before_other_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .args(["--model", "gpt-4", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with 'model'"));
}

// ---------------------------------------------------------------------------
// create
// ---------------------------------------------------------------------------

#[test]
fn create_classic_character() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .arg("create")
        .write_stdin("Aria\nf\nelf\nranger\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Welcome to character creation!")
                .and(predicate::str::contains("Enter your character's background: "))
                .and(predicate::str::contains("Character saved to character.json")),
        );

    assert_eq!(fs::read_to_string(character_file(&dir)).unwrap(), ARIA_JSON);
}

#[test]
fn create_quick_character() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .args(["create", "--template", "quick"])
        .write_stdin("Aria\n120\nA wandering bard\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter your character's age: "));

    let saved = fs::read_to_string(character_file(&dir)).unwrap();
    assert!(saved.contains(r#""description": "A wandering bard""#));
    assert!(!saved.contains("gender"));
}

#[test]
fn create_custom_attributes() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .args(["create", "-a", "title", "-a", "oath"])
        .write_stdin("Sir\nNever yield\n")
        .assert()
        .success();

    let saved = fs::read_to_string(character_file(&dir)).unwrap();
    assert!(saved.contains(r#""oath": "Never yield""#));
    assert!(saved.contains(r#""title": "Sir""#));
}

#[test]
fn create_custom_without_attributes_fails() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .args(["create", "--template", "custom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--attribute"));
}

#[test]
fn create_unknown_template_fails() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .args(["create", "--template", "epic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown character template"));
}

#[test]
fn create_with_truncated_input_fails() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .arg("create")
        .write_stdin("Aria\nf\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));
    assert!(!character_file(&dir).exists());
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_without_api_key_fails_after_saving() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .arg("play")
        .write_stdin("Aria\nf\nelf\nranger\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Character saved to character.json"))
        .stderr(predicate::str::contains("ROLEPLAY_CHATGPT_KEY"));

    assert_eq!(fs::read_to_string(character_file(&dir)).unwrap(), ARIA_JSON);
}

#[test]
fn play_is_the_default_command() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .write_stdin("Aria\nf\nelf\nranger\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Welcome to character creation!"))
        .stderr(predicate::str::contains("no API key configured"));
}

#[test]
fn play_offers_saved_character() {
    let dir = TempDir::new().unwrap();
    fs::write(character_file(&dir), ARIA_JSON).unwrap();
    talespin(&dir)
        .arg("play")
        .write_stdin("yes\n")
        .assert()
        .failure()
        .stdout(
            predicate::str::contains("Do you want to use a saved character? (yes/no): ")
                .and(predicate::str::contains("Character loaded:"))
                .and(predicate::str::contains("Enter your character's").not()),
        );
}

#[test]
fn play_reports_unreachable_service() {
    let dir = TempDir::new().unwrap();
    talespin(&dir)
        .args([
            "play",
            "--api-key",
            "sk-test",
            "--endpoint",
            "http://127.0.0.1:1/v1/chat/completions",
        ])
        .write_stdin("Aria\nf\nelf\nranger\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("chat request failed"));

    assert!(character_file(&dir).exists());
}

#[test]
fn play_until_the_end() {
    let dir = TempDir::new().unwrap();
    let (url, server) = serve_replies(vec![
        "The road stretches before you.",
        "You enter the tavern. The end.",
    ]);

    let assert = talespin(&dir)
        .args(["play", "--endpoint", &url])
        .env("ROLEPLAY_CHATGPT_KEY", "sk-test")
        .write_stdin("Aria\nf\nelf\nranger\nI walk in.\nthis line is never read\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("The road stretches before you.")
                .and(predicate::str::contains("You enter the tavern. The end."))
                .and(predicate::str::contains("Roleplay finished.")),
        );

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.matches("Your turn: ").count(), 1);
    assert_eq!(stdout.matches("You enter the tavern. The end.").count(), 1);

    let bodies = server.join().unwrap();
    assert_eq!(bodies.len(), 2);

    let opening = messages(&bodies[0]);
    assert_eq!(opening[0].0, "system");
    assert_eq!(opening[1], ("user".into(), "Begin roleplay".into()));

    let turn = messages(&bodies[1]);
    let contents: Vec<&str> = turn.iter().map(|(_, c)| c.as_str()).collect();
    assert_eq!(
        contents,
        [
            "You are a character in an interactive roleplay scenario.",
            "Begin roleplay",
            "The road stretches before you.",
            "I walk in.",
        ]
    );
    let request: serde_json::Value = serde_json::from_str(&bodies[1]).unwrap();
    assert_eq!(request["model"], "gpt-3.5-turbo");
    assert_eq!(request["n"], 1);

    // A new process sees the same character.
    talespin(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aria").and(predicate::str::contains("elf")));
    assert_eq!(fs::read_to_string(character_file(&dir)).unwrap(), ARIA_JSON);
}

#[test]
fn play_without_history_sends_single_turns() {
    let dir = TempDir::new().unwrap();
    fs::write(character_file(&dir), ARIA_JSON).unwrap();
    let (url, server) = serve_replies(vec!["Hello.", "You are Aria.", "Goodbye. The end"]);

    talespin(&dir)
        .args(["play", "--no-history", "--api-key", "sk-test", "--endpoint", &url])
        .write_stdin("yes\nWho is my character?\nfarewell\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"Character: {"background":"ranger""#));

    let bodies = server.join().unwrap();
    let context_turn = messages(&bodies[1]);
    assert_eq!(context_turn.len(), 3);
    assert_eq!(context_turn[1].1, "Who is my character?");
    assert!(context_turn[2].1.contains(r#""name":"Aria""#));

    let plain_turn = messages(&bodies[2]);
    assert_eq!(plain_turn.len(), 2);
    assert_eq!(plain_turn[1].1, "farewell");
}

#[test]
fn play_ends_at_end_of_input() {
    let dir = TempDir::new().unwrap();
    let (url, server) = serve_replies(vec!["Welcome."]);

    talespin(&dir)
        .args(["play", "--api-key", "sk-test", "--endpoint", &url])
        .write_stdin("Aria\nf\nelf\nranger\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Welcome.")
                .and(predicate::str::contains("Roleplay finished.").not()),
        );

    assert_eq!(server.join().unwrap().len(), 1);
    assert!(character_file(&dir).exists());
}
