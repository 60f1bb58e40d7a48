//! CLI frontend for the Talespinner roleplay engine.

mod commands;
mod console;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

use commands::TemplateArgs;
use commands::play::PlayArgs;
use ts_core::{CharacterStore, DEFAULT_CHARACTER_FILE};

#[derive(Parser)]
#[command(
    name = "talespin",
    about = "Talespinner — interactive fiction against a chat completion service",
    version,
    propagate_version = true
)]
struct Cli {
    /// Character file to read and write
    #[arg(short, long, global = true, default_value = DEFAULT_CHARACTER_FILE)]
    file: PathBuf,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a roleplay session (the default)
    Play(PlayArgs),

    /// Create a character and save it without playing
    Create {
        #[command(flatten)]
        template: TemplateArgs,
    },

    /// Print the saved character
    Show,
}

/// Top-level play options that only make sense without a subcommand.
const PLAY_ARG_IDS: [&str; 6] = [
    "template",
    "attributes",
    "model",
    "endpoint",
    "api_key",
    "no_history",
];

/// Parse the command line. Global options may sit on either side of a
/// subcommand; play options before a subcommand are rejected.
fn parse_cli() -> Cli {
    let mut command = Cli::command();
    let matches = command.get_matches_mut();

    if let Some((name, _)) = matches.subcommand() {
        let misplaced = PLAY_ARG_IDS
            .iter()
            .find(|id| matches.value_source(id) == Some(ValueSource::CommandLine));
        if let Some(id) = misplaced {
            command
                .error(
                    ErrorKind::ArgumentConflict,
                    format!("the subcommand '{name}' cannot be used with '{id}' given before it"),
                )
                .exit();
        }
    }

    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = parse_cli();
    logging::init(cli.verbose);

    let store = CharacterStore::new(cli.file);

    let result = match cli.command.unwrap_or(Commands::Play(cli.play)) {
        Commands::Play(args) => commands::play::run(store, args),
        Commands::Create { template } => commands::create::run(&store, &template),
        Commands::Show => commands::show::run(&store),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
