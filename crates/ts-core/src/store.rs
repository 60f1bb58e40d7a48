use std::fs;
use std::path::{Path, PathBuf};

use crate::character::Character;
use crate::console::{Console, Output};
use crate::error::{CoreError, CoreResult};
use crate::template::CharacterTemplate;

/// Where the character lives when no other path is given.
pub const DEFAULT_CHARACTER_FILE: &str = "character.json";

/// Reads and writes a single [`Character`] as a JSON document.
///
/// Writes replace the whole file. There is no temp-file rename, so a crash
/// mid-write can leave a truncated document behind; [`CharacterStore::load`]
/// tolerates that by returning an empty character.
#[derive(Debug, Clone)]
pub struct CharacterStore {
    path: PathBuf,
}

impl Default for CharacterStore {
    fn default() -> Self {
        Self::new(DEFAULT_CHARACTER_FILE)
    }
}

impl CharacterStore {
    /// Create a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a stored character is present and accessible.
    ///
    /// Any failure to check counts as absent.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the stored character.
    ///
    /// A missing, unreadable, or malformed file is logged and yields an
    /// empty character so the session can go on.
    pub fn load(&self) -> Character {
        match self.try_load() {
            Ok(character) => {
                tracing::debug!(path = %self.path.display(), attributes = character.len(), "character loaded");
                character
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "error loading character");
                Character::new()
            }
        }
    }

    /// Read the stored character, reporting failures instead of hiding them.
    pub fn try_load(&self) -> CoreResult<Character> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Overwrite the stored character with `character`.
    pub fn save(&self, character: &Character) -> CoreResult<()> {
        let mut json = character.to_pretty_json()?;
        json.push('\n');
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), attributes = character.len(), "character saved");
        Ok(())
    }
}

/// Ask for each attribute in order and store the answers in `character`.
///
/// Each question blocks until answered. End of input before the last
/// attribute is [`CoreError::InputClosed`]; attributes answered so far stay
/// set.
pub fn prompt_for_attributes<C>(
    console: &mut C,
    attributes: &[String],
    character: &mut Character,
) -> CoreResult<()>
where
    C: Console + ?Sized,
{
    for name in attributes {
        let answer = console
            .ask(&format!("Enter your character's {name}: "))?
            .ok_or(CoreError::InputClosed)?;
        character.set(name.clone(), answer);
    }
    Ok(())
}

/// Run interactive creation: greet, ask for every attribute of `template`,
/// and show the finished sheet.
pub fn create_character<C>(console: &mut C, template: &CharacterTemplate) -> CoreResult<Character>
where
    C: Console + ?Sized,
{
    console.show(Output::Info("Welcome to character creation!".to_string()));
    let mut character = Character::new();
    prompt_for_attributes(console, &template.attributes(), &mut character)?;
    console.show(Output::Info("Character creation complete:".to_string()));
    console.show(Output::Sheet(character.to_string()));
    Ok(character)
}
