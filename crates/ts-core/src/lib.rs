//! Core types for Talespinner: the character record and its persistence.
//!
//! A [`Character`] is a flat mapping of attribute names to values. The
//! [`CharacterStore`] reads and writes it as a JSON document, and a
//! [`CharacterTemplate`] decides which attributes get asked for when a new
//! character is created through a [`Console`].

/// The character record.
pub mod character;
/// Line-oriented console abstraction used for prompting.
pub mod console;
/// Error types used throughout the crate.
pub mod error;
/// JSON persistence and interactive creation.
pub mod store;
/// Attribute lists for character creation.
pub mod template;

pub use character::Character;
pub use console::{Console, Output, ScriptedConsole};
pub use error::{CoreError, CoreResult};
pub use store::{CharacterStore, DEFAULT_CHARACTER_FILE, create_character, prompt_for_attributes};
pub use template::CharacterTemplate;
