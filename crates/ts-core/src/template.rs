use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Which attributes to ask for when creating a character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CharacterTemplate {
    /// Name, gender, race, and background.
    #[default]
    Classic,
    /// Name, age, and a free-form description.
    Quick,
    /// A caller-supplied attribute list, asked in order.
    Custom(Vec<String>),
}

impl CharacterTemplate {
    /// The ordered attribute names for this template.
    pub fn attributes(&self) -> Vec<String> {
        match self {
            Self::Classic => ["name", "gender", "race", "background"]
                .into_iter()
                .map(String::from)
                .collect(),
            Self::Quick => ["name", "age", "description"]
                .into_iter()
                .map(String::from)
                .collect(),
            Self::Custom(names) => names.clone(),
        }
    }
}

impl fmt::Display for CharacterTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => write!(f, "classic"),
            Self::Quick => write!(f, "quick"),
            Self::Custom(names) => write!(f, "custom ({})", names.join(", ")),
        }
    }
}

impl FromStr for CharacterTemplate {
    type Err = CoreError;

    /// Parse `classic` or `quick`. `custom` yields an empty custom list that
    /// the caller fills in.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "quick" => Ok(Self::Quick),
            "custom" => Ok(Self::Custom(Vec::new())),
            other => Err(CoreError::UnknownTemplate(other.to_string())),
        }
    }
}
