use std::io;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while persisting or creating a character.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Reading or writing the character file failed.
    #[error("character file error: {0}")]
    Io(#[from] io::Error),

    /// The character could not be serialized or parsed.
    #[error("invalid character data: {0}")]
    Json(#[from] serde_json::Error),

    /// The console reached end of input before a required answer.
    #[error("input closed before the character was complete")]
    InputClosed,

    /// A template name that is not `classic`, `quick`, or `custom`.
    #[error("unknown character template: \"{0}\"")]
    UnknownTemplate(String),
}
