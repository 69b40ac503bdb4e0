//! CLI error type
//!
//! Everything a command can fail with ends up here and is printed by
//! `main` as `error: <message>`.

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] foundry_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// `--json` rendering failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Confirmation prompt failed
    #[error("Prompt failed: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// Message for the user, printed verbatim
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
