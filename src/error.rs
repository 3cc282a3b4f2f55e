use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl AppError {
    /// Text rendered inside the panel that triggered the failure. Transport
    /// problems collapse to one generic line; server-reported messages pass
    /// through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Transport(_) => "Failed to connect to server.".to_string(),
            AppError::Api { message, .. } => message.clone(),
            AppError::Decode(_) => "Server returned an unreadable response.".to_string(),
        }
    }
}
