use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShowcaseError>;

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("theme document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("preference storage failed: {message}")]
    Storage { message: String },

    #[error("fetch of {path} failed: {message}")]
    Fetch { path: String, message: String },

    #[error("DOM operation failed: {message}")]
    Dom { message: String },
}

impl ShowcaseError {
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn fetch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            path: path.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn dom(message: impl Into<String>) -> Self {
        Self::Dom {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
