use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SpriteForgeError {
    ConfigError(String),
    RequestRejected { status: u16, body: String },
    RetriesExhausted { last_error: String },
    DecodeError(String),
    IoError { path: PathBuf, reason: String },
    PackError(String),
}

impl fmt::Display for SpriteForgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpriteForgeError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SpriteForgeError::RequestRejected { status, body } => {
                write!(f, "Request rejected with HTTP {}: {}", status, body)
            }
            SpriteForgeError::RetriesExhausted { last_error } => {
                write!(f, "Retries exhausted, last error: {}", last_error)
            }
            SpriteForgeError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            SpriteForgeError::IoError { path, reason } => {
                write!(f, "I/O error at {}: {}", path.display(), reason)
            }
            SpriteForgeError::PackError(msg) => write!(f, "Packing error: {}", msg),
        }
    }
}

impl std::error::Error for SpriteForgeError {}

pub type Result<T> = std::result::Result<T, SpriteForgeError>;
