use std::fmt::{self, Display};

/// Errors produced by model constructors and parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    InvalidId(String),
    UnknownEffectiveType(String),
    UnknownPreload(String),
    UnknownResolution(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidId(msg) => write!(f, "invalid media id: {msg}"),
            ModelError::UnknownEffectiveType(value) => {
                write!(f, "unknown effective connection type: {value}")
            }
            ModelError::UnknownPreload(value) => {
                write!(f, "unknown video preload mode: {value}")
            }
            ModelError::UnknownResolution(value) => {
                write!(f, "unknown video resolution: {value}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
