use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagCatError {
    #[error("Selected run not found in run-to-tag mapping: {run}")]
    UnknownRun { run: String },

    #[error("Invalid filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid value for config key '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, TagCatError>;

impl TagCatError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnknownRun { .. } => 2,
            Self::ConfigKeyNotFound { .. } | Self::InvalidConfigValue { .. } => 3,
            Self::InvalidFilter { .. } => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let unknown = TagCatError::UnknownRun {
            run: "train".to_string(),
        };
        assert_eq!(unknown.exit_code(), 2);

        let key = TagCatError::ConfigKeyNotFound {
            key: "nope".to_string(),
        };
        assert_eq!(key.exit_code(), 3);

        let io = TagCatError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn test_unknown_run_message_names_run() {
        let err = TagCatError::UnknownRun {
            run: "eval".to_string(),
        };
        assert!(err.to_string().contains("eval"));
    }
}
