use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("TOML Parsing Error: {0}")]
    TomlParse(String),

    #[error("TOML Serialization Error")]
    TomlSerialize(#[from] toml::ser::Error),

    #[cfg(feature = "serde_support")]
    #[error("JSON Serialization Error")]
    JsonSerialize(#[from] serde_json::Error),

    #[cfg(feature = "serde_support")]
    #[error("YAML Serialization Error")]
    YamlError(#[from] serde_yml::Error),

    #[error("Filesystem Error")]
    Io(#[from] std::io::Error),

    #[error("Cannot resolve project root '{path}'")]
    ProjectRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read file '{path}'")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}'")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}'")]
    DirCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid Filter Pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("Tree Parse Error: input contains no root line")]
    EmptyTree,

    #[error("Tree Parse Error: line {line}: {reason}")]
    TreeParse { line: usize, reason: String },
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::InvalidPattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn io_cause_is_reported_once() {
        let err = AppError::FileWrite {
            path: PathBuf::from("/out/tree.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        };
        assert_eq!(err.to_string(), "Failed to write file '/out/tree.txt'");
        let cause = err.source().map(|s| s.to_string());
        assert_eq!(cause.as_deref(), Some("no such directory"));
    }

    #[test]
    fn regex_errors_become_invalid_pattern() {
        let err: AppError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, AppError::InvalidPattern(_)));
    }
}
