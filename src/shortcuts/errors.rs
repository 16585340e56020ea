/// Errors from the shortcut domain layer.
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating, loading or presenting shortcuts.
#[derive(Debug, Error)]
pub enum ShortcutError {
    /// No file path was given and none was remembered.
    #[error("Enter file path!")]
    PathEmpty,

    /// The given path does not name an existing file.
    #[error("File does not exist!")]
    FileNotFound {
        /// The path that was checked.
        path: PathBuf,
    },

    /// The document is not well-formed XML.
    #[error("{message}")]
    Parse {
        /// Parser message, including the byte offset where known.
        message: String,
    },

    /// The file could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The settings file could not be written.
    #[error("Settings error: {0}")]
    Settings(String),

    /// Terminal setup or teardown failed in the live session.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl ShortcutError {
    /// Shorthand for a [`ShortcutError::Parse`] with a formatted message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PathEmpty => 2,
            Self::FileNotFound { .. } => 4,
            Self::Parse { .. } | Self::Io(_) => 5,
            Self::Settings(_) | Self::Terminal(_) => 1,
        }
    }

    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PathEmpty => "path_empty",
            Self::FileNotFound { .. } => "file_not_found",
            Self::Parse { .. } => "parse_error",
            Self::Io(_) => "io_error",
            Self::Settings(_) => "settings_error",
            Self::Terminal(_) => "terminal_error",
        }
    }

    /// Whether the failure happened while reading or parsing a file.
    ///
    /// These are the errors the viewer reports as `Error: …` rather than as
    /// a path validation message.
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_messages() {
        assert_eq!(ShortcutError::PathEmpty.to_string(), "Enter file path!");
        let err = ShortcutError::FileNotFound {
            path: PathBuf::from("/nope.xml"),
        };
        assert_eq!(err.to_string(), "File does not exist!");
        assert_eq!(err.code(), "file_not_found");
    }

    #[test]
    fn test_parse_message_is_raw() {
        let err = ShortcutError::parse("unexpected end of document");
        assert_eq!(err.to_string(), "unexpected end of document");
        assert!(err.is_load_failure());
        assert!(!ShortcutError::PathEmpty.is_load_failure());
    }
}
