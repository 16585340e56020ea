/// Serializable shapes printed by the commands.
///
/// These types are what gets written to stdout, either as JSON or rendered
/// as a table. They are decoupled from the internal `ShortcutEntry` /
/// `FilterOutcome` types.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::shortcuts::{FilterOutcome, ShortcutEntry, ShortcutError, ShortcutList};

/// One shortcut as printed by `list`, `filter` and `search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutOutput {
    /// Key combination (e.g., "Ctrl+S").
    pub accelerator: String,
    /// Fully qualified command name (e.g., "App.Commands.Save").
    pub command: String,
    /// Short name: the last dot-separated segment of `command`.
    pub name: String,
    /// Fixed-width display line.
    pub line: String,
}

impl From<&ShortcutEntry> for ShortcutOutput {
    fn from(entry: &ShortcutEntry) -> Self {
        Self {
            accelerator: entry.accelerator.clone(),
            command: entry.command_name.clone(),
            name: entry.display_name().to_owned(),
            line: entry.display_line(),
        }
    }
}

/// Result of a filter or search: matching shortcuts plus the status line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterResultOutput {
    /// The modifier prefix or search term applied (empty for none).
    pub query: String,
    /// Number of matches.
    pub count: usize,
    /// Human-readable status, e.g. "Search 'save' - found 2 shortcuts."
    pub status: String,
    /// Matching shortcuts in result order.
    pub shortcuts: Vec<ShortcutOutput>,
}

impl FilterResultOutput {
    /// Pair each kept line with its entry.
    #[must_use]
    pub fn new(list: &ShortcutList, query: &str, outcome: FilterOutcome) -> Self {
        let shortcuts = outcome
            .indices
            .iter()
            .filter_map(|&i| list.entries().get(i))
            .map(ShortcutOutput::from)
            .collect();
        Self {
            query: query.to_owned(),
            count: outcome.count(),
            status: outcome.status,
            shortcuts,
        }
    }
}

/// Settings as shown by `accelview config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOutput {
    /// Location of the settings file.
    pub settings_path: PathBuf,
    /// Remembered descriptor, or null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_file_path: Option<PathBuf>,
}

/// What a failed command prints in the JSON formats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// `false` on every error.
    pub ok: bool,
    /// What went wrong.
    pub error: ErrorDetail,
}

/// Code, message and optional path of a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable snake_case identifier, e.g. `file_not_found`.
    pub code: String,
    /// The same text the live view shows in its status line.
    pub message: String,
    /// The offending path, for path errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ErrorOutput {
    /// Construct from a `ShortcutError`.
    #[must_use]
    pub fn from_shortcut_error(err: &ShortcutError) -> Self {
        let path = match err {
            ShortcutError::FileNotFound { path } => Some(path.clone()),
            _ => None,
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
                path,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_output_from_entry() {
        let out = ShortcutOutput::from(&ShortcutEntry::new("App.Commands.Save", "Ctrl+S"));
        assert_eq!(out.name, "Save");
        assert_eq!(out.command, "App.Commands.Save");
        assert!(out.line.starts_with("Ctrl+S "));
    }

    #[test]
    fn test_error_envelope() {
        let err = ShortcutError::FileNotFound {
            path: PathBuf::from("missing.xml"),
        };
        let json = serde_json::to_value(ErrorOutput::from_shortcut_error(&err)).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["code"], "file_not_found");
        assert_eq!(json["error"]["message"], "File does not exist!");
        assert_eq!(json["error"]["path"], "missing.xml");
    }
}
