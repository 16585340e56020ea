/// A single accelerator binding and its display formatting.
use serde::{Deserialize, Serialize};

/// Column width the accelerator is padded to in display lines.
pub const ACCELERATOR_WIDTH: usize = 20;

/// Command name used when an element has no `CommandName` attribute.
pub const UNKNOWN_COMMAND: &str = "Unknown";

/// One `CommandName` / `Accelerator` pair read from a descriptor element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutEntry {
    /// Fully qualified command name (e.g., "App.Commands.Save").
    pub command_name: String,
    /// Key combination bound to the command (e.g., "Ctrl+S").
    pub accelerator: String,
}

impl ShortcutEntry {
    #[must_use]
    pub fn new(command_name: impl Into<String>, accelerator: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            accelerator: accelerator.into(),
        }
    }

    /// Short command name: the segment after the last `.`.
    ///
    /// Names without a dot are returned whole. A trailing dot yields `""`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.command_name.rfind('.') {
            Some(idx) => &self.command_name[idx + 1..],
            None => &self.command_name,
        }
    }

    /// Fixed-width line: accelerator padded to [`ACCELERATOR_WIDTH`], then
    /// `" - "` and the display name.
    ///
    /// Accelerators longer than the column are kept whole.
    ///
    /// ```
    /// // "Ctrl+S" / "App.Commands.Save" → "Ctrl+S               - Save"
    /// ```
    #[must_use]
    pub fn display_line(&self) -> String {
        format!(
            "{:<width$} - {}",
            self.accelerator,
            self.display_name(),
            width = ACCELERATOR_WIDTH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_last_segment() {
        let entry = ShortcutEntry::new("App.Commands.Save", "Ctrl+S");
        assert_eq!(entry.display_name(), "Save");
    }

    #[test]
    fn test_display_name_without_dot() {
        let entry = ShortcutEntry::new("Refresh", "F5");
        assert_eq!(entry.display_name(), "Refresh");
    }

    #[test]
    fn test_display_name_trailing_dot() {
        let entry = ShortcutEntry::new("App.Commands.", "F6");
        assert_eq!(entry.display_name(), "");
    }

    #[test]
    fn test_display_line_padding() {
        let entry = ShortcutEntry::new("App.Commands.Save", "Ctrl+S");
        let expected = format!("{}{} - Save", "Ctrl+S", " ".repeat(14));
        assert_eq!(entry.display_line(), expected);
        assert_eq!(entry.display_line().find(" - "), Some(ACCELERATOR_WIDTH));
    }

    #[test]
    fn test_display_line_long_accelerator() {
        let entry = ShortcutEntry::new("Edit.Format", "Control + Shift + Alt + F");
        assert_eq!(entry.display_line(), "Control + Shift + Alt + F - Format");
    }

    #[test]
    fn test_display_line_pads_by_chars() {
        let entry = ShortcutEntry::new("Go.Up", "⌃↑");
        let line = entry.display_line();
        assert_eq!(line.chars().count(), ACCELERATOR_WIDTH + " - Up".len());
    }
}
