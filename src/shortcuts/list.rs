/// Ordered display lines for a loaded descriptor.
use super::entry::ShortcutEntry;

/// The shortcuts of one document, in document order.
///
/// Entries are kept alongside their formatted lines so structured output
/// (JSON, tables) does not have to re-parse the display text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcutList {
    entries: Vec<ShortcutEntry>,
    lines: Vec<String>,
}

impl ShortcutList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and its display line.
    pub fn push(&mut self, entry: ShortcutEntry) {
        self.lines.push(entry.display_line());
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[ShortcutEntry] {
        &self.entries
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines as one text, each terminated by `\n`.
    #[must_use]
    pub fn blob(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl FromIterator<ShortcutEntry> for ShortcutList {
    fn from_iter<I: IntoIterator<Item = ShortcutEntry>>(iter: I) -> Self {
        let mut list = Self::new();
        for entry in iter {
            list.push(entry);
        }
        list
    }
}

/// Number of non-blank lines in a text blob.
#[must_use]
pub fn count_lines(text: &str) -> usize {
    text.split('\n').filter(|l| !l.trim().is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_preserves_order() {
        let list: ShortcutList = [
            ShortcutEntry::new("File.Open", "Ctrl+O"),
            ShortcutEntry::new("File.Save", "Ctrl+S"),
        ]
        .into_iter()
        .collect();
        let blob = list.blob();
        let lines: Vec<&str> = blob.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("- Open"));
        assert!(lines[1].ends_with("- Save"));
        assert!(blob.ends_with('\n'));
    }

    #[test]
    fn test_count_lines_skips_blank() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("a\n\n  \nb\n"), 2);
        assert_eq!(count_lines("a\r\nb\r\n"), 2);
    }

    #[test]
    fn test_count_matches_blob() {
        let list: ShortcutList = (0..5)
            .map(|i| ShortcutEntry::new(format!("Cmd.N{i}"), format!("F{i}")))
            .collect();
        assert_eq!(count_lines(&list.blob()), list.len());
    }
}
