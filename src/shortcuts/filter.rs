/// Line filters over a loaded shortcut list.
///
/// Two predicates exist:
/// - **modifier prefix**: the trimmed line starts with a prefix such as
///   `"Control + Shift + "` (see [`crate::keyboard::HeldModifiers::prefix`]);
/// - **text search**: case-insensitive substring over non-blank lines.
///
/// Each returns the matching lines in list order together with the status
/// message shown under the results.
use nucleo_matcher::{
    Matcher, Utf32Str,
    pattern::{CaseMatching, Normalization, Pattern},
};

use super::list::{ShortcutList, count_lines};

/// Filtered lines and the status line describing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Positions of the kept lines in the source list, in result order.
    pub indices: Vec<usize>,
    pub lines: Vec<String>,
    pub status: String,
}

impl FilterOutcome {
    fn collect(list: &ShortcutList, indices: Vec<usize>, status: String) -> Self {
        let lines = indices.iter().map(|&i| list.lines()[i].clone()).collect();
        Self {
            indices,
            lines,
            status,
        }
    }

    fn everything(list: &ShortcutList, status: String) -> Self {
        Self::collect(list, (0..list.len()).collect(), status)
    }

    /// Lines joined back into one text.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.lines.len()
    }
}

/// Status for an unfiltered list right after loading or after modifiers are released.
#[must_use]
pub fn loaded_status(list: &ShortcutList) -> String {
    format!("Loaded {} keyboard shortcuts.", count_lines(&list.blob()))
}

/// Keep the lines whose trimmed text starts with `prefix`.
///
/// An empty prefix keeps everything.
#[must_use]
pub fn filter_by_prefix(list: &ShortcutList, prefix: &str) -> FilterOutcome {
    if prefix.is_empty() {
        return FilterOutcome::everything(list, loaded_status(list));
    }

    let indices: Vec<usize> = matching(list, |line| line.trim().starts_with(prefix));
    let status = format!("Filter '{prefix}' - found {} shortcuts.", indices.len());
    FilterOutcome::collect(list, indices, status)
}

/// Case-insensitive substring search over non-blank lines.
///
/// The term is trimmed first; an empty term shows every line.
#[must_use]
pub fn search(list: &ShortcutList, term: &str) -> FilterOutcome {
    let term = term.trim();
    if term.is_empty() {
        let status = format!(
            "Showing all {} keyboard shortcuts.",
            count_lines(&list.blob())
        );
        return FilterOutcome::everything(list, status);
    }

    let needle = term.to_lowercase();
    let indices = matching(list, |line| {
        !line.trim().is_empty() && line.to_lowercase().contains(&needle)
    });
    let status = format!("Search '{term}' - found {} shortcuts.", indices.len());
    FilterOutcome::collect(list, indices, status)
}

/// Fuzzy search with smart-case matching, best match first.
///
/// At most `limit` lines are returned. Equal scores keep list order.
#[must_use]
pub fn fuzzy_search(list: &ShortcutList, term: &str, limit: usize) -> FilterOutcome {
    let term = term.trim();
    if term.is_empty() {
        let mut outcome = search(list, term);
        outcome.indices.truncate(limit);
        outcome.lines.truncate(limit);
        return outcome;
    }

    let pattern = Pattern::parse(term, CaseMatching::Smart, Normalization::Smart);
    let mut matcher = Matcher::new(nucleo_matcher::Config::DEFAULT);

    let mut buf = Vec::new();
    let mut scored: Vec<(usize, u32)> = list
        .lines()
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let haystack = Utf32Str::new(line, &mut buf);
            pattern.score(haystack, &mut matcher).map(|s| (i, s))
        })
        .collect();

    // Stable sort keeps document order among equal scores.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(limit);

    let indices: Vec<usize> = scored.into_iter().map(|(i, _)| i).collect();
    let status = format!("Fuzzy '{term}' - found {} shortcuts.", indices.len());
    FilterOutcome::collect(list, indices, status)
}

fn matching(list: &ShortcutList, keep: impl Fn(&str) -> bool) -> Vec<usize> {
    list.lines()
        .iter()
        .enumerate()
        .filter(|(_, line)| keep(line.as_str()))
        .map(|(i, _)| i)
        .collect()
}

/// Modifier filter first; a non-empty search term overrides it by searching
/// the full list.
#[must_use]
pub fn compose(list: &ShortcutList, prefix: &str, term: &str) -> FilterOutcome {
    if term.trim().is_empty() {
        filter_by_prefix(list, prefix)
    } else {
        search(list, term)
    }
}
