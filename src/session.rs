/// Viewer state driven by key events and user input.
///
/// One `Session` backs the live screen: it owns the loaded list, the active
/// modifier prefix and the search field, and exposes the text and status the
/// renderer draws. All state changes are synchronous.
use std::path::Path;

use tracing::{debug, info, warn};

use crate::keyboard::{HeldModifiers, KeyboardState, PhysicalKey};
use crate::shortcuts::filter::{self, FilterOutcome};
use crate::shortcuts::{LoadOptions, ShortcutError, ShortcutList, load_file};

const NOTHING_LOADED: &str = "First load shortcuts from XML file!";
const LOAD_FAILED: &str = "Failed to load file.";

#[derive(Debug, Default)]
pub struct Session {
    list: Option<ShortcutList>,
    current_filter: String,
    search: String,
    displayed: String,
    status: String,
    load_opts: LoadOptions,
}

impl Session {
    #[must_use]
    pub fn new(load_opts: LoadOptions) -> Self {
        Self {
            load_opts,
            ..Self::default()
        }
    }

    /// Text for the results area.
    #[must_use]
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// The modifier prefix currently applied (`""` when none).
    #[must_use]
    pub fn current_filter(&self) -> &str {
        &self.current_filter
    }

    #[cfg(test)]
    #[must_use]
    pub fn list(&self) -> Option<&ShortcutList> {
        self.list.as_ref()
    }

    /// Load a descriptor, replacing the current list on success.
    ///
    /// Returns `true` when the file loaded and the path is worth remembering.
    /// On failure the previous list stays in place and only the status and
    /// results text change.
    pub fn load(&mut self, path: &str) -> bool {
        let path = path.trim();
        match self.try_load(path) {
            Ok(list) => {
                info!(path, count = list.len(), "loaded shortcuts");
                self.displayed = list.blob();
                self.status = format!("Loaded {} keyboard shortcuts.", list.len());
                self.current_filter.clear();
                self.list = Some(list);
                true
            }
            Err(err) if err.is_load_failure() => {
                warn!(path, error = %err, "failed to load shortcuts");
                self.status = format!("Error: {err}");
                self.displayed = LOAD_FAILED.to_owned();
                false
            }
            Err(err) => {
                debug!(path, error = %err, "rejected path");
                self.status = err.to_string();
                false
            }
        }
    }

    fn try_load(&self, path: &str) -> Result<ShortcutList, ShortcutError> {
        if path.is_empty() {
            return Err(ShortcutError::PathEmpty);
        }
        let path = Path::new(path);
        if !path.is_file() {
            return Err(ShortcutError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        load_file(path, &self.load_opts)
    }

    /// A key went down somewhere; re-read the modifiers.
    pub fn on_key_pressed(&mut self, keyboard: &dyn KeyboardState) {
        let prefix = HeldModifiers::read(keyboard).prefix();
        if prefix != self.current_filter && self.list.is_some() {
            debug!(filter = %prefix, "modifier filter changed");
            self.current_filter = prefix;
            self.apply_filter();
        }
        if !self.search.is_empty() {
            self.perform_search();
        }
    }

    /// A key came up. `key` is the modifier released, if it was one.
    ///
    /// The prefix is rebuilt from the modifiers still held, so releasing the
    /// last one restores the full list. This deliberately differs from
    /// clearing the filter on any modifier release: releasing Shift out of
    /// Control+Shift goes straight back to the `Control + ` view.
    pub fn on_key_released(&mut self, key: Option<PhysicalKey>, keyboard: &dyn KeyboardState) {
        if key.is_some() && !self.current_filter.is_empty() {
            let prefix = HeldModifiers::read(keyboard).prefix();
            if prefix != self.current_filter {
                debug!(filter = %prefix, "modifier released");
                self.current_filter = prefix;
                self.apply_filter();
            }
        }
        if !self.search.is_empty() {
            self.perform_search();
        }
    }

    /// Replace the search field contents and re-run the search.
    pub fn set_search(&mut self, term: &str) {
        term.clone_into(&mut self.search);
        self.perform_search();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.perform_search();
    }

    pub fn pop_search_char(&mut self) {
        if self.search.pop().is_some() {
            self.perform_search();
        }
    }

    /// Empty the search field and show every shortcut.
    pub fn clear_search(&mut self) {
        self.search.clear();
        if let Some(list) = &self.list {
            self.show(filter::search(list, ""));
        }
    }

    fn apply_filter(&mut self) {
        let Some(list) = &self.list else { return };
        if self.current_filter.is_empty() {
            self.displayed = list.blob();
            self.status = filter::loaded_status(list);
        } else {
            self.show(filter::filter_by_prefix(list, &self.current_filter));
        }
    }

    fn perform_search(&mut self) {
        let Some(list) = &self.list else {
            NOTHING_LOADED.clone_into(&mut self.status);
            return;
        };
        self.show(filter::search(list, &self.search));
    }

    fn show(&mut self, outcome: FilterOutcome) {
        self.displayed = outcome.text();
        self.status = outcome.status;
    }
}
