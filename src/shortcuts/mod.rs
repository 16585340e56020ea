/// Shortcut domain layer: entries, loading, list rendering, filtering.
pub mod entry;
pub mod errors;
pub mod filter;
pub mod list;
pub mod loader;

pub use entry::ShortcutEntry;
pub use errors::ShortcutError;
pub use filter::{FilterOutcome, compose, fuzzy_search, search};
pub use list::ShortcutList;
pub use loader::{LoadOptions, load_file};
