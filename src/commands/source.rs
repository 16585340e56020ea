/// Descriptor resolution shared by the loading commands.
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::SourceArgs;
use crate::settings::SettingsStore;
use crate::shortcuts::{LoadOptions, ShortcutError, ShortcutList, load_file};

impl From<&SourceArgs> for LoadOptions {
    fn from(args: &SourceArgs) -> Self {
        Self {
            element: args.element.clone(),
        }
    }
}

/// Pick the descriptor path: the explicit argument, else the remembered one.
///
/// # Errors
///
/// Returns `ShortcutError::PathEmpty` when neither is set or the argument is blank.
pub fn resolve_path(arg: Option<&Path>, store: &SettingsStore) -> Result<PathBuf, ShortcutError> {
    let path = arg
        .or_else(|| store.last_file())
        .ok_or(ShortcutError::PathEmpty)?;
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(ShortcutError::PathEmpty);
    }
    debug!(path = %path.display(), "resolved descriptor path");
    Ok(path.to_path_buf())
}

/// Validate and load a descriptor, remembering its path on success.
///
/// # Errors
///
/// Returns `ShortcutError::FileNotFound` when `path` is not a file, otherwise
/// whatever [`load_file`] returns.
pub fn load_and_remember(
    path: &Path,
    source: &SourceArgs,
    store: &mut SettingsStore,
) -> Result<ShortcutList, ShortcutError> {
    if !path.is_file() {
        return Err(ShortcutError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let list = load_file(path, &LoadOptions::from(source))?;
    store.remember(path);
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(dir: &tempfile::TempDir, last: Option<&str>) -> SettingsStore {
        let mut store = SettingsStore::open(dir.path().join("settings.json"));
        store.settings.last_file_path = last.map(PathBuf::from);
        store
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(&dir, Some("old.xml"));
        let path = resolve_path(Some(Path::new("new.xml")), &store).unwrap();
        assert_eq!(path, PathBuf::from("new.xml"));
    }

    #[test]
    fn test_falls_back_to_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(&dir, Some("old.xml"));
        assert_eq!(resolve_path(None, &store).unwrap(), PathBuf::from("old.xml"));
    }

    #[test]
    fn test_no_path_at_all() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with(&dir, None);
        let err = resolve_path(None, &store).unwrap_err();
        assert!(matches!(err, ShortcutError::PathEmpty));
        let err = resolve_path(Some(Path::new("  ")), &store).unwrap_err();
        assert!(matches!(err, ShortcutError::PathEmpty));
    }

    #[test]
    fn test_load_remembers_path() {
        let dir = tempfile::tempdir().unwrap();
        let xml = dir.path().join("keys.xml");
        std::fs::write(&xml, r#"<R><S CommandName="A.B" Accelerator="F2"/></R>"#).unwrap();
        let mut store = store_with(&dir, None);
        let source = SourceArgs { element: None };

        let list = load_and_remember(&xml, &source, &mut store).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(store.last_file(), Some(xml.as_path()));
        assert!(store.path().exists());
    }

    #[test]
    fn test_failed_load_is_not_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let xml = dir.path().join("broken.xml");
        std::fs::write(&xml, "<R>").unwrap();
        let mut store = store_with(&dir, None);
        let source = SourceArgs { element: None };

        let err = load_and_remember(&xml, &source, &mut store).unwrap_err();
        assert!(matches!(err, ShortcutError::Parse { .. }));
        assert!(store.last_file().is_none());

        let err =
            load_and_remember(&dir.path().join("missing.xml"), &source, &mut store).unwrap_err();
        assert!(matches!(err, ShortcutError::FileNotFound { .. }));
    }
}
