/// `filter` command: keep shortcuts whose accelerator starts with the given modifiers.
///
/// `--search` replaces the modifier filter with a text search, the same way
/// typing does in the live view.
use crate::cli::OutputCtx;
use crate::cli::args::FilterArgs;
use crate::cli::output::write_filter_result;
use crate::keyboard::{HeldModifiers, StaticKeyboard};
use crate::settings::SettingsStore;
use crate::shortcuts::{ShortcutError, ShortcutList, compose};
use crate::types::FilterResultOutput;

use super::source::{load_and_remember, resolve_path};

/// Run `accelview filter`.
///
/// The flags stand in for held keys; with none set every shortcut is shown.
///
/// # Errors
///
/// Returns `ShortcutError` if no path is known, the file is missing, or it
/// cannot be read or parsed.
pub fn run(
    args: &FilterArgs,
    ctx: &OutputCtx,
    store: &mut SettingsStore,
) -> Result<(), ShortcutError> {
    let path = resolve_path(args.path.as_deref(), store)?;

    let _t_load = ctx.timer("load");
    let list = load_and_remember(&path, &args.source, store)?;
    drop(_t_load);

    let keyboard = StaticKeyboard::from_flags(args.control, args.alt, args.shift);
    let prefix = HeldModifiers::read(&keyboard).prefix();

    let _t_filter = ctx.timer("filter");
    let term = args.search.as_deref().unwrap_or_default();
    let output = filter_result(&list, &prefix, term);
    drop(_t_filter);

    write_filter_result(&output, ctx);
    Ok(())
}

/// Apply the filters and pair each line with its entry for output.
fn filter_result(list: &ShortcutList, prefix: &str, term: &str) -> FilterResultOutput {
    let query = if term.trim().is_empty() { prefix } else { term.trim() };
    FilterResultOutput::new(list, query, compose(list, prefix, term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::ShortcutEntry;

    #[test]
    fn test_filter_result_pairs_entries() {
        let list: ShortcutList = [
            ShortcutEntry::new("File.Save", "Control + S"),
            ShortcutEntry::new("Debug.Start", "F5"),
            ShortcutEntry::new("File.SaveAll", "Control + Shift + S"),
        ]
        .into_iter()
        .collect();
        let out = filter_result(&list, "Control + ", "");
        assert_eq!(out.count, 2);
        assert_eq!(out.shortcuts.len(), 2);
        assert_eq!(out.shortcuts[1].name, "SaveAll");
        assert_eq!(out.status, "Filter 'Control + ' - found 2 shortcuts.");

        let all = filter_result(&list, "", " ");
        assert_eq!(all.count, 3);
        assert_eq!(all.status, "Loaded 3 keyboard shortcuts.");
    }

    #[test]
    fn test_search_overrides_flags() {
        let list: ShortcutList = [
            ShortcutEntry::new("File.Save", "Control + S"),
            ShortcutEntry::new("Debug.Start", "F5"),
        ]
        .into_iter()
        .collect();
        let out = filter_result(&list, "Control + ", " start ");
        assert_eq!(out.query, "start");
        assert_eq!(out.count, 1);
        assert_eq!(out.shortcuts[0].accelerator, "F5");
        assert_eq!(out.status, "Search 'start' - found 1 shortcuts.");
    }
}
