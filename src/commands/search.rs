/// `search` command: text or fuzzy search over a descriptor's shortcuts.
use crate::cli::OutputCtx;
use crate::cli::args::SearchArgs;
use crate::cli::output::write_filter_result;
use crate::settings::SettingsStore;
use crate::shortcuts::{ShortcutError, fuzzy_search, search};
use crate::types::FilterResultOutput;

use super::source::{load_and_remember, resolve_path};

/// Run `accelview search`.
///
/// # Errors
///
/// Returns `ShortcutError` if no path is known, the file is missing, or it
/// cannot be read or parsed.
pub fn run(
    args: &SearchArgs,
    ctx: &OutputCtx,
    store: &mut SettingsStore,
) -> Result<(), ShortcutError> {
    let path = resolve_path(args.file.as_deref(), store)?;

    let _t_load = ctx.timer("load");
    let list = load_and_remember(&path, &args.source, store)?;
    drop(_t_load);

    let _t_search = ctx.timer("search");
    let outcome = if args.fuzzy {
        fuzzy_search(&list, &args.term, args.limit)
    } else {
        search(&list, &args.term)
    };
    drop(_t_search);

    let output = FilterResultOutput::new(&list, args.term.trim(), outcome);
    write_filter_result(&output, ctx);
    Ok(())
}
