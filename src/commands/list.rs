/// `list` command: load a descriptor and print every shortcut.
use tracing::warn;

use crate::cli::OutputCtx;
use crate::cli::args::ListArgs;
use crate::cli::output::write_shortcuts;
use crate::settings::SettingsStore;
use crate::shortcuts::ShortcutError;
use crate::shortcuts::filter::loaded_status;
use crate::types::ShortcutOutput;

use super::source::{load_and_remember, resolve_path};

/// Run `accelview list`.
///
/// # Errors
///
/// Returns `ShortcutError` if no path is known, the file is missing, or it
/// cannot be read or parsed.
pub fn run(args: &ListArgs, ctx: &OutputCtx, store: &mut SettingsStore) -> Result<(), ShortcutError> {
    let path = resolve_path(args.path.as_deref(), store)?;

    let _t_load = ctx.timer("load");
    let list = load_and_remember(&path, &args.source, store)?;
    drop(_t_load);

    if list.is_empty() {
        warn!(path = %path.display(), "descriptor has no shortcuts");
    }

    let output: Vec<ShortcutOutput> = list.entries().iter().map(ShortcutOutput::from).collect();
    write_shortcuts(&output, &loaded_status(&list), ctx);
    Ok(())
}
