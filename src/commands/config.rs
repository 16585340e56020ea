/// `config` command: show or reset the persisted settings.
use tracing::info;

use crate::cli::OutputCtx;
use crate::cli::args::ConfigArgs;
use crate::cli::output::write_config;
use crate::settings::SettingsStore;
use crate::shortcuts::ShortcutError;
use crate::types::ConfigOutput;

/// Run `accelview config`.
///
/// # Errors
///
/// Returns `ShortcutError::Settings` if `--clear` cannot write the file.
pub fn run(args: &ConfigArgs, ctx: &OutputCtx, store: &mut SettingsStore) -> Result<(), ShortcutError> {
    if args.clear {
        store
            .clear()
            .map_err(|err| ShortcutError::Settings(format!("{err:#}")))?;
        info!(path = %store.path().display(), "cleared last file path");
    }

    let output = ConfigOutput {
        settings_path: store.path().to_path_buf(),
        last_file_path: store.last_file().map(std::path::Path::to_path_buf),
    };
    write_config(&output, ctx);
    Ok(())
}
