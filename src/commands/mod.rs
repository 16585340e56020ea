/// Subcommand implementations and the dispatcher that picks one.
pub mod config;
pub mod filter;
pub mod list;
pub mod live;
pub mod search;
pub mod source;

use crate::cli::OutputCtx;
use crate::cli::args::Command;
use crate::settings::SettingsStore;
use crate::shortcuts::ShortcutError;

/// Run the handler for `command`.
///
/// # Errors
///
/// Returns `ShortcutError` on any command failure.
pub fn dispatch(
    command: &Command,
    ctx: &OutputCtx,
    store: &mut SettingsStore,
) -> Result<(), ShortcutError> {
    match command {
        Command::List(args) => list::run(args, ctx, store),
        Command::Filter(args) => filter::run(args, ctx, store),
        Command::Search(args) => search::run(args, ctx, store),
        Command::Live(args) => live::run(args, store),
        Command::Config(args) => config::run(args, ctx, store),
    }
}
