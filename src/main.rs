#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! accelview: browse and live-filter keyboard shortcut descriptors.

mod cli;
mod commands;
mod keyboard;
mod logging;
mod session;
mod settings;
mod shortcuts;
mod types;

use clap::Parser;

use cli::args::Command;
use cli::{Cli, OutputCtx, write_error};
use logging::LogSink;
use settings::SettingsStore;
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();

    let sink = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogSink::File(path),
        (None, Command::Live(_)) => LogSink::Discard,
        (None, _) => LogSink::Stderr,
    };
    if let Err(err) = logging::init(cli.debug, sink) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let mut store = SettingsStore::open(cli.config.clone().unwrap_or_else(settings::default_path));

    let ctx = OutputCtx::new(cli.output, cli.json, cli.no_header, cli.debug);

    match commands::dispatch(&cli.command, &ctx, &mut store) {
        Ok(()) => {}
        Err(err) => {
            let error_output = ErrorOutput::from_shortcut_error(&err);
            write_error(&error_output, cli.output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}
