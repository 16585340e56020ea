/// Output formatting: JSON, table and plain modes, with TTY detection.
use std::io::IsTerminal;
use std::time::Instant;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;
use tracing::debug;

use super::args::OutputFormat;
use crate::types::{ConfigOutput, ErrorOutput, FilterResultOutput, ShortcutOutput};

/// The format actually used: `--json` wins, and `auto` becomes a table on a
/// terminal and JSON when piped.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    match (json_flag, fmt) {
        (true, _) => OutputFormat::Json,
        (false, OutputFormat::Auto) if std::io::stdout().is_terminal() => OutputFormat::Table,
        (false, OutputFormat::Auto) => OutputFormat::Json,
        (false, other) => other,
    }
}

/// How command results are rendered.
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
    /// When true, step timers report their elapsed time.
    pub debug: bool,
}

impl OutputCtx {
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, no_header: bool, debug: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            no_header,
            debug,
        }
    }

    /// Time a named step. Reported on drop, and only with `--debug`.
    #[must_use]
    pub fn timer(&self, step: &'static str) -> DebugTimer {
        DebugTimer {
            step,
            started: self.debug.then(Instant::now),
        }
    }

    /// Whether status lines belong on stderr (human formats only).
    fn wants_status(&self) -> bool {
        matches!(
            self.format,
            OutputFormat::Table | OutputFormat::Plain | OutputFormat::Auto
        )
    }
}

// --- Shortcut list output ---

/// Write a full shortcut list to stdout, and its status line to stderr.
pub fn write_shortcuts(items: &[ShortcutOutput], status: &str, ctx: &OutputCtx) {
    write_rows(items, items, ctx);
    if ctx.wants_status() {
        eprintln!("{status}");
    }
}

/// Write a filter or search result to stdout.
///
/// JSON formats carry the status inside the object; human formats print it
/// to stderr after the lines.
pub fn write_filter_result(result: &FilterResultOutput, ctx: &OutputCtx) {
    write_rows(result, &result.shortcuts, ctx);
    if ctx.wants_status() {
        eprintln!("{}", result.status);
    }
}

fn write_rows<T: Serialize + ?Sized>(document: &T, rows: &[ShortcutOutput], ctx: &OutputCtx) {
    print!("{}", render_rows(document, rows, ctx));
}

/// `document` is what JSON modes print; NDJSON and the human formats print
/// one entry per row instead.
fn render_rows<T: Serialize + ?Sized>(
    document: &T,
    rows: &[ShortcutOutput],
    ctx: &OutputCtx,
) -> String {
    match ctx.format {
        OutputFormat::Json => json_line(document, true),
        OutputFormat::Compact => json_line(document, false),
        OutputFormat::Ndjson => rows.iter().map(|row| json_line(row, false)).collect(),
        OutputFormat::Plain => rows.iter().map(|row| format!("{}\n", row.line)).collect(),
        OutputFormat::Table | OutputFormat::Auto => format!("{}\n", shortcut_table(rows, ctx)),
    }
}

fn shortcut_table(rows: &[ShortcutOutput], ctx: &OutputCtx) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["ACCELERATOR", "NAME", "COMMAND"]);
    }
    for row in rows {
        table.add_row([&row.accelerator, &row.name, &row.command]);
    }
    table
}

// --- Config ---

/// Write the settings summary to stdout.
pub fn write_config(config: &ConfigOutput, ctx: &OutputCtx) {
    print!("{}", render_config(config, ctx));
}

fn render_config(config: &ConfigOutput, ctx: &OutputCtx) -> String {
    match ctx.format {
        OutputFormat::Json | OutputFormat::Ndjson => json_line(config, true),
        OutputFormat::Compact => json_line(config, false),
        OutputFormat::Plain | OutputFormat::Table | OutputFormat::Auto => {
            let last = config
                .last_file_path
                .as_ref()
                .map_or_else(|| "(none)".to_owned(), |path| path.display().to_string());
            format!(
                "settings:  {}\nlast file: {last}\n",
                config.settings_path.display()
            )
        }
    }
}

// --- Errors ---

/// Report a failed command on stderr: the JSON envelope for the JSON
/// formats, `Error: <message>` otherwise.
pub fn write_error(err: &ErrorOutput, format: OutputFormat, json_flag: bool) {
    match resolve_format(format, json_flag) {
        OutputFormat::Json | OutputFormat::Compact | OutputFormat::Ndjson => {
            match serde_json::to_string_pretty(err) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("Error: {}", err.error.message),
            }
        }
        OutputFormat::Plain | OutputFormat::Table | OutputFormat::Auto => {
            eprintln!("Error: {}", err.error.message);
        }
    }
}

// --- Step timing ---

/// Logs how long a step took when dropped. Inert without `--debug`.
pub struct DebugTimer {
    step: &'static str,
    started: Option<Instant>,
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if let Some(started) = self.started {
            let ms = started.elapsed().as_secs_f64() * 1000.0;
            debug!(step = self.step, "{ms:.2}ms");
        }
    }
}

/// One JSON document followed by a newline. Serialization failures are
/// reported on stderr and produce no output.
fn json_line<T: Serialize + ?Sized>(value: &T, pretty: bool) -> String {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match encoded {
        Ok(json) => format!("{json}\n"),
        Err(err) => {
            eprintln!("JSON serialization error: {err}");
            String::new()
        }
    }
}
