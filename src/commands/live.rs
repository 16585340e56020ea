/// `live` command: interactive viewer driven by held modifiers and typing.
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, info, warn};

use crate::cli::args::LiveArgs;
use crate::keyboard::TerminalKeyboard;
use crate::keyboard::terminal::KeyTransition;
use crate::session::Session;
use crate::settings::SettingsStore;
use crate::shortcuts::{LoadOptions, ShortcutError};

const TICK_RATE: Duration = Duration::from_millis(100);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Which input field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Path,
    Search,
}

/// Screen state around a [`Session`].
struct LiveApp {
    session: Session,
    keyboard: TerminalKeyboard,
    path_input: String,
    focus: Field,
    scroll: u16,
    should_quit: bool,
}

impl LiveApp {
    fn new(session: Session, path: Option<&Path>) -> Self {
        let path_input = path.map(|p| p.display().to_string()).unwrap_or_default();
        let focus = if path_input.is_empty() {
            Field::Path
        } else {
            Field::Search
        };
        Self {
            session,
            keyboard: TerminalKeyboard::new(),
            path_input,
            focus,
            scroll: 0,
            should_quit: false,
        }
    }

    /// Load the path field; remembers it when it loads.
    fn load(&mut self, store: &mut SettingsStore) -> bool {
        let loaded = self.session.load(&self.path_input);
        if loaded {
            store.remember(Path::new(self.path_input.trim()));
            self.scroll = 0;
        }
        loaded
    }

    fn handle_key(&mut self, key: KeyEvent, store: &mut SettingsStore) {
        let transition = self.keyboard.observe(&key);

        if key.kind != KeyEventKind::Release {
            self.edit(key, store);
        }

        match transition {
            KeyTransition::Pressed => self.session.on_key_pressed(&self.keyboard),
            KeyTransition::Released(modifier) => {
                self.session.on_key_released(modifier, &self.keyboard);
            }
        }
    }

    fn edit(&mut self, key: KeyEvent, store: &mut SettingsStore) {
        let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.session.search_term().is_empty() {
                    self.should_quit = true;
                } else {
                    self.session.clear_search();
                    self.scroll = 0;
                }
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Field::Path => Field::Search,
                    Field::Search => Field::Path,
                };
            }
            KeyCode::F(5) => {
                self.load(store);
            }
            KeyCode::Enter if self.focus == Field::Path => {
                if self.load(store) {
                    self.focus = Field::Search;
                }
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Home => self.scroll = 0,
            KeyCode::Backspace => match self.focus {
                Field::Path => {
                    self.path_input.pop();
                }
                Field::Search => {
                    self.session.pop_search_char();
                    self.scroll = 0;
                }
            },
            KeyCode::Char(c) if !chord => match self.focus {
                Field::Path => self.path_input.push(c),
                Field::Search => {
                    self.session.push_search_char(c);
                    self.scroll = 0;
                }
            },
            _ => {}
        }
    }

    /// Modifier state is unknown once the terminal loses focus.
    fn focus_lost(&mut self) {
        self.keyboard.reset();
        self.session.on_key_pressed(&self.keyboard);
    }
}

/// Run `accelview live`.
///
/// # Errors
///
/// Returns `ShortcutError::Terminal` if the terminal cannot be set up, drawn
/// or restored. Load failures are shown in the status line instead.
pub fn run(args: &LiveArgs, store: &mut SettingsStore) -> Result<(), ShortcutError> {
    let initial = args
        .path
        .clone()
        .or_else(|| store.last_file().map(Path::to_path_buf));
    let session = Session::new(LoadOptions::from(&args.source));
    let mut app = LiveApp::new(session, initial.as_deref());
    if !app.path_input.is_empty() {
        app.load(store);
    }
    if let Some(term) = &args.search {
        app.session.set_search(term);
    }

    let (mut terminal, enhanced) = match setup_terminal() {
        Ok(ready) => ready,
        Err(err) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen);
            return Err(terminal_error(err));
        }
    };
    if enhanced {
        app.keyboard = TerminalKeyboard::enhanced();
    }
    info!(enhanced, "live session started");

    let result = event_loop(&mut terminal, &mut app, store);
    let restored = restore_terminal(&mut terminal, enhanced);

    if let Err(err) = store.save() {
        warn!("could not save settings on exit: {err:#}");
    }

    result.map_err(terminal_error)?;
    restored.map_err(terminal_error)
}

fn terminal_error(err: anyhow::Error) -> ShortcutError {
    ShortcutError::Terminal(format!("{err:#}"))
}

fn setup_terminal() -> anyhow::Result<(Term, bool)> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange, SetTitle("accelview"))
        .context("entering alternate screen")?;

    // Without the enhancement protocol, modifiers are only seen alongside other keys.
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )
        .context("enabling keyboard enhancement")?;
    } else {
        debug!("keyboard enhancement unsupported; falling back to modifier flags");
    }

    let terminal = Terminal::new(CrosstermBackend::new(stdout)).context("creating terminal")?;
    Ok((terminal, enhanced))
}

fn restore_terminal(terminal: &mut Term, enhanced: bool) -> anyhow::Result<()> {
    // Every step runs even if an earlier one fails.
    let popped = if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)
            .context("disabling keyboard enhancement")
    } else {
        Ok(())
    };
    let raw = disable_raw_mode().context("disabling raw mode");
    let screen = execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)
        .context("leaving alternate screen");
    let cursor = terminal.show_cursor().context("showing cursor");
    popped.and(raw).and(screen).and(cursor)
}

fn event_loop(
    terminal: &mut Term,
    app: &mut LiveApp,
    store: &mut SettingsStore,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app)).context("drawing")?;

        if event::poll(TICK_RATE).context("polling events")? {
            match event::read().context("reading event")? {
                Event::Key(key) => app.handle_key(key, store),
                Event::FocusLost => app.focus_lost(),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// -- Rendering --

fn render(frame: &mut Frame, app: &mut LiveApp) {
    let rows = Layout::vertical([
        Constraint::Length(3), // path
        Constraint::Length(3), // search
        Constraint::Min(3),    // results
        Constraint::Length(1), // status
        Constraint::Length(1), // hints
    ])
    .split(frame.area());

    render_input(frame, rows[0], " File ", &app.path_input, app.focus == Field::Path);
    render_input(
        frame,
        rows[1],
        " Search ",
        app.session.search_term(),
        app.focus == Field::Search,
    );
    render_results(frame, rows[2], app);

    let status = Paragraph::new(Span::styled(
        app.session.status().to_owned(),
        Style::default().fg(Color::Green),
    ));
    frame.render_widget(status, rows[3]);

    let hints = Line::from(vec![
        Span::styled("[Ctrl/Alt/Shift]", Style::default().fg(Color::Yellow)),
        Span::raw(" Filter "),
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Field "),
        Span::styled("[Enter/F5]", Style::default().fg(Color::Yellow)),
        Span::raw(" Load "),
        Span::styled("[↑↓]", Style::default().fg(Color::Yellow)),
        Span::raw(" Scroll "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Clear/Quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), rows[4]);
}

fn input_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, text: &str, focused: bool) {
    let block = input_block(title, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Keep the tail of long input visible.
    let width = usize::from(inner.width);
    let chars = text.chars().count();
    let skip = chars.saturating_sub(width.saturating_sub(1));
    let visible: String = text.chars().skip(skip).collect();
    let offset = u16::try_from(chars - skip).unwrap_or(u16::MAX);
    let cursor_x = inner.x.saturating_add(offset);
    frame.render_widget(
        Paragraph::new(Span::styled(visible, Style::default().fg(Color::White))),
        inner,
    );

    if focused && cursor_x < inner.x + inner.width {
        frame.set_cursor_position((cursor_x, inner.y));
    }
}

fn render_results(frame: &mut Frame, area: Rect, app: &mut LiveApp) {
    let filter = app.session.current_filter();
    let title = if filter.is_empty() {
        " Shortcuts ".to_owned()
    } else {
        format!(" Shortcuts [{}] ", filter.trim_end_matches(" + "))
    };
    let block = input_block(&title, false);
    let inner = block.inner(area);

    let total = app.session.displayed().lines().count();
    let max_scroll = total.saturating_sub(usize::from(inner.height));
    app.scroll = app.scroll.min(u16::try_from(max_scroll).unwrap_or(u16::MAX));

    let results = Paragraph::new(app.session.displayed().to_owned())
        .block(block)
        .scroll((app.scroll, 0));
    frame.render_widget(results, area);
}
