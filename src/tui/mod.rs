//! Terminal frontend (ratatui + crossterm).
//!
//! Owns the terminal and the text field, turns terminal events into [`AppEvent`]s and
//! redraws after every event. Splash timer events and terminal input are multiplexed
//! on the same task.

mod input;
mod ui;

pub use input::{map_key, KeyAction, Mode};
pub use ui::preview_lines;

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, style::Style, widgets::Block, Terminal};
use tokio::sync::mpsc;
use tui_textarea::TextArea;

use crate::app::{App, AppEvent};
use crate::config::Config;
use crate::platform::DesktopPlatform;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .context("Failed to setup terminal")?;

        let terminal =
            Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;
        Ok(Self { terminal, restored: false })
    }

    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)
            .context("Failed to restore terminal")?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::error!(error = ?e, "Failed to restore terminal");
        }
    }
}

fn text_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_block(Block::bordered().title(" Text or link "));
    input.set_placeholder_text("Enter any text or link");
    input.set_cursor_line_style(Style::default());
    input
}

fn mode(app: &App<DesktopPlatform>) -> Mode {
    match app.main() {
        None => Mode::Splash,
        Some(main) if main.awaiting_permission() => Mode::PermissionPrompt,
        Some(main) if main.dialog().is_some() => Mode::Dialog,
        Some(_) => Mode::Editing,
    }
}

fn handle_terminal_event(event: Event, app: &mut App<DesktopPlatform>, input: &mut TextArea) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match map_key(mode(app), key) {
            KeyAction::Event(event) => app.handle(event),
            KeyAction::Generate => app.handle(AppEvent::Generate(input.lines().join("\n"))),
            KeyAction::Edit(key) => {
                input.input(key);
            }
            KeyAction::Ignore => {}
        },
        Event::Paste(text) if mode(app) == Mode::Editing => {
            input.insert_str(text);
        }
        _ => {}
    }
}

/// Runs the application until the user quits.
pub async fn run(config: Config, platform: DesktopPlatform) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::from_config(&config, platform, tx).context("Invalid encoder settings")?;

    let mut tui = Tui::new()?;
    let mut input = text_input();
    let mut terminal_events = EventStream::new();

    while app.is_running() {
        tui.terminal.draw(|frame| ui::draw(frame, &app, &input))?;

        tokio::select! {
            Some(event) = rx.recv() => app.handle(event),
            event = terminal_events.next() => match event {
                Some(Ok(event)) => handle_terminal_event(event, &mut app, &mut input),
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => break,
            },
        }
    }

    tracing::info!("Shutting down");
    tui.restore()
}
