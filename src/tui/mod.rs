mod app;
mod event;
mod view;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;

use crate::client::TaskApi;
pub use app::{App, FormField, Mode, TaskForm};
use event::KeyAction;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the interactive client against `api` until the user quits.
pub fn run(api: &impl TaskApi) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, api);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, api: &impl TaskApi) -> Result<()> {
    let mut app = App::new();
    terminal.draw(|frame| view::render(frame, &mut app))?;
    app.load(api);

    loop {
        terminal.draw(|frame| view::render(frame, &mut app))?;

        if !ct_event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = ct_event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match event::handle_key(&mut app, key) {
                KeyAction::Quit => return Ok(()),
                KeyAction::Submit => app.submit(api),
                KeyAction::Toggle => app.toggle_selected(api),
                KeyAction::Delete => app.delete_selected(api),
                KeyAction::Refresh => app.load(api),
                KeyAction::Continue => {}
            }
        }
    }
}
