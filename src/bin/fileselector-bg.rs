use std::io::{self, IsTerminal};

use color_eyre::eyre::{bail, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    widgets::Block,
    DefaultTerminal,
};

fn main() -> Result<()> {
    color_eyre::install()?;
    if !io::stdout().is_terminal() {
        bail!("no terminal to paint: standard output is not a terminal");
    }
    let mut terminal: DefaultTerminal = ratatui::init();
    let result = run(&mut terminal);
    ratatui::restore();
    result
}

/// Paints the screen black until a close key arrives. Resizes come through
/// `event::read` and trigger a repaint.
fn run(terminal: &mut DefaultTerminal) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            frame.render_widget(
                Block::new().style(Style::new().bg(Color::Black)),
                frame.area(),
            )
        })?;
        if let Event::Key(key) = event::read()? {
            if closes(key) {
                return Ok(());
            }
        }
    }
}

fn closes(KeyEvent { code, modifiers, kind, .. }: KeyEvent) -> bool {
    kind == KeyEventKind::Press
        && match code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        }
}
