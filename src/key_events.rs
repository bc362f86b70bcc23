use std::{io, time::Duration};

use crate::{navigator::Motion, ui::FileSelector};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Drains every pending event without blocking. Stops early once the picker
/// has an outcome so nothing after the deciding key is processed.
pub fn handle_events(file: &mut FileSelector) -> io::Result<()> {
    while file.outcome.is_none() && event::poll(Duration::ZERO)? {
        handle_event(file, event::read()?);
    }
    Ok(())
}

pub fn handle_event(file: &mut FileSelector, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(file, key),
        Event::Resize(_, height) => file.resize(height),
        _ => {}
    }
}

fn handle_key(file: &mut FileSelector, KeyEvent { code, modifiers, .. }: KeyEvent) {
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => file.cancel(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => file.cancel(),
        KeyCode::Char('h') | KeyCode::Char('H') => file.toggle_hidden(),
        KeyCode::Char('f') | KeyCode::Char('F') => file.toggle_filter(),
        KeyCode::Up if shift => file.navigate(Motion::PageUp),
        KeyCode::Down if shift => file.navigate(Motion::PageDown),
        KeyCode::Up => file.navigate(Motion::Up),
        KeyCode::Down => file.navigate(Motion::Down),
        KeyCode::PageUp => file.navigate(Motion::PageUp),
        KeyCode::PageDown => file.navigate(Motion::PageDown),
        KeyCode::Enter => file.enter(),
        KeyCode::Backspace => file.parent(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::Config, explorer::FilterSet, ui::Outcome};
    use std::fs::File;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn shifted(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::SHIFT))
    }

    fn with_files(count: usize) -> (tempfile::TempDir, FileSelector) {
        let root = tempfile::tempdir().unwrap();
        for i in 0..count {
            File::create(root.path().join(format!("file{i}"))).unwrap();
        }
        let mut file = FileSelector::new(Config {
            start_dir: root.path().to_path_buf(),
            filters: FilterSet::default(),
            row_height: 1,
        })
        .unwrap();
        file.resize(8);
        (root, file)
    }

    #[test]
    fn arrows_and_paging_move_the_selection() {
        let (_root, mut file) = with_files(30);
        handle_event(&mut file, press(KeyCode::Down));
        assert_eq!(file.viewport.selected(), 1);
        handle_event(&mut file, shifted(KeyCode::Down));
        assert_eq!(file.viewport.selected(), 11);
        handle_event(&mut file, press(KeyCode::PageDown));
        assert_eq!(file.viewport.selected(), 21);
        handle_event(&mut file, press(KeyCode::PageUp));
        assert_eq!(file.viewport.selected(), 11);
        handle_event(&mut file, shifted(KeyCode::Up));
        assert_eq!(file.viewport.selected(), 1);
        handle_event(&mut file, press(KeyCode::Up));
        assert_eq!(file.viewport.selected(), 0);
    }

    #[test]
    fn enter_on_a_file_finishes_with_its_path() {
        let (root, mut file) = with_files(3);
        handle_event(&mut file, press(KeyCode::Down));
        handle_event(&mut file, press(KeyCode::Enter));
        assert_eq!(
            file.outcome,
            Some(Outcome::Selected(root.path().join("file1")))
        );
    }

    #[test]
    fn quit_keys_cancel() {
        for event in [
            press(KeyCode::Char('q')),
            press(KeyCode::Esc),
            Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        ] {
            let (_root, mut file) = with_files(1);
            handle_event(&mut file, event);
            assert_eq!(file.outcome, Some(Outcome::Cancelled));
        }
    }

    #[test]
    fn releases_are_ignored() {
        let (_root, mut file) = with_files(3);
        let mut release = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        handle_event(&mut file, Event::Key(release));
        assert_eq!(file.viewport.selected(), 0);
    }

    #[test]
    fn resize_updates_row_count() {
        let (_root, mut file) = with_files(20);
        for _ in 0..7 {
            handle_event(&mut file, press(KeyCode::Down));
        }
        assert_eq!(file.viewport.offset(), 8);
        handle_event(&mut file, Event::Resize(80, 4));
        assert_eq!(file.display.visible_rows(), 4);
        assert_eq!(file.viewport.offset(), 4);
        assert_eq!(file.viewport.selected(), 7);
    }

    #[test]
    fn hidden_toggle_key_reveals_dotfiles() {
        let (root, mut file) = with_files(1);
        File::create(root.path().join(".dot")).unwrap();
        handle_event(&mut file, press(KeyCode::Char('h')));
        assert_eq!(file.entries.len(), 2);
        handle_event(&mut file, press(KeyCode::Char('h')));
        assert_eq!(file.entries.len(), 1);
    }
}
