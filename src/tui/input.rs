//! Input handling for the picker.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, AppMode};

/// Handle a terminal event.
///
/// `page_rows` is the height of the choice list, used by PageUp/PageDown.
/// Returns `true` if the picker should close.
pub fn handle_event(app: &mut App, event: Event, page_rows: usize) -> bool {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key, page_rows),
        _ => false,
    }
}

/// Handle a key event.
///
/// Returns true if the picker should close.
fn handle_key(app: &mut App, key: KeyEvent, page_rows: usize) -> bool {
    // Ctrl+C cancels from every mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return true;
    }

    match app.mode().clone() {
        AppMode::Normal => handle_normal_mode(app, key, page_rows),
        AppMode::Filter => handle_filter_mode(app, key, page_rows),
        AppMode::Help => app.set_mode(AppMode::Normal),
    }

    app.should_quit()
}

/// Handle keys in normal mode.
///
/// - ↑/k, ↓/j: move
/// - PageUp/PageDown: move by a page
/// - Home/g, End/G: first/last
/// - Enter: choose selected
/// - 1-9: choose numbered
/// - /: filter
/// - ?: help
/// - q/Esc: cancel
fn handle_normal_mode(app: &mut App, key: KeyEvent, page_rows: usize) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::PageUp => app.page_up(page_rows),
        KeyCode::PageDown => app.page_down(page_rows),
        KeyCode::Home | KeyCode::Char('g') => app.move_to_first(),
        KeyCode::End | KeyCode::Char('G') => app.move_to_last(),

        KeyCode::Enter => app.choose_selected(),

        KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
            if let Some(num) = c.to_digit(10) {
                app.choose_numbered(num as usize);
            }
        }

        KeyCode::Char('/') => app.set_mode(AppMode::Filter),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        _ => {}
    }
}

/// Handle keys in filter mode.
///
/// - Printable characters: append to filter
/// - Backspace: remove last character, leaving filter mode when empty
/// - Esc: clear filter and leave filter mode
/// - Enter: choose selected
/// - Arrow keys still navigate
fn handle_filter_mode(app: &mut App, key: KeyEvent, page_rows: usize) {
    match key.code {
        KeyCode::Esc => {
            app.clear_filter();
            app.set_mode(AppMode::Normal);
        }

        KeyCode::Enter => app.choose_selected(),

        KeyCode::Backspace => {
            if app.filter_text().is_empty() {
                app.set_mode(AppMode::Normal);
            } else {
                app.pop_filter_char();
            }
        }

        KeyCode::Up => app.move_up(),
        KeyCode::Down => app.move_down(),
        KeyCode::PageUp => app.page_up(page_rows),
        KeyCode::PageDown => app.page_down(page_rows),

        KeyCode::Char(c) => app.push_filter_char(c),

        _ => {}
    }
}
