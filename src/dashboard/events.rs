use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, Panel};

pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
        }
        KeyCode::Right | KeyCode::Tab => {
            app.next_panel();
        }
        KeyCode::Left | KeyCode::BackTab => {
            app.previous_panel();
        }
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(panel) = Panel::from_digit(c) {
                app.select_panel(panel);
            }
        }
        KeyCode::Up => {
            app.scroll_correlation_up();
        }
        KeyCode::Down => {
            app.scroll_correlation_down();
        }
        KeyCode::Char('[') => {
            app.scroll_correlation_left();
        }
        KeyCode::Char(']') => {
            app.scroll_correlation_right();
        }
        KeyCode::Char('s') => {
            app.toggle_sidebar();
        }
        KeyCode::Char('?') | KeyCode::Char('h') => {
            app.toggle_help();
        }
        _ => {}
    }
}
