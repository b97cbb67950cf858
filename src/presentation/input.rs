use crate::application::{App, AppMode, Screen};
use crate::presentation::ui::help_line_count;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => app.move_cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => app.move_cursor_down(),
            KeyCode::Char(' ') => app.select_highlighted(),
            KeyCode::Enter => {
                // Quantity buttons advance on their own; elsewhere Enter is "Next"
                if app.screen() == Screen::Start {
                    app.select_highlighted();
                } else {
                    app.next();
                }
            }
            KeyCode::Right | KeyCode::Char('n') => app.next(),
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('b') => app.back(),
            KeyCode::Esc | KeyCode::Char('c') => app.cancel(),
            KeyCode::Char('s') => app.send_order(),
            KeyCode::F(1) | KeyCode::Char('?') => app.show_help(),
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        let max_scroll = help_line_count().saturating_sub(1);
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll = (app.help_scroll + 1).min(max_scroll);
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll = (app.help_scroll + 5).min(max_scroll);
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
