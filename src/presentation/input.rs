use crate::application::{App, AppMode, Focus};
use crate::infrastructure::SummaryClipboard;
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;

pub struct InputHandler;

impl InputHandler {
    /// Keys that end the program regardless of mode.
    pub fn is_quit(key: KeyCode, modifiers: KeyModifiers) -> bool {
        modifiers.contains(KeyModifiers::CONTROL) && matches!(key, KeyCode::Char('c') | KeyCode::Char('q'))
    }

    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::Form if app.show_summary => Self::handle_summary_panel(app, key),
            AppMode::Form => Self::handle_form_mode(app, key, modifiers),
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('s') = key {
                app.submit();
            }
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::F(1) => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
                return;
            }
            KeyCode::Tab | KeyCode::Down => {
                app.focus_next();
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus_previous();
                return;
            }
            _ => {}
        }

        match app.focus {
            Focus::Text(_) => Self::handle_text_input(app, key),
            Focus::Position => match key {
                KeyCode::Left => {
                    let position = app.form.position.previous();
                    app.select_position(position);
                }
                KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter => {
                    let position = app.form.position.next();
                    app.select_position(position);
                }
                _ => {}
            },
            Focus::Skill(skill) => {
                if matches!(key, KeyCode::Char(' ') | KeyCode::Enter) {
                    app.toggle_skill(skill);
                }
            }
            Focus::OtherSkillToggle => {
                if matches!(key, KeyCode::Char(' ') | KeyCode::Enter) {
                    app.toggle_other_skill();
                }
            }
            Focus::Submit => {
                if matches!(key, KeyCode::Char(' ') | KeyCode::Enter) {
                    app.submit();
                }
            }
        }
    }

    fn handle_text_input(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.focus_next(),
            KeyCode::Backspace => app.delete_backward(),
            KeyCode::Delete => app.delete_forward(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_summary_panel(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter => app.dismiss_summary(),
            KeyCode::Char('y') => {
                let result = match app.submitted.as_ref() {
                    Some(snapshot) => SummaryClipboard::copy(snapshot).map_err(|e| e.to_string()),
                    None => Err("nothing to copy".to_string()),
                };
                if let Err(ref error) = result {
                    warn!(%error, "summary copy failed");
                }
                app.set_copy_result(result);
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                app.mode = AppMode::Form;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}
