//! Key event dispatch
//!
//! Every key press lands here and is turned into one `App` call.

use crate::tui::app::App;
use crate::tui::types::{DetailTab, Screen};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle one key press
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Delete popup captures all input while open
    if app.delete_gate.is_open() {
        handle_delete_popup(app, key);
        return;
    }

    match app.current_screen {
        Screen::PropertyGrid => handle_grid(app, key),
        Screen::AddProperty => handle_add_property(app, key),
        Screen::PropertyDetail => handle_detail(app, key),
    }
}

fn handle_delete_popup(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('a') => app.toggle_delete_ack(),
        KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
}

fn handle_grid(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => {
            app.grid.clear_status();
            app.next_property();
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => {
            app.grid.clear_status();
            app.previous_property();
        }
        KeyCode::Enter => app.open_selected_property(),
        KeyCode::Char('a') => app.show_add_property(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        _ => {}
    }
}

fn handle_add_property(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_add_property(),
        KeyCode::Enter => app.submit_add_property(),
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = &mut app.add_property_screen {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = &mut app.add_property_screen {
                form.previous_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = &mut app.add_property_screen {
                form.backspace();
            }
        }
        KeyCode::Char(c) if !c.is_control() => {
            if let Some(form) = &mut app.add_property_screen {
                form.add_char(c);
            }
        }
        _ => {}
    }
}

fn handle_detail(app: &mut App, key: KeyEvent) {
    let Some(tab) = app.current_tab() else {
        return;
    };

    // Inline info edit owns the keyboard until committed or cancelled
    if app.detail_screen.as_ref().is_some_and(|d| d.is_editing()) {
        handle_info_edit(app, key);
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.back_to_grid();
            return;
        }
        KeyCode::Tab => {
            app.next_tab();
            return;
        }
        KeyCode::BackTab => {
            app.previous_tab();
            return;
        }
        KeyCode::F(5) => {
            app.refresh_histories();
            return;
        }
        _ => {}
    }

    if tab.takes_text() {
        handle_text_tab(app, tab, key);
        return;
    }

    match key.code {
        KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_tab(),
        KeyCode::Char('r') => app.refresh_histories(),
        KeyCode::Char('q') | KeyCode::Char('b') => app.back_to_grid(),
        KeyCode::Down | KeyCode::Char('j') if tab == DetailTab::ImportantInfo => {
            if let Some(detail) = &mut app.detail_screen {
                detail.next_field();
            }
        }
        KeyCode::Up | KeyCode::Char('k') if tab == DetailTab::ImportantInfo => {
            if let Some(detail) = &mut app.detail_screen {
                detail.previous_field();
            }
        }
        KeyCode::Enter | KeyCode::Char('e') if tab == DetailTab::ImportantInfo => {
            app.begin_info_edit();
        }
        _ => {}
    }
}

fn handle_text_tab(app: &mut App, tab: DetailTab, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match (tab, key.code) {
        (DetailTab::Classify, KeyCode::Char('s')) if ctrl => app.classify(),
        (DetailTab::Classify, KeyCode::Char('y')) if ctrl => app.copy_reply(),
        (DetailTab::Classify, KeyCode::Enter) => app.queue_draft(),
        (DetailTab::Classify, KeyCode::Up) => app.move_pending_cursor(false),
        (DetailTab::Classify, KeyCode::Down) => app.move_pending_cursor(true),
        (DetailTab::Classify, KeyCode::Delete) => app.remove_highlighted_pending(),
        (DetailTab::AiChat, KeyCode::Enter) => app.send_chat(),
        (_, KeyCode::Right) => app.next_tab(),
        (_, KeyCode::Left) => app.previous_tab(),
        (_, KeyCode::Backspace) => {
            if let Some(conv) = app.store.active_conversation_mut() {
                match tab {
                    DetailTab::AiChat => conv.chat.backspace(),
                    _ => conv.backspace(),
                }
            }
        }
        (_, KeyCode::Char(c)) if !ctrl && !c.is_control() => {
            if let Some(conv) = app.store.active_conversation_mut() {
                match tab {
                    DetailTab::AiChat => conv.chat.add_char(c),
                    _ => conv.add_char(c),
                }
            }
        }
        _ => {}
    }
}

fn handle_info_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_info_edit(),
        KeyCode::Enter => app.commit_info_edit(),
        KeyCode::Backspace => {
            if let Some((_, buffer)) = app.detail_screen.as_mut().and_then(|d| d.editing.as_mut()) {
                buffer.pop();
            }
        }
        KeyCode::Char(c) if !c.is_control() => {
            if let Some((_, buffer)) = app.detail_screen.as_mut().and_then(|d| d.editing.as_mut()) {
                buffer.push(c);
            }
        }
        _ => {}
    }
}
