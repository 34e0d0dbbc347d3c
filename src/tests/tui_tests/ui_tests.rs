// UI Tests - Rendering every screen into a test backend

use super::helpers::{create_test_app, type_text};
use crate::tests::support::MockBackend;
use crate::tui::types::DetailTab;
use crate::tui::{ui::ui, App};
use ratatui::{backend::TestBackend, Terminal};
use std::time::Duration;

/// Render one frame and return the screen as text, one line per row
fn render(app: &App) -> String {
    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).expect("Failed to create terminal");
    terminal.draw(|f| ui(f, app)).expect("Failed to draw");

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer.get(x, y).symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_render_property_grid() {
    let backend = MockBackend::start();
    let (app, _dir) = create_test_app(&backend);

    let screen = render(&app);

    assert!(screen.contains("PropAI Properties (2)"));
    assert!(screen.contains("Maple Court"));
    assert!(screen.contains("Pine Ridge"));
}

#[test]
fn test_render_empty_grid() {
    let backend = MockBackend::start();
    let (mut app, _dir) = create_test_app(&backend);
    for _ in 0..2 {
        app.request_delete();
        app.toggle_delete_ack();
        app.confirm_delete();
    }

    let screen = render(&app);

    assert!(screen.contains("No properties yet"));
}

#[test]
fn test_render_add_property_with_error() {
    let backend = MockBackend::start();
    let (mut app, _dir) = create_test_app(&backend);
    app.show_add_property();
    type_text(&mut app, "Oak Villa");
    app.submit_add_property();

    let screen = render(&app);

    assert!(screen.contains("Add Property"));
    assert!(screen.contains("Oak Villa"));
    assert!(screen.contains("address is required"));
}

#[test]
fn test_render_every_detail_tab() {
    let backend = MockBackend::start();
    let (mut app, _dir) = create_test_app(&backend);
    app.open_selected_property();
    app.wait_for_jobs(Duration::from_secs(5));

    for tab in DetailTab::all() {
        app.detail_screen.as_mut().unwrap().tab = tab;
        let screen = render(&app);
        assert!(screen.contains(tab.label()), "{:?} tab label missing", tab);
        assert!(screen.contains("John Doe"), "{:?} header missing", tab);
    }
}

#[test]
fn test_render_classify_pending_queue() {
    let backend = MockBackend::start();
    let (mut app, _dir) = create_test_app(&backend);
    app.open_selected_property();
    app.detail_screen.as_mut().unwrap().tab = DetailTab::Classify;
    app.store.queue_message("Sink is leaking");

    let screen = render(&app);

    assert!(screen.contains("Sink is leaking"));
    assert!(screen.contains("Queued"));
}

#[test]
fn test_render_important_info() {
    let backend = MockBackend::start();
    let (mut app, _dir) = create_test_app(&backend);
    app.open_selected_property();
    app.detail_screen.as_mut().unwrap().tab = DetailTab::ImportantInfo;

    let screen = render(&app);

    assert!(screen.contains("123 Maple St"));
    assert!(screen.contains("+1-555-0100"));
}

#[test]
fn test_render_delete_popup() {
    let backend = MockBackend::start();
    let (mut app, _dir) = create_test_app(&backend);
    app.request_delete();

    let screen = render(&app);
    assert!(screen.contains("Delete Property"));
    assert!(screen.contains("[ ]"));

    app.toggle_delete_ack();
    let screen = render(&app);
    assert!(screen.contains("[x]"));
}
