// Screen Tests - Testing screen state structs and the delete gate

use crate::tui::screens::*;
use crate::tui::types::{DetailTab, InfoField};

#[test]
fn test_property_grid_navigation() {
    let mut screen = PropertyGridScreen::new();
    assert_eq!(screen.selected_index, 0);

    screen.next(3);
    screen.next(3);
    assert_eq!(screen.selected_index, 2);
    screen.next(3);
    assert_eq!(screen.selected_index, 0, "Should wrap to beginning");
    screen.previous(3);
    assert_eq!(screen.selected_index, 2, "Should wrap to end");

    screen.next(0);
    assert_eq!(screen.selected_index, 2, "Should not change with empty list");
}

#[test]
fn test_property_grid_clamp() {
    let mut screen = PropertyGridScreen::new();
    screen.selected_index = 4;

    screen.clamp(2);
    assert_eq!(screen.selected_index, 1);
    screen.clamp(0);
    assert_eq!(screen.selected_index, 0);
}

#[test]
fn test_property_grid_status() {
    let mut screen = PropertyGridScreen::new();
    screen.set_status("Deleted".to_string());
    assert_eq!(screen.status_message.as_deref(), Some("Deleted"));
    screen.clear_status();
    assert!(screen.status_message.is_none());
}

#[test]
fn test_add_property_form_typing_and_focus() {
    let mut form = AddPropertyScreen::new();
    assert_eq!(form.focus, FormField::Name);

    for c in "Oak".chars() {
        form.add_char(c);
    }
    form.next_field();
    for c in "1 Main".chars() {
        form.add_char(c);
    }
    form.backspace();

    assert_eq!(form.name, "Oak");
    assert_eq!(form.address, "1 Mai");
    assert_eq!(form.focus, FormField::Address);

    form.previous_field();
    form.previous_field();
    assert_eq!(form.focus, FormField::Photo, "Focus wraps backwards");
}

#[test]
fn test_add_property_form_to_input() {
    let mut form = AddPropertyScreen::new();
    form.name = "Oak Villa".to_string();
    form.address = "1 Main St".to_string();
    form.phone = "+15551234567".to_string();

    let input = form.to_input();
    assert_eq!(input.name, "Oak Villa");
    assert_eq!(input.address, "1 Main St");
    assert_eq!(input.phone, "+15551234567");
    assert!(input.photo.is_empty());
}

#[test]
fn test_typing_clears_form_error() {
    let mut form = AddPropertyScreen::new();
    form.error = Some("name is required".to_string());
    form.add_char('x');
    assert!(form.error.is_none());
}

#[test]
fn test_delete_gate_starts_closed() {
    let gate = DeleteGate::new();
    assert!(!gate.is_open());
    assert!(!gate.can_confirm());
    assert!(gate.pending().is_none());
}

#[test]
fn test_delete_gate_requires_acknowledgment() {
    let mut gate = DeleteGate::new();
    gate.request("prop-001");

    assert!(gate.is_open());
    assert!(!gate.can_confirm());
    assert_eq!(gate.confirm(), None, "Confirm is disabled until acknowledged");
    assert!(gate.is_open(), "A refused confirm keeps the popup open");

    gate.toggle_ack();
    assert!(gate.can_confirm());
    assert_eq!(gate.confirm(), Some("prop-001".to_string()));
    assert!(!gate.is_open());
    assert!(!gate.is_acknowledged());
}

#[test]
fn test_delete_gate_ack_resets_for_new_target() {
    let mut gate = DeleteGate::new();
    gate.request("prop-001");
    gate.toggle_ack();

    gate.request("prop-002");

    assert_eq!(gate.pending(), Some("prop-002"));
    assert!(!gate.is_acknowledged(), "A stale acknowledgment must not carry over");
}

#[test]
fn test_delete_gate_same_target_keeps_ack() {
    let mut gate = DeleteGate::new();
    gate.request("prop-001");
    gate.toggle_ack();
    gate.request("prop-001");
    assert!(gate.can_confirm());
}

#[test]
fn test_delete_gate_cancel() {
    let mut gate = DeleteGate::new();
    gate.request("prop-001");
    gate.toggle_ack();

    gate.cancel();

    assert!(!gate.is_open());
    assert!(!gate.is_acknowledged());
    assert_eq!(gate.confirm(), None);
}

#[test]
fn test_delete_gate_toggle_while_closed() {
    let mut gate = DeleteGate::new();
    gate.toggle_ack();
    assert!(!gate.is_acknowledged());
}

#[test]
fn test_detail_screen_defaults() {
    let screen = DetailScreen::new();
    assert_eq!(screen.tab, DetailTab::TextHistory);
    assert!(!screen.is_editing());
    assert_eq!(screen.selected_field(), InfoField::all()[0]);
}

#[test]
fn test_detail_screen_info_cursor_wraps() {
    let mut screen = DetailScreen::new();
    screen.previous_field();
    assert_eq!(screen.info_cursor, InfoField::all().len() - 1);
    screen.next_field();
    assert_eq!(screen.info_cursor, 0);
}
