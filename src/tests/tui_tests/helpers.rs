//! Shared test helpers for TUI tests

use crate::tests::support::{demo_store, MockBackend};
use crate::tui::App;
use tempfile::TempDir;

/// Helper to create an App over the demo portfolio, talking to `backend`
/// Returns (App, TempDir) - the TempDir must be kept alive for the test duration
pub fn create_test_app(backend: &MockBackend) -> (App, TempDir) {
    let (store, temp_dir) = demo_store();
    let app = App::with_store(store, backend.client()).expect("Failed to create app");
    (app, temp_dir)
}

/// Type `text` into whatever input has focus
pub fn type_text(app: &mut App, text: &str) {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    for c in text.chars() {
        crate::tui::handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
}
