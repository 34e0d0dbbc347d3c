//! UI rendering module - screen-specific rendering functions
//!
//! Each screen has its own file. The delete popup draws over whatever screen
//! is showing.

mod add_property;
mod delete_confirm;
mod helpers;
mod property_detail;
mod property_grid;

use crate::tui::app::App;
use crate::tui::types::Screen;
use ratatui::Frame;

pub use add_property::render_add_property;
pub use delete_confirm::render_delete_confirmation;
pub use helpers::{centered_rect, format_timestamp, help_bar, priority_color};
pub use property_detail::render_property_detail;
pub use property_grid::render_property_grid;

/// Main UI rendering function - dispatches to screen-specific render functions
pub fn ui(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::PropertyGrid => render_property_grid(f, app),
        Screen::AddProperty => render_add_property(f, app),
        Screen::PropertyDetail => render_property_detail(f, app),
    }

    if app.delete_gate.is_open() {
        render_delete_confirmation(f, app);
    }
}
