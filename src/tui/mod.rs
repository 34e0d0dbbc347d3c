//! TUI (Terminal User Interface) module
//!
//! All TUI logic lives here, separate from the binary, so screens and key
//! handling can be driven from tests.

pub mod app;
pub mod clipboard;
pub mod input;
pub mod screens;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use input::handle_key;
pub use screens::*;
pub use types::{DetailTab, InfoField, Screen};
