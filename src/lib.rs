//! PropAI - property management dashboard
//!
//! This library provides the client-side state model for the PropAI dashboard:
//! the property list and its persistence, per-property conversation state, and
//! the HTTP client for the classification backend. The `tui` module renders it
//! in the terminal.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod chat;
pub mod config;
pub mod conversation;
pub mod storage;
pub mod store;
pub mod tui;


use std::path::Path;

/// Result type alias for PropAI operations
pub type Result<T> = std::result::Result<T, Error>;

/// A locally detected problem with user input. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was empty or whitespace
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Context lacks one of tenant_name, unit, address
    #[error("Invalid context: tenant_name, unit, and address are required")]
    IncompleteContext,

    /// Classify was requested with nothing queued or typed
    #[error("Add at least one tenant message before classifying")]
    NoMessages,

    /// Chat send with neither text nor attachment
    #[error("Please enter a message or select a file")]
    NothingToSend,

    /// No property is selected
    #[error("No property selected")]
    NoSelection,
}

/// Error types for PropAI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A request of the same kind is already in flight for this conversation
    #[error("A request is already in progress")]
    Busy,

    /// Referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network-level failure (connect, timeout, malformed body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status
    #[error("HTTP {status}: {detail}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Backend-provided detail, or the raw body
        detail: String,
    },

    /// Storage operation error
    #[error("Storage error: {0}")]
    Storage(String),

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Initialize logging to a file
///
/// The terminal belongs to the UI, so log lines go to `path` instead of stdout.
/// The filter defaults to `info` and honours `RUST_LOG`.
pub fn init_logging<P: AsRef<Path>>(path: P) -> Result<()> {
    use tracing_subscriber::{filter::LevelFilter, EnvFilter};

    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| Error::Storage(format!("Failed to install log subscriber: {}", e)))?;

    Ok(())
}
