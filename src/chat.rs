//! Free-form chat with the assistant
//!
//! Unlike classification there is no pending queue: a turn is either the typed
//! text, an attachment, or both. The transcript is session-only and never
//! reconciled against server history.

use crate::{Error, Result, ValidationError};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::Path;

/// Base-name length kept when shortening attachment names for display
pub const DISPLAY_NAME_BASE_LEN: usize = 12;

/// Broad kind of an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Any `image/*`
    Image,
    /// `application/pdf`
    Pdf,
    /// Anything else
    Other,
}

impl AttachmentKind {
    /// Classify a MIME type
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            Self::Image
        } else if mime == "application/pdf" {
            Self::Pdf
        } else {
            Self::Other
        }
    }
}

/// A file read into a self-contained data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name
    pub file_name: String,
    /// MIME type guessed from the extension
    pub mime: String,
    /// Kind derived from the MIME type
    pub kind: AttachmentKind,
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
}

impl Attachment {
    /// Encode in-memory bytes
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Self {
        let mime = mime_for(file_name).to_string();
        let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(bytes));
        Self {
            file_name: file_name.to_string(),
            kind: AttachmentKind::from_mime(&mime),
            mime,
            data_url,
        }
    }

    /// Read and encode a file from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| Error::Storage(format!("Failed to read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "attachment".to_string());
        tracing::info!("Attached {} ({} bytes)", file_name, bytes.len());
        Ok(Self::from_bytes(&file_name, &bytes))
    }

    /// File name shortened for a chip, extension preserved
    pub fn display_name(&self) -> String {
        truncate_name_preserving_ext(&self.file_name, DISPLAY_NAME_BASE_LEN)
    }
}

/// MIME type for a file name, by extension
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Shorten `name` to `max_base_len` base characters, keeping the extension
pub fn truncate_name_preserving_ext(name: &str, max_base_len: usize) -> String {
    let (base, ext) = match name.rfind('.') {
        Some(i) => name.split_at(i),
        None => (name, ""),
    };
    if base.chars().count() <= max_base_len {
        return name.to_string();
    }
    let kept: String = base.chars().take(max_base_len.saturating_sub(1)).collect();
    format!("{}…{}", kept, ext)
}

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// The property manager
    User,
    /// The assistant
    Assistant,
}

/// One transcript line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// Author
    pub role: ChatRole,
    /// Text
    pub content: String,
    /// Name of the attachment sent with this turn
    pub attachment: Option<String>,
}

/// A turn ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutgoingTurn {
    pub text: String,
    pub attachment: Option<Attachment>,
}

/// Chat state for one property
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    /// Text being typed
    pub input: String,
    /// Selected attachment
    pub attachment: Option<Attachment>,
    /// Session-only transcript
    pub transcript: Vec<TranscriptEntry>,
    /// Inline error
    pub error: Option<String>,
    /// Sequence number of the turn in flight
    pub(crate) in_flight: Option<u64>,
    /// The turn in flight, appended to the transcript on success
    pub(crate) sending: Option<OutgoingTurn>,
}

impl ChatSession {
    /// Whether a turn is outstanding
    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the send trigger should be enabled
    pub fn can_send(&self) -> bool {
        !self.is_sending() && (!self.input.trim().is_empty() || self.attachment.is_some())
    }

    /// Append a character to the input
    pub fn add_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Remove the last character of the input
    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Select an attachment
    pub fn attach(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
        self.error = None;
    }

    /// Drop the selected attachment
    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    /// Snapshot the turn to send, or explain why there is nothing to send
    pub(crate) fn prepare_turn(&self) -> std::result::Result<OutgoingTurn, ValidationError> {
        if self.input.trim().is_empty() && self.attachment.is_none() {
            return Err(ValidationError::NothingToSend);
        }
        Ok(OutgoingTurn {
            text: self.input.clone(),
            attachment: self.attachment.clone(),
        })
    }

    /// Record a successful turn: transcript grows, input and attachment clear
    pub(crate) fn complete(&mut self, reply: String) {
        if let Some(turn) = self.sending.take() {
            // Keep anything typed or attached while the turn was in flight
            if self.input == turn.text {
                self.input.clear();
            }
            if self.attachment == turn.attachment {
                self.attachment = None;
            }
            self.transcript.push(TranscriptEntry {
                role: ChatRole::User,
                content: turn.text,
                attachment: turn.attachment.map(|a| a.display_name()),
            });
        }
        self.transcript.push(TranscriptEntry {
            role: ChatRole::Assistant,
            content: reply,
            attachment: None,
        });
        self.error = None;
    }

    /// Record a failed turn: transcript, input and attachment stay as they were
    pub(crate) fn fail(&mut self, message: String) {
        self.sending = None;
        self.error = Some(format!("Failed to communicate with AI: {}", message));
    }
}
