//! Per-property message queue and classification state
//!
//! A conversation moves through
//! `Idle -> Drafting -> Queued -> Classifying -> Resolved | Failed`.
//! Pending messages live only in memory and are superseded, never merged, by the
//! next authoritative history fetch.

use crate::chat::ChatSession;
use crate::storage::ClassifyResult;
use crate::ValidationError;

/// Observable state of the classification flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyPhase {
    /// Nothing typed or queued
    Idle,
    /// Text typed but not queued
    Drafting,
    /// One or more messages staged locally
    Queued,
    /// Request in flight
    Classifying,
    /// Last request succeeded
    Resolved,
    /// Last request failed; pending messages kept for retry
    Failed,
}

impl ClassifyPhase {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drafting => "Drafting",
            Self::Queued => "Queued",
            Self::Classifying => "Classifying…",
            Self::Resolved => "Resolved",
            Self::Failed => "Failed",
        }
    }
}

/// Session-only state for one property
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    /// Text being typed, not yet queued
    pub draft: String,
    /// Messages staged for the next classify request
    pub pending: Vec<String>,
    /// Verdict of the last successful classify
    pub result: Option<ClassifyResult>,
    /// Why the last classify attempt was rejected locally
    pub validation: Option<ValidationError>,
    /// Transport or server error of the last classify request
    pub error: Option<String>,
    /// Sequence number of the classify request in flight
    pub(crate) in_flight: Option<u64>,
    /// Length of the pending prefix carried by the request in flight
    pub(crate) sent: usize,
    /// Free-form chat with the assistant
    pub chat: ChatSession,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase of the classification flow
    pub fn phase(&self) -> ClassifyPhase {
        if self.in_flight.is_some() {
            ClassifyPhase::Classifying
        } else if self.error.is_some() {
            ClassifyPhase::Failed
        } else if !self.pending.is_empty() {
            ClassifyPhase::Queued
        } else if !self.draft.trim().is_empty() {
            ClassifyPhase::Drafting
        } else if self.result.is_some() {
            ClassifyPhase::Resolved
        } else {
            ClassifyPhase::Idle
        }
    }

    /// Whether a classify request is outstanding
    pub fn is_classifying(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Append a character to the draft
    pub fn add_char(&mut self, c: char) {
        self.draft.push(c);
    }

    /// Remove the last character of the draft
    pub fn backspace(&mut self) {
        self.draft.pop();
    }

    /// Stage a message. Whitespace-only input is ignored; the draft is cleared
    /// whenever something was queued.
    ///
    /// Returns whether a message was added.
    pub fn queue_message(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.pending.push(trimmed.to_string());
        self.draft.clear();
        self.validation = None;
        true
    }

    /// Stage the current draft
    pub fn queue_draft(&mut self) -> bool {
        let draft = std::mem::take(&mut self.draft);
        let queued = self.queue_message(&draft);
        if !queued {
            self.draft = draft;
        }
        queued
    }

    /// Drop a staged message by index
    ///
    /// Messages already sent with the request in flight cannot be removed.
    pub fn remove_pending(&mut self, index: usize) -> Option<String> {
        if self.is_classifying() && index < self.sent {
            return None;
        }
        (index < self.pending.len()).then(|| self.pending.remove(index))
    }

    /// Whether pending plus the live draft contain anything to send
    pub fn has_outgoing(&self) -> bool {
        !self.pending.is_empty() || !self.draft.trim().is_empty()
    }

    /// Move a non-empty draft into the pending batch and return the batch
    pub(crate) fn take_outgoing_batch(&mut self) -> Vec<String> {
        if !self.draft.trim().is_empty() {
            let draft = std::mem::take(&mut self.draft);
            self.pending.push(draft.trim().to_string());
        } else {
            self.draft.clear();
        }
        self.pending.clone()
    }
}
