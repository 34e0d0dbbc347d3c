//! Property and conversation store
//!
//! Single owner of the dashboard state: the persisted property list, the
//! selection, and session-only conversation state per property. Views call
//! these operations directly; nothing else mutates the state.
//!
//! Network work is split in two halves. A `begin_*` operation validates,
//! updates local state and returns a job tagged with a [`RequestTicket`]; the
//! caller runs the job and hands the outcome to the matching `finish_*`
//! operation. Outcomes whose ticket is stale (superseded, or issued for a
//! property that is no longer selected) are discarded.

use crate::api::{ClassifyRequest, PmChatRequest};
use crate::chat::AttachmentKind;
use crate::conversation::Conversation;
use crate::storage::{
    ClassifyResult, HistoryMessage, NewProperty, PortfolioFile, Property, PropertyPatch, ThreadKey,
};
use crate::{Error, Result, ValidationError};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Identifies one request: the property it was issued for and a store-wide sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    /// Property the request belongs to
    pub property_id: String,
    /// Monotonic sequence number
    pub seq: u64,
}

/// A classify request ready to run
#[derive(Debug, Clone)]
pub struct ClassifyJob {
    /// Tag to hand back to [`PropertyStore::finish_classify`]
    pub ticket: RequestTicket,
    /// Request body
    pub request: ClassifyRequest,
}

/// A history fetch ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryJob {
    /// Tag to hand back to [`PropertyStore::finish_history`]
    pub ticket: RequestTicket,
    /// History to fetch
    pub key: ThreadKey,
}

/// A chat turn ready to run
#[derive(Debug, Clone)]
pub struct ChatJob {
    /// Tag to hand back to [`PropertyStore::finish_chat`]
    pub ticket: RequestTicket,
    /// Request body
    pub request: PmChatRequest,
}

/// What happened to a settled request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// Result applied to state
    Applied,
    /// Error surfaced, local state kept for retry
    Failed,
    /// Stale ticket; nothing applied
    Discarded,
}

/// Result of [`PropertyStore::finish_classify`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyOutcome {
    /// Verdict stored and pending cleared; run `follow_up` to catch up with the backend
    Resolved {
        /// Authoritative history fetch for the same tenant
        follow_up: HistoryJob,
    },
    /// Error surfaced, pending kept
    Failed,
    /// Stale ticket; nothing applied
    Discarded,
}

/// The dashboard state store
#[derive(Debug)]
pub struct PropertyStore {
    properties: Vec<Property>,
    selected: Option<String>,
    conversations: HashMap<String, Conversation>,
    histories: HashMap<ThreadKey, Vec<HistoryMessage>>,
    /// Latest history fetch per key; older answers are ignored
    history_requests: HashMap<ThreadKey, u64>,
    portfolio: PortfolioFile,
    last_seq: u64,
}

impl PropertyStore {
    /// Load the property list from `portfolio` (seed on absence or corruption)
    pub fn open(portfolio: PortfolioFile) -> Self {
        let properties = portfolio.load();
        Self::with_properties(portfolio, properties)
    }

    /// Start from an explicit list; nothing is written until the first mutation
    pub fn with_properties(portfolio: PortfolioFile, properties: Vec<Property>) -> Self {
        Self {
            properties,
            selected: None,
            conversations: HashMap::new(),
            histories: HashMap::new(),
            history_requests: HashMap::new(),
            portfolio,
            last_seq: 0,
        }
    }

    /// Write the full property list to disk
    pub fn save(&self) -> Result<()> {
        self.portfolio.save(&self.properties)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!("Failed to save property list: {}", e);
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.last_seq += 1;
        self.last_seq
    }

    // ========== Property list ==========

    /// All properties, newest created first
    pub fn list(&self) -> &[Property] {
        &self.properties
    }

    /// Look up a property by id
    pub fn get(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// Id of the selected property
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected property
    pub fn selected(&self) -> Option<&Property> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Select a property. Unknown ids leave the selection alone.
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            debug!("Ignoring selection of unknown property {}", id);
            return false;
        }
        self.selected = Some(id.to_string());
        self.conversations.entry(id.to_string()).or_default();
        true
    }

    /// Deselect
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Validate and prepend a new property
    pub fn create(&mut self, input: NewProperty) -> Result<Property> {
        input.validate()?;

        let id = self.fresh_id();
        let property = input.into_property(id);
        self.properties.insert(0, property.clone());
        info!("Created property {} ({})", property.id, property.name);

        self.persist();
        Ok(property)
    }

    /// Time-based id distinct from every existing one
    fn fresh_id(&self) -> String {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let id = format!("prop-{}", millis);
            if self.get(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }

    /// Remove a property, deselecting it if needed. Irreversible.
    pub fn delete(&mut self, id: &str) -> Option<Property> {
        let index = self.properties.iter().position(|p| p.id == id)?;
        let removed = self.properties.remove(index);
        self.conversations.remove(id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        info!("Deleted property {} ({})", removed.id, removed.name);

        self.persist();
        Some(removed)
    }

    /// Shallow-merge `patch` into a property
    pub fn update(&mut self, id: &str, patch: PropertyPatch) -> Result<&Property> {
        let index = self
            .properties
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::NotFound(format!("property {}", id)))?;

        if !patch.is_empty() {
            patch.apply_to(&mut self.properties[index]);
            info!("Updated property {}", id);
            self.persist();
        }
        Ok(&self.properties[index])
    }

    // ========== Conversations ==========

    /// Session state of a property
    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.get(id)
    }

    /// Session state of the selected property
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.selected.as_deref().and_then(|id| self.conversations.get(id))
    }

    /// Mutable session state of the selected property
    pub fn active_conversation_mut(&mut self) -> Option<&mut Conversation> {
        let id = self.selected.clone()?;
        Some(self.conversations.entry(id).or_default())
    }

    /// Stage a tenant message on the selected property
    pub fn queue_message(&mut self, text: &str) -> bool {
        self.active_conversation_mut()
            .map(|conv| conv.queue_message(text))
            .unwrap_or(false)
    }

    /// Start classifying the selected property's pending messages
    ///
    /// A non-empty draft joins the batch first. On a validation failure the
    /// reason is recorded on the conversation and no job is returned.
    ///
    /// # Returns
    /// A `ClassifyJob` holding the request and the ticket to settle it with
    ///
    /// # Errors
    /// * `ValidationError::NoSelection` - no property is selected
    /// * `Error::Busy` - a classify request is already in flight
    /// * `ValidationError::NoMessages` - nothing queued or typed
    /// * `ValidationError::IncompleteContext` - tenant name, unit or address missing
    pub fn begin_classify(&mut self) -> Result<ClassifyJob> {
        let property = self.selected().cloned().ok_or(ValidationError::NoSelection)?;
        let seq = self.next_seq();
        let conv = self.conversations.entry(property.id.clone()).or_default();

        if conv.is_classifying() {
            return Err(Error::Busy);
        }

        let check = if !conv.has_outgoing() {
            Err(ValidationError::NoMessages)
        } else {
            property.context.validate()
        };
        if let Err(reason) = check {
            warn!("Classify rejected for {}: {}", property.id, reason);
            conv.validation = Some(reason.clone());
            return Err(reason.into());
        }

        conv.validation = None;
        conv.error = None;
        let thread = conv.take_outgoing_batch();
        conv.sent = thread.len();
        conv.in_flight = Some(seq);

        info!("Classify #{} issued for {} ({} messages)", seq, property.id, thread.len());
        Ok(ClassifyJob {
            ticket: RequestTicket {
                property_id: property.id,
                seq,
            },
            request: ClassifyRequest {
                thread,
                context: property.context,
            },
        })
    }

    /// Apply the outcome of a classify job
    ///
    /// On success only the messages that went out with the request leave the
    /// pending queue; anything queued meanwhile stays for the next batch. On
    /// failure the queue is untouched and the error is recorded.
    ///
    /// # Arguments
    /// * `ticket` - Ticket returned by `begin_classify`
    /// * `outcome` - Result of the network call
    ///
    /// # Returns
    /// * `Resolved` - result applied, with a follow-up tenant history fetch
    /// * `Failed` - error recorded on the conversation
    /// * `Discarded` - ticket stale, property deselected or deleted
    pub fn finish_classify(
        &mut self,
        ticket: &RequestTicket,
        outcome: Result<ClassifyResult>,
    ) -> ClassifyOutcome {
        let is_selected = self.selected.as_deref() == Some(ticket.property_id.as_str());
        let history_key = self.get(&ticket.property_id).map(|p| p.history_key());

        let Some(conv) = self.conversations.get_mut(&ticket.property_id) else {
            debug!("Classify #{} settled for a removed property", ticket.seq);
            return ClassifyOutcome::Discarded;
        };
        if conv.in_flight != Some(ticket.seq) {
            debug!("Classify #{} is stale", ticket.seq);
            return ClassifyOutcome::Discarded;
        }
        conv.in_flight = None;
        let sent = std::mem::take(&mut conv.sent);

        if !is_selected {
            debug!("Classify #{} discarded: {} is no longer selected", ticket.seq, ticket.property_id);
            return ClassifyOutcome::Discarded;
        }

        match outcome {
            Ok(result) => {
                // Messages queued while the request was in flight were never sent
                let sent = sent.min(conv.pending.len());
                conv.pending.drain(..sent);
                conv.result = Some(result);
                conv.error = None;
                match history_key {
                    Some(key) => ClassifyOutcome::Resolved {
                        follow_up: self.history_job(ticket.property_id.clone(), key),
                    },
                    None => ClassifyOutcome::Discarded,
                }
            }
            Err(e) => {
                warn!("Classify #{} failed: {}", ticket.seq, e);
                conv.error = Some(e.to_string());
                ClassifyOutcome::Failed
            }
        }
    }

    // ========== Histories ==========

    fn history_job(&mut self, property_id: String, key: ThreadKey) -> HistoryJob {
        let seq = self.next_seq();
        self.history_requests.insert(key.clone(), seq);
        HistoryJob {
            ticket: RequestTicket { property_id, seq },
            key,
        }
    }

    /// Fetch jobs for the selected property's SMS thread and tenant history
    pub fn refresh_histories(&mut self) -> Vec<HistoryJob> {
        let Some(property) = self.selected().cloned() else {
            return Vec::new();
        };
        let thread_key = property.thread_key();
        let history_key = property.history_key();
        vec![
            self.history_job(property.id.clone(), thread_key),
            self.history_job(property.id, history_key),
        ]
    }

    /// Apply a fetched history; the snapshot replaces whatever was cached for its key
    pub fn finish_history(&mut self, job: &HistoryJob, messages: Vec<HistoryMessage>) -> bool {
        if self.history_requests.get(&job.key) != Some(&job.ticket.seq) {
            debug!("History #{} superseded", job.ticket.seq);
            return false;
        }
        self.history_requests.remove(&job.key);

        if self.selected.as_deref() != Some(job.ticket.property_id.as_str()) {
            debug!("History #{} discarded: {} is no longer selected", job.ticket.seq, job.ticket.property_id);
            return false;
        }

        self.histories.insert(job.key.clone(), messages);
        true
    }

    /// Cached history for `key` (empty if never fetched)
    pub fn history(&self, key: &ThreadKey) -> &[HistoryMessage] {
        self.histories.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a fetch for `key` is outstanding
    pub fn is_loading_history(&self, key: &ThreadKey) -> bool {
        self.history_requests.contains_key(key)
    }

    // ========== Chat ==========

    /// Start sending the selected property's chat turn
    pub fn begin_chat(&mut self) -> Result<ChatJob> {
        let property = self.selected().cloned().ok_or(ValidationError::NoSelection)?;
        let seq = self.next_seq();
        let chat = &mut self.conversations.entry(property.id.clone()).or_default().chat;

        if chat.is_sending() {
            return Err(Error::Busy);
        }

        let turn = match chat.prepare_turn().and_then(|turn| {
            property.context.validate()?;
            Ok(turn)
        }) {
            Ok(turn) => turn,
            Err(reason) => {
                chat.error = Some(reason.to_string());
                return Err(reason.into());
            }
        };

        let (image_url, document_url) = match &turn.attachment {
            Some(a) if a.kind == AttachmentKind::Image => (Some(a.data_url.clone()), None),
            Some(a) => (None, Some(a.data_url.clone())),
            None => (None, None),
        };
        let request = PmChatRequest {
            message: turn.text.trim().to_string(),
            context: property.resolved_context(),
            phone: Some(property.phone.clone()).filter(|p| !p.trim().is_empty()),
            image_url,
            document_url,
        };

        chat.error = None;
        chat.in_flight = Some(seq);
        chat.sending = Some(turn);

        info!("Chat turn #{} issued for {}", seq, property.id);
        Ok(ChatJob {
            ticket: RequestTicket {
                property_id: property.id,
                seq,
            },
            request,
        })
    }

    /// Apply the outcome of a chat job
    pub fn finish_chat(&mut self, ticket: &RequestTicket, outcome: Result<String>) -> Settled {
        let is_selected = self.selected.as_deref() == Some(ticket.property_id.as_str());
        let Some(conv) = self.conversations.get_mut(&ticket.property_id) else {
            return Settled::Discarded;
        };
        let chat = &mut conv.chat;
        if chat.in_flight != Some(ticket.seq) {
            return Settled::Discarded;
        }
        chat.in_flight = None;

        if !is_selected {
            chat.sending = None;
            debug!("Chat turn #{} discarded: {} is no longer selected", ticket.seq, ticket.property_id);
            return Settled::Discarded;
        }

        match outcome {
            Ok(reply) => {
                chat.complete(reply);
                Settled::Applied
            }
            Err(e) => {
                warn!("Chat turn #{} failed: {}", ticket.seq, e);
                chat.fail(e.to_string());
                Settled::Failed
            }
        }
    }
}
