//! Main TUI application state and logic

use crate::api::ApiClient;
use crate::chat::Attachment;
use crate::config::Config;
use crate::storage::{ClassifyResult, HistoryMessage, PortfolioFile};
use crate::store::{ClassifyOutcome, HistoryJob, PropertyStore, RequestTicket, Settled};
use crate::tui::clipboard::{ClipboardProvider, RealClipboard};
use crate::tui::screens::*;
use crate::tui::types::{DetailTab, Screen};
use crate::{Error, Result};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Chat input prefix that selects a file instead of sending text
pub const ATTACH_COMMAND: &str = "/attach ";
/// Chat input that drops the selected file
pub const DETACH_COMMAND: &str = "/detach";

/// A network call running on the app's runtime
enum BackgroundJob {
    Classify {
        ticket: RequestTicket,
        handle: JoinHandle<Result<ClassifyResult>>,
    },
    History {
        job: HistoryJob,
        handle: JoinHandle<Vec<HistoryMessage>>,
    },
    Chat {
        ticket: RequestTicket,
        handle: JoinHandle<Result<String>>,
    },
}

impl BackgroundJob {
    fn is_finished(&self) -> bool {
        match self {
            Self::Classify { handle, .. } => handle.is_finished(),
            Self::History { handle, .. } => handle.is_finished(),
            Self::Chat { handle, .. } => handle.is_finished(),
        }
    }
}

/// Application state
pub struct App {
    /// Current screen
    pub current_screen: Screen,
    /// Should quit
    pub should_quit: bool,
    /// Property list, selection and conversations
    pub store: PropertyStore,
    /// Property grid screen
    pub grid: PropertyGridScreen,
    /// Add-property form (when active)
    pub add_property_screen: Option<AddPropertyScreen>,
    /// Detail screen (when active)
    pub detail_screen: Option<DetailScreen>,
    /// Delete confirmation popup
    pub delete_gate: DeleteGate,
    api: ApiClient,
    runtime: Runtime,
    jobs: Vec<BackgroundJob>,
    clipboard: Option<Box<dyn ClipboardProvider>>,
}

impl App {
    /// Create the application from configuration
    pub fn new(config: &Config) -> Result<Self> {
        let store = PropertyStore::open(PortfolioFile::new(&config.state_path));
        let api = ApiClient::from_config(config)?;
        info!("Using backend at {}", api.base_url());
        Self::with_store(store, api)
    }

    /// Create the application around an existing store and client
    pub fn with_store(store: PropertyStore, api: ApiClient) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("propai-net")
            .enable_all()
            .build()?;

        Ok(Self {
            current_screen: Screen::PropertyGrid,
            should_quit: false,
            store,
            grid: PropertyGridScreen::new(),
            add_property_screen: None,
            detail_screen: None,
            delete_gate: DeleteGate::new(),
            api,
            runtime,
            jobs: Vec::new(),
            clipboard: None,
        })
    }

    /// Replace the clipboard backend
    pub fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardProvider>) {
        self.clipboard = Some(clipboard);
    }

    /// Write the property list to disk
    pub fn save_state(&self) -> Result<()> {
        self.store.save()
    }

    // ========== Property grid ==========

    /// Move the grid cursor down
    pub fn next_property(&mut self) {
        self.grid.next(self.store.list().len());
    }

    /// Move the grid cursor up
    pub fn previous_property(&mut self) {
        self.grid.previous(self.store.list().len());
    }

    /// Id of the property under the grid cursor
    pub fn highlighted_property_id(&self) -> Option<String> {
        self.store
            .list()
            .get(self.grid.selected_index)
            .map(|p| p.id.clone())
    }

    /// Open the detail view of the highlighted property
    pub fn open_selected_property(&mut self) {
        let Some(id) = self.highlighted_property_id() else {
            return;
        };
        if !self.store.select(&id) {
            return;
        }
        self.detail_screen = Some(DetailScreen::new());
        self.current_screen = Screen::PropertyDetail;
        self.refresh_histories();
    }

    /// Leave the detail view and deselect
    pub fn back_to_grid(&mut self) {
        self.store.clear_selection();
        self.detail_screen = None;
        self.add_property_screen = None;
        self.grid.clamp(self.store.list().len());
        self.current_screen = Screen::PropertyGrid;
    }

    // ========== Add property ==========

    /// Show the add-property form
    pub fn show_add_property(&mut self) {
        self.add_property_screen = Some(AddPropertyScreen::new());
        self.current_screen = Screen::AddProperty;
    }

    /// Create a property from the form
    pub fn submit_add_property(&mut self) {
        let Some(form) = &mut self.add_property_screen else {
            return;
        };
        match self.store.create(form.to_input()) {
            Ok(property) => {
                self.add_property_screen = None;
                self.grid.selected_index = 0;
                self.grid.set_status(format!("Added {}", property.name));
                self.current_screen = Screen::PropertyGrid;
            }
            Err(e) => form.error = Some(e.to_string()),
        }
    }

    /// Close the form without creating anything
    pub fn cancel_add_property(&mut self) {
        self.add_property_screen = None;
        self.current_screen = Screen::PropertyGrid;
    }

    // ========== Delete ==========

    /// Open the delete popup for the highlighted property
    pub fn request_delete(&mut self) {
        if let Some(id) = self.highlighted_property_id() {
            self.delete_gate.request(&id);
        }
    }

    /// Flip the delete acknowledgment
    pub fn toggle_delete_ack(&mut self) {
        self.delete_gate.toggle_ack();
    }

    /// Delete the pending property if the acknowledgment is set
    pub fn confirm_delete(&mut self) {
        let Some(id) = self.delete_gate.confirm() else {
            return;
        };
        if let Some(removed) = self.store.delete(&id) {
            self.grid.set_status(format!("Deleted {}", removed.name));
        }
        self.grid.clamp(self.store.list().len());
        if self.store.selected().is_none() && self.current_screen == Screen::PropertyDetail {
            self.back_to_grid();
        }
    }

    /// Close the delete popup
    pub fn cancel_delete(&mut self) {
        self.delete_gate.cancel();
    }

    // ========== Detail tabs ==========

    /// Active detail tab
    pub fn current_tab(&self) -> Option<DetailTab> {
        self.detail_screen.as_ref().map(|d| d.tab)
    }

    /// Switch to the next tab
    pub fn next_tab(&mut self) {
        if let Some(detail) = &mut self.detail_screen {
            detail.tab = detail.tab.next();
        }
    }

    /// Switch to the previous tab
    pub fn previous_tab(&mut self) {
        if let Some(detail) = &mut self.detail_screen {
            detail.tab = detail.tab.previous();
        }
    }

    fn set_detail_status(&mut self, message: String) {
        if let Some(detail) = &mut self.detail_screen {
            detail.set_status(message);
        }
    }

    // ========== Classify ==========

    /// Stage the draft as a pending message
    pub fn queue_draft(&mut self) {
        if let Some(conv) = self.store.active_conversation_mut() {
            conv.queue_draft();
        }
    }

    /// Drop the highlighted pending message
    pub fn remove_highlighted_pending(&mut self) {
        let Some(index) = self.detail_screen.as_ref().map(|d| d.pending_cursor) else {
            return;
        };
        let remaining = match self.store.active_conversation_mut() {
            Some(conv) => {
                conv.remove_pending(index);
                conv.pending.len()
            }
            None => return,
        };
        if let Some(detail) = &mut self.detail_screen {
            detail.pending_cursor = detail.pending_cursor.min(remaining.saturating_sub(1));
        }
    }

    /// Move the pending-message cursor
    pub fn move_pending_cursor(&mut self, down: bool) {
        let count = self
            .store
            .active_conversation()
            .map(|c| c.pending.len())
            .unwrap_or(0);
        if let Some(detail) = &mut self.detail_screen {
            if count == 0 {
                detail.pending_cursor = 0;
            } else if down {
                detail.pending_cursor = (detail.pending_cursor + 1) % count;
            } else {
                detail.pending_cursor = (detail.pending_cursor + count - 1) % count;
            }
        }
    }

    /// Send the pending batch for classification
    pub fn classify(&mut self) {
        match self.store.begin_classify() {
            Ok(job) => {
                let api = self.api.clone();
                let request = job.request;
                let handle = self.runtime.spawn(async move { api.classify(&request).await });
                self.jobs.push(BackgroundJob::Classify {
                    ticket: job.ticket,
                    handle,
                });
            }
            Err(Error::Busy) => self.set_detail_status("Classification already in progress".to_string()),
            // Validation reasons are recorded on the conversation
            Err(_) => {}
        }
    }

    /// Copy the suggested reply of the last classification
    pub fn copy_reply(&mut self) {
        let reply = self
            .store
            .active_conversation()
            .and_then(|c| c.result.as_ref())
            .map(|r| r.reply.clone())
            .filter(|r| !r.trim().is_empty());
        let Some(reply) = reply else {
            self.set_detail_status("No suggested reply to copy".to_string());
            return;
        };

        if self.clipboard.is_none() {
            match RealClipboard::new() {
                Ok(clipboard) => self.clipboard = Some(Box::new(clipboard)),
                Err(e) => {
                    self.set_detail_status(e.to_string());
                    return;
                }
            }
        }
        let status = match self.clipboard.as_mut().map(|c| c.set_text(&reply)) {
            Some(Ok(())) => "Reply copied to clipboard".to_string(),
            Some(Err(e)) => e.to_string(),
            None => "Clipboard unavailable".to_string(),
        };
        self.set_detail_status(status);
    }

    // ========== Histories ==========

    /// Re-fetch the thread and tenant history of the selected property
    pub fn refresh_histories(&mut self) {
        for job in self.store.refresh_histories() {
            self.spawn_history(job);
        }
    }

    fn spawn_history(&mut self, job: HistoryJob) {
        let api = self.api.clone();
        let key = job.key.clone();
        let handle = self.runtime.spawn(async move { api.fetch_history(&key).await });
        self.jobs.push(BackgroundJob::History { job, handle });
    }

    // ========== Chat ==========

    /// Send the chat input, or run an attachment command typed into it
    pub fn send_chat(&mut self) {
        let input = match self.store.active_conversation() {
            Some(conv) => conv.chat.input.clone(),
            None => return,
        };
        if let Some(path) = input.strip_prefix(ATTACH_COMMAND) {
            self.attach_file(path.trim());
            return;
        }
        if input.trim() == DETACH_COMMAND {
            if let Some(conv) = self.store.active_conversation_mut() {
                conv.chat.clear_attachment();
                conv.chat.input.clear();
            }
            return;
        }

        match self.store.begin_chat() {
            Ok(job) => {
                let api = self.api.clone();
                let request = job.request;
                let handle = self.runtime.spawn(async move { api.pm_chat(&request).await });
                self.jobs.push(BackgroundJob::Chat {
                    ticket: job.ticket,
                    handle,
                });
            }
            Err(Error::Busy) => self.set_detail_status("Waiting for the assistant".to_string()),
            // Validation reasons are recorded on the chat session
            Err(_) => {}
        }
    }

    /// Read a file and select it as the chat attachment
    pub fn attach_file(&mut self, path: &str) {
        let result = Attachment::from_path(path);
        let Some(conv) = self.store.active_conversation_mut() else {
            return;
        };
        match result {
            Ok(attachment) => {
                conv.chat.attach(attachment);
                conv.chat.input.clear();
            }
            Err(e) => conv.chat.error = Some(e.to_string()),
        }
    }

    // ========== Important Info ==========

    /// Start editing the highlighted info field
    pub fn begin_info_edit(&mut self) {
        let Some(property) = self.store.selected() else {
            return;
        };
        if let Some(detail) = &mut self.detail_screen {
            let field = detail.selected_field();
            detail.editing = Some((field, field.value(property).to_string()));
        }
    }

    /// Save the inline edit
    pub fn commit_info_edit(&mut self) {
        let Some(id) = self.store.selected_id().map(str::to_string) else {
            return;
        };
        let Some(detail) = &mut self.detail_screen else {
            return;
        };
        let Some((field, buffer)) = detail.editing.take() else {
            return;
        };

        let value = buffer.trim().to_string();
        if field.is_required() && value.is_empty() {
            detail.set_status(format!("{} cannot be empty", field.label()));
            detail.editing = Some((field, buffer));
            return;
        }

        match self.store.update(&id, field.patch(value)) {
            Ok(_) => detail.set_status(format!("Saved {}", field.label())),
            Err(e) => detail.set_status(e.to_string()),
        }
    }

    /// Drop the inline edit
    pub fn cancel_info_edit(&mut self) {
        if let Some(detail) = &mut self.detail_screen {
            detail.editing = None;
        }
    }

    // ========== Background jobs ==========

    /// Whether any network call is still running
    pub fn has_pending_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    /// Apply every finished network call
    ///
    /// Returns true if anything settled this call.
    pub fn poll_jobs(&mut self) -> bool {
        if !self.jobs.iter().any(BackgroundJob::is_finished) {
            return false;
        }
        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.jobs)
            .into_iter()
            .partition(BackgroundJob::is_finished);
        self.jobs = running;

        for job in finished {
            self.settle(job);
        }
        true
    }

    /// Poll until every job settled or `timeout` elapsed
    ///
    /// Returns true if nothing is left running.
    pub fn wait_for_jobs(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll_jobs();
            if !self.has_pending_jobs() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    fn join<T>(&self, handle: JoinHandle<T>) -> Result<T> {
        self.runtime
            .block_on(handle)
            .map_err(|e| Error::Transport(format!("Background task failed: {}", e)))
    }

    fn settle(&mut self, job: BackgroundJob) {
        match job {
            BackgroundJob::Classify { ticket, handle } => {
                let outcome = self.join(handle).and_then(|r| r);
                match self.store.finish_classify(&ticket, outcome) {
                    ClassifyOutcome::Resolved { follow_up } => self.spawn_history(follow_up),
                    ClassifyOutcome::Failed | ClassifyOutcome::Discarded => {}
                }
            }
            BackgroundJob::History { job, handle } => {
                let messages = self.join(handle).unwrap_or_else(|e| {
                    warn!("{}", e);
                    Vec::new()
                });
                self.store.finish_history(&job, messages);
            }
            BackgroundJob::Chat { ticket, handle } => {
                let outcome = self.join(handle).and_then(|r| r);
                if self.store.finish_chat(&ticket, outcome) == Settled::Discarded {
                    info!("Chat reply for {} arrived after leaving it", ticket.property_id);
                }
            }
        }
    }
}
