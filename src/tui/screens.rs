//! Screen state structures for TUI

use crate::storage::NewProperty;
use crate::tui::types::{DetailTab, InfoField};

/// Property grid screen state
#[derive(Debug, Default)]
pub struct PropertyGridScreen {
    /// Selected card index
    pub selected_index: usize,
    /// Status message
    pub status_message: Option<String>,
}

impl PropertyGridScreen {
    /// Create new property grid screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to next property
    pub fn next(&mut self, count: usize) {
        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
        }
    }

    /// Move to previous property
    pub fn previous(&mut self, count: usize) {
        if count > 0 {
            if self.selected_index > 0 {
                self.selected_index -= 1;
            } else {
                self.selected_index = count - 1;
            }
        }
    }

    /// Keep the selection inside a list of `count` items
    pub fn clamp(&mut self, count: usize) {
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Input fields of the add-property form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Display name (required)
    Name,
    /// Address (required)
    Address,
    /// Phone (optional)
    Phone,
    /// Photo URL (optional)
    Photo,
}

impl FormField {
    const ORDER: [FormField; 4] = [Self::Name, Self::Address, Self::Phone, Self::Photo];

    /// Field label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Property Name *",
            Self::Address => "Address *",
            Self::Phone => "Phone",
            Self::Photo => "Photo URL",
        }
    }

    fn index(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// Add-property form state
#[derive(Debug)]
pub struct AddPropertyScreen {
    /// Name input
    pub name: String,
    /// Address input
    pub address: String,
    /// Phone input
    pub phone: String,
    /// Photo URL input
    pub photo: String,
    /// Focused field
    pub focus: FormField,
    /// Validation message
    pub error: Option<String>,
}

impl AddPropertyScreen {
    /// Create an empty form
    pub fn new() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            phone: String::new(),
            photo: String::new(),
            focus: FormField::Name,
            error: None,
        }
    }

    /// All fields in tab order
    pub fn fields() -> [FormField; 4] {
        FormField::ORDER
    }

    /// Value of a field
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Address => &self.address,
            FormField::Phone => &self.phone,
            FormField::Photo => &self.photo,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::Address => &mut self.address,
            FormField::Phone => &mut self.phone,
            FormField::Photo => &mut self.photo,
        }
    }

    /// Focus the next field, wrapping
    pub fn next_field(&mut self) {
        self.focus = FormField::ORDER[(self.focus.index() + 1) % FormField::ORDER.len()];
    }

    /// Focus the previous field, wrapping
    pub fn previous_field(&mut self) {
        let len = FormField::ORDER.len();
        self.focus = FormField::ORDER[(self.focus.index() + len - 1) % len];
    }

    /// Type into the focused field
    pub fn add_char(&mut self, c: char) {
        self.focused_mut().push(c);
        self.error = None;
    }

    /// Delete from the focused field
    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    /// Form contents as store input
    pub fn to_input(&self) -> NewProperty {
        NewProperty {
            name: self.name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            photo: self.photo.clone(),
        }
    }
}

impl Default for AddPropertyScreen {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-step confirmation in front of property deletion
///
/// `request` marks a target, `toggle_ack` sets the acknowledgment, and only
/// then does `confirm` hand the id back for deletion.
#[derive(Debug, Default)]
pub struct DeleteGate {
    pending: Option<String>,
    acknowledged: bool,
}

impl DeleteGate {
    /// Create a closed gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `property_id` as pending delete. A new target resets the acknowledgment.
    pub fn request(&mut self, property_id: &str) {
        if self.pending.as_deref() != Some(property_id) {
            self.acknowledged = false;
        }
        self.pending = Some(property_id.to_string());
    }

    /// Property pending delete
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Whether the popup is showing
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the acknowledgment is set
    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    /// Flip the acknowledgment (no-op while closed)
    pub fn toggle_ack(&mut self) {
        if self.pending.is_some() {
            self.acknowledged = !self.acknowledged;
        }
    }

    /// Whether confirm is enabled
    pub fn can_confirm(&self) -> bool {
        self.pending.is_some() && self.acknowledged
    }

    /// Close the gate and return the id to delete, if acknowledged
    pub fn confirm(&mut self) -> Option<String> {
        if !self.can_confirm() {
            return None;
        }
        self.acknowledged = false;
        self.pending.take()
    }

    /// Close the gate without deleting
    pub fn cancel(&mut self) {
        self.pending = None;
        self.acknowledged = false;
    }
}

/// Property detail screen state
#[derive(Debug)]
pub struct DetailScreen {
    /// Active tab
    pub tab: DetailTab,
    /// Highlighted row on the Important Info tab
    pub info_cursor: usize,
    /// Field being edited and its buffer
    pub editing: Option<(InfoField, String)>,
    /// Highlighted pending message on the Classify tab
    pub pending_cursor: usize,
    /// Status message
    pub status_message: Option<String>,
}

impl DetailScreen {
    /// Create detail screen on the first tab
    pub fn new() -> Self {
        Self {
            tab: DetailTab::TextHistory,
            info_cursor: 0,
            editing: None,
            pending_cursor: 0,
            status_message: None,
        }
    }

    /// Highlighted info field
    pub fn selected_field(&self) -> InfoField {
        let fields = InfoField::all();
        fields[self.info_cursor.min(fields.len() - 1)]
    }

    /// Move the info cursor down
    pub fn next_field(&mut self) {
        self.info_cursor = (self.info_cursor + 1) % InfoField::all().len();
    }

    /// Move the info cursor up
    pub fn previous_field(&mut self) {
        let len = InfoField::all().len();
        self.info_cursor = (self.info_cursor + len - 1) % len;
    }

    /// Whether an inline edit is open
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}

impl Default for DetailScreen {
    fn default() -> Self {
        Self::new()
    }
}
