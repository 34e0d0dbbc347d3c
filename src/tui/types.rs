//! Core types for TUI screens and navigation

use crate::storage::{Property, PropertyPatch};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Grid of all properties
    PropertyGrid,
    /// Add-property form
    AddProperty,
    /// Detail view of the selected property
    PropertyDetail,
}

/// Tabs of the property detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    /// SMS thread
    TextHistory,
    /// Queue tenant messages and classify them
    Classify,
    /// Free-form chat with the assistant
    AiChat,
    /// Recently classified requests
    RecentRequests,
    /// Context summary and inline edits
    ImportantInfo,
}

impl DetailTab {
    /// All tabs in display order
    pub fn all() -> [Self; 5] {
        [
            Self::TextHistory,
            Self::Classify,
            Self::AiChat,
            Self::RecentRequests,
            Self::ImportantInfo,
        ]
    }

    /// Tab title
    pub fn label(&self) -> &'static str {
        match self {
            Self::TextHistory => "Text History",
            Self::Classify => "Classify",
            Self::AiChat => "AI Chat",
            Self::RecentRequests => "Recent Requests",
            Self::ImportantInfo => "Important Info",
        }
    }

    fn position(&self) -> usize {
        Self::all().iter().position(|t| t == self).unwrap_or(0)
    }

    /// Tab to the right, wrapping
    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.position() + 1) % all.len()]
    }

    /// Tab to the left, wrapping
    pub fn previous(&self) -> Self {
        let all = Self::all();
        all[(self.position() + all.len() - 1) % all.len()]
    }

    /// Whether printable keys go to a text input on this tab
    pub fn takes_text(&self) -> bool {
        matches!(self, Self::Classify | Self::AiChat)
    }
}

/// Fields editable from the Important Info tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    /// Property display name
    Name,
    /// Tenant name
    TenantName,
    /// Unit
    Unit,
    /// Street address
    Address,
    /// Thread phone
    Phone,
    /// Tenant phone
    TenantPhone,
    /// Maintenance hotline
    Hotline,
    /// Tenant portal
    PortalUrl,
    /// Property name sent to the backend
    PropertyName,
    /// Photo URL
    Photo,
}

impl InfoField {
    /// All fields in display order
    pub fn all() -> [Self; 10] {
        [
            Self::PropertyName,
            Self::Name,
            Self::TenantName,
            Self::Unit,
            Self::Phone,
            Self::TenantPhone,
            Self::Address,
            Self::Hotline,
            Self::PortalUrl,
            Self::Photo,
        ]
    }

    /// Field label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Display Name",
            Self::TenantName => "Tenant",
            Self::Unit => "Unit",
            Self::Address => "Address",
            Self::Phone => "Phone",
            Self::TenantPhone => "Tenant Phone",
            Self::Hotline => "Hotline",
            Self::PortalUrl => "Portal",
            Self::PropertyName => "Property",
            Self::Photo => "Photo",
        }
    }

    /// Current value on `property` (empty when unset)
    pub fn value<'a>(&self, property: &'a Property) -> &'a str {
        let ctx = &property.context;
        match self {
            Self::Name => &property.name,
            Self::TenantName => &ctx.tenant_name,
            Self::Unit => &ctx.unit,
            Self::Address => &ctx.address,
            Self::Phone => &property.phone,
            Self::TenantPhone => ctx.tenant_phone.as_deref().unwrap_or(""),
            Self::Hotline => ctx.hotline.as_deref().unwrap_or(""),
            Self::PortalUrl => ctx.portal_url.as_deref().unwrap_or(""),
            Self::PropertyName => ctx.property_name.as_deref().unwrap_or(""),
            Self::Photo => &property.photo,
        }
    }

    /// Patch setting this field to `value`
    pub fn patch(&self, value: String) -> PropertyPatch {
        let mut patch = PropertyPatch::default();
        match self {
            Self::Name => patch.name = Some(value),
            Self::TenantName => patch.tenant_name = Some(value),
            Self::Unit => patch.unit = Some(value),
            Self::Address => patch.address = Some(value),
            Self::Phone => patch.phone = Some(value),
            Self::TenantPhone => patch.tenant_phone = Some(value),
            Self::Hotline => patch.hotline = Some(value),
            Self::PortalUrl => patch.portal_url = Some(value),
            Self::PropertyName => patch.property_name = Some(value),
            Self::Photo => patch.photo = Some(value),
        }
        patch
    }

    /// Whether an empty value is rejected
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Name | Self::TenantName | Self::Unit | Self::Address)
    }
}
