//! Managed property records

use crate::storage::context::Context;
use crate::storage::message::ThreadKey;
use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// Photo used when the add form leaves it blank
pub const DEFAULT_PHOTO: &str =
    "https://images.unsplash.com/photo-1501183638710-841dd1904471?q=80&w=1600&auto=format&fit=crop";
/// Phone used when the add form leaves it blank
pub const PLACEHOLDER_PHONE: &str = "+10000000000";
/// Tenant name and unit until the manager fills them in
pub const PLACEHOLDER_FIELD: &str = "—";
/// Default maintenance hotline for new properties
pub const DEFAULT_HOTLINE: &str = "+1-555-0100";
/// Default tenant portal for new properties
pub const DEFAULT_PORTAL_URL: &str = "https://portal.example.com/login";

/// A managed unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Unique id, assigned at creation
    pub id: String,
    /// Display name
    pub name: String,
    /// Photo URL
    pub photo: String,
    /// Phone number keying the SMS thread on the backend
    pub phone: String,
    /// Tenant context
    pub context: Context,
}

impl Property {
    /// Key of this property's SMS thread
    pub fn thread_key(&self) -> ThreadKey {
        ThreadKey::Phone(self.phone.clone())
    }

    /// Key of the classifier conversation for this property's tenant
    pub fn history_key(&self) -> ThreadKey {
        ThreadKey::Tenant {
            tenant: self.context.tenant_name.clone(),
            unit: self.context.unit.clone(),
        }
    }

    /// Context with `tenant_phone` resolved against the property phone
    pub fn resolved_context(&self) -> Context {
        self.context.with_resolved_phone(&self.phone)
    }
}

/// Input of the add-property form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProperty {
    /// Display name (required)
    pub name: String,
    /// Street address (required)
    pub address: String,
    /// Thread phone (optional)
    pub phone: String,
    /// Photo URL (optional)
    pub photo: String,
}

impl NewProperty {
    /// Check required fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.address.trim().is_empty() {
            return Err(ValidationError::MissingField("address"));
        }
        Ok(())
    }

    /// Build the property record, filling defaults for blank optional fields
    pub fn into_property(self, id: String) -> Property {
        let name = self.name.trim().to_string();
        let photo = non_blank(&self.photo).unwrap_or(DEFAULT_PHOTO).to_string();
        let phone = non_blank(&self.phone).unwrap_or(PLACEHOLDER_PHONE).to_string();

        Property {
            id,
            photo,
            phone,
            context: Context {
                tenant_name: PLACEHOLDER_FIELD.to_string(),
                unit: PLACEHOLDER_FIELD.to_string(),
                address: self.address.trim().to_string(),
                hotline: Some(DEFAULT_HOTLINE.to_string()),
                portal_url: Some(DEFAULT_PORTAL_URL.to_string()),
                property_name: Some(name.clone()),
                tenant_phone: None,
            },
            name,
        }
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Partial update for inline field edits; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPatch {
    /// New display name
    pub name: Option<String>,
    /// New photo URL
    pub photo: Option<String>,
    /// New thread phone
    pub phone: Option<String>,
    /// New tenant name
    pub tenant_name: Option<String>,
    /// New unit
    pub unit: Option<String>,
    /// New address
    pub address: Option<String>,
    /// New hotline (`Some("")` clears it)
    pub hotline: Option<String>,
    /// New portal URL (`Some("")` clears it)
    pub portal_url: Option<String>,
    /// New property name (`Some("")` clears it)
    pub property_name: Option<String>,
    /// New tenant phone (`Some("")` clears it)
    pub tenant_phone: Option<String>,
}

impl PropertyPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow-merge the patch into `property`
    pub fn apply_to(self, property: &mut Property) {
        fn optional(value: String) -> Option<String> {
            (!value.trim().is_empty()).then_some(value)
        }

        if let Some(v) = self.name {
            property.name = v;
        }
        if let Some(v) = self.photo {
            property.photo = v;
        }
        if let Some(v) = self.phone {
            property.phone = v;
        }

        let ctx = &mut property.context;
        if let Some(v) = self.tenant_name {
            ctx.tenant_name = v;
        }
        if let Some(v) = self.unit {
            ctx.unit = v;
        }
        if let Some(v) = self.address {
            ctx.address = v;
        }
        if let Some(v) = self.hotline {
            ctx.hotline = optional(v);
        }
        if let Some(v) = self.portal_url {
            ctx.portal_url = optional(v);
        }
        if let Some(v) = self.property_name {
            ctx.property_name = optional(v);
        }
        if let Some(v) = self.tenant_phone {
            ctx.tenant_phone = optional(v);
        }
    }
}
