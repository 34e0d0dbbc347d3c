//! Tenant context attached to a property

use crate::ValidationError;
use serde::{Deserialize, Serialize};

/// Tenant-facing metadata sent along with every classification and chat turn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Full tenant name
    pub tenant_name: String,
    /// Unit or apartment identifier
    pub unit: String,
    /// Street address
    pub address: String,
    /// 24/7 maintenance number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotline: Option<String>,
    /// Tenant portal URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_url: Option<String>,
    /// Property name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    /// Tenant phone (older state files call it `phone`)
    #[serde(default, alias = "phone", skip_serializing_if = "Option::is_none")]
    pub tenant_phone: Option<String>,
}

impl Context {
    /// Check that tenant_name, unit and address are all present
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tenant_name.trim().is_empty()
            || self.unit.trim().is_empty()
            || self.address.trim().is_empty()
        {
            return Err(ValidationError::IncompleteContext);
        }
        Ok(())
    }

    /// Whether classification may be attempted with this context
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Copy of this context with `tenant_phone` filled in from `fallback` when absent
    pub fn with_resolved_phone(&self, fallback: &str) -> Self {
        let mut ctx = self.clone();
        let missing = ctx.tenant_phone.as_deref().map_or(true, |p| p.trim().is_empty());
        if missing && !fallback.trim().is_empty() {
            ctx.tenant_phone = Some(fallback.to_string());
        }
        ctx
    }
}
