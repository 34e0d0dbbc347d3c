//! Server-confirmed message records and classification verdicts

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Number of entries shown under "Recent Requests"
pub const RECENT_REQUEST_LIMIT: usize = 8;

/// Key under which the backend stores a history
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ThreadKey {
    /// SMS thread, `/threads/{phone}`
    Phone(String),
    /// Classifier conversation, `/history/{tenant}/{unit}`
    Tenant {
        /// Tenant name
        tenant: String,
        /// Unit
        unit: String,
    },
}

/// Request category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Category {
    /// Repairs and upkeep
    Maintenance,
    /// Payments and balances
    Rent,
    /// General questions
    General,
    /// Immediate danger or damage
    Emergency,
    /// Anything else
    Other,
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "maintenance" => Self::Maintenance,
            "rent" => Self::Rent,
            "general" => Self::General,
            "emergency" => Self::Emergency,
            _ => Self::Other,
        }
    }
}

impl Category {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::Rent => "rent",
            Self::General => "general",
            Self::Emergency => "emergency",
            Self::Other => "other",
        }
    }
}

/// Request priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Priority {
    /// Can wait
    Low,
    /// Default
    Normal,
    /// Handle soon
    High,
    /// Handle now
    Critical,
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Normal,
        }
    }
}

impl Priority {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Suggested next step for the property manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Action {
    /// Hand over to the property manager
    RouteToPm,
    /// Send the suggested reply as-is
    AutoReply,
    /// Escalate immediately
    Escalate,
    /// Ask the tenant for more detail
    AskClarify,
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto_reply" => Self::AutoReply,
            "escalate" => Self::Escalate,
            "ask_clarify" => Self::AskClarify,
            _ => Self::RouteToPm,
        }
    }
}

impl Action {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RouteToPm => "route_to_pm",
            Self::AutoReply => "auto_reply",
            Self::Escalate => "escalate",
            Self::AskClarify => "ask_clarify",
        }
    }
}

/// Structured verdict for a batch of tenant messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResult {
    /// Request category
    pub category: Category,
    /// Request priority
    pub priority: Priority,
    /// Suggested action
    pub action: Action,
    /// Suggested reply to the tenant
    #[serde(default)]
    pub reply: String,
    /// Model confidence, clamped to [0, 1]
    #[serde(default = "default_confidence", deserialize_with = "clamped_confidence")]
    pub confidence: f64,
    /// Extracted entities
    #[serde(default)]
    pub entities: Map<String, Value>,
}

fn default_confidence() -> f64 {
    0.5
}

fn clamped_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let raw = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(match raw {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => default_confidence(),
    })
}

/// Who authored a history record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// SMS from the tenant
    Inbound,
    /// SMS to the tenant
    #[serde(alias = "outbound-api", alias = "outbound-reply", alias = "outbound-call")]
    Outbound,
    /// Tenant turn in the classifier conversation
    User,
    /// Assistant turn in the classifier conversation
    Assistant,
    /// Unrecognized value
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Whether the record came from the tenant
    pub fn is_tenant(&self) -> bool {
        matches!(self, Self::Inbound | Self::User)
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
            Self::User => "tenant",
            Self::Assistant => "assistant",
            Self::Unknown => "unknown",
        }
    }
}

/// A server-confirmed message
///
/// Reads both SMS thread rows (`direction`, `body`, `id`/`sid`) and classifier
/// history rows (`role`, `content`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMessage {
    /// Server-assigned id
    #[serde(default, alias = "sid", deserialize_with = "id_as_string")]
    pub id: Option<String>,
    /// Direction or role
    #[serde(alias = "direction")]
    pub role: Role,
    /// Message text
    #[serde(default, alias = "content")]
    pub body: Option<String>,
    /// Delivery status
    #[serde(default)]
    pub status: Option<String>,
    /// Recipient number
    #[serde(default)]
    pub to: Option<String>,
    /// Sender number
    #[serde(default, rename = "from_")]
    pub from: Option<String>,
    /// Attached media
    #[serde(default)]
    pub media_urls: Vec<String>,
    /// Creation timestamp as sent by the backend
    #[serde(default)]
    pub created_at: Option<String>,
    /// Classified category
    #[serde(default)]
    pub category: Option<Category>,
    /// Classified priority
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Classified action
    #[serde(default)]
    pub action: Option<Action>,
    /// Classification confidence
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Extracted entities
    #[serde(default)]
    pub entities: Option<Map<String, Value>>,
    /// AI reply that was sent or suggested
    #[serde(default)]
    pub ai_reply: Option<String>,
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl HistoryMessage {
    /// Parsed creation time; naive timestamps are taken as UTC
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Whether the backend attached a classification
    pub fn is_classified(&self) -> bool {
        self.category.is_some()
    }

    /// Body text, or an empty string
    pub fn text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

/// Classified messages of a thread, newest first, capped at [`RECENT_REQUEST_LIMIT`]
pub fn recent_requests(thread: &[HistoryMessage]) -> Vec<&HistoryMessage> {
    let mut classified: Vec<&HistoryMessage> =
        thread.iter().filter(|m| m.is_classified()).collect();
    classified.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    classified.truncate(RECENT_REQUEST_LIMIT);
    classified
}
