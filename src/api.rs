//! HTTP client for the PropAI backend
//!
//! Endpoints:
//! - `GET /threads/{phone}` - SMS thread for a phone number
//! - `GET /history/{tenant}/{unit}` - classifier conversation for a tenant
//! - `POST /classify` - classify a batch of tenant messages
//! - `POST /pm_chat` - one property-manager chat turn
//!
//! The two read paths never fail: any error degrades to an empty history and is
//! only logged.

use crate::config::Config;
use crate::storage::{ClassifyResult, Context, HistoryMessage, ThreadKey};
use crate::{Error, Result};
use reqwest::{Client, Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Body of `POST /classify`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyRequest {
    /// Tenant messages in chronological order
    pub thread: Vec<String>,
    /// Tenant context
    pub context: Context,
}

/// Body of `POST /pm_chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmChatRequest {
    /// Manager's message (may be empty when only an attachment is sent)
    pub message: String,
    /// Tenant context with `tenant_phone` resolved
    pub context: Context,
    /// Thread phone, lets the backend hydrate the contact
    pub phone: Option<String>,
    /// Image attachment as a data URL
    pub image_url: Option<String>,
    /// Document attachment as a data URL
    pub document_url: Option<String>,
}

/// Response of `POST /pm_chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmChatResponse {
    /// Assistant reply
    pub reply: String,
}

/// Thin wrapper over `reqwest` bound to one backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    client: Client,
}

impl ApiClient {
    /// Create a client for `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| Error::Transport(format!("Invalid backend URL {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Transport(format!("Backend URL {} cannot carry a path", base_url)));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { base, client })
    }

    /// Create a client from runtime configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_base, config.request_timeout)
    }

    /// Backend base URL
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Build an endpoint URL, percent-encoding each path segment
    ///
    /// # Errors
    /// Returns `Error::Transport` for a `.` or `..` segment. URL
    /// normalization drops those (and their `%2E` spellings), which would
    /// silently address a different endpoint.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(dots) = segments.iter().find(|s| **s == "." || **s == "..") {
            return Err(Error::Transport(format!("Path segment {:?} cannot be addressed", dots)));
        }
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Transport("Backend URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetch the SMS thread for `phone` (empty on any error)
    pub async fn get_thread(&self, phone: &str) -> Vec<HistoryMessage> {
        self.get_list(&["threads", phone]).await
    }

    /// Fetch the classifier history for a tenant (empty on any error)
    pub async fn get_history(&self, tenant: &str, unit: &str) -> Vec<HistoryMessage> {
        self.get_list(&["history", tenant, unit]).await
    }

    /// Fetch whichever history `key` names
    pub async fn fetch_history(&self, key: &ThreadKey) -> Vec<HistoryMessage> {
        match key {
            ThreadKey::Phone(phone) => self.get_thread(phone).await,
            ThreadKey::Tenant { tenant, unit } => self.get_history(tenant, unit).await,
        }
    }

    /// Classify a batch of tenant messages
    ///
    /// # Arguments
    /// * `request` - Messages in chronological order plus the tenant context
    ///
    /// # Returns
    /// The backend's verdict: category, priority, action, suggested reply
    ///
    /// # Errors
    /// * `Error::Transport` - connect failure or timeout
    /// * `Error::Server` - non-2xx status, carrying the backend's `detail`
    /// * `Error::JsonSerialization` - a 2xx body that is not a verdict
    pub async fn classify(&self, request: &ClassifyRequest) -> Result<ClassifyResult> {
        let url = self.endpoint(&["classify"])?;
        info!("Classifying {} messages for {}", request.thread.len(), request.context.tenant_name);

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Classify request failed: {}", e)))?;

        let result: ClassifyResult = read_json(response).await?;
        info!(
            "Classified as {} / {} (confidence {:.2})",
            result.category.as_str(),
            result.priority.as_str(),
            result.confidence
        );
        Ok(result)
    }

    /// Send one chat turn, returning the assistant reply
    pub async fn pm_chat(&self, request: &PmChatRequest) -> Result<String> {
        let url = self.endpoint(&["pm_chat"])?;
        info!(
            "Sending chat turn for {} (image: {}, document: {})",
            request.context.tenant_name,
            request.image_url.is_some(),
            request.document_url.is_some()
        );

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Chat request failed: {}", e)))?;

        let body: PmChatResponse = read_json(response).await?;
        Ok(body.reply)
    }

    async fn get_list(&self, segments: &[&str]) -> Vec<HistoryMessage> {
        let url = match self.endpoint(segments) {
            Ok(url) => url,
            Err(e) => {
                warn!("Cannot build history URL: {}", e);
                return Vec::new();
            }
        };

        debug!("Fetching {}", url);
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("History fetch {} failed: {}", url, e);
                return Vec::new();
            }
        };

        match read_json::<Vec<HistoryMessage>>(response).await {
            Ok(messages) => {
                debug!("Fetched {} messages from {}", messages.len(), url);
                messages
            }
            Err(e) => {
                warn!("History fetch {} failed: {}", url, e);
                Vec::new()
            }
        }
    }
}

/// Decode a 2xx JSON body, or turn anything else into an error
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| Error::Transport(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        let detail = error_detail(&text).unwrap_or_else(|| {
            format!("{} response from backend", status.canonical_reason().unwrap_or("Error"))
        });
        warn!("Backend returned {}: {}", status, detail);
        return Err(Error::Server {
            status: status.as_u16(),
            detail,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

/// Backend error text: the JSON `detail` field when present, else the raw body
pub fn error_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => Some(trimmed.to_string()),
        },
        _ => Some(trimmed.to_string()),
    }
}
