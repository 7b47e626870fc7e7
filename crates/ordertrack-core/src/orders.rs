//! Order tracking payloads as returned by the backend search endpoint.
//!
//! Everything here is read-only data: the backend computes status, delay,
//! and history ordering, and these types only carry it to the view.

use serde::{Deserialize, Serialize};

/// A tracked order. A new search replaces the whole value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_number: String,
    /// Backend-defined status code. Treated as opaque.
    pub status: String,
    pub status_display: String,
    #[serde(default)]
    pub is_delayed: bool,
    #[serde(default)]
    pub current_location: Option<String>,
    /// ISO 8601 timestamp, kept as received so an unparsable value can still
    /// be shown as "not available" instead of failing the whole payload.
    #[serde(default)]
    pub estimated_delivery: Option<String>,
    #[serde(default)]
    pub delivered_at: Option<String>,
    #[serde(default)]
    pub progress_percentage: Option<u8>,
    /// Server order is authoritative; never re-sorted.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl Order {
    /// The current location, if the backend sent a non-empty one.
    #[must_use]
    pub fn current_location(&self) -> Option<&str> {
        self.current_location.as_deref().filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.delivered_at.is_some()
    }
}

/// One point in an order's tracking history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    #[serde(default)]
    pub status: Option<String>,
    pub status_display: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Stable key of a history entry. The backend uses integer primary keys but
/// string keys are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryId::Int(id) => write!(f, "{id}"),
            EntryId::Text(id) => write!(f, "{id}"),
        }
    }
}
