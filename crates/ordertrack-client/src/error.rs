use thiserror::Error;

/// Failures of a single tracking request, before they are normalized into a
/// [`crate::SearchOutcome`].
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` is the `error`
    /// field of the JSON body when the backend sent one.
    #[error("unexpected HTTP status {status}{}", message_suffix(.message.as_deref()))]
    Status { status: u16, message: Option<String> },

    /// The response body could not be deserialized into an order.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl TrackingError {
    /// The message the backend supplied for this failure, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TrackingError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

fn message_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}
