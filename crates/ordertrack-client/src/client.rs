//! HTTP client for the order-tracking backend.
//!
//! Wraps `reqwest` with the backend's endpoint layout, its `{"error": ...}`
//! failure envelope, and a per-instance credential policy. The public
//! `search`/`track` calls never fail: every error path is normalized into
//! [`SearchOutcome::Failed`] carrying either the backend message or the
//! configured fallback text.

use std::sync::Arc;

use ordertrack_core::{
    AppConfig, CredentialPolicy, Order, DEFAULT_API_URL, DEFAULT_FALLBACK_ERROR,
    DEFAULT_USER_AGENT,
};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;

use crate::error::TrackingError;
use crate::outcome::{OrderSearch, SearchOutcome};

/// Which backend endpoint resolves an order number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMode {
    /// `POST {base}/orders/search/` with a JSON body.
    #[default]
    Search,
    /// `GET {base}/orders/track/{order_number}/`.
    Track,
}

/// Per-instance client settings. Two clients built from different configs
/// never share cookies or credential behaviour.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub credentials: CredentialPolicy,
    pub fallback_error: String,
    pub lookup: LookupMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            credentials: CredentialPolicy::Omit,
            fallback_error: DEFAULT_FALLBACK_ERROR.to_string(),
            lookup: LookupMode::Search,
        }
    }
}

impl ClientConfig {
    /// Default settings pointed at `base_url`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            user_agent: config.user_agent.clone(),
            credentials: config.credentials.clone(),
            fallback_error: config.fallback_error.clone(),
            lookup: LookupMode::Search,
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: CredentialPolicy) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn with_lookup(mut self, lookup: LookupMode) -> Self {
        self.lookup = lookup;
        self
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    order_number: &'a str,
}

/// Client for the order-tracking API.
pub struct TrackingClient {
    client: Client,
    base_url: Url,
    credentials: CredentialPolicy,
    cookie_jar: Option<Arc<Jar>>,
    fallback_error: String,
    lookup: LookupMode,
}

impl TrackingClient {
    /// Builds a client from an explicit configuration.
    ///
    /// With [`CredentialPolicy::Forward`] the client gets its own cookie
    /// store; see [`TrackingClient::cookie_jar`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::InvalidBaseUrl`] if `config.base_url` cannot
    /// be used as a base for endpoint paths, or [`TrackingError::Http`] if the
    /// underlying `reqwest::Client` cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, TrackingError> {
        // Exactly one trailing slash so path segments append under the base
        // path instead of replacing its last segment.
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TrackingError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TrackingError::InvalidBaseUrl {
                url: config.base_url,
                reason: "URL cannot carry a path".to_string(),
            });
        }

        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        let cookie_jar = match config.credentials {
            CredentialPolicy::Omit => None,
            CredentialPolicy::Forward { .. } => {
                let jar = Arc::new(Jar::default());
                builder = builder.cookie_provider(Arc::clone(&jar));
                Some(jar)
            }
        };
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            credentials: config.credentials,
            cookie_jar,
            fallback_error: config.fallback_error,
            lookup: config.lookup,
        })
    }

    /// The cookie store used when credentials are forwarded, so callers can
    /// seed a session before the first request. `None` under
    /// [`CredentialPolicy::Omit`].
    #[must_use]
    pub fn cookie_jar(&self) -> Option<&Arc<Jar>> {
        self.cookie_jar.as_ref()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Searches for an order via `POST {base}/orders/search/`.
    ///
    /// `order_number` must already be trimmed and non-empty.
    pub async fn search(&self, order_number: &str) -> SearchOutcome {
        self.normalize(self.try_search(order_number).await)
    }

    /// Looks up an order via `GET {base}/orders/track/{order_number}/`.
    pub async fn track(&self, order_number: &str) -> SearchOutcome {
        self.normalize(self.try_track(order_number).await)
    }

    /// Typed variant of [`TrackingClient::search`].
    ///
    /// # Errors
    ///
    /// - [`TrackingError::Http`] on network failure.
    /// - [`TrackingError::Status`] on a non-2xx response.
    /// - [`TrackingError::Deserialize`] if the body is not an order.
    pub async fn try_search(&self, order_number: &str) -> Result<Order, TrackingError> {
        let url = self.endpoint(&["orders", "search", ""])?;
        tracing::debug!(%url, order_number, "searching order");
        let request = self
            .client
            .post(url.clone())
            .json(&SearchRequest { order_number });
        self.send(request, &url).await
    }

    /// Typed variant of [`TrackingClient::track`].
    ///
    /// # Errors
    ///
    /// Same as [`TrackingClient::try_search`].
    pub async fn try_track(&self, order_number: &str) -> Result<Order, TrackingError> {
        let url = self.endpoint(&["orders", "track", order_number, ""])?;
        tracing::debug!(%url, order_number, "tracking order");
        let request = self.client.get(url.clone());
        self.send(request, &url).await
    }

    /// Appends percent-encoded path segments to the base URL. A trailing
    /// empty segment yields the trailing slash the backend routes expect.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TrackingError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TrackingError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Order, TrackingError> {
        let request = self.apply_credentials(request, url);
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::debug!(%url, status = status.as_u16(), ?message, "order lookup failed");
            return Err(TrackingError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| TrackingError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Adds the anti-forgery header when credentials are forwarded and the
    /// store holds the CSRF cookie for `url`.
    fn apply_credentials(&self, request: RequestBuilder, url: &Url) -> RequestBuilder {
        let CredentialPolicy::Forward {
            csrf_cookie,
            csrf_header,
        } = &self.credentials
        else {
            return request;
        };

        let token = self
            .cookie_jar
            .as_ref()
            .and_then(|jar| jar.cookies(url))
            .and_then(|header| header.to_str().ok().map(str::to_owned))
            .and_then(|cookies| cookie_value(&cookies, csrf_cookie).map(str::to_owned));

        match token {
            Some(token) => request.header(csrf_header.as_str(), token),
            None => request,
        }
    }

    fn normalize(&self, result: Result<Order, TrackingError>) -> SearchOutcome {
        match result {
            Ok(order) => SearchOutcome::Found(order),
            Err(err) => {
                tracing::debug!(error = %err, "normalizing order lookup failure");
                let message = err
                    .server_message()
                    .map_or_else(|| self.fallback_error.clone(), str::to_owned);
                SearchOutcome::Failed(message)
            }
        }
    }
}

impl OrderSearch for TrackingClient {
    async fn fetch_order(&self, order_number: &str) -> SearchOutcome {
        match self.lookup {
            LookupMode::Search => self.search(order_number).await,
            LookupMode::Track => self.track(order_number).await,
        }
    }
}

/// Extracts the `error` string from a JSON failure body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

/// Finds `name` in a `Cookie` header value (`a=1; b=2`).
fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
