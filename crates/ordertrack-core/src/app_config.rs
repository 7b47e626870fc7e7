use chrono::FixedOffset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How the tracking client treats browser-style credentials.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CredentialPolicy {
    /// Send no cookies and no anti-forgery header.
    #[default]
    Omit,
    /// Keep a cookie store, send session cookies, and echo the value of
    /// `csrf_cookie` in the `csrf_header` request header.
    Forward {
        csrf_cookie: String,
        csrf_header: String,
    },
}

impl std::fmt::Display for CredentialPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialPolicy::Omit => write!(f, "omit"),
            CredentialPolicy::Forward { .. } => write!(f, "forward"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_base_url: String,
    pub log_level: String,
    pub user_agent: String,
    pub credentials: CredentialPolicy,
    pub fallback_error: String,
    pub display_offset: FixedOffset,
}
