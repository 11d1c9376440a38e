//! Adapter configuration.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{QaawsError, Result};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const REDACTED: &str = "[REDACTED]";

/// Connection settings for one QaaWS service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaawsConfig {
    /// Service endpoint URL.
    pub endpoint: String,

    /// Identifier of the published query service.
    pub cuid: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Session token from an earlier logon, used instead of a login pair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serialized_session: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for QaawsConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            cuid: String::new(),
            username: None,
            password: None,
            serialized_session: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl QaawsConfig {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, cuid: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            cuid: cuid.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_serialized_session(mut self, session: impl Into<String>) -> Self {
        self.serialized_session = Some(session.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Where the service definition is published.
    #[must_use]
    pub fn wsdl_location(&self) -> String {
        format!("{}?wsdl=1&cuid={}", self.endpoint, self.cuid)
    }

    /// Resolve the credentials to send.
    ///
    /// A complete login pair wins over a serialized session. Blank values
    /// count as missing.
    pub fn credentials(&self) -> Result<Credentials> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        match (present(&self.username), present(&self.password)) {
            (Some(username), Some(password)) => Ok(Credentials::Login { username, password }),
            _ => present(&self.serialized_session)
                .map(Credentials::Session)
                .ok_or_else(|| {
                    QaawsError::Configuration(
                        "Must provide username and password, \
                         or serialized_session to create a Qaaws client"
                            .to_string(),
                    )
                }),
        }
    }

    /// Check everything a request needs, returning the credentials.
    pub fn validate(&self) -> Result<Credentials> {
        if self.endpoint.trim().is_empty() {
            return Err(QaawsError::Configuration("endpoint is required".to_string()));
        }
        if self.cuid.trim().is_empty() {
            return Err(QaawsError::Configuration("cuid is required".to_string()));
        }
        self.credentials()
    }
}

impl fmt::Debug for QaawsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QaawsConfig")
            .field("endpoint", &self.endpoint)
            .field("cuid", &self.cuid)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field(
                "serialized_session",
                &self.serialized_session.as_ref().map(|_| REDACTED),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// How requests authenticate.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Sent as `login`/`password` parameters of every request.
    Login { username: String, password: String },
    /// Sent in a `QaaWSHeader` SOAP header.
    Session(String),
}

impl Credentials {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Session(_) => "serialized session",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login { username, .. } => f
                .debug_struct("Login")
                .field("username", username)
                .field("password", &REDACTED)
                .finish(),
            Self::Session(_) => f.debug_tuple("Session").field(&REDACTED).finish(),
        }
    }
}
