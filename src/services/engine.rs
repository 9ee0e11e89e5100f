//! The hand-off point between resolution and an actual database driver.

use std::fmt;

use anyhow::Result;
use serde::Serialize;

use crate::backend::Backend;
use crate::uri::ConnectionUri;

/// TLS mode requested from the driver, matching the PostgreSQL `sslmode`
/// parameter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    Require,
    /// Server certificate must chain to a trusted CA.
    VerifyCa,
    VerifyFull,
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Require => write!(f, "require"),
            Self::VerifyCa => write!(f, "verify-ca"),
            Self::VerifyFull => write!(f, "verify-full"),
        }
    }
}

/// Everything a driver needs to open a connection to one database.
#[derive(Debug, Clone)]
pub struct ConnectionRequest {
    /// The logical name the request was resolved from.
    pub database: String,
    pub backend: Backend,
    pub uri: ConnectionUri,
    /// Set when the driver should use a non-default TLS mode.
    pub ssl_mode: Option<SslMode>,
}

impl ConnectionRequest {
    /// Extra driver arguments, e.g. `[("sslmode", "verify-ca")]`.
    pub fn connect_args(&self) -> Vec<(&'static str, String)> {
        self.ssl_mode
            .map(|mode| vec![("sslmode", mode.to_string())])
            .unwrap_or_default()
    }
}

/// Turns a [`ConnectionRequest`] into a live engine/connection handle.
#[async_trait::async_trait]
pub trait EngineFactory: Send + Sync {
    type Engine: Send;

    async fn create(&self, request: &ConnectionRequest) -> Result<Self::Engine>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ssl_mode: Option<SslMode>) -> ConnectionRequest {
        ConnectionRequest {
            database: "orders".to_string(),
            backend: Backend::PostgreSql,
            uri: ConnectionUri::new("postgresql", "u", "p", "localhost", "5432", "d"),
            ssl_mode,
        }
    }

    #[test]
    fn test_connect_args_empty_without_mode() {
        assert!(request(None).connect_args().is_empty());
    }

    #[test]
    fn test_connect_args_carry_verify_ca() {
        assert_eq!(
            request(Some(SslMode::VerifyCa)).connect_args(),
            vec![("sslmode", "verify-ca".to_string())]
        );
    }

    #[test]
    fn test_ssl_mode_serializes_like_display() {
        assert_eq!(serde_json::to_string(&SslMode::VerifyFull).unwrap(), "\"verify-full\"");
        assert_eq!(SslMode::VerifyFull.to_string(), "verify-full");
    }
}
