//! Error taxonomy for connection resolution.

use thiserror::Error;

/// Failures surfaced by the resolver.
///
/// Collaborators (parameter store, identity and credential services,
/// engine factories) report plain [`anyhow::Error`]s; the resolver wraps
/// them here so callers can tell which step failed.
#[derive(Debug, Error)]
pub enum DbConnectError {
    /// A parameter path does not exist, has no value, or access was denied.
    #[error("parameter '{path}' could not be resolved")]
    LookupNotFound {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The `type` parameter names a backend we don't know how to connect to.
    #[error("unrecognized backend type '{0}' (expected mysql, postgresql, awsathena or redshift)")]
    UnrecognizedBackendType(String),

    /// The caller identity could not be split into a database username.
    #[error("caller identity '{0}' has no user segment")]
    MalformedIdentity(String),

    /// The identity lookup or temporary credential issuance failed.
    #[error("credential exchange failed while {stage}")]
    CredentialExchange {
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The engine factory rejected the connection request.
    #[error("engine construction failed")]
    Constructor(#[source] anyhow::Error),

    /// The documentation URL could not be opened.
    #[error("failed to open browser")]
    Browser(#[source] anyhow::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DbConnectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_not_found_keeps_source() {
        let err = DbConnectError::LookupNotFound {
            path: "/dbconnect/orders/user".to_string(),
            source: anyhow::anyhow!("ParameterNotFound"),
        };
        assert_eq!(
            err.to_string(),
            "parameter '/dbconnect/orders/user' could not be resolved"
        );
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "ParameterNotFound");
    }

    #[test]
    fn test_unrecognized_backend_message_names_value() {
        let err = DbConnectError::UnrecognizedBackendType("oracle".to_string());
        assert!(err.to_string().contains("'oracle'"));
    }
}
