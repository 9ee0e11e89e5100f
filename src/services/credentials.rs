//! Traits and types for exchanging an IAM identity for database credentials.

use anyhow::Result;
use chrono::{DateTime, Utc};

/// Reports who the caller is.
#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    /// Returns the caller's identity string, colon-delimited as
    /// `<unique-id>:<session-name>` for assumed roles.
    async fn caller_identity(&self) -> Result<String>;
}

/// Parameters for a temporary-credential request against one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRequest {
    pub db_user: String,
    pub cluster_id: String,
    /// Create `db_user` on the cluster if it does not exist yet.
    pub auto_create: bool,
    /// Groups the user joins for the lifetime of the session.
    pub db_groups: Vec<String>,
}

/// Short-lived login issued for a single connection attempt.
#[derive(Clone)]
pub struct ClusterCredentials {
    pub username: String,
    pub password: String,
    pub expiration: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for ClusterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Issues temporary database credentials scoped to a cluster.
#[async_trait::async_trait]
pub trait ClusterCredentialIssuer: Send + Sync {
    async fn cluster_credentials(&self, request: &CredentialRequest) -> Result<ClusterCredentials>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_password() {
        let creds = ClusterCredentials {
            username: "IAM:alice".to_string(),
            password: "s3cret".to_string(),
            expiration: None,
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("IAM:alice"));
        assert!(!debug.contains("s3cret"));
    }
}
