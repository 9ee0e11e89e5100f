//! IAM-based login for Redshift.
//!
//! The caller's IAM identity is exchanged for a short-lived database user
//! on the cluster that serves the endpoint. Nothing is cached; each
//! connection attempt gets fresh credentials.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{DbConnectError, Result};
use crate::services::{
    ClusterCredentialIssuer, ClusterCredentials, CredentialRequest, IdentityService,
};

/// Groups every exchanged user joins.
pub const DB_GROUPS: [&str; 2] = ["iam", "readonlyusers"];

/// Extracts the database username from a caller identity.
///
/// Takes the second `:`-separated segment, so `AROAEXAMPLE:alice` yields
/// `alice`.
pub fn db_user_from_identity(identity: &str) -> Result<&str> {
    match identity.split(':').nth(1) {
        Some(user) if !user.is_empty() => Ok(user),
        _ => Err(DbConnectError::MalformedIdentity(identity.to_string())),
    }
}

/// The cluster identifier is the first DNS label of the endpoint.
pub fn cluster_id_from_endpoint(endpoint: &str) -> &str {
    endpoint.split('.').next().unwrap_or(endpoint)
}

/// Exchanges the caller's identity for temporary cluster credentials.
///
/// Split in two steps so callers can finish every read-only lookup before
/// [`issue`](Self::issue), which may create the user on the cluster.
#[derive(Clone)]
pub struct CredentialExchange {
    identity: Arc<dyn IdentityService>,
    issuer: Arc<dyn ClusterCredentialIssuer>,
}

impl CredentialExchange {
    pub fn new(
        identity: Arc<dyn IdentityService>,
        issuer: Arc<dyn ClusterCredentialIssuer>,
    ) -> Self {
        Self { identity, issuer }
    }

    /// Resolves the caller identity and returns the database username.
    pub async fn db_user(&self) -> Result<String> {
        let identity = self
            .identity
            .caller_identity()
            .await
            .map_err(|source| DbConnectError::CredentialExchange {
                stage: "resolving caller identity",
                source,
            })?;

        Ok(db_user_from_identity(&identity)?.to_string())
    }

    /// Issues credentials for `db_user` on the cluster behind `endpoint`.
    pub async fn issue(&self, db_user: String, endpoint: &str) -> Result<ClusterCredentials> {
        let request = CredentialRequest {
            db_user,
            cluster_id: cluster_id_from_endpoint(endpoint).to_string(),
            auto_create: true,
            db_groups: DB_GROUPS.iter().map(|g| g.to_string()).collect(),
        };
        debug!(
            db_user = %request.db_user,
            cluster_id = %request.cluster_id,
            "Requesting cluster credentials"
        );

        let credentials = self
            .issuer
            .cluster_credentials(&request)
            .await
            .map_err(|source| DbConnectError::CredentialExchange {
                stage: "issuing cluster credentials",
                source,
            })?;

        info!(
            username = %credentials.username,
            cluster_id = %request.cluster_id,
            expiration = ?credentials.expiration,
            "Temporary cluster credentials issued"
        );
        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_is_second_segment() {
        assert_eq!(
            db_user_from_identity("AROAEXAMPLE:alice@example.com").unwrap(),
            "alice@example.com"
        );
        assert_eq!(db_user_from_identity("a:b:c").unwrap(), "b");
    }

    #[test]
    fn test_identity_without_segment_is_malformed() {
        assert!(matches!(
            db_user_from_identity("AIDAEXAMPLE"),
            Err(DbConnectError::MalformedIdentity(_))
        ));
        assert!(db_user_from_identity("AROAEXAMPLE:").is_err());
    }

    #[test]
    fn test_cluster_id_is_first_label() {
        assert_eq!(
            cluster_id_from_endpoint("analytics.abc123.eu-west-1.redshift.amazonaws.com"),
            "analytics"
        );
        assert_eq!(cluster_id_from_endpoint("analytics"), "analytics");
    }
}
