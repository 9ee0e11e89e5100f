use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::services::{ClusterCredentialIssuer, ClusterCredentials, CredentialRequest};

/// Issues temporary Redshift logins with `GetClusterCredentials`.
///
/// Needs `redshift:GetClusterCredentials`, plus `redshift:CreateClusterUser`
/// when auto-create is requested and `redshift:JoinGroup` for each group.
pub struct RedshiftCredentialIssuer {
    client: aws_sdk_redshift::Client,
}

impl RedshiftCredentialIssuer {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_redshift::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl ClusterCredentialIssuer for RedshiftCredentialIssuer {
    async fn cluster_credentials(&self, request: &CredentialRequest) -> Result<ClusterCredentials> {
        let resp = self
            .client
            .get_cluster_credentials()
            .db_user(&request.db_user)
            .cluster_identifier(&request.cluster_id)
            .auto_create(request.auto_create)
            .set_db_groups(Some(request.db_groups.clone()))
            .send()
            .await
            .with_context(|| {
                format!(
                    "Redshift GetClusterCredentials failed for user '{}' on cluster '{}'",
                    request.db_user, request.cluster_id
                )
            })?;

        let username = resp
            .db_user
            .ok_or_else(|| anyhow::anyhow!("GetClusterCredentials returned no DbUser"))?;
        let password = resp
            .db_password
            .ok_or_else(|| anyhow::anyhow!("GetClusterCredentials returned no DbPassword"))?;
        let expiration = resp
            .expiration
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos()));

        Ok(ClusterCredentials {
            username,
            password,
            expiration,
        })
    }
}
