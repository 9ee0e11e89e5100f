use anyhow::{Context, Result};

use crate::services::IdentityService;

/// Resolves the caller's identity with STS `GetCallerIdentity`.
pub struct StsIdentityService {
    client: aws_sdk_sts::Client,
}

impl StsIdentityService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_sts::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl IdentityService for StsIdentityService {
    /// Returns the `UserId`, which for an assumed role reads
    /// `AROAEXAMPLEID:alice@example.com`.
    async fn caller_identity(&self) -> Result<String> {
        let resp = self
            .client
            .get_caller_identity()
            .send()
            .await
            .context("STS GetCallerIdentity failed")?;

        resp.user_id
            .ok_or_else(|| anyhow::anyhow!("STS GetCallerIdentity returned no UserId"))
    }
}
