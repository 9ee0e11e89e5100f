//! AWS-backed implementations of the [`crate::services`] traits.
//!
//! [`SsmParameterStore`] reads parameters from AWS SSM Parameter Store.
//! [`StsIdentityService`] asks STS who the caller is.
//! [`RedshiftCredentialIssuer`] issues temporary Redshift logins.
//! [`SystemBrowser`] opens URLs with the platform's default handler.

mod browser;
mod redshift;
mod ssm;
mod sts;

pub use browser::SystemBrowser;
pub use redshift::RedshiftCredentialIssuer;
pub use ssm::SsmParameterStore;
pub use sts::StsIdentityService;

use aws_config::BehaviorVersion;
use aws_sdk_ssm::config::Region;
use tracing::debug;

/// The three AWS clients built from one shared SDK configuration.
pub struct AwsClients {
    pub parameters: SsmParameterStore,
    pub identity: StsIdentityService,
    pub credentials: RedshiftCredentialIssuer,
}

impl AwsClients {
    /// Loads the ambient AWS configuration (env vars, profile, instance
    /// role, ...) and builds every client from it. `region` overrides the
    /// region from the default provider chain.
    pub async fn load(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            debug!(region = %region, "Using explicit AWS region");
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;
        Self::from_config(&config)
    }

    pub fn from_config(config: &aws_config::SdkConfig) -> Self {
        Self {
            parameters: SsmParameterStore::new(config),
            identity: StsIdentityService::new(config),
            credentials: RedshiftCredentialIssuer::new(config),
        }
    }
}
