use anyhow::{Context, Result};

use crate::services::ParameterStore;

/// Parameter store backed by AWS SSM.
///
/// Connection attributes live at `/<namespace>/<database>/<field>` (for
/// example `/dbconnect/orders/password`) and the database list at
/// `/<namespace>/dbnames`. Secrets are usually `SecureString`s, so every
/// read asks for decryption; the caller needs `ssm:GetParameter` on the
/// namespace and `kms:Decrypt` on its key.
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl ParameterStore for SsmParameterStore {
    async fn fetch(&self, path: &str) -> Result<String> {
        let output = self
            .client
            .get_parameter()
            .name(path)
            .with_decryption(true)
            .send()
            .await
            .with_context(|| format!("GetParameter failed for '{path}'"))?;

        // A parameter with no value is unusable as a connection attribute.
        output
            .parameter
            .and_then(|parameter| parameter.value)
            .ok_or_else(|| anyhow::anyhow!("parameter '{path}' has no value"))
    }
}
