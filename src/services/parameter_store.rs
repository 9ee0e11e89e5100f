//! Trait for the remote key-value store holding connection parameters.

use anyhow::Result;

/// Resolves a parameter path (e.g. `/dbconnect/orders/password`) into its
/// plaintext value.
///
/// Implementations must request decryption so encrypted secrets come back
/// readable, and must fail when the path does not exist.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String>;
}
