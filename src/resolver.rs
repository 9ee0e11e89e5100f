//! Resolves a logical database name into a ready-to-use connection request.
//!
//! Every call goes back to the parameter store; nothing is cached between
//! calls, so rotated secrets and retyped databases are picked up immediately.

use std::net::IpAddr;
use std::sync::Arc;

use tracing::{debug, info};

use crate::backend::Backend;
use crate::credentials::CredentialExchange;
use crate::error::{DbConnectError, Result};
use crate::overrides::Overrides;
use crate::services::{
    ClusterCredentialIssuer, ClusterCredentials, ConnectionRequest, EngineFactory, IdentityService,
    ParameterStore, SslMode,
};
use crate::uri::ConnectionUri;

pub const DEFAULT_NAMESPACE: &str = "dbconnect";

/// Database name Athena connections always use, whatever the logical name.
pub const ATHENA_DATABASE: &str = "main-app";

/// Looks up connection parameters under `/<namespace>/...` and assembles
/// connection URIs from them.
#[derive(Clone)]
pub struct ConnectionResolver {
    store: Arc<dyn ParameterStore>,
    overrides: Overrides,
    exchange: Option<CredentialExchange>,
    namespace: String,
}

impl ConnectionResolver {
    /// A resolver without overrides or credential exchange, using the
    /// default namespace.
    pub fn new(store: Arc<dyn ParameterStore>) -> Self {
        Self {
            store,
            overrides: Overrides::none(),
            exchange: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Enables IAM login for Redshift databases.
    pub fn with_credential_exchange(
        mut self,
        identity: Arc<dyn IdentityService>,
        issuer: Arc<dyn ClusterCredentialIssuer>,
    ) -> Self {
        self.exchange = Some(CredentialExchange::new(identity, issuer));
        self
    }

    /// Sets the first path segment. Leading and trailing slashes are ignored.
    pub fn with_namespace(mut self, namespace: impl AsRef<str>) -> Self {
        self.namespace = namespace.as_ref().trim_matches('/').to_string();
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Fetches `path` from the store, mapping failure to `LookupNotFound`.
    pub(crate) async fn fetch(&self, path: String) -> Result<String> {
        debug!(path = %path, "Fetching parameter");
        self.store
            .fetch(&path)
            .await
            .map_err(|source| DbConnectError::LookupNotFound { path, source })
    }

    pub(crate) fn database_path(&self, database: &str, field: &str) -> String {
        format!("/{}/{}/{}", self.namespace, database, field)
    }

    /// Returns the database names listed in `/<namespace>/dbnames`.
    ///
    /// The parameter is a comma-separated list; blank entries are dropped.
    #[tracing::instrument(skip(self), fields(namespace = %self.namespace))]
    pub async fn list_databases(&self) -> Result<Vec<String>> {
        let raw = self.fetch(format!("/{}/dbnames", self.namespace)).await?;
        let names: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        debug!(count = names.len(), "Database list fetched");
        Ok(names)
    }

    /// Reads the `type` parameter of `database`.
    ///
    /// Always read from the store; overrides do not apply to the type.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_backend(&self, database: &str) -> Result<Backend> {
        let raw = self.fetch(self.database_path(database, "type")).await?;
        raw.parse()
    }

    /// Resolves one connection attribute, preferring a local override.
    pub async fn resolve_attribute(&self, database: &str, field: &str) -> Result<String> {
        if let Some(value) = self.overrides.get(database, field) {
            debug!(database, field, "Using local override");
            return Ok(value.to_string());
        }
        self.fetch(self.database_path(database, field)).await
    }

    /// Exchanges the caller's IAM identity for a temporary login on the
    /// cluster behind `database`'s endpoint.
    ///
    /// The identity is resolved first, then the endpoint; credentials are
    /// only issued once both succeed.
    #[tracing::instrument(skip(self))]
    pub async fn issue_temporary_credentials(&self, database: &str) -> Result<ClusterCredentials> {
        let exchange = self.credential_exchange(database)?;
        let db_user = exchange.db_user().await?;
        let endpoint = self.resolve_attribute(database, "endpoint").await?;
        exchange.issue(db_user, &endpoint).await
    }

    fn credential_exchange(&self, database: &str) -> Result<&CredentialExchange> {
        self.exchange.as_ref().ok_or_else(|| {
            DbConnectError::Config(format!(
                "database '{database}' uses IAM login but no credential exchange is configured"
            ))
        })
    }

    /// Resolves every attribute of `database` and builds its connection request.
    #[tracing::instrument(skip(self))]
    pub async fn build_connection_uri(&self, database: &str) -> Result<ConnectionRequest> {
        let backend = self.resolve_backend(database).await?;
        let prefix = backend.prefix();

        let uri = match backend {
            Backend::Athena => ConnectionUri::new(
                prefix,
                self.resolve_attribute(database, "user").await?,
                self.resolve_attribute(database, "password").await?,
                self.resolve_attribute(database, "endpoint").await?,
                self.resolve_attribute(database, "port").await?,
                ATHENA_DATABASE,
            )
            .with_query(
                "s3_staging_dir",
                self.resolve_attribute(database, "s3-staging").await?,
            ),
            Backend::Redshift => {
                // Issuing may create the user on the cluster, so every
                // lookup has to succeed first.
                let exchange = self.credential_exchange(database)?;
                let db_user = exchange.db_user().await?;
                let endpoint = self.resolve_attribute(database, "endpoint").await?;
                let port = self.resolve_attribute(database, "port").await?;
                let db_name = self.resolve_attribute(database, "database").await?;
                let credentials = exchange.issue(db_user, &endpoint).await?;
                ConnectionUri::new(
                    prefix,
                    credentials.username,
                    credentials.password,
                    endpoint,
                    port,
                    db_name,
                )
            }
            Backend::MySql | Backend::PostgreSql => ConnectionUri::new(
                prefix,
                self.resolve_attribute(database, "user").await?,
                self.resolve_attribute(database, "password").await?,
                self.resolve_attribute(database, "endpoint").await?,
                self.resolve_attribute(database, "port").await?,
                self.resolve_attribute(database, "database").await?,
            ),
        };

        let ssl_mode = is_local_endpoint(&uri.host).then_some(SslMode::VerifyCa);

        info!(
            backend = %backend,
            uri = %uri.redacted(),
            ssl_mode = ?ssl_mode,
            "Connection URI built"
        );

        Ok(ConnectionRequest {
            database: database.to_string(),
            backend,
            uri,
            ssl_mode,
        })
    }

    /// Builds the connection request for `database` and hands it to `factory`.
    pub async fn connect<F: EngineFactory>(
        &self,
        database: &str,
        factory: &F,
    ) -> Result<F::Engine> {
        let request = self.build_connection_uri(database).await?;
        factory
            .create(&request)
            .await
            .map_err(DbConnectError::Constructor)
    }
}

/// Local endpoints are reached through a TLS-terminating proxy and need
/// certificate verification.
fn is_local_endpoint(endpoint: &str) -> bool {
    endpoint.contains("localhost")
        || endpoint
            .trim_matches(|c| c == '[' || c == ']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_endpoints() {
        assert!(is_local_endpoint("localhost"));
        assert!(is_local_endpoint("db.localhost"));
        assert!(is_local_endpoint("127.0.0.1"));
        assert!(is_local_endpoint("::1"));
        assert!(is_local_endpoint("[::1]"));
    }

    #[test]
    fn test_remote_endpoints() {
        assert!(!is_local_endpoint("db.example.com"));
        assert!(!is_local_endpoint("10.0.0.5"));
        assert!(!is_local_endpoint(""));
    }
}
