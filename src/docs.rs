//! Per-database documentation links.

use tracing::info;

use crate::error::{DbConnectError, Result};
use crate::resolver::ConnectionResolver;
use crate::services::BrowserLauncher;

/// Opens the documentation stored at `/<namespace>/<database>/docs` and
/// returns its URL.
pub async fn open_docs(
    resolver: &ConnectionResolver,
    launcher: &dyn BrowserLauncher,
    database: &str,
) -> Result<String> {
    let url = resolver
        .fetch(resolver.database_path(database, "docs"))
        .await?;

    info!(database, url = %url, "Opening \"{url}\"");
    launcher.open(&url).map_err(DbConnectError::Browser)?;
    Ok(url)
}
