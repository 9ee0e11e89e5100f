use anyhow::{Context, Result};

use crate::services::BrowserLauncher;

/// Opens URLs in the user's default browser via the `webbrowser` crate,
/// which quotes the URL for the platform opener.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        webbrowser::open(url).with_context(|| format!("failed to open '{url}' in a browser"))
    }
}
