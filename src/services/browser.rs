use anyhow::Result;

/// Opens a URL in the user's default browser.
pub trait BrowserLauncher: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}
