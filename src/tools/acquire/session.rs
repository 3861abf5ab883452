//! Browser session seam.
//!
//! Acquisition only talks to these traits, so the page flow can be exercised
//! against a scripted fake as well as a real Chromium.

use async_trait::async_trait;

use super::types::AcquisitionConfig;
use crate::error::SessionError;

/// Starts browser processes.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    fn name(&self) -> &'static str;

    /// Start a browser. On error no process is left running.
    async fn launch(
        &self,
        config: &AcquisitionConfig,
    ) -> Result<Box<dyn BrowserSession>, SessionError>;
}

/// One running browser with a single working tab.
///
/// Once `launch` has returned a session, the caller owes it exactly one
/// `close`, whatever happens in between.
#[async_trait]
pub trait BrowserSession: Send {
    /// Open the working tab and apply user agent, locale and viewport.
    async fn prepare(&mut self, config: &AcquisitionConfig) -> Result<(), SessionError>;

    async fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// DOM-level click on the first clickable element whose text contains one
    /// of `patterns` (tried in order). Returns the pattern that matched.
    async fn click_first_matching(
        &mut self,
        patterns: &[String],
    ) -> Result<Option<String>, SessionError>;

    /// Whether any element's class attribute contains `marker`.
    async fn has_class_marker(&mut self, marker: &str) -> Result<bool, SessionError>;

    /// Serialized HTML of the current document.
    async fn page_source(&mut self) -> Result<String, SessionError>;

    /// PNG screenshot of the full page.
    async fn screenshot(&mut self) -> Result<Vec<u8>, SessionError>;

    /// Terminate the browser.
    async fn close(&mut self) -> Result<(), SessionError>;
}
