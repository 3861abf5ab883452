//! Chromium-backed browser session (chromiumoxide over CDP).

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::handler::viewport::Viewport as CdpViewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::profile::launch_args;
use super::session::{BrowserSession, SessionLauncher};
use super::types::AcquisitionConfig;
use super::utils::{class_marker_script, consent_click_script};
use crate::error::SessionError;

const REQUEST_TIMEOUT_SEC: u64 = 30;
const PROCESS_EXIT_TIMEOUT_SEC: u64 = 10;

/// Launches a local Chrome/Chromium through chromiumoxide.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher;

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
    fn name(&self) -> &'static str {
        "chromium"
    }

    async fn launch(
        &self,
        config: &AcquisitionConfig,
    ) -> Result<Box<dyn BrowserSession>, SessionError> {
        let mut builder = BrowserConfig::builder()
            .request_timeout(Duration::from_secs(REQUEST_TIMEOUT_SEC))
            .window_size(config.viewport.width, config.viewport.height)
            .viewport(CdpViewport {
                width: config.viewport.width,
                height: config.viewport.height,
                ..CdpViewport::default()
            })
            .args(launch_args(config));

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder.build().map_err(SessionError::new)?;
        let (browser, mut handler) = Browser::launch(browser_config).await?;

        // CDP events only flow while the handler is polled
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Box::new(ChromiumSession {
            browser,
            handler_task,
            page: None,
        }))
    }
}

/// A running Chromium process and its working tab.
pub struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Option<Page>,
}

impl ChromiumSession {
    fn page(&self) -> Result<&Page, SessionError> {
        self.page
            .as_ref()
            .ok_or_else(|| SessionError::new("browser tab not prepared"))
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn prepare(&mut self, config: &AcquisitionConfig) -> Result<(), SessionError> {
        let page = self.browser.new_page("about:blank").await?;

        let user_agent = SetUserAgentOverrideParams::builder()
            .user_agent(config.user_agent.clone())
            .accept_language(config.accept_language())
            .build()
            .map_err(SessionError::new)?;
        page.set_user_agent(user_agent).await?;

        self.page = Some(page);
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.page()?.goto(url).await?;
        Ok(())
    }

    async fn click_first_matching(
        &mut self,
        patterns: &[String],
    ) -> Result<Option<String>, SessionError> {
        let result = self.page()?.evaluate(consent_click_script(patterns)).await?;
        let matched = result
            .into_value::<String>()
            .map_err(|e| SessionError::new(format!("unexpected click script result: {e}")))?;
        Ok(Some(matched).filter(|pattern| !pattern.is_empty()))
    }

    async fn has_class_marker(&mut self, marker: &str) -> Result<bool, SessionError> {
        let result = self.page()?.evaluate(class_marker_script(marker)).await?;
        result
            .into_value::<bool>()
            .map_err(|e| SessionError::new(format!("unexpected marker script result: {e}")))
    }

    async fn page_source(&mut self) -> Result<String, SessionError> {
        Ok(self.page()?.content().await?)
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, SessionError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();
        Ok(self.page()?.screenshot(params).await?)
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.page = None;
        let exit_timeout = Duration::from_secs(PROCESS_EXIT_TIMEOUT_SEC);
        let result = shut_down(&mut self.browser, exit_timeout).await;
        self.handler_task.abort();
        result
    }
}

/// The process-level operations teardown needs from a browser.
#[async_trait]
trait BrowserProcess: Send {
    async fn request_close(&mut self) -> Result<(), SessionError>;
    async fn wait_exit(&mut self) -> Result<(), SessionError>;
    async fn force_kill(&mut self) -> Result<(), SessionError>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn request_close(&mut self) -> Result<(), SessionError> {
        self.close().await?;
        Ok(())
    }

    async fn wait_exit(&mut self) -> Result<(), SessionError> {
        self.wait()
            .await
            .map(|_| ())
            .map_err(|e| SessionError::new(format!("browser process did not exit: {e}")))
    }

    async fn force_kill(&mut self) -> Result<(), SessionError> {
        match self.kill().await {
            Some(Err(e)) => Err(SessionError::new(format!("failed to kill browser process: {e}"))),
            _ => Ok(()),
        }
    }
}

/// Close the browser and reap its process within `exit_timeout`.
///
/// A browser that rejects the close command (its handler is gone) or does not
/// exit in time is killed. Any failed step makes the whole call fail.
async fn shut_down(
    process: &mut dyn BrowserProcess,
    exit_timeout: Duration,
) -> Result<(), SessionError> {
    let closed = process.request_close().await;
    let killed = match closed {
        Ok(()) => Ok(()),
        Err(_) => process.force_kill().await,
    };

    let exited = tokio::time::timeout(exit_timeout, process.wait_exit()).await;
    let waited = match exited {
        Ok(waited) => waited,
        Err(_) => {
            process.force_kill().await?;
            Err(SessionError::new(format!(
                "browser process did not exit within {}ms and was killed",
                exit_timeout.as_millis()
            )))
        }
    };

    closed?;
    killed?;
    waited
}
