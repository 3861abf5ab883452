mod chromium;
mod consent;
mod profile;
mod session;
mod utils;

pub mod types;

pub use chromium::{ChromiumLauncher, ChromiumSession};
pub use consent::dismiss_consent;
pub use session::{BrowserSession, SessionLauncher};
pub use types::*;

use std::time::{Duration, Instant};

use crate::error::{AcquisitionError, SessionError};
use crate::observe::{ScrapeEvent, ScrapeObserver};

/// Load `url` in a fresh browser session and return its rendered HTML.
///
/// Steps: launch, prepare the tab, navigate, dismiss any consent dialog
/// (advisory), then poll until an element whose class contains
/// `config.content_marker` exists.
///
/// Never returns an error past this boundary: every fault becomes an
/// [`AcquisitionResult::Failure`]. Once a session has launched it is closed
/// exactly once before returning, on every path.
///
/// # Examples
/// ```no_run
/// use league_scrape::tools::acquire::{acquire, AcquisitionConfig, AcquisitionResult, ChromiumLauncher};
/// use league_scrape::observe::TracingObserver;
///
/// # async fn example() {
/// let config = AcquisitionConfig::default();
/// let url = "https://www.sofascore.com/tournament/football/england/premier-league/17";
/// match acquire(&ChromiumLauncher, url, &config, &TracingObserver).await {
///     AcquisitionResult::Html(html) => println!("{} bytes", html.len()),
///     AcquisitionResult::Failure(failure) => eprintln!("{}", failure.message()),
/// }
/// # }
/// ```
pub async fn acquire(
    launcher: &dyn SessionLauncher,
    url: &str,
    config: &AcquisitionConfig,
    observer: &dyn ScrapeObserver,
) -> AcquisitionResult {
    let mut session = match launcher.launch(config).await {
        Ok(session) => session,
        Err(e) => return launch_failed(e, observer),
    };
    observer.on_event(&ScrapeEvent::SessionLaunched {
        launcher: launcher.name(),
    });

    let result = drive(session.as_mut(), url, config, observer).await;

    match session.close().await {
        Ok(()) => observer.on_event(&ScrapeEvent::SessionClosed),
        Err(e) => observer.on_event(&ScrapeEvent::TeardownFailed {
            reason: &e.to_string(),
        }),
    }

    result
}

fn launch_failed(e: SessionError, observer: &dyn ScrapeObserver) -> AcquisitionResult {
    let message = e.to_string();
    observer.on_event(&ScrapeEvent::SessionLaunchFailed { reason: &message });
    AcquisitionResult::failure(AcquisitionError::SessionLaunch { message })
}

/// Everything between launch and teardown.
async fn drive(
    session: &mut dyn BrowserSession,
    url: &str,
    config: &AcquisitionConfig,
    observer: &dyn ScrapeObserver,
) -> AcquisitionResult {
    if let Err(e) = session.prepare(config).await {
        return launch_failed(e, observer);
    }

    observer.on_event(&ScrapeEvent::Navigating { url });
    if let Err(e) = session.navigate(url).await {
        return navigation_failed(e);
    }

    let dismissal = dismiss_consent(session, config).await;
    observer.on_event(&ScrapeEvent::ConsentDismissal(&dismissal));

    let timeout = Duration::from_millis(config.content_wait_timeout_ms);
    observer.on_event(&ScrapeEvent::WaitingForContent {
        marker: &config.content_marker,
        timeout,
    });

    match wait_for_marker(session, &config.content_marker, timeout, poll_interval(config)).await {
        Ok(Some(elapsed)) => {
            observer.on_event(&ScrapeEvent::ContentReady { elapsed });
            settle(config.content_settle_ms).await;
            match session.page_source().await {
                Ok(html) => AcquisitionResult::Html(html),
                Err(e) => navigation_failed(e),
            }
        }
        Ok(None) => {
            observer.on_event(&ScrapeEvent::WaitTimedOut {
                marker: &config.content_marker,
            });
            timed_out(session, config).await
        }
        Err(e) => navigation_failed(e),
    }
}

/// Poll for the marker until it appears (`Some(elapsed)`) or `timeout` passes (`None`).
async fn wait_for_marker(
    session: &mut dyn BrowserSession,
    marker: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<Option<Duration>, SessionError> {
    let start = Instant::now();
    loop {
        if session.has_class_marker(marker).await? {
            return Ok(Some(start.elapsed()));
        }
        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return Ok(None);
        }
        tokio::time::sleep(interval.min(timeout - elapsed)).await;
    }
}

/// Collect what the page looks like right now so an operator can tell a
/// layout change from a blocked consent flow.
async fn timed_out(session: &mut dyn BrowserSession, config: &AcquisitionConfig) -> AcquisitionResult {
    let screenshot = DebugCapture::from_result(session.screenshot().await, "screenshot");
    let page_source = DebugCapture::from_result(session.page_source().await, "page source");

    AcquisitionResult::Failure(AcquisitionFailure::with_artifacts(
        AcquisitionError::WaitTimeout {
            marker: config.content_marker.clone(),
            timeout_ms: config.content_wait_timeout_ms,
        },
        screenshot,
        page_source,
    ))
}

fn navigation_failed(e: SessionError) -> AcquisitionResult {
    AcquisitionResult::failure(AcquisitionError::Navigation {
        message: e.to_string(),
    })
}

pub(crate) fn poll_interval(config: &AcquisitionConfig) -> Duration {
    Duration::from_millis(config.poll_interval_ms.max(1))
}

pub(crate) async fn settle(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
