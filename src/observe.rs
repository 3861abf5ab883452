//! Observability hook.
//!
//! The pipeline reports progress and failure reasons as [`ScrapeEvent`]s to an
//! injected [`ScrapeObserver`] instead of printing; [`TracingObserver`] is the
//! default sink.

use std::time::Duration;

use crate::tools::acquire::DismissalOutcome;
use crate::tools::standings::ColumnCheck;

#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeEvent<'a> {
    SessionLaunched { launcher: &'a str },
    SessionLaunchFailed { reason: &'a str },
    Navigating { url: &'a str },
    ConsentDismissal(&'a DismissalOutcome),
    WaitingForContent { marker: &'a str, timeout: Duration },
    ContentReady { elapsed: Duration },
    WaitTimedOut { marker: &'a str },
    SessionClosed,
    TeardownFailed { reason: &'a str },
    ExtractionFinished { league_name: &'a str, teams: usize },
    ExtractionFailed { message: &'a str },
    WinsColumn(&'a ColumnCheck),
}

pub trait ScrapeObserver: Send + Sync {
    fn on_event(&self, event: &ScrapeEvent<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ScrapeObserver for TracingObserver {
    fn on_event(&self, event: &ScrapeEvent<'_>) {
        match event {
            ScrapeEvent::SessionLaunched { launcher } => {
                tracing::debug!(launcher, "browser session launched")
            }
            ScrapeEvent::SessionLaunchFailed { reason } => {
                tracing::error!(reason, "browser session failed to launch")
            }
            ScrapeEvent::Navigating { url } => tracing::info!(url, "navigating"),
            ScrapeEvent::ConsentDismissal(outcome) => match outcome {
                DismissalOutcome::Clicked { pattern } => {
                    tracing::info!(pattern = pattern.as_str(), "consent dialog dismissed")
                }
                DismissalOutcome::NotFound => tracing::debug!("no consent dialog found"),
                DismissalOutcome::ClickFailed(reason) => {
                    tracing::warn!(reason = reason.as_str(), "consent click failed")
                }
            },
            ScrapeEvent::WaitingForContent { marker, timeout } => {
                tracing::debug!(marker, timeout_ms = timeout.as_millis() as u64, "waiting for content")
            }
            ScrapeEvent::ContentReady { elapsed } => {
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "content ready")
            }
            ScrapeEvent::WaitTimedOut { marker } => {
                tracing::warn!(marker, "timed out waiting for content")
            }
            ScrapeEvent::SessionClosed => tracing::debug!("browser session closed"),
            ScrapeEvent::TeardownFailed { reason } => {
                tracing::warn!(reason, "browser session teardown failed")
            }
            ScrapeEvent::ExtractionFinished { league_name, teams } => {
                tracing::info!(league = league_name, teams, "standings extracted")
            }
            ScrapeEvent::ExtractionFailed { message } => {
                tracing::warn!(message, "standings extraction failed")
            }
            ScrapeEvent::WinsColumn(check) => match check {
                ColumnCheck::Verified => tracing::debug!("wins column matches header"),
                ColumnCheck::Unverified => {
                    tracing::debug!("no header cells, wins column read by position")
                }
                ColumnCheck::Mismatch { found } => tracing::warn!(
                    header = found.as_str(),
                    "wins column header mismatch; wins values may come from another column"
                ),
            },
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ScrapeObserver for NoopObserver {
    fn on_event(&self, _event: &ScrapeEvent<'_>) {}
}
