use crate::config::ScrapeConfig;
use crate::observe::{ScrapeEvent, ScrapeObserver, TracingObserver};
use crate::tools::acquire::{acquire, AcquisitionResult, ChromiumLauncher, SessionLauncher};
use crate::tools::standings::{extract_standings, ExtractionOutcome};
use crate::types::ScrapeOutcome;

/// Acquisition followed by extraction, one URL per call.
///
/// Holds no state between calls; run separate engines (or calls) on separate
/// tasks if you want several URLs at once. Be aware that many concurrent
/// sessions against the same host tend to trip its bot defences.
pub struct Engine<'a> {
    pub launcher: &'a dyn SessionLauncher,
    pub observer: &'a dyn ScrapeObserver,
    pub config: ScrapeConfig,
}

impl<'a> Engine<'a> {
    pub fn new(
        launcher: &'a dyn SessionLauncher,
        observer: &'a dyn ScrapeObserver,
        config: ScrapeConfig,
    ) -> Self {
        Self {
            launcher,
            observer,
            config,
        }
    }

    pub async fn scrape(&self, url: &str) -> ScrapeOutcome {
        let html = match acquire(self.launcher, url, &self.config.acquisition, self.observer).await
        {
            AcquisitionResult::Html(html) => html,
            AcquisitionResult::Failure(failure) => return failure.into(),
        };
        self.extract(&html)
    }

    /// Extraction only, for HTML captured elsewhere.
    pub fn extract(&self, html: &str) -> ScrapeOutcome {
        let outcome = extract_standings(html, &self.config.selectors);
        match &outcome {
            ExtractionOutcome::Success(standings) => {
                self.observer.on_event(&ScrapeEvent::WinsColumn(&standings.wins_column));
                self.observer.on_event(&ScrapeEvent::ExtractionFinished {
                    league_name: &standings.league_name,
                    teams: standings.teams.len(),
                });
            }
            ExtractionOutcome::PartialFailure(failure) => {
                self.observer.on_event(&ScrapeEvent::ExtractionFailed {
                    message: &failure.message,
                });
            }
        }
        outcome.into()
    }
}

/// Scrape `url` with a local Chromium, default configuration and `tracing` logs.
pub async fn scrape(url: &str) -> ScrapeOutcome {
    scrape_with(url, ScrapeConfig::default()).await
}

/// Scrape `url` with a local Chromium and the given configuration.
pub async fn scrape_with(url: &str, config: ScrapeConfig) -> ScrapeOutcome {
    Engine::new(&ChromiumLauncher, &TracingObserver, config)
        .scrape(url)
        .await
}
