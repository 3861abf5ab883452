//! Scripted browser fakes and a recording observer for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::SessionError;
use crate::observe::{ScrapeEvent, ScrapeObserver};
use crate::tools::acquire::{AcquisitionConfig, BrowserSession, SessionLauncher};

/// Where the fake browser should break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    Launch,
    Prepare,
    Navigate,
    Wait,
    Consent,
    Screenshot,
    PageSource,
    Close,
}

/// Counters shared between the launcher, its sessions and the test.
#[derive(Debug, Default)]
pub struct Counters {
    pub launched: AtomicUsize,
    pub closed: AtomicUsize,
    pub marker_polls: AtomicUsize,
    pub consent_polls: AtomicUsize,
}

impl Counters {
    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

pub struct FakeLauncher {
    pub fault: Fault,
    /// Marker shows up on this poll (1-based); `None` means never.
    pub marker_on_poll: Option<usize>,
    /// Consent button text visible on the page, if any.
    pub consent_button: Option<String>,
    pub html: String,
    pub counters: Arc<Counters>,
}

impl FakeLauncher {
    pub fn new(fault: Fault) -> Self {
        Self {
            fault,
            marker_on_poll: Some(1),
            consent_button: None,
            html: "<html><body>rendered</body></html>".to_string(),
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn never_renders(mut self) -> Self {
        self.marker_on_poll = None;
        self
    }

    pub fn renders_on_poll(mut self, poll: usize) -> Self {
        self.marker_on_poll = Some(poll);
        self
    }

    pub fn with_consent_button(mut self, text: &str) -> Self {
        self.consent_button = Some(text.to_string());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }
}

#[async_trait]
impl SessionLauncher for FakeLauncher {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn launch(
        &self,
        _config: &AcquisitionConfig,
    ) -> Result<Box<dyn BrowserSession>, SessionError> {
        if self.fault == Fault::Launch {
            return Err(SessionError::new("chromedriver not found"));
        }
        self.counters.launched.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            fault: self.fault,
            marker_on_poll: self.marker_on_poll,
            consent_button: self.consent_button.clone(),
            html: self.html.clone(),
            counters: Arc::clone(&self.counters),
            closed: false,
        }))
    }
}

pub struct FakeSession {
    fault: Fault,
    marker_on_poll: Option<usize>,
    consent_button: Option<String>,
    html: String,
    counters: Arc<Counters>,
    closed: bool,
}

impl FakeSession {
    fn check(&self, stage: Fault, what: &str) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::new("session used after close"));
        }
        if self.fault == stage {
            return Err(SessionError::new(format!("{what} exploded")));
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn prepare(&mut self, _config: &AcquisitionConfig) -> Result<(), SessionError> {
        self.check(Fault::Prepare, "prepare")
    }

    async fn navigate(&mut self, _url: &str) -> Result<(), SessionError> {
        self.check(Fault::Navigate, "navigation")
    }

    async fn click_first_matching(
        &mut self,
        patterns: &[String],
    ) -> Result<Option<String>, SessionError> {
        self.counters.consent_polls.fetch_add(1, Ordering::SeqCst);
        self.check(Fault::Consent, "consent click")?;
        Ok(self.consent_button.as_ref().and_then(|text| {
            patterns
                .iter()
                .find(|pattern| text.contains(pattern.as_str()))
                .cloned()
        }))
    }

    async fn has_class_marker(&mut self, _marker: &str) -> Result<bool, SessionError> {
        let poll = self.counters.marker_polls.fetch_add(1, Ordering::SeqCst) + 1;
        self.check(Fault::Wait, "marker query")?;
        Ok(self.marker_on_poll.is_some_and(|n| poll >= n))
    }

    async fn page_source(&mut self) -> Result<String, SessionError> {
        self.check(Fault::PageSource, "page source")?;
        Ok(self.html.clone())
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, SessionError> {
        self.check(Fault::Screenshot, "screenshot")?;
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        self.closed = true;
        if self.fault == Fault::Close {
            return Err(SessionError::new("browser already gone"));
        }
        Ok(())
    }
}

/// Observer that keeps a debug rendering of every event.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn contains(&self, needle: &str) -> bool {
        self.events
            .lock()
            .map(|events| events.iter().any(|e| e.contains(needle)))
            .unwrap_or(false)
    }
}

impl ScrapeObserver for RecordingObserver {
    fn on_event(&self, event: &ScrapeEvent<'_>) {
        if let Ok(mut events) = self.events.lock() {
            events.push(format!("{:?}", event));
        }
    }
}

/// Fast timings so timeouts are reached in milliseconds.
pub fn quick_config() -> AcquisitionConfig {
    AcquisitionConfig::default()
        .with_content_wait_timeout_ms(300)
        .with_consent_wait_timeout_ms(15)
        .with_poll_interval_ms(5)
        .with_settle_ms(0, 0)
}
