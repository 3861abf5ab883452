use serde::{Deserialize, Serialize};

use crate::error::AcquisitionError;
use crate::tools::standings::DEFAULT_CONTAINER_MARKER;

pub use super::profile::DESKTOP_CHROME_USER_AGENT;

/// Substrings identifying a consent/accept button, tried in order.
pub const DEFAULT_CONSENT_PATTERNS: [&str; 4] = ["I agree", "Accept all", "Accept", "Consent"];

const DEFAULT_CONTENT_WAIT_TIMEOUT_MS: u64 = 20_000;
const DEFAULT_CONSENT_WAIT_TIMEOUT_MS: u64 = 6_000;
const DEFAULT_POLL_INTERVAL_MS: u64 = 250;
const DEFAULT_CONSENT_SETTLE_MS: u64 = 1_200;
const DEFAULT_CONTENT_SETTLE_MS: u64 = 1_500;

/// Browser window size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Everything page acquisition needs to know about the browser and its waits.
///
/// Desktop viewport, desktop user agent and English locale all reduce the
/// chance of the site serving a mobile layout or a language interstitial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AcquisitionConfig {
    pub headless: bool,
    pub viewport: Viewport,
    pub user_agent: String,
    pub locale: String,
    /// Class substring whose presence means the standings have rendered.
    pub content_marker: String,
    pub content_wait_timeout_ms: u64,
    pub consent_wait_timeout_ms: u64,
    pub consent_text_patterns: Vec<String>,
    pub poll_interval_ms: u64,
    /// Pause after clicking a consent button.
    pub consent_settle_ms: u64,
    /// Pause after the content marker appears, for trailing async rendering.
    pub content_settle_ms: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport::default(),
            user_agent: DESKTOP_CHROME_USER_AGENT.to_string(),
            locale: "en-US".to_string(),
            content_marker: DEFAULT_CONTAINER_MARKER.to_string(),
            content_wait_timeout_ms: DEFAULT_CONTENT_WAIT_TIMEOUT_MS,
            consent_wait_timeout_ms: DEFAULT_CONSENT_WAIT_TIMEOUT_MS,
            consent_text_patterns: DEFAULT_CONSENT_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            consent_settle_ms: DEFAULT_CONSENT_SETTLE_MS,
            content_settle_ms: DEFAULT_CONTENT_SETTLE_MS,
        }
    }
}

impl AcquisitionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_content_marker(mut self, marker: impl Into<String>) -> Self {
        self.content_marker = marker.into();
        self
    }

    pub fn with_content_wait_timeout_ms(mut self, ms: u64) -> Self {
        self.content_wait_timeout_ms = ms;
        self
    }

    pub fn with_consent_wait_timeout_ms(mut self, ms: u64) -> Self {
        self.consent_wait_timeout_ms = ms;
        self
    }

    pub fn with_consent_text_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consent_text_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set both settle pauses at once (tests use zero).
    pub fn with_settle_ms(mut self, consent_ms: u64, content_ms: u64) -> Self {
        self.consent_settle_ms = consent_ms;
        self.content_settle_ms = content_ms;
        self
    }

    /// Primary language tag, e.g. `en` for `en-US`.
    pub fn language(&self) -> &str {
        self.locale.split(['-', '_']).next().unwrap_or(&self.locale)
    }

    /// Value for the `Accept-Language` header derived from the locale.
    pub fn accept_language(&self) -> String {
        let lang = self.language();
        if lang == self.locale {
            self.locale.clone()
        } else {
            format!("{},{};q=0.9", self.locale, lang)
        }
    }
}

/// A best-effort debug artifact: either captured or the reason it could not be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DebugCapture<T> {
    Captured(T),
    Unavailable(String),
}

impl<T> DebugCapture<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>, what: &str) -> Self {
        match result {
            Ok(value) => Self::Captured(value),
            Err(e) => Self::Unavailable(format!("{what} capture failed: {e}")),
        }
    }

    pub fn captured(&self) -> Option<&T> {
        match self {
            Self::Captured(value) => Some(value),
            Self::Unavailable(_) => None,
        }
    }
}

/// Acquisition gave up. Debug artifacts are only present on a wait timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionFailure {
    pub error: AcquisitionError,
    pub screenshot: Option<DebugCapture<Vec<u8>>>,
    pub page_source: Option<DebugCapture<String>>,
}

impl AcquisitionFailure {
    /// Failure without debug artifacts.
    pub fn new(error: AcquisitionError) -> Self {
        Self {
            error,
            screenshot: None,
            page_source: None,
        }
    }

    pub fn with_artifacts(
        error: AcquisitionError,
        screenshot: DebugCapture<Vec<u8>>,
        page_source: DebugCapture<String>,
    ) -> Self {
        Self {
            error,
            screenshot: Some(screenshot),
            page_source: Some(page_source),
        }
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn has_artifacts(&self) -> bool {
        self.screenshot.is_some() || self.page_source.is_some()
    }
}

/// Output of page acquisition: rendered HTML or a typed failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionResult {
    Html(String),
    Failure(AcquisitionFailure),
}

impl AcquisitionResult {
    pub fn failure(error: AcquisitionError) -> Self {
        Self::Failure(AcquisitionFailure::new(error))
    }

    pub fn into_result(self) -> Result<String, AcquisitionFailure> {
        match self {
            Self::Html(html) => Ok(html),
            Self::Failure(failure) => Err(failure),
        }
    }
}

/// What happened when we looked for a consent button. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DismissalOutcome {
    Clicked { pattern: String },
    NotFound,
    ClickFailed(String),
}
