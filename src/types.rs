use serde::{Deserialize, Serialize};

use crate::tools::acquire::AcquisitionFailure;
use crate::tools::standings::{ExtractionOutcome, LeagueStandings, PartialFailure};

/// Result of one `scrape(url)` call: the single decision point for callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeOutcome {
    Success(LeagueStandings),
    /// Page never rendered; extraction was skipped.
    AcquisitionFailed(AcquisitionFailure),
    /// Page rendered but did not match the expected layout.
    ExtractionFailed(PartialFailure),
}

impl ScrapeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn standings(&self) -> Option<&LeagueStandings> {
        match self {
            Self::Success(standings) => Some(standings),
            _ => None,
        }
    }

    /// League name, when one was found (also on extraction failures).
    pub fn league_name(&self) -> Option<&str> {
        match self {
            Self::Success(standings) => Some(&standings.league_name),
            Self::ExtractionFailed(failure) => failure.league_name.as_deref(),
            Self::AcquisitionFailed(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Success(_) => None,
            Self::AcquisitionFailed(failure) => Some(failure.message()),
            Self::ExtractionFailed(failure) => Some(failure.message.clone()),
        }
    }
}

impl From<ExtractionOutcome> for ScrapeOutcome {
    fn from(outcome: ExtractionOutcome) -> Self {
        match outcome {
            ExtractionOutcome::Success(standings) => Self::Success(standings),
            ExtractionOutcome::PartialFailure(failure) => Self::ExtractionFailed(failure),
        }
    }
}

impl From<AcquisitionFailure> for ScrapeOutcome {
    fn from(failure: AcquisitionFailure) -> Self {
        Self::AcquisitionFailed(failure)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(msg.into()),
        }
    }
    /// Failure that still carries a payload (e.g. the league name found so far).
    pub fn err_with(msg: impl Into<String>, data: T) -> Self {
        Self {
            ok: false,
            data: Some(data),
            error: Some(msg.into()),
        }
    }
}
