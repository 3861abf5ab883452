#![doc = include_str!("../README.md")]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod observe;
pub mod runtime;
pub mod selectors;
pub mod tools;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ScrapeConfig;
pub use engine::*;
pub use error::{AcquisitionError, ConfigError, ExtractionError, SessionError};
pub use observe::{NoopObserver, ScrapeEvent, ScrapeObserver, TracingObserver};
pub use tools::acquire::{
    acquire, AcquisitionConfig, AcquisitionFailure, AcquisitionResult, BrowserSession,
    ChromiumLauncher, DebugCapture, DismissalOutcome, SessionLauncher,
};
pub use tools::standings::{
    extract_standings, ColumnCheck, ExtractionOutcome, FormResult, LeagueStandings,
    PartialFailure, StandingsSelectors, TeamRecord,
};
pub use types::*;
