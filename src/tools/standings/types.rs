use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Class prefix of the standings table container. Acquisition waits for it too.
pub const DEFAULT_CONTAINER_MARKER: &str = "StandingsTable__Container";

/// Placeholder for a field whose selector matched nothing.
pub const NOT_AVAILABLE: &str = "N/A";

/// League name used when the title heading is missing.
pub const LEAGUE_NAME_NOT_FOUND: &str = "League Name Not Found";

/// Header labels accepted for the wins column.
pub const WINS_HEADER_LABELS: [&str; 2] = ["W", "Wins"];

/// Partial-match class markers for every part of the standings DOM.
///
/// Each marker is a substring of a generated class name; a selector built from
/// it matches elements whose class attribute *contains* the marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandingsSelectors {
    /// Matched on `h2` elements only.
    pub title_marker: String,
    pub container_marker: String,
    /// Matched on `a` elements only.
    pub row_marker: String,
    pub position_marker: String,
    pub team_name_marker: String,
    /// Statistic cells: played, wins, draws, losses, goals, points.
    pub cell_value_marker: String,
    pub header_cell_marker: String,
    pub form_container_marker: String,
    pub form_event_marker: String,
    pub win_marker: String,
    pub loss_marker: String,
    pub draw_marker: String,
    /// Position of "wins" among the cell values. Assumed, checked against
    /// header text only when the container exposes header cells.
    pub wins_column_index: usize,
}

impl Default for StandingsSelectors {
    fn default() -> Self {
        Self {
            title_marker: "u-text-truncate".into(),
            container_marker: DEFAULT_CONTAINER_MARKER.into(),
            row_marker: "StandingsRow__Link".into(),
            position_marker: "StandingsRow__Position".into(),
            team_name_marker: "StandingsRow__TeamName".into(),
            cell_value_marker: "StandingsRow__Value".into(),
            header_cell_marker: "StandingsHeader__Cell".into(),
            form_container_marker: "StandingsRow__Form".into(),
            form_event_marker: "FormEvent__Item".into(),
            win_marker: "FormEvent__win".into(),
            loss_marker: "FormEvent__loss".into(),
            draw_marker: "FormEvent__draw".into(),
            wins_column_index: 1,
        }
    }
}

/// One recent match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormResult {
    Win,
    Loss,
    Draw,
    Unknown,
}

impl FormResult {
    /// Classify from a serialized class attribute. Markers are tested win,
    /// loss, draw; the first hit wins.
    /// An empty marker matches nothing.
    pub fn classify(class_attr: &str, selectors: &StandingsSelectors) -> Self {
        let has = |marker: &str| !marker.is_empty() && class_attr.contains(marker);
        if has(&selectors.win_marker) {
            Self::Win
        } else if has(&selectors.loss_marker) {
            Self::Loss
        } else if has(&selectors.draw_marker) {
            Self::Draw
        } else {
            Self::Unknown
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Win => 'W',
            Self::Loss => 'L',
            Self::Draw => 'D',
            Self::Unknown => '?',
        }
    }
}

/// One table row. Fields stay text because the page may show placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub position: String,
    pub team_name: String,
    pub wins: String,
    /// In DOM order, never re-sorted.
    pub form: Vec<FormResult>,
    /// Not exposed per row by the page; always `N/A`.
    pub next_game_ref: String,
}

impl TeamRecord {
    /// Form as a compact string, e.g. `W L D`.
    pub fn form_symbols(&self) -> String {
        self.form
            .iter()
            .map(|f| f.symbol().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of checking the wins column against header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnCheck {
    /// Header at the wins index reads as a wins label.
    Verified,
    /// No header cells to check against.
    Unverified,
    /// Header at the wins index says something else (or is missing).
    Mismatch { found: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStandings {
    pub league_name: String,
    /// Table order as rendered. Never empty.
    pub teams: Vec<TeamRecord>,
    pub wins_column: ColumnCheck,
}

/// Extraction could not produce standings. Keeps whatever league name was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialFailure {
    pub error: ExtractionError,
    pub message: String,
    pub league_name: Option<String>,
    /// Always empty.
    pub teams: Vec<TeamRecord>,
}

impl PartialFailure {
    pub fn new(error: ExtractionError, league_name: Option<String>) -> Self {
        Self {
            message: error.to_string(),
            error,
            league_name,
            teams: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ExtractionOutcome {
    Success(LeagueStandings),
    PartialFailure(PartialFailure),
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn league_name(&self) -> Option<&str> {
        match self {
            Self::Success(standings) => Some(&standings.league_name),
            Self::PartialFailure(failure) => failure.league_name.as_deref(),
        }
    }

    pub fn into_result(self) -> Result<LeagueStandings, PartialFailure> {
        match self {
            Self::Success(standings) => Ok(standings),
            Self::PartialFailure(failure) => Err(failure),
        }
    }
}
