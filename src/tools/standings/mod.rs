mod utils;

pub mod types;

pub use types::*;
use utils::*;

use scraper::Html;

use crate::error::ExtractionError;

/// Extract league name and team rows from rendered standings HTML.
///
/// Never fails past this boundary. Layout mismatches (no container, no rows,
/// no teams) and parse faults come back as [`ExtractionOutcome::PartialFailure`]
/// carrying whatever league name was found.
///
/// Wins are read by position (`wins_column_index` among the row's cell
/// values). When the container has header cells the header at that index is
/// checked and the result recorded in [`LeagueStandings::wins_column`]; the
/// values themselves are never re-mapped.
///
/// # Examples
/// ```
/// use league_scrape::tools::standings::{extract_standings, StandingsSelectors};
///
/// let outcome = extract_standings("<html><body></body></html>", &StandingsSelectors::default());
/// assert!(!outcome.is_success());
/// ```
pub fn extract_standings(html: &str, markers: &StandingsSelectors) -> ExtractionOutcome {
    let compiled = match CompiledSelectors::compile(markers) {
        Ok(compiled) => compiled,
        Err(message) => {
            return ExtractionOutcome::PartialFailure(PartialFailure::new(
                ExtractionError::Parse { message },
                None,
            ))
        }
    };

    let document = Html::parse_document(html);

    let league_name = document
        .select(&compiled.title)
        .next()
        .map(element_text)
        .unwrap_or_else(|| LEAGUE_NAME_NOT_FOUND.to_string());

    let Some(container) = document.select(&compiled.container).next() else {
        return layout_mismatch(ExtractionError::TableNotFound, league_name);
    };

    let rows: Vec<_> = container.select(&compiled.row).collect();
    if rows.is_empty() {
        return layout_mismatch(ExtractionError::NoRows, league_name);
    }

    let teams: Vec<TeamRecord> = rows
        .into_iter()
        .map(|row| TeamRecord {
            position: first_text_or_na(row, &compiled.position),
            team_name: first_text_or_na(row, &compiled.team_name),
            wins: nth_text_or_na(row, &compiled.cell_value, markers.wins_column_index),
            form: row_form(row, &compiled, markers),
            next_game_ref: NOT_AVAILABLE.to_string(),
        })
        .collect();

    if teams.is_empty() {
        return layout_mismatch(ExtractionError::NoTeamData, league_name);
    }

    ExtractionOutcome::Success(LeagueStandings {
        league_name,
        teams,
        wins_column: check_wins_column(container, &compiled, markers.wins_column_index),
    })
}

fn layout_mismatch(error: ExtractionError, league_name: String) -> ExtractionOutcome {
    ExtractionOutcome::PartialFailure(PartialFailure::new(error, Some(league_name)))
}
