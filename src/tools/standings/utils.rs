use scraper::{ElementRef, Selector};

use super::types::*;
use crate::selectors::class_contains;
use crate::tools::clean::clean_text;

/// Selectors compiled once per extraction from a [`StandingsSelectors`].
pub(super) struct CompiledSelectors {
    pub title: Selector,
    pub container: Selector,
    pub row: Selector,
    pub position: Selector,
    pub team_name: Selector,
    pub cell_value: Selector,
    pub header_cell: Selector,
    pub form_event: Selector,
}

impl CompiledSelectors {
    pub fn compile(markers: &StandingsSelectors) -> Result<Self, String> {
        // Form result markers are matched as substrings, never parsed as CSS
        non_empty("win", &markers.win_marker)?;
        non_empty("loss", &markers.loss_marker)?;
        non_empty("draw", &markers.draw_marker)?;
        non_empty("form container", &markers.form_container_marker)?;
        non_empty("form event", &markers.form_event_marker)?;

        Ok(Self {
            title: parse("h2", &markers.title_marker)?,
            container: parse("", &markers.container_marker)?,
            row: parse("a", &markers.row_marker)?,
            position: parse("", &markers.position_marker)?,
            team_name: parse("", &markers.team_name_marker)?,
            cell_value: parse("", &markers.cell_value_marker)?,
            header_cell: parse("", &markers.header_cell_marker)?,
            form_event: parse_css(&format!(
                "{} {}",
                class_contains("", &markers.form_container_marker),
                class_contains("", &markers.form_event_marker)
            ))?,
        })
    }
}

fn parse(tag: &str, marker: &str) -> Result<Selector, String> {
    if marker.trim().is_empty() {
        return Err(format!("empty class marker for '{}' selector", tag_label(tag)));
    }
    parse_css(&class_contains(tag, marker))
}

fn non_empty(field: &str, marker: &str) -> Result<(), String> {
    if marker.trim().is_empty() {
        Err(format!("empty {field} marker"))
    } else {
        Ok(())
    }
}

fn parse_css(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("invalid selector `{css}`: {e:?}"))
}

fn tag_label(tag: &str) -> &str {
    if tag.is_empty() {
        "*"
    } else {
        tag
    }
}

/// Cleaned text content of an element.
pub(super) fn element_text(el: ElementRef<'_>) -> String {
    clean_text(&el.text().collect::<String>())
}

/// Text of the first descendant matching `selector`, or `N/A`.
pub(super) fn first_text_or_na(row: ElementRef<'_>, selector: &Selector) -> String {
    row.select(selector)
        .next()
        .map(element_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Text of the `index`-th descendant matching `selector`, or `N/A`.
pub(super) fn nth_text_or_na(row: ElementRef<'_>, selector: &Selector, index: usize) -> String {
    row.select(selector)
        .nth(index)
        .map(element_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Form results of a row in encounter order.
pub(super) fn row_form(
    row: ElementRef<'_>,
    compiled: &CompiledSelectors,
    markers: &StandingsSelectors,
) -> Vec<FormResult> {
    row.select(&compiled.form_event)
        .map(|event| FormResult::classify(event.value().attr("class").unwrap_or(""), markers))
        .collect()
}

/// Compare the header cell at the wins index with the accepted wins labels.
pub(super) fn check_wins_column(
    container: ElementRef<'_>,
    compiled: &CompiledSelectors,
    index: usize,
) -> ColumnCheck {
    let headers: Vec<String> = container.select(&compiled.header_cell).map(element_text).collect();
    if headers.is_empty() {
        return ColumnCheck::Unverified;
    }

    match headers.get(index) {
        Some(label)
            if WINS_HEADER_LABELS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(label)) =>
        {
            ColumnCheck::Verified
        }
        Some(label) => ColumnCheck::Mismatch {
            found: label.clone(),
        },
        None => ColumnCheck::Mismatch {
            found: format!("only {} header cells", headers.len()),
        },
    }
}
