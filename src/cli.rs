use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::observe::TracingObserver;
use crate::tools::acquire::{AcquisitionFailure, ChromiumLauncher, DebugCapture};
use crate::tools::standings::{ColumnCheck, LeagueStandings, TeamRecord};
use crate::{ApiResponse, Engine, ScrapeConfig, ScrapeOutcome};

#[derive(Parser)]
#[command(
    name = "league-scrape",
    version,
    about = "Scrape league standings from JavaScript-rendered pages"
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render each URL in a headless browser and extract its standings table
    Scrape(ScrapeArgs),
    /// Extract standings from saved HTML (a file path, or `-` for stdin)
    Parse(ParseArgs),
    /// Print the default configuration as JSON
    Config,
}

#[derive(Args)]
struct ScrapeArgs {
    urls: Vec<String>,
    /// Newline-delimited URL list
    #[arg(long = "urls", value_name = "FILE")]
    url_file: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Show the browser window
    #[arg(long)]
    headful: bool,
    /// Content wait timeout in milliseconds
    #[arg(long, value_name = "N")]
    timeout_ms: Option<u64>,
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write screenshots and page HTML of timed-out pages here
    #[arg(long, value_name = "DIR")]
    debug_dir: Option<PathBuf>,
}

#[derive(Args)]
struct ParseArgs {
    input: String,
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

/// Per-URL result payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeReport {
    url: String,
    scraped_at: DateTime<Utc>,
    league_name: Option<String>,
    teams: Vec<TeamRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wins_column: Option<ColumnCheck>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    debug_artifacts: Vec<PathBuf>,
}

impl ScrapeReport {
    fn new(url: &str, outcome: &ScrapeOutcome) -> Self {
        let standings = outcome.standings();
        Self {
            url: url.to_string(),
            scraped_at: Utc::now(),
            league_name: outcome.league_name().map(str::to_string),
            teams: standings.map(|s| s.teams.clone()).unwrap_or_default(),
            wins_column: standings.map(|s| s.wins_column.clone()),
            debug_artifacts: Vec::new(),
        }
    }
}

/// Parse arguments and run. Exit code is non-zero when any URL failed.
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Scrape(args) => scrape_cmd(args),
        Command::Parse(args) => parse_cmd(args),
        Command::Config => {
            print_json(&ScrapeConfig::default())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn scrape_cmd(args: ScrapeArgs) -> anyhow::Result<ExitCode> {
    let mut raw = args.urls.clone();
    if let Some(path) = &args.url_file {
        raw.extend(read_url_list(path)?);
    }
    let (urls, skipped) = partition_urls(raw);
    for line in &skipped {
        tracing::warn!(line = line.as_str(), "skipping invalid url");
    }
    if urls.is_empty() {
        bail!("no valid URLs to scrape");
    }

    let mut config = load_config(args.config.as_deref())?;
    if args.headful {
        config.acquisition.headless = false;
    }
    if let Some(ms) = args.timeout_ms {
        config.acquisition.content_wait_timeout_ms = ms;
    }
    if let Some(dir) = &args.debug_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating debug dir {}", dir.display()))?;
    }

    let engine = Engine::new(&ChromiumLauncher, &TracingObserver, config);
    let mut responses = Vec::with_capacity(urls.len());
    let mut all_ok = true;

    for (n, url) in urls.iter().enumerate() {
        let outcome = crate::runtime::block_on(engine.scrape(url));
        let mut report = ScrapeReport::new(url, &outcome);

        if let (Some(dir), ScrapeOutcome::AcquisitionFailed(failure)) =
            (&args.debug_dir, &outcome)
        {
            report.debug_artifacts = write_debug_artifacts(dir, n + 1, failure)?;
        }

        if args.format == Format::Table {
            print!("{}", render_outcome(url, &outcome));
        }

        responses.push(match outcome.error_message() {
            None => ApiResponse::ok(report),
            Some(message) => {
                all_ok = false;
                ApiResponse::err_with(message, report)
            }
        });
    }

    if args.format == Format::Json {
        print_json(&responses)?;
    }
    Ok(exit_code(all_ok))
}

fn parse_cmd(args: ParseArgs) -> anyhow::Result<ExitCode> {
    let html = read_input(&args.input)?;
    let config = load_config(args.config.as_deref())?;
    let engine = Engine::new(&ChromiumLauncher, &TracingObserver, config);
    let outcome = engine.extract(&html);

    match args.format {
        Format::Table => print!("{}", render_outcome(&args.input, &outcome)),
        Format::Json => {
            let report = ScrapeReport::new(&args.input, &outcome);
            let response = match outcome.error_message() {
                None => ApiResponse::ok(report),
                Some(message) => ApiResponse::err_with(message, report),
            };
            print_json(&response)?;
        }
    }
    Ok(exit_code(outcome.is_success()))
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ScrapeConfig> {
    match path {
        Some(path) => ScrapeConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ScrapeConfig::default()),
    }
}

/// Read a newline-delimited URL list, trimming lines and dropping blanks.
fn read_url_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading url list {}", path.display()))?;
    let urls: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    if urls.is_empty() {
        bail!("url list {} is empty", path.display());
    }
    Ok(urls)
}

/// Split into (valid http(s) URLs, rejected lines).
fn partition_urls(lines: Vec<String>) -> (Vec<String>, Vec<String>) {
    lines.into_iter().partition(|line| {
        url::Url::parse(line)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false)
    })
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading html from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {input}"))
    }
}

/// Write whatever debug artifacts the failure carries, numbered by URL order.
fn write_debug_artifacts(
    dir: &Path,
    n: usize,
    failure: &AcquisitionFailure,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    if let Some(capture) = &failure.screenshot {
        written.push(write_capture(dir, &format!("{n}-screenshot"), "png", capture)?);
    }
    if let Some(capture) = &failure.page_source {
        written.push(write_capture(dir, &format!("{n}-page"), "html", capture)?);
    }
    Ok(written)
}

fn write_capture<T: AsRef<[u8]>>(
    dir: &Path,
    stem: &str,
    ext: &str,
    capture: &DebugCapture<T>,
) -> anyhow::Result<PathBuf> {
    let (path, bytes): (PathBuf, &[u8]) = match capture {
        DebugCapture::Captured(data) => (dir.join(format!("{stem}.{ext}")), data.as_ref()),
        DebugCapture::Unavailable(reason) => (dir.join(format!("{stem}.txt")), reason.as_bytes()),
    };
    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn render_outcome(source: &str, outcome: &ScrapeOutcome) -> String {
    match outcome {
        ScrapeOutcome::Success(standings) => render_table(standings),
        _ => {
            let mut out = String::new();
            if let Some(league) = outcome.league_name() {
                out.push_str(&format!("League: {league}\n"));
            }
            out.push_str(&format!(
                "✗ {source}: {}\n\n",
                outcome.error_message().unwrap_or_default()
            ));
            out
        }
    }
}

fn render_table(standings: &LeagueStandings) -> String {
    let name_width = standings
        .teams
        .iter()
        .map(|t| t.team_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Team".len());

    let mut out = format!("League: {}\n", standings.league_name);
    out.push_str(&format!(
        "{:<8}  {:<name_width$}  {:>4}  {:<14}  {}\n",
        "Position", "Team", "Wins", "Form", "Next Game"
    ));
    for team in &standings.teams {
        out.push_str(&format!(
            "{:<8}  {:<name_width$}  {:>4}  {:<14}  {}\n",
            team.position,
            team.team_name,
            team.wins,
            team.form_symbols(),
            team.next_game_ref
        ));
    }
    out.push('\n');
    out
}

fn print_json<T: Serialize>(val: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AcquisitionError, ExtractionError};
    use crate::tools::standings::{FormResult, PartialFailure};
    use std::io::Write;

    fn team(position: &str, name: &str, wins: &str, form: Vec<FormResult>) -> TeamRecord {
        TeamRecord {
            position: position.into(),
            team_name: name.into(),
            wins: wins.into(),
            form,
            next_game_ref: "N/A".into(),
        }
    }

    #[test]
    fn url_list_trims_and_skips_blanks() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  https://a.example/one  \n\n\t\nhttps://b.example/two").unwrap();
        let urls = read_url_list(file.path()).unwrap();
        assert_eq!(urls, vec!["https://a.example/one", "https://b.example/two"]);
    }

    #[test]
    fn missing_or_empty_url_list_is_an_error() {
        assert!(read_url_list(Path::new("/definitely/not/here.txt")).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   \n\n").unwrap();
        let err = read_url_list(file.path()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn non_http_lines_are_rejected() {
        let (valid, skipped) = partition_urls(vec![
            "https://www.sofascore.com/tournament/football/x/1".into(),
            "not a url".into(),
            "ftp://files.example/table".into(),
            "http://plain.example".into(),
        ]);
        assert_eq!(valid.len(), 2);
        assert_eq!(skipped, vec!["not a url", "ftp://files.example/table"]);
    }

    #[test]
    fn table_lists_teams_in_order() {
        let standings = LeagueStandings {
            league_name: "Eredivisie".into(),
            teams: vec![
                team("1", "PSV", "12", vec![FormResult::Win, FormResult::Draw]),
                team("2", "Feyenoord", "10", vec![]),
            ],
            wins_column: ColumnCheck::Unverified,
        };
        let out = render_table(&standings);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "League: Eredivisie");
        assert!(lines[1].starts_with("Position"));
        assert!(lines[1].contains("Next Game"));
        assert!(lines[2].contains("PSV") && lines[2].contains("W D") && lines[2].ends_with("N/A"));
        assert!(lines[3].contains("Feyenoord"));
    }

    #[test]
    fn failure_banner_keeps_league_name() {
        let outcome = ScrapeOutcome::ExtractionFailed(PartialFailure::new(
            ExtractionError::NoRows,
            Some("Ligue 1".into()),
        ));
        let out = render_outcome("https://x.example", &outcome);
        assert!(out.starts_with("League: Ligue 1\n"));
        assert!(out.contains("table found but no rows"));
    }

    #[test]
    fn debug_artifacts_fall_back_to_reason_files() {
        let dir = tempfile::tempdir().unwrap();
        let failure = AcquisitionFailure::with_artifacts(
            AcquisitionError::WaitTimeout {
                marker: "StandingsTable__Container".into(),
                timeout_ms: 20_000,
            },
            DebugCapture::Unavailable("screenshot capture failed: tab crashed".into()),
            DebugCapture::Captured("<html></html>".into()),
        );

        let written = write_debug_artifacts(dir.path(), 3, &failure).unwrap();
        assert_eq!(
            written,
            vec![dir.path().join("3-screenshot.txt"), dir.path().join("3-page.html")]
        );
        let reason = std::fs::read_to_string(dir.path().join("3-screenshot.txt")).unwrap();
        assert!(reason.contains("tab crashed"));
    }

    #[test]
    fn failures_without_artifacts_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let failure = AcquisitionFailure::new(AcquisitionError::Navigation {
            message: "net::ERR_NAME_NOT_RESOLVED".into(),
        });
        assert!(write_debug_artifacts(dir.path(), 1, &failure).unwrap().is_empty());
    }

    #[test]
    fn report_serializes_camel_case() {
        let outcome = ScrapeOutcome::ExtractionFailed(PartialFailure::new(
            ExtractionError::TableNotFound,
            None,
        ));
        let report = ScrapeReport::new("https://x.example", &outcome);
        let json = serde_json::to_value(ApiResponse::err_with("boom", report)).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["data"]["url"], "https://x.example");
        assert!(json["data"]["scrapedAt"].is_string());
        assert!(json["data"]["leagueName"].is_null());
        assert!(json["data"].get("debugArtifacts").is_none());
    }
}
