use log::{debug, info, warn};

use game_eligibility::*;
use snafu::{prelude::*, Snafu};

use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;

use crate::poll::config_reader::*;
use crate::poll::io_common::resolve_path;
use crate::poll::survey_client::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;
pub mod survey_client;

#[derive(Debug, Snafu)]
pub enum PollError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("JSON error: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Missing setting {name}"))]
    MissingSetting { name: String },
    #[snafu(display("Invalid value for setting {name}: {value}"))]
    InvalidSetting { name: String, value: String },
    #[snafu(display("Unknown provider {provider:?}"))]
    UnknownProvider { provider: String },

    #[snafu(display("Error opening file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading a line: {source}"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Line {lineno}: the number of setups {content:?} is not a non-negative integer"))]
    InvalidSetupAmount { lineno: usize, content: String },

    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook has no worksheet"))]
    EmptyExcel {},
    #[snafu(display("The workbook has no worksheet named {name:?}"))]
    MissingWorksheet { name: String },
    #[snafu(display("Line {lineno}: could not understand cell {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },

    #[snafu(display("Invalid tournament date: {source}"))]
    InvalidTournamentDate { source: EligibilityError },

    #[snafu(display("No access token: use --token or set SURVEY_ACCESS_TOKEN"))]
    MissingToken {},
    #[snafu(display("The access token cannot be sent in a header"))]
    InvalidToken {
        source: reqwest::header::InvalidHeaderValue,
    },
    #[snafu(display("Error creating the HTTP client: {source}"))]
    HttpClient { source: reqwest::Error },
    #[snafu(display("Request to {url} failed: {source}"))]
    Transport { source: reqwest::Error, url: String },
    #[snafu(display("The survey service returned an error:\n{body}"))]
    RemoteRequest { body: String },
    #[snafu(display("The response of the survey service has no field {field}"))]
    MissingResponseField { field: String },
}

pub type PollResult<T> = Result<T, PollError>;

/// The environment variable holding the access token of the survey service.
pub const TOKEN_ENV_VAR: &str = "SURVEY_ACCESS_TOKEN";

/// One row of the play history, as read by the loaders.
/// The date is not validated yet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedPlay {
    pub name: String,
    pub date: String,
}

fn read_roster(root_path: &Path, source: &FileSource) -> PollResult<Vec<GameRecord>> {
    let p = resolve_path(root_path, &source.file_path);
    info!("Attempting to read roster file {:?}", p);
    match source.provider.as_str() {
        "csv" => io_csv::read_csv_roster(&p),
        "xlsx" => io_xlsx::read_xlsx_roster(&p, source.excel_worksheet_name.as_deref()),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

fn read_history(root_path: &Path, source: &FileSource) -> PollResult<Vec<ParsedPlay>> {
    let p = resolve_path(root_path, &source.file_path);
    info!("Attempting to read play history file {:?}", p);
    match source.provider.as_str() {
        "csv" => io_csv::read_csv_history(&p),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

/// Marks the games of the roster as played.
///
/// Rows with an invalid date or naming a game outside the roster are dropped.
/// The rows are applied in order: the last valid row of a game wins.
pub fn apply_history(roster: &mut [GameRecord], history: &[ParsedPlay]) {
    for (idx, play) in history.iter().enumerate() {
        let game = match roster.iter_mut().find(|g| g.name == play.name) {
            Some(g) => g,
            None => {
                warn!(
                    "apply_history: row {}: {:?} is not in the roster, skipping",
                    idx, play.name
                );
                continue;
            }
        };
        if let Err(e) = record_play(game, &play.date) {
            warn!("apply_history: row {}: {}, skipping", idx, e);
        }
    }
}

/// Loads the roster and the play history, and keeps the eligible games.
pub fn select_games(config: &PollConfig, root_path: &Path) -> PollResult<Vec<GameRecord>> {
    let tournament_date = config.tournament_date()?;
    let weeks = config.weeks_between_replay()?;

    let mut roster = read_roster(root_path, config.roster_source()?)?;
    debug!("roster: {:?}", roster);

    if let Some(history_source) = &config.history_source {
        let history = read_history(root_path, history_source)?;
        debug!("history: {:?}", history);
        apply_history(&mut roster, &history);
    }

    select_eligible(&roster, tournament_date, weeks).context(InvalidTournamentDateSnafu {})
}

fn build_summary_js(config: &PollConfig, games: &[GameRecord]) -> JSValue {
    let eligible: Vec<JSValue> = games
        .iter()
        .map(|g| {
            json!({
                "name": g.name,
                "genre": g.genre,
                "setupAmount": g.setup_amount,
            })
        })
        .collect();
    json!({
        "tournamentDate": config.tournament_date,
        "weeksBetweenReplay": config.weeks_between_replay,
        "eligible": eligible,
        "question": question_body(games),
    })
}

/// Selects the games, then creates the survey and attaches the poll to it.
///
/// With `dry_run`, the selection and the question are printed instead and the
/// survey service is not contacted.
pub fn run_poll(
    config: &PollConfig,
    root_path: &Path,
    token: Option<String>,
    dry_run: bool,
) -> PollResult<()> {
    info!("config: {:?}", config);
    let games = select_games(config, root_path)?;
    if games.is_empty() {
        warn!("No game is eligible, the poll will have no choices");
    }

    if dry_run {
        let summary = build_summary_js(config, &games);
        let pretty = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
        println!("{}", pretty);
        return Ok(());
    }

    let token = token.context(MissingTokenSnafu {})?;
    let session = SurveySession::new(HttpTransport::new(&token)?, config.base_url());
    let draft = session.run_workflow(&games, config.page_index()?)?;
    info!(
        "Poll with {} games attached to survey {} (page {})",
        games.len(),
        draft.survey_id,
        draft.page_id
    );
    Ok(())
}
