mod args;
mod poll;

use std::env;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{debug, warn};

use crate::args::Args;
use crate::poll::config_reader::{read_config, FileSource, PollConfig};
use crate::poll::{PollResult, TOKEN_ENV_VAR};

/// Reads the configuration file if any, then applies the command line options on top of it.
///
/// Returns the configuration and the directory the file paths are relative to.
fn config_from_args(args: &Args) -> PollResult<(PollConfig, PathBuf)> {
    let (mut config, root_path) = match &args.config {
        Some(path) => read_config(path)?,
        None => (PollConfig::default(), PathBuf::from(".")),
    };

    if let Some(roster) = &args.roster {
        config.roster_source = Some(FileSource {
            provider: args.roster_type.clone().unwrap_or_else(|| "csv".to_string()),
            file_path: roster.clone(),
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        });
    } else if let Some(source) = config.roster_source.as_mut() {
        if let Some(provider) = &args.roster_type {
            source.provider = provider.clone();
        }
        if args.excel_worksheet_name.is_some() {
            source.excel_worksheet_name = args.excel_worksheet_name.clone();
        }
    }
    if let Some(history) = &args.history {
        config.history_source = Some(FileSource {
            provider: "csv".to_string(),
            file_path: history.clone(),
            excel_worksheet_name: None,
        });
    }
    if args.tournament_date.is_some() {
        config.tournament_date = args.tournament_date.clone();
    }
    if args.weeks.is_some() {
        config.weeks_between_replay = args.weeks;
    }
    if args.page_index.is_some() {
        config.survey.page_index = args.page_index;
    }
    Ok((config, root_path))
}

fn run(args: &Args) -> PollResult<()> {
    let (config, root_path) = config_from_args(args)?;
    debug!("root path: {:?}", root_path);
    let token = args.token.clone().or_else(|| env::var(TOKEN_ENV_VAR).ok());
    poll::run_poll(&config, &root_path, token, args.dry_run)
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&args) {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured: {}", e);
        process::exit(1);
    }
}
