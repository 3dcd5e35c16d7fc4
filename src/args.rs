use clap::Parser;

/// This program builds the poll of the games that can be played at the next tournament.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the run. The other options override its values.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The roster of the games: name, genre and number of setups.
    #[clap(short, long, value_parser)]
    pub roster: Option<String>,

    /// (default csv) The type of the roster file: csv or xlsx.
    #[clap(long, value_parser)]
    pub roster_type: Option<String>,

    /// (default: first worksheet) When the roster is an Excel file, the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, optional) The play history: game name and date of the play (dd/mm/yy).
    #[clap(long, value_parser)]
    pub history: Option<String>,

    /// (dd/mm/yy) The date of the tournament the poll is for.
    #[clap(short, long, value_parser)]
    pub tournament_date: Option<String>,

    /// The number of weeks before a game can be played again.
    #[clap(short, long, value_parser)]
    pub weeks: Option<u32>,

    /// (1-based, default 1) The page of the survey that receives the question.
    #[clap(long, value_parser)]
    pub page_index: Option<usize>,

    /// The access token of the survey service. Defaults to the SURVEY_ACCESS_TOKEN environment variable.
    #[clap(long, value_parser)]
    pub token: Option<String>,

    /// If passed as an argument, prints the eligible games and the question instead of creating the survey.
    #[clap(long, takes_value = false)]
    pub dry_run: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
