use crate::poll::survey_client::DEFAULT_BASE_URL;
use crate::poll::*;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveySettings {
    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,
    /// 1-based index of the page that receives the question.
    #[serde(rename = "pageIndex")]
    pub page_index: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(rename = "rosterSource")]
    pub roster_source: Option<FileSource>,
    #[serde(rename = "historySource")]
    pub history_source: Option<FileSource>,
    #[serde(rename = "tournamentDate")]
    pub tournament_date: Option<String>,
    #[serde(rename = "weeksBetweenReplay")]
    pub weeks_between_replay: Option<u32>,
    #[serde(default)]
    pub survey: SurveySettings,
}

impl PollConfig {
    pub fn roster_source(&self) -> PollResult<&FileSource> {
        self.roster_source.as_ref().context(MissingSettingSnafu {
            name: "rosterSource",
        })
    }

    pub fn tournament_date(&self) -> PollResult<&str> {
        self.tournament_date
            .as_deref()
            .context(MissingSettingSnafu {
                name: "tournamentDate",
            })
    }

    pub fn weeks_between_replay(&self) -> PollResult<u32> {
        self.weeks_between_replay.context(MissingSettingSnafu {
            name: "weeksBetweenReplay",
        })
    }

    pub fn base_url(&self) -> &str {
        self.survey.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn page_index(&self) -> PollResult<usize> {
        match self.survey.page_index {
            None => Ok(1),
            Some(0) => InvalidSettingSnafu {
                name: "pageIndex",
                value: "0",
            }
            .fail(),
            Some(x) => Ok(x),
        }
    }
}

/// Reads the configuration file, and returns it with the directory it lives in.
pub fn read_config(path: &str) -> PollResult<(PollConfig, PathBuf)> {
    let root_path = Path::new(path)
        .parent()
        .context(MissingParentDirSnafu {})?
        .to_path_buf();
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    Ok((parse_config(&contents)?, root_path))
}

pub fn parse_config(contents: &str) -> PollResult<PollConfig> {
    serde_json::from_str(contents).context(ParsingJsonSnafu {})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config() {
        let config = parse_config(
            r#"{
                "rosterSource": {"provider": "xlsx", "filePath": "games.xlsx", "excelWorksheetName": "Roster"},
                "historySource": {"provider": "csv", "filePath": "history.csv"},
                "tournamentDate": "01/06/24",
                "weeksBetweenReplay": 4,
                "survey": {"baseUrl": "http://localhost:8080/surveys", "pageIndex": 2}
            }"#,
        )
        .unwrap();
        let roster = config.roster_source().unwrap();
        assert_eq!(roster.provider, "xlsx");
        assert_eq!(roster.excel_worksheet_name.as_deref(), Some("Roster"));
        assert_eq!(config.tournament_date().unwrap(), "01/06/24");
        assert_eq!(config.weeks_between_replay().unwrap(), 4);
        assert_eq!(config.base_url(), "http://localhost:8080/surveys");
        assert_eq!(config.page_index().unwrap(), 2);
    }

    #[test]
    fn survey_defaults() {
        let config = parse_config(r#"{"tournamentDate": "01/06/24"}"#).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.page_index().unwrap(), 1);
        assert!(config.history_source.is_none());
    }

    #[test]
    fn missing_settings() {
        let config = PollConfig::default();
        assert!(matches!(
            config.roster_source(),
            Err(PollError::MissingSetting { .. })
        ));
        assert!(matches!(
            config.weeks_between_replay(),
            Err(PollError::MissingSetting { .. })
        ));
    }

    #[test]
    fn page_index_starts_at_one() {
        let config = parse_config(r#"{"survey": {"pageIndex": 0}}"#).unwrap();
        assert!(matches!(
            config.page_index(),
            Err(PollError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn missing_config_file() {
        assert!(matches!(
            read_config("/nonexistent/poll.json"),
            Err(PollError::OpeningJson { .. })
        ));
    }

    #[test]
    fn malformed_config() {
        assert!(matches!(
            parse_config(r#"{"weeksBetweenReplay": "four"}"#),
            Err(PollError::ParsingJson { .. })
        ));
    }
}
