// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use chrono::{Local, NaiveDate, TimeZone};

/// The only accepted layout for dates: day/month/2-digit year.
pub const DATE_FORMAT: &str = "%d/%m/%y";

const DATE_LEN: usize = 8;

/// A calendar date, as written in a play history or as the date of a tournament.
///
/// The only way to obtain one is through [`PlayDate::parse`], so any value of
/// this type has passed the `dd/mm/yy` validation. The timestamp is the
/// midnight of that day in the local time zone of the host.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct PlayDate {
    text: String,
    timestamp: i64,
}

impl PlayDate {
    /// Parses a date of the form `dd/mm/yy`.
    ///
    /// The string must be exactly 8 characters long with separators at
    /// positions 2 and 5, and describe a real calendar day.
    pub fn parse(date: &str) -> Result<PlayDate, EligibilityError> {
        let bytes = date.as_bytes();
        if bytes.len() != DATE_LEN {
            return Err(EligibilityError::invalid_date(date));
        }
        let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        });
        if !well_formed {
            return Err(EligibilityError::invalid_date(date));
        }
        let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| EligibilityError::invalid_date(date))?;
        let midnight = day
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| EligibilityError::invalid_date(date))?;
        // None when midnight falls in a DST gap of the host time zone.
        let local = Local
            .from_local_datetime(&midnight)
            .earliest()
            .ok_or_else(|| EligibilityError::invalid_date(date))?;
        Ok(PlayDate {
            text: date.to_string(),
            timestamp: local.timestamp(),
        })
    }

    /// Seconds since the unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}

impl Display for PlayDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// One entry of the roster.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GameRecord {
    pub name: String,
    /// Descriptive only, it plays no role in the selection.
    pub genre: String,
    /// Number of physical setups available. A game without any setup can
    /// never be scheduled.
    pub setup_amount: u32,
    last_played_at: Option<PlayDate>,
}

impl GameRecord {
    pub fn new(name: &str, genre: &str, setup_amount: u32) -> GameRecord {
        GameRecord {
            name: name.to_string(),
            genre: genre.to_string(),
            setup_amount,
            last_played_at: None,
        }
    }

    /// Records a play event. A previous date is overwritten, not accumulated.
    pub fn record_play(&mut self, date: PlayDate) {
        self.last_played_at = Some(date);
    }

    pub fn has_been_played(&self) -> bool {
        self.last_played_at.is_some()
    }

    pub fn last_played_at(&self) -> Option<&PlayDate> {
        self.last_played_at.as_ref()
    }
}

// ******** Output data structures *********

/// The outcome of checking one game against a tournament date.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Eligibility {
    Eligible,
    /// The game has no setup available.
    NoSetups,
    /// The game was played too recently. It becomes eligible for tournaments
    /// strictly after the given timestamp.
    PlayedTooRecently { eligible_after: i64 },
}

/// Errors raised while validating dates.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum EligibilityError {
    InvalidDateFormat { input: String },
}

impl EligibilityError {
    fn invalid_date(input: &str) -> EligibilityError {
        EligibilityError::InvalidDateFormat {
            input: input.to_string(),
        }
    }
}

impl Error for EligibilityError {}

impl Display for EligibilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EligibilityError::InvalidDateFormat { input } => write!(
                f,
                "invalid date {:?}: expected the format dd/mm/yy",
                input
            ),
        }
    }
}
