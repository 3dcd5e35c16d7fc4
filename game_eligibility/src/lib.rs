mod config;
pub mod manual;

use log::{debug, info};

pub use crate::config::*;

/// Exactly one week, in seconds.
pub const ONE_WEEK_SECONDS: i64 = 604_800;

/// Records that a game was played on the given `dd/mm/yy` date.
///
/// Fails without touching the game if the date does not validate.
pub fn record_play(game: &mut GameRecord, date: &str) -> Result<(), EligibilityError> {
    let played = PlayDate::parse(date)?;
    debug!("record_play: {:?} played on {}", game.name, played);
    game.record_play(played);
    Ok(())
}

/// Explains whether a game can be put in the poll of a given tournament.
///
/// Arguments:
/// * `game` the game to check
/// * `tournament_date` the date of the tournament the poll is for
/// * `weeks_between_replay` the minimum number of whole weeks between two plays
pub fn eligibility_reason(
    game: &GameRecord,
    tournament_date: &PlayDate,
    weeks_between_replay: u32,
) -> Eligibility {
    if game.setup_amount == 0 {
        return Eligibility::NoSetups;
    }
    match game.last_played_at() {
        None => Eligibility::Eligible,
        Some(last_played) => {
            let window = i64::from(weeks_between_replay) * ONE_WEEK_SECONDS;
            let eligible_after = last_played.timestamp().saturating_add(window);
            if tournament_date.timestamp() > eligible_after {
                Eligibility::Eligible
            } else {
                Eligibility::PlayedTooRecently { eligible_after }
            }
        }
    }
}

/// True when the game can be put in the poll of the tournament.
pub fn is_eligible(
    game: &GameRecord,
    tournament_date: &PlayDate,
    weeks_between_replay: u32,
) -> bool {
    eligibility_reason(game, tournament_date, weeks_between_replay) == Eligibility::Eligible
}

/// Keeps the games of the roster that can appear in the poll, in roster order.
///
/// The tournament date is validated before any game is looked at.
pub fn select_eligible(
    games: &[GameRecord],
    tournament_date: &str,
    weeks_between_replay: u32,
) -> Result<Vec<GameRecord>, EligibilityError> {
    let tournament = PlayDate::parse(tournament_date)?;
    info!(
        "Selecting among {:?} games for the tournament of {}, replay window: {} weeks",
        games.len(),
        tournament,
        weeks_between_replay
    );
    let mut res: Vec<GameRecord> = Vec::new();
    for game in games.iter() {
        let reason = eligibility_reason(game, &tournament, weeks_between_replay);
        debug!("select_eligible: {:?}: {:?}", game.name, reason);
        if reason == Eligibility::Eligible {
            res.push(game.clone());
        }
    }
    info!("{} eligible games", res.len());
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn names(games: &[GameRecord]) -> Vec<String> {
        games.iter().map(|g| g.name.clone()).collect()
    }

    #[test]
    fn parse_valid_dates() {
        for s in ["01/06/24", "29/02/24", "31/12/99", "15/08/00"] {
            assert!(PlayDate::parse(s).is_ok(), "{}", s);
        }
    }

    #[test]
    fn parse_rejects_bad_layout() {
        for s in [
            "1/06/24",
            "01/06/2024",
            "01-06-24",
            "010/6/24",
            "01/06/24 ",
            "",
            "aa/bb/cc",
            "31/02/24",
            "00/01/24",
            "01/13/24",
            "01/06/ 4",
            "01/ 6/24",
            " 1/06/24",
            "01/06/+4",
        ] {
            assert_eq!(
                PlayDate::parse(s),
                Err(EligibilityError::InvalidDateFormat {
                    input: s.to_string()
                }),
                "{}",
                s
            );
        }
    }

    #[test]
    fn dates_are_ordered_by_day() {
        let a = PlayDate::parse("01/05/24").unwrap();
        let b = PlayDate::parse("02/05/24").unwrap();
        assert_eq!(b.timestamp() - a.timestamp(), 86_400);
        assert_eq!(a.as_str(), "01/05/24");
    }

    #[test]
    fn record_play_sets_and_overwrites() {
        let mut chess = GameRecord::new("Chess", "strategy", 2);
        assert!(!chess.has_been_played());
        record_play(&mut chess, "01/05/24").unwrap();
        assert!(chess.has_been_played());
        record_play(&mut chess, "01/06/24").unwrap();
        assert_eq!(chess.last_played_at().map(|d| d.as_str()), Some("01/06/24"));
    }

    #[test]
    fn record_play_invalid_date_leaves_game_untouched() {
        let mut chess = GameRecord::new("Chess", "strategy", 2);
        assert!(record_play(&mut chess, "2024-05-01").is_err());
        assert!(!chess.has_been_played());
    }

    #[test]
    fn no_setups_never_eligible() {
        let tournament = PlayDate::parse("01/06/24").unwrap();
        let mut go = GameRecord::new("Go", "strategy", 0);
        assert!(!is_eligible(&go, &tournament, 0));
        record_play(&mut go, "01/01/20").unwrap();
        assert_eq!(eligibility_reason(&go, &tournament, 1), Eligibility::NoSetups);
    }

    #[test]
    fn never_played_is_eligible() {
        let tournament = PlayDate::parse("01/06/24").unwrap();
        let chess = GameRecord::new("Chess", "strategy", 1);
        assert!(is_eligible(&chess, &tournament, 1000));
    }

    #[test]
    fn replay_window_boundary_is_exclusive() {
        let mut chess = GameRecord::new("Chess", "strategy", 2);
        record_play(&mut chess, "01/05/24").unwrap();
        // Exactly 4 weeks later.
        let on_boundary = PlayDate::parse("29/05/24").unwrap();
        let after = PlayDate::parse("30/05/24").unwrap();
        let last = PlayDate::parse("01/05/24").unwrap();
        assert_eq!(
            eligibility_reason(&chess, &on_boundary, 4),
            Eligibility::PlayedTooRecently {
                eligible_after: last.timestamp() + 4 * ONE_WEEK_SECONDS
            }
        );
        assert!(is_eligible(&chess, &after, 4));
    }

    #[test]
    fn zero_weeks_only_excludes_same_day() {
        let mut chess = GameRecord::new("Chess", "strategy", 2);
        record_play(&mut chess, "01/05/24").unwrap();
        assert!(!is_eligible(&chess, &PlayDate::parse("01/05/24").unwrap(), 0));
        assert!(is_eligible(&chess, &PlayDate::parse("02/05/24").unwrap(), 0));
    }

    #[test]
    fn chess_and_go_without_history() {
        init();
        let roster = vec![
            GameRecord::new("Chess", "strategy", 2),
            GameRecord::new("Go", "strategy", 0),
        ];
        let res = select_eligible(&roster, "01/06/24", 4).unwrap();
        assert_eq!(names(&res), vec!["Chess"]);
    }

    #[test]
    fn chess_played_a_month_before() {
        init();
        let mut chess = GameRecord::new("Chess", "strategy", 2);
        record_play(&mut chess, "01/05/24").unwrap();
        let roster = vec![chess];
        assert!(select_eligible(&roster, "29/05/24", 4).unwrap().is_empty());
        // 31 days is more than 4 weeks.
        assert_eq!(
            names(&select_eligible(&roster, "01/06/24", 4).unwrap()),
            vec!["Chess"]
        );
        assert_eq!(
            names(&select_eligible(&roster, "01/07/24", 4).unwrap()),
            vec!["Chess"]
        );
    }

    #[test]
    fn selection_keeps_roster_order() {
        init();
        let mut roster = vec![
            GameRecord::new("Uno", "cards", 3),
            GameRecord::new("Catan", "eurogame", 0),
            GameRecord::new("Azul", "abstract", 1),
            GameRecord::new("Risk", "war", 1),
            GameRecord::new("Uno", "cards", 3),
        ];
        record_play(&mut roster[3], "20/05/24").unwrap();
        let res = select_eligible(&roster, "01/06/24", 2).unwrap();
        assert_eq!(names(&res), vec!["Uno", "Azul", "Uno"]);
        assert!(res.len() <= roster.len());
    }

    #[test]
    fn invalid_tournament_date_fails_fast() {
        let roster = vec![GameRecord::new("Chess", "strategy", 2)];
        assert_eq!(
            select_eligible(&roster, "1/6/2024", 4),
            Err(EligibilityError::InvalidDateFormat {
                input: "1/6/2024".to_string()
            })
        );
    }

    #[test]
    fn empty_roster_is_fine() {
        assert!(select_eligible(&[], "01/06/24", 4).unwrap().is_empty());
    }
}
