use chrono::{DateTime, Duration, Utc};

use crate::types::MatchRecord;

pub const WINDOW_SIZE: usize = 4;
/// A match stays "upcoming" until this long after kickoff.
pub const GRACE_HOURS: i64 = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureWindows {
    /// Next matches, soonest first.
    pub upcoming: Vec<MatchRecord>,
    /// Matches before the pivot, most recent first.
    pub previous: Vec<MatchRecord>,
}

/// Index of the first match still upcoming at `now`, if any.
pub fn find_pivot(matches: &[&MatchRecord], now: DateTime<Utc>) -> Option<usize> {
    matches
        .iter()
        .position(|m| m.kickoff_utc() + Duration::hours(GRACE_HOURS) > now)
}

pub fn select_windows(
    matches: &[MatchRecord],
    team_name: &str,
    now: DateTime<Utc>,
) -> FixtureWindows {
    let team_games: Vec<&MatchRecord> = matches.iter().filter(|m| m.involves(team_name)).collect();
    // With no pivot every game is in the past.
    let pivot = find_pivot(&team_games, now).unwrap_or(team_games.len());

    let upcoming = team_games[pivot..]
        .iter()
        .take(WINDOW_SIZE)
        .map(|m| (*m).clone())
        .collect();
    let previous = team_games[pivot.saturating_sub(WINDOW_SIZE)..pivot]
        .iter()
        .rev()
        .map(|m| (*m).clone())
        .collect();

    FixtureWindows { upcoming, previous }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MatchStatus, UNRESOLVED_SCORE};
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use pretty_assertions::assert_eq;

    const TEAM: &str = "New York Red Bulls";

    fn game(day: u32, opponent: &str) -> MatchRecord {
        MatchRecord {
            kickoff_date: NaiveDate::from_ymd_opt(2017, 6, day).unwrap(),
            kickoff_time: NaiveTime::from_hms_opt(19, 0, 0),
            status: MatchStatus::Scheduled,
            home_team: TEAM.to_string(),
            away_team: opponent.to_string(),
            home_score: UNRESOLVED_SCORE,
            away_score: UNRESOLVED_SCORE,
            competition: "MLS".to_string(),
            broadcast: String::new(),
        }
    }

    fn season() -> Vec<MatchRecord> {
        (1..=10).map(|day| game(day * 2, &format!("Opponent {}", day))).collect()
    }

    fn opponents(games: &[MatchRecord]) -> Vec<&str> {
        games.iter().map(|g| g.away_team.as_str()).collect()
    }

    #[test]
    fn test_mid_season_windows() {
        // 2017-06-10 20:00 EDT, an hour into the Opponent 5 game.
        let now = Utc.with_ymd_and_hms(2017, 6, 11, 0, 0, 0).unwrap();
        let windows = select_windows(&season(), TEAM, now);

        assert_eq!(
            opponents(&windows.upcoming),
            vec!["Opponent 5", "Opponent 6", "Opponent 7", "Opponent 8"]
        );
        assert_eq!(
            opponents(&windows.previous),
            vec!["Opponent 4", "Opponent 3", "Opponent 2", "Opponent 1"]
        );
    }

    #[test]
    fn test_grace_period_expires() {
        // 2017-06-10 21:01 EDT, just over two hours after kickoff.
        let now = Utc.with_ymd_and_hms(2017, 6, 11, 1, 1, 0).unwrap();
        let windows = select_windows(&season(), TEAM, now);
        assert_eq!(windows.upcoming[0].away_team, "Opponent 6");
        assert_eq!(windows.previous[0].away_team, "Opponent 5");
    }

    #[test]
    fn test_season_start_has_short_previous_window() {
        let now = Utc.with_ymd_and_hms(2017, 6, 5, 0, 0, 0).unwrap();
        let windows = select_windows(&season(), TEAM, now);
        assert_eq!(opponents(&windows.previous), vec!["Opponent 1"]);
        assert_eq!(windows.upcoming.len(), 4);
    }

    #[test]
    fn test_season_over_has_no_upcoming() {
        let now = Utc.with_ymd_and_hms(2017, 12, 1, 0, 0, 0).unwrap();
        let windows = select_windows(&season(), TEAM, now);
        assert!(windows.upcoming.is_empty());
        assert_eq!(
            opponents(&windows.previous),
            vec!["Opponent 10", "Opponent 9", "Opponent 8", "Opponent 7"]
        );
    }

    #[test]
    fn test_other_teams_are_ignored() {
        let mut matches = season();
        let mut other = game(3, "Somebody");
        other.home_team = "Seattle Sounders FC".to_string();
        matches.insert(1, other);

        let now = Utc.with_ymd_and_hms(2017, 6, 1, 0, 0, 0).unwrap();
        let windows = select_windows(&matches, TEAM, now);
        assert!(!opponents(&windows.upcoming).contains(&"Somebody"));
    }

    #[test]
    fn test_no_matches_gives_empty_windows() {
        let now = Utc::now();
        assert_eq!(select_windows(&[], TEAM, now), FixtureWindows::default());
        assert_eq!(select_windows(&season(), "Nobody FC", now), FixtureWindows::default());
    }
}
