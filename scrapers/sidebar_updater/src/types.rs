use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::America::New_York;

/// Score value used when a result could not be read from the page.
pub const UNRESOLVED_SCORE: i32 = -1;

/// One line of the team directory wiki page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDirectoryEntry {
    pub match_token: String,
    pub acronym: String,
    pub link: String,
    pub include: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelEntry {
    pub token: &'static str,
    pub link: &'static str,
    /// Station text must equal the token instead of just containing it.
    pub exact: bool,
    /// Including a national broadcaster suppresses the limited stream in the overflow slots.
    pub national: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompetitionEntry {
    pub token: &'static str,
    pub link: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conference {
    East,
    West,
}

impl Conference {
    pub fn tag(&self) -> &'static str {
        match self {
            Conference::East => "E",
            Conference::West => "W",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingsRow {
    pub conference: Conference,
    pub points: i32,
    pub games_played: i32,
    pub goals_for: i32,
    pub goal_difference: i32,
    pub wins: i32,
    pub team_name: String,
}

impl StandingsRow {
    pub fn new(conference: Conference) -> Self {
        Self {
            conference,
            points: 0,
            games_played: 0,
            goals_for: 0,
            goal_difference: 0,
            wins: 0,
            team_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedStandingsRow {
    pub row: StandingsRow,
    /// Position within the row's own conference, starting at 1.
    pub rank: u32,
}

impl RankedStandingsRow {
    pub fn rank_label(&self) -> String {
        format!("{}{}", self.row.conference.tag(), self.rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Scheduled,
    TimeToBeDetermined,
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Eastern Time wall clock date.
    pub kickoff_date: NaiveDate,
    /// Eastern Time wall clock kickoff, `None` while the time is undetermined.
    pub kickoff_time: Option<NaiveTime>,
    pub status: MatchStatus,
    pub home_team: String,
    pub away_team: String,
    pub home_score: i32,
    pub away_score: i32,
    pub competition: String,
    pub broadcast: String,
}

impl MatchRecord {
    pub fn kickoff_local(&self) -> NaiveDateTime {
        self.kickoff_date
            .and_time(self.kickoff_time.unwrap_or(NaiveTime::MIN))
    }

    pub fn kickoff_utc(&self) -> DateTime<Utc> {
        let local = self.kickoff_local();
        match New_York.from_local_datetime(&local).earliest() {
            Some(dt) => dt.with_timezone(&Utc),
            // Inside a DST gap; shift forward an hour like the clocks do.
            None => New_York
                .from_local_datetime(&(local + Duration::hours(1)))
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&local)),
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}
