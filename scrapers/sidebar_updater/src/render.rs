//! Markdown for the sidebar region owned by the updater.
//!
//! The table layouts (including the odd line break inside upcoming rows) are
//! what the subreddit stylesheet targets, so they are reproduced byte for byte.

use chrono::NaiveDate;

use crate::directory::Directory;
use crate::fixtures::FixtureWindows;
use crate::types::{MatchRecord, MatchStatus, RankedStandingsRow};

pub struct Renderer<'a> {
    directory: &'a Directory,
    team_name: &'a str,
    standings_link: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(directory: &'a Directory, team_name: &'a str, standings_link: &'a str) -> Self {
        Self {
            directory,
            team_name,
            standings_link,
        }
    }

    pub fn render(
        &self,
        windows: &FixtureWindows,
        standings: &[RankedStandingsRow],
        today: NaiveDate,
    ) -> String {
        let mut out = String::new();
        out.push_str(&self.render_upcoming(&windows.upcoming));
        out.push_str(&self.render_previous(&windows.previous));
        out.push_str(&self.render_standings(standings, today));
        out
    }

    pub fn render_upcoming(&self, games: &[MatchRecord]) -> String {
        let mut out =
            String::from("##Upcoming Events\n\nDescription|Time (ET)|TV\n---|---:|:---:|---|\n");

        for game in games {
            let is_home = game.home_team == self.team_name;
            let (side, opponent) = if is_home {
                ("**Home**", &game.away_team)
            } else {
                ("*Away*", &game.home_team)
            };
            let (opponent_link, _) = self.directory.resolve_team(opponent, true, false);
            let time = match (game.status, game.kickoff_time) {
                (MatchStatus::TimeToBeDetermined, _) | (_, None) => "TBD".to_string(),
                (_, Some(time)) => time.format("%I:%M").to_string(),
            };

            out.push_str(&format!(
                "**{}**[]({})||{}|\n{}|{}|{}|\n",
                game.kickoff_date.format("%m/%d"),
                Directory::competition_link(&game.competition),
                side,
                opponent_link,
                time,
                Directory::resolve_channels(&game.broadcast, true),
            ));
        }

        out.push_str("\n\n");
        out
    }

    pub fn render_previous(&self, games: &[MatchRecord]) -> String {
        let mut out = String::from(
            "##Previous Results\n\nDate|Home|Result|Away\n:---:|:---:|:---:|:---:|\n",
        );

        for game in games {
            let is_home = game.home_team == self.team_name;
            let (home, _) = self.directory.resolve_team(&game.home_team, true, true);
            let (away, _) = self.directory.resolve_team(&game.away_team, true, true);
            let bold = |label: String, tracked: bool| {
                if tracked {
                    format!("**{}**", label)
                } else {
                    label
                }
            };

            out.push_str(&format!(
                "[{}]({})|{}|{}-{}|{}\n",
                game.kickoff_date.format("%m/%d"),
                Directory::competition_link(&game.competition),
                bold(home, is_home),
                game.home_score,
                game.away_score,
                bold(away, !is_home),
            ));
        }

        out.push_str("\n\n## MLS Standings\n\n");
        out
    }

    pub fn render_standings(&self, standings: &[RankedStandingsRow], today: NaiveDate) -> String {
        let mut out = format!(
            "**[Standings]({})**\n\n*{}*\n\nPos | Team | Pts | GP | GF | GD\n:--:|:--:|:--:|:--:|:--:|:--:\n",
            self.standings_link,
            today.format("%m/%d/%y"),
        );

        for ranked in standings {
            let team = &ranked.row;
            let (link, _) = self.directory.resolve_team(&team.team_name, false, false);
            out.push_str(&format!(
                "{} | {} | **{}** | {} | {} | {} |\n",
                ranked.rank_label(),
                link,
                team.points,
                team.games_played,
                team.goals_for,
                team.goal_difference,
            ));
        }

        out.push_str("\n\n\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Conference, StandingsRow, UNRESOLVED_SCORE};
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    const TEAM: &str = "New York Red Bulls";

    fn directory() -> Directory {
        Directory::parse(
            "contains|acronym|link|include\n\
             New York Red Bulls|NYRB|/r/rbny|include\n\
             Toronto FC|TOR|/r/TFC|include\n\
             Atlanta United|ATL|/r/AtlantaUnited|include",
        )
        .unwrap()
    }

    fn game(home: &str, away: &str, time: Option<NaiveTime>, status: MatchStatus) -> MatchRecord {
        MatchRecord {
            kickoff_date: NaiveDate::from_ymd_opt(2017, 3, 4).unwrap(),
            kickoff_time: time,
            status,
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: UNRESOLVED_SCORE,
            away_score: UNRESOLVED_SCORE,
            competition: "MLS Regular Season".to_string(),
            broadcast: "MSG, MLS LIVE".to_string(),
        }
    }

    #[test]
    fn test_upcoming_rows() {
        let dir = directory();
        let renderer = Renderer::new(&dir, TEAM, "http://www.mlssoccer.com/standings");
        let games = vec![
            game(
                TEAM,
                "Atlanta United FC",
                NaiveTime::from_hms_opt(19, 0, 0),
                MatchStatus::Scheduled,
            ),
            game("Toronto FC", TEAM, None, MatchStatus::TimeToBeDetermined),
        ];

        assert_eq!(
            renderer.render_upcoming(&games),
            "##Upcoming Events\n\nDescription|Time (ET)|TV\n---|---:|:---:|---|\n\
             **03/04**[](/MLS)||**Home**|\n[Atlanta United](/r/AtlantaUnited)|07:00|[](http://www.msgnetworks.com/teams/red-bulls/)|\n\
             **03/04**[](/MLS)||*Away*|\n[Toronto FC](/r/TFC)|TBD|[](http://www.msgnetworks.com/teams/red-bulls/)|\n\n\n"
        );
    }

    #[test]
    fn test_previous_rows_bold_tracked_side() {
        let dir = directory();
        let renderer = Renderer::new(&dir, TEAM, "http://www.mlssoccer.com/standings");
        let mut home_win = game(
            TEAM,
            "Atlanta United FC",
            NaiveTime::from_hms_opt(19, 0, 0),
            MatchStatus::Final,
        );
        home_win.home_score = 3;
        home_win.away_score = 1;
        let mut unknown = game(
            "Real Salt Lake",
            TEAM,
            NaiveTime::from_hms_opt(21, 0, 0),
            MatchStatus::Final,
        );
        unknown.competition = "Friendly".to_string();

        assert_eq!(
            renderer.render_previous(&[home_win, unknown]),
            "##Previous Results\n\nDate|Home|Result|Away\n:---:|:---:|:---:|:---:|\n\
             [03/04](/MLS)|**New York Red Bulls**|3-1|Atlanta United\n\
             [03/04]()||-1--1|**New York Red Bulls**\n\
             \n\n## MLS Standings\n\n"
        );
    }

    #[test]
    fn test_standings_table() {
        let dir = directory();
        let renderer = Renderer::new(&dir, TEAM, "http://www.mlssoccer.com/standings");
        let standings = vec![RankedStandingsRow {
            row: StandingsRow {
                conference: Conference::East,
                points: 30,
                games_played: 17,
                goals_for: 28,
                goal_difference: 5,
                wins: 9,
                team_name: "Toronto FC".to_string(),
            },
            rank: 1,
        }];

        assert_eq!(
            renderer.render_standings(&standings, NaiveDate::from_ymd_opt(2017, 7, 4).unwrap()),
            "**[Standings](http://www.mlssoccer.com/standings)**\n\n*07/04/17*\n\n\
             Pos | Team | Pts | GP | GF | GD\n:--:|:--:|:--:|:--:|:--:|:--:\n\
             E1 | [TOR](/r/TFC) | **30** | 17 | 28 | 5 |\n\n\n\n"
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let dir = directory();
        let renderer = Renderer::new(&dir, TEAM, "http://www.mlssoccer.com/standings");
        let windows = FixtureWindows {
            upcoming: vec![game(
                TEAM,
                "Toronto FC",
                NaiveTime::from_hms_opt(19, 30, 0),
                MatchStatus::Scheduled,
            )],
            previous: Vec::new(),
        };
        let today = NaiveDate::from_ymd_opt(2017, 3, 1).unwrap();

        let first = renderer.render(&windows, &[], today);
        assert_eq!(first, renderer.render(&windows, &[], today));
        assert!(first.starts_with("##Upcoming Events"));
        assert!(first.contains("|07:30|"));
    }
}
