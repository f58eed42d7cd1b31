use chrono::{NaiveDate, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::{Result, UpdateError};
use crate::fetch::PageFetcher;
use crate::types::{MatchRecord, MatchStatus, UNRESOLVED_SCORE};
use crate::utils;

const DATE_FORMAT: &str = "%A, %B %d, %Y";
const DATE_TIME_FORMAT: &str = "%A, %B %d, %Y %I:%M%p ET";
const UNDETERMINED_TIME: &str = "TBD";
/// Away opponents are listed as "at <team>" on the schedule page.
const AWAY_PREFIX_CHARS: usize = 3;

pub struct ScheduleScraper<'a, F: PageFetcher> {
    fetcher: &'a F,
    url: String,
    team_name: String,
}

impl<'a, F: PageFetcher> ScheduleScraper<'a, F> {
    pub fn new(fetcher: &'a F, url: &str, team_name: &str) -> Self {
        Self {
            fetcher,
            url: url.to_string(),
            team_name: team_name.to_string(),
        }
    }

    pub fn fetch_schedule(&self) -> Result<Vec<MatchRecord>> {
        let html = self.fetcher.fetch_page(&self.url)?;
        parse_schedule(&html, &self.team_name)
    }
}

struct RowSelectors {
    date: Selector,
    time: Selector,
    result: Selector,
    opponent: Selector,
    home_away: Selector,
    competition: Selector,
    broadcast: Selector,
}

impl RowSelectors {
    fn new() -> Self {
        Self {
            date: Selector::parse("div[class*='match_date']").unwrap(),
            time: Selector::parse("span[class*='match_time']").unwrap(),
            result: Selector::parse("span[class*='match_result']").unwrap(),
            opponent: Selector::parse("div[class*='match_matchup']").unwrap(),
            home_away: Selector::parse("span[class*='match_home_away']").unwrap(),
            competition: Selector::parse("span[class*='match_competition ']").unwrap(),
            broadcast: Selector::parse("div[class*='match_info']").unwrap(),
        }
    }
}

/// Parses the team schedule list. The page lists one team's games in
/// chronological order; `team_name` fills in the tracked side of each match.
pub fn parse_schedule(html: &str, team_name: &str) -> Result<Vec<MatchRecord>> {
    let document = Html::parse_document(html);
    let list_selector = Selector::parse("ul[class*='schedule_list']").unwrap();
    let row_selector = Selector::parse("ul[class*='schedule_list'] > li[class*='row']").unwrap();

    if document.select(&list_selector).next().is_none() {
        return Err(UpdateError::MalformedSource(
            "No schedule list in schedule page".to_string(),
        ));
    }

    let selectors = RowSelectors::new();
    let schedule: Vec<MatchRecord> = document
        .select(&row_selector)
        .filter_map(|row| parse_row(row, &selectors, team_name))
        .collect();

    debug!("Parsed {} matches from schedule", schedule.len());
    Ok(schedule)
}

fn parse_row(row: ElementRef, selectors: &RowSelectors, team_name: &str) -> Option<MatchRecord> {
    let Some(date_text) = utils::first_own_text(row, &selectors.date) else {
        warn!("Couldn't find date for match, skipping");
        return None;
    };
    let Some(time_text) = utils::first_own_text(row, &selectors.time) else {
        warn!("Couldn't find time for match, skipping");
        return None;
    };

    let (kickoff_date, kickoff_time, mut status) = if time_text.contains(UNDETERMINED_TIME) {
        match NaiveDate::parse_from_str(&date_text, DATE_FORMAT) {
            Ok(date) => (date, None, MatchStatus::TimeToBeDetermined),
            Err(e) => {
                warn!("Couldn't parse match date {:?}: {}, skipping", date_text, e);
                return None;
            }
        }
    } else {
        let combined = format!("{} {}", date_text, time_text);
        match NaiveDateTime::parse_from_str(&combined, DATE_TIME_FORMAT) {
            Ok(dt) => (dt.date(), Some(dt.time()), MatchStatus::Scheduled),
            Err(e) => {
                warn!("Couldn't parse match time {:?}: {}, skipping", combined, e);
                return None;
            }
        }
    };

    let (home_score, away_score) = match utils::first_own_text(row, &selectors.result) {
        Some(result) => {
            status = MatchStatus::Final;
            utils::parse_result_scores(&result)
        }
        None => (UNRESOLVED_SCORE, UNRESOLVED_SCORE),
    };

    let opponent = utils::first_own_text(row, &selectors.opponent);
    let home_away = utils::first_own_text(row, &selectors.home_away);
    let (Some(opponent), Some(home_away)) = (opponent, home_away) else {
        debug!("Could not find any opponent");
        return None;
    };

    let (home_team, away_team) = match home_away.as_str() {
        "H" => (team_name.to_string(), opponent),
        "A" => (
            opponent.chars().skip(AWAY_PREFIX_CHARS).collect::<String>().trim().to_string(),
            team_name.to_string(),
        ),
        other => {
            debug!("Could not find opponent, home/away marker {:?}", other);
            return None;
        }
    };

    Some(MatchRecord {
        kickoff_date,
        kickoff_time,
        status,
        home_team,
        away_team,
        home_score,
        away_score,
        competition: utils::first_own_text(row, &selectors.competition).unwrap_or_default(),
        broadcast: utils::first_own_text(row, &selectors.broadcast).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    const TEAM: &str = "New York Red Bulls";

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body><ul class=\"schedule_list clearfix\">{}</ul></body></html>",
            rows.join("")
        )
    }

    fn row(date: &str, time: &str, side: &str, opponent: &str, extra: &str) -> String {
        format!(
            "<li class=\"row match\">\
             <div class=\"match_date\">{date}</div>\
             <span class=\"match_time\">{time}</span>\
             <span class=\"match_home_away\">{side}</span>\
             <div class=\"match_matchup\">{opponent}</div>\
             {extra}</li>"
        )
    }

    #[test]
    fn test_parse_scheduled_home_match() {
        let html = page(&[row(
            "Saturday, March 4, 2017",
            "7:00PM ET",
            "H",
            "Atlanta United FC",
            "<span class=\"match_competition comp_mls\">MLS Regular Season</span>\
             <div class=\"match_info\">MSG, MLS LIVE</div>",
        )]);
        let schedule = parse_schedule(&html, TEAM).unwrap();

        assert_eq!(schedule.len(), 1);
        let game = &schedule[0];
        assert_eq!(game.kickoff_date, NaiveDate::from_ymd_opt(2017, 3, 4).unwrap());
        assert_eq!(game.kickoff_time, NaiveTime::from_hms_opt(19, 0, 0));
        assert_eq!(game.status, MatchStatus::Scheduled);
        assert_eq!(game.home_team, TEAM);
        assert_eq!(game.away_team, "Atlanta United FC");
        assert_eq!(game.competition, "MLS Regular Season");
        assert_eq!(game.broadcast, "MSG, MLS LIVE");
        assert_eq!((game.home_score, game.away_score), (-1, -1));
    }

    #[test]
    fn test_away_prefix_is_stripped() {
        let html = page(&[row("Sunday, March 12, 2017", "5:00PM ET", "A", "at Toronto FC", "")]);
        let schedule = parse_schedule(&html, TEAM).unwrap();
        assert_eq!(schedule[0].home_team, "Toronto FC");
        assert_eq!(schedule[0].away_team, TEAM);
        assert_eq!(schedule[0].competition, "");
        assert_eq!(schedule[0].broadcast, "");
    }

    #[test]
    fn test_tbd_time() {
        let html = page(&[row("Saturday, October 21, 2017", "TBD", "H", "Orlando City SC", "")]);
        let schedule = parse_schedule(&html, TEAM).unwrap();
        assert_eq!(schedule[0].status, MatchStatus::TimeToBeDetermined);
        assert_eq!(schedule[0].kickoff_time, None);
        assert_eq!(schedule[0].kickoff_date, NaiveDate::from_ymd_opt(2017, 10, 21).unwrap());
    }

    #[test]
    fn test_final_scores() {
        let html = page(&[
            row("Saturday, March 4, 2017", "7:00PM ET", "H", "Atlanta United FC",
                "<span class=\"match_result\">3 - 1</span>"),
            row("Saturday, March 11, 2017", "7:00PM ET", "A", "at Chicago Fire",
                "<span class=\"match_result\">W (forfeit)</span>"),
        ]);
        let schedule = parse_schedule(&html, TEAM).unwrap();
        assert_eq!(schedule[0].status, MatchStatus::Final);
        assert_eq!((schedule[0].home_score, schedule[0].away_score), (3, 1));
        assert_eq!(schedule[1].status, MatchStatus::Final);
        assert_eq!((schedule[1].home_score, schedule[1].away_score), (-1, -1));
    }

    #[test_log::test]
    fn test_incomplete_rows_are_skipped() {
        let html = page(&[
            "<li class=\"row\"><span class=\"match_time\">7:00PM ET</span></li>".to_string(),
            "<li class=\"row\"><div class=\"match_date\">Saturday, March 4, 2017</div></li>"
                .to_string(),
            row("Saturday, March 4, 2017", "7:00PM ET", "", "Bye week", ""),
            row("Saturday, March 4, 2017", "7:00PM ET", "N", "Neutral FC", ""),
            row("Not a date", "7:00PM ET", "H", "Somebody", ""),
            row("Saturday, March 18, 2017", "7:30PM ET", "H", "Columbus Crew SC", ""),
        ]);
        let schedule = parse_schedule(&html, TEAM).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].away_team, "Columbus Crew SC");
        assert_eq!(schedule[0].kickoff_time, NaiveTime::from_hms_opt(19, 30, 0));
    }

    #[test]
    fn test_missing_list_is_malformed() {
        let err = parse_schedule("<html><body><p>Not found</p></body></html>", TEAM).unwrap_err();
        assert!(matches!(err, UpdateError::MalformedSource(_)));
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        let schedule = parse_schedule(&page(&[]), TEAM).unwrap();
        assert!(schedule.is_empty());
    }
}
