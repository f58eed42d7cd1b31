use scraper::{Html, Selector};
use std::cmp::Ordering;
use tracing::{debug, error, warn};

use crate::config::StandingsConfig;
use crate::error::{Result, UpdateError};
use crate::fetch::PageFetcher;
use crate::types::{Conference, RankedStandingsRow, StandingsRow};
use crate::utils;

#[derive(Debug, Clone, Copy)]
enum Field {
    Points,
    GamesPlayed,
    GoalsFor,
    GoalDifference,
    Wins,
}

const NUMERIC_FIELDS: [(Field, &str); 5] = [
    (Field::Points, "Points"),
    (Field::GamesPlayed, "Games Played"),
    (Field::GoalsFor, "Goals For"),
    (Field::GoalDifference, "Goal Difference"),
    (Field::Wins, "Wins"),
];

impl Field {
    fn slot<'a>(&self, row: &'a mut StandingsRow) -> &'a mut i32 {
        match self {
            Field::Points => &mut row.points,
            Field::GamesPlayed => &mut row.games_played,
            Field::GoalsFor => &mut row.goals_for,
            Field::GoalDifference => &mut row.goal_difference,
            Field::Wins => &mut row.wins,
        }
    }
}

pub struct StandingsScraper<'a, F: PageFetcher> {
    fetcher: &'a F,
    url: String,
    config: StandingsConfig,
}

impl<'a, F: PageFetcher> StandingsScraper<'a, F> {
    pub fn new(fetcher: &'a F, url: &str, config: &StandingsConfig) -> Self {
        Self {
            fetcher,
            url: url.to_string(),
            config: config.clone(),
        }
    }

    pub fn fetch_standings(&self) -> Result<Vec<RankedStandingsRow>> {
        let html = self.fetcher.fetch_page(&self.url)?;
        let rows = parse_standings(&html, &self.config)?;
        Ok(rank_standings(rows, self.config.east_size))
    }
}

/// Reads the standings table into rows. Rows are assigned to conferences by
/// position: the first `east_size` rows are East, the rest West.
pub fn parse_standings(html: &str, config: &StandingsConfig) -> Result<Vec<StandingsRow>> {
    let document = Html::parse_document(html);
    let total = config.east_size + config.west_size;

    let mut rows: Vec<StandingsRow> = (0..total)
        .map(|i| {
            StandingsRow::new(if i < config.east_size {
                Conference::East
            } else {
                Conference::West
            })
        })
        .collect();

    for (field, title) in NUMERIC_FIELDS {
        let selector = Selector::parse(&format!("td[data-title='{}']", title)).unwrap();
        let cells: Vec<String> = document
            .select(&selector)
            .map(utils::own_text)
            .collect();

        if cells.is_empty() {
            return Err(UpdateError::MalformedSource(format!(
                "No '{}' cells in standings page",
                title
            )));
        }
        if cells.len() != total {
            return Err(UpdateError::MalformedSource(format!(
                "Found {} '{}' cells, expected {}",
                cells.len(),
                title,
                total
            )));
        }

        for (row, text) in rows.iter_mut().zip(&cells) {
            *field.slot(row) = text.parse::<i32>().map_err(|_| {
                UpdateError::MalformedSource(format!("Non-numeric '{}' value: {:?}", title, text))
            })?;
        }
    }

    let club_selector = Selector::parse("td[data-title='Club']").unwrap();
    let link_selector = Selector::parse("a").unwrap();
    let clubs: Vec<_> = document.select(&club_selector).collect();
    if clubs.len() != total {
        return Err(UpdateError::MalformedSource(format!(
            "Found {} club cells, expected {}",
            clubs.len(),
            total
        )));
    }

    for (row, club) in rows.iter_mut().zip(clubs) {
        match utils::longest_text(club, &link_selector) {
            Some(name) => row.team_name = name,
            None => warn!("Couldn't find team name"),
        }
    }

    debug!("Parsed {} standings rows", rows.len());
    Ok(rows)
}

/// Tiebreak cascade: points, wins, goal difference, goals for, all descending.
/// `Greater` means `a` ranks above `b`.
pub fn compare_rows(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    a.points
        .cmp(&b.points)
        .then(a.wins.cmp(&b.wins))
        .then(a.goal_difference.cmp(&b.goal_difference))
        .then(a.goals_for.cmp(&b.goals_for))
}

fn first_ranks_higher(first: &StandingsRow, second: &StandingsRow) -> bool {
    match compare_rows(first, second) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => {
            error!(
                "Ran out of tiebreakers between {} and {}",
                first.team_name, second.team_name
            );
            first.team_name <= second.team_name
        }
    }
}

/// Interleaves the two conference blocks into one table. Each block keeps its
/// own order; at every step the better of the two block heads is taken next.
pub fn rank_standings(rows: Vec<StandingsRow>, east_size: usize) -> Vec<RankedStandingsRow> {
    let east_size = east_size.min(rows.len());
    let total = rows.len();
    let mut ranked = Vec::with_capacity(total);
    let (mut east, mut west) = (0, east_size);

    while east < east_size || west < total {
        let take_east = if east == east_size {
            false
        } else if west == total {
            true
        } else {
            first_ranks_higher(&rows[east], &rows[west])
        };

        let (index, rank) = if take_east {
            east += 1;
            (east - 1, east)
        } else {
            west += 1;
            (west - 1, west - east_size)
        };
        ranked.push(RankedStandingsRow {
            row: rows[index].clone(),
            rank: rank as u32,
        });
    }

    ranked
}
