//! Name and link resolution for teams, broadcasters and competitions.
//!
//! All three tables are ordered; the first entry that matches wins, so a more
//! specific token has to come before any broader token it contains.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, UpdateError};
use crate::types::{ChannelEntry, CompetitionEntry, TeamDirectoryEntry};

pub const CHANNELS: &[ChannelEntry] = &[
    ChannelEntry {
        token: "ESPN2",
        link: "http://espn.go.com/watchespn/index/_/sport/soccer-futbol/channel/espn2",
        exact: true,
        national: true,
    },
    ChannelEntry {
        token: "ESPN",
        link: "http://www.espn.com/watchespn/index/_/sport/soccer-futbol/channel/espn",
        exact: true,
        national: true,
    },
    ChannelEntry {
        token: "FS1",
        link: "http://msn.foxsports.com/foxsports1",
        exact: false,
        national: true,
    },
    ChannelEntry {
        token: "FS2",
        link: "https://en.wikipedia.org/wiki/Fox_Sports_2",
        exact: false,
        national: true,
    },
    ChannelEntry {
        token: "UDN",
        link: "http://www.univision.com/deportes/futbol/mls",
        exact: false,
        national: true,
    },
    ChannelEntry {
        token: "Univision",
        link: "http://www.univision.com/deportes/futbol/mls",
        exact: true,
        national: true,
    },
    ChannelEntry {
        token: "UniMás",
        link: "http://tv.univision.com/unimas",
        exact: false,
        national: true,
    },
    ChannelEntry {
        token: "facebook.com",
        link: "http://www.live.fb.com/",
        exact: false,
        national: false,
    },
    ChannelEntry {
        token: "FOX",
        link: "http://www.fox.com/",
        exact: true,
        national: true,
    },
    ChannelEntry {
        token: "beIN",
        link: "http://www.beinsport.tv/",
        exact: false,
        national: false,
    },
    ChannelEntry {
        token: "TSN",
        link: "#tsn",
        exact: false,
        national: false,
    },
    ChannelEntry {
        token: "MLS LIVE",
        link: "http://live.mlssoccer.com/mlsmdl",
        exact: false,
        national: false,
    },
];

/// The streaming package that is dropped from the overflow slots once a national
/// broadcaster is listed.
pub const LIMITED_CHANNEL: &str = "MLS LIVE";
/// Regional network shown in place of the limited stream for the tracked team's games.
pub const REGIONAL_LINK: &str = "http://www.msgnetworks.com/teams/red-bulls/";

pub const MAX_UNCONDITIONAL_CHANNELS: usize = 3;
pub const MAX_CHANNELS: usize = 6;

pub const COMPETITIONS: &[CompetitionEntry] = &[
    CompetitionEntry {
        token: "MLS",
        link: "/MLS",
    },
    CompetitionEntry {
        token: "Preseason",
        link: "/MLS",
    },
    CompetitionEntry {
        token: "CONCACAF",
        link: "http://category/champions-league/schedule-results",
    },
    CompetitionEntry {
        token: "Open Cup",
        link: "/MLS",
    },
];

const INCLUDE_LITERAL: &str = "include";

#[derive(Debug, Deserialize)]
struct WikiPage {
    data: WikiPageData,
}

#[derive(Debug, Deserialize)]
struct WikiPageData {
    content_md: String,
}

/// Team directory for a single update cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    teams: Vec<TeamDirectoryEntry>,
}

impl Directory {
    pub fn new(teams: Vec<TeamDirectoryEntry>) -> Self {
        Self { teams }
    }

    /// Parses the JSON wiki page wrapper served for the team directory.
    pub fn from_wiki_json(json: &str) -> Result<Self> {
        let page: WikiPage = serde_json::from_str(json)
            .map_err(|e| {
                UpdateError::DirectoryLoadFailure(format!("Invalid wiki page JSON: {}", e))
            })?;
        Self::parse(&page.data.content_md)
    }

    /// Parses `token|acronym|link|include` lines. The first line is a header.
    pub fn parse(text: &str) -> Result<Self> {
        let mut teams = Vec::new();

        for line in text.lines().skip(1) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('|').collect();
            if fields.len() < 4 {
                warn!("Couldn't parse team line: {}", line);
                continue;
            }
            if fields[0].is_empty() {
                warn!("Skipping team line with empty match token: {}", line);
                continue;
            }
            teams.push(TeamDirectoryEntry {
                match_token: fields[0].to_string(),
                acronym: fields[1].to_string(),
                link: fields[2].to_string(),
                include: fields[3] == INCLUDE_LITERAL,
            });
        }

        if teams.is_empty() {
            return Err(UpdateError::DirectoryLoadFailure(
                "No team entries found".to_string(),
            ));
        }

        debug!("Loaded {} team directory entries", teams.len());
        Ok(Self { teams })
    }

    pub fn teams(&self) -> &[TeamDirectoryEntry] {
        &self.teams
    }

    pub fn find_team(&self, name: &str) -> Option<&TeamDirectoryEntry> {
        let name = name.to_lowercase();
        self.teams
            .iter()
            .find(|team| name.contains(&team.match_token.to_lowercase()))
    }

    /// Returns the rendered label (a markdown link unless `name_only`) and the
    /// entry's include flag. Unknown names give `("", false)`.
    pub fn resolve_team(&self, name: &str, use_full_name: bool, name_only: bool) -> (String, bool) {
        match self.find_team(name) {
            Some(team) => {
                let label = if use_full_name { &team.match_token } else { &team.acronym };
                if name_only {
                    (label.clone(), team.include)
                } else {
                    (format!("[{}]({})", label, team.link), team.include)
                }
            }
            None => (String::new(), false),
        }
    }

    /// Links of the broadcasters named in a comma separated station list, in table order.
    pub fn channel_links(raw_stations: &str, prefer_alternate: bool) -> Vec<&'static str> {
        let stations: Vec<&str> = raw_stations.split(',').collect();
        let mut links = Vec::new();
        let mut included: Vec<&str> = Vec::new();
        let mut limited_allowed = true;

        for channel in CHANNELS {
            for station in &stations {
                if included.contains(&channel.token) {
                    continue;
                }
                let has_slot = links.len() < MAX_UNCONDITIONAL_CHANNELS
                    || (links.len() < MAX_CHANNELS
                        && (channel.token != LIMITED_CHANNEL || limited_allowed));
                if !has_slot {
                    continue;
                }
                let matched = if channel.exact {
                    station.trim() == channel.token
                } else {
                    station.contains(channel.token)
                };
                if !matched {
                    continue;
                }

                included.push(channel.token);
                links.push(if prefer_alternate && channel.token == LIMITED_CHANNEL {
                    REGIONAL_LINK
                } else {
                    channel.link
                });
                if channel.national {
                    limited_allowed = false;
                }
            }
        }

        links
    }

    pub fn resolve_channels(raw_stations: &str, prefer_alternate: bool) -> String {
        Self::channel_links(raw_stations, prefer_alternate)
            .into_iter()
            .map(|link| format!("[]({})", link))
            .collect()
    }

    pub fn competition_link(competition: &str) -> &'static str {
        COMPETITIONS
            .iter()
            .find(|comp| competition.contains(comp.token))
            .map(|comp| comp.link)
            .unwrap_or("")
    }
}
