use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::OnceLock;

use crate::types::UNRESOLVED_SCORE;

/// Text nodes that are direct children of `element`, concatenated and trimmed.
pub fn own_text(element: ElementRef) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text().map(|t| t.to_string()))
        .collect::<String>()
        .trim()
        .to_string()
}

/// First non-blank direct text node under any element matched by `selector`.
pub fn first_own_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope.select(selector).find_map(|el| {
        el.children()
            .filter_map(|child| child.value().as_text())
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
            .map(str::to_string)
    })
}

/// Longest text among the elements matched by `selector` inside `scope`.
pub fn longest_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .fold(None, |longest: Option<String>, t| match longest {
            Some(l) if l.len() >= t.len() => Some(l),
            _ => Some(t),
        })
}

fn home_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)[^-]*-").unwrap())
}

fn away_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-\D*(\d+)").unwrap())
}

/// Reads `home - away` out of a result string. Each side falls back to
/// [`UNRESOLVED_SCORE`] on its own when it can't be found.
pub fn parse_result_scores(result: &str) -> (i32, i32) {
    let capture = |re: &Regex| {
        re.captures(result)
            .and_then(|cap| cap[1].parse::<i32>().ok())
            .unwrap_or(UNRESOLVED_SCORE)
    };
    (capture(home_score_re()), capture(away_score_re()))
}
