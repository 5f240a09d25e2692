//! Pure rendering from API records to view models.
//!
//! Nothing here touches a surface, so every placeholder rule can be checked
//! without a terminal.

use jikan_client::{AnimeDetail, AnimeSummary, DateProp, MalEntity};

/// Placeholder for any missing value
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for an unknown count or date part
pub const UNKNOWN: &str = "?";

pub const NO_SYNOPSIS: &str = "No synopsis available.";
pub const NO_RESULTS: &str = "No anime found.";
pub const LIST_FAILED: &str = "Failed to load anime. Please try again later.";
pub const DETAIL_FAILED: &str = "Failed to load anime details. Please try again later.";

/// One result card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    /// Record to open when the card is selected
    pub mal_id: u32,
    pub title: String,
    pub kind: String,
    pub score: String,
    pub image: String,
}

/// Contents of the detail overlay
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub mal_id: u32,
    pub title: String,
    pub poster: String,
    /// Type, status, episode count, duration
    pub meta: Vec<String>,
    pub score: String,
    /// Present only when the vote count is known
    pub votes: Option<String>,
    pub synopsis: String,
    /// Label/value pairs of the details table
    pub rows: Vec<(&'static str, String)>,
    pub trailer: Option<String>,
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

/// Score as the API reports it, e.g. `9.1` or `8`
pub fn format_score(score: Option<f64>) -> String {
    score
        .map(|s| s.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Group digits in threes: `2046353` becomes `2,046,353`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `year-month-day`, with `?` for each missing component
pub fn format_premiere(date: Option<&DateProp>) -> String {
    let Some(date) = date else {
        return NOT_AVAILABLE.to_string();
    };
    if date.year.is_none() && date.month.is_none() && date.day.is_none() {
        return NOT_AVAILABLE.to_string();
    }

    let part = |value: Option<u32>| {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    };
    format!("{}-{}-{}", part(date.year), part(date.month), part(date.day))
}

fn join_names(entities: Option<&[MalEntity]>) -> String {
    match entities {
        Some(list) if !list.is_empty() => list
            .iter()
            .map(|e| e.name.as_deref().unwrap_or(NOT_AVAILABLE))
            .collect::<Vec<_>>()
            .join(", "),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Build the card for a list entry
pub fn card(anime: &AnimeSummary, placeholder_image: &str) -> CardView {
    CardView {
        mal_id: anime.mal_id,
        title: or_na(anime.title.as_deref()),
        kind: or_na(anime.anime_type.as_deref()),
        score: format_score(anime.score),
        image: anime
            .images
            .as_ref()
            .and_then(|i| i.poster())
            .unwrap_or(placeholder_image)
            .to_string(),
    }
}

/// Build the overlay contents for a full record
pub fn detail(anime: &AnimeDetail, placeholder_image: &str) -> DetailView {
    let episodes = anime
        .episodes
        .map(|e| e.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    DetailView {
        mal_id: anime.mal_id,
        title: or_na(anime.title.as_deref()),
        poster: anime
            .images
            .as_ref()
            .and_then(|i| i.large_poster())
            .unwrap_or(placeholder_image)
            .to_string(),
        meta: vec![
            or_na(anime.anime_type.as_deref()),
            or_na(anime.status.as_deref()),
            format!("{} eps", episodes),
            or_na(anime.duration.as_deref()),
        ],
        score: format_score(anime.score),
        votes: anime
            .scored_by
            .map(|n| format!("({} votes)", format_count(n))),
        synopsis: anime
            .synopsis
            .clone()
            .unwrap_or_else(|| NO_SYNOPSIS.to_string()),
        rows: vec![
            ("Japanese Title", or_na(anime.title_japanese.as_deref())),
            ("Genres", join_names(anime.genres.as_deref())),
            ("Studios", join_names(anime.studios.as_deref())),
            ("Premiered", format_premiere(anime.premiere())),
            ("Rating", or_na(anime.rating.as_deref())),
            ("Source", or_na(anime.source.as_deref())),
        ],
        trailer: anime.trailer_url().map(str::to_string),
    }
}
