//! Navigation state owned by the browse controller.

use crate::flight::SingleFlight;
use reqwest::Url;
use std::fmt;
use std::str::FromStr;

/// Filter value meaning "no restriction"
pub const ALL: &str = "all";

/// The catalog's own ordering
pub const NATIVE_SORT: &str = "score";

/// Browsing views plus free-text search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Top,
    Airing,
    Upcoming,
    Movie,
    Search,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Airing => "airing",
            Category::Upcoming => "upcoming",
            Category::Movie => "movie",
            Category::Search => "search",
        }
    }

    /// Heading shown above the grid
    pub fn title(&self) -> &'static str {
        match self {
            Category::Top => "Top Anime",
            Category::Airing => "Currently Airing",
            Category::Upcoming => "Upcoming Anime",
            Category::Movie => "Top Anime Movies",
            Category::Search => "Anime List",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Category::Top),
            "airing" => Ok(Category::Airing),
            "upcoming" => Ok(Category::Upcoming),
            "movie" | "movies" => Ok(Category::Movie),
            "search" => Ok(Category::Search),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Which filter a value applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Type,
    Genre,
    Sort,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Type => "type",
            FilterKind::Genre => "genre",
            FilterKind::Sort => "sort",
        }
    }
}

/// Active filter selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub anime_type: String,
    pub genre: String,
    pub sort: String,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            anime_type: ALL.to_string(),
            genre: ALL.to_string(),
            sort: NATIVE_SORT.to_string(),
        }
    }
}

impl Filters {
    pub fn get(&self, kind: FilterKind) -> &str {
        match kind {
            FilterKind::Type => &self.anime_type,
            FilterKind::Genre => &self.genre,
            FilterKind::Sort => &self.sort,
        }
    }

    pub fn set(&mut self, kind: FilterKind, value: &str) {
        let slot = match kind {
            FilterKind::Type => &mut self.anime_type,
            FilterKind::Genre => &mut self.genre,
            FilterKind::Sort => &mut self.sort,
        };
        *slot = value.to_string();
    }
}

/// The part of the state that determines which list URL to request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub category: Category,
    pub page: u32,
    pub filters: Filters,
    /// Search text; only meaningful for [`Category::Search`]
    pub query: String,
}

impl Navigation {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            page: 1,
            filters: Filters::default(),
            query: String::new(),
        }
    }

    /// Heading for the current view
    pub fn title(&self) -> String {
        match self.category {
            Category::Search => format!("Search Results for \"{}\"", self.query),
            other => other.title().to_string(),
        }
    }
}

/// Browse state: navigation plus pagination and loading bookkeeping
#[derive(Debug)]
pub struct BrowseState {
    pub nav: Navigation,
    pub has_more: bool,
    pub(crate) list: SingleFlight<Url>,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseState {
    pub fn new() -> Self {
        Self {
            nav: Navigation::new(Category::Top),
            has_more: true,
            list: SingleFlight::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.nav.category
    }

    pub fn page(&self) -> u32 {
        self.nav.page
    }

    pub fn filters(&self) -> &Filters {
        &self.nav.filters
    }

    /// True while a list request is in flight
    pub fn is_loading(&self) -> bool {
        self.list.is_busy()
    }
}
