//! Jikan API v4 response types.
//!
//! These types represent the JSON responses from the Jikan API. Every leaf
//! the browser renders is optional so that sparse records never fail to
//! decode; missing values are replaced by placeholders at render time.

use serde::{Deserialize, Serialize};

/// Generic pagination wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Response of the ranking and search endpoints
pub type ListResponse = PaginatedResponse<AnimeSummary>;

/// Pagination metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub last_visible_page: Option<u32>,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub current_page: Option<u32>,
}

/// Single-record wrapper used by `/anime/{id}/full`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    pub data: AnimeDetail,
}

/// List entry returned by ranking and search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimeSummary {
    pub mal_id: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub images: Option<AnimeImages>,
    #[serde(rename = "type", default)]
    pub anime_type: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Full anime details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimeDetail {
    pub mal_id: u32,
    #[serde(default)]
    pub images: Option<AnimeImages>,

    // Titles
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_japanese: Option<String>,

    // Type and status
    #[serde(rename = "type", default)]
    pub anime_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,

    // Dates
    #[serde(default)]
    pub aired: Option<Aired>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,

    // Scores
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub scored_by: Option<u64>,

    #[serde(default)]
    pub synopsis: Option<String>,

    #[serde(default)]
    pub trailer: Option<Trailer>,

    #[serde(default)]
    pub genres: Option<Vec<MalEntity>>,
    #[serde(default)]
    pub studios: Option<Vec<MalEntity>>,
}

/// Anime images
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimeImages {
    #[serde(default)]
    pub jpg: Option<ImageSet>,
    #[serde(default)]
    pub webp: Option<ImageSet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub small_image_url: Option<String>,
    #[serde(default)]
    pub large_image_url: Option<String>,
}

/// Aired dates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Aired {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub prop: Option<AiredProp>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiredProp {
    #[serde(default)]
    pub from: Option<DateProp>,
    #[serde(default)]
    pub to: Option<DateProp>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateProp {
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub year: Option<u32>,
}

/// Promotional video
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trailer {
    #[serde(default)]
    pub youtube_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub embed_url: Option<String>,
}

/// MAL entity (genre, studio, producer, etc.)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MalEntity {
    #[serde(default)]
    pub mal_id: u32,
    #[serde(rename = "type", default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl AnimeImages {
    fn jpg(&self) -> Option<&ImageSet> {
        self.jpg.as_ref()
    }

    /// Regular poster URL
    pub fn poster(&self) -> Option<&str> {
        self.jpg().and_then(|set| set.image_url.as_deref())
    }

    /// Large poster URL, falling back to the regular one
    pub fn large_poster(&self) -> Option<&str> {
        self.jpg()
            .and_then(|set| set.large_image_url.as_deref())
            .or_else(|| self.poster())
    }
}

impl AnimeDetail {
    /// Components of the premiere date, if the API provided any
    pub fn premiere(&self) -> Option<&DateProp> {
        self.aired
            .as_ref()
            .and_then(|aired| aired.prop.as_ref())
            .and_then(|prop| prop.from.as_ref())
    }

    /// Trailer link, if one exists
    pub fn trailer_url(&self) -> Option<&str> {
        self.trailer.as_ref().and_then(|t| t.url.as_deref())
    }
}

/// Error response from Jikan API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanError {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: String,
}
