use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the media API. Unique per media type.
pub type MediaId = i64;

// ============================================================================
// Media Items
// ============================================================================

/// Decode an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single movie or series as returned by list and search endpoints.
///
/// Movies carry `title`/`release_date`, series carry `name`/`first_air_date`.
/// Fields the core does not interpret are kept in `extra` so they survive a
/// round trip through the store untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: MediaId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Set by the favourites reducer when the item is stored in the list.
    #[serde(default, rename = "isFavourite", deserialize_with = "null_as_default")]
    pub is_favourite: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MediaItem {
    /// Build a bare item with an id and a movie-style title.
    pub fn new(id: MediaId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Human-readable title: `title`, then `name`, then `original_name`.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .or(self.original_name.as_deref())
            .unwrap_or("Untitled")
    }

    /// Release or first-air date, whichever the item carries.
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .or(self.first_air_date.as_deref())
            .filter(|d| !d.is_empty())
    }
}

// ============================================================================
// Pages
// ============================================================================

/// One page of a paginated list response.
///
/// The wire shape is `{ results, page, total_pages }`; `results` is renamed to
/// `items` on the Rust side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    #[serde(rename = "results", default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, total_pages: u32) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }

    /// A single, final page. Handy when the total is unknown or irrelevant.
    pub fn single(items: Vec<T>) -> Self {
        Self::new(items, 1, 1)
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// Static description of a list endpoint.
///
/// The client appends `api_key`, `language` and `page`; `params` are
/// category-specific filters such as `with_genres`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub params: &'static [(&'static str, &'static str)],
    /// Append the configured `region` parameter.
    pub regional: bool,
    /// Restrict to titles released within the last month.
    pub recent_releases: bool,
}

impl Endpoint {
    pub const fn new(path: &'static str, params: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            path,
            params,
            regional: false,
            recent_releases: false,
        }
    }

    pub const fn regional(mut self) -> Self {
        self.regional = true;
        self
    }

    pub const fn recent_releases(mut self) -> Self {
        self.recent_releases = true;
        self
    }
}
