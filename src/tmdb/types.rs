use serde::{Deserialize, Deserializer, Serialize};

// The two image widths the app actually requests.
const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/w1280";
const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";

pub fn backdrop_url(path: &str) -> String {
    format!("{}{}", BACKDROP_BASE, path)
}

pub fn poster_url(path: &str) -> String {
    format!("{}{}", POSTER_BASE, path)
}

/// A paged TMDB listing (popular, search results, similar movies).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_results: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "coerce_popularity")]
    pub popularity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(default)]
    pub cast_id: Option<i64>,
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// The detail payload as composed server-side: the movie's own fields plus
/// the `credits` and `similar` sub-resources appended in the same response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "coerce_popularity")]
    pub popularity: f64,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub similar: Option<Page<MovieSummary>>,
}

/// Accept `popularity` as either a JSON number or a numeric string.
/// The upstream normally sends a number; the string form has been observed
/// in the wild, so the coercion is intentional, not accidental.
fn coerce_popularity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match Option::<NumOrStr>::deserialize(deserializer)? {
        Some(NumOrStr::Num(n)) => Ok(n),
        Some(NumOrStr::Str(s)) => Ok(s.trim().parse().unwrap_or(0.0)),
        None => Ok(0.0),
    }
}
