use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use super::ViewState;
use crate::fetch::SwrCache;
use crate::tmdb::{poster_url, CastMember, MovieDetail, MovieSummary};

const CAST_SHOWN: usize = 5;
const SIMILAR_SHOWN: usize = 4;

/// What the detail page renders when data is available.
#[derive(Debug, Clone)]
pub struct DetailPage {
    pub title: String,
    pub tagline: Option<String>,
    pub homepage: Option<String>,
    pub overview: Option<String>,
    pub poster: Option<String>,
    pub release_date: Option<String>,
    /// First five cast members, upstream order.
    pub starring: Vec<CastMember>,
    /// First four similar titles, upstream order.
    pub similar: Vec<MovieSummary>,
}

/// Headless model for the movie detail page. The cache key derives from the
/// route's movie id and stays `None` until that parameter resolves, so no
/// request ever goes out with an undefined id.
pub struct DetailView {
    cache: Arc<SwrCache>,
    movie_id: Option<String>,
}

impl DetailView {
    pub fn new(cache: Arc<SwrCache>) -> Self {
        Self {
            cache,
            movie_id: None,
        }
    }

    /// Called once the router has resolved the `movieId` parameter.
    pub fn resolve_route(&mut self, movie_id: impl Into<String>) {
        self.movie_id = Some(movie_id.into());
    }

    pub fn key(&self) -> Option<String> {
        self.movie_id
            .as_ref()
            .map(|id| format!("/api/movies/{}", id))
    }

    pub fn state(&self) -> ViewState<DetailPage> {
        let key = self.key();
        let entry = self.cache.get(key.as_deref());

        if let Some(message) = entry.error {
            return ViewState::Error(message);
        }
        let Some(data) = entry.data else {
            return ViewState::Loading;
        };

        match parse_detail(data) {
            Ok(page) => ViewState::Ready(page),
            Err(message) => ViewState::Error(message),
        }
    }
}

fn parse_detail(data: Value) -> Result<DetailPage, String> {
    let detail: MovieDetail =
        serde_json::from_value(data).map_err(|e| format!("unreadable movie detail: {}", e))?;

    let mut starring = detail.credits.map(|c| c.cast).unwrap_or_default();
    starring.truncate(CAST_SHOWN);

    let mut similar = detail.similar.map(|s| s.results).unwrap_or_default();
    similar.truncate(SIMILAR_SHOWN);

    Ok(DetailPage {
        title: detail.title,
        tagline: detail.tagline,
        homepage: detail.homepage,
        overview: detail.overview,
        poster: detail.poster_path.as_deref().map(poster_url),
        release_date: detail.release_date.as_deref().map(display_date),
        starring,
        similar,
    })
}

/// "2008-07-16" -> "Wednesday, July 16, 2008". Unparseable dates pass
/// through unchanged.
fn display_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%A, %B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}
