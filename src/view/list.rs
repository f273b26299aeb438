use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use super::ViewState;
use crate::fetch::{Debouncer, SwrCache};
use crate::tmdb::{MovieSummary, Page};

pub const POPULAR_KEY: &str = "/api/movies";

/// What the list page renders when data is available.
#[derive(Debug, Clone)]
pub struct ListPage {
    pub movies: Vec<MovieSummary>,
    pub from_search: bool,
}

impl ListPage {
    /// The "(showing N most popular)" / "(showing N movies)" status line.
    pub fn tagline(&self) -> String {
        let source = if self.from_search {
            "movies"
        } else {
            "most popular"
        };
        format!("(showing {} {})", self.movies.len(), source)
    }
}

/// Headless model for the list+search page.
///
/// `local_term` tracks the input synchronously on every keystroke;
/// `committed_term` follows only after the debouncer's quiescence window, and
/// is what derives the search cache key. An empty committed term maps to a
/// `None` key, so no search request is made until the user has typed
/// something and paused.
pub struct ListView {
    cache: Arc<SwrCache>,
    local_term: String,
    committed_term: Arc<Mutex<String>>,
    debouncer: Debouncer<String>,
}

impl ListView {
    pub fn new(cache: Arc<SwrCache>, debounce: Duration) -> Self {
        let committed_term = Arc::new(Mutex::new(String::new()));
        let sink = Arc::clone(&committed_term);
        let debouncer = Debouncer::new(debounce, move |term: String| {
            *sink.lock().unwrap() = term;
        });

        Self {
            cache,
            local_term: String::new(),
            committed_term,
            debouncer,
        }
    }

    /// One keystroke: the visible input updates now, the committed term
    /// after the debounce window.
    pub fn on_input(&mut self, term: &str) {
        self.local_term = term.to_string();
        self.debouncer.schedule(term.to_string());
    }

    pub fn local_term(&self) -> &str {
        &self.local_term
    }

    pub fn committed_term(&self) -> String {
        self.committed_term.lock().unwrap().clone()
    }

    /// Search cache key, or `None` while the committed term is empty.
    pub fn search_key(&self) -> Option<String> {
        let term = self.committed_term();
        if term.is_empty() {
            None
        } else {
            Some(format!(
                "/api/movies/search?term={}",
                urlencoding::encode(&term)
            ))
        }
    }

    /// Render-time state. The popular listing is always requested; search
    /// results take over as the displayed list once a term is committed.
    /// Movies are sorted by popularity, highest first, at render time.
    pub fn state(&self) -> ViewState<ListPage> {
        let popular = self.cache.get(Some(POPULAR_KEY));

        let search_key = self.search_key();
        let from_search = search_key.is_some();
        let entry = match search_key {
            Some(key) => self.cache.get(Some(&key)),
            None => popular,
        };

        if let Some(message) = entry.error {
            return ViewState::Error(message);
        }
        let Some(data) = entry.data else {
            return ViewState::Loading;
        };

        match parse_listing(data) {
            Ok(mut movies) => {
                movies.sort_by(|a, b| {
                    b.popularity
                        .partial_cmp(&a.popularity)
                        .unwrap_or(Ordering::Equal)
                });
                ViewState::Ready(ListPage {
                    movies,
                    from_search,
                })
            }
            Err(message) => ViewState::Error(message),
        }
    }
}

fn parse_listing(data: Value) -> Result<Vec<MovieSummary>, String> {
    let page: Page<MovieSummary> =
        serde_json::from_value(data).map_err(|e| format!("unreadable movie listing: {}", e))?;
    Ok(page.results)
}
