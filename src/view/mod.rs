pub mod detail;
pub mod list;

pub use detail::{DetailPage, DetailView};
pub use list::{ListPage, ListView};

use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::fetch::{HttpFetcher, SwrCache};

/// Per-page render state. Error wins over data when both are present, so a
/// failed revalidation shows the error screen rather than quietly serving
/// stale data.
#[derive(Debug, Clone)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Wire the whole client pipeline from configuration: one HTTP fetcher with
/// the configured artificial delay, one shared cache, and both page models,
/// the list view debouncing at the configured quiescence window.
pub fn build_pages(base_url: &str, config: &ClientConfig) -> (ListView, DetailView) {
    let fetcher = Arc::new(HttpFetcher::new(base_url, config.fake_delay_ms));
    let cache = SwrCache::new(fetcher);
    let list = ListView::new(
        Arc::clone(&cache),
        Duration::from_millis(config.debounce_ms),
    );
    let detail = DetailView::new(cache);
    (list, detail)
}
