pub mod cache;
pub mod debounce;
pub mod delay;
pub mod fetcher;

pub use cache::{CacheEntry, SwrCache};
pub use debounce::Debouncer;
pub use delay::delay;
pub use fetcher::{Fetch, FetchError, HttpFetcher};
