pub mod client;
pub mod types;

pub use client::{TmdbClient, TmdbError};
pub use types::*;
