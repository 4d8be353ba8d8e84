//! Syndication feeds over the movie catalogue
//!
//! Both adapters are pure renderers: they take the page of movies the
//! caller fetched and produce a document, holding no state of their own.

pub mod atom;
pub mod rss;

use crate::config::FeedConfig;
use crate::domain::Movie;

/// Number of movies a feed renders, taken from the first page
pub const FEED_PAGE_SIZE: usize = 50;

/// Category scheme carrying the price of a movie
pub const PRICE_SCHEME: &str = "price";

/// Stable link identifying a movie in feeds
pub fn movie_link(config: &FeedConfig, movie: &Movie) -> String {
    format!("{}/movies/{}", config.link.trim_end_matches('/'), movie.id())
}
