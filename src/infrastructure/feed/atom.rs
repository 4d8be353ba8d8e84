//! Atom 1.0 rendering

use atom_syndication::{
    CategoryBuilder, Entry, EntryBuilder, FeedBuilder, FixedDateTime, LinkBuilder, Text,
};

use super::{movie_link, PRICE_SCHEME};
use crate::config::FeedConfig;
use crate::domain::Movie;

pub const CONTENT_TYPE: &str = "application/atom+xml";

fn entry(config: &FeedConfig, movie: &Movie, updated: FixedDateTime) -> Entry {
    let link = movie_link(config, movie);
    let summary = movie.subtitle().or(movie.description()).map(Text::plain);

    EntryBuilder::default()
        .id(link.clone())
        .title(Text::plain(movie.title()))
        .updated(updated)
        .summary(summary)
        .links(vec![LinkBuilder::default()
            .href(link)
            .rel("alternate".to_string())
            .build()])
        .categories(vec![CategoryBuilder::default()
            .term(movie.price().to_string())
            .scheme(Some(PRICE_SCHEME.to_string()))
            .build()])
        .build()
}

/// Renders the movies as an Atom feed stamped with `updated`
pub fn render(config: &FeedConfig, movies: &[Movie], updated: FixedDateTime) -> String {
    FeedBuilder::default()
        .id(config.link.clone())
        .title(Text::plain(config.title.as_str()))
        .subtitle(Some(Text::plain(config.description.as_str())))
        .updated(updated)
        .links(vec![LinkBuilder::default()
            .href(config.link.clone())
            .rel("alternate".to_string())
            .build()])
        .entries(
            movies
                .iter()
                .map(|m| entry(config, m, updated))
                .collect::<Vec<_>>(),
        )
        .build()
        .to_string()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{MovieId, NewMovie, Price, StorageEntity};

    fn movie(id: i64, subtitle: Option<&str>, description: Option<&str>) -> Movie {
        Movie::from_draft(
            MovieId::new(id),
            NewMovie::new(
                "Mission Impossible",
                subtitle.map(String::from),
                Price::from_cents(34500).unwrap(),
                description.map(String::from),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_render_feed() {
        let config = FeedConfig::default();
        let xml = render(
            &config,
            &[movie(1, Some("Beyond Missions"), Some("This is"))],
            Utc::now().fixed_offset(),
        );

        let feed: atom_syndication::Feed = xml.parse().unwrap();
        assert_eq!(feed.title().as_str(), config.title);
        assert_eq!(feed.entries().len(), 1);

        let entry = &feed.entries()[0];
        assert_eq!(entry.title().as_str(), "Mission Impossible");
        assert_eq!(entry.id(), "http://localhost:9000/movies/1");
        assert_eq!(entry.summary().map(|s| s.as_str()), Some("Beyond Missions"));
        assert_eq!(entry.categories()[0].term(), "345.00");
        assert_eq!(entry.categories()[0].scheme(), Some("price"));
    }

    #[test]
    fn test_summary_falls_back_to_description() {
        let xml = render(
            &FeedConfig::default(),
            &[movie(3, None, Some("This is"))],
            Utc::now().fixed_offset(),
        );
        let feed: atom_syndication::Feed = xml.parse().unwrap();

        assert_eq!(
            feed.entries()[0].summary().map(|s| s.as_str()),
            Some("This is")
        );
    }
}
