//! RSS 2.0 rendering

use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, Item, ItemBuilder};

use super::{movie_link, PRICE_SCHEME};
use crate::config::FeedConfig;
use crate::domain::Movie;

pub const CONTENT_TYPE: &str = "application/rss+xml";

fn item(config: &FeedConfig, movie: &Movie) -> Item {
    let link = movie_link(config, movie);
    let description = movie.description().or(movie.subtitle()).map(String::from);

    ItemBuilder::default()
        .title(Some(movie.title().to_string()))
        .link(Some(link.clone()))
        .description(description)
        .guid(Some(GuidBuilder::default().value(link).permalink(true).build()))
        .categories(vec![CategoryBuilder::default()
            .name(movie.price().to_string())
            .domain(Some(PRICE_SCHEME.to_string()))
            .build()])
        .build()
}

/// Renders the movies as an RSS channel
pub fn render(config: &FeedConfig, movies: &[Movie]) -> String {
    ChannelBuilder::default()
        .title(config.title.clone())
        .link(config.link.clone())
        .description(config.description.clone())
        .items(movies.iter().map(|m| item(config, m)).collect::<Vec<_>>())
        .build()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MovieId, NewMovie, Price, StorageEntity};

    fn movie(id: i64, subtitle: Option<&str>, description: Option<&str>) -> Movie {
        Movie::from_draft(
            MovieId::new(id),
            NewMovie::new(
                "Mission Impossible",
                subtitle.map(String::from),
                Price::try_from(345.0).unwrap(),
                description.map(String::from),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_render_channel() {
        let config = FeedConfig::default();
        let xml = render(
            &config,
            &[movie(1, Some("Beyond Missions"), Some("This is"))],
        );

        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();
        assert_eq!(channel.title(), config.title);
        assert_eq!(channel.items().len(), 1);

        let item = &channel.items()[0];
        assert_eq!(item.title(), Some("Mission Impossible"));
        assert_eq!(item.description(), Some("This is"));
        assert_eq!(item.categories()[0].name(), "345.00");
        assert_eq!(item.categories()[0].domain(), Some("price"));
        assert_eq!(
            item.guid().map(|g| g.value()),
            Some("http://localhost:9000/movies/1")
        );
    }

    #[test]
    fn test_description_falls_back_to_subtitle() {
        let xml = render(&FeedConfig::default(), &[movie(2, Some("Fallout"), None)]);
        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();

        assert_eq!(channel.items()[0].description(), Some("Fallout"));
    }

    #[test]
    fn test_empty_channel() {
        let xml = render(&FeedConfig::default(), &[]);
        let channel = rss::Channel::read_from(xml.as_bytes()).unwrap();

        assert!(channel.items().is_empty());
    }
}
