pub mod cache;
pub mod config;
pub mod error;
pub mod feed;
pub mod fetcher;
pub mod query;
pub mod render;

pub use cache::{FeedCache, MemoryCache, SharedFeedCache, DEFAULT_CACHE_TTL};
pub use config::{AppConfig, FeedConfig, ThemeConfig, UiConfig};
pub use error::{ConfigError, FetchError};
pub use feed::{FeedEntry, NO_DATE, NO_LINK, NO_TITLE};
pub use fetcher::{parse_feed, FetchConfig, NewsFetcher};
pub use query::{feed_url, FeedLocale, DEFAULT_ENDPOINT, DEFAULT_QUERY};
pub use render::{distribute, search, Card, SearchView, COLUMN_COUNT, READ_MORE_LABEL};
