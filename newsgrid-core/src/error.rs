use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid feed url: {0}")]
    Url(#[from] url::ParseError),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response status: {0}")]
    Status(StatusCode),
    #[error("feed body exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("feed parsing error: not RSS ({rss}) and not Atom ({atom})")]
    Parse {
        rss: rss::Error,
        atom: atom_syndication::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory available on this platform")]
    NoConfigDir,
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
}
