use url::Url;

use crate::error::FetchError;

pub const DEFAULT_ENDPOINT: &str = "https://news.google.com/rss/search";
pub const DEFAULT_QUERY: &str = "テスラモデルYスタンダード";

/// Edition parameters appended to every search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLocale {
    pub hl: String,
    pub gl: String,
    pub ceid: String,
}

impl Default for FeedLocale {
    fn default() -> Self {
        Self {
            hl: "ja".to_owned(),
            gl: "JP".to_owned(),
            ceid: "JP:ja".to_owned(),
        }
    }
}

/// Builds the search feed URL for `query`.
///
/// The query is form-encoded: spaces become `+` and every other reserved or
/// non-ASCII character is percent-encoded, so `&` or `#` inside the query
/// stay part of the search term.
pub fn feed_url(endpoint: &str, locale: &FeedLocale, query: &str) -> Result<Url, FetchError> {
    let url = Url::parse_with_params(
        endpoint,
        &[
            ("q", query),
            ("hl", locale.hl.as_str()),
            ("gl", locale.gl.as_str()),
            ("ceid", locale.ceid.as_str()),
        ],
    )?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_plus() {
        let url = feed_url(DEFAULT_ENDPOINT, &FeedLocale::default(), "tesla model y").unwrap();
        assert_eq!(
            url.as_str(),
            "https://news.google.com/rss/search?q=tesla+model+y&hl=ja&gl=JP&ceid=JP%3Aja"
        );
    }

    #[test]
    fn reserved_characters_stay_inside_the_query() {
        let url = feed_url(DEFAULT_ENDPOINT, &FeedLocale::default(), "a&b#c").unwrap();
        let q: Vec<_> = url.query_pairs().filter(|(k, _)| k == "q").collect();
        assert_eq!(q.len(), 1);
        assert_eq!(q[0].1, "a&b#c");
        assert!(url.fragment().is_none());
    }

    #[test]
    fn non_ascii_query_round_trips() {
        let url = feed_url(DEFAULT_ENDPOINT, &FeedLocale::default(), "テスラ").unwrap();
        let (_, q) = url.query_pairs().next().unwrap();
        assert_eq!(q, "テスラ");
    }
}
