use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NO_TITLE: &str = "タイトルなし";
pub const NO_DATE: &str = "日付なし";
pub const NO_LINK: &str = "#";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One article as delivered by the feed. Every field may be missing; the
/// `display_*` accessors apply the fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published_raw: Option<String>,
    pub published_parsed: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

impl FeedEntry {
    pub fn from_rss_item(item: &rss::Item) -> Self {
        let published_raw = item.pub_date().map(ToOwned::to_owned);
        let published_parsed = published_raw.as_deref().and_then(parse_published);

        Self {
            title: item.title().map(ToOwned::to_owned),
            link: item.link().map(ToOwned::to_owned),
            published_raw,
            published_parsed,
            description: item.description().map(ToOwned::to_owned),
        }
    }

    pub fn from_atom_entry(entry: &atom_syndication::Entry) -> Self {
        let link = entry
            .links()
            .iter()
            .find(|link| link.rel() == "alternate")
            .or_else(|| entry.links().first())
            .map(|link| link.href().to_owned());

        // Atom requires <updated>; <published> is optional but preferred.
        let published = entry.published().copied().unwrap_or(*entry.updated());

        let description = entry
            .summary()
            .map(|text| text.value.clone())
            .or_else(|| {
                entry
                    .content()
                    .and_then(|content| content.value().map(ToOwned::to_owned))
            });

        Self {
            title: Some(entry.title().value.clone()),
            link,
            published_raw: Some(published.to_rfc3339()),
            published_parsed: Some(published.with_timezone(&Utc)),
            description,
        }
    }

    pub fn display_title(&self) -> &str {
        non_empty(self.title.as_deref()).unwrap_or(NO_TITLE)
    }

    pub fn display_link(&self) -> &str {
        non_empty(self.link.as_deref()).unwrap_or(NO_LINK)
    }

    /// Parsed timestamp as `YYYY-MM-DD HH:MM` (UTC), else the raw feed
    /// text, else [`NO_DATE`].
    pub fn display_date(&self) -> String {
        if let Some(parsed) = self.published_parsed {
            return parsed.format(DATE_FORMAT).to_string();
        }
        non_empty(self.published_raw.as_deref())
            .unwrap_or(NO_DATE)
            .to_owned()
    }

    /// Description exactly as the feed sent it, markup included.
    pub fn summary_html(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
