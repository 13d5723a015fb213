use html2text::render::text_renderer::TrivialDecorator;
use tracing::debug;

use crate::feed::FeedEntry;
use crate::fetcher::NewsFetcher;

pub const COLUMN_COUNT: usize = 3;
pub const READ_MORE_LABEL: &str = "記事を読む";
pub const PROMPT_MESSAGE: &str = "検索キーワードを入力してください。";

// Wide enough that html2text never wraps; lines are joined afterwards anyway.
const TEXT_WIDTH: usize = 4096;

/// Display tuple for one entry, every field already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub date: String,
    pub title: String,
    pub summary: String,
    pub link: String,
}

impl Card {
    /// `#` is a placeholder, not a destination.
    pub fn is_navigable(&self) -> bool {
        self.link != crate::feed::NO_LINK
    }
}

impl From<&FeedEntry> for Card {
    fn from(entry: &FeedEntry) -> Self {
        Self {
            date: entry.display_date(),
            title: entry.display_title().to_owned(),
            summary: summary_text(entry.summary_html()),
            link: entry.display_link().to_owned(),
        }
    }
}

/// Reduces feed-supplied markup to a single line of plain text. Tags are
/// dropped and entities decoded; nothing from the feed is rendered as markup.
pub fn summary_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    let text =
        html2text::from_read_with_decorator(html.as_bytes(), TEXT_WIDTH, TrivialDecorator::new());
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deals items round-robin: item `i` lands in column `i % columns`.
pub fn distribute<T>(items: Vec<T>, columns: usize) -> Vec<Vec<T>> {
    let columns = columns.max(1);
    let mut grid: Vec<Vec<T>> = (0..columns).map(|_| Vec::new()).collect();
    for (idx, item) in items.into_iter().enumerate() {
        grid[idx % columns].push(item);
    }
    grid
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchView {
    /// No query text yet.
    Prompt,
    /// A fetch for `query` is in progress.
    Loading { query: String },
    NoResults { query: String },
    Grid { query: String, columns: Vec<Vec<Card>> },
}

impl SearchView {
    /// State to show while `query` is being searched; blank queries go
    /// straight to the prompt since they never fetch.
    pub fn pending(query: &str) -> Self {
        if is_blank(query) {
            Self::Prompt
        } else {
            Self::Loading {
                query: query.to_owned(),
            }
        }
    }

    pub fn from_entries(query: &str, entries: &[FeedEntry]) -> Self {
        if entries.is_empty() {
            return Self::NoResults {
                query: query.to_owned(),
            };
        }
        let cards = entries.iter().map(Card::from).collect();
        Self::Grid {
            query: query.to_owned(),
            columns: distribute(cards, COLUMN_COUNT),
        }
    }

    /// Status line for the non-grid states.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Prompt => Some(PROMPT_MESSAGE.to_owned()),
            Self::Loading { query } => Some(loading_message(query)),
            Self::NoResults { query } => Some(no_results_message(query)),
            Self::Grid { .. } => None,
        }
    }

    pub fn card_count(&self) -> usize {
        match self {
            Self::Grid { columns, .. } => columns.iter().map(Vec::len).sum(),
            _ => 0,
        }
    }
}

pub fn loading_message(query: &str) -> String {
    format!("'{query}' のニュースを取得中...")
}

pub fn no_results_message(query: &str) -> String {
    format!("'{query}' のニュースは見つかりませんでした。")
}

/// One request/render cycle. Blank queries short-circuit to the prompt
/// without touching the fetcher; anything else is fetched and cached under
/// the text exactly as typed.
pub async fn search(fetcher: &NewsFetcher, query: &str) -> SearchView {
    if is_blank(query) {
        debug!("empty query, skipping fetch");
        return SearchView::Prompt;
    }
    let entries = fetcher.fetch(query).await;
    SearchView::from_entries(query, &entries)
}

fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}
