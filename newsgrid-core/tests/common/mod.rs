#![allow(dead_code)]

use std::time::Duration;

use newsgrid_core::{FetchConfig, MemoryCache, NewsFetcher};
use reqwest::Client;
use wiremock::MockServer;

pub const FEED_PATH: &str = "/rss/search";

pub fn sample_rss() -> String {
    r##"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"テスラ" - Google ニュース</title>
    <link>https://news.google.com/search?q=%E3%83%86%E3%82%B9%E3%83%A9</link>
    <description>Google ニュース</description>
    <item>
      <title>モデルY スタンダード発表 - Example News</title>
      <link>https://news.example.com/articles/1</link>
      <guid isPermaLink="false">1</guid>
      <pubDate>Mon, 21 Oct 2024 07:28:00 GMT</pubDate>
      <description>&lt;a href="https://news.example.com/articles/1" target="_blank"&gt;モデルY スタンダード発表&lt;/a&gt;&amp;nbsp;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Example News&lt;/font&gt;</description>
    </item>
    <item>
      <title>値下げの影響 - Another Source</title>
      <link>https://another.example.org/2</link>
      <guid isPermaLink="false">2</guid>
      <pubDate>Mon, 21 Oct 2024 08:00:00 GMT</pubDate>
      <description>Second</description>
    </item>
  </channel>
</rss>"##
        .to_string()
}

pub fn empty_rss() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>empty</title><link>http://example.com/</link><description>none</description></channel></rss>"#
        .to_string()
}

pub fn sample_atom() -> String {
    r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Feed</title>
  <id>urn:uuid:feed</id>
  <updated>2024-10-21T09:00:00Z</updated>
  <entry>
    <title>Atom entry</title>
    <id>urn:uuid:entry-1</id>
    <link rel="alternate" href="https://atom.example.com/1"/>
    <updated>2024-10-21T09:00:00Z</updated>
    <published>2024-10-20T18:30:00+09:00</published>
    <summary>Atom summary</summary>
  </entry>
</feed>"#
        .to_string()
}

pub fn config_for(server: &MockServer, ttl: Duration) -> FetchConfig {
    FetchConfig {
        endpoint: format!("{}{}", server.uri(), FEED_PATH),
        cache_ttl: ttl,
        request_timeout: Duration::from_secs(2),
        ..FetchConfig::default()
    }
}

pub fn fetcher_for(server: &MockServer, ttl: Duration) -> NewsFetcher {
    let config = config_for(server, ttl);
    NewsFetcher::new(Client::new(), MemoryCache::shared(ttl), config)
}
