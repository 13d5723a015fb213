use std::time::Duration;

use newsgrid_core::{FeedCache, FeedEntry, MemoryCache};

fn entry(title: &str) -> FeedEntry {
    FeedEntry {
        title: Some(title.into()),
        ..FeedEntry::default()
    }
}

#[tokio::test(start_paused = true)]
async fn slot_is_served_until_ttl_elapses() {
    let cache = MemoryCache::new(Duration::from_secs(300));
    cache.insert("tesla".into(), vec![entry("A"), entry("B")]).await;

    tokio::time::advance(Duration::from_secs(299)).await;
    let hit = cache.get("tesla").await.expect("fresh slot");
    assert_eq!(hit, vec![entry("A"), entry("B")]);

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(cache.get("tesla").await.is_none());
}

#[tokio::test(start_paused = true)]
async fn reinsert_refreshes_a_stale_slot() {
    let cache = MemoryCache::new(Duration::from_secs(10));
    cache.insert("q".into(), vec![entry("old")]).await;
    tokio::time::advance(Duration::from_secs(11)).await;
    assert!(cache.get("q").await.is_none());

    cache.insert("q".into(), vec![entry("new")]).await;
    assert_eq!(cache.get("q").await, Some(vec![entry("new")]));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn keys_are_not_normalized() {
    let cache = MemoryCache::default();
    cache.insert("Tesla".into(), vec![entry("A")]).await;

    assert!(cache.get("Tesla").await.is_some());
    assert!(cache.get("tesla").await.is_none());
    assert!(cache.get(" Tesla").await.is_none());
}

#[tokio::test]
async fn default_ttl_is_five_minutes() {
    let cache = MemoryCache::default();
    assert_eq!(cache.ttl(), Duration::from_secs(300));
    assert!(cache.is_empty().await);
}
