//! Integration tests for FeedStore paging, single-flight and toggles.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{test_post, test_posts, TestFeed};
use feedline::adapters::mock::{MockFeedSource, MockPage};
use feedline::error::{FeedError, NetworkError};
use feedline::models::{FeedStatus, PAGE_SIZE};

#[tokio::test]
async fn test_toggle_like_parity() {
    let source = MockFeedSource::new();
    source.set_page(0, MockPage::Posts(vec![test_post("a", 10, false), test_post("b", 3, true)]));
    let feed = TestFeed::over(source);
    feed.store.fetch_page(0).await.unwrap();

    for (id, original_count, original_liked) in [("a", 10u32, false), ("b", 3u32, true)] {
        for calls in 1..=5u32 {
            let post = feed.store.toggle_like(id).await.unwrap();
            let odd = calls % 2 == 1;
            assert_eq!(post.liked_by_viewer, original_liked ^ odd);
            let expected = match (odd, original_liked) {
                (false, _) => original_count,
                (true, false) => original_count + 1,
                (true, true) => original_count - 1,
            };
            assert_eq!(post.like_count, expected, "post {} after {} calls", id, calls);
        }
    }
}

#[tokio::test]
async fn test_retweet_toggle_saturates_at_zero() {
    let mut malformed = test_post("a", 0, false);
    malformed.retweeted_by_viewer = true;
    malformed.retweet_count = 0;
    let source = MockFeedSource::new();
    source.set_page(0, MockPage::Posts(vec![malformed]));
    let feed = TestFeed::over(source);
    feed.store.fetch_page(0).await.unwrap();

    let post = feed.store.toggle_retweet("a").await.unwrap();
    assert!(!post.retweeted_by_viewer);
    assert_eq!(post.retweet_count, 0);
}

#[tokio::test]
async fn test_fetch_first_page_twice_keeps_one_page() {
    let feed = TestFeed::new();
    feed.store.fetch_page(0).await.unwrap();
    feed.store.fetch_page(0).await.unwrap();
    assert_eq!(feed.store.posts().len(), PAGE_SIZE);
}

#[tokio::test]
async fn test_load_more_after_last_page() {
    let feed = TestFeed::over(MockFeedSource::new().with_total_posts(25));
    feed.store.fetch_page(0).await.unwrap();
    feed.store.load_more().await.unwrap();
    assert!(!feed.store.has_more_pages());

    let before = feed.store.posts();
    let err = feed.store.load_more().await.unwrap_err();
    assert_eq!(err, FeedError::NoMorePages);
    assert_eq!(feed.store.posts(), before);
    assert_eq!(feed.source.calls(), vec![0, 1]);
}

#[tokio::test]
async fn test_concurrent_fetch_rejected() {
    let feed = TestFeed::slow(Duration::from_millis(100));
    let mut status = feed.store.subscribe_status();

    let first = {
        let store = Arc::clone(&feed.store);
        tokio::spawn(async move { store.fetch_page(0).await })
    };
    status.changed().await.unwrap();
    assert_eq!(*status.borrow_and_update(), FeedStatus::Loading);
    assert!(feed.store.is_fetch_in_flight());

    assert_eq!(feed.store.fetch_page(0).await.unwrap_err(), FeedError::AlreadyLoading);
    assert_eq!(feed.store.refresh().await.unwrap_err(), FeedError::AlreadyLoading);
    assert_eq!(feed.store.load_more().await.unwrap_err(), FeedError::NoMorePages);
    // Rejections publish nothing
    assert!(!status.has_changed().unwrap());

    assert_eq!(first.await.unwrap().unwrap().len(), PAGE_SIZE);
    assert!(feed.store.fetch_page(1).await.is_ok());
    assert_eq!(feed.source.calls(), vec![0, 1]);
}

#[tokio::test]
async fn test_cancelled_fetch_releases_slot() {
    let feed = TestFeed::slow(Duration::from_secs(10));
    let store = Arc::clone(&feed.store);
    let task = tokio::spawn(async move { store.fetch_page(0).await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(feed.store.is_fetch_in_flight());

    task.abort();
    let _ = task.await;
    assert!(!feed.store.is_fetch_in_flight());
}

#[tokio::test]
async fn test_toggle_unknown_id_keeps_snapshot_identity() {
    let feed = TestFeed::new();
    feed.store.fetch_page(0).await.unwrap();
    let mut posts_rx = feed.store.subscribe_posts();

    let before = feed.store.posts();
    let err = feed.store.toggle_like("nope").await.unwrap_err();
    assert_eq!(err, FeedError::post_not_found("nope"));
    assert!(Arc::ptr_eq(&before, &feed.store.posts()));
    assert!(!posts_rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_failed_fetch_keeps_state() {
    let feed = TestFeed::new();
    feed.store.fetch_page(0).await.unwrap();
    let before = feed.store.posts();

    let err = FeedError::Network(NetworkError::HttpStatus {
        status: 503,
        message: "unavailable".to_string(),
    });
    feed.source.fail_next(err.clone());
    assert_eq!(feed.store.load_more().await.unwrap_err(), err);

    assert!(Arc::ptr_eq(&before, &feed.store.posts()));
    assert_eq!(feed.store.current_page(), 0);
    assert!(feed.store.has_more_pages());
    assert_eq!(feed.store.status(), FeedStatus::Failed(err));
}

#[tokio::test]
async fn test_refresh_status_sequence() {
    let feed = TestFeed::slow(Duration::from_millis(50));
    feed.store.fetch_page(0).await.unwrap();
    let mut status = feed.store.subscribe_status();

    let task = {
        let store = Arc::clone(&feed.store);
        tokio::spawn(async move { store.refresh().await })
    };
    status.changed().await.unwrap();
    assert_eq!(*status.borrow_and_update(), FeedStatus::Refreshing);

    task.await.unwrap().unwrap();
    let ids: Vec<String> = feed.store.posts().iter().map(|p| p.id.clone()).collect();
    assert_eq!(*status.borrow_and_update(), FeedStatus::Loaded(ids));
}

#[tokio::test]
async fn test_append_order_existing_then_new() {
    let source = MockFeedSource::new();
    source.set_page(0, MockPage::Posts(test_posts("first", PAGE_SIZE)));
    source.set_page(1, MockPage::Posts(test_posts("second", 3)));
    let feed = TestFeed::over(source);

    feed.store.fetch_page(0).await.unwrap();
    feed.store.load_more().await.unwrap();

    let ids: Vec<String> = feed.store.posts().iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids.len(), PAGE_SIZE + 3);
    assert_eq!(ids[0], "first-0");
    assert_eq!(ids[PAGE_SIZE - 1], format!("first-{}", PAGE_SIZE - 1));
    assert_eq!(ids[PAGE_SIZE], "second-0");
    assert!(!feed.store.has_more_pages());
}
