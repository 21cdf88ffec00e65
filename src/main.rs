use feedline::adapters::{HttpFeedSource, MockFeedSource, ReqwestHttpClient};
use feedline::config::FeedConfig;
use feedline::controller::FeedController;
use feedline::store::FeedStore;
use feedline::traits::FeedSource;
use feedline::view_state::FeedViewState;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on load-more rounds so an endless mock feed still terminates.
const MAX_EXTRA_PAGES: usize = 3;

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("feedline-demo {}", VERSION);
        std::process::exit(0);
    }

    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedline=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = FeedConfig::from_env();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config))
}

fn build_source(config: &FeedConfig) -> Result<Arc<dyn FeedSource>> {
    match &config.api_url {
        Some(url) => {
            let client = ReqwestHttpClient::with_timeout(config.request_timeout)
                .map_err(|e| eyre!("failed to build HTTP client: {}", e))?;
            tracing::info!(url = %url, "Using HTTP feed source");
            let source = HttpFeedSource::new(Arc::new(client), url.clone())
                .with_request_timeout(config.request_timeout);
            Ok(Arc::new(source))
        }
        None => {
            tracing::info!(
                total_posts = config.mock_total_posts,
                latency_ms = config.mock_latency.as_millis() as u64,
                "Using generated feed source"
            );
            Ok(Arc::new(MockFeedSource::from_config(config)))
        }
    }
}

async fn run(config: FeedConfig) -> Result<()> {
    let source = build_source(&config)?;
    let store = Arc::new(FeedStore::with_config(source, &config));
    let mut controller = FeedController::new(Arc::clone(&store));

    controller.load_initial().await;
    report("initial load", controller.state());
    if let Some(text) = controller.error_text() {
        return Err(eyre!("initial load failed: {}", text));
    }

    for post in controller.posts().iter().take(3) {
        let rendered = post.rendered();
        tracing::info!(
            post_id = %post.id,
            author = %post.author.handle,
            kind = post.content.kind(),
            media = rendered.media.len(),
            text = rendered.text.as_deref().unwrap_or(""),
            "Post"
        );
    }

    for _ in 0..MAX_EXTRA_PAGES {
        if !controller.can_load_more() {
            break;
        }
        controller.load_more().await;
        report("load more", controller.state());
    }

    if let Some(first) = controller.posts().first().cloned() {
        // A presentation layer flips its own copy right away; the store's
        // list then arrives with the same value.
        let mut optimistic = controller.state().clone();
        optimistic.apply_like_toggle(&first.id);

        let handle = controller.toggle_like(first.id.clone());
        match handle.await? {
            Ok(updated) => {
                controller.process_pending();
                let converged = optimistic.post(&first.id) == controller.state().post(&first.id);
                tracing::info!(
                    post_id = %updated.id,
                    liked = updated.liked_by_viewer,
                    like_count = updated.like_count,
                    converged,
                    "Like round trip finished"
                );
            }
            Err(e) => tracing::warn!(error = %e, "Like failed"),
        }
    }

    controller.refresh().await;
    report("refresh", controller.state());

    let state = controller.state();
    println!(
        "{} posts, page {}, more pages: {}, error: {}",
        state.posts_count(),
        state.current_page,
        state.has_more_pages,
        state.error_text.as_deref().unwrap_or("none")
    );
    Ok(())
}

fn report(step: &str, state: &FeedViewState) {
    tracing::info!(
        step,
        posts = state.posts_count(),
        current_page = state.current_page,
        has_more_pages = state.has_more_pages,
        error = state.error_text.as_deref().unwrap_or(""),
        "Feed state"
    );
}
