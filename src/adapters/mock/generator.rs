//! Pseudo-random post generation for the mock feed source.

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::models::{MediaItem, Post, PostContent, User};

const MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

const AUTHORS: &[(&str, &str)] = &[
    ("ferris", "Ferris the Crab"),
    ("borrowck", "Borrow Checker"),
    ("tokio_rs", "Tokio"),
    ("serde_fan", "Serde Enjoyer"),
    ("async_anna", "Anna Async"),
    ("lifetimes", "Tick A"),
    ("cargo_cult", "Cargo Cult"),
    ("unsafe_ursula", "Ursula"),
];

const BODIES: &[&str] = &[
    "Shipped a new release today #rust #release",
    "Anyone else fighting the borrow checker this morning?",
    "Hot take: pagination is harder than caching #engineering",
    "Coffee first, then async traits",
    "Just learned about single-flight guards. Mind blown #til",
    "Reading through the tokio source again #tokio",
    "Weekend project: a tiny timeline client #sideproject",
    "Optimistic updates make everything feel faster",
];

const CAPTIONS: &[&str] = &[
    "Sunset from the office",
    "New desk setup",
    "Conference talk slides",
    "Look at this crab",
];

/// Generates feed pages with randomized content and engagement.
///
/// Content variants rotate by position so any page of four or more posts
/// contains text, image, video and mixed entries.
#[derive(Debug)]
pub struct PostGenerator {
    rng: StdRng,
}

impl PostGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic ids, content and counts for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate `count` posts for `page`.
    pub fn page(&mut self, page: usize, count: usize) -> Vec<Post> {
        (0..count).map(|index| self.post(page, index)).collect()
    }

    /// Generate one post at `index` within `page`.
    pub fn post(&mut self, page: usize, index: usize) -> Post {
        let id = Uuid::from_bytes(self.rng.gen()).simple().to_string();
        let age = Duration::seconds(self.rng.gen_range(0..MAX_AGE_SECS));
        let like_count = self.rng.gen_range(0..5_000);
        let retweet_count = self.rng.gen_range(0..1_000);

        Post {
            id: format!("p{}-{}-{}", page, index, &id[..8]),
            author: self.user(),
            content: self.content(index),
            created_at: Utc::now() - age,
            like_count,
            retweet_count,
            comment_count: self.rng.gen_range(0..300),
            liked_by_viewer: self.rng.gen_bool(0.3),
            retweeted_by_viewer: self.rng.gen_bool(0.15),
        }
    }

    fn user(&mut self) -> User {
        let (handle, name) = AUTHORS[self.rng.gen_range(0..AUTHORS.len())];
        let with_avatar = self.rng.gen_bool(0.8);
        User {
            id: format!("u-{}", handle),
            handle: handle.to_string(),
            display_name: name.to_string(),
            avatar_url: with_avatar.then(|| format!("https://avatars.example.com/{}.png", handle)),
            verified: self.rng.gen_bool(0.2),
        }
    }

    fn content(&mut self, index: usize) -> PostContent {
        match index % 4 {
            0 => PostContent::text(self.pick(BODIES)),
            1 => {
                let caption = self.maybe(CAPTIONS);
                PostContent::image(self.image_url(), caption)
            }
            2 => {
                let (url, thumb) = self.video_urls();
                let caption = self.maybe(CAPTIONS);
                PostContent::video(url, thumb, caption)
            }
            _ => {
                let body = self.maybe(BODIES);
                let count = self.rng.gen_range(1..=4);
                let media = (0..count).map(|_| self.media_item()).collect();
                PostContent::mixed(body, media)
            }
        }
    }

    fn media_item(&mut self) -> MediaItem {
        if self.rng.gen_bool(0.7) {
            MediaItem::Image {
                url: self.image_url(),
            }
        } else {
            let (url, thumbnail_url) = self.video_urls();
            MediaItem::Video { url, thumbnail_url }
        }
    }

    fn image_url(&mut self) -> String {
        format!(
            "https://picsum.photos/seed/{}/600/400",
            self.rng.gen_range(0..10_000)
        )
    }

    fn video_urls(&mut self) -> (String, String) {
        let n: u32 = self.rng.gen_range(0..10_000);
        (
            format!("https://videos.example.com/{}.mp4", n),
            format!("https://videos.example.com/{}.jpg", n),
        )
    }

    fn pick(&mut self, pool: &[&str]) -> String {
        pool.choose(&mut self.rng)
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    fn maybe(&mut self, pool: &[&str]) -> Option<String> {
        if self.rng.gen_bool(0.75) {
            Some(self.pick(pool))
        } else {
            None
        }
    }
}

impl Default for PostGenerator {
    fn default() -> Self {
        Self::new()
    }
}
