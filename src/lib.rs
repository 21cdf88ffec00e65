//! Feedline - a reactive feed-state engine for paginated social timelines
//!
//! The [`store::FeedStore`] owns the canonical post list and publishes it,
//! together with its fetch status, over watch channels. The
//! [`controller::FeedController`] turns those results and notifications into a
//! [`view_state::FeedViewState`] that a presentation layer renders.

pub mod adapters;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod store;
pub mod traits;
pub mod view_state;
