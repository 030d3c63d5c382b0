//! Remote API access for snooze.
//!
//! Provides [`HttpStoryApi`], the reqwest-backed implementation of
//! `snooze_core::api::StoryApi`.

pub mod http_story_api;

pub use http_story_api::HttpStoryApi;
