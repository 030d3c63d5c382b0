//! Domain layer for snooze.
//!
//! Holds the story and user models, the `StoryApi` seam to the remote
//! service and the `CredentialStore` seam to local persistence.

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod story;
pub mod user;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export common error type
pub use error::SnoozeError;
