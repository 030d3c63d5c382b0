//! Application layer for snooze.
//!
//! Restores the previous session at startup and exposes the operations and
//! views a front end drives.

pub mod bootstrap;
pub mod controller;
pub mod view;

pub use bootstrap::{AppState, bootstrap};
pub use controller::AppController;
pub use view::{ProfileView, StoryView};
