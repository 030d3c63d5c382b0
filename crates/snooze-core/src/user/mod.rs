//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: Wire records for user profiles and auth responses
//! - `session`: The logged-in `UserSession` and its favorite operations
//!
//! # Usage
//!
//! ```ignore
//! use snooze_core::user::{UserProfile, UserSession};
//! ```

mod model;
mod session;

// Re-export public API
pub use model::{AuthResponse, UserProfile};
pub use session::UserSession;
