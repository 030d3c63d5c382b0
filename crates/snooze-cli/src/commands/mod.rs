pub mod account;
pub mod favorites;
pub mod stories;
