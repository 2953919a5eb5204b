pub mod api;
pub mod config;
pub mod snippet;
pub mod wiki;
