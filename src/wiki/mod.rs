//! Wikipedia article search.
//!
//! [`WikiClient::search`] runs a `list=search` query, then resolves the
//! canonical URL of every hit with a single `prop=info` lookup and joins
//! the two by page id.

pub mod client;
pub mod error;
pub mod models;

pub use client::{ClientConfig, EnrichmentPolicy, WikiClient};
pub use error::{Result, WikiError};
pub use models::{Article, PageInfo, SearchHit};
