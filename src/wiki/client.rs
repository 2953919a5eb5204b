use std::collections::HashMap;
use std::time::{Duration, Instant};

use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use super::error::{Result, WikiError};
use super::models::{
    Article, InfoResponse, PageInfo, SearchHit, SearchResponse, index_pages, join_by_pageid,
};

pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_LIMIT: u32 = 10;
/// The info lookup batches every hit title into one request, and the API
/// accepts at most 50 titles per request for regular clients.
pub const MAX_LIMIT: u32 = 50;
/// Wikimedia asks clients to identify themselves; override with contact
/// details via `WIKI_USER_AGENT` when deploying.
pub const DEFAULT_USER_AGENT: &str = concat!("wikisearch/", env!("CARGO_PKG_VERSION"));

/// What to do when the URL lookup fails after the search itself succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichmentPolicy {
    /// Log the failure and return the hits without URLs.
    #[default]
    Degrade,
    /// Fail the whole search.
    Strict,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// `srlimit` sent with the search request.
    pub limit: u32,
    /// Per-request timeout. `None` keeps reqwest's default (no timeout).
    pub timeout: Option<Duration>,
    pub user_agent: String,
    pub enrichment: EnrichmentPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            limit: DEFAULT_LIMIT,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            enrichment: EnrichmentPolicy::Degrade,
        }
    }
}

/// Client for the MediaWiki search API.
///
/// Holds no per-search state, so one instance can serve any number of
/// concurrent searches. `reqwest::Client` is reference counted internally;
/// cloning this is cheap.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: reqwest::Client,
    base_url: Url,
    limit: u32,
    enrichment: EnrichmentPolicy,
}

impl WikiClient {
    pub fn new(config: ClientConfig) -> Result<WikiClient> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| WikiError::Config(format!("base url {:?}: {e}", config.base_url)))?;
        if config.limit == 0 || config.limit > MAX_LIMIT {
            return Err(WikiError::Config(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {}",
                config.limit
            )));
        }

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| WikiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(WikiClient {
            http,
            base_url,
            limit: config.limit,
            enrichment: config.enrichment,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn enrichment(&self) -> EnrichmentPolicy {
        self.enrichment
    }

    /// Search articles and attach their canonical URLs.
    ///
    /// Issues the search request, then (only if there were hits) one batched
    /// info request for all hit titles, and joins the two by page id. The
    /// output has exactly one entry per hit, in the API's order.
    pub async fn search(&self, query: &str) -> Result<Vec<Article>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WikiError::InvalidQuery);
        }

        let started = Instant::now();
        let hits = self.fetch_hits(query).await?;
        tracing::debug!(target: "wiki", query, hit_count = hits.len(), "search.hits");
        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let titles: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();
        let pages = match self.fetch_pages(&titles).await {
            Ok(pages) => pages,
            Err(e) if self.enrichment == EnrichmentPolicy::Degrade => {
                tracing::warn!(
                    target: "wiki",
                    query,
                    error = %e,
                    "info lookup failed, returning results without urls"
                );
                HashMap::new()
            }
            Err(e) => return Err(e),
        };

        let articles = join_by_pageid(hits, &pages);
        tracing::info!(
            target: "wiki",
            query,
            results = articles.len(),
            with_url = articles.iter().filter(|a| a.fullurl.is_some()).count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search.done"
        );
        Ok(articles)
    }

    /// Like [`search`](Self::search), but gives up with
    /// [`WikiError::Cancelled`] as soon as `cancel` fires.
    pub async fn search_with_cancel(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Article>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(target: "wiki", query, "search.cancelled");
                Err(WikiError::Cancelled)
            }
            res = self.search(query) => res,
        }
    }

    async fn fetch_hits(&self, query: &str) -> Result<Vec<SearchHit>> {
        let limit = self.limit.to_string();
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("list", "search"),
            ("srsearch", query),
            ("srlimit", limit.as_str()),
            ("utf8", "1"),
            ("origin", "*"),
        ];
        let resp: SearchResponse = self.get_json(&params).await?;
        if let Some(err) = resp.error {
            return Err(WikiError::Api {
                code: err.code,
                info: err.info,
            });
        }
        let query = resp.query.ok_or(WikiError::MalformedResponse("query"))?;
        Ok(query.search)
    }

    async fn fetch_pages(&self, titles: &[&str]) -> Result<HashMap<u64, PageInfo>> {
        let joined = titles.join("|");
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("titles", joined.as_str()),
            ("prop", "info"),
            ("inprop", "url"),
            ("origin", "*"),
        ];
        let resp: InfoResponse = self.get_json(&params).await?;
        if let Some(err) = resp.error {
            return Err(WikiError::Api {
                code: err.code,
                info: err.info,
            });
        }
        let query = resp.query.ok_or(WikiError::MalformedResponse("query"))?;
        Ok(index_pages(query.pages))
    }

    async fn get_json<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        let res = self
            .http
            .get(self.base_url.clone())
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json::<T>().await?)
    }
}
