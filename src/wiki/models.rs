use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One matched article from the `list=search` call.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub pageid: u64,
    pub title: String,
    /// Raw snippet markup as returned by the API. Not safe to render as-is.
    #[serde(default)]
    pub snippet: String,
}

/// Page metadata from the `prop=info&inprop=url` call.
///
/// Titles the API could not resolve come back under negative keys with a
/// `missing` marker and no `pageid`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PageInfo {
    pub pageid: Option<u64>,
    #[serde(default)]
    pub title: String,
    pub fullurl: Option<String>,
}

/// A search hit enriched with its canonical URL.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Article {
    pub pageid: u64,
    pub title: String,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullurl: Option<String>,
}

impl Article {
    pub fn new(hit: SearchHit, fullurl: Option<String>) -> Article {
        Article {
            pageid: hit.pageid,
            title: hit.title,
            snippet: hit.snippet,
            fullurl,
        }
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct SearchResponse {
    pub query: Option<SearchQuery>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct InfoResponse {
    pub query: Option<InfoQuery>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct InfoQuery {
    #[serde(default)]
    pub pages: HashMap<String, PageInfo>,
}

/// Index page records by the page id they carry.
///
/// Missing pages (no `pageid`) are skipped so they can never match a hit.
pub fn index_pages(pages: HashMap<String, PageInfo>) -> HashMap<u64, PageInfo> {
    pages
        .into_values()
        .filter_map(|page| page.pageid.map(|id| (id, page)))
        .collect()
}

/// Attach canonical URLs to hits, keeping the hits' order and length.
pub fn join_by_pageid(hits: Vec<SearchHit>, pages: &HashMap<u64, PageInfo>) -> Vec<Article> {
    hits.into_iter()
        .map(|hit| {
            let url = pages.get(&hit.pageid).and_then(|p| p.fullurl.clone());
            Article::new(hit, url)
        })
        .collect()
}
