use serde::{Deserialize, Serialize};

use crate::snippet;
use crate::wiki::Article;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<ArticleCard>,
    pub total_results: usize,
    pub processing_time_ms: u128,
}

/// What the UI needs to draw one result card.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ArticleCard {
    pub pageid: u64,
    pub title: String,
    /// Escaped snippet markup; only `<mark>` highlights remain.
    pub snippet_html: String,
    pub snippet_text: String,
    pub fullurl: Option<String>,
}

impl From<Article> for ArticleCard {
    fn from(article: Article) -> Self {
        ArticleCard {
            pageid: article.pageid,
            snippet_html: snippet::to_safe_html(&article.snippet),
            snippet_text: snippet::to_plain_text(&article.snippet),
            title: article.title,
            fullurl: article.fullurl,
        }
    }
}
