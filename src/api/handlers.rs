use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::wiki::{WikiClient, WikiError};

use super::models::{ArticleCard, SearchRequest, SearchResponse};

pub async fn search_handler(
    State(client): State<Arc<WikiClient>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = Instant::now();

    let articles = client.search(&request.query).await.map_err(|e| {
        let status = status_for(&e);
        if status.is_server_error() {
            tracing::error!(target: "api", query = %request.query, error = %e, "search failed");
        }
        (status, e.to_string())
    })?;

    let results: Vec<ArticleCard> = articles.into_iter().map(ArticleCard::from).collect();
    let total_results = results.len();
    let processing_time_ms = start.elapsed().as_millis();

    Ok(Json(SearchResponse {
        query: request.query,
        results,
        total_results,
        processing_time_ms,
    }))
}

fn status_for(err: &WikiError) -> StatusCode {
    match err {
        WikiError::InvalidQuery => StatusCode::BAD_REQUEST,
        e if e.is_upstream() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
