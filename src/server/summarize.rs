use axum::{extract::rejection::JsonRejection, extract::State, Json};
use log::info;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::model::{SummarizeRequest, SummarizeResult};
use crate::server::{error::ErrorServer, state::ServerState};

pub async fn summarize(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResult>, ErrorServer> {
    let Json(request) = payload.map_err(|e| ErrorServer::bad_request(e.body_text()))?;

    let result = state.summarizer().handle(&request).await?;
    info!(
        "Served {} ({} chars, truncated: {})",
        result.format, result.content_length, result.truncated
    );

    Ok(Json(result))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
