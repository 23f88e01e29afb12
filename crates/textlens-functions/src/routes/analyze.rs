use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::http::header::HOST;
use serde::Deserialize;
use uuid::Uuid;

use textlens_core::models::analysis::{AnalysisDocument, AnalysisSummary};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeParams {
    pub text: Option<String>,
}

/// Analyze text from `?text=` or a JSON body `{"text": "..."}`, store the
/// result and return it.
pub async fn analyze_text(
    State(state): State<AppState>,
    params: Result<Query<AnalyzeParams>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<AnalysisSummary>, ApiError> {
    tracing::info!("text analyzer invoked");

    let from_query = params.ok().and_then(|Query(p)| p.text);
    let text = resolve_text(from_query, &body).ok_or_else(|| ApiError::MissingText {
        host: headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    })?;

    let document = AnalysisDocument::new(&text, Uuid::new_v4(), jiff::Timestamp::now());

    let store = state.store.get().await.map_err(ApiError::StoreWrite)?;
    store.insert(&document).await.map_err(ApiError::StoreWrite)?;

    tracing::info!(
        id = %document.id,
        words = document.analysis.word_count,
        "stored analysis"
    );
    Ok(Json(document.into_summary()))
}

/// Prefer the query parameter; fall back to the body. A body that is not
/// JSON, or has no string `text` field, yields nothing rather than an error.
pub fn resolve_text(from_query: Option<String>, body: &[u8]) -> Option<String> {
    from_query
        .filter(|t| !t.is_empty())
        .or_else(|| text_from_body(body))
        .filter(|t| !t.is_empty())
}

fn text_from_body(body: &[u8]) -> Option<String> {
    let json: serde_json::Value = serde_json::from_slice(body).ok()?;
    json.get("text")?.as_str().map(str::to_string)
}
