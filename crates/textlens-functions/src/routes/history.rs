use std::num::IntErrorKind;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use textlens_core::models::analysis::AnalysisSummary;

use crate::error::ApiError;
use crate::state::AppState;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct HistoryParams {
    pub limit: Option<String>,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub results: Vec<AnalysisSummary>,
}

/// Most recent analyses first, at most `?limit=` of them.
pub async fn get_history(
    State(state): State<AppState>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    tracing::info!("analysis history invoked");

    let requested = params.ok().and_then(|Query(p)| p.limit);
    let limit = resolve_limit(requested.as_deref());

    let store = state.store.get().await.map_err(ApiError::StoreRead)?;
    let mut results = store.history().await.map_err(ApiError::StoreRead)?;
    results.truncate(limit);

    Ok(Json(HistoryResponse {
        count: results.len(),
        results,
    }))
}

/// Absent or non-integer values give [`DEFAULT_LIMIT`]; integers are clamped
/// to `1..=MAX_LIMIT`, including ones too large to represent.
pub fn resolve_limit(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_LIMIT;
    };

    match raw.trim().parse::<i64>() {
        Ok(n) => n.clamp(1, MAX_LIMIT as i64) as usize,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => MAX_LIMIT,
            IntErrorKind::NegOverflow => 1,
            _ => DEFAULT_LIMIT,
        },
    }
}
