use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::a001_competitive_analysis::aggregate::{
    AnalysisSummary, CompetitiveAnalysis, ProductAnalysis,
};
use contracts::domain::a001_competitive_analysis::dataset::{DatasetQuery, DatasetResponse};

use crate::domain::a001_competitive_analysis::service;
use crate::shared::api_error::ApiError;
use crate::shared::state::AppState;

/// GET /api/analysis
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<AnalysisSummary>>, ApiError> {
    Ok(Json(service::list_summaries(&state.db).await?))
}

/// GET /api/analysis/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CompetitiveAnalysis>, ApiError> {
    service::get_by_id(&state.db, &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Analysis {id}")))
}

/// GET /api/analysis/:id/dataset?brand=..&price_max=..&sort=price&direction=asc
pub async fn dataset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DatasetQuery>,
) -> Result<Json<DatasetResponse>, ApiError> {
    service::dataset(&state.db, &id, query)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Analysis {id}")))
}

/// GET /api/analysis/:id/product/:index
pub async fn product(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<ProductAnalysis>, ApiError> {
    service::product(&state.db, &id, index)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Product {index} of analysis {id}")))
}
