use contracts::domain::a001_competitive_analysis::aggregate::{
    AnalysisSummary, CompetitiveAnalysis, ProductAnalysis,
};
use contracts::domain::a001_competitive_analysis::dataset::{DatasetQuery, DatasetResponse};
use sea_orm::DatabaseConnection;

use super::repository;

/// Карточки анализов для главной страницы, новые первыми
pub async fn list_summaries(conn: &DatabaseConnection) -> anyhow::Result<Vec<AnalysisSummary>> {
    let items = repository::list_all(conn).await?;
    Ok(items.iter().map(CompetitiveAnalysis::summary).collect())
}

pub async fn get_by_id(
    conn: &DatabaseConnection,
    id: &str,
) -> anyhow::Result<Option<CompetitiveAnalysis>> {
    repository::get_by_id(conn, id).await
}

/// Таблица тарифов анализа с фильтрами и сортировкой из запроса
pub async fn dataset(
    conn: &DatabaseConnection,
    id: &str,
    query: DatasetQuery,
) -> anyhow::Result<Option<DatasetResponse>> {
    let Some(analysis) = repository::get_by_id(conn, id).await? else {
        return Ok(None);
    };
    let state = query.into_state();
    let response = DatasetResponse::build(&analysis.full_competitive_dataset_all_plans, &state);
    tracing::debug!(
        "Dataset {}: {} of {} plans, sort {:?}",
        id,
        response.visible,
        response.total,
        state.sort.active()
    );
    Ok(Some(response))
}

/// Продукт по исходному индексу в анализе
pub async fn product(
    conn: &DatabaseConnection,
    id: &str,
    index: usize,
) -> anyhow::Result<Option<ProductAnalysis>> {
    let analysis = repository::get_by_id(conn, id).await?;
    Ok(analysis.and_then(|a| a.products_analysis.into_iter().nth(index)))
}
