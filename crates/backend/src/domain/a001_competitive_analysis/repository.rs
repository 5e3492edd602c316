use contracts::domain::a001_competitive_analysis::aggregate::CompetitiveAnalysis;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

/// Результаты анализа пишет внешний анализатор; здесь только чтение.
/// Вложенные коллекции хранятся JSON-колонками.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "competitive_analysis")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub analysis_timestamp: Option<String>,
    pub currency: Option<String>,
    pub llm_provider: Option<String>,
    pub overall_competitive_sentiments: Option<Json>,
    pub o2_products_analysis: Option<Json>,
    pub full_competitive_dataset_all_plans: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Разбирает JSON-колонку. Битое значение логируется и заменяется пустым,
/// чтобы одна запись не ломала весь список.
fn decode_column<T>(id: &str, column: &str, value: Option<Json>) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(value) = value else {
        return T::default();
    };
    if value.is_null() {
        return T::default();
    }
    match serde_json::from_value(value) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!("Analysis {}: cannot decode column {}: {}", id, column, e);
            T::default()
        }
    }
}

/// Разбирает JSON-массив поэлементно: битый элемент логируется и
/// пропускается, остальные остаются.
fn decode_list<T>(id: &str, column: &str, value: Option<Json>) -> Vec<T>
where
    T: DeserializeOwned,
{
    let items = match value {
        Some(Json::Array(items)) => items,
        other => return decode_column(id, column, other),
    };
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(
                    "Analysis {}: skipping {}[{}]: {}",
                    id,
                    column,
                    index,
                    e
                );
                None
            }
        })
        .collect()
}

impl From<Model> for CompetitiveAnalysis {
    fn from(m: Model) -> Self {
        let id = m.id;
        CompetitiveAnalysis {
            overall_competitive_sentiments: decode_list(
                &id,
                "overall_competitive_sentiments",
                m.overall_competitive_sentiments,
            ),
            products_analysis: decode_list(&id, "o2_products_analysis", m.o2_products_analysis),
            full_competitive_dataset_all_plans: decode_list(
                &id,
                "full_competitive_dataset_all_plans",
                m.full_competitive_dataset_all_plans,
            ),
            analysis_timestamp: m.analysis_timestamp.unwrap_or_default(),
            currency: m.currency.unwrap_or_default(),
            llm_provider: m.llm_provider.unwrap_or_default(),
            created_at: m.created_at,
            updated_at: m.updated_at,
            id,
        }
    }
}

/// Все анализы, новые первыми
pub async fn list_all(conn: &DatabaseConnection) -> anyhow::Result<Vec<CompetitiveAnalysis>> {
    let items = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .all(conn)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn get_by_id(
    conn: &DatabaseConnection,
    id: &str,
) -> anyhow::Result<Option<CompetitiveAnalysis>> {
    let result = Entity::find_by_id(id.to_string()).one(conn).await?;
    Ok(result.map(Into::into))
}
