use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

use super::aggregate::Plan;
use crate::shared::plan_table::{PlanFilters, PlanTableState, SortDirection, SortField, SortState};

/// Параметры запроса `GET /api/analysis/:id/dataset`.
///
/// Все поля необязательны. Без `sort` строки идут в исходном порядке,
/// без `direction` сортировка по возрастанию.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetQuery {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub contract: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub roaming: String,
    #[serde(default)]
    pub speed: String,
    #[serde(default)]
    pub price_min: String,
    #[serde(default)]
    pub price_max: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort: Option<SortField>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub direction: Option<SortDirection>,
}

/// `?sort=` без значения означает "не сортировать", как пустой фильтр
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            T::deserialize(value.trim().into_deserializer()).map(Some)
        }
        _ => Ok(None),
    }
}

impl DatasetQuery {
    pub fn into_state(self) -> PlanTableState {
        let sort = match self.sort {
            Some(field) => SortState::by(field, self.direction.unwrap_or(SortDirection::Asc)),
            None => SortState::unsorted(),
        };
        PlanTableState {
            filters: PlanFilters {
                brand: self.brand,
                contract: self.contract,
                data: self.data,
                roaming: self.roaming,
                speed: self.speed,
                price_min: self.price_min,
                price_max: self.price_max,
            },
            sort,
        }
    }

    /// Обратное преобразование: состояние таблицы в параметры запроса
    pub fn from_state(state: &PlanTableState) -> Self {
        let active = state.sort.active();
        let filters = state.filters.clone();
        Self {
            brand: filters.brand,
            contract: filters.contract,
            data: filters.data,
            roaming: filters.roaming,
            speed: filters.speed,
            price_min: filters.price_min,
            price_max: filters.price_max,
            sort: active.map(|a| a.field),
            direction: active.map(|a| a.direction),
        }
    }
}

/// Видимые строки таблицы и счётчики для "Showing X of Y plans"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetResponse {
    pub plans: Vec<Plan>,
    pub visible: usize,
    pub total: usize,
}

impl DatasetResponse {
    pub fn build(plans: &[Plan], state: &PlanTableState) -> Self {
        let rows: Vec<Plan> = state.visible_rows(plans).into_iter().cloned().collect();
        Self {
            visible: rows.len(),
            total: plans.len(),
            plans: rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(brand: &str, price: f64) -> Plan {
        Plan {
            brand: brand.to_string(),
            price_per_month_gbp: price,
            ..Plan::default()
        }
    }

    #[test]
    fn test_query_defaults_to_unsorted() {
        let state = DatasetQuery::default().into_state();
        assert_eq!(state, PlanTableState::new());
    }

    #[test]
    fn test_query_direction_defaults_to_asc() {
        let query: DatasetQuery =
            serde_json::from_str(r#"{"sort":"price","price_max":"9"}"#).unwrap();
        let state = query.into_state();
        assert_eq!(state.sort.direction_for(SortField::Price), Some(SortDirection::Asc));
        assert_eq!(state.filters.price_max, "9");
    }

    #[test]
    fn test_empty_sort_means_unsorted() {
        let query: DatasetQuery =
            serde_json::from_str(r#"{"sort":"","direction":"","brand":"ee"}"#).unwrap();
        assert_eq!(query.sort, None);
        assert_eq!(query.direction, None);
        assert!(query.into_state().sort.active().is_none());

        let query: DatasetQuery = serde_json::from_str(r#"{"sort":"score"}"#).unwrap();
        assert_eq!(query.sort, Some(SortField::Score));
        assert!(serde_json::from_str::<DatasetQuery>(r#"{"sort":"colour"}"#).is_err());
    }

    #[test]
    fn test_query_state_round_trip() {
        let mut state = PlanTableState::new();
        state.set_filter(crate::shared::plan_table::FilterField::Brand, "ee");
        state.toggle_sort(SortField::Score);
        state.toggle_sort(SortField::Score);
        assert_eq!(DatasetQuery::from_state(&state).into_state(), state);
    }

    #[test]
    fn test_dataset_response() {
        let plans = vec![plan("EE", 10.0), plan("O2", 8.0), plan("Three", 8.0)];
        let query = DatasetQuery {
            price_max: "9".into(),
            sort: Some(SortField::Brand),
            direction: Some(SortDirection::Desc),
            ..DatasetQuery::default()
        };
        let response = DatasetResponse::build(&plans, &query.into_state());
        let brands: Vec<&str> = response.plans.iter().map(|p| p.brand.as_str()).collect();
        assert_eq!(brands, vec!["Three", "O2"]);
        assert_eq!((response.visible, response.total), (2, 3));
    }
}
