use serde::{Deserialize, Serialize};

use super::filter::{filter_plans, FilterField, PlanFilters};
use super::sort::{sort_plans, SortField, SortState};
use crate::domain::a001_competitive_analysis::aggregate::Plan;

/// Состояние таблицы тарифов: фильтры и сортировка.
///
/// Строки сюда не входят: видимый набор каждый раз вычисляется заново из
/// переданных строк, поэтому устаревшего кэша не бывает. Фильтры и сортировка
/// меняются независимо друг от друга.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTableState {
    pub filters: PlanFilters,
    pub sort: SortState,
}

impl PlanTableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Заменяет значение одного фильтра
    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        self.filters.set(field, value);
    }

    /// Сбрасывает все фильтры, сортировка не меняется
    pub fn clear_filters(&mut self) {
        self.filters = PlanFilters::default();
    }

    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.toggle(field);
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    /// Отфильтрованные и отсортированные строки
    pub fn visible_rows<'a>(&self, plans: &'a [Plan]) -> Vec<&'a Plan> {
        sort_plans(filter_plans(plans, &self.filters), &self.sort)
    }

    /// Пара (видимо, всего) для надписи "Showing X of Y plans"
    pub fn counts(&self, plans: &[Plan]) -> (usize, usize) {
        (filter_plans(plans, &self.filters).len(), plans.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::plan_table::sort::SortDirection;

    fn plan(brand: &str, price: f64) -> Plan {
        Plan {
            brand: brand.to_string(),
            price_per_month_gbp: price,
            ..Plan::default()
        }
    }

    fn sample() -> Vec<Plan> {
        vec![plan("EE", 10.0), plan("O2", 8.0), plan("Three", 8.0)]
    }

    fn brands(rows: &[&Plan]) -> Vec<String> {
        rows.iter().map(|p| p.brand.clone()).collect()
    }

    #[test]
    fn test_initial_state_shows_everything_in_order() {
        let plans = sample();
        let state = PlanTableState::new();
        assert!(!state.has_active_filters());
        assert_eq!(state.sort.field(), None);
        assert_eq!(brands(&state.visible_rows(&plans)), vec!["EE", "O2", "Three"]);
        assert_eq!(state.counts(&plans), (3, 3));
    }

    #[test]
    fn test_filter_then_sort() {
        let plans = vec![
            plan("EE", 10.0),
            plan("O2", 8.0),
            plan("Three", 8.0),
            plan("EE", 6.0),
        ];
        let mut state = PlanTableState::new();
        state.set_filter(FilterField::Brand, "e");
        state.toggle_sort(SortField::Price);
        let rows = state.visible_rows(&plans);
        let prices: Vec<f64> = rows.iter().map(|p| p.price_per_month_gbp).collect();
        assert_eq!(prices, vec![6.0, 8.0, 10.0]);
        assert_eq!(state.counts(&plans), (3, 4));
    }

    #[test]
    fn test_filter_changes_leave_sort_untouched() {
        let mut state = PlanTableState::new();
        state.toggle_sort(SortField::Score);
        state.toggle_sort(SortField::Score);
        let sort_before = state.sort;

        state.set_filter(FilterField::Speed, "5g");
        state.clear_filters();
        assert_eq!(state.sort, sort_before);
        assert_eq!(
            state.sort.direction_for(SortField::Score),
            Some(SortDirection::Desc)
        );
    }

    #[test]
    fn test_sort_changes_leave_filters_untouched() {
        let mut state = PlanTableState::new();
        state.set_filter(FilterField::PriceMax, "9");
        let filters_before = state.filters.clone();
        state.toggle_sort(SortField::Brand);
        state.toggle_sort(SortField::Data);
        assert_eq!(state.filters, filters_before);
    }

    #[test]
    fn test_set_filter_replaces_only_one_field() {
        let mut state = PlanTableState::new();
        state.set_filter(FilterField::Brand, "ee");
        state.set_filter(FilterField::Data, "unl");
        state.set_filter(FilterField::Brand, "o2");
        assert_eq!(state.filters.get(FilterField::Brand), "o2");
        assert_eq!(state.filters.get(FilterField::Data), "unl");
        assert!(state.has_active_filters());

        state.clear_filters();
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_visible_rows_recomputed_from_current_state() {
        let plans = sample();
        let mut state = PlanTableState::new();
        state.set_filter(FilterField::PriceMax, "9");
        assert_eq!(brands(&state.visible_rows(&plans)), vec!["O2", "Three"]);
        state.set_filter(FilterField::PriceMax, "");
        assert_eq!(brands(&state.visible_rows(&plans)), vec!["EE", "O2", "Three"]);
    }
}
