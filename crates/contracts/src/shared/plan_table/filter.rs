use serde::{Deserialize, Serialize};

use super::number::parse_leading_number;
use crate::domain::a001_competitive_analysis::aggregate::Plan;

/// Поле фильтра таблицы тарифов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Brand,
    Contract,
    Data,
    Roaming,
    Speed,
    PriceMin,
    PriceMax,
}

impl FilterField {
    pub const ALL: [FilterField; 7] = [
        FilterField::Brand,
        FilterField::Contract,
        FilterField::Data,
        FilterField::Roaming,
        FilterField::Speed,
        FilterField::PriceMin,
        FilterField::PriceMax,
    ];

    /// Placeholder для поля ввода
    pub fn placeholder(&self) -> &'static str {
        match self {
            FilterField::Brand => "Brand...",
            FilterField::Contract => "Contract...",
            FilterField::Data => "Data...",
            FilterField::Roaming => "Roaming...",
            FilterField::Speed => "Speed...",
            FilterField::PriceMin => "Min £",
            FilterField::PriceMax => "Max £",
        }
    }

    /// Текстовое поле тарифа, к которому применяется подстрочный фильтр
    fn text_of(self, plan: &Plan) -> Option<&str> {
        match self {
            FilterField::Brand => Some(&plan.brand),
            FilterField::Contract => Some(&plan.contract),
            FilterField::Data => Some(&plan.data),
            FilterField::Roaming => Some(&plan.roaming),
            FilterField::Speed => Some(&plan.speed),
            FilterField::PriceMin | FilterField::PriceMax => None,
        }
    }
}

/// Значения фильтров в том виде, как их ввёл пользователь.
///
/// Пустая строка означает "без ограничения". Границы цены хранятся текстом и
/// разбираются при применении: нечисловая граница считается отсутствующей.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanFilters {
    pub brand: String,
    pub contract: String,
    pub data: String,
    pub roaming: String,
    pub speed: String,
    pub price_min: String,
    pub price_max: String,
}

impl PlanFilters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Brand => &self.brand,
            FilterField::Contract => &self.contract,
            FilterField::Data => &self.data,
            FilterField::Roaming => &self.roaming,
            FilterField::Speed => &self.speed,
            FilterField::PriceMin => &self.price_min,
            FilterField::PriceMax => &self.price_max,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Brand => self.brand = value,
            FilterField::Contract => self.contract = value,
            FilterField::Data => self.data = value,
            FilterField::Roaming => self.roaming = value,
            FilterField::Speed => self.speed = value,
            FilterField::PriceMin => self.price_min = value,
            FilterField::PriceMax => self.price_max = value,
        }
    }

    /// Хотя бы один фильтр не пустой
    pub fn is_active(&self) -> bool {
        FilterField::ALL.iter().any(|f| !self.get(*f).is_empty())
    }

    /// Разобранные границы цены (min, max)
    pub fn price_bounds(&self) -> (Option<f64>, Option<f64>) {
        (
            parse_leading_number(&self.price_min),
            parse_leading_number(&self.price_max),
        )
    }

    /// Проверяет тариф по всем активным фильтрам одновременно (AND)
    pub fn matches(&self, plan: &Plan) -> bool {
        let (min, max) = self.price_bounds();
        self.matches_with_bounds(plan, min, max)
    }

    fn matches_with_bounds(&self, plan: &Plan, min: Option<f64>, max: Option<f64>) -> bool {
        for field in FilterField::ALL {
            let pattern = self.get(field);
            if pattern.is_empty() {
                continue;
            }
            if let Some(text) = field.text_of(plan) {
                if !text.to_lowercase().contains(&pattern.to_lowercase()) {
                    return false;
                }
            }
        }

        let price = plan.price_per_month_gbp;
        if let Some(min) = min {
            if price < min {
                return false;
            }
        }
        if let Some(max) = max {
            if price > max {
                return false;
            }
        }
        true
    }
}

/// Оставляет тарифы, удовлетворяющие всем фильтрам.
///
/// Возвращает ссылки на исходные строки в исходном порядке; вход не меняется.
pub fn filter_plans<'a>(plans: &'a [Plan], filters: &PlanFilters) -> Vec<&'a Plan> {
    let (min, max) = filters.price_bounds();
    plans
        .iter()
        .filter(|plan| filters.matches_with_bounds(plan, min, max))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(brand: &str, price: f64) -> Plan {
        Plan {
            brand: brand.to_string(),
            contract: "24-month".to_string(),
            data: "100GB".to_string(),
            roaming: "EU included".to_string(),
            speed: "5G".to_string(),
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

    fn filters(field: FilterField, value: &str) -> PlanFilters {
        let mut f = PlanFilters::default();
        f.set(field, value);
        f
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let plans = sample();
        let rows = filter_plans(&plans, &PlanFilters::default());
        assert_eq!(brands(&rows), vec!["EE", "O2", "Three"]);
        assert!(!PlanFilters::default().is_active());
    }

    #[test]
    fn test_text_filter_is_case_insensitive_substring() {
        let plans = sample();
        let rows = filter_plans(&plans, &filters(FilterField::Brand, "hr"));
        assert_eq!(brands(&rows), vec!["Three"]);
        let rows = filter_plans(&plans, &filters(FilterField::Brand, "ee"));
        assert_eq!(brands(&rows), vec!["EE", "Three"]);
        let rows = filter_plans(&plans, &filters(FilterField::Speed, "5g"));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_missing_text_fails_non_empty_filter() {
        let plans = vec![Plan::default()];
        assert!(filter_plans(&plans, &filters(FilterField::Roaming, "eu")).is_empty());
        assert_eq!(filter_plans(&plans, &PlanFilters::default()).len(), 1);
    }

    #[test]
    fn test_price_max_keeps_original_order() {
        let plans = sample();
        let rows = filter_plans(&plans, &filters(FilterField::PriceMax, "9"));
        assert_eq!(brands(&rows), vec!["O2", "Three"]);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let plans = sample();
        let mut f = filters(FilterField::PriceMin, "8");
        f.set(FilterField::PriceMax, "8");
        assert_eq!(brands(&filter_plans(&plans, &f)), vec!["O2", "Three"]);
    }

    #[test]
    fn test_unparseable_bound_fails_open() {
        let plans = sample();
        let f = filters(FilterField::PriceMin, "abc");
        assert!(f.is_active());
        assert_eq!(f.price_bounds(), (None, None));
        assert_eq!(filter_plans(&plans, &f).len(), 3);
    }

    #[test]
    fn test_and_semantics() {
        let plans = sample();
        let by_brand = filter_plans(&plans, &filters(FilterField::Brand, "EE"));
        let by_price = filter_plans(&plans, &filters(FilterField::PriceMin, "10"));
        let mut both = filters(FilterField::Brand, "EE");
        both.set(FilterField::PriceMin, "10");
        let combined = filter_plans(&plans, &both);

        let intersection: Vec<&Plan> = by_brand
            .iter()
            .copied()
            .filter(|p| by_price.iter().any(|q| std::ptr::eq(*p, *q)))
            .collect();
        assert_eq!(combined.len(), intersection.len());
        for (a, b) in combined.iter().zip(intersection.iter()) {
            assert!(std::ptr::eq(*a, *b));
        }
        assert_eq!(brands(&combined), vec!["EE"]);
    }

    #[test]
    fn test_subset_by_identity_and_idempotence() {
        let plans = sample();
        let f = filters(FilterField::Brand, "e");
        let once = filter_plans(&plans, &f);
        for row in &once {
            assert!(plans.iter().any(|p| std::ptr::eq(p, *row)));
        }

        let again: Vec<&Plan> = once.iter().copied().filter(|p| f.matches(p)).collect();
        assert_eq!(once.len(), again.len());
        for (a, b) in once.iter().zip(again.iter()) {
            assert!(std::ptr::eq(*a, *b));
        }
    }
}
