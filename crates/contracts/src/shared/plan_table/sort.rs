use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::number::parse_leading_number;
use crate::domain::a001_competitive_analysis::aggregate::Plan;

/// Сортируемая колонка таблицы тарифов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Brand,
    Contract,
    Data,
    Roaming,
    Speed,
    Price,
    Score,
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Brand,
        SortField::Contract,
        SortField::Data,
        SortField::Roaming,
        SortField::Speed,
        SortField::Price,
        SortField::Score,
    ];

    /// Заголовок колонки
    pub fn label(&self) -> &'static str {
        match self {
            SortField::Brand => "Brand",
            SortField::Contract => "Contract",
            SortField::Data => "Data",
            SortField::Roaming => "Roaming",
            SortField::Speed => "Speed",
            SortField::Price => "Price/Month",
            SortField::Score => "Score",
        }
    }

    /// Ключ сортировки тарифа по этой колонке
    pub fn key(&self, plan: &Plan) -> SortKey {
        match self {
            SortField::Brand => SortKey::Text(plan.brand.to_lowercase()),
            SortField::Contract => SortKey::Text(plan.contract.to_lowercase()),
            SortField::Roaming => SortKey::Text(plan.roaming.to_lowercase()),
            SortField::Speed => SortKey::Text(plan.speed.to_lowercase()),
            SortField::Data => SortKey::Number(data_allowance_key(&plan.data)),
            SortField::Price => SortKey::Number(plan.price_per_month_gbp),
            SortField::Score => SortKey::Number(plan.competitiveness_score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Числовой ключ объёма данных: "Unlimited" больше любого числа,
/// "100GB" -> 100, строка без числа -> 0.
pub fn data_allowance_key(data: &str) -> f64 {
    if data.to_lowercase().contains("unlimited") {
        return f64::INFINITY;
    }
    match parse_leading_number(data) {
        Some(value) if !value.is_nan() && value != 0.0 => value,
        _ => 0.0,
    }
}

/// Ключ сортировки: строка в нижнем регистре или число
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            // NaN считается больше любого числа, чтобы порядок оставался полным
            (SortKey::Number(a), SortKey::Number(b)) => a
                .partial_cmp(b)
                .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Активная сортировка: одна колонка и направление
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Состояние сортировки. По умолчанию ничего не отсортировано.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    active: Option<ActiveSort>,
}

impl SortState {
    pub fn unsorted() -> Self {
        Self { active: None }
    }

    pub fn by(field: SortField, direction: SortDirection) -> Self {
        Self {
            active: Some(ActiveSort { field, direction }),
        }
    }

    pub fn active(&self) -> Option<ActiveSort> {
        self.active
    }

    pub fn field(&self) -> Option<SortField> {
        self.active.map(|a| a.field)
    }

    /// Направление для колонки, если сортировка идёт именно по ней
    pub fn direction_for(&self, field: SortField) -> Option<SortDirection> {
        self.active
            .filter(|a| a.field == field)
            .map(|a| a.direction)
    }

    /// Клик по заголовку колонки.
    ///
    /// Та же колонка: asc -> desc -> без сортировки -> asc.
    /// Другая колонка: сразу asc по новой колонке.
    pub fn toggle(&mut self, field: SortField) {
        self.active = match self.active {
            Some(ActiveSort {
                field: current,
                direction: SortDirection::Asc,
            }) if current == field => Some(ActiveSort {
                field,
                direction: SortDirection::Desc,
            }),
            Some(ActiveSort {
                field: current,
                direction: SortDirection::Desc,
            }) if current == field => None,
            _ => Some(ActiveSort {
                field,
                direction: SortDirection::Asc,
            }),
        };
    }
}

/// Упорядочивает уже отфильтрованные тарифы.
///
/// Сортировка стабильная: при равных ключах сохраняется входной порядок в
/// обоих направлениях. Без активной колонки вход возвращается как есть.
pub fn sort_plans<'a>(plans: Vec<&'a Plan>, sort: &SortState) -> Vec<&'a Plan> {
    let Some(ActiveSort { field, direction }) = sort.active() else {
        return plans;
    };

    let mut keyed: Vec<(SortKey, &'a Plan)> =
        plans.into_iter().map(|plan| (field.key(plan), plan)).collect();
    keyed.sort_by(|(a, _), (b, _)| direction.apply(a.compare(b)));
    keyed.into_iter().map(|(_, plan)| plan).collect()
}
