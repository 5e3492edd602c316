//! Фильтрация и сортировка таблицы тарифов.
//!
//! Используется и фронтендом (таблица в браузере), и бэкендом
//! (`GET /api/analysis/:id/dataset`), поэтому всё здесь чистые функции.

pub mod filter;
pub mod number;
pub mod sort;
pub mod state;

pub use filter::{filter_plans, FilterField, PlanFilters};
pub use sort::{sort_plans, ActiveSort, SortDirection, SortField, SortKey, SortState};
pub use state::PlanTableState;
