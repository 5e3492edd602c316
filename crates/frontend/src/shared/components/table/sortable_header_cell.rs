//! Компонент сортируемой ячейки заголовка таблицы
//!
//! # Пример
//!
//! ```ignore
//! <SortableHeaderCell
//!     field=SortField::Price
//!     sort=Signal::derive(move || state.with(|s| s.sort))
//!     on_sort=Callback::new(move |field| state.update(|s| s.toggle_sort(field)))
//!     align="right"
//! />
//! ```

use contracts::shared::plan_table::{SortField, SortState};
use leptos::prelude::*;
use thaw::*;

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};

/// Заголовок колонки: клик переключает сортировку
/// (по возрастанию, по убыванию, без сортировки)
#[component]
pub fn SortableHeaderCell(
    field: SortField,

    /// Текущая сортировка таблицы
    #[prop(into)]
    sort: Signal<SortState>,

    /// Callback при клике на заголовок
    on_sort: Callback<SortField>,

    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; user-select: none;"
    } else {
        "cursor: pointer; user-select: none;"
    };

    view! {
        <TableHeaderCell>
            <div
                class="table__sortable-header"
                style=header_style
                title=format!("Sort by {}", field.label())
                on:click=move |_| on_sort.run(field)
            >
                {field.label()}
                <span class=move || get_sort_class(&sort.get(), field)>
                    {move || get_sort_indicator(&sort.get(), field)}
                </span>
            </div>
        </TableHeaderCell>
    }
}
