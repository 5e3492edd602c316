//! Таблица всех тарифов с фильтрами по колонкам и сортировкой по клику.
//!
//! Состояние (`PlanTableState`) живёт в одном `RwSignal`; видимые строки
//! каждый раз пересчитываются из полного набора.

use contracts::domain::a001_competitive_analysis::aggregate::Plan;
use contracts::shared::insight_icons::ScoreBand;
use contracts::shared::plan_table::{FilterField, PlanTableState, SortField};
use contracts::shared::source_label::extract_source_name;
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::table::SortableHeaderCell;
use crate::shared::icons::icon_sized;
use crate::shared::list_utils::{format_price, format_score, showing_label};

fn filter_input(field: FilterField, state: RwSignal<PlanTableState>) -> impl IntoView {
    let is_price = matches!(field, FilterField::PriceMin | FilterField::PriceMax);
    view! {
        <input
            type="text"
            class=if is_price { "filter-input filter-input--price" } else { "filter-input" }
            inputmode=if is_price { "decimal" } else { "text" }
            placeholder=field.placeholder()
            prop:value=move || state.with(|s| s.filters.get(field).to_string())
            on:input=move |ev| state.update(|s| s.set_filter(field, event_target_value(&ev)))
        />
    }
}

fn plan_row(plan: Plan) -> impl IntoView {
    let band = ScoreBand::from_score(plan.competitiveness_score);
    let source = extract_source_name(plan.source.as_deref()).to_string();
    let brand = plan.brand.clone();
    let contract = plan.contract.clone();
    let data = plan.data.clone();
    let roaming = plan.roaming.clone();
    let speed = plan.speed.clone();
    let price = format_price(plan.price_per_month_gbp);
    let score = format_score(plan.competitiveness_score);
    let extras = plan.extras_display().to_string();
    let notes = plan.notes_display().to_string();
    view! {
        <TableRow>
            <TableCell><TableCellLayout>{brand}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{contract}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{data}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{roaming}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{speed}</TableCellLayout></TableCell>
            <TableCell>
                <TableCellLayout attr:class="cell--number">
                    {price}
                </TableCellLayout>
            </TableCell>
            <TableCell>
                <TableCellLayout>
                    <span class=format!("score-pill score-pill--{}", band.css_modifier())>
                        {score}
                    </span>
                </TableCellLayout>
            </TableCell>
            <TableCell><TableCellLayout>{extras}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{notes}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{source}</TableCellLayout></TableCell>
        </TableRow>
    }
}

#[component]
pub fn PlanTable(
    /// Полный набор тарифов анализа
    plans: Vec<Plan>,
    state: RwSignal<PlanTableState>,
) -> impl IntoView {
    let plans = StoredValue::new(plans);

    let sort = Signal::derive(move || state.with(|s| s.sort));
    let on_sort = Callback::new(move |field: SortField| {
        state.update(|s| s.toggle_sort(field));
    });

    let visible = move || {
        plans.with_value(|all| {
            state.with(|s| s.visible_rows(all).into_iter().cloned().collect::<Vec<Plan>>())
        })
    };
    let counts = move || plans.with_value(|all| state.with(|s| s.counts(all)));
    let has_filters = move || state.with(|s| s.has_active_filters());

    view! {
        <div class="plan-table">
            <div class="plan-table__filters">
                {FilterField::ALL
                    .into_iter()
                    .map(|field| filter_input(field, state))
                    .collect_view()}
                <Show when=has_filters>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| state.update(|s| s.clear_filters())
                    >
                        {icon_sized("x", 14)}
                        " Clear All"
                    </Button>
                </Show>
            </div>

            <div class="plan-table__summary">
                {move || {
                    let (shown, total) = counts();
                    showing_label(shown, total)
                }}
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        {SortField::ALL
                            .into_iter()
                            .map(|field| {
                                let align = if matches!(field, SortField::Price | SortField::Score) {
                                    "right"
                                } else {
                                    "left"
                                };
                                view! {
                                    <SortableHeaderCell field=field sort=sort on_sort=on_sort align=align />
                                }
                            })
                            .collect_view()}
                        <TableHeaderCell>"Extras"</TableHeaderCell>
                        <TableHeaderCell>"Notes"</TableHeaderCell>
                        <TableHeaderCell>"Source"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let rows = visible();
                        if rows.is_empty() {
                            view! {
                                <TableRow>
                                    <TableCell attr:colspan="10">
                                        <TableCellLayout>"No plans match the current filters"</TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any()
                        } else {
                            rows.into_iter().map(plan_row).collect_view().into_any()
                        }
                    }}
                </TableBody>
            </Table>
        </div>
    }
}
