use contracts::domain::a001_competitive_analysis::aggregate::{Plan, PriceSuggestion, ProductAnalysis};
use contracts::shared::insight_icons::{change_icon, insight_icon, ScoreBand};
use contracts::shared::pricing::{best_suggestion, PriceChange};
use contracts::shared::source_label::extract_source_name;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use thaw::*;

use super::analysis_href;
use crate::domain::a001_competitive_analysis::api;
use crate::shared::icons::{choice_icon, icon_sized};
use crate::shared::list_utils::{format_price, format_score};
use crate::shared::page_frame::{DashboardHeader, PageCategory, PageFrame};
use crate::system::auth::context::use_auth;

const TOP_COMPARABLES: usize = 5;

/// Подпись изменения цены: "-£2.00 (8.3%)" для снижения, "+£1.50 (5.0%)" для роста
fn price_change_label(change: &PriceChange) -> String {
    let sign = if change.is_decrease() { "-" } else { "+" };
    format!(
        "{}{} ({:.1}%)",
        sign,
        format_price(change.amount.abs()),
        change.percentage.abs()
    )
}

fn detail_row(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-row">
            <span class="detail-row__label">{label}</span>
            <span class="detail-row__value">{value}</span>
        </div>
    }
}

fn breakdown_view(plan: &Plan) -> impl IntoView {
    let brand = detail_row("Brand", plan.brand.clone());
    let contract = detail_row("Contract", plan.contract.clone());
    let data = detail_row("Data", plan.data.clone());
    let roaming = detail_row("Roaming", plan.roaming.clone());
    let speed = detail_row("Speed", plan.speed.clone());
    let price = detail_row("Price", format_price(plan.price_per_month_gbp));
    let extras = detail_row("Extras", plan.extras_display().to_string());
    let source = detail_row("Source", extract_source_name(plan.source.as_deref()).to_string());
    view! {
        <Card class="product-breakdown">
            <h3>{icon_sized("credit-card", 18)} " Current plan"</h3>
            {brand}
            {contract}
            {data}
            {roaming}
            {speed}
            {price}
            {extras}
            {source}
        </Card>
    }
}

fn suggestion_view(
    current: f64,
    suggestion: &PriceSuggestion,
    best: Option<&PriceSuggestion>,
) -> impl IntoView {
    let change = PriceChange::between(current, suggestion.price);
    let is_best = best.is_some_and(|b| std::ptr::eq(b, suggestion));
    let class = if is_best {
        "suggestion suggestion--best"
    } else {
        "suggestion"
    };
    let change_view = change.is_significant().then(|| {
        let (icon_name, modifier) = if change.is_decrease() {
            ("trending-down", "decrease")
        } else {
            ("trending-up", "increase")
        };
        view! {
            <span class=format!("suggestion__change suggestion__change--{}", modifier)>
                {icon_sized(icon_name, 14)}
                {price_change_label(&change)}
            </span>
        }
    });

    view! {
        <div class=class>
            <div class="suggestion__head">
                <strong>{format_price(suggestion.price)}</strong>
                {change_view}
                {is_best.then(|| view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Best"</Badge>
                })}
            </div>
            <p class="suggestion__motivation">{suggestion.motivation.clone()}</p>
        </div>
    }
}

fn comparables_table(product: &ProductAnalysis) -> impl IntoView {
    let rows = product
        .top_comparables(TOP_COMPARABLES)
        .into_iter()
        .map(|plan| {
            let band = ScoreBand::from_score(plan.competitiveness_score);
            let brand = plan.brand.clone();
            let contract = plan.contract.clone();
            let data = plan.data.clone();
            let roaming = plan.roaming.clone();
            let price = format_price(plan.price_per_month_gbp);
            let score = format_score(plan.competitiveness_score);
            view! {
                <TableRow>
                    <TableCell><TableCellLayout>{brand}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{contract}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{data}</TableCellLayout></TableCell>
                    <TableCell><TableCellLayout>{roaming}</TableCellLayout></TableCell>
                    <TableCell>
                        <TableCellLayout>{price}</TableCellLayout>
                    </TableCell>
                    <TableCell>
                        <TableCellLayout>
                            <span class=format!("score-pill score-pill--{}", band.css_modifier())>
                                {score}
                            </span>
                        </TableCellLayout>
                    </TableCell>
                </TableRow>
            }
        })
        .collect_view();

    view! {
        <Table>
            <TableHeader>
                <TableRow>
                    <TableHeaderCell>"Brand"</TableHeaderCell>
                    <TableHeaderCell>"Contract"</TableHeaderCell>
                    <TableHeaderCell>"Data"</TableHeaderCell>
                    <TableHeaderCell>"Roaming"</TableHeaderCell>
                    <TableHeaderCell>"Price/Month"</TableHeaderCell>
                    <TableHeaderCell>"Score"</TableHeaderCell>
                </TableRow>
            </TableHeader>
            <TableBody>{rows}</TableBody>
        </Table>
    }
}

fn product_view(product: ProductAnalysis) -> impl IntoView {
    let current = product.current_price();
    let best = best_suggestion(&product.price_suggestions);
    let suggestions = product
        .price_suggestions
        .iter()
        .map(|s| suggestion_view(current, s, best))
        .collect_view();
    let insights = product
        .product_sentiments
        .iter()
        .map(|text| {
            view! {
                <li class="insight">
                    {choice_icon(insight_icon(text))}
                    <span>{text.clone()}</span>
                </li>
            }
        })
        .collect_view();
    let changes = product
        .product_changes
        .iter()
        .map(|text| {
            view! {
                <li class="insight">
                    {choice_icon(change_icon(text))}
                    <span>{text.clone()}</span>
                </li>
            }
        })
        .collect_view();

    view! {
        <div class="product-layout">
            {breakdown_view(&product.product_breakdown)}

            <section class="section">
                <h2 class="section__title">{icon_sized("sparkles", 18)} " Insights"</h2>
                <ul class="insight-list">{insights}</ul>
            </section>

            <section class="section">
                <h2 class="section__title">{icon_sized("lightbulb", 18)} " Recommended changes"</h2>
                <ul class="insight-list">{changes}</ul>
            </section>

            <section class="section">
                <h2 class="section__title">{icon_sized("dollar-sign", 18)} " Price suggestions"</h2>
                <div class="suggestion-list">{suggestions}</div>
            </section>

            <section class="section">
                <h2 class="section__title">{icon_sized("target", 18)} " Top comparable plans"</h2>
                {comparables_table(&product)}
            </section>
        </div>
    }
}

#[component]
pub fn ProductPage() -> impl IntoView {
    let params = use_params_map();
    let analysis_id = move || params.read().get("id").unwrap_or_default();
    let product_index = move || params.read().get("index").and_then(|i| i.parse::<usize>().ok());

    let (product, set_product) = signal(None::<ProductAnalysis>);
    let (error, set_error) = signal(None::<String>);
    let (auth_state, set_auth_state) = use_auth();

    Effect::new(move |_| {
        let id = analysis_id();
        let Some(index) = product_index() else {
            set_error.set(Some("Invalid product index".to_string()));
            return;
        };
        let token = auth_state.get_untracked().access_token;
        set_product.set(None);
        spawn_local(async move {
            let result = api::fetch_product(id, index, token).await;
            api::apply_result(result, set_product, set_error, set_auth_state);
        });
    });

    let title = Signal::derive(move || {
        product
            .get()
            .map(|p| p.product_name)
            .unwrap_or_else(|| "Product".to_string())
    });
    let description = Signal::derive(move || {
        product
            .get()
            .map(|p| format!("{} · {}", p.data_tier, p.roaming_tier))
            .unwrap_or_default()
    });
    let back_href = Signal::derive(move || analysis_href(&analysis_id()));

    view! {
        <PageFrame page_id="a001_competitive_analysis--product" category=PageCategory::Detail>
            <DashboardHeader title=title description=description back_href=back_href />
            <div class="page__content">
                {move || {
                    if let Some(message) = error.get() {
                        return view! {
                            <MessageBar intent=MessageBarIntent::Error>
                                <MessageBarBody>{message}</MessageBarBody>
                            </MessageBar>
                        }
                        .into_any();
                    }
                    match product.get() {
                        Some(p) => product_view(p).into_any(),
                        None => view! { <div class="page__loading"><Spinner /></div> }.into_any(),
                    }
                }}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_change_label() {
        let decrease = PriceChange::between(24.0, 22.0);
        assert_eq!(price_change_label(&decrease), "-£2.00 (8.3%)");
        let increase = PriceChange::between(20.0, 21.0);
        assert_eq!(price_change_label(&increase), "+£1.00 (5.0%)");
    }
}
