mod table;

pub use table::PlanTable;

use contracts::domain::a001_competitive_analysis::aggregate::{CompetitiveAnalysis, Plan};
use contracts::shared::insight_icons::ScoreBand;
use contracts::shared::plan_table::PlanTableState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use thaw::*;

use super::analysis_href;
use crate::domain::a001_competitive_analysis::api;
use crate::shared::components::stat_card::StatCard;
use crate::shared::list_utils::{format_price, format_score};
use crate::shared::page_frame::{DashboardHeader, PageCategory, PageFrame};
use crate::system::auth::context::use_auth;

/// Сводка по одному бренду для обзора над таблицей
#[derive(Debug, Clone, PartialEq)]
struct BrandStats {
    brand: String,
    plan_count: usize,
    min_price: f64,
    max_price: f64,
    avg_score: f64,
}

fn brand_stats(brand: &str, plans: &[&Plan]) -> BrandStats {
    let prices = plans.iter().map(|p| p.price_per_month_gbp);
    let min_price = prices.clone().fold(f64::INFINITY, f64::min);
    let max_price = prices.fold(f64::NEG_INFINITY, f64::max);
    let total_score: f64 = plans.iter().map(|p| p.competitiveness_score).sum();
    BrandStats {
        brand: brand.to_string(),
        plan_count: plans.len(),
        min_price,
        max_price,
        avg_score: total_score / plans.len() as f64,
    }
}

/// Бренды в порядке первого появления вместе со своими тарифами
fn brand_overview(analysis: &CompetitiveAnalysis) -> Vec<(BrandStats, Vec<Plan>)> {
    analysis
        .plans_by_brand()
        .into_iter()
        .map(|(brand, plans)| {
            let stats = brand_stats(brand, &plans);
            (stats, plans.into_iter().cloned().collect())
        })
        .collect()
}

/// Вторая строка тарифа в списке бренда: контракт, опции, примечания
fn plan_details_line(plan: &Plan) -> String {
    let extras = match plan.extras.as_deref() {
        Some(extras) if !extras.is_empty() => extras,
        _ => "No extras",
    };
    format!("{} • {} • {}", plan.contract, extras, plan.notes_display())
}

fn brand_plan_row(plan: Plan) -> impl IntoView {
    view! {
        <div class="brand-plan">
            <div class="brand-plan__main">
                <div class="brand-plan__specs">
                    <span>{plan.data.clone()}</span>
                    <span>{plan.roaming.clone()}</span>
                    <span>{plan.speed.clone()}</span>
                </div>
                <div class="brand-plan__details">{plan_details_line(&plan)}</div>
            </div>
            <div class="brand-plan__price">
                <strong>{format!("{}/month", format_price(plan.price_per_month_gbp))}</strong>
                <span>{format!("Score {}", format_score(plan.competitiveness_score))}</span>
            </div>
        </div>
    }
}

fn price_range_label(stats: &BrandStats) -> String {
    if stats.min_price == stats.max_price {
        format_price(stats.min_price)
    } else {
        format!("{} – {}", format_price(stats.min_price), format_price(stats.max_price))
    }
}

fn brand_card(stats: BrandStats, plans: Vec<Plan>) -> impl IntoView {
    let band = ScoreBand::from_score(stats.avg_score);
    view! {
        <div class=format!("brand-card brand-card--{}", band.css_modifier())>
            <div class="brand-card__head">
                <strong>{stats.brand.clone()}</strong>
                <span class="brand-card__count">{format!("{} plans", stats.plan_count)}</span>
            </div>
            <div class="brand-card__price">{price_range_label(&stats)}</div>
            <div class="brand-card__score">{format!("Avg score {}", format_score(stats.avg_score))}</div>
            <div class="brand-card__plans">{plans.into_iter().map(brand_plan_row).collect_view()}</div>
        </div>
    }
}

fn dataset_view(analysis: CompetitiveAnalysis, state: RwSignal<PlanTableState>) -> impl IntoView {
    let overview = brand_overview(&analysis);
    let brand_count = overview.len();
    let plan_count = analysis.full_competitive_dataset_all_plans.len();
    let brands = overview
        .into_iter()
        .map(|(stats, plans)| brand_card(stats, plans))
        .collect_view();

    view! {
        <div class="stat-row">
            <StatCard label="Plans" icon_name="database" value=plan_count.to_string() />
            <StatCard label="Brands" icon_name="building" value=brand_count.to_string() />
        </div>
        <section class="section">
            <h2 class="section__title">"Brands"</h2>
            <div class="brand-grid">{brands}</div>
        </section>
        <section class="section">
            <h2 class="section__title">"All plans"</h2>
            <PlanTable plans=analysis.full_competitive_dataset_all_plans state=state />
        </section>
    }
}

#[component]
pub fn DatasetPage() -> impl IntoView {
    let params = use_params_map();
    let analysis_id = move || params.read().get("id").unwrap_or_default();

    let (analysis, set_analysis) = signal(None::<CompetitiveAnalysis>);
    let (error, set_error) = signal(None::<String>);
    let (auth_state, set_auth_state) = use_auth();
    // Фильтры и сортировка переживают перезагрузку данных
    let table_state = RwSignal::new(PlanTableState::new());

    Effect::new(move |_| {
        let id = analysis_id();
        let token = auth_state.get_untracked().access_token;
        set_analysis.set(None);
        spawn_local(async move {
            let result = api::fetch_analysis(id, token).await;
            api::apply_result(result, set_analysis, set_error, set_auth_state);
        });
    });

    let title = Signal::derive(move || match analysis.get() {
        Some(a) => format!("Competitive dataset · #{}", a.short_id()),
        None => "Competitive dataset".to_string(),
    });
    let back_href = Signal::derive(move || analysis_href(&analysis_id()));

    view! {
        <PageFrame page_id="a001_competitive_analysis--dataset" category=PageCategory::Dashboard>
            <DashboardHeader
                title=title
                description="Every plan collected for this analysis. Click a column to sort.".to_string()
                back_href=back_href
            />
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
                    match analysis.get() {
                        Some(a) => dataset_view(a, table_state).into_any(),
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
    use chrono::Utc;

    fn plan(brand: &str, price: f64, score: f64) -> Plan {
        Plan {
            brand: brand.to_string(),
            price_per_month_gbp: price,
            competitiveness_score: score,
            ..Plan::default()
        }
    }

    #[test]
    fn test_brand_overview() {
        let now = Utc::now();
        let analysis = CompetitiveAnalysis {
            id: "a".into(),
            analysis_timestamp: String::new(),
            currency: "GBP".into(),
            llm_provider: String::new(),
            overall_competitive_sentiments: vec![],
            products_analysis: vec![],
            full_competitive_dataset_all_plans: vec![
                plan("EE", 10.0, 60.0),
                plan("O2", 8.0, 70.0),
                plan("EE", 20.0, 80.0),
            ],
            created_at: now,
            updated_at: now,
        };
        let overview = brand_overview(&analysis);
        assert_eq!(overview.len(), 2);
        let (ee, ee_plans) = &overview[0];
        assert_eq!(ee.brand, "EE");
        assert_eq!(ee.plan_count, 2);
        assert_eq!((ee.min_price, ee.max_price), (10.0, 20.0));
        assert_eq!(ee.avg_score, 70.0);
        let prices: Vec<f64> = ee_plans.iter().map(|p| p.price_per_month_gbp).collect();
        assert_eq!(prices, vec![10.0, 20.0]);
        assert_eq!(price_range_label(ee), "£10.00 – £20.00");
        assert_eq!(price_range_label(&overview[1].0), "£8.00");
        assert_eq!(overview[1].1.len(), 1);
    }

    #[test]
    fn test_plan_details_line() {
        let mut p = plan("EE", 10.0, 60.0);
        p.contract = "24 months".into();
        p.notes = Some("5G".into());
        assert_eq!(plan_details_line(&p), "24 months • No extras • 5G");
        p.extras = Some("Disney+".into());
        assert_eq!(plan_details_line(&p), "24 months • Disney+ • 5G");
    }
}
