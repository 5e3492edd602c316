use chrono::{DateTime, NaiveDateTime};
use contracts::domain::a001_competitive_analysis::aggregate::{
    CompetitiveAnalysis, Plan, ProductAnalysis, SentimentData,
};
use contracts::shared::insight_icons::{sentiment_icon, ScoreBand};
use contracts::shared::pricing::{best_suggestion, portfolio_summary, PortfolioSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use thaw::*;

use super::{dataset_href, product_href};
use crate::domain::a001_competitive_analysis::api;
use crate::shared::components::stat_card::StatCard;
use crate::shared::icons::{choice_icon, icon_sized};
use crate::shared::list_utils::{format_price, format_score};
use crate::shared::page_frame::{DashboardHeader, PageCategory, PageFrame};
use crate::system::auth::context::use_auth;

fn sentiment_row(sentiment: &SentimentData) -> impl IntoView {
    let band = ScoreBand::from_score(sentiment.score);
    view! {
        <div class=format!("sentiment sentiment--{}", band.css_modifier())>
            {choice_icon(sentiment_icon(&sentiment.sentiment, sentiment.score))}
            <div class="sentiment__body">
                <div class="sentiment__head">
                    <strong>{sentiment.sentiment.clone()}</strong>
                    <span class=format!("score-pill score-pill--{}", band.css_modifier())>
                        {format_score(sentiment.score)}
                    </span>
                </div>
                <p class="sentiment__rationale">{sentiment.rationale.clone()}</p>
            </div>
        </div>
    }
}

/// Дата анализа из `analysis_timestamp`: "11 Nov 2025".
/// Непонятная строка показывается как есть.
fn format_analysis_date(timestamp: &str) -> String {
    let timestamp = timestamp.trim();
    if timestamp.is_empty() {
        return "Unknown".to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return dt.format("%d %b %Y").to_string();
    }
    match NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format("%d %b %Y").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

fn overview_view(analysis: &CompetitiveAnalysis) -> impl IntoView {
    view! {
        <section class="section">
            <h2 class="section__title">{icon_sized("bar-chart", 18)} " Analysis overview"</h2>
            <div class="stat-row">
                <StatCard
                    label="Analysis date"
                    icon_name="clock"
                    value=format_analysis_date(&analysis.analysis_timestamp)
                />
                <StatCard
                    label="Sentiments"
                    icon_name="lightbulb"
                    value=analysis.overall_competitive_sentiments.len().to_string()
                />
                <StatCard
                    label="Products"
                    icon_name="briefcase"
                    value=analysis.products_analysis.len().to_string()
                />
                <StatCard
                    label="Total plans"
                    icon_name="database"
                    value=analysis.full_competitive_dataset_all_plans.len().to_string()
                />
            </div>
        </section>
    }
}

fn competitor_row(plan: &Plan) -> impl IntoView {
    view! {
        <div class="competitor">
            <div class="competitor__head">
                <strong>{plan.brand.clone()}</strong>
                <span>{format!("{}/mo", format_price(plan.price_per_month_gbp))}</span>
            </div>
            <div class="competitor__meta">
                {format!("{} · Score {}", plan.data, format_score(plan.competitiveness_score))}
            </div>
        </div>
    }
}

fn product_card(analysis_id: &str, index: usize, product: &ProductAnalysis) -> impl IntoView {
    let band = ScoreBand::from_score(product.competitiveness_score());
    let href = product_href(analysis_id, index);
    let best = best_suggestion(&product.price_suggestions).map(|s| {
        view! {
            <span class="product-card__suggestion">
                {icon_sized("trending-down", 14)}
                {format!("Best suggestion {}", format_price(s.price))}
            </span>
        }
    });
    let product_name = product.product_name.clone();
    let score = format_score(product.competitiveness_score());
    let data_tier = product.data_tier.clone();
    let roaming_tier = product.roaming_tier.clone();
    let price = format!("{} / month", format_price(product.current_price()));
    let competitors_heading = format!(" Top competitors ({})", product.comparable_products.len());
    let competitors = product.top_comparables(2).into_iter().map(competitor_row).collect_view();
    let insights = product
        .product_sentiments
        .iter()
        .take(2)
        .map(|insight| view! { <li>{insight.clone()}</li> })
        .collect_view();

    view! {
        <A href=href attr:class=format!("product-card product-card--{}", band.css_modifier())>
            <div class="product-card__head">
                <strong>{product_name}</strong>
                <span class=format!("score-pill score-pill--{}", band.css_modifier())>
                    {score}
                </span>
            </div>
            <div class="product-card__tiers">
                <span>{icon_sized("database", 14)} {data_tier}</span>
                <span>{icon_sized("globe", 14)} {roaming_tier}</span>
            </div>
            <div class="product-card__price">
                {price}
            </div>
            {best}
            <div class="product-card__block">
                <h4>
                    {icon_sized("trending-up", 12)}
                    {competitors_heading}
                </h4>
                {competitors}
            </div>
            <div class="product-card__block">
                <h4>{icon_sized("lightbulb", 12)} " Key insights"</h4>
                <ul class="product-card__insights">
                    {insights}
                </ul>
            </div>
            <span class="product-card__more">"View details " {icon_sized("arrow-right", 14)}</span>
        </A>
    }
}

fn portfolio_view(summary: PortfolioSummary) -> impl IntoView {
    let savings_class = if summary.potential_savings >= 0.0 {
        "portfolio__savings portfolio__savings--positive"
    } else {
        "portfolio__savings portfolio__savings--negative"
    };
    view! {
        <Card class="portfolio">
            <h3>{icon_sized("pie-chart", 18)} " Pricing portfolio"</h3>
            <div class="portfolio__grid">
                <div>
                    <span class="portfolio__label">"Products with suggestions"</span>
                    <strong>{summary.product_indices.len()}</strong>
                </div>
                <div>
                    <span class="portfolio__label">"Current total"</span>
                    <strong>{format_price(summary.total_current)}</strong>
                </div>
                <div>
                    <span class="portfolio__label">"Suggested total"</span>
                    <strong>{format_price(summary.total_suggested)}</strong>
                </div>
                <div class=savings_class>
                    <span class="portfolio__label">"Potential savings"</span>
                    <strong>
                        {format!(
                            "{} ({:.1}%)",
                            format_price(summary.potential_savings),
                            summary.savings_percentage,
                        )}
                    </strong>
                </div>
            </div>
        </Card>
    }
}

fn analysis_view(analysis: CompetitiveAnalysis) -> impl IntoView {
    let sentiments = analysis
        .sentiments_by_score()
        .into_iter()
        .map(sentiment_row)
        .collect_view();
    let products = analysis
        .products_by_score()
        .into_iter()
        .map(|(index, product)| product_card(&analysis.id, index, product))
        .collect_view();
    let portfolio = portfolio_summary(&analysis.products_analysis).map(portfolio_view);
    let overview = overview_view(&analysis);
    let dataset_link = dataset_href(&analysis.id);
    let plan_count = analysis.full_competitive_dataset_all_plans.len();

    view! {
        {overview}

        <section class="section">
            <h2 class="section__title">{icon_sized("bar-chart", 18)} " Market sentiment"</h2>
            <div class="sentiment-list">{sentiments}</div>
        </section>

        <section class="section">
            <h2 class="section__title">{icon_sized("briefcase", 18)} " Products"</h2>
            <div class="product-grid">{products}</div>
        </section>

        {portfolio}

        <section class="section">
            <A href=dataset_link attr:class="dataset-link">
                {icon_sized("table", 18)}
                <span>{format!("View full competitive dataset ({} plans)", plan_count)}</span>
                {icon_sized("arrow-right", 16)}
            </A>
        </section>
    }
}

#[component]
pub fn AnalysisPage() -> impl IntoView {
    let params = use_params_map();
    let analysis_id = move || params.read().get("id").unwrap_or_default();

    let (analysis, set_analysis) = signal(None::<CompetitiveAnalysis>);
    let (error, set_error) = signal(None::<String>);
    let (auth_state, set_auth_state) = use_auth();

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
        Some(a) => format!("Analysis #{}", a.short_id()),
        None => "Analysis".to_string(),
    });
    let description = Signal::derive(move || {
        analysis
            .get()
            .map(|a| {
                format!(
                    "{} · {} · {}",
                    a.created_at.format("%d %b %Y, %H:%M"),
                    a.currency,
                    a.llm_provider
                )
            })
            .unwrap_or_default()
    });

    view! {
        <PageFrame page_id="a001_competitive_analysis--detail" category=PageCategory::Detail>
            <DashboardHeader title=title description=description back_href="/".to_string() />
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
                        Some(a) => analysis_view(a).into_any(),
                        None => view! { <div class="page__loading"><Spinner /></div> }.into_any(),
                    }
                }}
            </div>
        </PageFrame>
    }
}
