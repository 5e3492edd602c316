use chrono::{DateTime, Utc};
use contracts::domain::a001_competitive_analysis::aggregate::AnalysisSummary;
use contracts::shared::insight_icons::ScoreBand;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

use super::analysis_href;
use crate::domain::a001_competitive_analysis::api;
use crate::shared::icons::icon_sized;
use crate::shared::page_frame::{DashboardHeader, PageCategory, PageFrame};
use crate::system::auth::context::use_auth;

/// Дата карточки: "11 Nov 2025, 09:30"
fn format_created(created_at: &DateTime<Utc>) -> String {
    created_at.format("%d %b %Y, %H:%M").to_string()
}

fn summary_card(item: AnalysisSummary) -> impl IntoView {
    let href = analysis_href(&item.id);
    let score_view = item.average_score.map(|score| {
        let band = ScoreBand::from_score(score as f64);
        view! {
            <span class=format!("score-pill score-pill--{}", band.css_modifier())>
                {format!("Avg score {}", score)}
            </span>
        }
    });
    let meta = [item.currency.clone(), item.llm_provider.clone()]
        .into_iter()
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");

    view! {
        <A href=href attr:class="analysis-card">
            <Card>
                <div class="analysis-card__head">
                    <span class="analysis-card__badge">{item.badge.clone()}</span>
                    <div class="analysis-card__title">
                        <strong>{format!("Analysis #{}", item.short_id)}</strong>
                        <span class="analysis-card__date">
                            {icon_sized("clock", 14)}
                            {format_created(&item.created_at)}
                        </span>
                    </div>
                    {score_view}
                </div>
                <div class="analysis-card__stats">
                    <span>{format!("{} sentiments", item.sentiment_count)}</span>
                    <span>{format!("{} products", item.product_count)}</span>
                    <span>{format!("{} plans", item.plan_count)}</span>
                </div>
                <div class="analysis-card__meta">{meta}</div>
            </Card>
        </A>
    }
}

#[component]
pub fn AnalysisList() -> impl IntoView {
    let (items, set_items) = signal(None::<Vec<AnalysisSummary>>);
    let (error, set_error) = signal(None::<String>);
    let (auth_state, set_auth_state) = use_auth();

    let load = move || {
        let token = auth_state.get_untracked().access_token;
        set_items.set(None);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_list(token).await;
            api::apply_result(result, set_items, set_error, set_auth_state);
        });
    };

    Effect::new(move |_| load());

    view! {
        <PageFrame page_id="a001_competitive_analysis--list" category=PageCategory::List>
            <DashboardHeader
                title="Competitive Analyses".to_string()
                description="Pre-computed market analyses, newest first".to_string()
            />
            <div class="page__content">
                <Flex justify=FlexJustify::End>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| load()>
                        "Refresh"
                    </Button>
                </Flex>
                {move || {
                    if let Some(message) = error.get() {
                        return view! {
                            <MessageBar intent=MessageBarIntent::Error>
                                <MessageBarBody>{message}</MessageBarBody>
                            </MessageBar>
                        }
                        .into_any();
                    }
                    match items.get() {
                        None => view! { <div class="page__loading"><Spinner /></div> }.into_any(),
                        Some(list) if list.is_empty() => view! {
                            <div class="empty-state">
                                {icon_sized("database", 32)}
                                <p>"No analyses found"</p>
                            </div>
                        }
                        .into_any(),
                        Some(list) => view! {
                            <div class="analysis-grid">
                                {list.into_iter().map(summary_card).collect_view()}
                            </div>
                        }
                        .into_any(),
                    }
                }}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_created() {
        let ts = Utc.with_ymd_and_hms(2025, 11, 11, 9, 30, 0).unwrap();
        assert_eq!(format_created(&ts), "11 Nov 2025, 09:30");
    }
}
