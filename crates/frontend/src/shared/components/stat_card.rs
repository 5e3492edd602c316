use crate::shared::icons::icon;
use leptos::prelude::*;

/// Карточка с одной метрикой: подпись, значение и пояснение
#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    #[prop(into)]
    value: Signal<String>,
    /// Optional subtitle below the value
    #[prop(into, optional)]
    subtitle: Option<Signal<String>>,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-card__header">
                <span class="stat-card__icon">{icon(icon_name)}</span>
                <span class="stat-card__label">{label}</span>
            </div>
            <div class="stat-card__value">{move || value.get()}</div>
            {subtitle.map(|s| view! { <div class="stat-card__subtitle">{move || s.get()}</div> })}
        </div>
    }
}
