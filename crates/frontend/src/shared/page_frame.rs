//! PageFrame: standard root wrapper for every dashboard page.
//!
//! Sets `id` (`"{entity}--{category}"`, e.g. `"a001_competitive_analysis--dataset"`)
//! and `data-page-category` on the root element, so a page found in the DOM
//! inspector maps straight back to its module.

use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

use crate::shared::icons::icon_sized;
use crate::system::auth::context::{sign_out, use_auth};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageCategory {
    /// Список записей
    List,
    /// Карточка одной записи
    Detail,
    /// Аналитика: таблицы, сводки
    Dashboard,
    /// Системные страницы (вход)
    System,
}

impl PageCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            PageCategory::List => "list",
            PageCategory::Detail => "detail",
            PageCategory::Dashboard => "dashboard",
            PageCategory::System => "system",
        }
    }

    /// BEM-класс корневого элемента
    pub fn css_class(self) -> &'static str {
        match self {
            PageCategory::List | PageCategory::System => "page",
            PageCategory::Detail => "page page--detail",
            PageCategory::Dashboard => "page page--dashboard",
        }
    }
}

/// Root wrapper that sets standard metadata on every page.
#[component]
pub fn PageFrame(
    /// HTML id in format `{entity}--{category}`.
    page_id: &'static str,
    category: PageCategory,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            id=page_id
            class=category.css_class()
            data-page-category=category.as_str()
        >
            {children()}
        </div>
    }
}

/// Шапка страницы: заголовок, описание, ссылка назад и кнопка выхода
#[component]
pub fn DashboardHeader(
    #[prop(into)] title: Signal<String>,
    #[prop(optional, into)] description: Option<Signal<String>>,
    /// Куда ведёт "Back"; без значения ссылки нет
    #[prop(optional, into)]
    back_href: Option<Signal<String>>,
) -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let show_logout = move || auth_state.get().requires_auth == Some(true);

    view! {
        <div class="page__header">
            <div class="page__header-left">
                {back_href.map(|href| view! {
                    <A href=move || href.get() attr:class="back-link">
                        {icon_sized("arrow-left", 16)}
                        <span>"Back"</span>
                    </A>
                })}
                <h1 class="page__title">{move || title.get()}</h1>
                {description.map(|d| view! { <p class="page__description">{move || d.get()}</p> })}
            </div>
            <div class="page__header-right">
                <Show when=show_logout>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| sign_out(set_auth_state)
                    >
                        {icon_sized("log-out", 16)}
                        " Sign out"
                    </Button>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_category_classes() {
        assert_eq!(PageCategory::List.css_class(), "page");
        assert_eq!(PageCategory::Dashboard.css_class(), "page page--dashboard");
        assert_eq!(PageCategory::Detail.as_str(), "detail");
    }
}
