use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;
use thaw::*;

use crate::domain::a001_competitive_analysis::ui::dataset::DatasetPage;
use crate::domain::a001_competitive_analysis::ui::details::AnalysisPage;
use crate::domain::a001_competitive_analysis::ui::list::AnalysisList;
use crate::domain::a001_competitive_analysis::ui::product::ProductPage;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="empty-state">
            <h2>"Page not found"</h2>
            <A href="/">"Back to analyses"</A>
        </div>
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <Router>
            <main class="app-main">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=AnalysisList />
                    <Route path=path!("/analysis/:id") view=AnalysisPage />
                    <Route path=path!("/analysis/:id/dataset") view=DatasetPage />
                    <Route path=path!("/analysis/:id/product/:index") view=ProductPage />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().requires_auth.is_some()
            fallback=|| view! { <div class="page__loading"><Spinner /></div> }
        >
            <Show
                when=move || auth_state.get().is_authorized()
                fallback=|| view! { <LoginPage /> }
            >
                <MainLayout />
            </Show>
        </Show>
    }
}
