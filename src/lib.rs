//! ChurnHub frontend application.
//!
//! Context-driven layering with low coupling between the parts:
//! - `web::route` / `web::router`: route model and routing engine
//! - `session`: authentication state management
//! - `api`: typed backend client
//! - `components`: UI layer (thin pages over the client)

mod api;
mod models;
mod serde_helper;
mod session;
mod components {
    pub mod batch_upload;
    pub mod dashboard;
    pub mod history;
    mod icons;
    pub mod layout;
    pub mod login;
    pub mod report;
    mod report_text;
    pub mod single_predict;
}

// Native Web API wrapper module.
// Thin hand-rolled bindings over web_sys, replacing the gloo-* crates
// to keep the WASM binary small.
pub(crate) mod web;

use leptos::prelude::*;

use crate::components::batch_upload::BatchUploadPage;
use crate::components::dashboard::DashboardPage;
use crate::components::history::HistoryPage;
use crate::components::layout::AppShell;
use crate::components::login::LoginPage;
use crate::components::report::ReportPage;
use crate::components::single_predict::SinglePredictPage;
use crate::session::{SessionContext, init_session};
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// Map a route to its view. Authenticated pages render inside the
/// shared shell; login and 404 stand alone.
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! {
            <AppShell>
                <DashboardPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::Predict => view! {
            <AppShell>
                <SinglePredictPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::Batch => view! {
            <AppShell>
                <BatchUploadPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::History => view! {
            <AppShell>
                <HistoryPage />
            </AppShell>
        }
        .into_any(),
        AppRoute::Report(customer_id) => view! {
            <AppShell>
                <ReportPage customer_id=customer_id />
            </AppShell>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Session context first, so every page can reach it.
    let session_ctx = SessionContext::new();
    provide_context(session_ctx);

    // Bootstrap: load and verify any stored credential.
    init_session(&session_ctx);

    // The router only sees derived signals, never the session itself.
    let is_authenticated = session_ctx.is_authenticated_signal();
    let is_verifying = session_ctx.is_verifying_signal();

    view! {
        <Router is_authenticated=is_authenticated is_verifying=is_verifying>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
