//! App shell: top bar plus sidebar navigation, wrapped around every
//! page except login.

use leptos::prelude::*;

use crate::components::icons::*;
use crate::session::{logout, use_session};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
fn NavItem(
    label: &'static str,
    route: AppRoute,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let route_for_class = route.clone();
    let is_active = move || router.current_route().get() == route_for_class;
    let on_click = move |_| router.navigate(&route.to_path());

    view! {
        <li>
            <a
                class=move || if is_active() { "active" } else { "" }
                on:click=on_click
            >
                {children()}
                {label}
            </a>
        </li>
    }
}

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let username = move || {
        session
            .state
            .get()
            .user
            .map(|u| u.username)
            .unwrap_or_default()
    };
    let has_user = move || session.state.get().user.is_some();

    let on_logout = move |_| {
        logout(&session);
        router.navigate("/");
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-sm px-4">
                <div class="flex-1 gap-2">
                    <ChartBar attr:class="h-6 w-6 text-primary" />
                    <span class="text-xl font-bold">"ChurnHub"</span>
                    <span class="badge badge-ghost hidden md:inline-flex">
                        "Customer Churn Platform"
                    </span>
                </div>
                <div class="flex-none gap-2">
                    <Show when=has_user>
                        <div class="badge badge-neutral gap-1">
                            <UserRound attr:class="h-3 w-3" />
                            {username}
                        </div>
                        <button on:click=on_logout class="btn btn-ghost btn-sm gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Logout"
                        </button>
                    </Show>
                </div>
            </div>

            <div class="flex">
                <aside class="w-60 min-h-screen bg-base-100 border-r border-base-300 hidden md:block">
                    <ul class="menu p-4 gap-1 w-full">
                        <NavItem label="Dashboard" route=AppRoute::Dashboard>
                            <ChartBar attr:class="h-4 w-4" />
                        </NavItem>
                        <NavItem label="Single Prediction" route=AppRoute::Predict>
                            <Sparkles attr:class="h-4 w-4" />
                        </NavItem>
                        <NavItem label="Batch Upload" route=AppRoute::Batch>
                            <CloudUpload attr:class="h-4 w-4" />
                        </NavItem>
                        <NavItem label="Prediction History" route=AppRoute::History>
                            <Clock attr:class="h-4 w-4" />
                        </NavItem>
                    </ul>
                </aside>

                <main class="flex-1 p-4 md:p-8">{children()}</main>
            </div>
        </div>
    }
}
