use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ChurnApi;
use crate::components::icons::{Search, Trash2};
use crate::models::{LIKELY_TO_CHURN, PredictionRecord};
use crate::session::use_session;
use crate::web::router::use_router;

const PAGE_SIZE: u32 = 20;

#[component]
pub fn HistoryPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();

    let (records, set_records) = signal(Vec::<PredictionRecord>::new());
    let (page, set_page) = signal(1u32);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (notice, set_notice) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());

    let load = move || {
        set_loading.set(true);
        set_error_msg.set(None);
        let current_page = page.get_untracked();
        spawn_local(async move {
            match ChurnApi::new().history(current_page, PAGE_SIZE).await {
                Ok(data) => {
                    set_records.try_set(data);
                }
                Err(e) => {
                    set_error_msg.try_set(Some(format!("Failed to load history: {}", e)));
                }
            }
            set_loading.try_set(false);
        });
    };

    // Initial load and reload on page change.
    Effect::new(move |_| {
        page.track();
        load();
    });

    let on_search = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let customer_id = search.get();
        let customer_id = customer_id.trim();
        if customer_id.is_empty() {
            return;
        }
        router.navigate(&format!("/report/{}", customer_id));
    };

    let is_admin = move || {
        session
            .state
            .get()
            .user
            .map(|u| u.is_admin())
            .unwrap_or(false)
    };

    let on_clear_all = move |_| {
        set_notice.set(None);
        spawn_local(async move {
            match ChurnApi::new().clear_all().await {
                Ok(res) => {
                    set_notice.try_set(Some(res.message));
                    set_page.try_set(1);
                }
                Err(e) => {
                    set_error_msg.try_set(Some(format!("Clear failed: {}", e)));
                }
            }
        });
    };

    view! {
        <div class="max-w-5xl mx-auto space-y-6">
            <div class="flex items-center justify-between flex-wrap gap-3">
                <h1 class="text-2xl font-bold">"Prediction History"</h1>
                <Show when=is_admin>
                    <button class="btn btn-outline btn-error btn-sm gap-2" on:click=on_clear_all>
                        <Trash2 attr:class="h-4 w-4" /> "Clear All"
                    </button>
                </Show>
            </div>

            <form class="join w-full max-w-md" on:submit=on_search>
                <input
                    type="text"
                    placeholder="Find customer report, e.g. CUST-42"
                    class="input input-bordered join-item w-full"
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                    prop:value=search
                />
                <button type="submit" class="btn btn-primary join-item gap-2">
                    <Search attr:class="h-4 w-4" /> "Open Report"
                </button>
            </form>

            <Show when=move || notice.get().is_some()>
                <div role="alert" class="alert alert-success">
                    <span>{move || notice.get().unwrap_or_default()}</span>
                </div>
            </Show>
            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Customer"</th>
                                    <th>"Contract"</th>
                                    <th>"Probability"</th>
                                    <th>"Result"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || {
                                    records.with(|r| r.is_empty()) && !loading.get()
                                }>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            "No predictions recorded yet."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || loading.get() && records.with(|r| r.is_empty())>
                                    <tr>
                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span>
                                            " Loading..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || records.get().into_iter().enumerate()
                                    key=|(i, r)| r.id.unwrap_or(*i as i64)
                                    children=move |(_, record)| {
                                        let customer_id = record.customer_id.clone();
                                        let open_report = move |_| {
                                            if let Some(id) = &customer_id {
                                                router.navigate(&format!("/report/{}", id));
                                            }
                                        };
                                        let label = record.label.clone();
                                        let label_class = if record.label == LIKELY_TO_CHURN {
                                            "text-error"
                                        } else {
                                            "text-success"
                                        };
                                        view! {
                                            <tr class="hover cursor-pointer" on:click=open_report>
                                                <td class="font-mono">
                                                    {record
                                                        .customer_id
                                                        .clone()
                                                        .unwrap_or_else(|| "—".to_string())}
                                                </td>
                                                <td>{record.contract.clone().unwrap_or_default()}</td>
                                                <td class="font-mono">
                                                    {format!("{:.3}", record.probability)}
                                                </td>
                                                <td class=label_class>{label}</td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>

                    <div class="join justify-center p-4">
                        <button
                            class="join-item btn btn-sm"
                            disabled=move || page.get() <= 1 || loading.get()
                            on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
                        >
                            "«"
                        </button>
                        <span class="join-item btn btn-sm btn-ghost no-animation">
                            {move || format!("Page {}", page.get())}
                        </span>
                        <button
                            class="join-item btn btn-sm"
                            disabled=move || {
                                loading.get() || records.with(|r| (r.len() as u32) < PAGE_SIZE)
                            }
                            on:click=move |_| set_page.update(|p| *p += 1)
                        >
                            "»"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
