use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ChurnApi;
use crate::components::icons::{ArrowLeft, Clock, Download, UserRound};
use crate::components::report_text::ReportText;
use crate::models::{LIKELY_TO_CHURN, PredictionRecord};
use crate::web::router::use_router;

#[component]
pub fn ReportPage(customer_id: String) -> impl IntoView {
    let router = use_router();

    let (record, set_record) = signal(Option::<PredictionRecord>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let pdf_url = ChurnApi::new().report_pdf_url(&customer_id);

    {
        let customer_id = customer_id.clone();
        spawn_local(async move {
            match ChurnApi::new().report(&customer_id).await {
                Ok(data) => {
                    set_record.try_set(Some(data));
                }
                Err(e) => {
                    set_error_msg.try_set(Some(format!("Report not found: {}", e)));
                }
            }
            set_loading.try_set(false);
        });
    }

    let go_back = move |_| router.navigate("/history");

    let on_pdf = move |_| {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(&pdf_url, "_blank");
        }
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            <div class="flex items-center gap-3">
                <button class="btn btn-ghost btn-sm gap-2" on:click=go_back>
                    <ArrowLeft attr:class="h-4 w-4" /> "Back"
                </button>
                <h1 class="text-2xl font-bold">"Customer Report"</h1>
            </div>

            <Show when=move || loading.get()>
                <div class="flex justify-center py-16">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            </Show>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || record.get().is_some()>
                {
                    let on_pdf = on_pdf.clone();
                    move || {
                    let on_pdf = on_pdf.clone();
                    let rec = record.get().unwrap();
                    let badge_class = if rec.label == LIKELY_TO_CHURN {
                        "badge badge-error badge-lg"
                    } else {
                        "badge badge-success badge-lg"
                    };
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body space-y-4">
                                <div class="flex items-center justify-between flex-wrap gap-2">
                                    <div class="flex items-center gap-2">
                                        <UserRound attr:class="h-6 w-6 text-primary" />
                                        <span class="text-xl font-mono font-bold">
                                            {rec.customer_id.clone().unwrap_or_default()}
                                        </span>
                                    </div>
                                    <span class=badge_class>{rec.label.clone()}</span>
                                </div>

                                <div class="stats stats-vertical sm:stats-horizontal shadow">
                                    <div class="stat">
                                        <div class="stat-title">"Churn Probability"</div>
                                        <div class="stat-value text-primary font-mono">
                                            {format!("{:.3}", rec.probability)}
                                        </div>
                                    </div>
                                    <div class="stat">
                                        <div class="stat-title">"Contract"</div>
                                        <div class="stat-value text-lg">
                                            {rec.contract.clone().unwrap_or_else(|| "—".to_string())}
                                        </div>
                                    </div>
                                    <div class="stat">
                                        <div class="stat-title">"Tenure"</div>
                                        <div class="stat-value text-lg">
                                            {rec
                                                .tenure
                                                .map(|t| format!("{} months", t))
                                                .unwrap_or_else(|| "—".to_string())}
                                        </div>
                                    </div>
                                </div>

                                {rec
                                    .created_at
                                    .clone()
                                    .map(|ts| {
                                        view! {
                                            <div class="flex items-center gap-2 text-sm text-base-content/60">
                                                <Clock attr:class="h-4 w-4" />
                                                {ts}
                                            </div>
                                        }
                                    })}

                                {rec
                                    .explanation
                                    .clone()
                                    .map(|text| {
                                        view! {
                                            <div>
                                                <h3 class="font-semibold mb-2">"Analysis"</h3>
                                                <ReportText text=text />
                                            </div>
                                        }
                                    })}

                                <div class="card-actions justify-end">
                                    <button class="btn btn-primary gap-2" on:click=on_pdf>
                                        <Download attr:class="h-4 w-4" /> "Download PDF"
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                }}
            </Show>
        </div>
    }
}
