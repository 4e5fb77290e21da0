use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ChurnApi;
use crate::components::icons::RefreshCw;
use crate::models::{
    AnalyticsSummary, ContractChurn, LIKELY_TO_CHURN, PredictionRecord, ProbabilityBucket,
};
use crate::web::router::use_router;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let router = use_router();

    let (summary, set_summary) = signal(AnalyticsSummary::default());
    let (prob_dist, set_prob_dist) = signal(Vec::<ProbabilityBucket>::new());
    let (contract_stats, set_contract_stats) = signal(Vec::<ContractChurn>::new());
    let (top_risk, set_top_risk) = signal(Vec::<PredictionRecord>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load = move || {
        let api = ChurnApi::new();
        set_loading.set(true);
        set_error_msg.set(None);

        // Four independent requests; completions interleave in arrival
        // order. The KPI failure is surfaced, chart failures degrade to
        // empty datasets so the page still renders.
        spawn_local({
            let api = api.clone();
            async move {
                match api.analytics_summary().await {
                    Ok(data) => {
                        set_summary.try_set(data);
                    }
                    Err(e) => {
                        set_error_msg.try_set(Some(format!("Failed to load analytics: {}", e)));
                    }
                }
                set_loading.try_set(false);
            }
        });
        spawn_local({
            let api = api.clone();
            async move {
                let data = api.probability_distribution().await.unwrap_or_default();
                set_prob_dist.try_set(data);
            }
        });
        spawn_local({
            let api = api.clone();
            async move {
                let data = api.churn_by_contract().await.unwrap_or_default();
                set_contract_stats.try_set(data);
            }
        });
        spawn_local(async move {
            let data = api.top_risk().await.unwrap_or_default();
            set_top_risk.try_set(data);
        });
    };

    Effect::new(move |_| load());

    let max_bucket = move || prob_dist.with(|d| d.iter().map(|b| b.count).max().unwrap_or(0));

    view! {
        <div class="max-w-7xl mx-auto space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-2xl font-bold">"Customer Churn Dashboard"</h1>
                <button
                    on:click=move |_| load()
                    disabled=move || loading.get()
                    class="btn btn-ghost btn-circle"
                >
                    <RefreshCw attr:class=move || {
                        if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" }
                    } />
                </button>
            </div>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <div class="stat">
                    <div class="stat-title">"Total Predictions"</div>
                    <div class="stat-value text-primary">
                        {move || summary.get().total_predictions}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Average Probability"</div>
                    <div class="stat-value">
                        {move || format!("{:.1}%", summary.get().average_probability * 100.0)}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">"High Risk Customers"</div>
                    <div class="stat-value text-error">
                        {move || summary.get().high_risk_customers}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">"Churn Rate"</div>
                    <div class="stat-value text-secondary">
                        {move || format!("{:.1}%", summary.get().churn_rate)}
                    </div>
                </div>
            </div>

            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title text-base">"Churn Probability Distribution"</h3>
                        <div class="flex items-end gap-3 h-48 mt-4">
                            <For
                                each=move || prob_dist.get()
                                key=|b| b.bucket.clone()
                                children=move |bucket| {
                                    let count = bucket.count;
                                    let height = move || {
                                        let max = max_bucket().max(1);
                                        format!("height: {}%", (count * 100 / max).max(2))
                                    };
                                    view! {
                                        <div class="flex-1 flex flex-col items-center gap-1 h-full justify-end">
                                            <span class="text-xs font-mono">{count}</span>
                                            <div class="w-full bg-primary rounded-t" style=height></div>
                                            <span class="text-xs text-base-content/60">
                                                {bucket.bucket.clone()}
                                            </span>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title text-base">"Churn by Contract Type"</h3>
                        <div class="space-y-3 mt-4">
                            <For
                                each=move || contract_stats.get()
                                key=|c| c.contract.clone()
                                children=move |stat| {
                                    let width = format!("width: {:.0}%", stat.churn_rate.clamp(0.0, 100.0));
                                    view! {
                                        <div>
                                            <div class="flex justify-between text-sm mb-1">
                                                <span>{stat.contract.clone()}</span>
                                                <span class="font-mono">
                                                    {format!("{:.1}%", stat.churn_rate)}
                                                </span>
                                            </div>
                                            <div class="w-full bg-base-200 rounded h-3">
                                                <div class="bg-secondary h-3 rounded" style=width></div>
                                            </div>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    </div>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <h3 class="card-title text-base p-6 pb-2">"Top High-Risk Customers"</h3>
                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Customer"</th>
                                    <th>"Contract"</th>
                                    <th>"Tenure"</th>
                                    <th>"Probability"</th>
                                    <th>"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || top_risk.with(|r| r.is_empty())>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            "No predictions yet."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || top_risk.get().into_iter().enumerate()
                                    key=|(i, _)| *i
                                    children=move |(_, record)| {
                                        let customer_id = record.customer_id.clone();
                                        let open_report = move |_| {
                                            if let Some(id) = &customer_id {
                                                router.navigate(&format!("/report/{}", id));
                                            }
                                        };
                                        let label = record.label.clone();
                                        let label_class = if record.label == LIKELY_TO_CHURN {
                                            "text-error font-semibold"
                                        } else {
                                            "text-success font-semibold"
                                        };
                                        view! {
                                            <tr class="hover cursor-pointer" on:click=open_report>
                                                <td class="font-mono">
                                                    {record.customer_id.clone().unwrap_or_else(|| "—".to_string())}
                                                </td>
                                                <td>{record.contract.clone().unwrap_or_default()}</td>
                                                <td>{record.tenure.unwrap_or_default()}</td>
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
                </div>
            </div>
        </div>
    }
}
