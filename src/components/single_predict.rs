mod form_state;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ChurnApi;
use crate::components::report_text::ReportText;
use crate::models::{LIKELY_TO_CHURN, PredictResponse};
use form_state::FormState;

#[component]
fn Field(
    label: &'static str,
    value: RwSignal<String>,
    #[prop(optional)] numeric: bool,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                type=if numeric { "number" } else { "text" }
                step="any"
                on:input=move |ev| value.set(event_target_value(&ev))
                prop:value=value
                class="input input-bordered w-full"
            />
        </div>
    }
}

#[component]
pub fn SinglePredictPage() -> impl IntoView {
    let form = FormState::new();

    let (result, set_result) = signal(Option::<PredictResponse>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        let req = match form.to_request() {
            Ok(req) => req,
            Err(msg) => {
                set_error_msg.set(Some(msg));
                return;
            }
        };

        set_submitting.set(true);
        set_result.set(None);
        spawn_local(async move {
            match ChurnApi::new().predict_simple(&req).await {
                Ok(res) => {
                    set_result.try_set(Some(res));
                }
                Err(e) => {
                    set_error_msg.try_set(Some(format!("Prediction failed: {}", e)));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="max-w-5xl mx-auto space-y-6">
            <h1 class="text-2xl font-bold">"Single Customer Prediction"</h1>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_submit>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <Field label="Customer ID" value=form.customer_id />
                        <Field label="Gender" value=form.gender />
                        <Field label="Senior Citizen (0/1)" value=form.senior_citizen numeric=true />
                        <Field label="Partner" value=form.partner />
                        <Field label="Dependents" value=form.dependents />
                        <Field label="Tenure" value=form.tenure numeric=true />
                        <Field label="Phone Service" value=form.phone_service />
                        <Field label="Multiple Lines" value=form.multiple_lines />
                        <Field label="Internet Service" value=form.internet_service />
                        <Field label="Online Security" value=form.online_security />
                        <Field label="Online Backup" value=form.online_backup />
                        <Field label="Device Protection" value=form.device_protection />
                        <Field label="Tech Support" value=form.tech_support />
                        <Field label="Streaming TV" value=form.streaming_tv />
                        <Field label="Streaming Movies" value=form.streaming_movies />
                        <Field label="Contract" value=form.contract />
                        <Field label="Paperless Billing" value=form.paperless_billing />
                        <Field label="Payment Method" value=form.payment_method />
                        <Field label="Monthly Charges" value=form.monthly_charges numeric=true />
                        <Field label="Total Charges" value=form.total_charges numeric=true />
                    </div>

                    <div class="mt-6 flex gap-2">
                        <button
                            type="submit"
                            class="btn btn-primary btn-wide"
                            disabled=move || submitting.get()
                        >
                            {move || if submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Scoring..." }
                                    .into_any()
                            } else {
                                "Predict".into_any()
                            }}
                        </button>
                        <button
                            type="button"
                            class="btn btn-ghost"
                            on:click=move |_| form.reset()
                        >
                            "Reset"
                        </button>
                    </div>
                </form>
            </div>

            // The label and probability come straight from the backend;
            // nothing is recomputed client-side.
            <Show when=move || result.get().is_some()>
                {move || {
                    let res = result.get().unwrap();
                    let badge_class = if res.label == LIKELY_TO_CHURN {
                        "badge badge-error badge-lg"
                    } else {
                        "badge badge-success badge-lg"
                    };
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <div class="flex items-center justify-between">
                                    <h3 class="card-title">"Result"</h3>
                                    <span class=badge_class>{res.label.clone()}</span>
                                </div>
                                <p class="text-lg">
                                    "Probability: "
                                    <span class="font-mono font-bold">
                                        {format!("{:.3}", res.probability)}
                                    </span>
                                </p>
                                {res
                                    .explanation
                                    .clone()
                                    .map(|text| view! { <ReportText text=text /> })}
                            </div>
                        </div>
                    }
                }}
            </Show>
        </div>
    }
}
