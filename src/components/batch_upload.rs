use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::ChurnApi;
use crate::components::icons::{CloudUpload, Download, FileText, Sparkles};
use crate::components::report_text::ReportText;
use crate::models::{BatchResponse, LIKELY_TO_CHURN};

/// Save a blob through a temporary object URL and a synthetic anchor
/// click.
fn save_blob(blob: &web_sys::Blob, filename: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(url) = web_sys::Url::create_object_url_with_blob(blob) else {
        return;
    };
    if let Ok(anchor) = document
        .create_element("a")
        .map(|el| el.unchecked_into::<web_sys::HtmlAnchorElement>())
    {
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();
    }
    let _ = web_sys::Url::revoke_object_url(&url);
}

#[component]
pub fn BatchUploadPage() -> impl IntoView {
    // web_sys::File is not Send; keep it in arena-local storage.
    let file = RwSignal::new_local(Option::<web_sys::File>::None);

    let (result, set_result) = signal(Option::<BatchResponse>::None);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (loading, set_loading) = signal(false);

    let on_file_change = move |ev: leptos::web_sys::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        let selected = input.files().and_then(|list| list.get(0));
        if selected.is_some() {
            set_error_msg.set(None);
        }
        file.set(selected);
    };

    let on_upload = move |_| {
        let Some(csv) = file.get_untracked() else {
            set_error_msg.set(Some("Please select a CSV file first".to_string()));
            return;
        };

        set_loading.set(true);
        set_error_msg.set(None);
        set_result.set(None);

        spawn_local(async move {
            match ChurnApi::new().predict_batch(&csv).await {
                Ok(res) => {
                    set_result.try_set(Some(res));
                }
                Err(e) => {
                    set_error_msg.try_set(Some(format!("Batch prediction failed: {}", e)));
                }
            }
            set_loading.try_set(false);
        });
    };

    let on_download = move |_| {
        let Some(csv) = file.get_untracked() else {
            set_error_msg.set(Some("Upload a CSV first to download results".to_string()));
            return;
        };

        set_error_msg.set(None);
        spawn_local(async move {
            match ChurnApi::new().predict_batch_csv(&csv).await {
                Ok(blob) => save_blob(&blob, "churn_predictions.csv"),
                Err(e) => {
                    set_error_msg.try_set(Some(format!("Download failed: {}", e)));
                }
            }
        });
    };

    let file_name = move || file.get().map(|f| f.name());

    view! {
        <div class="max-w-4xl mx-auto space-y-6">
            <div>
                <h1 class="text-2xl font-bold">"Batch Upload"</h1>
                <p class="text-base-content/70">
                    "Upload a CSV of customers to get bulk predictions and insights."
                </p>
            </div>

            <div class="card bg-base-100 border-2 border-dashed border-primary rounded-box">
                <div class="card-body items-center text-center py-10">
                    <CloudUpload attr:class="h-14 w-14 text-primary" />
                    <h3 class="text-lg font-semibold">"Choose your CSV"</h3>
                    <p class="text-sm text-base-content/70">
                        "Columns must match the training schema."
                    </p>
                    <input
                        type="file"
                        accept=".csv"
                        class="file-input file-input-bordered file-input-primary mt-2"
                        on:change=on_file_change
                    />
                    <Show when=move || file_name().is_some()>
                        <div class="badge badge-ghost gap-1 mt-2">
                            <FileText attr:class="h-3 w-3" />
                            {move || file_name().unwrap_or_default()}
                        </div>
                    </Show>
                </div>
            </div>

            <div class="flex gap-3">
                <button
                    class="btn btn-primary flex-1 gap-2"
                    on:click=on_upload
                    disabled=move || loading.get() || file.get().is_none()
                >
                    <Sparkles attr:class="h-4 w-4" />
                    {move || if loading.get() { "Processing..." } else { "Run Predictions" }}
                </button>
                <button
                    class="btn btn-outline gap-2"
                    on:click=on_download
                    disabled=move || file.get().is_none()
                >
                    <Download attr:class="h-4 w-4" /> "Download CSV"
                </button>
            </div>

            <Show when=move || loading.get()>
                <progress class="progress progress-primary w-full"></progress>
            </Show>

            <Show when=move || error_msg.get().is_some()>
                <div role="alert" class="alert alert-error">
                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                </div>
            </Show>

            <Show when=move || result.get().is_some()>
                {move || {
                    let res = result.get().unwrap();
                    view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body">
                                <div class="flex items-center justify-between">
                                    <h3 class="card-title text-base">"Results Preview"</h3>
                                    <span class="badge badge-primary">
                                        {format!("Processed: {}", res.processed)}
                                    </span>
                                </div>
                                <div class="overflow-x-auto max-h-80">
                                    <table class="table table-sm table-pin-rows w-full">
                                        <thead>
                                            <tr>
                                                <th>"Customer"</th>
                                                <th>"Probability"</th>
                                                <th>"Label"</th>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {res
                                                .results_preview
                                                .iter()
                                                .map(|row| {
                                                    let badge = if row.label == LIKELY_TO_CHURN {
                                                        "badge badge-error badge-sm"
                                                    } else {
                                                        "badge badge-success badge-sm"
                                                    };
                                                    view! {
                                                        <tr class="hover">
                                                            <td class="font-mono">
                                                                {row
                                                                    .customer_id
                                                                    .clone()
                                                                    .unwrap_or_else(|| {
                                                                        format!("row {}", row.row.unwrap_or_default())
                                                                    })}
                                                            </td>
                                                            <td>{format!("{:.1}%", row.probability * 100.0)}</td>
                                                            <td>
                                                                <span class=badge>{row.label.clone()}</span>
                                                            </td>
                                                        </tr>
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                </div>
                            </div>
                        </div>

                        {res
                            .summary
                            .clone()
                            .map(|summary| {
                                view! {
                                    <div class="card bg-base-100 shadow-xl">
                                        <div class="card-body">
                                            <h3 class="card-title text-base gap-2">
                                                <Sparkles attr:class="h-4 w-4 text-primary" />
                                                "Strategic Insights"
                                            </h3>
                                            <ReportText text=summary />
                                        </div>
                                    </div>
                                }
                            })}
                    }
                }}
            </Show>
        </div>
    }
}
