use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::icons::ChartBar;
use crate::session::{login, register, use_session};
use crate::web::router::use_navigate;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_register, set_is_register) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (notice, set_notice) = signal(Option::<String>::None);

    let toggle_mode = move |_| {
        set_is_register.update(|v| *v = !*v);
        set_error_msg.set(None);
        set_notice.set(None);
        set_username.set(String::new());
        set_email.set(String::new());
        set_password.set(String::new());
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);
        set_notice.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            if is_register.get_untracked() {
                match register(
                    username.get_untracked(),
                    email.get_untracked(),
                    password.get_untracked(),
                )
                .await
                {
                    Ok(()) => {
                        // Registration never logs in; flip back to the
                        // login form instead.
                        set_is_register.try_set(false);
                        set_email.try_set(String::new());
                        set_notice
                            .try_set(Some("Registration successful! Please login.".to_string()));
                    }
                    Err(e) => {
                        set_error_msg.try_set(Some(e.to_string()));
                    }
                }
            } else {
                match login(&session, username.get_untracked(), password.get_untracked()).await {
                    Ok(()) => navigate("/dashboard"),
                    Err(e) => {
                        set_error_msg.try_set(Some(e.to_string()));
                    }
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ChartBar attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold uppercase tracking-tight">"Churn"</h1>
                        <p class="text-base-content/70 tracking-widest uppercase text-sm">
                            "Intelligence Hub"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <h2 class="text-xl font-bold text-center">
                            {move || if is_register.get() { "Create Account" } else { "Welcome Back" }}
                        </h2>
                        <p class="text-center text-base-content/70 text-sm mb-2">
                            {move || if is_register.get() {
                                "Start monitoring your customer health"
                            } else {
                                "Sign in to your dashboard"
                            }}
                        </p>

                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>
                        <Show when=move || notice.get().is_some()>
                            <div role="alert" class="alert alert-success text-sm py-2">
                                <span>{move || notice.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show when=move || is_register.get()>
                            <div class="form-control">
                                <label class="label" for="email">
                                    <span class="label-text">"Email Address"</span>
                                </label>
                                <input
                                    id="email"
                                    type="email"
                                    placeholder="you@company.com"
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                    prop:value=email
                                    class="input input-bordered"
                                    required
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                placeholder="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Working..." }.into_any()
                                } else if is_register.get() {
                                    "Sign Up Now".into_any()
                                } else {
                                    "Login to Hub".into_any()
                                }}
                            </button>
                        </div>

                        <div class="text-center mt-4 text-sm text-base-content/70">
                            {move || if is_register.get() {
                                "Already part of the network?"
                            } else {
                                "New to the platform?"
                            }}
                            <button
                                type="button"
                                class="btn btn-link btn-sm no-underline"
                                on:click=toggle_mode
                            >
                                {move || if is_register.get() { "Sign In" } else { "Register Here" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
