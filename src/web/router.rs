//! Router service.
//!
//! Wraps the `web_sys` History API so all `window.history` access lives
//! in one place. Navigation runs through the route guard on every
//! entry point: explicit `navigate` calls, browser back/forward, and
//! session-state changes.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, ENFORCE_AUTH, GuardDecision, guard_decision};

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Router service, shared through Context.
///
/// The session signals are injected rather than read from a global, so
/// the router stays decoupled from the session store.
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
    is_verifying: Signal<bool>,
    /// Route requested before a guard deferral or redirect; restored
    /// once the session resolves so login returns the user there.
    deferred: RwSignal<Option<AppRoute>>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>, is_verifying: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            is_verifying,
            deferred: RwSignal::new(None),
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// True while the guard cannot conclude anything about the current
    /// route: session verification is still in flight.
    pub fn guard_pending(&self) -> bool {
        ENFORCE_AUTH
            && self.is_verifying.get()
            && self.current_route.get().requires_auth()
    }

    /// Navigate to a path, guard applied.
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        let verifying = self.is_verifying.get_untracked();

        match guard_decision(&target_route, ENFORCE_AUTH, is_auth, verifying) {
            GuardDecision::Pending => {
                // Re-attempted by the session-change effect once
                // verification resolves.
                self.deferred.set(Some(target_route));
            }
            GuardDecision::RedirectToLogin => {
                web_sys::console::log_1(&"[router] access denied, redirecting to login".into());
                self.deferred.set(Some(target_route));
                let redirect = AppRoute::auth_failure_redirect();
                if use_push {
                    push_history_state(&redirect.to_path());
                } else {
                    replace_history_state(&redirect.to_path());
                }
                self.set_route.set(redirect);
            }
            GuardDecision::Allow => {
                // Authenticated users do not land back on the login page.
                if target_route.should_redirect_when_authenticated() && is_auth {
                    let redirect = AppRoute::auth_success_redirect();
                    if use_push {
                        push_history_state(&redirect.to_path());
                    } else {
                        replace_history_state(&redirect.to_path());
                    }
                    self.set_route.set(redirect);
                    return;
                }

                if use_push {
                    push_history_state(&target_route.to_path());
                } else {
                    replace_history_state(&target_route.to_path());
                }
                self.set_route.set(target_route);
            }
        }
    }

    /// Browser back/forward buttons run through the same guard.
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let is_verifying = self.is_verifying;
        let deferred = self.deferred;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            let is_auth = is_authenticated.get_untracked();
            let verifying = is_verifying.get_untracked();

            match guard_decision(&target_route, ENFORCE_AUTH, is_auth, verifying) {
                GuardDecision::Pending => {
                    deferred.set(Some(target_route));
                }
                GuardDecision::RedirectToLogin => {
                    deferred.set(Some(target_route));
                    let redirect = AppRoute::auth_failure_redirect();
                    replace_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
                GuardDecision::Allow => {
                    set_route.set(target_route);
                }
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Leak the closure so the listener outlives this scope.
        closure.forget();
    }

    /// React to session-state changes: resolve deferred navigations,
    /// bounce logged-out users off protected routes, and move freshly
    /// logged-in users off the login page.
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let is_verifying = self.is_verifying;
        let deferred = self.deferred;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            if is_verifying.get() {
                return;
            }
            let route = current_route.get_untracked();

            if is_auth {
                let target = deferred
                    .try_update(|d| d.take())
                    .flatten()
                    .filter(|t| *t != route);

                if let Some(target) = target {
                    push_history_state(&target.to_path());
                    set_route.set(target);
                } else if route.should_redirect_when_authenticated() {
                    let redirect = AppRoute::auth_success_redirect();
                    push_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
            } else if ENFORCE_AUTH && route.requires_auth() {
                web_sys::console::log_1(&"[router] session ended, redirecting to login".into());
                deferred.set(Some(route));
                let redirect = AppRoute::auth_failure_redirect();
                push_history_state(&redirect.to_path());
                set_route.set(redirect);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>, is_verifying: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated, is_verifying);

    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// Fetch the router service from Context.
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// Navigation closure for components.
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// Components
// ============================================================================

/// Router root. Provides the routing context; mount once at the top of
/// the app.
#[component]
pub fn Router(
    /// Session: verified credential present
    is_authenticated: Signal<bool>,
    /// Session: bootstrap verification in flight
    is_verifying: Signal<bool>,
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated, is_verifying);

    children()
}

/// Renders the view for the current route. While the guard is pending
/// on a protected route, shows a neutral spinner instead of either
/// conclusion.
#[component]
pub fn RouterOutlet(
    /// Maps the current route to its view
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        if router.guard_pending() {
            return view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                </div>
            }
            .into_any();
        }
        matcher(router.current_route().get())
    }
}
