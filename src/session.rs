//! Session store.
//!
//! Single source of truth for "who is logged in", decoupled from the
//! router: the router only sees the derived signals. A stored
//! credential is never trusted on its own: it must survive a round
//! trip through `/auth/me` before a user is reported. Pages reach the
//! store through `use_session()`; only the operations in this module
//! ever write the credential or the session signals.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ApiError, ChurnApi};
use crate::models::{RegisterRequest, UserIdentity};
use crate::web::LocalStorage;

/// localStorage key holding the bearer credential. Survives reloads,
/// cleared by logout or failed verification.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Session state. The invariant maintained by the transitions below:
/// `user` is populated only while `token` is present and has been
/// confirmed by the backend at least once since being set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    /// Opaque bearer credential, mirrored from localStorage.
    pub token: Option<String>,
    /// Backend-confirmed identity for the current credential.
    pub user: Option<UserIdentity>,
    /// True while a stored credential is being verified.
    pub verifying: bool,
}

impl SessionState {
    /// A credential exists and passed verification.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Begin verifying a credential (initial load or fresh login).
    fn start_verifying(&mut self, token: String) {
        self.token = Some(token);
        self.user = None;
        self.verifying = true;
    }

    /// No stored credential: resolve immediately, nothing to verify.
    fn resolve_anonymous(&mut self) {
        self.user = None;
        self.verifying = false;
    }

    /// Verification succeeded.
    fn resolve_verified(&mut self, user: UserIdentity) {
        self.user = Some(user);
        self.verifying = false;
    }

    /// Verification failed: the credential is treated as invalid and
    /// discarded, exactly like an explicit logout.
    fn resolve_invalid(&mut self) {
        self.clear();
    }

    /// Logout. Idempotent: clearing a cleared session is a no-op.
    fn clear(&mut self) {
        self.token = None;
        self.user = None;
        self.verifying = false;
    }
}

/// Session context, shared through Leptos Context rather than a global.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    pub set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    /// Derived signal for the router guard.
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }

    /// Derived signal: bootstrap verification in flight.
    pub fn is_verifying_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().verifying)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch the session context from Context.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// Bootstrap, run once on app mount.
///
/// No stored credential: resolve immediately without touching the
/// network. Stored credential: verify it against `/auth/me` before
/// reporting a user.
pub fn init_session(ctx: &SessionContext) {
    match LocalStorage::get(TOKEN_STORAGE_KEY) {
        None => ctx.set_state.update(|s| s.resolve_anonymous()),
        Some(token) => {
            ctx.set_state.update(|s| s.start_verifying(token));
            verify_stored_token(*ctx);
        }
    }
}

/// Exchange the stored credential for a profile. Any failure, network
/// or rejection, invalidates the credential, same as logout.
fn verify_stored_token(ctx: SessionContext) {
    spawn_local(async move {
        match ChurnApi::new().me().await {
            Ok(user) => {
                ctx.set_state.try_update(|s| s.resolve_verified(user));
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("session invalid: {}", e).into());
                LocalStorage::delete(TOKEN_STORAGE_KEY);
                ctx.set_state.try_update(|s| s.resolve_invalid());
            }
        }
    });
}

/// Login with form-encoded credentials. On success the returned token
/// is persisted and re-verified to resolve the profile; the backend's
/// rejection message propagates to the caller unchanged.
pub async fn login(ctx: &SessionContext, username: String, password: String) -> Result<(), ApiError> {
    let token = ChurnApi::new().login(&username, &password).await?;

    LocalStorage::set(TOKEN_STORAGE_KEY, &token.access_token);
    ctx.set_state.update(|s| s.start_verifying(token.access_token));
    verify_stored_token(*ctx);
    Ok(())
}

/// Register a new account. Success means "now go log in": the caller
/// switches to the login form, nobody is logged in automatically.
pub async fn register(
    username: String,
    email: String,
    password: String,
) -> Result<(), ApiError> {
    let req = RegisterRequest {
        username,
        email,
        password,
    };
    ChurnApi::new().register(&req).await
}

/// Logout: drop the stored credential and the in-memory session. Safe
/// to call when already logged out.
pub fn logout(ctx: &SessionContext) {
    LocalStorage::delete(TOKEN_STORAGE_KEY);
    ctx.set_state.update(|s| s.clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserIdentity {
        UserIdentity {
            id: 1,
            username: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
            role: "user".to_string(),
        }
    }

    #[test]
    fn bootstrap_without_credential_resolves_anonymous() {
        let mut state = SessionState::default();
        state.resolve_anonymous();

        assert!(state.user.is_none());
        assert!(!state.verifying);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn invalid_credential_is_cleared_like_logout() {
        let mut state = SessionState::default();
        state.start_verifying("stale-token".to_string());
        assert!(state.verifying);

        state.resolve_invalid();

        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn verified_credential_reports_a_user() {
        let mut state = SessionState::default();
        state.start_verifying("tok1".to_string());
        assert!(!state.is_authenticated());

        state.resolve_verified(user());

        assert!(state.is_authenticated());
        assert_eq!(state.token.as_deref(), Some("tok1"));
        assert_eq!(state.user.as_ref().map(|u| u.username.as_str()), Some("alice"));
        assert!(!state.verifying);
    }

    #[test]
    fn user_never_present_without_token() {
        // A fresh login restarts verification: the previous user must
        // not leak across credentials.
        let mut state = SessionState::default();
        state.start_verifying("tok1".to_string());
        state.resolve_verified(user());

        state.start_verifying("tok2".to_string());
        assert!(state.user.is_none());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn logout_is_idempotent() {
        let mut state = SessionState::default();
        state.start_verifying("tok1".to_string());
        state.resolve_verified(user());

        state.clear();
        let once = state.clone();
        state.clear();

        assert_eq!(state, once);
        assert_eq!(state, SessionState::default());
    }
}
