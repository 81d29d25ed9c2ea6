//! # Session lifecycle manager
//!
//! Owns the client-held session record (user, bearer token, validation
//! timestamp) and decides when a cached token must be revalidated against the
//! backend.
//!
//! ## Phases
//!
//! ```text
//! Unauthenticated ──login/login_with_token──▶ AuthenticatedFresh
//!        ▲                                          │
//!        │ 401 (only)                               │
//! Validating ◀── freshness window elapsed ── AuthenticatedCached
//!    │    └── non-401 exhaustion ──▶ AuthenticatedDegraded
//!    └── success ──▶ AuthenticatedFresh
//! ```
//!
//! The one deliberate design decision in this module: **only a confirmed 401
//! destroys the session.** Timeouts,
//! 5xx and unreachable networks are retried with bounded exponential backoff
//! and, on exhaustion, the stale session is kept and a non-fatal warning is
//! surfaced through `auth_error`.
//!
//! The manager is constructed explicitly and injected (no statics). It is a
//! cheap `Arc` handle so the UI layer can clone it into event handlers.

use std::sync::{Arc, Mutex};

use store::SessionStore;

use crate::client::{ApiClient, ApiTransport};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::UserProfile;
use crate::retry::RetryPolicy;
use crate::time::now_ms;

/// Storage keys for the persisted session record.
pub const KEY_TOKEN: &str = "token";
pub const KEY_USER: &str = "user";
pub const KEY_TOKEN_CACHED_AT: &str = "token_cached_at";

/// Where the session currently stands in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// No token in storage.
    Unauthenticated,
    /// Token and user loaded from storage, freshness window not yet elapsed.
    AuthenticatedCached,
    /// A validation call is in flight.
    Validating,
    /// The backend confirmed the token since mount.
    AuthenticatedFresh,
    /// Validation failed with a non-401 error after all retries; the old
    /// session data is kept.
    AuthenticatedDegraded,
}

#[derive(Clone, Debug)]
struct SessionState {
    phase: SessionPhase,
    user: Option<UserProfile>,
    auth_error: Option<String>,
}

/// A point-in-time copy of the session state, safe to hand to the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub user: Option<UserProfile>,
    pub auth_error: Option<String>,
}

struct ManagerInner<S, T: ApiTransport> {
    store: S,
    client: ApiClient<T>,
    freshness_window_ms: u64,
    retry: RetryPolicy,
    state: Mutex<SessionState>,
    on_expired: Mutex<Option<Box<dyn Fn()>>>,
}

/// Manages the authenticated identity for the lifetime of the app.
pub struct SessionManager<S: SessionStore, T: ApiTransport> {
    inner: Arc<ManagerInner<S, T>>,
}

impl<S: SessionStore, T: ApiTransport> Clone for SessionManager<S, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SessionStore, T: ApiTransport> SessionManager<S, T> {
    pub fn new(store: S, client: ApiClient<T>, config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                store,
                client,
                freshness_window_ms: config.freshness_window_secs * 1_000,
                retry: RetryPolicy::from(&config.retry),
                state: Mutex::new(SessionState {
                    phase: SessionPhase::Unauthenticated,
                    user: None,
                    auth_error: None,
                }),
                on_expired: Mutex::new(None),
            }),
        }
    }

    /// Register the side effect fired when a 401 destroys the session
    /// (the web app redirects to the login screen here).
    pub fn set_on_expired(&self, hook: impl Fn() + 'static) {
        *self.inner.on_expired.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.state.lock().unwrap();
        SessionSnapshot {
            phase: state.phase,
            user: state.user.clone(),
            auth_error: state.auth_error.clone(),
        }
    }

    /// Restore the session on app start.
    ///
    /// A stored session younger than the freshness window is adopted without
    /// any network call. A stale one triggers a silent revalidation; its
    /// failure modes are the ones documented at module level.
    pub async fn resume(&self) {
        let Some(token) = self.inner.store.get(KEY_TOKEN) else {
            self.set_state(SessionPhase::Unauthenticated, None, None);
            return;
        };
        self.inner.client.set_token(&token);

        let cached_user = self
            .inner
            .store
            .get(KEY_USER)
            .and_then(|raw| serde_json::from_str::<UserProfile>(&raw).ok());
        let cached_at = self
            .inner
            .store
            .get(KEY_TOKEN_CACHED_AT)
            .and_then(|raw| raw.parse::<u64>().ok());

        let is_fresh = cached_user.is_some()
            && cached_at
                .map(|at| now_ms().saturating_sub(at) < self.inner.freshness_window_ms)
                .unwrap_or(false);

        if is_fresh {
            self.set_state(SessionPhase::AuthenticatedCached, cached_user, None);
            return;
        }

        // Stale (or the cached record is unreadable): keep whatever we have
        // on screen while validating in the background.
        self.set_state(SessionPhase::Validating, cached_user, None);
        self.validate().await;
    }

    /// Credential login. Always performs a synchronous network call; never
    /// subject to the freshness window.
    ///
    /// Returns `false` and records a human-readable `auth_error` on any
    /// failure, including the pre-network validation of empty fields.
    pub async fn login(&self, identifier: &str, secret: &str) -> bool {
        let identifier = identifier.trim();
        if identifier.is_empty() || secret.is_empty() {
            self.set_error("Username and password are required");
            return false;
        }

        self.set_state_phase(SessionPhase::Validating);
        match self.inner.client.login(identifier, secret).await {
            Ok(success) => {
                self.adopt_session(&success.token, success.user);
                true
            }
            Err(err) => {
                tracing::warn!("login failed: {err}");
                // A failed credential check never had a session to destroy;
                // fall back to wherever we were.
                let phase = if self.inner.store.get(KEY_TOKEN).is_some() {
                    SessionPhase::AuthenticatedCached
                } else {
                    SessionPhase::Unauthenticated
                };
                self.set_state_phase(phase);
                self.set_error(&err.user_message());
                false
            }
        }
    }

    /// Token-based login for federated callback flows: the caller already
    /// holds a token and profile, so no credential check happens here.
    pub fn login_with_token(&self, token: &str, user: UserProfile) {
        self.adopt_session(token, user);
    }

    /// Clear all session state and persisted storage. Idempotent.
    pub fn logout(&self) {
        self.inner.store.remove(KEY_TOKEN);
        self.inner.store.remove(KEY_USER);
        self.inner.store.remove(KEY_TOKEN_CACHED_AT);
        self.inner.client.clear_token();
        self.set_state(SessionPhase::Unauthenticated, None, None);
    }

    /// Force a validation pass regardless of the freshness window.
    pub async fn retry_auth(&self) -> bool {
        if self.inner.store.get(KEY_TOKEN).is_none() {
            return false;
        }
        self.set_state_phase(SessionPhase::Validating);
        self.validate().await
    }

    /// Whether the profile still needs mandatory fields. Failures degrade to
    /// `false` instead of propagating; this is a side read, never fatal.
    pub async fn check_require_complete(&self) -> bool {
        self.inner
            .client
            .check_require_complete()
            .await
            .unwrap_or(false)
    }

    /// Silent validation with bounded retry.
    ///
    /// Returns `true` when the backend confirmed the token. A 401 clears
    /// storage and fires the expiry hook exactly once; it is never retried.
    /// Every other failure is retried per the policy and, on exhaustion,
    /// leaves the session data in place.
    async fn validate(&self) -> bool {
        let max_attempts = self.inner.retry.max_attempts.max(1);
        for attempt in 1..=max_attempts {
            match self.inner.client.verify_token(true).await {
                Ok(user) => {
                    self.persist_user(&user);
                    self.set_state(SessionPhase::AuthenticatedFresh, Some(user), None);
                    return true;
                }
                Err(ApiError::Unauthorized) => {
                    self.expire();
                    return false;
                }
                Err(err) if attempt < max_attempts => {
                    tracing::debug!("token validation attempt {attempt} failed: {err}");
                    self.inner.retry.wait(attempt).await;
                }
                Err(err) => {
                    tracing::warn!(
                        "token validation gave up after {max_attempts} attempts: {err}"
                    );
                    let user = self.inner.state.lock().unwrap().user.clone();
                    self.set_state(
                        SessionPhase::AuthenticatedDegraded,
                        user,
                        Some(err.user_message()),
                    );
                    return false;
                }
            }
        }
        false
    }

    /// Terminal cleanup for a confirmed-invalid token.
    fn expire(&self) {
        self.logout();
        let hook = self.inner.on_expired.lock().unwrap();
        if let Some(hook) = hook.as_ref() {
            hook();
        }
    }

    fn adopt_session(&self, token: &str, user: UserProfile) {
        self.inner.store.set(KEY_TOKEN, token);
        self.inner.client.set_token(token);
        self.persist_user(&user);
        self.set_state(SessionPhase::AuthenticatedFresh, Some(user), None);
    }

    fn persist_user(&self, user: &UserProfile) {
        if let Ok(raw) = serde_json::to_string(user) {
            self.inner.store.set(KEY_USER, &raw);
        }
        self.inner
            .store
            .set(KEY_TOKEN_CACHED_AT, &now_ms().to_string());
    }

    fn set_state(
        &self,
        phase: SessionPhase,
        user: Option<UserProfile>,
        auth_error: Option<String>,
    ) {
        let mut state = self.inner.state.lock().unwrap();
        state.phase = phase;
        state.user = user;
        state.auth_error = auth_error;
    }

    fn set_state_phase(&self, phase: SessionPhase) {
        self.inner.state.lock().unwrap().phase = phase;
    }

    fn set_error(&self, message: &str) {
        self.inner.state.lock().unwrap().auth_error = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::{json, Value};
    use store::MemoryStore;

    use super::*;
    use crate::client::testing::MockTransport;

    const HOUR_MS: u64 = 60 * 60 * 1_000;

    fn test_config() -> ClientConfig {
        let mut config = ClientConfig::default();
        // No real sleeping in tests.
        config.retry.base_delay_ms = 0;
        config
    }

    fn manager(
        store: &MemoryStore,
        transport: &MockTransport,
    ) -> SessionManager<MemoryStore, MockTransport> {
        let config = test_config();
        let client = ApiClient::with_transport(&config, transport.clone());
        SessionManager::new(store.clone(), client, &config)
    }

    fn user_json(id: i64) -> Value {
        json!({ "id": id, "username": "mei", "total_lingzhi": 100, "level": 2 })
    }

    fn seed_session(store: &MemoryStore, age_ms: u64) {
        store.set(KEY_TOKEN, "abc");
        store.set(KEY_USER, &user_json(1).to_string());
        store.set(KEY_TOKEN_CACHED_AT, &(now_ms() - age_ms).to_string());
    }

    fn expiry_counter(
        session: &SessionManager<MemoryStore, MockTransport>,
    ) -> Rc<Cell<u32>> {
        let counter = Rc::new(Cell::new(0));
        let hook_counter = Rc::clone(&counter);
        session.set_on_expired(move || hook_counter.set(hook_counter.get() + 1));
        counter
    }

    #[tokio::test]
    async fn fresh_cached_session_resumes_without_network() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        seed_session(&store, 1_000);

        let session = manager(&store, &transport);
        session.resume().await;

        let snap = session.snapshot();
        assert_eq!(snap.phase, SessionPhase::AuthenticatedCached);
        assert_eq!(snap.user.as_ref().map(|u| u.id), Some(1));
        assert_eq!(snap.auth_error, None);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn no_token_resumes_unauthenticated() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();

        let session = manager(&store, &transport);
        session.resume().await;

        assert_eq!(session.snapshot().phase, SessionPhase::Unauthenticated);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn stale_session_triggers_exactly_one_silent_revalidation() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        seed_session(&store, 25 * HOUR_MS);
        transport.push_status(200, user_json(1));

        let session = manager(&store, &transport);
        session.resume().await;

        assert_eq!(transport.calls(), 1);
        assert_eq!(session.snapshot().phase, SessionPhase::AuthenticatedFresh);

        // The freshness timestamp was moved up to now.
        let cached_at: u64 = store.get(KEY_TOKEN_CACHED_AT).unwrap().parse().unwrap();
        assert!(now_ms() - cached_at < 5_000);
    }

    #[tokio::test]
    async fn revalidation_401_clears_session_and_fires_expiry_hook_once() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        seed_session(&store, 25 * HOUR_MS);
        transport.push_status(401, Value::Null);

        let session = manager(&store, &transport);
        let expired = expiry_counter(&session);
        session.resume().await;

        let snap = session.snapshot();
        assert_eq!(snap.phase, SessionPhase::Unauthenticated);
        assert_eq!(snap.user, None);
        assert_eq!(store.get(KEY_TOKEN), None);
        assert_eq!(store.get(KEY_USER), None);
        assert_eq!(store.get(KEY_TOKEN_CACHED_AT), None);
        assert_eq!(expired.get(), 1);
        // 401 is never retried.
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn transient_failure_keeps_session_and_degrades() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        seed_session(&store, 25 * HOUR_MS);
        for _ in 0..3 {
            transport.push_err(ApiError::Transient("connection refused".to_string()));
        }

        let session = manager(&store, &transport);
        let expired = expiry_counter(&session);
        session.resume().await;

        let snap = session.snapshot();
        assert_eq!(snap.phase, SessionPhase::AuthenticatedDegraded);
        // Old session data survives a non-401 failure.
        assert_eq!(snap.user.as_ref().map(|u| u.id), Some(1));
        assert!(snap.auth_error.is_some());
        assert_eq!(store.get(KEY_TOKEN).as_deref(), Some("abc"));
        assert_eq!(expired.get(), 0);
        // Retry bound: exactly max_attempts calls, no more.
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test]
    async fn late_401_during_retries_is_still_terminal() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        seed_session(&store, 25 * HOUR_MS);
        transport.push_err(ApiError::Transient("timeout".to_string()));
        transport.push_status(401, Value::Null);

        let session = manager(&store, &transport);
        let expired = expiry_counter(&session);
        session.resume().await;

        assert_eq!(session.snapshot().phase, SessionPhase::Unauthenticated);
        assert_eq!(expired.get(), 1);
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn login_validates_fields_before_any_network_call() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        let session = manager(&store, &transport);

        assert!(!session.login("", "secret").await);
        assert!(!session.login("  ", "secret").await);
        assert!(!session.login("mei", "").await);

        let snap = session.snapshot();
        assert_eq!(snap.phase, SessionPhase::Unauthenticated);
        assert!(snap.auth_error.is_some());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn successful_login_persists_the_session() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        transport.push_status(200, json!({ "token": "fresh", "user": user_json(7) }));

        let session = manager(&store, &transport);
        assert!(session.login("mei", "secret").await);

        let snap = session.snapshot();
        assert_eq!(snap.phase, SessionPhase::AuthenticatedFresh);
        assert_eq!(snap.user.as_ref().map(|u| u.id), Some(7));
        assert_eq!(snap.auth_error, None);
        assert_eq!(store.get(KEY_TOKEN).as_deref(), Some("fresh"));
        assert!(store.get(KEY_USER).is_some());
        assert!(store.get(KEY_TOKEN_CACHED_AT).is_some());
    }

    #[tokio::test]
    async fn failed_login_records_error_without_destroying_anything() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        transport.push_status(400, json!({ "message": "wrong password" }));

        let session = manager(&store, &transport);
        assert!(!session.login("mei", "nope").await);

        let snap = session.snapshot();
        assert_eq!(snap.phase, SessionPhase::Unauthenticated);
        assert_eq!(snap.auth_error.as_deref(), Some("wrong password"));
    }

    #[tokio::test]
    async fn login_with_token_bypasses_the_credential_check() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        let session = manager(&store, &transport);

        let user: UserProfile = serde_json::from_value(user_json(9)).unwrap();
        session.login_with_token("oauth-token", user);

        assert_eq!(session.snapshot().phase, SessionPhase::AuthenticatedFresh);
        assert_eq!(store.get(KEY_TOKEN).as_deref(), Some("oauth-token"));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        seed_session(&store, 0);

        let session = manager(&store, &transport);
        session.resume().await;
        session.logout();
        session.logout();

        let snap = session.snapshot();
        assert_eq!(snap.phase, SessionPhase::Unauthenticated);
        assert_eq!(snap.user, None);
        assert_eq!(store.get(KEY_TOKEN), None);
    }

    #[tokio::test]
    async fn retry_auth_validates_even_inside_the_freshness_window() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        seed_session(&store, 1_000);
        transport.push_status(200, user_json(1));

        let session = manager(&store, &transport);
        session.resume().await;
        assert_eq!(transport.calls(), 0);

        assert!(session.retry_auth().await);
        assert_eq!(transport.calls(), 1);
        assert_eq!(session.snapshot().phase, SessionPhase::AuthenticatedFresh);
    }

    #[tokio::test]
    async fn retry_auth_without_a_token_is_a_no_op() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        let session = manager(&store, &transport);

        assert!(!session.retry_auth().await);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn check_require_complete_degrades_to_false_on_failure() {
        let store = MemoryStore::new();
        let transport = MockTransport::new();
        let session = manager(&store, &transport);

        transport.push_status(200, json!({ "require_complete": true }));
        assert!(session.check_require_complete().await);

        transport.push_err(ApiError::Transient("offline".to_string()));
        assert!(!session.check_require_complete().await);

        transport.push_status(401, Value::Null);
        assert!(!session.check_require_complete().await);
    }
}
