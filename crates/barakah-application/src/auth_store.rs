//! Authentication store.
//!
//! Owns the user identity slice: login/signup/social sign-in, logout, and
//! preference updates. The user snapshot persists to the general key-value
//! namespace; the bearer token goes to the hardened token store only.

use std::sync::Arc;

use barakah_core::api::BackendApi;
use barakah_core::error::{BarakahError, Result};
use barakah_core::storage::{self, KeyValueStorage, SecureTokenStore};
use barakah_core::user::{AuthProvider, LoginRequest, SignupRequest, User, UserPreferences};
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::RwLock;

use crate::snapshot::ActionStatus;

const USER_KEY: &str = "auth.user";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

const MIN_PASSWORD_LEN: usize = 8;

/// The auth store's snapshot.
#[derive(Debug, Clone, Default)]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub status: ActionStatus,
}

impl AuthSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Store owning the authentication slice.
pub struct AuthStore {
    state: Arc<RwLock<AuthSnapshot>>,
    api: Arc<dyn BackendApi>,
    storage: Arc<dyn KeyValueStorage>,
    tokens: Arc<dyn SecureTokenStore>,
}

impl AuthStore {
    pub fn new(
        api: Arc<dyn BackendApi>,
        storage: Arc<dyn KeyValueStorage>,
        tokens: Arc<dyn SecureTokenStore>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(AuthSnapshot::default())),
            api,
            storage,
            tokens,
        }
    }

    /// Returns a copy of the current snapshot.
    pub async fn snapshot(&self) -> AuthSnapshot {
        self.state.read().await.clone()
    }

    /// Restores the persisted user at startup. Absent or corrupt data means
    /// logged out; never an error.
    pub async fn restore(&self) {
        if let Some(user) = storage::load_json::<User>(self.storage.as_ref(), USER_KEY).await {
            tracing::info!("restored session for {}", user.email);
            self.state.write().await.user = Some(user);
        }
    }

    fn validate_email(email: &str) -> Result<()> {
        if EMAIL_RE.is_match(email) {
            Ok(())
        } else {
            Err(BarakahError::validation("email", "not a valid email address"))
        }
    }

    fn validate_password(password: &str) -> Result<()> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(BarakahError::validation(
                "password",
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        Ok(())
    }

    async fn begin(&self) {
        self.state.write().await.status.begin();
    }

    async fn fail(&self, err: &BarakahError) {
        self.state.write().await.status.fail(err);
    }

    /// Applies a successful authentication exchange: token to the hardened
    /// store, user to disk, then the in-memory snapshot. If the user persist
    /// fails the token is cleared again so no stale bearer credential outlives
    /// the failed login.
    async fn apply_session(&self, user: User, token: &str) -> Result<()> {
        self.tokens.store_token(token).await?;
        if let Err(err) = storage::persist_json(self.storage.as_ref(), USER_KEY, &user).await {
            if let Err(clear_err) = self.tokens.clear_token().await {
                tracing::warn!("failed to clear token after aborted login: {clear_err}");
            }
            return Err(err);
        }

        let mut state = self.state.write().await;
        state.user = Some(user);
        state.status.succeed();
        Ok(())
    }

    async fn run_auth<F>(&self, call: F) -> Result<User>
    where
        F: std::future::Future<Output = Result<barakah_core::user::AuthSession>>,
    {
        self.begin().await;
        match call.await {
            Ok(session) => {
                let user = session.user.clone();
                if let Err(err) = self.apply_session(session.user, &session.token).await {
                    self.fail(&err).await;
                    return Err(err);
                }
                Ok(user)
            }
            Err(err) => {
                self.fail(&err).await;
                Err(err)
            }
        }
    }

    /// Email/password login.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        // Local validation short-circuits before any remote call.
        if let Err(err) = Self::validate_email(email).and_then(|_| Self::validate_password(password))
        {
            self.fail(&err).await;
            return Err(err);
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.run_auth(self.api.login(&request)).await
    }

    /// Account creation.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        password_confirm: &str,
        display_name: &str,
    ) -> Result<User> {
        let validated = Self::validate_email(email)
            .and_then(|_| Self::validate_password(password))
            .and_then(|_| {
                if password != password_confirm {
                    Err(BarakahError::validation(
                        "password_confirm",
                        "passwords do not match",
                    ))
                } else {
                    Ok(())
                }
            });
        if let Err(err) = validated {
            self.fail(&err).await;
            return Err(err);
        }

        let request = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            password_confirm: password_confirm.to_string(),
            display_name: display_name.to_string(),
        };
        self.run_auth(self.api.signup(&request)).await
    }

    /// Social sign-in via an identity provider.
    pub async fn login_with_provider(&self, provider: AuthProvider) -> Result<User> {
        self.run_auth(self.api.login_with_provider(provider)).await
    }

    /// Clears the session locally. No remote call; storage cleanup is
    /// best-effort and never blocks the logout.
    pub async fn logout(&self) {
        {
            let mut state = self.state.write().await;
            state.user = None;
            state.status = ActionStatus::default();
        }
        if let Err(err) = self.storage.delete(USER_KEY).await {
            tracing::warn!("failed to delete persisted user: {err}");
        }
        if let Err(err) = self.tokens.clear_token().await {
            tracing::warn!("failed to clear token: {err}");
        }
    }

    /// Updates the preference bag of the signed-in user and persists it.
    pub async fn update_preferences(&self, preferences: UserPreferences) -> Result<()> {
        self.begin().await;

        let Some(mut user) = self.state.read().await.user.clone() else {
            let err = BarakahError::validation("user", "not signed in");
            self.fail(&err).await;
            return Err(err);
        };
        user.preferences = preferences;

        if let Err(err) = storage::persist_json(self.storage.as_ref(), USER_KEY, &user).await {
            self.fail(&err).await;
            return Err(err);
        }

        let mut state = self.state.write().await;
        state.user = Some(user);
        state.status.succeed();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_session, MockBackend};
    use barakah_infrastructure::{MemoryStorage, MemoryTokenStore};

    fn fixture() -> (
        Arc<MockBackend>,
        Arc<MemoryStorage>,
        Arc<MemoryTokenStore>,
        AuthStore,
    ) {
        let api = Arc::new(MockBackend::new());
        let storage = Arc::new(MemoryStorage::new());
        let tokens = Arc::new(MemoryTokenStore::new());
        let store = AuthStore::new(api.clone(), storage.clone(), tokens.clone());
        (api, storage, tokens, store)
    }

    #[tokio::test]
    async fn login_stores_user_and_token() {
        let (api, storage, tokens, store) = fixture();
        api.set_session(sample_session());

        let user = store.login("amina@example.com", "longenough").await.unwrap();
        assert_eq!(user.id, "user-1");

        let snapshot = store.snapshot().await;
        assert!(snapshot.is_authenticated());
        assert!(!snapshot.status.is_loading);
        assert!(snapshot.status.error.is_none());

        assert_eq!(tokens.token().await.as_deref(), Some("token-abc"));
        // User snapshot lands in the general namespace, token does not.
        assert!(storage.get(USER_KEY).await.is_some());
        assert!(!storage.get(USER_KEY).await.unwrap().contains("token-abc"));
    }

    #[tokio::test]
    async fn invalid_email_short_circuits_before_the_remote_call() {
        let (api, _storage, tokens, store) = fixture();
        api.set_offline(true); // would fail loudly if reached

        let err = store.login("not-an-email", "longenough").await.unwrap_err();
        assert!(err.is_validation());
        let snapshot = store.snapshot().await;
        assert!(snapshot.status.error.unwrap().contains("email"));
        assert!(tokens.token().await.is_none());
    }

    #[tokio::test]
    async fn password_mismatch_fails_signup_locally() {
        let (_api, _storage, _tokens, store) = fixture();
        let err = store
            .signup("amina@example.com", "longenough", "different!", "Amina")
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn failed_login_sets_error_and_leaves_user_absent() {
        let (api, _storage, _tokens, store) = fixture();
        api.set_offline(true);

        assert!(store.login("amina@example.com", "longenough").await.is_err());
        let snapshot = store.snapshot().await;
        assert!(!snapshot.is_authenticated());
        assert!(snapshot.status.error.is_some());
        assert!(!snapshot.status.is_loading);
    }

    #[tokio::test]
    async fn failed_user_persist_does_not_leave_a_token_behind() {
        let (api, storage, tokens, store) = fixture();
        api.set_session(sample_session());
        storage.fail_writes(true);

        assert!(store.login("amina@example.com", "longenough").await.is_err());

        let snapshot = store.snapshot().await;
        assert!(!snapshot.is_authenticated());
        assert!(snapshot.status.error.is_some());
        assert!(tokens.token().await.is_none());
    }

    #[tokio::test]
    async fn logout_clears_everything_locally() {
        let (api, storage, tokens, store) = fixture();
        api.set_session(sample_session());
        store.login("amina@example.com", "longenough").await.unwrap();

        store.logout().await;

        assert!(!store.snapshot().await.is_authenticated());
        assert!(storage.get(USER_KEY).await.is_none());
        assert!(tokens.token().await.is_none());
    }

    #[tokio::test]
    async fn restore_recovers_a_persisted_user() {
        let (api, storage, tokens, store) = fixture();
        api.set_session(sample_session());
        store.login("amina@example.com", "longenough").await.unwrap();

        let revived = AuthStore::new(api, storage, tokens);
        revived.restore().await;
        assert!(revived.snapshot().await.is_authenticated());
    }

    #[tokio::test]
    async fn restore_treats_corrupt_snapshot_as_logged_out() {
        let (api, storage, tokens, store) = fixture();
        storage.set(USER_KEY, "{ not json").await.unwrap();

        store.restore().await;
        assert!(!store.snapshot().await.is_authenticated());
        drop((api, tokens));
    }

    #[tokio::test]
    async fn update_preferences_persists_the_new_bag() {
        let (api, storage, _tokens, store) = fixture();
        api.set_session(sample_session());
        store.login("amina@example.com", "longenough").await.unwrap();

        let mut prefs = UserPreferences::default();
        prefs.dark_mode = true;
        store.update_preferences(prefs).await.unwrap();

        assert!(store.snapshot().await.user.unwrap().preferences.dark_mode);
        assert!(storage.get(USER_KEY).await.unwrap().contains("\"dark_mode\":true"));
    }
}
