//! Auth Client
//!
//! Orchestrates login, logout and the session-scoped queries (profile and
//! collections). Shared by the UI through an `Arc`; every method takes
//! `&self` and no lock is held across an await point.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{TimeDelta, Utc};

use super::api::{AuthApi, HttpApi};
use super::cache::{QueryCache, QueryKey};
use super::error::{ApiError, AuthError};
use super::guard::NavigationGuard;
use super::oracle::SessionOracle;
use super::store::CredentialStore;
use super::token::Token;
use crate::core::config::{ApiConfig, COLLECTIONS_PATH, PROFILE_PATH};
use crate::core::models::{Collections, UserProfile};

/// How long a fetched query is served without refetching
pub const QUERY_STALE_AFTER_SECS: i64 = 300;

/// Reactive read of the cached profile
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentUser {
    /// No session
    Absent,
    /// Session exists but the profile has not been fetched yet
    Pending,
    Ready(UserProfile),
}

pub struct AuthClient<A> {
    store: CredentialStore,
    oracle: SessionOracle,
    api: A,
    profiles: Mutex<QueryCache<UserProfile>>,
    collections: Mutex<QueryCache<Collections>>,
    error: Mutex<Option<AuthError>>,
    logins_in_flight: AtomicUsize,
}

impl AuthClient<HttpApi> {
    /// Client over the platform storage and the HTTP API
    pub fn http(config: ApiConfig) -> Self {
        let store = CredentialStore::platform();
        let api = HttpApi::new(config, store.reader());
        Self::new(store, api)
    }
}

impl<A: AuthApi> AuthClient<A> {
    pub fn new(store: CredentialStore, api: A) -> Self {
        let stale_after = TimeDelta::seconds(QUERY_STALE_AFTER_SECS);
        Self {
            oracle: SessionOracle::new(store.reader()),
            store,
            api,
            profiles: Mutex::new(QueryCache::new(stale_after)),
            collections: Mutex::new(QueryCache::new(stale_after)),
            error: Mutex::new(None),
            logins_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn oracle(&self) -> SessionOracle {
        self.oracle.clone()
    }

    pub fn guard(&self) -> NavigationGuard {
        NavigationGuard::new(self.oracle.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.oracle.is_authenticated()
    }

    /// Session epoch of the underlying store
    pub fn epoch(&self) -> u64 {
        self.store.epoch()
    }

    /// Whether a login request is awaiting its response
    pub fn is_pending(&self) -> bool {
        self.logins_in_flight.load(Ordering::SeqCst) > 0
    }

    /// Exchange credentials for a token and store it.
    ///
    /// Failures are recorded as the current error and returned; the stored
    /// token is only touched on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        self.reset_error();
        leptos::logging::log!("Login attempt for {}", username);

        self.logins_in_flight.fetch_add(1, Ordering::SeqCst);
        let response = self.api.login(username, password).await;
        self.logins_in_flight.fetch_sub(1, Ordering::SeqCst);

        let outcome = match response {
            Ok(resp) => self.start_session(Token::from(resp.access_token)),
            Err(e) => Err(AuthError::from_login_failure(e)),
        };

        match &outcome {
            Ok(()) => {
                // An overlapping attempt may have failed while this one was out.
                self.reset_error();
                leptos::logging::log!("Login succeeded for {}", username);
            }
            Err(e) => {
                leptos::logging::warn!("Login failed for {}: {}", username, e);
                *lock(&self.error) = Some(e.clone());
            }
        }

        outcome
    }

    fn start_session(&self, token: Token) -> Result<(), AuthError> {
        if token.is_empty() {
            return Err(AuthError::NetworkFailure(
                "login response carried an empty token".to_string(),
            ));
        }
        self.store.set(token)?;
        self.purge_queries();
        Ok(())
    }

    /// End the session and evict everything fetched under it.
    pub fn logout(&self) -> Result<(), AuthError> {
        let cleared = self.store.clear();
        self.purge_queries();
        leptos::logging::log!("Logged out");
        cleared.map_err(AuthError::from)
    }

    fn purge_queries(&self) {
        let mut profiles = lock(&self.profiles);
        let mut collections = lock(&self.collections);
        if !profiles.is_empty() || !collections.is_empty() {
            leptos::logging::log!(
                "Evicting {} cached queries",
                profiles.len() + collections.len()
            );
        }
        profiles.clear();
        collections.clear();
    }

    /// Profile of the signed-in user, `None` without a session.
    ///
    /// Never issues a request while unauthenticated. A stored token the
    /// server refuses is reported as [`AuthError::SessionRejected`].
    pub async fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        match self
            .fetch_query(&self.profiles, PROFILE_PATH, |api| api.fetch_profile())
            .await
        {
            Ok(profile) => Ok(Some(profile)),
            Err(AuthError::UnauthenticatedAccess) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Upcoming collections of the signed-in user.
    pub async fn next_collections(&self) -> Result<Collections, AuthError> {
        self.fetch_query(&self.collections, COLLECTIONS_PATH, |api| {
            api.fetch_collections()
        })
        .await
    }

    /// Synchronous view of the profile cache
    pub fn peek_current_user(&self) -> CurrentUser {
        if !self.is_authenticated() {
            return CurrentUser::Absent;
        }
        let key = QueryKey::new(PROFILE_PATH, self.epoch());
        match lock(&self.profiles).get(&key) {
            Some(profile) => CurrentUser::Ready(profile),
            None => CurrentUser::Pending,
        }
    }

    async fn fetch_query<'a, V, Fut>(
        &'a self,
        cache: &'a Mutex<QueryCache<V>>,
        endpoint: &'static str,
        fetch: impl Fn(&'a A) -> Fut,
    ) -> Result<V, AuthError>
    where
        V: Clone,
        Fut: Future<Output = Result<V, ApiError>> + 'a,
    {
        loop {
            if !self.is_authenticated() {
                return Err(AuthError::UnauthenticatedAccess);
            }

            let key = QueryKey::new(endpoint, self.epoch());
            if let Some(value) = lock(cache).get_fresh(&key, Utc::now()) {
                return Ok(value);
            }

            let value = fetch(&self.api).await?;

            // The session changed while the request was out; its result
            // belongs to a different token.
            if self.epoch() != key.epoch {
                leptos::logging::warn!("Discarding {} result from a previous session", endpoint);
                continue;
            }

            lock(cache).insert(key, value.clone(), Utc::now());
            return Ok(value);
        }
    }

    /// Last login failure
    pub fn error(&self) -> Option<AuthError> {
        lock(&self.error).clone()
    }

    pub fn reset_error(&self) {
        *lock(&self.error) = None;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{LoginResponse, PreferredContactMethod, ReminderTime};
    use crate::core::session::guard::RouteAccess;
    use crate::core::session::store::{MemoryStorage, TokenReader};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicU16};
    use uuid::Uuid;

    /// Scripted API: accounts by username, profiles by token
    struct FakeApi {
        tokens: TokenReader,
        accounts: HashMap<String, (String, String)>,
        profiles: HashMap<String, UserProfile>,
        offline: AtomicBool,
        slow_login: AtomicBool,
        reject_status: AtomicU16,
        login_calls: AtomicUsize,
        profile_calls: AtomicUsize,
        collection_calls: AtomicUsize,
    }

    impl FakeApi {
        fn new(tokens: TokenReader) -> Self {
            Self {
                tokens,
                accounts: HashMap::new(),
                profiles: HashMap::new(),
                offline: AtomicBool::new(false),
                slow_login: AtomicBool::new(false),
                reject_status: AtomicU16::new(401),
                login_calls: AtomicUsize::new(0),
                profile_calls: AtomicUsize::new(0),
                collection_calls: AtomicUsize::new(0),
            }
        }

        fn with_user(mut self, email: &str, password: &str, token: &str, name: &str) -> Self {
            self.accounts
                .insert(email.to_string(), (password.to_string(), token.to_string()));
            self.profiles.insert(token.to_string(), profile(name, email));
            self
        }

        fn caller(&self) -> Result<String, ApiError> {
            self.tokens
                .get()
                .map(|t| t.as_str().to_string())
                .filter(|t| self.profiles.contains_key(t))
                .ok_or(ApiError::Rejected {
                    status: self.reject_status.load(Ordering::SeqCst),
                    detail: "Could not validate credentials".to_string(),
                })
        }
    }

    impl AuthApi for FakeApi {
        async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
            self.login_calls.fetch_add(1, Ordering::SeqCst);
            if self.offline.load(Ordering::SeqCst) {
                return Err(ApiError::Network("Failed to fetch".to_string()));
            }
            match self.accounts.get(username) {
                Some((expected, token)) if expected == password => {
                    if self.slow_login.load(Ordering::SeqCst) {
                        tokio::task::yield_now().await;
                    }
                    Ok(LoginResponse {
                        access_token: token.clone(),
                        token_type: "bearer".to_string(),
                    })
                }
                _ => Err(ApiError::from_status(
                    400,
                    r#"{"detail":"Incorrect email or password"}"#,
                )),
            }
        }

        async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            // The token is read when the request goes out, not when it returns.
            let token = self.caller();
            tokio::task::yield_now().await;
            Ok(self.profiles[&token?].clone())
        }

        async fn fetch_collections(&self) -> Result<Collections, ApiError> {
            self.collection_calls.fetch_add(1, Ordering::SeqCst);
            self.caller()?;
            Ok(Collections::default())
        }
    }

    fn profile(name: &str, email: &str) -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            phone_number: None,
            address: "1 High Street".to_string(),
            preferred_contact_method: PreferredContactMethod::Email,
            reminder_time: Some(ReminderTime::TwentyFourHours),
            collection_url: None,
            next_scrape_date: None,
            is_active: true,
        }
    }

    fn client_with(build: impl FnOnce(FakeApi) -> FakeApi) -> AuthClient<FakeApi> {
        let store = CredentialStore::new(MemoryStorage::new());
        let api = build(FakeApi::new(store.reader()));
        AuthClient::new(store, api)
    }

    fn two_users() -> AuthClient<FakeApi> {
        client_with(|api| {
            api.with_user("user@example.com", "correctpass", "token-a", "Alice")
                .with_user("other@example.com", "otherpass", "token-b", "Bob")
        })
    }

    #[tokio::test]
    async fn test_login_success_stores_token() {
        let client = two_users();

        client
            .login("user@example.com", "correctpass")
            .await
            .unwrap();

        assert_eq!(client.store.get(), Some(Token::from("token-a")));
        assert!(client.is_authenticated());
        assert!(client.guard().evaluate(RouteAccess::Protected).is_ok());
        assert!(client.error().is_none());
        assert!(!client.is_pending());
    }

    #[tokio::test]
    async fn test_wrong_password_sets_invalid_credentials() {
        let client = two_users();

        let result = client.login("user@example.com", "wrongpass").await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials(_))));
        let error = client.error().unwrap();
        assert!(error.is_invalid_credentials());
        assert_eq!(error.message(), "Incorrect email or password");
        assert!(client.store.get().is_none());
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_token() {
        let client = two_users();
        client
            .login("user@example.com", "correctpass")
            .await
            .unwrap();

        let result = client.login("other@example.com", "wrongpass").await;

        assert!(result.is_err());
        assert_eq!(client.store.get(), Some(Token::from("token-a")));
    }

    #[tokio::test]
    async fn test_network_failure_is_distinguishable() {
        let client = two_users();
        client.api.offline.store(true, Ordering::SeqCst);

        let result = client.login("user@example.com", "correctpass").await;

        assert!(matches!(result, Err(AuthError::NetworkFailure(_))));
        let network_message = client.error().unwrap().message();

        client.api.offline.store(false, Ordering::SeqCst);
        let _ = client.login("user@example.com", "wrongpass").await;
        let rejected_message = client.error().unwrap().message();

        assert_ne!(network_message, rejected_message);
    }

    #[tokio::test]
    async fn test_login_is_never_retried() {
        let client = two_users();
        client.api.offline.store(true, Ordering::SeqCst);

        let _ = client.login("user@example.com", "correctpass").await;

        assert_eq!(client.api.login_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_next_submission_clears_error() {
        let client = two_users();
        let _ = client.login("user@example.com", "wrongpass").await;
        assert!(client.error().is_some());

        client
            .login("user@example.com", "correctpass")
            .await
            .unwrap();

        assert!(client.error().is_none());
    }

    #[tokio::test]
    async fn test_reset_error() {
        let client = two_users();
        let _ = client.login("user@example.com", "wrongpass").await;

        client.reset_error();

        assert!(client.error().is_none());
    }

    #[tokio::test]
    async fn test_current_user_without_session_does_not_fetch() {
        let client = two_users();

        assert_eq!(client.current_user().await, Ok(None));
        assert_eq!(client.peek_current_user(), CurrentUser::Absent);
        assert_eq!(client.api.profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_collections_without_session_is_unauthenticated_access() {
        let client = two_users();

        let result = client.next_collections().await;

        assert_eq!(result, Err(AuthError::UnauthenticatedAccess));
        assert_eq!(client.api.collection_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_current_user_is_cached_within_session() {
        let client = two_users();
        client
            .login("user@example.com", "correctpass")
            .await
            .unwrap();
        assert_eq!(client.peek_current_user(), CurrentUser::Pending);

        let first = client.current_user().await.unwrap().unwrap();
        let second = client.current_user().await.unwrap().unwrap();

        assert_eq!(first.name, "Alice");
        assert_eq!(first, second);
        assert_eq!(client.api.profile_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.peek_current_user(), CurrentUser::Ready(first));
    }

    #[tokio::test]
    async fn test_logout_evicts_profile() {
        let client = two_users();
        client
            .login("user@example.com", "correctpass")
            .await
            .unwrap();
        client.current_user().await.unwrap();

        client.logout().unwrap();

        assert!(!client.is_authenticated());
        assert!(client.store.get().is_none());
        assert_eq!(client.peek_current_user(), CurrentUser::Absent);
        assert_eq!(client.current_user().await, Ok(None));
        assert_eq!(client.api.profile_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_second_user_never_sees_first_users_profile() {
        let client = two_users();
        client
            .login("user@example.com", "correctpass")
            .await
            .unwrap();
        let alice = client.current_user().await.unwrap().unwrap();

        client.logout().unwrap();
        client
            .login("other@example.com", "otherpass")
            .await
            .unwrap();

        assert_eq!(client.peek_current_user(), CurrentUser::Pending);
        let bob = client.current_user().await.unwrap().unwrap();
        assert_eq!(bob.name, "Bob");
        assert_ne!(bob.id, alice.id);
    }

    #[tokio::test]
    async fn test_login_refreshes_cached_profile() {
        let client = two_users();
        client
            .login("user@example.com", "correctpass")
            .await
            .unwrap();
        client.current_user().await.unwrap();

        // Switching accounts without an explicit logout.
        client
            .login("other@example.com", "otherpass")
            .await
            .unwrap();
        let profile = client.current_user().await.unwrap().unwrap();

        assert_eq!(profile.name, "Bob");
        assert_eq!(client.api.profile_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_token_is_session_rejected() {
        let client = client_with(|api| api);
        client.store.set(Token::from("expired")).unwrap();

        let result = client.current_user().await;

        assert_eq!(
            result,
            Err(AuthError::SessionRejected(
                "Could not validate credentials".to_string()
            ))
        );
        assert_eq!(
            result.unwrap_err().message(),
            "Your session is no longer valid. Please log in again."
        );
        assert_eq!(client.api.profile_calls.load(Ordering::SeqCst), 1);
        // The token itself is left alone.
        assert!(client.is_authenticated());
        assert_eq!(client.peek_current_user(), CurrentUser::Pending);
    }

    #[tokio::test]
    async fn test_forbidden_token_is_session_rejected() {
        let client = client_with(|api| api);
        client.api.reject_status.store(403, Ordering::SeqCst);
        client.store.set(Token::from("expired")).unwrap();

        let profile = client.current_user().await;
        let collections = client.next_collections().await;

        assert!(matches!(profile, Err(AuthError::SessionRejected(_))));
        assert!(matches!(collections, Err(AuthError::SessionRejected(_))));
    }

    #[tokio::test]
    async fn test_in_flight_profile_from_previous_session_is_discarded() {
        let client = two_users();
        client
            .login("user@example.com", "correctpass")
            .await
            .unwrap();

        let (profile, _) = tokio::join!(client.current_user(), async {
            client.logout().unwrap();
            client
                .login("other@example.com", "otherpass")
                .await
                .unwrap();
        });

        assert_eq!(profile.unwrap().unwrap().name, "Bob");
        // Alice's response came back after the switch and was refetched.
        assert_eq!(client.api.profile_calls.load(Ordering::SeqCst), 2);
        match client.peek_current_user() {
            CurrentUser::Ready(cached) => assert_eq!(cached.name, "Bob"),
            other => panic!("expected Bob's profile, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overlapping_logins_last_success_clears_error() {
        let client = two_users();
        client.api.slow_login.store(true, Ordering::SeqCst);

        let (ok, failed) = tokio::join!(
            client.login("user@example.com", "correctpass"),
            client.login("user@example.com", "wrongpass"),
        );

        assert!(ok.is_ok());
        assert!(failed.is_err());
        assert!(client.is_authenticated());
        assert!(client.error().is_none());
        assert!(!client.is_pending());
    }

    #[tokio::test]
    async fn test_empty_token_response_is_rejected() {
        let client = client_with(|api| api.with_user("user@example.com", "pw", "", "Nobody"));

        let result = client.login("user@example.com", "pw").await;

        assert!(matches!(result, Err(AuthError::NetworkFailure(_))));
        assert!(!client.is_authenticated());
    }
}
