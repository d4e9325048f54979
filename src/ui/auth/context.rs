//! Auth context bridging the session layer into the component tree
//!
//! This module provides a reactive authentication context that:
//! - Owns the single `AuthClient` (and through it the Credential Store)
//! - Mirrors session, in-flight and error state into signals
//! - Exposes the profile and collections queries as signals

use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::config::ApiConfig;
use crate::core::models::Collections;
use crate::core::session::{
    AuthClient, AuthError, CurrentUser, GuardOutcome, HttpApi, RouteAccess, SessionState,
};

/// Auth context providing authentication state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    client: StoredValue<Arc<AuthClient<HttpApi>>>,
    /// Session state as last observed in the Credential Store
    pub session: RwSignal<SessionState>,
    /// Set once the client has hydrated and can read browser storage
    pub ready: RwSignal<bool>,
    /// Whether a login request is in flight
    pub loading: RwSignal<bool>,
    /// Message of the last login failure
    pub error: RwSignal<Option<String>>,
    /// Credential Store epoch; changes on every login and logout
    pub epoch: RwSignal<u64>,
}

impl AuthContext {
    fn client(&self) -> Arc<AuthClient<HttpApi>> {
        self.client.get_value()
    }

    /// Check if user is authenticated (reactive)
    pub fn is_authenticated(&self) -> bool {
        self.session.get() == SessionState::Authenticated
    }

    /// Run the navigation guard against the Credential Store.
    pub fn evaluate(&self, access: RouteAccess) -> GuardOutcome {
        self.client().guard().evaluate(access)
    }

    /// Copy the Credential Store state into the signals.
    ///
    /// Writes to disposed signals are dropped, so late async results are safe.
    fn sync_session(&self) {
        let client = self.client();
        let _ = self.session.try_set(client.oracle().state());
        let _ = self.epoch.try_set(client.epoch());
        let _ = self.loading.try_set(client.is_pending());
    }

    /// Log in with email and password.
    ///
    /// The failure, if any, is also recorded in `error`.
    pub async fn login(self, email: String, password: String) -> Result<(), AuthError> {
        let client = self.client();
        self.error.set(None);
        self.loading.set(true);

        let result = client.login(&email, &password).await;

        if let Err(e) = &result {
            let _ = self.error.try_set(Some(e.message()));
        }
        self.sync_session();
        result
    }

    /// Clear the session and every cached query.
    pub fn logout(&self) {
        if let Err(e) = self.client().logout() {
            leptos::logging::warn!("Logout could not clear storage: {}", e);
        }
        self.sync_session();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.client().reset_error();
        self.error.set(None);
    }
}

/// Provide auth context to the component tree
pub fn provide_auth_context() -> AuthContext {
    let client = Arc::new(AuthClient::http(ApiConfig::from_build_env()));

    // Start Anonymous on both server and client to avoid hydration mismatch
    let ctx = AuthContext {
        client: StoredValue::new(client),
        session: RwSignal::new(SessionState::Anonymous),
        ready: RwSignal::new(false),
        loading: RwSignal::new(false),
        error: RwSignal::new(None::<String>),
        epoch: RwSignal::new(0),
    };

    // Effects only run in the browser, after hydration
    Effect::new(move |_| {
        ctx.sync_session();
        ctx.ready.set(true);
    });

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Profile of the signed-in user, refetched whenever the session changes
#[derive(Clone, Copy)]
pub struct CurrentUserQuery {
    pub user: ReadSignal<CurrentUser>,
    pub error: ReadSignal<Option<String>>,
}

pub fn use_current_user() -> CurrentUserQuery {
    let auth = use_auth_context();
    let (user, set_user) = signal(CurrentUser::Pending);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        auth.epoch.track();
        let client = auth.client();

        let snapshot = client.peek_current_user();
        set_user.set(snapshot.clone());
        if snapshot == CurrentUser::Absent {
            return;
        }

        spawn_local(async move {
            match client.current_user().await {
                Ok(Some(profile)) => {
                    let _ = set_user.try_set(CurrentUser::Ready(profile));
                    let _ = set_error.try_set(None);
                }
                Ok(None) => {
                    let _ = set_user.try_set(CurrentUser::Absent);
                }
                Err(e) => {
                    leptos::logging::warn!("Failed to load profile: {}", e);
                    let _ = set_error.try_set(Some(e.message()));
                }
            }
        });
    });

    CurrentUserQuery { user, error }
}

/// Upcoming collections of the signed-in user, `None` until loaded
pub fn use_next_collections() -> ReadSignal<Option<Collections>> {
    let auth = use_auth_context();
    let (collections, set_collections) = signal(None::<Collections>);

    Effect::new(move |_| {
        auth.epoch.track();
        let client = auth.client();
        set_collections.set(None);
        if !client.is_authenticated() {
            return;
        }

        spawn_local(async move {
            match client.next_collections().await {
                Ok(found) => {
                    let _ = set_collections.try_set(Some(found));
                }
                Err(e) => leptos::logging::warn!("Failed to load collections: {}", e),
            }
        });
    });

    collections
}
