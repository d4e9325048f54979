//! Remote API access.
//!
//! [`AuthApi`] is the seam between the Auth Client and the network.
//! [`HttpApi`] talks to the real service with `gloo-net`; every outgoing
//! request passes through [`HttpApi::authorize`], which reads the token
//! slot and attaches the bearer header.

use gloo_net::http::{QueryParams, Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::store::TokenReader;
use crate::core::config::ApiConfig;
use crate::core::models::{Collections, LoginResponse, UserProfile};

/// Operations of the remote API used by the session layer
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Exchange credentials for a bearer token
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Profile of the user owning the current token
    async fn fetch_profile(&self) -> Result<UserProfile, ApiError>;

    /// Upcoming collections of the user owning the current token
    async fn fetch_collections(&self) -> Result<Collections, ApiError>;
}

#[derive(Clone)]
pub struct HttpApi {
    config: ApiConfig,
    tokens: TokenReader,
}

impl HttpApi {
    pub fn new(config: ApiConfig, tokens: TokenReader) -> Self {
        Self { config, tokens }
    }

    /// Attach `Authorization: Bearer <token>` when a token is stored.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) if !token.is_empty() => request.header("Authorization", &token.bearer()),
            _ => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(Request::get(url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }
}

impl AuthApi for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let form = QueryParams::new();
        form.append("grant_type", "password");
        form.append("username", username);
        form.append("password", password);

        let response = self
            .authorize(Request::post(&self.config.login_url()))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(form.to_string())
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }

    async fn fetch_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json(&self.config.profile_url()).await
    }

    async fn fetch_collections(&self) -> Result<Collections, ApiError> {
        self.get_json(&self.config.collections_url()).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(response.status(), &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}
