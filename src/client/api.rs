use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::models::{
    AuthResponse, CreateProductResponse, LoginRequest, MutationResponse, Product, ProductRequest,
    RegisterRequest, RegisterResponse, UserSummary, VerifyResponse,
};

use super::error::ClientError;

/// Every call is aborted after this long; the caller sees
/// [`ClientError::Timeout`] and no retry is attempted.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Server error bodies are always `{"message": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Typed REST client for the inventory API. Holds at most one bearer token
/// at a time; a fresh login replaces it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub(crate) fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map_err(ClientError::from);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());

        Err(match status {
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::Conflict(message),
            _ => ClientError::Server(message),
        })
    }

    /// Connection test against the unauthenticated health route.
    pub async fn ping(&self) -> bool {
        match self.request(reqwest::Method::GET, "/health").send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<RegisterResponse, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/register")
            .json(payload)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn login(&self, payload: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/login")
            .json(payload)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn verify(&self) -> Result<VerifyResponse, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/auth/verify")
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/products")
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn get_product(&self, id: i32) -> Result<Product, ClientError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/products/{}", id))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn create_product(
        &self,
        payload: &ProductRequest,
    ) -> Result<CreateProductResponse, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/products")
            .json(payload)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn update_product(
        &self,
        id: i32,
        payload: &ProductRequest,
    ) -> Result<MutationResponse, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/products/{}", id))
            .json(payload)
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn delete_product(&self, id: i32) -> Result<MutationResponse, ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/products/{}", id))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/users").send().await?;
        Self::parse(response).await
    }

    pub async fn profile(&self) -> Result<UserSummary, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/users/profile")
            .send()
            .await?;
        Self::parse(response).await
    }
}
