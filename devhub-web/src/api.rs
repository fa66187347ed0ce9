use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::models::{
    ApiResponse, ErrorResponse, LoginData, LoginRequest, Page, RegisterRequest, User,
    UserListQuery,
};
use thiserror::Error;

/// Errors raised while talking to the backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(String),
    /// Non-success status with a body that was not a response envelope.
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        body: Option<ErrorResponse>,
    },
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Session endpoints of the backend.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `GET auth/me` with the bearer token.
    async fn current_user(&self, token: &str) -> Result<ApiResponse<User>, ApiError>;
    /// `POST auth/login`.
    async fn login(&self, credentials: &LoginRequest) -> Result<ApiResponse<LoginData>, ApiError>;
    /// `POST auth/register`.
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError>;
}

/// Admin user listing endpoint.
#[async_trait(?Send)]
pub trait UserDirectoryApi {
    /// `GET users` with paging, filter and sort parameters.
    async fn list_users(
        &self,
        token: Option<&str>,
        query: &UserListQuery,
    ) -> Result<ApiResponse<Page<User>>, ApiError>;
}

/// Lightweight API client for the DevHub REST backend.
#[derive(Clone, Debug)]
pub struct DevHubClient {
    base_url: String,
    client: Client,
}

impl DevHubClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Full URL of an endpoint below the base URL.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response: Response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        decode_envelope(status.as_u16(), status.is_success(), &body)
    }
}

/// Decodes a response body. Failure statuses still yield an envelope when
/// the backend sent one, so callers see its `message` and `code`.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    is_success: bool,
    body: &str,
) -> Result<ApiResponse<T>, ApiError> {
    match serde_json::from_str::<ApiResponse<T>>(body) {
        Ok(envelope) if is_success || !envelope.success => Ok(envelope),
        Ok(_) => Err(ApiError::Status { status, body: None }),
        Err(err) if is_success => Err(ApiError::Decode(err.to_string())),
        Err(_) => Err(ApiError::Status {
            status,
            body: serde_json::from_str(body).ok(),
        }),
    }
}

#[async_trait(?Send)]
impl AuthApi for DevHubClient {
    async fn current_user(&self, token: &str) -> Result<ApiResponse<User>, ApiError> {
        let request = Self::authorize(self.client.get(self.api_url("auth/me")), Some(token));
        self.send(request).await
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<ApiResponse<LoginData>, ApiError> {
        let request = self.client.post(self.api_url("auth/login")).json(credentials);
        self.send(request).await
    }

    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        let request = self.client.post(self.api_url("auth/register")).json(request);
        self.send(request).await
    }
}

#[async_trait(?Send)]
impl UserDirectoryApi for DevHubClient {
    async fn list_users(
        &self,
        token: Option<&str>,
        query: &UserListQuery,
    ) -> Result<ApiResponse<Page<User>>, ApiError> {
        let request = self
            .client
            .get(self.api_url("users"))
            .query(&query.to_query_pairs());
        self.send(Self::authorize(request, token)).await
    }
}
