use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::{ApiResult, AuthApi, EventsApi, ProfileApi, RecommendationsApi, SavedEventsApi};
use crate::error::ApiError;
use crate::models::event::{Event, EventDraft};
use crate::models::profile::{ProfilePayload, ProfileResponse};
use crate::models::recommendation::Recommendation;
use crate::models::saved::SavedEventIds;
use crate::models::session::Registration;

/// HTTP client for the event store REST API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build event store HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach the bearer token used for authenticated calls
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> ApiResult<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ApiError::Unauthenticated)?;
        Ok(builder.bearer_auth(token))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = check_status(request.send().await?).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_empty(&self, request: RequestBuilder) -> ApiResult<()> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

/// Turn a non-2xx response into `ApiError::Http`, keeping the server's
/// `detail` message when it is a plain string.
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Http {
        status: status.as_u16(),
        detail: extract_detail(&body),
    })
}

fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

#[async_trait]
impl EventsApi for ApiClient {
    async fn list_events(&self) -> ApiResult<Vec<Event>> {
        let request = self.authorized(self.client.get(self.url("/events")))?;
        self.send_json(request).await
    }

    async fn create_event(&self, draft: &EventDraft) -> ApiResult<Event> {
        let request = self.authorized(self.client.post(self.url("/events")).json(draft))?;
        self.send_json(request).await
    }
}

#[async_trait]
impl SavedEventsApi for ApiClient {
    async fn list_saved(&self) -> ApiResult<SavedEventIds> {
        let request = self.authorized(self.client.get(self.url("/saved")))?;
        self.send_json(request).await
    }

    async fn save_event(&self, event_id: i64) -> ApiResult<()> {
        let request =
            self.authorized(self.client.post(self.url(&format!("/saved/{}", event_id))))?;
        self.send_empty(request).await
    }

    async fn unsave_event(&self, event_id: i64) -> ApiResult<()> {
        let request =
            self.authorized(self.client.delete(self.url(&format!("/saved/{}", event_id))))?;
        self.send_empty(request).await
    }
}

#[async_trait]
impl ProfileApi for ApiClient {
    async fn get_profile(&self) -> ApiResult<ProfileResponse> {
        let request = self.authorized(self.client.get(self.url("/profile")))?;
        self.send_json(request).await
    }

    async fn upsert_profile(&self, profile: &ProfilePayload) -> ApiResult<()> {
        let request = self.authorized(self.client.post(self.url("/profile")).json(profile))?;
        self.send_empty(request).await
    }
}

#[async_trait]
impl RecommendationsApi for ApiClient {
    async fn recommendations(&self) -> ApiResult<Vec<Recommendation>> {
        let request = self.authorized(self.client.get(self.url("/recommendations")))?;
        self.send_json(request).await
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }));
        let token: TokenResponse = self.send_json(request).await?;
        Ok(token.access_token)
    }

    async fn register(&self, registration: &Registration) -> ApiResult<()> {
        let request = self
            .client
            .post(self.url("/auth/register"))
            .json(registration);
        self.send_empty(request).await
    }
}
