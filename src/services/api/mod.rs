//! Remote collaborators.
//!
//! The event store, saved-event list, profile store, recommendation feed and
//! credential service are reached through these traits. [`ApiClient`] is the
//! HTTP implementation; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::event::{Event, EventDraft};
use crate::models::profile::{ProfilePayload, ProfileResponse};
use crate::models::recommendation::Recommendation;
use crate::models::saved::SavedEventIds;
use crate::models::session::Registration;

mod client;

pub use client::ApiClient;

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_events(&self) -> ApiResult<Vec<Event>>;

    async fn create_event(&self, draft: &EventDraft) -> ApiResult<Event>;
}

/// Saved-event membership. `save_event` is not idempotent on the server, so
/// callers must not save an id they already hold.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedEventsApi: Send + Sync {
    async fn list_saved(&self) -> ApiResult<SavedEventIds>;

    async fn save_event(&self, event_id: i64) -> ApiResult<()>;

    async fn unsave_event(&self, event_id: i64) -> ApiResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn get_profile(&self) -> ApiResult<ProfileResponse>;

    async fn upsert_profile(&self, profile: &ProfilePayload) -> ApiResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationsApi: Send + Sync {
    async fn recommendations(&self) -> ApiResult<Vec<Recommendation>>;
}

/// Credential service. Issues the access token; never validated locally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> ApiResult<String>;

    async fn register(&self, registration: &Registration) -> ApiResult<()>;
}
