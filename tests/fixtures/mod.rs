// Test fixtures - reusable test data
// Sample events and an in-memory event store shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

use event_planner::error::ApiError;
use event_planner::models::event::{Event, EventDraft};
use event_planner::models::profile::{ProfilePayload, ProfileResponse};
use event_planner::models::recommendation::Recommendation;
use event_planner::models::saved::SavedEventIds;
use event_planner::models::session::{Registration, Role};
use event_planner::services::api::{
    ApiResult, AuthApi, EventsApi, ProfileApi, RecommendationsApi, SavedEventsApi,
};

/// Sample instants for testing
pub mod dates {
    use super::*;

    /// Returns Feb 1, 2024 at the given UTC hour (a Thursday)
    pub fn feb_2024(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, day, hour, 0, 0).unwrap()
    }

    /// Returns Feb 29, 2024 at noon UTC (leap day)
    pub fn leap_day_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
    }

    pub fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// One-hour event starting at `start`
    pub fn event_at(id: i64, title: &str, start: DateTime<Utc>) -> Event {
        Event {
            id,
            title: title.to_string(),
            description: format!("{} description", title),
            location: "Main Hall".to_string(),
            start,
            end: start + Duration::hours(1),
            ai_event_type: None,
            ai_keywords: None,
            ai_summary: None,
        }
    }

    /// A small February 2024 catalogue with a busy day on the 14th
    pub fn february_catalogue() -> Vec<Event> {
        vec![
            event_at(1, "Career Fair", dates::feb_2024(1, 10)),
            event_at(2, "Hackathon Kickoff", dates::feb_2024(14, 9)),
            event_at(3, "Valentine Mixer", dates::feb_2024(14, 18)),
            event_at(4, "Chess Night", dates::feb_2024(14, 20)),
            event_at(5, "Leap Day Lecture", dates::leap_day_2024()),
            event_at(6, "March Welcome", Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()),
        ]
    }
}

/// Build an unsigned token whose payload carries `sub` and `role`
pub fn token_for(sub: &str, role: &str) -> String {
    let payload = serde_json::json!({ "sub": sub, "role": role }).to_string();
    format!(
        "{}.{}.unsigned",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload)
    )
}

/// How many times each remote operation was invoked
#[derive(Debug, Default)]
pub struct CallCounts {
    pub list_events: AtomicUsize,
    pub list_saved: AtomicUsize,
    pub save: AtomicUsize,
    pub unsave: AtomicUsize,
    pub upsert_profile: AtomicUsize,
}

impl CallCounts {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

struct Account {
    id: String,
    password: String,
    role: Role,
}

/// In-memory event store implementing every remote trait
#[derive(Default)]
pub struct FakeBackend {
    pub events: Mutex<Vec<Event>>,
    pub saved: Mutex<HashSet<i64>>,
    pub profile: Mutex<Option<ProfilePayload>>,
    pub recommendations: Mutex<Vec<Recommendation>>,
    accounts: Mutex<HashMap<String, Account>>,
    pub calls: CallCounts,
    pub fail_events: AtomicBool,
    pub fail_saved_list: AtomicBool,
    pub fail_mutations: AtomicBool,
    /// When set, both list calls wait here until the other one arrives
    pub rendezvous: Option<Arc<Barrier>>,
    /// Token returned by login instead of a well-formed one
    pub login_token_override: Option<String>,
}

impl FakeBackend {
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
            ..Self::default()
        }
    }

    pub fn saving(self, ids: &[i64]) -> Self {
        *self.saved.lock().unwrap() = ids.iter().copied().collect();
        self
    }

    pub fn saved_ids(&self) -> HashSet<i64> {
        self.saved.lock().unwrap().clone()
    }

    async fn meet(&self) {
        if let Some(barrier) = &self.rendezvous {
            barrier.wait().await;
        }
    }

    fn server_error(detail: &str) -> ApiError {
        ApiError::Http {
            status: 500,
            detail: Some(detail.to_string()),
        }
    }
}

#[async_trait]
impl EventsApi for FakeBackend {
    async fn list_events(&self) -> ApiResult<Vec<Event>> {
        self.calls.list_events.fetch_add(1, Ordering::SeqCst);
        self.meet().await;
        if self.fail_events.load(Ordering::SeqCst) {
            return Err(ApiError::Http {
                status: 503,
                detail: None,
            });
        }
        Ok(self.events.lock().unwrap().clone())
    }

    async fn create_event(&self, draft: &EventDraft) -> ApiResult<Event> {
        let mut events = self.events.lock().unwrap();
        let id = events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        let event = Event {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            location: draft.location.clone(),
            start: draft.start,
            end: draft.end,
            ai_event_type: None,
            ai_keywords: None,
            ai_summary: None,
        };
        events.push(event.clone());
        Ok(event)
    }
}

#[async_trait]
impl SavedEventsApi for FakeBackend {
    async fn list_saved(&self) -> ApiResult<SavedEventIds> {
        self.calls.list_saved.fetch_add(1, Ordering::SeqCst);
        self.meet().await;
        if self.fail_saved_list.load(Ordering::SeqCst) {
            return Err(Self::server_error("Saved list unavailable"));
        }
        let mut ids: Vec<i64> = self.saved.lock().unwrap().iter().copied().collect();
        ids.sort_unstable();
        Ok(SavedEventIds { saved_event_ids: ids })
    }

    async fn save_event(&self, event_id: i64) -> ApiResult<()> {
        self.calls.save.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::server_error("Could not save"));
        }
        self.saved.lock().unwrap().insert(event_id);
        Ok(())
    }

    async fn unsave_event(&self, event_id: i64) -> ApiResult<()> {
        self.calls.unsave.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::server_error("Could not unsave"));
        }
        self.saved.lock().unwrap().remove(&event_id);
        Ok(())
    }
}

#[async_trait]
impl ProfileApi for FakeBackend {
    async fn get_profile(&self) -> ApiResult<ProfileResponse> {
        Ok(match self.profile.lock().unwrap().clone() {
            Some(profile) => ProfileResponse {
                exists: true,
                interests: profile.interests,
                availability: profile.availability,
            },
            None => ProfileResponse::default(),
        })
    }

    async fn upsert_profile(&self, profile: &ProfilePayload) -> ApiResult<()> {
        self.calls.upsert_profile.fetch_add(1, Ordering::SeqCst);
        if let Some(bad) = profile.availability.iter().find(|slot| !slot.is_well_formed()) {
            return Err(ApiError::Http {
                status: 400,
                detail: Some(format!("Invalid slot: {}", bad)),
            });
        }
        *self.profile.lock().unwrap() = Some(profile.clone());
        Ok(())
    }
}

#[async_trait]
impl RecommendationsApi for FakeBackend {
    async fn recommendations(&self) -> ApiResult<Vec<Recommendation>> {
        Ok(self.recommendations.lock().unwrap().clone())
    }
}

#[async_trait]
impl AuthApi for FakeBackend {
    async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(email) {
            Some(account) if account.password == password => Ok(self
                .login_token_override
                .clone()
                .unwrap_or_else(|| token_for(&account.id, account.role.as_str()))),
            _ => Err(ApiError::Http {
                status: 401,
                detail: Some("Invalid email/password".to_string()),
            }),
        }
    }

    async fn register(&self, registration: &Registration) -> ApiResult<()> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(&registration.email) {
            return Err(ApiError::Http {
                status: 400,
                detail: Some("Email already registered".to_string()),
            });
        }
        let id = (accounts.len() + 1).to_string();
        accounts.insert(
            registration.email.clone(),
            Account {
                id,
                password: registration.password.clone(),
                role: registration.role.clone(),
            },
        );
        Ok(())
    }
}
