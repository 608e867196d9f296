//! Session handling.
//!
//! The access token is decoded locally, without verifying its signature, to
//! learn the subject and role. That identity only drives client-side route
//! gating; the server authorizes every request on its own.
//!
//! Token and identity are persisted as one record, so they are written and
//! cleared together.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, SessionError};
use crate::models::session::{Identity, Registration, Role};
use crate::services::api::AuthApi;

mod route;
mod store;

pub use route::{Route, RouteDecision};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

/// Token plus the identity decoded from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Identity,
}

#[derive(Deserialize)]
struct Claims {
    sub: serde_json::Value,
    role: String,
}

/// Extract subject and role from the token payload.
///
/// Any structural problem (wrong segment count, bad base64, bad JSON,
/// missing claims) is reported as [`SessionError::MalformedToken`].
pub fn decode_identity(token: &str, email: &str) -> Result<Identity, SessionError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(SessionError::MalformedToken("expected three segments".into())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| SessionError::MalformedToken(format!("payload is not base64url: {}", e)))?;
    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|e| SessionError::MalformedToken(format!("payload is not valid claims: {}", e)))?;

    let id = match claims.sub {
        serde_json::Value::String(sub) if !sub.is_empty() => sub,
        serde_json::Value::Number(sub) => sub.to_string(),
        _ => return Err(SessionError::MalformedToken("missing subject".into())),
    };

    Ok(Identity {
        id,
        role: Role::from(claims.role.as_str()),
        email: email.to_string(),
    })
}

/// Why a sign-in attempt failed
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Remote(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl LoginError {
    pub fn user_message(&self) -> String {
        match self {
            LoginError::Remote(err) => err.user_message("Login failed"),
            LoginError::Session(_) => "Login failed".to_string(),
        }
    }
}

/// Process-wide session, created once at startup and handed to whatever
/// needs to know who is signed in.
pub struct SessionContext<S: SessionStore> {
    store: S,
    current: Option<Session>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Restore the persisted session, if any.
    ///
    /// Unreadable or malformed data is cleared and treated as signed out.
    pub fn load(store: S) -> Self {
        let current = match store.load() {
            Ok(session) => session,
            Err(err) => {
                log::warn!("Discarding unreadable session: {}", err);
                if let Err(clear_err) = store.clear() {
                    log::error!("Failed to clear session storage: {}", clear_err);
                }
                None
            }
        };

        if let Some(session) = &current {
            log::info!("Restored session for {} ({})", session.user.email, session.user.role);
        }

        Self { store, current }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn user(&self) -> Option<&Identity> {
        self.current.as_ref().map(|session| &session.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|session| session.token.as_str())
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// Exchange credentials for a token, decode it and persist both.
    ///
    /// If the token cannot be decoded nothing is kept and any previous
    /// session is cleared.
    pub async fn login<A: AuthApi + ?Sized>(
        &mut self,
        api: &A,
        email: &str,
        password: &str,
    ) -> Result<&Identity, LoginError> {
        let token = api.login(email, password).await?;

        let user = match decode_identity(&token, email) {
            Ok(user) => user,
            Err(err) => {
                log::warn!("Received an undecodable token for {}: {}", email, err);
                self.logout()?;
                return Err(err.into());
            }
        };

        let session = Session { token, user };
        self.store.save(&session)?;
        log::info!("Signed in as {} ({})", session.user.email, session.user.role);

        Ok(&self.current.insert(session).user)
    }

    /// Create an account. Does not sign in.
    pub async fn register<A: AuthApi + ?Sized>(
        &self,
        api: &A,
        registration: &Registration,
    ) -> Result<(), ApiError> {
        api.register(registration).await?;
        log::info!("Registered {} as {}", registration.email, registration.role);
        Ok(())
    }

    /// Forget token and identity together
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.current = None;
        self.store.clear()
    }

    /// Client-side gate for `route` given the current identity
    pub fn check(&self, route: Route) -> RouteDecision {
        route.check(self.user())
    }
}
