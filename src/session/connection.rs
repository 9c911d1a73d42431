use anyhow::Context;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::{
    cookie::{time::Duration, SameSite},
    Expiry, SessionManagerLayer, SessionStore,
};
use tracing::debug;

use super::Session;
use crate::auth::AuthError;

/// Cookie naming the connection's session record. Carries no credential.
pub const SESSION_COOKIE: &str = "harvesthub.sid";

const SESSION_KEY: &str = "harvesthub.session";

/// Session records expire after `idle_minutes` without a request.
pub fn session_layer<S>(store: S, idle_minutes: i64) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(idle_minutes)))
}

/// The typed [`Session`] of the current connection.
///
/// A record that is missing, expired or closed reads as a fresh session and
/// is saved under a new id, never under the old one.
pub struct Connection(tower_sessions::Session);

#[async_trait]
impl<S> FromRequestParts<S> for Connection
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = tower_sessions::Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AuthError::Internal(anyhow::anyhow!(msg)))?;
        Ok(Self(session))
    }
}

impl Connection {
    pub async fn load(&self) -> Result<Session, AuthError> {
        let state = self
            .0
            .get::<Session>(SESSION_KEY)
            .await
            .context("load session")?;
        Ok(state.unwrap_or_default())
    }

    pub async fn save(&self, state: &Session) -> Result<(), AuthError> {
        self.0
            .insert(SESSION_KEY, state)
            .await
            .context("save session")?;
        Ok(())
    }

    /// Loads, applies `f` and saves in one step.
    pub async fn update<F, R>(&self, f: F) -> Result<R, AuthError>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut state = self.load().await?;
        let out = f(&mut state);
        self.save(&state).await?;
        Ok(out)
    }

    /// Moves the session to a fresh id; the old id is deleted from the store.
    pub async fn renew(&self) -> Result<(), AuthError> {
        self.0.cycle_id().await.context("cycle session id")?;
        Ok(())
    }

    /// Deletes the record and expires the cookie.
    pub async fn close(&self) -> Result<(), AuthError> {
        self.0.flush().await.context("flush session")?;
        debug!("session closed");
        Ok(())
    }
}
