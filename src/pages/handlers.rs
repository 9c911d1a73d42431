use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use tracing::{debug, instrument};

use crate::{
    auth::AuthError,
    session::{Connection, Dashboard, Page, View},
    state::AppState,
};

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(current_view).delete(close_session))
        .route("/nav/:page", post(navigate))
        .route("/dashboard", get(dashboard))
}

/// Read-only; an untouched connection stores nothing.
#[instrument(skip(conn))]
pub async fn current_view(conn: Connection) -> Result<Json<View>, AuthError> {
    Ok(Json(conn.load().await?.view()))
}

/// Drops the connection's session entirely.
#[instrument(skip(conn))]
pub async fn close_session(conn: Connection) -> Result<StatusCode, AuthError> {
    conn.close().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Register/Login buttons of the navigation bar.
#[instrument(skip(conn))]
pub async fn navigate(
    conn: Connection,
    WithRejection(Path(page), _): WithRejection<Path<Page>, AuthError>,
) -> Result<Json<View>, AuthError> {
    let view = conn
        .update(|s| {
            s.navigate(page);
            s.view()
        })
        .await?;
    debug!(?page, "navigated");
    Ok(Json(view))
}

/// Role-conditioned panel; 401 unless logged in.
#[instrument(skip(conn))]
pub async fn dashboard(conn: Connection) -> Result<Json<Dashboard>, AuthError> {
    conn.load()
        .await?
        .dashboard()
        .map(Json)
        .ok_or(AuthError::NotLoggedIn)
}
