use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{FlowResponse, LoginRequest, RegisterRequest},
        error::AuthError,
        services,
    },
    session::{Connection, Page},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

async fn ensure_logged_out(conn: &Connection) -> Result<(), AuthError> {
    if conn.load().await?.logged_in {
        return Err(AuthError::AlreadyLoggedIn);
    }
    Ok(())
}

#[instrument(skip(state, conn, payload), fields(email = %payload.email, role = %payload.role))]
pub async fn register(
    State(state): State<AppState>,
    conn: Connection,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, AuthError>,
) -> Result<Json<FlowResponse>, AuthError> {
    ensure_logged_out(&conn).await?;

    services::register(state.store.as_ref(), payload).await?;

    let view = conn
        .update(|s| {
            s.navigate(Page::Login);
            s.view()
        })
        .await?;

    Ok(Json(FlowResponse {
        message: "Account created successfully! Please login.",
        view,
    }))
}

#[instrument(skip(state, conn, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    conn: Connection,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, AuthError>,
) -> Result<Json<FlowResponse>, AuthError> {
    ensure_logged_out(&conn).await?;

    let user = services::authenticate(state.store.as_ref(), &payload.email, &payload.password)
        .await?;

    // A fresh id per login; the pre-login id is dropped from the store.
    conn.renew().await?;
    let view = conn
        .update(|s| {
            s.sign_in(payload.email, user.role);
            s.view()
        })
        .await?;

    Ok(Json(FlowResponse {
        message: "Login successful",
        view,
    }))
}

#[instrument(skip(conn))]
pub async fn logout(conn: Connection) -> Result<Json<FlowResponse>, AuthError> {
    let mut session = conn.load().await?;
    if !session.logged_in {
        return Err(AuthError::NotLoggedIn);
    }
    session.sign_out();
    conn.save(&session).await?;

    info!("user logged out");
    Ok(Json(FlowResponse {
        message: "Logged out successfully",
        view: session.view(),
    }))
}
