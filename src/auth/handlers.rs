use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use time::{Duration, OffsetDateTime};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, LoginRequest, MessageResponse, PublicUser, RegisterRequest,
            ResetPasswordBody, ResetPasswordRequest,
        },
        extractors::{clear_session, session_cookie, AuthUser},
        jwt::JwtKeys,
        password::{
            hash_password, is_expired, issue_reset_token, verify_against_dummy, verify_password,
        },
        repo_types::User,
        services::{validate_login, validate_register, validate_reset, validate_reset_request},
    },
    error::{AppError, AppResult},
    state::AppState,
};

const RESET_ACK: &str = "If an account exists for that email, a reset link has been sent";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/reset-password-request", post(reset_password_request))
        .route("/auth/reset-password", post(reset_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(get_me))
}

fn start_session(state: &AppState, jar: CookieJar, user: User) -> AppResult<(CookieJar, AuthResponse)> {
    let keys = JwtKeys::from_ref(state);
    let token = keys.issue(user.id, &user.email).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        AppError::Internal(e)
    })?;
    let jar = jar.add(session_cookie(
        token.clone(),
        &keys,
        state.config.is_production(),
    ));
    Ok((
        jar,
        AuthResponse {
            token,
            user: user.into(),
        },
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(mut payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponse>)> {
    if let Err(e) = validate_register(&mut payload) {
        warn!(error = %e, "invalid registration");
        return Err(e);
    }

    let hash = hash_password(&payload.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        AppError::Internal(e)
    })?;

    let user = match User::create(&state.db, &payload.email, &payload.name, &hash).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "email already registered");
            return Err(AppError::Conflict("Email already registered".into()));
        }
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    let (jar, body) = start_session(&state, jar, user)?;
    Ok((StatusCode::CREATED, jar, Json(body)))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(mut payload): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    validate_login(&mut payload)?;

    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            verify_against_dummy(&payload.password);
            warn!(email = %payload.email, "login unknown email");
            return Err(AppError::Unauthenticated("Invalid email or password"));
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthenticated("Invalid email or password"));
    }

    info!(user_id = %user.id, "user logged in");
    let (jar, body) = start_session(&state, jar, user)?;
    Ok((jar, Json(body)))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        clear_session(jar),
        Json(MessageResponse {
            message: "Logged out",
        }),
    )
}

/// Always answers 200 so the response never reveals whether the email exists.
#[instrument(skip(state, payload))]
pub async fn reset_password_request(
    State(state): State<AppState>,
    Json(mut payload): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_reset_request(&mut payload)?;

    let token = issue_reset_token();
    let expiry =
        OffsetDateTime::now_utc() + Duration::minutes(state.config.reset_token_ttl_minutes);
    match User::set_reset_token(&state.db, &payload.email, &token, expiry).await {
        Ok(true) => {
            info!("password reset token issued");
            // No mail transport; the token is only surfaced outside production.
            if !state.config.is_production() {
                debug!(%token, "password reset token");
            }
        }
        Ok(false) => debug!("password reset requested for unknown email"),
        Err(e) => error!(error = %e, "set_reset_token failed"),
    }

    Ok(Json(MessageResponse { message: RESET_ACK }))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordBody>,
) -> AppResult<Json<MessageResponse>> {
    validate_reset(&payload)?;
    let invalid = || AppError::validation("token", "Invalid or expired reset token");

    let user = User::find_by_reset_token(&state.db, payload.token.trim())
        .await?
        .ok_or_else(invalid)?;
    if is_expired(user.reset_token_expiry) {
        warn!(user_id = %user.id, "expired reset token");
        return Err(invalid());
    }

    let hash = hash_password(&payload.password).map_err(AppError::Internal)?;
    if !User::reset_password(&state.db, user.id, payload.token.trim(), &hash).await? {
        return Err(invalid());
    }

    info!(user_id = %user.id, "password reset");
    Ok(Json(MessageResponse {
        message: "Password has been reset",
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    me: AuthUser,
) -> AppResult<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, me.id()).await?.ok_or_else(|| {
        warn!(user_id = %me.id(), "session for missing user");
        AppError::unauthenticated()
    })?;
    Ok(Json(user.into()))
}
