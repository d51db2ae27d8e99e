use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::warn;
use uuid::Uuid;

use super::{claims::Identity, jwt::JwtKeys};
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "token";

/// Authenticated caller, read from the `token` cookie or a bearer header.
/// Use `Option<AuthUser>` on routes that also serve anonymous callers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.user_id
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let auth = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
        let bearer = bearer_token(parts).map(str::to_string);
        if cookie.is_none() && bearer.is_none() {
            return Err(AppError::unauthenticated());
        }

        // A stale cookie must not shadow a valid bearer token.
        let keys = JwtKeys::from_ref(state);
        match cookie
            .iter()
            .chain(bearer.iter())
            .find_map(|token| keys.verify(token))
        {
            Some(identity) => Ok(AuthUser(identity)),
            None => {
                warn!("invalid or expired session token");
                Err(AppError::unauthenticated())
            }
        }
    }
}

/// The session cookie set on login and registration.
pub fn session_cookie(token: String, keys: &JwtKeys, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(keys.session_ttl.as_secs() as i64))
        .build()
}

/// Always sets an expired `token` cookie, whether or not the request sent one.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.add(
        Cookie::build((SESSION_COOKIE, ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(time::Duration::ZERO)
            .expires(time::OffsetDateTime::UNIX_EPOCH)
            .build(),
    )
}
