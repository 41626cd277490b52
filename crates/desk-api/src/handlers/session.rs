//! Session handlers: cookie issue and logout.

use axum::extract::State;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::auth::TOKEN_COOKIE;
use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::state::AppState;

/// Login request. Clients send their whole user object; only the email ends up
/// in the token claim.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub success: bool,
}

/// Issue a signed token and set it as the session cookie.
pub async fn issue_session(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    body.validate()?;

    let token = state.tokens.issue(&body.email)?;
    let jar = jar.add(session_cookie(&state.config, token));

    Ok((jar, Json(SessionResponse { success: true })))
}

/// Clear the session cookie. Tokens are invalidated client-side only; there is
/// no server-side revocation list.
pub async fn logout(jar: CookieJar) -> ApiResult<(CookieJar, Json<SessionResponse>)> {
    let mut cookie = Cookie::from(TOKEN_COOKIE);
    cookie.set_path("/");
    let jar = jar.remove(cookie);

    Ok((jar, Json(SessionResponse { success: true })))
}

/// Build the session cookie. In production the cookie must survive the
/// cross-site hop from the deployed frontends, so it is Secure + SameSite=None;
/// everywhere else SameSite=Strict keeps local development honest.
fn session_cookie(config: &ApiConfig, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_path("/");

    if config.is_production() {
        cookie.set_secure(true);
        cookie.set_same_site(SameSite::None);
    } else {
        cookie.set_secure(false);
        cookie.set_same_site(SameSite::Strict);
    }

    cookie
}
