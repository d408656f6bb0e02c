use hyper::{
    header::{HeaderValue, SET_COOKIE},
    Body, Response, StatusCode,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::{error::ApiError, reply::{json_response, parse_json_body}},
    context::AppContext,
};

pub mod credentials;
pub mod gate;
pub mod session;

#[derive(Deserialize, Debug)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

/// Checks the submitted credentials and, when they match, hands out the
/// session cookies. A failed attempt leaves cookies untouched.
pub fn login(ctx: &AppContext, body: &[u8]) -> Result<Response<Body>, ApiError> {
    let request: LoginRequest = parse_json_body(body)?;

    let (email, password) = match (request.email, request.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Email and password are required".to_string(),
            ))
        }
    };

    if !ctx.credentials.validate(&email, &password) {
        log::info!("Rejected login for {}", email.trim());
        return Err(ApiError::Unauthorized);
    }

    log::info!("Logged in {}", email.trim());

    let cookies = session::login_cookies(email.trim(), ctx.http.secure_cookies);
    Ok(with_cookies(json_response(StatusCode::OK, &json!({ "success": true })), cookies))
}

/// Expires both session cookies, whether or not a session existed.
pub fn logout(ctx: &AppContext) -> Response<Body> {
    let cookies = session::logout_cookies(ctx.http.secure_cookies);
    with_cookies(json_response(StatusCode::OK, &json!({ "success": true })), cookies)
}

fn with_cookies(mut response: Response<Body>, cookies: [String; 2]) -> Response<Body> {
    for cookie in cookies {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => log::error!("Dropping unrepresentable cookie: {e}"),
        }
    }

    response
}
