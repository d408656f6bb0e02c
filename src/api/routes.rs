use std::{convert::Infallible, sync::Arc};

use hyper::{Body, Method, Request, Response, StatusCode};

use super::{error::ApiError, reply::json_response};
use crate::{
    auth,
    context::AppContext,
    lifx::{
        effects::{apply_effect, EffectKind},
        lights::{list_lights, set_state},
        scenes::{activate_scene, list_scenes},
    },
    pages,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Login,
    Logout,
    ListDevices,
    SetState { selector: Option<String> },
    Effect(EffectKind),
    ListScenes,
    ActivateScene(String),
}

impl Route {
    /// Generic wording for the "An error occurred while ..." reply
    fn context(&self) -> &'static str {
        match self {
            Route::Login => "logging in",
            Route::Logout => "logging out",
            Route::ListDevices => "fetching lights",
            Route::SetState { .. } => "updating light",
            Route::Effect(EffectKind::Off) => "stopping effects",
            Route::Effect(_) => "applying effect",
            Route::ListScenes => "fetching scenes",
            Route::ActivateScene(_) => "activating scene",
        }
    }
}

fn decode_segment(segment: &str) -> Result<String, ApiError> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|_| ApiError::BadRequest(format!("Invalid path segment {segment:?}")))
}

/// Maps a method and the path below `/api` onto a route.
pub fn resolve(method: &Method, path: &str) -> Result<Route, ApiError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let (route, allowed) = match segments.as_slice() {
        ["auth", "login"] => (Route::Login, Method::POST),
        ["auth", "logout"] => (Route::Logout, Method::POST),
        ["devices"] => (Route::ListDevices, Method::GET),
        ["devices", "state"] => (Route::SetState { selector: None }, Method::POST),
        ["devices", "all", "effects", name] => {
            let kind = EffectKind::from_name(name).ok_or(ApiError::NotFound)?;
            (Route::Effect(kind), Method::POST)
        }
        ["devices", selector, "state"] => (
            Route::SetState {
                selector: Some(decode_segment(selector)?),
            },
            Method::POST,
        ),
        ["scenes"] => (Route::ListScenes, Method::GET),
        ["scenes", id, "activate"] => (Route::ActivateScene(decode_segment(id)?), Method::PUT),
        _ => return Err(ApiError::NotFound),
    };

    if *method != allowed {
        return Err(ApiError::MethodNotAllowed);
    }

    Ok(route)
}

fn query_selector(req: &Request<Body>) -> Option<String> {
    let query = req.uri().query()?;

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "selector")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

async fn dispatch(
    ctx: &AppContext,
    route: &Route,
    req: Request<Body>,
) -> Result<Response<Body>, ApiError> {
    let query = query_selector(&req);
    let body = hyper::body::to_bytes(req.into_body())
        .await
        .map_err(eyre::Report::from)?;

    let value = match route {
        Route::Login => return auth::login(ctx, &body),
        Route::Logout => return Ok(auth::logout(ctx)),
        Route::ListDevices => list_lights(ctx, query.as_deref()).await?,
        Route::SetState { selector } => set_state(ctx, selector.as_deref(), &body).await?,
        Route::Effect(kind) => apply_effect(ctx, *kind, &body).await?,
        Route::ListScenes => list_scenes(ctx).await?,
        Route::ActivateScene(id) => activate_scene(ctx, id, &body).await?,
    };

    Ok(json_response(StatusCode::OK, &value))
}

/// Handles everything below `/api`. These routes are not behind the page
/// gate and do no session check of their own.
pub async fn handle_api(ctx: &AppContext, req: Request<Body>) -> Response<Body> {
    let path = req.uri().path();
    let path = path.strip_prefix("/api").unwrap_or(path).to_string();

    let route = match resolve(req.method(), &path) {
        Ok(route) => route,
        Err(e) => return e.into_response("routing request"),
    };

    match dispatch(ctx, &route, req).await {
        Ok(response) => response,
        Err(e) => e.into_response(route.context()),
    }
}

pub async fn handle_request(
    ctx: Arc<AppContext>,
    req: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = if path == "/api" || path.starts_with("/api/") {
        handle_api(&ctx, req).await
    } else {
        pages::handle_page(&ctx, req).await
    };

    log::debug!("{} {} -> {}", method, path, response.status().as_u16());

    Ok(response)
}
