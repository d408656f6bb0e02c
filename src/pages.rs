use hyper::{header, Body, Method, Request, Response, StatusCode, Uri};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::{
    auth::{
        gate::{self, GateDecision},
        session,
    },
    context::AppContext,
};

/// Serves the prebuilt dashboard pages, after the session gate has had its
/// say.
pub async fn handle_page(ctx: &AppContext, req: Request<Body>) -> Response<Body> {
    let path = req.uri().path();

    if gate::is_gated(path) {
        let authenticated = session::is_authenticated(req.headers());

        if let GateDecision::Redirect(location) = gate::decide(path, authenticated) {
            return gate::redirect_response(location);
        }
    }

    if req.method() != Method::GET && req.method() != Method::HEAD {
        return plain_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    serve_static(&ctx.http.static_dir, &req).await
}

/// Serves `req` out of `static_dir`. Extensionless paths that miss fall back
/// to the matching `.html` page, so `/login` is answered by `login.html`.
async fn serve_static(static_dir: &str, req: &Request<Body>) -> Response<Body> {
    let path = req.uri().path();

    let response = serve_file(static_dir, req, path).await;
    if response.status() != StatusCode::NOT_FOUND || !wants_html_fallback(path) {
        return response;
    }

    serve_file(static_dir, req, &format!("{path}.html")).await
}

fn wants_html_fallback(path: &str) -> bool {
    match path.rsplit('/').next() {
        Some(last) => !last.is_empty() && !last.contains('.'),
        None => false,
    }
}

async fn serve_file(static_dir: &str, req: &Request<Body>, path: &str) -> Response<Body> {
    let Ok(uri) = path.parse::<Uri>() else {
        return plain_response(StatusCode::NOT_FOUND, "Not found");
    };

    let mut file_req = Request::new(Body::empty());
    *file_req.method_mut() = req.method().clone();
    *file_req.uri_mut() = uri;
    *file_req.headers_mut() = req.headers().clone();

    let response = match ServeDir::new(static_dir).oneshot(file_req).await {
        Ok(response) => response,
        Err(e) => {
            log::error!("Failed to serve {path}: {e:?}");
            return plain_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    let (parts, body) = response.into_parts();
    match hyper::body::to_bytes(body).await {
        Ok(bytes) => Response::from_parts(parts, bytes.into()),
        Err(e) => {
            log::error!("Failed to read {path}: {e:?}");
            plain_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn plain_response(status: StatusCode, message: &'static str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(message.into())
        .unwrap_or_default()
}
