use hyper::{header, Body, Response, StatusCode};

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/";

const ASSET_EXTENSIONS: [&str; 6] = ["svg", "png", "jpg", "jpeg", "gif", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Redirect(&'static str),
}

/// Whether the page gate applies to `path` at all. API routes and static
/// assets are never gated.
pub fn is_gated(path: &str) -> bool {
    if path == "/api" || path.starts_with("/api/") {
        return false;
    }

    if path.starts_with("/_assets/") || path == "/favicon.ico" {
        return false;
    }

    let is_asset = path
        .rsplit_once('.')
        .map(|(_, ext)| ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    !is_asset
}

/// Logged out browsers are sent to the login page, logged in browsers are
/// kept away from it.
pub fn decide(path: &str, authenticated: bool) -> GateDecision {
    match (authenticated, path == LOGIN_PATH) {
        (true, true) => GateDecision::Redirect(DASHBOARD_PATH),
        (false, false) => GateDecision::Redirect(LOGIN_PATH),
        _ => GateDecision::Pass,
    }
}

pub fn redirect_response(location: &str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::TEMPORARY_REDIRECT)
        .header(header::LOCATION, location)
        .body(Body::empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_out_browsers_go_to_login() {
        for path in ["/", "/settings", "/login/extra"] {
            assert_eq!(decide(path, false), GateDecision::Redirect(LOGIN_PATH), "{path}");
        }
        assert_eq!(decide(LOGIN_PATH, false), GateDecision::Pass);
    }

    #[test]
    fn logged_in_browsers_skip_login() {
        assert_eq!(decide(LOGIN_PATH, true), GateDecision::Redirect(DASHBOARD_PATH));
        assert_eq!(decide("/", true), GateDecision::Pass);
        assert_eq!(decide("/settings", true), GateDecision::Pass);
    }

    #[test]
    fn api_routes_and_assets_are_not_gated() {
        assert!(!is_gated("/api/devices"));
        assert!(!is_gated("/api"));
        assert!(!is_gated("/favicon.ico"));
        assert!(!is_gated("/logo.SVG"));
        assert!(!is_gated("/img/bulb.png"));
        assert!(!is_gated("/_assets/app.js"));

        assert!(is_gated("/"));
        assert!(is_gated("/login"));
        assert!(is_gated("/apiary"));
        assert!(is_gated("/index.html"));
    }

    #[test]
    fn redirect_points_at_location() {
        let response = redirect_response(LOGIN_PATH);

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}
