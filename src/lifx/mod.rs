use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::{json, Value};

use crate::{api::error::ApiError, context::AppContext, protocols::https::LifxRequest};

pub mod effects;
pub mod lights;
pub mod scenes;

/// Sends one request to the cloud API and hands back its JSON body.
///
/// Any non-2xx answer is relayed with the upstream status and `failure` as the
/// message. Nothing is retried.
pub async fn relay(
    ctx: &AppContext,
    request: LifxRequest,
    failure: &'static str,
) -> Result<Value, ApiError> {
    log::debug!("LIFX {} {}", request.method, request.path);

    let response = ctx.transport.send(request).await?;

    if !response.status.is_success() {
        log::warn!(
            "LIFX API error ({}): {}",
            response.status,
            String::from_utf8_lossy(&response.body)
        );

        return Err(ApiError::Upstream {
            status: response.status,
            message: failure,
        });
    }

    // Requests sent with `fast` get an empty 202 back
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(json!({}));
    }

    let de = &mut serde_json::Deserializer::from_slice(&response.body);
    let value: Value = serde_path_to_error::deserialize(de)
        .map_err(|e| eyre::eyre!("Malformed LIFX response: {e}"))?;

    Ok(value)
}

/// Characters that cannot appear raw inside one path segment. Selector
/// syntax (`:`, `,`, `|`) passes through untouched.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Escapes a selector or scene id for use as one path segment.
pub fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::test_support::test_context, protocols::fake::FakeTransport};
    use hyper::{Method, StatusCode};

    #[tokio::test]
    async fn relays_upstream_json() {
        let fake = FakeTransport::ok(r#"[{"id": "d073d5"}]"#);
        let ctx = test_context(Some("token"), fake.clone());

        let value = relay(&ctx, LifxRequest::new(Method::GET, "/lights/all", "token"), "nope")
            .await
            .unwrap();

        assert_eq!(value, json!([{ "id": "d073d5" }]));
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn relays_upstream_status_with_generic_message() {
        let fake = FakeTransport::with_status(StatusCode::UNPROCESSABLE_ENTITY, "{\"error\":\"x\"}");
        let ctx = test_context(Some("token"), fake.clone());

        let err = relay(&ctx, LifxRequest::new(Method::GET, "/scenes", "token"), "Failed")
            .await
            .unwrap_err();

        match err {
            ApiError::Upstream { status, message } => {
                assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(message, "Failed");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn empty_success_body_becomes_empty_object() {
        let fake = FakeTransport::with_status(StatusCode::ACCEPTED, "");
        let ctx = test_context(Some("token"), fake);

        let value = relay(&ctx, LifxRequest::new(Method::PUT, "/scenes/scene_id:x/activate", "token"), "Failed")
            .await
            .unwrap();

        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn malformed_body_and_network_failures_are_internal() {
        let ctx = test_context(Some("token"), FakeTransport::ok("<html>"));
        let err = relay(&ctx, LifxRequest::new(Method::GET, "/scenes", "token"), "Failed")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));

        let ctx = test_context(Some("token"), FakeTransport::unreachable());
        let err = relay(&ctx, LifxRequest::new(Method::GET, "/scenes", "token"), "Failed")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn path_segments_keep_selector_syntax() {
        assert_eq!(path_segment("all"), "all");
        assert_eq!(path_segment("id:a,id:b"), "id:a,id:b");
        assert_eq!(path_segment("group:Living Room"), "group:Living%20Room");
        assert_eq!(path_segment("label:a/b?c"), "label:a%2Fb%3Fc");
    }
}
