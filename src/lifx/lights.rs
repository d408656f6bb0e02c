use hyper::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{path_segment, relay};
use crate::{
    api::{error::ApiError, reply::parse_json_body},
    color::{hex_to_cloud_color, hex_to_rgb},
    context::AppContext,
    protocols::https::LifxRequest,
};

/// Transition time used when the caller does not pick one, in seconds
pub const DEFAULT_STATE_DURATION: f64 = 0.5;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    On,
    Off,
}

fn default_state_duration() -> Option<f64> {
    Some(DEFAULT_STATE_DURATION)
}

/// Body accepted by the set-state routes. `selector` is only read by the
/// route that does not carry one in its path.
#[derive(Deserialize, Debug, Clone)]
pub struct StateRequest {
    pub selector: Option<String>,
    pub power: Option<Power>,
    pub color: Option<String>,
    pub brightness: Option<f64>,

    /// Missing means the default transition, an explicit `null` means none
    #[serde(default = "default_state_duration")]
    pub duration: Option<f64>,
}

/// Sparse state update sent to the cloud API. Absent fields leave the
/// corresponding light attribute alone.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<Power>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Always within 0.0 - 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,

    /// Transition time in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl TryFrom<StateRequest> for StateUpdate {
    type Error = ApiError;

    fn try_from(request: StateRequest) -> Result<Self, Self::Error> {
        let color = match request.color {
            Some(color) if hex_to_rgb(&color).is_some() => Some(hex_to_cloud_color(&color)),
            Some(color) => {
                return Err(ApiError::BadRequest(format!(
                    "Invalid color {color:?}, expected a 6 digit hex value"
                )))
            }
            None => None,
        };

        if let Some(duration) = request.duration {
            if duration < 0.0 {
                return Err(ApiError::BadRequest(
                    "duration must not be negative".to_string(),
                ));
            }
        }

        Ok(StateUpdate {
            power: request.power,
            color,
            brightness: request.brightness.map(|b| b.clamp(0.0, 1.0)),
            duration: request.duration,
        })
    }
}

/// `GET /lights/{selector}`, body relayed verbatim.
pub async fn list_lights(ctx: &AppContext, selector: Option<&str>) -> Result<Value, ApiError> {
    let token = ctx.lifx_token()?;
    let selector = selector
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| ctx.lifx.default_selector());

    let request = LifxRequest::new(
        Method::GET,
        format!("/lights/{}", path_segment(selector)),
        token,
    );

    relay(ctx, request, "Failed to fetch lights from LIFX").await
}

/// Sets the state of the lights matched by `selector`. Without a path
/// selector the body's `selector` is used, falling back to the configured
/// default.
pub async fn set_state(
    ctx: &AppContext,
    selector: Option<&str>,
    body: &[u8],
) -> Result<Value, ApiError> {
    let token = ctx.lifx_token()?;
    let request: StateRequest = parse_json_body(body)?;

    let selector = match selector {
        Some(selector) => selector.to_string(),
        None => request
            .selector
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ctx.lifx.default_selector().to_string()),
    };

    let update = StateUpdate::try_from(request)?;
    let body = serde_json::to_value(&update).map_err(eyre::Report::from)?;

    let request = LifxRequest::new(
        Method::PUT,
        format!("/lights/{}/state", path_segment(&selector)),
        token,
    )
    .with_body(body);

    relay(ctx, request, "Failed to update light").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{context::test_support::test_context, protocols::fake::FakeTransport};
    use serde_json::json;

    fn update_for(body: Value) -> Result<Value, ApiError> {
        let request: StateRequest = serde_json::from_value(body).unwrap();
        let update = StateUpdate::try_from(request)?;
        Ok(serde_json::to_value(update).unwrap())
    }

    #[test]
    fn power_only_keeps_default_duration() {
        assert_eq!(
            update_for(json!({ "power": "on" })).unwrap(),
            json!({ "power": "on", "duration": 0.5 })
        );
    }

    #[test]
    fn explicit_duration_overrides_default() {
        assert_eq!(
            update_for(json!({ "power": "off", "duration": 0.3 })).unwrap(),
            json!({ "power": "off", "duration": 0.3 })
        );
        assert_eq!(
            update_for(json!({ "power": "off", "duration": null })).unwrap(),
            json!({ "power": "off" })
        );
    }

    #[test]
    fn brightness_is_clamped() {
        let brightness = |input: f64| update_for(json!({ "brightness": input })).unwrap()["brightness"].clone();

        assert_eq!(brightness(-0.5), json!(0.0));
        assert_eq!(brightness(1.5), json!(1.0));
        assert_eq!(brightness(0.4), json!(0.4));
    }

    #[test]
    fn color_gets_leading_hash() {
        assert_eq!(
            update_for(json!({ "color": "a01889", "duration": 1 })).unwrap(),
            json!({ "color": "#a01889", "duration": 1.0 })
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(update_for(json!({ "color": "purple" })), Err(ApiError::BadRequest(_))));
        assert!(matches!(update_for(json!({ "duration": -1 })), Err(ApiError::BadRequest(_))));
    }

    #[tokio::test]
    async fn unknown_power_value_is_a_bad_request() {
        let fake = FakeTransport::ok("{}");
        let ctx = test_context(Some("token"), fake.clone());

        let err = set_state(&ctx, Some("all"), br#"{"power": "dim"}"#).await.unwrap_err();

        assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("power")), "{err:?}");
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn set_state_puts_sparse_body_to_selector() {
        let fake = FakeTransport::with_status(hyper::StatusCode::MULTI_STATUS, r#"{"results": []}"#);
        let ctx = test_context(Some("token"), fake.clone());

        let value = set_state(&ctx, Some("id:d073d5"), br#"{"brightness": 2}"#).await.unwrap();
        assert_eq!(value, json!({ "results": [] }));

        let request = fake.last_request();
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "/lights/id:d073d5/state");
        assert_eq!(request.token, "token");
        assert_eq!(request.body, Some(json!({ "brightness": 1.0, "duration": 0.5 })));
    }

    #[tokio::test]
    async fn body_selector_is_used_without_path_selector() {
        let fake = FakeTransport::ok("{}");
        let ctx = test_context(Some("token"), fake.clone());

        set_state(&ctx, None, br#"{"selector": "group:Kitchen", "power": "on"}"#).await.unwrap();
        assert_eq!(fake.last_request().path, "/lights/group:Kitchen/state");
        assert_eq!(
            fake.last_request().body,
            Some(json!({ "power": "on", "duration": 0.5 }))
        );

        set_state(&ctx, None, br#"{"power": "on"}"#).await.unwrap();
        assert_eq!(fake.last_request().path, "/lights/all/state");

        set_state(&ctx, Some("id:a,id:b"), br#"{"power": "on"}"#).await.unwrap();
        assert_eq!(fake.last_request().path, "/lights/id:a,id:b/state");
    }

    #[tokio::test]
    async fn list_lights_uses_query_selector_or_default() {
        let fake = FakeTransport::ok("[]");
        let ctx = test_context(Some("token"), fake.clone());

        list_lights(&ctx, Some("label:Desk")).await.unwrap();
        assert_eq!(fake.last_request().path, "/lights/label:Desk");
        assert_eq!(fake.last_request().body, None);

        list_lights(&ctx, Some("")).await.unwrap();
        assert_eq!(fake.last_request().path, "/lights/all");
    }

    #[tokio::test]
    async fn missing_token_never_calls_out() {
        let fake = FakeTransport::ok("[]");
        let ctx = test_context(None, fake.clone());

        assert!(matches!(list_lights(&ctx, None).await, Err(ApiError::MissingToken)));
        assert!(matches!(
            set_state(&ctx, Some("all"), br#"{"power": "on"}"#).await,
            Err(ApiError::MissingToken)
        ));
        assert_eq!(fake.calls(), 0);
    }
}
