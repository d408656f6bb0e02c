use hyper::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{path_segment, relay};
use crate::{
    api::{error::ApiError, reply::parse_json_body},
    context::AppContext,
    protocols::https::LifxRequest,
};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ActivateSceneRequest {
    /// Transition time in seconds
    pub duration: f64,
    pub fast: bool,
}

impl Default for ActivateSceneRequest {
    fn default() -> Self {
        ActivateSceneRequest {
            duration: 1.0,
            fast: false,
        }
    }
}

pub async fn list_scenes(ctx: &AppContext) -> Result<Value, ApiError> {
    let token = ctx.lifx_token()?;
    let request = LifxRequest::new(Method::GET, "/scenes", token);

    relay(ctx, request, "Failed to fetch scenes from LIFX").await
}

pub async fn activate_scene(
    ctx: &AppContext,
    scene_id: &str,
    body: &[u8],
) -> Result<Value, ApiError> {
    let token = ctx.lifx_token()?;

    if scene_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Scene id is required".to_string()));
    }

    let params: ActivateSceneRequest = parse_json_body(body)?;

    if params.duration < 0.0 {
        return Err(ApiError::BadRequest(
            "duration must not be negative".to_string(),
        ));
    }

    let payload = serde_json::to_value(&params).map_err(eyre::Report::from)?;
    let request = LifxRequest::new(
        Method::PUT,
        format!("/scenes/scene_id:{}/activate", path_segment(scene_id)),
        token,
    )
    .with_body(payload);

    relay(ctx, request, "Failed to activate scene").await
}
