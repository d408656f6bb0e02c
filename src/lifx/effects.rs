use hyper::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::relay;
use crate::{
    api::{error::ApiError, reply::parse_json_body},
    color::{hex_to_cloud_color, hex_to_rgb},
    context::AppContext,
    protocols::https::LifxRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Breathe,
    Morph,
    Move,
    Off,
}

impl EffectKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "breathe" => Some(EffectKind::Breathe),
            "morph" => Some(EffectKind::Morph),
            "move" => Some(EffectKind::Move),
            "off" => Some(EffectKind::Off),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Breathe => "breathe",
            EffectKind::Morph => "morph",
            EffectKind::Move => "move",
            EffectKind::Off => "off",
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            EffectKind::Breathe => "Failed to apply breathe effect",
            EffectKind::Morph => "Failed to apply morph effect",
            EffectKind::Move => "Failed to apply move effect",
            EffectKind::Off => "Failed to stop effects",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BreatheParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub period: f64,
    pub cycles: f64,
    pub power_on: bool,
    pub persist: bool,
    pub peak: f64,
}

impl Default for BreatheParams {
    fn default() -> Self {
        BreatheParams {
            color: None,
            period: 1.0,
            cycles: 3.0,
            power_on: true,
            persist: false,
            peak: 0.5,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MorphParams {
    pub period: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub palette: Vec<String>,
    pub power_on: bool,
    pub fast: bool,
}

impl Default for MorphParams {
    fn default() -> Self {
        MorphParams {
            period: 5.0,
            duration: None,
            palette: ["red", "orange", "yellow", "green", "blue", "purple"]
                .map(String::from)
                .into(),
            power_on: true,
            fast: false,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MoveParams {
    pub direction: Direction,
    pub period: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<f64>,
    pub power_on: bool,
    pub fast: bool,
}

impl Default for MoveParams {
    fn default() -> Self {
        MoveParams {
            direction: Direction::Forward,
            period: 1.0,
            cycles: None,
            power_on: true,
            fast: false,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StopParams {
    pub power_off: bool,
}

/// One effect invocation. Serializes to exactly the payload the cloud API
/// expects for that effect.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Effect {
    Breathe(BreatheParams),
    Morph(MorphParams),
    Move(MoveParams),
    Off(StopParams),
}

impl Effect {
    pub fn parse(kind: EffectKind, body: &[u8]) -> Result<Effect, ApiError> {
        let effect = match kind {
            EffectKind::Breathe => {
                let mut params: BreatheParams = parse_json_body(body)?;

                params.color = match params.color.filter(|c| !c.is_empty()) {
                    Some(color) if hex_to_rgb(&color).is_some() => Some(hex_to_cloud_color(&color)),
                    Some(color) => {
                        return Err(ApiError::BadRequest(format!(
                            "Invalid color {color:?}, expected a 6 digit hex value"
                        )))
                    }
                    None => None,
                };

                Effect::Breathe(params)
            }
            EffectKind::Morph => Effect::Morph(parse_json_body(body)?),
            EffectKind::Move => Effect::Move(parse_json_body(body)?),
            EffectKind::Off => {
                let params = parse_json_body(body).unwrap_or_else(|e| {
                    log::debug!("Ignoring unreadable effects/off body: {e}");
                    StopParams::default()
                });

                Effect::Off(params)
            }
        };

        Ok(effect)
    }

    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Breathe(_) => EffectKind::Breathe,
            Effect::Morph(_) => EffectKind::Morph,
            Effect::Move(_) => EffectKind::Move,
            Effect::Off(_) => EffectKind::Off,
        }
    }
}

/// Runs (or, for [`EffectKind::Off`], stops) an effect on all lights.
pub async fn apply_effect(
    ctx: &AppContext,
    kind: EffectKind,
    body: &[u8],
) -> Result<Value, ApiError> {
    let token = ctx.lifx_token()?;
    let effect = Effect::parse(kind, body)?;
    let payload = serde_json::to_value(&effect).map_err(eyre::Report::from)?;

    let request = LifxRequest::new(
        Method::POST,
        format!("/lights/all/effects/{}", effect.kind().name()),
        token,
    )
    .with_body(payload);

    relay(ctx, request, kind.failure_message()).await
}
