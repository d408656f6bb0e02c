use hyper::{header, Body, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response<Body> {
    let body = match serde_json::to_vec(value) {
        Ok(body) => body,
        Err(e) => {
            log::error!("Failed to serialize response body: {e:?}");
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(Body::empty())
                .unwrap_or_default();
        }
    };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap_or_default()
}

/// Decodes a JSON request body, reporting the offending field on failure.
pub fn parse_json_body<T: for<'a> Deserialize<'a>>(body: &[u8]) -> Result<T, ApiError> {
    let de = &mut serde_json::Deserializer::from_slice(body);
    let value: T = serde_path_to_error::deserialize(de)?;

    Ok(value)
}
