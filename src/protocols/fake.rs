use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use color_eyre::Result;
use eyre::eyre;
use hyper::{body::Bytes, StatusCode};

use super::https::{LifxRequest, LifxResponse, LifxTransport};

/// Records every request and answers with a canned response.
pub struct FakeTransport {
    status: StatusCode,
    body: &'static str,
    fail: bool,
    requests: Mutex<Vec<LifxRequest>>,
}

impl FakeTransport {
    pub fn ok(body: &'static str) -> Arc<Self> {
        FakeTransport::with_status(StatusCode::OK, body)
    }

    pub fn with_status(status: StatusCode, body: &'static str) -> Arc<Self> {
        Arc::new(FakeTransport {
            status,
            body,
            fail: false,
            requests: Mutex::new(vec![]),
        })
    }

    /// Every send fails as if the network were down.
    pub fn unreachable() -> Arc<Self> {
        Arc::new(FakeTransport {
            status: StatusCode::OK,
            body: "",
            fail: true,
            requests: Mutex::new(vec![]),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> LifxRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl LifxTransport for FakeTransport {
    async fn send(&self, request: LifxRequest) -> Result<LifxResponse> {
        self.requests.lock().unwrap().push(request);

        if self.fail {
            return Err(eyre!("connection refused"));
        }

        Ok(LifxResponse {
            status: self.status,
            body: Bytes::from_static(self.body.as_bytes()),
        })
    }
}
