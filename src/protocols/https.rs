use async_trait::async_trait;
use color_eyre::Result;
use hyper::{
    body::Bytes,
    client::HttpConnector,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Body, Method, Request, StatusCode, Uri,
};
use serde_json::Value;

pub type HyperHttpsClient = hyper::Client<hyper_rustls::HttpsConnector<HttpConnector>>;

pub fn mk_hyper_https_client() -> HyperHttpsClient {
    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .https_or_http()
        .enable_http1()
        .build();

    hyper::Client::builder().build(https)
}

/// A single call to the LIFX cloud API. `path` is relative to the configured
/// API root, e.g. `/lights/all/state`.
#[derive(Clone, Debug, PartialEq)]
pub struct LifxRequest {
    pub method: Method,
    pub path: String,
    pub token: String,
    pub body: Option<Value>,
}

impl LifxRequest {
    pub fn new(method: Method, path: impl Into<String>, token: &str) -> Self {
        LifxRequest {
            method,
            path: path.into(),
            token: token.to_string(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Clone, Debug)]
pub struct LifxResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

#[async_trait]
pub trait LifxTransport: Send + Sync {
    async fn send(&self, request: LifxRequest) -> Result<LifxResponse>;
}

pub struct HyperLifxTransport {
    client: HyperHttpsClient,
    api_url: String,
}

impl HyperLifxTransport {
    pub fn new(client: HyperHttpsClient, api_url: &str) -> Self {
        HyperLifxTransport {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LifxTransport for HyperLifxTransport {
    async fn send(&self, request: LifxRequest) -> Result<LifxResponse> {
        let uri: Uri = format!("{}{}", self.api_url, request.path).parse()?;

        let body = match &request.body {
            Some(body) => Body::from(serde_json::to_vec(body)?),
            None => Body::empty(),
        };

        let http_request = Request::builder()
            .method(request.method)
            .uri(uri)
            .header(AUTHORIZATION, format!("Bearer {}", request.token))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)?;

        let result = self.client.request(http_request).await?;
        let status = result.status();
        let body = hyper::body::to_bytes(result.into_body()).await?;

        Ok(LifxResponse { status, body })
    }
}
