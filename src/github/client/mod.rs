use async_trait::async_trait;
use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client as ReqwestClient, Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

mod error;
mod repository;

pub use error::{Error, Result};
pub use repository::{ClientIdentity, RepositoryClient};

// Constants
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const MEDIA_TYPE_V3: &str = "application/vnd.github.v3+json";

/// Build the `Authorization`/`Accept` pair sent with every request.
pub fn github_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("token {}", token))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_TYPE_V3));
    Ok(headers)
}

/// A single request to the Github API. Built fresh for every call and handed to a [`Transport`]
/// by value.
#[derive(Clone, Debug)]
pub struct Request {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// What came back from Github for a successful request.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub data: Value,
}

impl Response {
    /// Deserialize the payload into a concrete type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.data)?)
    }

    pub fn into_data(self) -> Value {
        self.data
    }
}

/// Sends a [`Request`] and hands back the decoded [`Response`].
///
/// Implementations must fail with [`Error::Status`] for any non-success status so the payload
/// Github sent along stays inspectable.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn call(&self, request: Request) -> Result<Response> {
        (**self).call(request).await
    }
}

#[derive(Debug)]
pub struct TransportBuilder {
    user_agent: Option<String>,
}

impl TransportBuilder {
    pub fn new() -> Self {
        Self { user_agent: None }
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<ReqwestTransport> {
        let user_agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_owned());
        let client = ReqwestClient::builder().user_agent(&user_agent).build()?;

        Ok(ReqwestTransport { client })
    }
}

impl Default for TransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug)]
pub struct ReqwestTransport {
    /// Client used to make http requests
    client: ReqwestClient,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        TransportBuilder::new().build()
    }

    pub fn builder() -> TransportBuilder {
        TransportBuilder::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn call(&self, request: Request) -> Result<Response> {
        debug!("Github Request: {} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        debug!("Github Response: {:#?}", response);

        let status = response.status();
        let headers = response.headers().clone();
        let data = decode_payload(&response.text().await?);

        if !status.is_success() {
            return Err(Error::Status { status, data });
        }

        Ok(Response {
            status,
            headers,
            data,
        })
    }
}

// Github answers most calls with JSON, but error pages from proxies and the like may not be.
fn decode_payload(payload: &str) -> Value {
    if payload.trim().is_empty() {
        return Value::Null;
    }

    serde_json::from_str(payload).unwrap_or_else(|_| Value::String(payload.to_owned()))
}
