use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use thiserror::Error;

use super::classify::needs_body;

/// Status and (possibly empty) body of one completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn no_content() -> Self {
        Self::new(204, Vec::new())
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("could not connect: {0}")]
    Connect(String),
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// Anything that can answer "what is playing right now".
pub trait NowPlayingSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: concat!("nowplaying/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// `GET`s the endpoint with a shared reqwest client.
pub struct HttpSource {
    client: Client,
    endpoint: Url,
}

impl HttpSource {
    pub fn new(endpoint: Url, options: &HttpOptions) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .timeout(options.timeout)
            .build()?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl NowPlayingSource for HttpSource {
    fn fetch(&self) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        let request = self.client.get(self.endpoint.clone());
        async move {
            let response = request.send().await?;
            let status = response.status().as_u16();
            // 204 and error pages are classified on status alone
            let body = if needs_body(status) {
                response.bytes().await?.to_vec()
            } else {
                Vec::new()
            };
            Ok::<_, TransportError>(RawResponse { status, body })
        }
    }
}
