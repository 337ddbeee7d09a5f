//! HTTP transport for the two question endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::protocol::{
    ContinueTalkRequest, ContinueTalkResponse, QueryRequest, QueryResponse, CONTINUE_TALK_ROUTE,
    QUERY_ROUTE,
};
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("request to {url} failed: {source}")]
    Request { url: Url, source: reqwest::Error },
    #[error("response from {url} (status {status}) is not a JSON envelope: {source}")]
    Decode {
        url: Url,
        status: u16,
        source: serde_json::Error,
    },
    #[error("{0}")]
    Unavailable(String),
}

/// The backend as seen by the page: one call per endpoint.
///
/// Application failures (`status != "success"`) are returned as `Ok`; only
/// transport and decode failures are errors.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, TransportError>;
    async fn continue_talk(
        &self,
        request: &ContinueTalkRequest,
    ) -> Result<ContinueTalkResponse, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpConversationApi {
    http: Client,
    base: Url,
}

impl HttpConversationApi {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, TransportError> {
        let mut base = Url::parse(server_url.trim()).map_err(|source| TransportError::InvalidUrl {
            url: server_url.to_string(),
            source,
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn endpoint(&self, route: &str) -> Result<Url, TransportError> {
        self.base
            .join(route.trim_start_matches('/'))
            .map_err(|source| TransportError::InvalidUrl {
                url: format!("{}{}", self.base, route),
                source,
            })
    }

    async fn post_json<Req, Resp>(&self, route: &str, body: &Req) -> Result<Resp, TransportError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(route)?;
        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;

        // Error statuses still carry the JSON envelope; only the body decides.
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;
        debug!(%url, status, bytes = bytes.len(), "received api response");

        serde_json::from_slice(&bytes).map_err(|source| TransportError::Decode {
            url,
            status,
            source,
        })
    }
}

#[async_trait]
impl ConversationApi for HttpConversationApi {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, TransportError> {
        self.post_json(QUERY_ROUTE, request).await
    }

    async fn continue_talk(
        &self,
        request: &ContinueTalkRequest,
    ) -> Result<ContinueTalkResponse, TransportError> {
        self.post_json(CONTINUE_TALK_ROUTE, request).await
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
