//! HTTP client for the [Ceramic](https://developers.ceramic.network/) node API.
//!
//! ## Example
//!
//! ```no_run
//! use ceramic_client::{CLAY_TESTNET, CeramicClient, V0_PATH};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = CeramicClient::from_host(CLAY_TESTNET, V0_PATH).unwrap();
//!
//!     let status = client.health_check().await.unwrap();
//!     assert_eq!(status, "Alive!");
//! }
//! ```

use std::{collections::HashMap, time::Duration};

use reqwest::{Client, ClientBuilder, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use api::{
    ApplyCommitRequest, CommitsResponse, CreateStreamRequest, ErrorResponse, PinResponse,
    PinnedStreams, QueryStreamRequest, QueryStreamsRequest, SupportedChains,
};
use opts::LoadOpts;
use streams::{StreamId, StreamState, StreamStateHolder};

pub mod api;
pub mod opts;
pub mod streams;

pub use reqwest;

pub const CLAY_TESTNET: &str = "https://ceramic-clay.3boxlabs.com";
pub const V0_PATH: &str = "api/v0";

/// Request timeout used unless a preconfigured [Client] is provided.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const STREAMS_PATH: &str = "streams";
const MULTIQUERIES_PATH: &str = "multiqueries";
const COMMITS_PATH: &str = "commits";
const PINS_PATH: &str = "pins";
const NODE_PATH: &str = "node";
const CHAINS_PATH: &str = "chains";
const HEALTHCHECK_PATH: &str = "healthcheck";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid base URL: {0}")]
    Url(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("node responded with {status}: {body}")]
    Api {
        status: u16,
        /// `error` field of the response body, when the node sent one.
        error: Option<String>,
        body: String,
    },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("stream {0} not found in query response")]
    StreamNotFound(StreamId),
}

/// Client for a single Ceramic node, rooted at its API base URL
/// (e.g. `https://ceramic-clay.3boxlabs.com/api/v0`).
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct CeramicClient {
    client: Client,
    base_url: Url,
}

impl CeramicClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = ClientBuilder::new().timeout(DEFAULT_TIMEOUT).build()?;
        Self::with_client(base_url, client)
    }

    /// Joins a node host and API base path, such as [CLAY_TESTNET] and [V0_PATH].
    pub fn from_host(host: &str, base_path: &str) -> Result<Self, ClientError> {
        let base_url = format!(
            "{}/{}",
            host.trim_end_matches('/'),
            base_path.trim_start_matches('/')
        );
        Self::new(&base_url)
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::Url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Url(format!("{base_url} cannot be a base")));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get_stream_state(&self, stream_id: &str) -> Result<StreamStateHolder, ClientError> {
        let req = self.request(Method::GET, &[STREAMS_PATH, stream_id]);
        send_json(req).await
    }

    pub async fn get_stream_state_with(
        &self,
        stream_id: &str,
        opts: &LoadOpts,
    ) -> Result<StreamStateHolder, ClientError> {
        let req = self
            .request(Method::GET, &[STREAMS_PATH, stream_id])
            .query(opts);
        send_json(req).await
    }

    pub async fn create_stream(
        &self,
        req: &CreateStreamRequest,
    ) -> Result<StreamStateHolder, ClientError> {
        let req = self.request(Method::POST, &[STREAMS_PATH]).json(req);
        send_json(req).await
    }

    pub async fn query_streams(
        &self,
        req: &QueryStreamsRequest,
    ) -> Result<HashMap<StreamId, StreamState>, ClientError> {
        let req = self.request(Method::POST, &[MULTIQUERIES_PATH]).json(req);
        send_json(req).await
    }

    /// Queries a single stream, returning only its own state.
    pub async fn query_stream(&self, req: QueryStreamRequest) -> Result<StreamState, ClientError> {
        let stream_id = req.stream_id.clone();

        let mut states = self
            .query_streams(&QueryStreamsRequest { queries: vec![req] })
            .await?;

        states
            .remove(&stream_id)
            .ok_or(ClientError::StreamNotFound(stream_id))
    }

    pub async fn get_commits(&self, stream_id: &str) -> Result<CommitsResponse, ClientError> {
        let req = self.request(Method::GET, &[COMMITS_PATH, stream_id]);
        send_json(req).await
    }

    pub async fn apply_commit(
        &self,
        req: &ApplyCommitRequest,
    ) -> Result<StreamStateHolder, ClientError> {
        let req = self.request(Method::POST, &[COMMITS_PATH]).json(req);
        send_json(req).await
    }

    pub async fn add_to_pinset(&self, stream_id: &str) -> Result<PinResponse, ClientError> {
        let req = self.request(Method::POST, &[PINS_PATH, stream_id]);
        send_json(req).await
    }

    pub async fn remove_from_pinset(&self, stream_id: &str) -> Result<PinResponse, ClientError> {
        let req = self.request(Method::DELETE, &[PINS_PATH, stream_id]);
        send_json(req).await
    }

    pub async fn list_streams_in_pinset(&self) -> Result<PinnedStreams, ClientError> {
        let req = self.request(Method::GET, &[PINS_PATH]);
        send_json(req).await
    }

    /// The returned list contains the stream if, and only if, it is pinned.
    pub async fn confirm_stream_in_pinset(
        &self,
        stream_id: &str,
    ) -> Result<PinnedStreams, ClientError> {
        let req = self.request(Method::GET, &[PINS_PATH, stream_id]);
        send_json(req).await
    }

    pub async fn get_supported_blockchains(&self) -> Result<SupportedChains, ClientError> {
        let req = self.request(Method::GET, &[NODE_PATH, CHAINS_PATH]);
        send_json(req).await
    }

    /// Returns the node's health status text.
    pub async fn health_check(&self) -> Result<String, ClientError> {
        let req = self.request(Method::GET, &[NODE_PATH, HEALTHCHECK_PATH]);
        send(req).await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();

        // Checked in the constructor.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }
}

async fn send(req: RequestBuilder) -> Result<String, ClientError> {
    let res = req.send().await?;
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        let error = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .map(|e| e.error);

        debug!("Node responded with {}: {}", status, body);

        return Err(ClientError::Api {
            status: status.as_u16(),
            error,
            body,
        });
    }

    Ok(body)
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, ClientError> {
    let body = send(req).await?;
    Ok(serde_json::from_str(&body)?)
}
