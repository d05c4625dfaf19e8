//! Request and response bodies of the Ceramic HTTP API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::{
    opts::{CreateOpts, UpdateOpts},
    streams::{StreamId, StreamType},
};

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateStreamRequest {
    #[serde(rename = "type")]
    pub typ: StreamType,
    /// Genesis commit, `{ header, data }` for a tile.
    pub genesis: Value,
    pub opts: Option<CreateOpts>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QueryStreamsRequest {
    pub queries: Vec<QueryStreamRequest>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryStreamRequest {
    pub stream_id: StreamId,
    /// Paths within the stream content to follow, loading the linked streams too.
    #[serde(default)]
    pub paths: Vec<String>,
    pub at_time: Option<u64>,
}

impl QueryStreamRequest {
    pub fn new(stream_id: impl Into<StreamId>) -> Self {
        Self {
            stream_id: stream_id.into(),
            paths: Vec::new(),
            at_time: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommitsResponse {
    pub stream_id: StreamId,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Commit {
    pub cid: String,
    #[serde(default)]
    pub value: Value,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplyCommitRequest {
    pub stream_id: StreamId,
    pub commit: Value,
    pub opts: Option<UpdateOpts>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PinResponse {
    pub stream_id: StreamId,
    pub is_pinned: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PinnedStreams {
    #[serde(default)]
    pub pinned_stream_ids: Vec<StreamId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SupportedChains {
    #[serde(default)]
    pub supported_chains: Vec<String>,
}

/// Error body sent by the node alongside a non-success status.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
