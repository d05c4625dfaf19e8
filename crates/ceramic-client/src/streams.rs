//! Stream state as reported by a Ceramic node.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

pub type StreamId = String;

/// Numeric stream type from the
/// [CIP-59 table](https://github.com/ceramicnetwork/CIP/blob/main/CIPs/CIP-59/tables/streamtypes.csv).
/// Unknown codes are kept as-is.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StreamType(pub u64);

impl StreamType {
    pub const TILE: Self = Self(0);
    pub const CAIP10_LINK: Self = Self(1);
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnchorStatus {
    #[default]
    NotRequested,
    Pending,
    Processing,
    Anchored,
    Failed,
    #[serde(other)]
    Unknown,
}

macro_rules! numeric_enum {
    (
        $name:ident {
            $($(#[$attr:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        #[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($(#[$attr])* $variant = $value),+
        }

        impl TryFrom<u8> for $name {
            type Error = String;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(format!("unknown {} {}", stringify!($name), other)),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value as u8
            }
        }
    };
}

numeric_enum!(SignatureStatus {
    #[default]
    Genesis = 0,
    Partial = 1,
    Signed = 2,
});

numeric_enum!(CommitType {
    #[default]
    Genesis = 0,
    Signed = 1,
    Anchor = 2,
});

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamMetadata {
    #[serde(default)]
    pub controllers: Vec<String>,
    pub family: Option<String>,
    pub schema: Option<String>,
    pub tags: Option<Vec<String>>,
    pub forbid_controller_change: Option<bool>,
    pub index: Option<Value>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub cid: String,
    #[serde(rename = "type")]
    pub typ: CommitType,
    /// Unix timestamp in seconds, set once the commit is anchored.
    pub timestamp: Option<i64>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnchorProof {
    pub chain_id: Option<String>,
    pub block_number: Option<u64>,
    pub block_timestamp: Option<i64>,
    pub tx_hash: Option<String>,
    pub root: Option<String>,
}

/// Pending changes not yet anchored.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamNext {
    pub content: Option<Value>,
    pub controllers: Option<Vec<String>>,
    pub metadata: Option<StreamMetadata>,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamState {
    #[serde(rename = "type")]
    pub typ: StreamType,
    #[serde(default)]
    pub content: Value,
    pub next: Option<StreamNext>,
    #[serde(default)]
    pub metadata: StreamMetadata,
    #[serde(default)]
    pub signature: SignatureStatus,
    #[serde(default)]
    pub anchor_status: AnchorStatus,
    pub anchor_scheduled_for: Option<Value>,
    pub anchor_proof: Option<AnchorProof>,
    #[serde(default)]
    pub log: Vec<LogEntry>,
    pub doctype: Option<String>,
}

impl StreamState {
    /// CID of the most recent commit.
    pub fn tip(&self) -> Option<&str> {
        self.log.last().map(|entry| entry.cid.as_str())
    }

    /// Timestamps of anchored commits, oldest first.
    pub fn anchor_timestamps(&self) -> impl Iterator<Item = i64> + '_ {
        self.log.iter().filter_map(|entry| entry.timestamp)
    }
}

/// `{ streamId, state }`, returned by stream creation, loading and commits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamStateHolder {
    pub stream_id: StreamId,
    pub state: StreamState,
}
