use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// How the node should sync a stream with the network before answering.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum SyncOptions {
    #[default]
    PreferCache = 0,
    SyncAlways = 1,
    NeverSync = 2,
}

impl TryFrom<u8> for SyncOptions {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::PreferCache),
            1 => Ok(Self::SyncAlways),
            2 => Ok(Self::NeverSync),
            other => Err(format!("unknown sync option {other}")),
        }
    }
}

impl From<SyncOptions> for u8 {
    fn from(value: SyncOptions) -> Self {
        value as u8
    }
}

/// Options for stream creation.
///
/// The default publishes and anchors the genesis commit.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOpts {
    pub publish: Option<bool>,
    pub anchor: Option<bool>,
    pub pin: Option<bool>,
    pub sync: Option<SyncOptions>,
    pub sync_timeout_seconds: Option<u64>,
    #[serde(rename = "asDID")]
    pub as_did: Option<String>,
}

impl Default for CreateOpts {
    fn default() -> Self {
        Self {
            publish: Some(true),
            anchor: Some(true),
            pin: None,
            sync: Some(SyncOptions::PreferCache),
            sync_timeout_seconds: None,
            as_did: None,
        }
    }
}

/// Options for applying a commit.
///
/// The default publishes and anchors the commit, and fails on invalid commits.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOpts {
    pub publish: Option<bool>,
    pub anchor: Option<bool>,
    pub pin: Option<bool>,
    pub throw_on_invalid_commit: Option<bool>,
    #[serde(rename = "asDID")]
    pub as_did: Option<String>,
}

impl Default for UpdateOpts {
    fn default() -> Self {
        Self {
            publish: Some(true),
            anchor: Some(true),
            pin: None,
            throw_on_invalid_commit: Some(true),
            as_did: None,
        }
    }
}

/// Options for loading a stream, sent as query parameters.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoadOpts {
    pub sync: Option<SyncOptions>,
    pub sync_timeout_seconds: Option<u64>,
    pub pin: Option<bool>,
    /// Unix timestamp in seconds; loads the stream as it was at that time.
    pub at_time: Option<u64>,
}

impl Default for LoadOpts {
    fn default() -> Self {
        Self {
            sync: Some(SyncOptions::PreferCache),
            sync_timeout_seconds: None,
            pin: None,
            at_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_defaults() {
        assert_eq!(
            serde_json::to_value(CreateOpts::default()).unwrap(),
            json!({ "publish": true, "anchor": true, "sync": 0 })
        );
    }

    #[test]
    fn test_update_as_did() {
        let opts = UpdateOpts {
            as_did: Some("did:3:kjz".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(opts).unwrap(),
            json!({
                "publish": true,
                "anchor": true,
                "throwOnInvalidCommit": true,
                "asDID": "did:3:kjz"
            })
        );
    }
}
