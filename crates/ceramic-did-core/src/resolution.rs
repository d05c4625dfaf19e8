//! [DID resolution](https://www.w3.org/TR/did-core/#did-resolution) output.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::document::Document;

pub const DID_JSON_CONTENT_TYPE: &str = "application/did+json";

/// Result of a successful resolution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDid {
    #[serde(rename = "didResolutionMetadata", default)]
    pub resolution_metadata: ResolutionMetadata,
    #[serde(rename = "didDocument")]
    pub document: Document,
    #[serde(rename = "didDocumentMetadata", default)]
    pub document_metadata: DocumentMetadata,
}

impl From<Document> for ResolvedDid {
    fn from(document: Document) -> Self {
        Self {
            resolution_metadata: ResolutionMetadata::default(),
            document,
            document_metadata: DocumentMetadata::default(),
        }
    }
}

/// Information about the resolution process itself.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionMetadata {
    pub content_type: Option<String>,
    pub error: Option<String>,
}

/// Information about the resolved document, such as its version.
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// RFC 3339 timestamp.
    pub created: Option<String>,
    /// RFC 3339 timestamp.
    pub updated: Option<String>,
    pub deactivated: Option<bool>,
    pub version_id: Option<String>,
    pub next_update: Option<String>,
    pub next_version_id: Option<String>,
    pub equivalent_id: Option<Vec<String>>,
    pub canonical_id: Option<String>,
}

impl DocumentMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
