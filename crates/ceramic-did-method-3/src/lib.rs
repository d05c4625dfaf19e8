//! Implementation of [did:3](https://github.com/ceramicnetwork/CIP/blob/main/CIPs/CIP-79/CIP-79.md),
//! resolving 3IDs from the Ceramic stream they are stored in.

use ceramic_client::{CeramicClient, ClientError, streams::StreamState};
use ceramic_did_core::{
    BoxFuture, Method, ResolutionError,
    did::Did,
    did_url::DidUrl,
    document::{Document, VerificationMethod, VerificationMethodMap},
    resolution::{DID_JSON_CONTENT_TYPE, DocumentMetadata, ResolutionMetadata, ResolvedDid},
};
use ceramic_did_method_key::{KeyCodec, decode_known_multikey};
use multibase::Base;
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, warn};

pub use ceramic_client;

const NAME: &str = "3";

/// Resolves `did:3:<stream id>` against a single Ceramic node.
#[derive(Clone, Debug)]
pub struct MethodDid3 {
    client: CeramicClient,
}

impl MethodDid3 {
    /// Creates a resolver for the node API at `base_url`,
    /// e.g. `https://ceramic-clay.3boxlabs.com/api/v0`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = CeramicClient::new(base_url)?;
        Ok(Self { client })
    }

    pub fn with_client(client: CeramicClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CeramicClient {
        &self.client
    }
}

impl Method for MethodDid3 {
    fn method_name(&self) -> &'static str {
        NAME
    }

    fn resolve(&self, did: Did) -> BoxFuture<'static, Result<ResolvedDid, ResolutionError>> {
        debug_assert_eq!(did.method_name.0, self.method_name());

        let client = self.client.clone();

        Box::pin(async move {
            let holder = client
                .get_stream_state(&did.method_id.0)
                .await
                .map_err(|e| {
                    debug!("Failed to load stream for {}: {}", did, e);
                    resolution_error(e)
                })?;

            Ok(resolve_from_state(&did, &holder.state))
        })
    }
}

/// The node rejects unknown or malformed stream ids with a 4xx, or with a
/// 500 whose error text names the id as invalid.
fn resolution_error(err: ClientError) -> ResolutionError {
    match err {
        ClientError::Api {
            status,
            error: Some(error),
            ..
        } if (400..500).contains(&status)
            || (status == 500 && error.to_lowercase().contains("invalid")) =>
        {
            ResolutionError::NotFound(error)
        }
        other => ResolutionError::ResolutionFailed(other.to_string()),
    }
}

/// Builds the resolution result for a 3ID from its stream state.
pub fn resolve_from_state(did: &Did, state: &StreamState) -> ResolvedDid {
    ResolvedDid {
        resolution_metadata: ResolutionMetadata {
            content_type: Some(DID_JSON_CONTENT_TYPE.to_string()),
            error: None,
        },
        document: document_from_content(did, &state.content),
        document_metadata: document_metadata(state),
    }
}

/// Builds a document from 3ID stream content, reading its
/// `publicKeys` map of key names to multibase keys.
///
/// Keys that fail to decode are skipped.
pub fn document_from_content(did: &Did, content: &Value) -> Document {
    let mut verification_method = Vec::new();
    let mut authentication = Vec::new();
    let mut key_agreement = Vec::new();

    let mut keys = content
        .get("publicKeys")
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
    keys.sort_by(|a, b| a.0.cmp(b.0));

    for (name, value) in keys {
        let Some(multikey) = value.as_str() else {
            warn!("Skipping 3ID key {}: not a string", name);
            continue;
        };

        let (codec, key) = match decode_known_multikey(multikey) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Skipping 3ID key {}: {}", name, e);
                continue;
            }
        };

        let id = DidUrl::with_fragment(did.clone(), name.clone());

        verification_method.push(VerificationMethodMap {
            id: id.clone(),
            controller: did.clone(),
            typ: codec.verification_type().to_string(),
            public_key_jwk: None,
            public_key_multibase: None,
            public_key_base58: Some(Base::Base58Btc.encode(key)),
        });

        match codec {
            KeyCodec::Ed25519 | KeyCodec::Secp256k1 => {
                authentication.push(VerificationMethod::Url(id))
            }
            KeyCodec::X25519 => key_agreement.push(VerificationMethod::Url(id)),
        }
    }

    Document {
        verification_method: Some(verification_method),
        authentication: non_empty(authentication),
        key_agreement: non_empty(key_agreement),
        ..Document::new(did.clone())
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

fn document_metadata(state: &StreamState) -> DocumentMetadata {
    let mut timestamps = state.anchor_timestamps();
    let created = timestamps.next();
    let updated = timestamps.last().or(created);

    DocumentMetadata {
        created: created.and_then(rfc3339),
        updated: updated.and_then(rfc3339),
        version_id: state.tip().map(str::to_string),
        ..Default::default()
    }
}

fn rfc3339(timestamp: i64) -> Option<String> {
    OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .and_then(|time| time.format(&Rfc3339).ok())
}
