//! Implementation of [did:key](https://w3c-ccg.github.io/did-method-key/) for Ed25519 keys.
//!
//! A `did:key` resolves locally: the document is expanded from the key encoded
//! in the DID itself, without any network request.

use ceramic_did_core::{
    BoxFuture, Method, ResolutionError,
    did::Did,
    did_url::DidUrl,
    document::{Document, VerificationMethod, VerificationMethodMap},
    resolution::ResolvedDid,
};
use multibase::Base;
use parser::DidKeyParser;
use tracing::debug;

mod keys;
mod parser;

pub use keys::*;
pub use parser::{ParseError, decode_known_multikey, decode_multikey};

const NAME: &str = "key";

pub struct MethodDidKey;

impl Method for MethodDidKey {
    fn method_name(&self) -> &'static str {
        NAME
    }

    fn resolve(&self, did: Did) -> BoxFuture<'static, Result<ResolvedDid, ResolutionError>> {
        debug_assert_eq!(did.method_name.0, self.method_name());

        let result = expand_did_key(&did).map(ResolvedDid::from);
        Box::pin(async move { result })
    }
}

/// Expands a `did:key` into its DID document.
pub fn expand_did_key(did: &Did) -> Result<Document, ResolutionError> {
    let parser = DidKeyParser::default();
    let key = parser.parse(did).map_err(|e| {
        debug!("Failed to parse {}: {}", did, e);
        ResolutionError::InvalidDid(e.to_string())
    })?;

    let did_url = DidUrl::with_fragment(did.clone(), did.method_id.0.clone());

    let signing = VerificationMethodMap {
        id: did_url.clone(),
        typ: key.codec().verification_type().to_string(),
        controller: did.clone(),
        public_key_jwk: None,
        public_key_multibase: None,
        public_key_base58: Some(Base::Base58Btc.encode(key.to_bytes())),
    };

    // https://w3c-ccg.github.io/did-method-key/#encryption-method-creation-algorithm
    let key_agreement = key.to_x25519().map(|x25519| {
        let fragment = multikey_x25519(&x25519);

        VerificationMethod::Map(Box::new(VerificationMethodMap {
            id: DidUrl::with_fragment(did.clone(), fragment),
            typ: KeyCodec::X25519.verification_type().to_string(),
            controller: did.clone(),
            public_key_jwk: None,
            public_key_multibase: None,
            public_key_base58: Some(Base::Base58Btc.encode(x25519)),
        }))
    });

    Ok(Document {
        verification_method: Some(vec![signing.clone()]),
        authentication: Some(vec![VerificationMethod::Map(Box::new(signing))]),
        assertion_method: Some(vec![VerificationMethod::Url(did_url.clone())]),
        capability_invocation: Some(vec![VerificationMethod::Url(did_url.clone())]),
        capability_delegation: Some(vec![VerificationMethod::Url(did_url)]),
        key_agreement: key_agreement.map(|method| vec![method]),
        ..Document::new(did.clone())
    })
}

fn multikey_x25519(key: &[u8; 32]) -> String {
    let mut inner = KeyCodec::X25519.code();
    inner.extend_from_slice(key);
    multibase::encode(Base::Base58Btc, inner)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use ceramic_did_core::document::VerificationRole;

    use super::*;

    const EXAMPLE_DID: &str = "did:key:z6MkpTHR8VNsBxYAAWHut2Geadd9jSwuBV8xRoAnwWsdvktH";

    #[test]
    fn test_expand() {
        let did = Did::from_str(EXAMPLE_DID).unwrap();
        let doc = expand_did_key(&did).unwrap();

        assert_eq!(doc.id, did);

        let methods = doc.verification_method.as_ref().unwrap();
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].typ, "Ed25519VerificationKey2018");
        assert_eq!(
            methods[0].public_key_base58.as_deref(),
            Some("B12NYF8RrR3h41TDCTJojY59usg3mbtbjnFs7Eud1Y6u")
        );
        assert_eq!(
            methods[0].id.to_string(),
            format!("{EXAMPLE_DID}#z6MkpTHR8VNsBxYAAWHut2Geadd9jSwuBV8xRoAnwWsdvktH")
        );

        let agreement = doc.key_agreement.as_ref().unwrap();
        assert_eq!(agreement.len(), 1);
        let VerificationMethod::Map(agreement) = &agreement[0] else {
            panic!("key agreement should be embedded");
        };
        assert_eq!(agreement.typ, "X25519KeyAgreementKey2019");
        assert_eq!(
            agreement.id.fragment.as_deref(),
            Some("z6LSbysY2xFMRpGMhb7tFTLMpeuPRaqaWM1yECx2AtzE3KCc")
        );
        assert_eq!(
            agreement.public_key_base58.as_deref(),
            Some("JhNWeSVLMYccCk7iopQW4guaSJTojqpMEELgSLhKwRr")
        );
    }

    #[test]
    fn test_relationships_reference_signing_key() {
        let did = Did::from_str(EXAMPLE_DID).unwrap();
        let doc = expand_did_key(&did).unwrap();
        let url = DidUrl::with_fragment(did.clone(), did.method_id.0.clone());

        for role in [
            VerificationRole::Authentication,
            VerificationRole::Assertion,
            VerificationRole::CapabilityInvocation,
            VerificationRole::CapabilityDelegation,
        ] {
            let method = doc
                .resolve_verification_method(&url, role)
                .unwrap_or_else(|| panic!("missing {role:?}"));
            assert_eq!(method.typ, "Ed25519VerificationKey2018");
        }
    }

    #[test]
    fn test_unsupported_codec() {
        // did:key for a P-256 key.
        let did = Did::from_str("did:key:zDnaerDaTF5BXEavCrfRZEk316dpbLsfPDZ3WJ5hRTPFU2169").unwrap();
        let err = expand_did_key(&did).unwrap_err();
        assert!(matches!(err, ResolutionError::InvalidDid(msg) if msg.contains("codec")));
    }

    #[tokio::test]
    async fn test_resolve_deterministic() {
        let did = Did::from_str(EXAMPLE_DID).unwrap();

        let first = MethodDidKey.resolve(did.clone()).await.unwrap();
        let second = MethodDidKey.resolve(did).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        assert!(first.document_metadata.is_empty());
        assert_eq!(first.resolution_metadata, Default::default());
    }
}
