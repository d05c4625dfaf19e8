use std::str::FromStr;

use ceramic_did_core::{
    did::Did,
    did_url::{DidUrl, RelativeDidUrl},
    document::{
        Document, ServiceEndpoint, VerificationMethod, VerificationMethodMap, VerificationRole,
    },
};
use serde_json::{Value, json};

const THREE_ID: &str = "did:3:kjzl6cwe1jw147dvq16zluojmraqvwdmbh61dx9e0c59i344lcrsgqfohexp60s";

fn example_document() -> Document {
    let did = Did::from_str(THREE_ID).unwrap();
    let signing = DidUrl::with_fragment(did.clone(), "signing");

    Document {
        controller: Some(vec![
            Did::from_str("did:key:z6MktvqCyLxTsXUH1tUZncNdVeEZ7hNh7npPRbUU27GTrYb8").unwrap(),
        ]),
        verification_method: Some(vec![VerificationMethodMap {
            id: signing.clone(),
            controller: did.clone(),
            typ: "EcdsaSecp256k1Signature2019".to_string(),
            public_key_jwk: None,
            public_key_multibase: None,
            public_key_base58: Some("rjiRPLUGzPT4KrZNPeVLZ2Ey8cKBqwRKpWZGJCZGGWDw".to_string()),
        }]),
        authentication: Some(vec![VerificationMethod::RelativeUrl(
            RelativeDidUrl::fragment("signing"),
        )]),
        assertion_method: Some(vec![VerificationMethod::Url(signing)]),
        service: Some(vec![ServiceEndpoint {
            id: "#ceramic".to_string(),
            typ: vec!["CeramicNode".to_string()],
            service_endpoint: json!("https://ceramic-clay.3boxlabs.com"),
        }]),
        ..Document::new(did)
    }
}

#[test]
fn test_document_serde() {
    let doc = example_document();
    let doc_val = serde_json::to_value(&doc).unwrap();

    const EXPECTED_RAW: &[u8] = include_bytes!("./document-expected.json");
    let expected_val: Value = serde_json::from_slice(EXPECTED_RAW).unwrap();
    assert_eq!(doc_val, expected_val);

    let expected_doc: Document = serde_json::from_slice(EXPECTED_RAW).unwrap();
    assert_eq!(doc, expected_doc);
}

#[test]
fn test_resolve_verification_method() {
    let doc = example_document();
    let url = DidUrl::from_str(&format!("{THREE_ID}#signing")).unwrap();

    let by_relative = doc
        .resolve_verification_method(&url, VerificationRole::Authentication)
        .expect("authentication method");
    assert_eq!(by_relative.typ, "EcdsaSecp256k1Signature2019");

    let by_url = doc
        .resolve_verification_method(&url, VerificationRole::Assertion)
        .expect("assertion method");
    assert_eq!(by_url, by_relative);

    assert!(
        doc.resolve_verification_method(&url, VerificationRole::KeyAgreement)
            .is_none()
    );

    let other = DidUrl::from_str(&format!("{THREE_ID}#encryption")).unwrap();
    assert!(
        doc.resolve_verification_method(&other, VerificationRole::Authentication)
            .is_none()
    );
}

#[test]
fn test_document_with_jwk() {
    let raw = json!({
        "id": "did:example:123",
        "controller": ["did:example:a", "did:example:b"],
        "verificationMethod": [{
            "id": "did:example:123#key-0",
            "controller": "did:example:123",
            "type": "JsonWebKey2020",
            "publicKeyJwk": {
                "kty": "EC",
                "crv": "P-256",
                "x": "MKBCTNIcKUSDii11ySs3526iDZ8AiTo7Tu6KPAqv7D4",
                "y": "4Etl6SRW2YiLUrN5vfvVHuhp7x8PxltmWWlbbM4IFyM"
            }
        }],
        "authentication": ["did:example:123#key-0"]
    });

    let doc: Document = serde_json::from_value(raw).unwrap();
    assert_eq!(doc.controller.as_ref().map(Vec::len), Some(2));

    let method = &doc.verification_method.as_ref().unwrap()[0];
    assert!(method.public_key_jwk.is_some());

    let again: Document = serde_json::from_value(serde_json::to_value(&doc).unwrap()).unwrap();
    assert_eq!(again, doc);
}

#[test]
fn test_document_invalid_id() {
    let raw = json!({ "id": "not-a-did" });
    assert!(serde_json::from_value::<Document>(raw).is_err());
}
