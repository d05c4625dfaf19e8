use std::str::FromStr;

use ceramic_did_core::{
    Method, ResolutionError, did::Did, did_url::DidUrl, document::VerificationRole,
};
use ceramic_did_method_3::MethodDid3;
use ceramic_test_utils::spawn_node;
use serde_json::json;
use tracing_test::traced_test;

const STREAM_ID: &str = "kjzl6cwe1jw147dvq16zluojmraqvwdmbh61dx9e0c59i344lcrsgqfohexp60s";

#[tokio::test]
#[traced_test]
async fn test_resolve() {
    let node = spawn_node().await;
    node.insert_stream(
        STREAM_ID,
        json!({
            "type": 0,
            "content": {
                "publicKeys": {
                    "signing": "zQ3shokFTS3brHcDQrn82RUDfCZESWL1ZdCEJwekUDPQiYBme",
                    "encryption": "z6LSnkZe3JZPCo88XsdQVJi8j1TomzX2yRW7ZnvvWhmrSdmG"
                }
            },
            "anchorStatus": "ANCHORED",
            "log": [
                { "cid": "bafygenesis", "type": 0 },
                { "cid": "bafyanchor", "type": 2, "timestamp": 1611680505 }
            ]
        }),
    );

    let method = MethodDid3::new(&node.base_url).unwrap();
    let did = Did::from_str(&format!("did:3:{}", STREAM_ID)).unwrap();

    let resolved = method.resolve(did.clone()).await.unwrap();
    let doc = &resolved.document;
    assert_eq!(doc.id, did);

    let signing: DidUrl = format!("{}#signing", did).parse().unwrap();
    let method_map = doc
        .resolve_verification_method(&signing, VerificationRole::Authentication)
        .unwrap();
    assert_eq!(method_map.typ, "EcdsaSecp256k1Signature2019");

    let encryption: DidUrl = format!("{}#encryption", did).parse().unwrap();
    assert!(
        doc.resolve_verification_method(&encryption, VerificationRole::KeyAgreement)
            .is_some()
    );
    assert!(
        doc.resolve_verification_method(&encryption, VerificationRole::Authentication)
            .is_none()
    );

    assert_eq!(
        resolved.document_metadata.version_id.as_deref(),
        Some("bafyanchor")
    );
    assert_eq!(
        resolved.document_metadata.created.as_deref(),
        Some("2021-01-26T17:01:45Z")
    );
}

#[tokio::test]
#[traced_test]
async fn test_resolve_invalid_stream_id() {
    let node = spawn_node().await;
    let method = MethodDid3::new(&node.base_url).unwrap();

    let did = Did::from_str("did:3:bad").unwrap();
    match method.resolve(did).await {
        Err(ResolutionError::NotFound(msg)) => assert!(msg.contains("invalid identifier")),
        res => panic!("unexpected result: {:?}", res),
    }
}

#[tokio::test]
#[traced_test]
async fn test_resolve_missing_stream() {
    let node = spawn_node().await;
    let method = MethodDid3::new(&node.base_url).unwrap();

    let did = Did::from_str(&format!("did:3:{}", STREAM_ID)).unwrap();
    assert!(matches!(
        method.resolve(did).await,
        Err(ResolutionError::NotFound(_))
    ));
}

#[tokio::test]
#[traced_test]
async fn test_resolve_unreachable_node() {
    let port = port_check::free_local_port().unwrap();
    let method = MethodDid3::new(&format!("http://127.0.0.1:{}/api/v0", port)).unwrap();

    let did = Did::from_str(&format!("did:3:{}", STREAM_ID)).unwrap();
    assert!(matches!(
        method.resolve(did).await,
        Err(ResolutionError::ResolutionFailed(_))
    ));
}
