use jose_jwk::Jwk;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{OneOrMany, serde_as, skip_serializing_none};

use crate::{
    did::Did,
    did_url::{DidUrl, RelativeDidUrl},
};

/// [DID document](https://www.w3.org/TR/did-core/#core-properties).
#[serde_as]
#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Did,
    pub also_known_as: Option<Vec<String>>,
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub controller: Option<Vec<Did>>,
    pub verification_method: Option<Vec<VerificationMethodMap>>,
    pub authentication: Option<Vec<VerificationMethod>>,
    pub assertion_method: Option<Vec<VerificationMethod>>,
    pub key_agreement: Option<Vec<VerificationMethod>>,
    pub capability_invocation: Option<Vec<VerificationMethod>>,
    pub capability_delegation: Option<Vec<VerificationMethod>>,
    pub service: Option<Vec<ServiceEndpoint>>,
}

impl Document {
    /// Creates an empty document for the given DID.
    pub fn new(id: Did) -> Self {
        Self {
            id,
            also_known_as: None,
            controller: None,
            verification_method: None,
            authentication: None,
            assertion_method: None,
            key_agreement: None,
            capability_invocation: None,
            capability_delegation: None,
            service: None,
        }
    }

    pub fn relationship(&self, role: VerificationRole) -> &[VerificationMethod] {
        match role {
            VerificationRole::Assertion => self.assertion_method.as_deref(),
            VerificationRole::Authentication => self.authentication.as_deref(),
            VerificationRole::CapabilityDelegation => self.capability_delegation.as_deref(),
            VerificationRole::CapabilityInvocation => self.capability_invocation.as_deref(),
            VerificationRole::KeyAgreement => self.key_agreement.as_deref(),
        }
        .unwrap_or_default()
    }

    /// Returns the verification method that the provided [DidUrl] is
    /// referencing, restricted to a given [VerificationRole].
    pub fn resolve_verification_method(
        &self,
        url: &DidUrl,
        role: VerificationRole,
    ) -> Option<VerificationMethodMap> {
        let target = url.to_relative();

        for method in self.relationship(role) {
            let found = match method {
                VerificationMethod::Map(map) => {
                    if map.id == *url {
                        return Some(*map.clone());
                    }
                    None
                }
                VerificationMethod::RelativeUrl(relative_url) => {
                    if target.as_ref() == Some(relative_url) && url.did == self.id {
                        self.resolve_relative_url(relative_url)
                    } else {
                        None
                    }
                }
                VerificationMethod::Url(method_url) => {
                    if method_url == url {
                        method_url
                            .to_relative()
                            .and_then(|relative| self.resolve_relative_url(&relative))
                    } else {
                        None
                    }
                }
            };

            if found.is_some() {
                return found;
            }
        }

        None
    }

    fn resolve_relative_url(&self, url: &RelativeDidUrl) -> Option<VerificationMethodMap> {
        self.verification_method
            .as_deref()
            .unwrap_or_default()
            .iter()
            .find(|method| method.id.to_relative().as_ref() == Some(url))
            .cloned()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VerificationRole {
    Assertion,
    Authentication,
    CapabilityDelegation,
    CapabilityInvocation,
    KeyAgreement,
}

/// An entry of a verification relationship: either an embedded method or a
/// reference to one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum VerificationMethod {
    Map(Box<VerificationMethodMap>),
    Url(DidUrl),
    RelativeUrl(RelativeDidUrl),
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethodMap {
    pub id: DidUrl,
    pub controller: Did,
    #[serde(rename = "type")]
    pub typ: String,
    pub public_key_jwk: Option<Jwk>,
    /// Multibase encoded public key.
    pub public_key_multibase: Option<String>,
    /// Base58 (bitcoin alphabet) encoded public key, without a multibase prefix.
    pub public_key_base58: Option<String>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEndpoint {
    pub id: String,
    #[serde(rename = "type")]
    #[serde_as(as = "OneOrMany<_>")]
    pub typ: Vec<String>,
    pub service_endpoint: Value,
}
