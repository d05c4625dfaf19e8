use ceramic_did_core::did::{Did, MethodId, MethodName};
use multibase::Base;
use thiserror::Error;

use crate::NAME;

pub mod ed25519;

/// Multicodec table entries for the public key types found in `did:key`
/// and 3ID documents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyCodec {
    /// `ed25519-pub`
    Ed25519,
    /// `secp256k1-pub`
    Secp256k1,
    /// `x25519-pub`
    X25519,
}

impl KeyCodec {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0xed => Some(Self::Ed25519),
            0xe7 => Some(Self::Secp256k1),
            0xec => Some(Self::X25519),
            _ => None,
        }
    }

    /// Verification method type used when the key is expanded into a document.
    pub fn verification_type(&self) -> &'static str {
        match self {
            Self::Ed25519 => "Ed25519VerificationKey2018",
            Self::Secp256k1 => "EcdsaSecp256k1Signature2019",
            Self::X25519 => "X25519KeyAgreementKey2019",
        }
    }
}

impl Multicodec for KeyCodec {
    fn code_u64(&self) -> u64 {
        match self {
            Self::Ed25519 => 0xed,
            Self::Secp256k1 => 0xe7,
            Self::X25519 => 0xec,
        }
    }
}

pub trait Multicodec {
    fn code_u64(&self) -> u64;
    fn code(&self) -> Vec<u8> {
        let mut buffer = unsigned_varint::encode::u64_buffer();
        unsigned_varint::encode::u64(self.code_u64(), &mut buffer).to_vec()
    }
}

pub trait WithMulticodec {
    fn codec(&self) -> KeyCodec;
}

pub trait DidKeyPair: Sized {
    /// Generate a new pair of keys.
    fn generate() -> Self;

    fn public(&self) -> impl PublicKey;
}

pub trait PublicKey: WithMulticodec {
    /// Raw public key bytes, as placed after the multicodec prefix.
    fn to_bytes(&self) -> Box<[u8]>;

    /// X25519 key agreement key derived from this key, if the key type allows it.
    fn to_x25519(&self) -> Option<[u8; 32]> {
        None
    }

    fn to_did(&self) -> Did {
        did_key(multikey(Base::Base58Btc, self.codec().code_u64(), &self.to_bytes()))
    }
}

pub trait KeyParser: WithMulticodec {
    fn parse(&self, public_key: &[u8]) -> Result<Box<dyn PublicKey>, crate::ParseError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("public key is empty")]
    EmptyKey,
    #[error("did:key requires base58-btc multibase, got {0:?}")]
    UnsupportedBase(Base),
}

/// Creates a `did:key` from a raw Ed25519 public key.
///
/// The key length is not checked.
pub fn create_did_key(public_key: &[u8]) -> Result<Did, EncodingError> {
    let id = encode_multikey(Base::Base58Btc, KeyCodec::Ed25519.code_u64(), public_key)?;
    Ok(did_key(id))
}

/// Multibase encodes `varint(code) || key`.
pub fn encode_multikey(base: Base, code: u64, key: &[u8]) -> Result<String, EncodingError> {
    if key.is_empty() {
        return Err(EncodingError::EmptyKey);
    }
    if base != Base::Base58Btc {
        return Err(EncodingError::UnsupportedBase(base));
    }

    Ok(multikey(base, code, key))
}

fn multikey(base: Base, code: u64, key: &[u8]) -> String {
    let mut buffer = unsigned_varint::encode::u64_buffer();
    let prefix = unsigned_varint::encode::u64(code, &mut buffer);

    let mut inner = Vec::with_capacity(prefix.len() + key.len());
    inner.extend_from_slice(prefix);
    inner.extend_from_slice(key);

    multibase::encode(base, inner)
}

fn did_key(id: String) -> Did {
    Did {
        method_name: MethodName(NAME.to_string()),
        method_id: MethodId(id),
    }
}
