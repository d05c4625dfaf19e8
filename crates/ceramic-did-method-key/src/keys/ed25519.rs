use ed25519_dalek::{PUBLIC_KEY_LENGTH, SigningKey, VerifyingKey};
use rand::rngs::OsRng;

use super::{DidKeyPair, KeyCodec, KeyParser, PublicKey, WithMulticodec};
use crate::ParseError;

#[derive(Clone, Debug)]
pub struct Ed25519KeyPair(SigningKey);

impl Ed25519KeyPair {
    pub fn from_secret_bytes(secret: &[u8; 32]) -> Self {
        Self(SigningKey::from_bytes(secret))
    }

    pub fn secret_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl DidKeyPair for Ed25519KeyPair {
    fn generate() -> Self {
        let mut rng = OsRng;
        Self(SigningKey::generate(&mut rng))
    }

    fn public(&self) -> impl PublicKey {
        Ed25519PublicKey(self.0.verifying_key())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ed25519PublicKey(VerifyingKey);

impl Ed25519PublicKey {
    /// Rejects bytes that are not a compressed Edwards point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| ParseError::KeyLength {
                expected: PUBLIC_KEY_LENGTH,
                actual: bytes.len(),
            })?;

        VerifyingKey::from_bytes(bytes)
            .map(Self)
            .map_err(|e| ParseError::InvalidKey(e.to_string()))
    }
}

impl PublicKey for Ed25519PublicKey {
    fn to_bytes(&self) -> Box<[u8]> {
        self.0.to_bytes().into()
    }

    fn to_x25519(&self) -> Option<[u8; 32]> {
        Some(self.0.to_montgomery().to_bytes())
    }
}

impl WithMulticodec for Ed25519PublicKey {
    fn codec(&self) -> KeyCodec {
        KeyCodec::Ed25519
    }
}

pub(crate) struct Ed25519KeyParser;

impl KeyParser for Ed25519KeyParser {
    fn parse(&self, public_key: &[u8]) -> Result<Box<dyn PublicKey>, ParseError> {
        Ok(Box::new(Ed25519PublicKey::from_bytes(public_key)?))
    }
}

impl WithMulticodec for Ed25519KeyParser {
    fn codec(&self) -> KeyCodec {
        KeyCodec::Ed25519
    }
}
