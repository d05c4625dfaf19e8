use ceramic_did_core::did::Did;
use multibase::Base;
use thiserror::Error;

use crate::keys::{KeyCodec, KeyParser, Multicodec, PublicKey};

pub struct DidKeyParser {
    parsers: Vec<Box<dyn KeyParser>>,
}

impl Default for DidKeyParser {
    fn default() -> Self {
        let parsers: Vec<Box<dyn KeyParser>> = vec![Box::new(crate::keys::ed25519::Ed25519KeyParser)];

        Self { parsers }
    }
}

impl DidKeyParser {
    pub fn parse(&self, did: &Did) -> Result<Box<dyn PublicKey>, ParseError> {
        let (code, key) = decode_multikey(&did.method_id.0)?;

        for parser in self.parsers.iter() {
            if parser.codec().code_u64() == code {
                return parser.parse(&key);
            }
        }

        Err(ParseError::CodecNotSupported(code))
    }
}

/// Decodes a multibase, multicodec prefixed key into its codec and raw bytes.
pub fn decode_multikey(value: &str) -> Result<(u64, Vec<u8>), ParseError> {
    let (base, inner) = multibase::decode(value).map_err(|e| ParseError::Multibase(e.to_string()))?;
    if base != Base::Base58Btc {
        return Err(ParseError::WrongBase(base));
    }

    let (code, key) =
        unsigned_varint::decode::u64(&inner).map_err(|e| ParseError::Varint(e.to_string()))?;

    if key.is_empty() {
        return Err(ParseError::KeyLength {
            expected: 1,
            actual: 0,
        });
    }

    Ok((code, key.to_vec()))
}

/// Like [decode_multikey], restricted to known key types.
pub fn decode_known_multikey(value: &str) -> Result<(KeyCodec, Vec<u8>), ParseError> {
    let (code, key) = decode_multikey(value)?;
    let codec = KeyCodec::from_code(code).ok_or(ParseError::CodecNotSupported(code))?;
    Ok((codec, key))
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("failed to decode multibase: {0}")]
    Multibase(String),
    #[error("expected base58-btc multibase, got {0:?}")]
    WrongBase(Base),
    #[error("failed to decode multicodec varint: {0}")]
    Varint(String),
    #[error("codec not supported: {0:#x}")]
    CodecNotSupported(u64),
    #[error("public key has length {actual}, expected {expected}")]
    KeyLength { expected: usize, actual: usize },
    #[error("invalid public key: {0}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::{DidKeyPair, Multicodec, WithMulticodec, create_did_key, ed25519::Ed25519KeyPair};

    #[test]
    fn test_roundtrip() {
        let key = [7u8; 32];
        let did = create_did_key(&key).unwrap();

        let (code, decoded) = decode_multikey(&did.method_id.0).unwrap();
        assert_eq!(code, KeyCodec::Ed25519.code_u64());
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_known_x25519() {
        let (codec, key) =
            decode_known_multikey("z6LSbysY2xFMRpGMhb7tFTLMpeuPRaqaWM1yECx2AtzE3KCc").unwrap();
        assert_eq!(codec, KeyCodec::X25519);
        assert_eq!(
            Base::Base58Btc.encode(key),
            "JhNWeSVLMYccCk7iopQW4guaSJTojqpMEELgSLhKwRr"
        );
    }

    #[test]
    fn test_wrong_base() {
        let encoded = multibase::encode(Base::Base64, [0xed, 0x01, 1, 2, 3]);
        assert_eq!(
            decode_multikey(&encoded),
            Err(ParseError::WrongBase(Base::Base64))
        );
    }

    #[test]
    fn test_invalid_base58() {
        // '0' and 'l' are not in the bitcoin alphabet.
        assert!(matches!(
            decode_multikey("z0l"),
            Err(ParseError::Multibase(_))
        ));
    }

    #[test]
    fn test_truncated_varint() {
        let encoded = multibase::encode(Base::Base58Btc, [0xed]);
        assert!(matches!(
            decode_multikey(&encoded),
            Err(ParseError::Varint(_))
        ));
    }

    #[test]
    fn test_unknown_codec() {
        let encoded = multibase::encode(Base::Base58Btc, [0x80, 0x24, 1, 2, 3]);
        assert_eq!(
            decode_known_multikey(&encoded),
            Err(ParseError::CodecNotSupported(0x1200))
        );
    }

    #[test]
    fn test_parser_dispatch() {
        let parser = DidKeyParser::default();

        let key = Ed25519KeyPair::generate().public().to_bytes();
        let did = create_did_key(&key).unwrap();
        match parser.parse(&did) {
            Ok(public) => {
                assert_eq!(public.codec(), KeyCodec::Ed25519);
                assert_eq!(public.to_bytes(), key);
            }
            Err(e) => panic!("unexpected error: {e}"),
        }

        let p256 = Did::from_str("did:key:zDnaerDaTF5BXEavCrfRZEk316dpbLsfPDZ3WJ5hRTPFU2169")
            .unwrap();
        assert!(matches!(
            parser.parse(&p256),
            Err(ParseError::CodecNotSupported(0x1200))
        ));
    }
}
