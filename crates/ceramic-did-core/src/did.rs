use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ParseError;

/// [DID](https://www.w3.org/TR/did-core/#did-syntax).
///
/// Serialized as its string form, `did:<method>:<method-specific-id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Did {
    pub method_name: MethodName,
    pub method_id: MethodId,
}

impl Did {
    pub fn new(method_name: MethodName, method_id: MethodId) -> Self {
        Self {
            method_name,
            method_id,
        }
    }
}

impl Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "did:{}:{}", self.method_name.0, self.method_id.0)
    }
}

impl FromStr for Did {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');

        if parts.next() != Some("did") {
            return Err(ParseError::Scheme);
        }

        let method_name = parts.next().ok_or(ParseError::MissingMethodId)?;
        let method_specific_id = parts.next().ok_or(ParseError::MissingMethodId)?;

        Ok(Did {
            method_name: MethodName::from_str(method_name)?,
            method_id: MethodId::from_str(method_specific_id)?,
        })
    }
}

impl Serialize for Did {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Did {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodName(pub String);

impl FromStr for MethodName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            Ok(MethodName(s.to_string()))
        } else {
            Err(ParseError::MethodName(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodId(pub String);

impl FromStr for MethodId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_empty() && s.split(':').all(is_valid_idchar) {
            Ok(MethodId(s.to_string()))
        } else {
            Err(ParseError::MethodId(s.to_string()))
        }
    }
}

/// idchar = ALPHA / DIGIT / "." / "-" / "_" / pct-encoded
fn is_valid_idchar(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' || c == '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_did_example() {
        let did = Did {
            method_name: MethodName("example".to_string()),
            method_id: MethodId("1234-5678-abcdef".to_string()),
        };

        let serialized = did.to_string();
        assert_eq!(serialized, "did:example:1234-5678-abcdef");

        let deserialized = Did::from_str(&serialized).expect("deserialize failed");
        assert_eq!(deserialized, did);
    }

    #[test]
    fn test_did_3() {
        let did = Did::from_str(
            "did:3:kjzl6cwe1jw147dvq16zluojmraqvwdmbh61dx9e0c59i344lcrsgqfohexp60s",
        )
        .unwrap();
        assert_eq!(did.method_name.0, "3");
    }

    #[test]
    fn test_method_id_colons() {
        let did = Did::from_str("did:web:example.com%3A3000:user:alice").unwrap();
        assert_eq!(did.method_name.0, "web");
        assert_eq!(did.method_id.0, "example.com%3A3000:user:alice");
    }

    #[test]
    fn test_invalid() {
        assert_eq!(Did::from_str("did:test"), Err(ParseError::MissingMethodId));
        assert_eq!(Did::from_str("uri:key:abc"), Err(ParseError::Scheme));
        assert_eq!(
            Did::from_str("did:KEY:abc"),
            Err(ParseError::MethodName("KEY".to_string()))
        );
        assert_eq!(
            Did::from_str("did:key:"),
            Err(ParseError::MethodId(String::new()))
        );
        assert_eq!(
            Did::from_str("did:key:a b"),
            Err(ParseError::MethodId("a b".to_string()))
        );
    }

    #[test]
    fn test_serde_string() {
        let did = Did::from_str("did:key:z6MktvqCyLxTsXUH1tUZncNdVeEZ7hNh7npPRbUU27GTrYb8").unwrap();
        let value = serde_json::to_value(&did).unwrap();
        assert_eq!(
            value,
            serde_json::json!("did:key:z6MktvqCyLxTsXUH1tUZncNdVeEZ7hNh7npPRbUU27GTrYb8")
        );

        let back: Did = serde_json::from_value(value).unwrap();
        assert_eq!(back, did);
    }
}
