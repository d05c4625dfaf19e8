use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    ParseError,
    did::Did,
    uri::{Segment, is_segment},
};

/// [DID URL](https://www.w3.org/TR/did-core/#did-url-syntax), such as the id
/// of a verification method (`did:key:z6Mk...#z6Mk...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DidUrl {
    pub did: Did,
    /// [DID path](https://www.w3.org/TR/did-core/#path). `path-abempty` component from
    /// [RFC 3986](https://www.rfc-editor.org/rfc/rfc3986#section-3.3).
    pub path_abempty: Option<String>,
    /// [DID query](https://www.w3.org/TR/did-core/#query).
    pub query: Option<String>,
    /// [DID fragment](https://www.w3.org/TR/did-core/#fragment).
    pub fragment: Option<String>,
}

impl DidUrl {
    /// `did#fragment`
    pub fn with_fragment(did: Did, fragment: impl Into<String>) -> Self {
        Self {
            did,
            path_abempty: None,
            query: None,
            fragment: Some(fragment.into()),
        }
    }

    /// Attempts to convert the [DidUrl] into a [RelativeDidUrl].
    pub fn to_relative(&self) -> Option<RelativeDidUrl> {
        let path = match &self.path_abempty {
            Some(path) => RelativeDidUrlPath::from_str(path).ok()?,
            None => RelativeDidUrlPath::Empty,
        };

        Some(RelativeDidUrl {
            path,
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        })
    }
}

impl Display for DidUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.did)?;

        if let Some(path) = &self.path_abempty {
            f.write_str(path)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }

        Ok(())
    }
}

impl FromStr for DidUrl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let end = s.find(['/', '?', '#']).unwrap_or(s.len());
        let (did_str, rest) = s.split_at(end);

        let did = Did::from_str(did_str)?;
        let (path, query, fragment) = split_reference(rest);

        // path-abempty  = *( "/" segment )
        let path_abempty = if path.is_empty() {
            None
        } else {
            if !path.split('/').all(|v| is_segment(v, Segment::Base)) {
                return Err(ParseError::Path("invalid path segment"));
            }
            Some(path.to_string())
        };

        Ok(DidUrl {
            did,
            path_abempty,
            query: query.map(str::to_string),
            fragment: fragment.map(str::to_string),
        })
    }
}

/// Relative reference to a resource within the current DID document,
/// such as `#key-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeDidUrl {
    pub path: RelativeDidUrlPath,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl RelativeDidUrl {
    /// `#fragment`
    pub fn fragment(fragment: impl Into<String>) -> Self {
        Self {
            path: RelativeDidUrlPath::Empty,
            query: None,
            fragment: Some(fragment.into()),
        }
    }
}

impl Display for RelativeDidUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)?;

        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }

        Ok(())
    }
}

impl FromStr for RelativeDidUrl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, query, fragment) = split_reference(s);

        Ok(Self {
            path: RelativeDidUrlPath::from_str(path)?,
            query: query.map(str::to_string),
            fragment: fragment.map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelativeDidUrlPath {
    /// `path-absolute` from [RFC 3986](https://tools.ietf.org/html/rfc3986#section-3.3)
    Absolute(String),
    /// `path-noscheme` from [RFC 3986](https://tools.ietf.org/html/rfc3986#section-3.3)
    NoScheme(String),
    /// `path-empty` from [RFC 3986](https://tools.ietf.org/html/rfc3986#section-3.3)
    Empty,
}

impl Display for RelativeDidUrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absolute(s) | Self::NoScheme(s) => f.write_str(s),
            Self::Empty => Ok(()),
        }
    }
}

impl FromStr for RelativeDidUrlPath {
    type Err = ParseError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        if path.is_empty() {
            return Ok(Self::Empty);
        }

        if let Some(rest) = path.strip_prefix('/') {
            // path-absolute = "/" [ segment-nz *( "/" segment ) ]
            if !rest.is_empty() && !is_path(rest, Segment::Nz) {
                return Err(ParseError::Path("invalid path segment"));
            }

            Ok(Self::Absolute(path.to_string()))
        } else {
            // path-noscheme = segment-nz-nc *( "/" segment )
            if !is_path(path, Segment::NzNc) {
                return Err(ParseError::Path("invalid path segment"));
            }

            Ok(Self::NoScheme(path.to_string()))
        }
    }
}

/// A first segment of the given kind followed by `*( "/" segment )`.
fn is_path(path: &str, first: Segment) -> bool {
    let mut segments = path.split('/');
    segments.next().is_some_and(|v| is_segment(v, first))
        && segments.all(|v| is_segment(v, Segment::Base))
}

/// Splits `path?query#fragment` into its components.
fn split_reference(s: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, fragment) = match s.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (s, None),
    };

    match rest.split_once('?') {
        Some((path, query)) => (path, Some(query), fragment),
        None => (rest, None, fragment),
    }
}

macro_rules! impl_string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::from_str(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

impl_string_serde!(DidUrl);
impl_string_serde!(RelativeDidUrl);
