//! Core types for DID methods to implement.

use std::{future::Future, pin::Pin};

use did::Did;
use resolution::ResolvedDid;
use thiserror::Error;

pub mod did;
pub mod did_url;
pub mod document;
pub mod resolution;
mod uri;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A DID method resolver, registered by [Method::method_name].
pub trait Method: Send + Sync {
    fn method_name(&self) -> &'static str;

    /// Attempt to resolve the provided DID to its DID document.
    fn resolve(&self, did: Did) -> BoxFuture<'static, Result<ResolvedDid, ResolutionError>>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// The DID, or its method-specific id, could not be decoded.
    #[error("invalid DID: {0}")]
    InvalidDid(String),
    /// The DID exists in a well-formed shape, but the method reports it as unknown or invalid.
    #[error("DID not found: {0}")]
    NotFound(String),
    /// The method could not reach, or understand, its upstream source.
    #[error("resolution failed: {0}")]
    ResolutionFailed(String),
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
}

/// DID syntax error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing \"did:\" scheme")]
    Scheme,
    #[error("missing method-specific id")]
    MissingMethodId,
    #[error("invalid method name: {0:?}")]
    MethodName(String),
    #[error("invalid method-specific id: {0:?}")]
    MethodId(String),
    #[error("invalid DID URL path: {0}")]
    Path(&'static str),
}

impl From<ParseError> for ResolutionError {
    fn from(value: ParseError) -> Self {
        Self::InvalidDid(value.to_string())
    }
}
