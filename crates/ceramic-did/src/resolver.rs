use std::{collections::HashMap, str::FromStr};

use ceramic_did_core::{Method, ResolutionError, did::Did, resolution::ResolvedDid};
use thiserror::Error;
use tracing::{debug, warn};

/// Resolves DIDs by dispatching on their method name.
pub struct DidResolver {
    methods: HashMap<&'static str, Box<dyn Method>>,
}

impl DidResolver {
    /// Creates a resolver from the given methods.
    /// A method registered later replaces an earlier one of the same name.
    pub fn new(methods: Vec<Box<dyn Method>>) -> Self {
        let mut map = HashMap::with_capacity(methods.len());

        for method in methods {
            let name = method.method_name();
            if map.insert(name, method).is_some() {
                warn!("Replacing previously registered method did:{}", name);
            }
        }

        Self { methods: map }
    }

    /// Creates a resolver with all enabled methods.
    /// `did:3` is resolved against the Ceramic node API at `base_url`.
    #[cfg_attr(not(feature = "did-3"), allow(unused_variables))]
    pub fn with_default_methods(base_url: &str) -> Result<Self, MethodError> {
        let methods: Vec<Box<dyn Method>> = vec![
            #[cfg(feature = "did-key")]
            Box::new(ceramic_did_method_key::MethodDidKey),
            #[cfg(feature = "did-3")]
            Box::new(ceramic_did_method_3::MethodDid3::new(base_url)?),
        ];

        Ok(Self::new(methods))
    }

    /// Names of the registered methods, sorted.
    pub fn method_names(&self) -> Vec<&'static str> {
        let mut names = self.methods.keys().copied().collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub async fn resolve(&self, did: &Did) -> Result<ResolvedDid, ResolutionError> {
        let name = did.method_name.0.as_str();

        let Some(method) = self.methods.get(name) else {
            debug!("No method registered for {}", did);
            return Err(ResolutionError::UnsupportedMethod(name.to_string()));
        };

        method.resolve(did.clone()).await
    }

    /// Parses and resolves a DID string.
    pub async fn resolve_str(&self, did: &str) -> Result<ResolvedDid, ResolutionError> {
        let did = Did::from_str(did)?;
        self.resolve(&did).await
    }
}

#[derive(Error, Debug)]
pub enum MethodError {
    #[cfg(feature = "did-3")]
    #[error("failed to construct did:3 resolver: {0}")]
    Did3(#[from] ceramic_did_method_3::ceramic_client::ClientError),
}
