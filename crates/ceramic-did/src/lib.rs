//! [DID](https://www.w3.org/TR/did-core/) resolution for Ceramic.
//!
//! ## Example
//!
//! ```no_run
//! use ceramic_did::{
//!     methods::key::{DidKeyPair, PublicKey, ed25519::Ed25519KeyPair},
//!     resolver::DidResolver,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     // Generate a new did:key.
//!     let keys = Ed25519KeyPair::generate();
//!     let did = keys.public().to_did();
//!
//!     assert!(did.to_string().starts_with("did:key:z6Mk"));
//!
//!     // Resolve the DID document.
//!     let resolver =
//!         DidResolver::with_default_methods("https://ceramic-clay.3boxlabs.com/api/v0").unwrap();
//!     let resolved = resolver.resolve(&did).await.unwrap();
//!
//!     assert_eq!(resolved.document.id, did);
//! }
//! ```

pub mod resolver;

pub mod core {
    pub use ceramic_did_core::*;
}

pub mod methods {
    #[cfg(feature = "did-key")]
    pub mod key {
        pub use ceramic_did_method_key::*;
    }

    #[cfg(feature = "did-3")]
    pub mod three {
        pub use ceramic_did_method_3::*;
    }
}
