//! camosign - Camo-style signed proxy URLs
//!
//! Rewrites plain-http image URLs into opaque, HMAC-SHA1-signed proxy URLs
//! that a Camo-compatible proxy server can later verify and relay. https
//! URLs pass through untouched; everything else is signed or refused by the
//! policy gate.
//!
//! # Quick Start
//!
//! ```
//! use camosign::{SignerConfig, UrlSigner};
//!
//! let config = SignerConfig {
//!     hmac_key: "test".into(),
//!     proxy_host: "https://img.example.com".into(),
//!     ..Default::default()
//! };
//! let signer = UrlSigner::new(&config).unwrap();
//!
//! let signed = signer.sign("http://golang.org/doc/gopher/frontpage.png").unwrap();
//! assert_eq!(
//!     signed,
//!     "https://img.example.com/D23vHLFHsOhPOcvdxeoQyAJTpvM/aHR0cDovL2dvbGFuZy5vcmcvZG9jL2dvcGhlci9mcm9udHBhZ2UucG5n"
//! );
//! ```
//!
//! The verifying side of a proxy server uses [`UrlSigner::decode_path`] on
//! the request path to recover (and authenticate) the original URL.

pub mod config;
pub mod encoding;
pub mod error;
pub mod headers;
pub mod policy;
pub mod signer;

pub use config::{EncodingVariant, SignerConfig};
pub use error::{RejectReason, SignError};
pub use headers::ExtraHeaders;
pub use policy::GateDecision;
pub use signer::UrlSigner;
