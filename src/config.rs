use std::path::Path;

use serde::Deserialize;

use crate::error::SignError;

/// Output encoding for the digest and URL path segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingVariant {
    /// URL-safe base64 with padding stripped (27-char digest segment).
    #[default]
    Base64,
    /// Lowercase hex (40-char digest segment).
    Hex,
}

/// Signer configuration, loadable from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct SignerConfig {
    /// HMAC key as UTF-8 text. For raw byte keys use
    /// [`UrlSigner::from_key_bytes`](crate::UrlSigner::from_key_bytes).
    #[serde(default)]
    pub hmac_key: String,

    /// Base URL prefix for signed output, e.g. `https://img.example.com`.
    /// A trailing `/` is trimmed at signer construction.
    #[serde(default = "default_proxy_host")]
    pub proxy_host: String,

    /// Encoding variant for the digest and URL segments.
    #[serde(default)]
    pub encoding: EncodingVariant,

    /// Reject non-http schemes and http URLs with an explicit non-default
    /// port. With this off, anything that is not https gets signed.
    #[serde(default = "default_filter_ports")]
    pub filter_ports: bool,
}

fn default_proxy_host() -> String {
    "https://img.example.com".to_string()
}

fn default_filter_ports() -> bool {
    true
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            hmac_key: String::new(),
            proxy_host: default_proxy_host(),
            encoding: EncodingVariant::default(),
            filter_ports: default_filter_ports(),
        }
    }
}

impl SignerConfig {
    /// Load configuration from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, SignError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| SignError::Config(e.to_string()))?;
        tracing::debug!(path = %path.display(), "Loaded signer configuration");
        Ok(config)
    }
}
