//! Path segment codecs shared by the signer and the verifier.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::SignError;

/// Base64 with the URL-safe alphabet and `=` padding stripped.
pub fn b64_encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Inverse of [`b64_encode`]; expects unpadded input.
pub fn b64_decode(input: &str) -> Result<Vec<u8>, SignError> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| SignError::Decode(format!("base64: {e}")))
}

/// Lowercase hex.
pub fn hex_encode(data: &[u8]) -> String {
    hex::encode(data)
}

pub fn hex_decode(input: &str) -> Result<Vec<u8>, SignError> {
    hex::decode(input).map_err(|e| SignError::Decode(format!("hex: {e}")))
}
