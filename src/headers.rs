//! Canonical serialization of extra headers bound into the signature.
//!
//! A signed URL may carry additional response headers (e.g.
//! `content-disposition`) as a third path segment. The serialization must be
//! byte-identical between the signer and any verifier, so it is pinned down
//! here: a JSON object with sorted keys and a single space after `:` and `,`,
//! i.e. `{"k": "v", "k2": "v2"}`.

use std::collections::BTreeMap;

use crate::error::SignError;

/// Extra headers keyed by header name. `BTreeMap` gives the sorted key
/// order the canonical form requires.
pub type ExtraHeaders = BTreeMap<String, String>;

/// Render headers in the canonical wire form.
///
/// Logically equal maps always produce identical bytes; the digest and the
/// transport segment both consume this output.
pub fn canonicalize(headers: &ExtraHeaders) -> Vec<u8> {
    let mut out = String::from("{");
    for (i, (name, value)) in headers.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&json_string(name));
        out.push_str(": ");
        out.push_str(&json_string(value));
    }
    out.push('}');
    out.into_bytes()
}

/// Parse the canonical form back into a header map (verifier side).
pub fn parse(bytes: &[u8]) -> Result<ExtraHeaders, SignError> {
    serde_json::from_slice(bytes).map_err(|e| SignError::Decode(format!("headers: {e}")))
}

fn json_string(s: &str) -> String {
    // Serializing a str to JSON cannot fail
    serde_json::to_string(s).expect("string serialization is infallible")
}
