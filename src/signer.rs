//! HMAC-SHA1 URL signer and its verifying counterpart.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::config::{EncodingVariant, SignerConfig};
use crate::encoding::{b64_decode, b64_encode, hex_decode, hex_encode};
use crate::error::SignError;
use crate::headers::{self, ExtraHeaders};
use crate::policy::{self, GateDecision};

type HmacSha1 = Hmac<Sha1>;

/// Length of a hex-rendered HMAC-SHA1 digest. Also used on the decode side
/// to pick the codec: a 40-char digest segment is hex, anything else is
/// base64url.
const HEX_DIGEST_LEN: usize = 40;

/// Produces and verifies Camo-style signed proxy URLs.
///
/// A signed URL has the shape
/// `{proxy_host}/{digest}/{url}[/{headers}]` where the digest is
/// HMAC-SHA1 over the original URL bytes (followed by the canonical header
/// serialization, when present).
///
/// Pure and stateless: the same inputs always produce the same output, and
/// a `UrlSigner` can be shared freely across threads.
pub struct UrlSigner {
    key: Vec<u8>,
    proxy_host: String,
    encoding: EncodingVariant,
    filter_ports: bool,
}

impl UrlSigner {
    /// Build a signer from configuration. The configured key is UTF-8 text;
    /// it enters the signer as its byte representation.
    pub fn new(config: &SignerConfig) -> Result<Self, SignError> {
        Self::from_key_bytes(config.hmac_key.as_bytes(), config)
    }

    /// Raw-bytes constructor for keys that are not UTF-8 text. The
    /// `hmac_key` field of `config` is ignored.
    pub fn from_key_bytes(key: &[u8], config: &SignerConfig) -> Result<Self, SignError> {
        if key.is_empty() {
            return Err(SignError::InvalidKey);
        }
        Ok(Self {
            key: key.to_vec(),
            proxy_host: config.proxy_host.trim_end_matches('/').to_string(),
            encoding: config.encoding,
            filter_ports: config.filter_ports,
        })
    }

    /// Sign a URL, producing the full proxy URL.
    ///
    /// https URLs are returned unchanged (no proxying needed); URLs refused
    /// by the policy gate come back as [`SignError::Rejected`].
    pub fn sign(&self, url: &str) -> Result<String, SignError> {
        self.sign_inner(url, None)
    }

    /// Like [`sign`](Self::sign), but binds extra response headers into the
    /// digest and appends them as a third path segment. The headers are fed
    /// to the MAC after the URL bytes, so a digest from one request cannot
    /// be combined with headers from another.
    pub fn sign_with_headers(
        &self,
        url: &str,
        extra: &ExtraHeaders,
    ) -> Result<String, SignError> {
        if extra.is_empty() {
            return self.sign_inner(url, None);
        }
        self.sign_inner(url, Some(extra))
    }

    fn sign_inner(&self, url: &str, extra: Option<&ExtraHeaders>) -> Result<String, SignError> {
        match policy::evaluate(url, self.filter_ports) {
            GateDecision::Bypass => return Ok(url.to_string()),
            GateDecision::Reject(reason) => {
                tracing::debug!(%reason, url, "URL rejected by policy");
                return Err(SignError::Rejected(reason));
            }
            GateDecision::Sign => {}
        }

        let canonical = extra.map(headers::canonicalize);
        let digest = self.digest(url.as_bytes(), canonical.as_deref());

        let (digest_seg, url_seg) = match self.encoding {
            EncodingVariant::Base64 => (b64_encode(&digest), b64_encode(url.as_bytes())),
            EncodingVariant::Hex => (hex_encode(&digest), hex_encode(url.as_bytes())),
        };

        let mut out = format!("{}/{digest_seg}/{url_seg}", self.proxy_host);
        if let Some(canonical) = canonical {
            // The header segment is always base64url, in both variants
            out.push('/');
            out.push_str(&b64_encode(&canonical));
        }
        Ok(out)
    }

    /// Verify a `{digest}/{url}` segment pair and return the original URL.
    pub fn verify_and_decode(
        &self,
        digest_seg: &str,
        url_seg: &str,
    ) -> Result<String, SignError> {
        self.decode_segments(digest_seg, url_seg, None)
            .map(|(url, _)| url)
    }

    /// Header-carrying counterpart of
    /// [`verify_and_decode`](Self::verify_and_decode): verifies a
    /// `{digest}/{url}/{headers}` segment triple and returns the original
    /// URL together with the signed headers.
    pub fn verify_and_decode_with_headers(
        &self,
        digest_seg: &str,
        url_seg: &str,
        header_seg: &str,
    ) -> Result<(String, ExtraHeaders), SignError> {
        let (url, extra) = self.decode_segments(digest_seg, url_seg, Some(header_seg))?;
        let extra = extra.ok_or_else(|| {
            SignError::MalformedPath("missing headers segment".to_string())
        })?;
        Ok((url, extra))
    }

    /// Split and verify a `/{digest}/{url}[/{headers}]` path, returning the
    /// original URL and any signed headers.
    pub fn decode_path(&self, path: &str) -> Result<(String, Option<ExtraHeaders>), SignError> {
        let mut parts = path.trim_start_matches('/').splitn(3, '/');
        let digest_seg = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SignError::MalformedPath("missing digest segment".to_string()))?;
        let url_seg = parts
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SignError::MalformedPath("missing url segment".to_string()))?;
        let header_seg = parts.next().filter(|s| !s.is_empty());

        self.decode_segments(digest_seg, url_seg, header_seg)
    }

    fn decode_segments(
        &self,
        digest_seg: &str,
        url_seg: &str,
        header_seg: Option<&str>,
    ) -> Result<(String, Option<ExtraHeaders>), SignError> {
        let (digest, url_bytes) = if digest_seg.len() == HEX_DIGEST_LEN {
            (hex_decode(digest_seg)?, hex_decode(url_seg)?)
        } else {
            (b64_decode(digest_seg)?, b64_decode(url_seg)?)
        };
        let header_bytes = header_seg.map(b64_decode).transpose()?;

        self.verify(&digest, &url_bytes, header_bytes.as_deref())?;

        let url = String::from_utf8(url_bytes)
            .map_err(|_| SignError::Decode("url is not valid UTF-8".to_string()))?;
        let extra = header_bytes.as_deref().map(headers::parse).transpose()?;
        Ok((url, extra))
    }

    fn digest(&self, url: &[u8], canonical_headers: Option<&[u8]>) -> Vec<u8> {
        let mut mac = self.mac(url, canonical_headers);
        mac.finalize().into_bytes().to_vec()
    }

    /// Constant-time comparison via the Mac implementation.
    fn verify(
        &self,
        digest: &[u8],
        url: &[u8],
        canonical_headers: Option<&[u8]>,
    ) -> Result<(), SignError> {
        let mac = self.mac(url, canonical_headers);
        mac.verify_slice(digest).map_err(|_| {
            tracing::debug!("bad signature");
            SignError::BadSignature
        })
    }

    fn mac(&self, url: &[u8], canonical_headers: Option<&[u8]>) -> HmacSha1 {
        let mut mac =
            HmacSha1::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(url);
        if let Some(canonical) = canonical_headers {
            mac.update(canonical);
        }
        mac
    }
}
