use std::fmt;

use thiserror::Error;

/// Why the policy gate refused to sign a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Scheme other than plain `http` (ftp, data, file, ...).
    Scheme(String),
    /// Explicit port other than the http default while the port filter is
    /// active.
    Port(u16),
    /// Input could not be parsed as an absolute URL.
    Unparseable,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Scheme(scheme) => write!(f, "scheme '{scheme}' is not proxyable"),
            RejectReason::Port(port) => write!(f, "non-default port {port}"),
            RejectReason::Unparseable => write!(f, "not an absolute URL"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SignError {
    #[error("signing key must not be empty")]
    InvalidKey,

    #[error("URL rejected by policy: {0}")]
    Rejected(RejectReason),

    #[error("invalid encoded segment: {0}")]
    Decode(String),

    #[error("signature mismatch")]
    BadSignature,

    #[error("malformed proxy path: {0}")]
    MalformedPath(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_display() {
        let error = SignError::InvalidKey;
        assert_eq!(error.to_string(), "signing key must not be empty");
    }

    #[test]
    fn test_rejected_display() {
        let error = SignError::Rejected(RejectReason::Port(8080));
        assert_eq!(
            error.to_string(),
            "URL rejected by policy: non-default port 8080"
        );

        let error = SignError::Rejected(RejectReason::Scheme("ftp".to_string()));
        assert_eq!(
            error.to_string(),
            "URL rejected by policy: scheme 'ftp' is not proxyable"
        );

        let error = SignError::Rejected(RejectReason::Unparseable);
        assert_eq!(
            error.to_string(),
            "URL rejected by policy: not an absolute URL"
        );
    }

    #[test]
    fn test_decode_display() {
        let error = SignError::Decode("hex: odd length".to_string());
        assert_eq!(error.to_string(), "invalid encoded segment: hex: odd length");
    }

    #[test]
    fn test_bad_signature_display() {
        let error = SignError::BadSignature;
        assert_eq!(error.to_string(), "signature mismatch");
    }

    #[test]
    fn test_malformed_path_display() {
        let error = SignError::MalformedPath("missing url segment".to_string());
        assert_eq!(
            error.to_string(),
            "malformed proxy path: missing url segment"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: SignError = io.into();
        match error {
            SignError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }
}
