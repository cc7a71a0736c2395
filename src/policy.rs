//! Pre-signing policy gate: https pass-through, http-only filtering.

use url::Url;

use crate::error::RejectReason;

/// Outcome of the gate, decided before any HMAC work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Already https; the consumer fetches it over a trusted channel, so it
    /// needs no proxying.
    Bypass,
    /// Proceed to signing.
    Sign,
    /// Refused by policy.
    Reject(RejectReason),
}

/// Decide what to do with `raw`.
///
/// Parsing is for the decision only. The signed payload is always the
/// caller's original byte sequence, so an explicit `:80` stays in the
/// payload even though it is treated as the default port here.
///
/// With `filter` off this is the minimal variant of the scheme: https
/// bypasses, everything else is signed.
pub fn evaluate(raw: &str, filter: bool) -> GateDecision {
    if !filter {
        if raw.starts_with("https:") {
            return GateDecision::Bypass;
        }
        return GateDecision::Sign;
    }

    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => return GateDecision::Reject(RejectReason::Unparseable),
    };

    match parsed.scheme() {
        "https" => GateDecision::Bypass,
        "http" => {
            // Url::port() is None for the scheme default, so an explicit
            // `:80` already passes here.
            match parsed.port() {
                Some(port) => GateDecision::Reject(RejectReason::Port(port)),
                None => GateDecision::Sign,
            }
        }
        other => GateDecision::Reject(RejectReason::Scheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_bypasses() {
        let decision = evaluate("https://example.com/a.png", true);
        assert_eq!(decision, GateDecision::Bypass);
    }

    #[test]
    fn test_plain_http_signs() {
        let decision = evaluate("http://example.com/a.png", true);
        assert_eq!(decision, GateDecision::Sign);
    }

    #[test]
    fn test_explicit_default_port_signs() {
        let decision = evaluate("http://example.com:80/a.png", true);
        assert_eq!(decision, GateDecision::Sign);
    }

    #[test]
    fn test_non_default_port_rejected() {
        let decision = evaluate("http://example.com:8080/a.png", true);
        assert_eq!(decision, GateDecision::Reject(RejectReason::Port(8080)));
    }

    #[test]
    fn test_other_scheme_rejected() {
        let decision = evaluate("ftp://example.com/a.png", true);
        assert_eq!(
            decision,
            GateDecision::Reject(RejectReason::Scheme("ftp".to_string()))
        );
    }

    #[test]
    fn test_relative_url_rejected() {
        let decision = evaluate("/just/a/path.png", true);
        assert_eq!(decision, GateDecision::Reject(RejectReason::Unparseable));
    }

    #[test]
    fn test_filter_disabled_signs_anything_but_https() {
        assert_eq!(evaluate("https://example.com/a.png", false), GateDecision::Bypass);
        assert_eq!(evaluate("http://example.com:8080/a.png", false), GateDecision::Sign);
        assert_eq!(evaluate("ftp://example.com/a.png", false), GateDecision::Sign);
    }
}
