//! Structural URL equivalence.
//!
//! Chat servers move endpoints around behind redirects; the client needs to
//! know whether a `Location` header points somewhere materially different or
//! just re-spells the URL it already has. [`urls_equivalent`] compares two
//! URLs component by component instead of byte by byte, so query-string
//! noise never counts as an endpoint change.

use url::Url;

/// Decide whether two URLs reference the same endpoint.
///
/// A `None` on either side is only equivalent to another `None`. Inputs that
/// fail to parse as URLs fall back to a case-insensitive comparison of the
/// raw strings.
///
/// Parsed URLs compare by fragment, host, password, path, and username; the
/// query never participates. With `compare_protocol` set, the scheme must
/// match as well, and so must the effective ports after filling in each
/// scheme's default for an omitted port.
pub fn urls_equivalent(url1: Option<&str>, url2: Option<&str>, compare_protocol: bool) -> bool {
    let (Some(raw1), Some(raw2)) = (url1, url2) else {
        return url1.is_none() && url2.is_none();
    };

    let (Ok(parsed1), Ok(parsed2)) = (Url::parse(raw1), Url::parse(raw2)) else {
        return raw1.eq_ignore_ascii_case(raw2);
    };

    if compare_protocol && parsed1.scheme() != parsed2.scheme() {
        return false;
    }
    if parsed1.fragment() != parsed2.fragment() {
        return false;
    }
    if parsed1.host_str() != parsed2.host_str() {
        return false;
    }
    if parsed1.password() != parsed2.password() {
        return false;
    }
    if parsed1.path() != parsed2.path() {
        return false;
    }
    if parsed1.username() != parsed2.username() {
        return false;
    }

    !compare_protocol || parsed1.port_or_known_default() == parsed2.port_or_known_default()
}
