use std::net::IpAddr;

/// Names that hosts files map to themselves and that are never blocklist entries
const HOSTS_SELF_ENTRIES: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "local",
    "broadcasthost",
];

/// Checks whether a token from a blocklist line is a probe-able domain name
///
/// Accepts letters, digits, `.`, `-` and `_` (underscores are common in
/// tracker hostnames). Rejects IP literals, hosts-file self entries, and
/// names starting or ending with `.` or `-` or containing empty labels.
///
/// # Examples
///
/// ```
/// use reachscan::domain::is_valid_domain;
///
/// assert!(is_valid_domain("ads.example.com"));
/// assert!(is_valid_domain("track_1.example.net"));
/// assert!(!is_valid_domain("localhost"));
/// assert!(!is_valid_domain("0.0.0.0"));
/// assert!(!is_valid_domain("bad..example"));
/// ```
pub fn is_valid_domain(token: &str) -> bool {
    if token.is_empty() || token.len() > 253 {
        return false;
    }

    if token.parse::<IpAddr>().is_ok() {
        return false;
    }

    let lower = token.to_ascii_lowercase();
    if HOSTS_SELF_ENTRIES.contains(&lower.as_str()) || lower.starts_with("ip6-") {
        return false;
    }

    if !token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
    {
        return false;
    }

    if token.starts_with('.')
        || token.ends_with('.')
        || token.starts_with('-')
        || token.ends_with('-')
    {
        return false;
    }

    !token.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_regular_domains() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("a.b.c.example.co.uk"));
        assert!(is_valid_domain("xn--bcher-kva.example"));
        assert!(is_valid_domain("Ads.Example.COM"));
    }

    #[test]
    fn test_rejects_ip_literals() {
        assert!(!is_valid_domain("0.0.0.0"));
        assert!(!is_valid_domain("127.0.0.1"));
        assert!(!is_valid_domain("::1"));
    }

    #[test]
    fn test_rejects_hosts_self_entries() {
        assert!(!is_valid_domain("localhost"));
        assert!(!is_valid_domain("LOCALHOST"));
        assert!(!is_valid_domain("localhost.localdomain"));
        assert!(!is_valid_domain("broadcasthost"));
        assert!(!is_valid_domain("ip6-allnodes"));
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!(!is_valid_domain(""));
        assert!(!is_valid_domain(".example.com"));
        assert!(!is_valid_domain("example.com."));
        assert!(!is_valid_domain("-example.com"));
        assert!(!is_valid_domain("exa mple.com"));
        assert!(!is_valid_domain("example..com"));
        assert!(!is_valid_domain("ex@mple.com"));
        assert!(!is_valid_domain(&"a".repeat(254)));
    }
}
