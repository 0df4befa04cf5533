use crate::domain::validate::is_valid_domain;
use crate::domain::DomainSet;
use crate::ScanError;
use std::net::IpAddr;
use std::path::Path;

/// Extracts the domains from hosts-format blocklist text
///
/// Each entry line has the form `<marker-address> <domain> [<domain>...]`,
/// optionally followed by a `#` comment. Comment lines, blank lines, lines
/// whose first token is not an IP address, and tokens that are not valid
/// domain names are skipped. Domains keep their case as written.
///
/// # Examples
///
/// ```
/// use reachscan::domain::extract_domains;
///
/// let text = "# ads\n0.0.0.0 b.example\n0.0.0.0 a.example # tracker\n\n0.0.0.0 b.example\n";
/// let domains = extract_domains(text);
/// let ordered: Vec<&str> = domains.iter().map(String::as_str).collect();
/// assert_eq!(ordered, ["a.example", "b.example"]);
/// ```
pub fn extract_domains(text: &str) -> DomainSet {
    let mut domains = DomainSet::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let entry = match line.split_once('#') {
            Some((before, _)) => before,
            None => line,
        };

        let mut tokens = entry.split_whitespace();
        let Some(marker) = tokens.next() else {
            continue;
        };

        if marker.parse::<IpAddr>().is_err() {
            skipped += 1;
            continue;
        }

        for token in tokens {
            if is_valid_domain(token) {
                domains.insert(token.to_string());
            } else {
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} malformed blocklist entries", skipped);
    }

    domains
}

/// Reads a source list from disk and extracts its domain set
///
/// # Arguments
///
/// * `path` - Path to the hosts-format blocklist
///
/// # Returns
///
/// * `Ok(DomainSet)` - The extracted domains (possibly empty)
/// * `Err(ScanError::MalformedSource)` - The file is missing, unreadable, or not text
pub fn load_domain_set(path: &Path) -> Result<DomainSet, ScanError> {
    let text = std::fs::read_to_string(path).map_err(|source| ScanError::MalformedSource {
        path: path.to_path_buf(),
        source,
    })?;

    let domains = extract_domains(&text);
    tracing::info!(
        "Extracted {} domains from {}",
        domains.len(),
        path.display()
    );
    Ok(domains)
}
