//! Shared utilities for resolver modules: host normalization and HTML meta extraction.

use regex::Regex;

/// Compiles a regex at static init; panics on invalid pattern.
pub fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

/// Normalizes a host string: trim, strip leading "www.", trailing '.', and lowercases.
#[must_use]
pub fn canonical_host(host: &str) -> String {
    host.trim()
        .trim_start_matches("www.")
        .trim_end_matches('.')
        .to_ascii_lowercase()
}

/// Returns true if the two host strings refer to the same host after normalization.
#[must_use]
pub fn hosts_match(lhs: &str, rhs: &str) -> bool {
    canonical_host(lhs) == canonical_host(rhs)
}

/// Returns true if `host` equals `domain` or is a subdomain of it.
#[must_use]
pub fn host_within(host: &str, domain: &str) -> bool {
    let host = canonical_host(host);
    let domain = canonical_host(domain);
    host == domain || host.ends_with(&format!(".{domain}"))
}

/// Returns the first capture of `regex` in `html`, trimmed.
#[must_use]
pub fn extract_meta_value(html: &str, regex: &Regex) -> Option<String> {
    regex
        .captures(html)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|value| !value.is_empty())
}
