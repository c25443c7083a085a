//! Shared User-Agent string for outbound resolver traffic.
//!
//! Single source for the project URL and UA format so every request the
//! resolver makes (page fetch, download API call, file fetch) looks the same.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/gnojus/wedl";

/// Default User-Agent for resolver requests.
#[must_use]
pub(crate) fn default_resolver_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("wedl/{version} (+{PROJECT_UA_URL})")
}
