//! Shared User-Agent string for page and PDF requests.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/pdf-harvester";

/// Default User-Agent for every request the harvester sends (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("pdf-harvester/{version} (+{PROJECT_UA_URL})")
}
