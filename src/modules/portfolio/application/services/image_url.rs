//
// ──────────────────────────────────────────────────────────
// Image URL resolution
// ──────────────────────────────────────────────────────────
//

/// Resolve a possibly-relative image URL against the API origin.
///
/// Total by contract: never errors, empty in empty out. The
/// `undefined/uploads/` branch repairs a known bug signature written by
/// a missing base URL elsewhere in the system; those values are already
/// persisted, so they get fixed on read.
pub fn resolve_image_url(raw: &str, api_base_url: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        // Repair before accepting: an absolute URL can still carry the
        // bug signature ("https://undefined/uploads/...").
        if let Some(idx) = raw.find("undefined/uploads/") {
            let tail = &raw[idx + "undefined".len()..];
            return format!("{}{}", api_origin(api_base_url), tail);
        }
        return raw.to_string();
    }

    if let Some(idx) = raw.find("undefined/uploads/") {
        let tail = &raw[idx + "undefined".len()..];
        return format!("{}{}", api_origin(api_base_url), tail);
    }

    if raw.starts_with("/uploads/") {
        return format!("{}{}", api_origin(api_base_url), raw);
    }

    // Anything else stays relative to the current page origin.
    raw.to_string()
}

/// `scheme://host[:port]` of the configured API base URL, without any
/// path. Falls back to the input stripped of a trailing slash when it
/// does not parse as an absolute URL.
fn api_origin(api_base_url: &str) -> String {
    let trimmed = api_base_url.trim().trim_end_matches('/');
    if let Some(scheme_end) = trimmed.find("://") {
        let after_scheme = &trimmed[scheme_end + 3..];
        let host_end = after_scheme.find('/').unwrap_or(after_scheme.len());
        return format!("{}{}", &trimmed[..scheme_end + 3], &after_scheme[..host_end]);
    }
    trimmed.to_string()
}
