//
// ──────────────────────────────────────────────────────────
// Profile URL normalization
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProfileUrlError {
    /// Configuration error: there is nothing to scrape. The message is
    /// user-actionable on purpose.
    #[error("No LinkedIn profile is configured. Add a LinkedIn URL or handle in the profile settings.")]
    Missing,
}

/// Normalize whatever is stored in the portfolio record's social links
/// into a canonical profile URL.
///
/// Accepted inputs: a full URL (`https://www.linkedin.com/in/alice`),
/// a scheme-less URL (`linkedin.com/in/alice`), or a bare handle
/// (`alice`, `@alice`). Everything resolves to
/// `https://www.linkedin.com/in/<handle>/`.
pub fn canonical_profile_url(raw: Option<&str>) -> Result<String, ProfileUrlError> {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(ProfileUrlError::Missing);
    }

    if raw.contains("linkedin.com") {
        let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            format!("https://{}", raw)
        };
        return Ok(ensure_trailing_slash(&with_scheme));
    }

    let handle = raw.trim_start_matches('@').trim_matches('/');
    Ok(format!("https://www.linkedin.com/in/{}/", handle))
}

fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_url_passes_through_with_trailing_slash() {
        assert_eq!(
            canonical_profile_url(Some("https://www.linkedin.com/in/alice")).unwrap(),
            "https://www.linkedin.com/in/alice/"
        );
        assert_eq!(
            canonical_profile_url(Some("https://www.linkedin.com/in/alice/")).unwrap(),
            "https://www.linkedin.com/in/alice/"
        );
    }

    #[test]
    fn schemeless_url_gains_https() {
        assert_eq!(
            canonical_profile_url(Some("www.linkedin.com/in/alice")).unwrap(),
            "https://www.linkedin.com/in/alice/"
        );
    }

    #[test]
    fn bare_handle_becomes_canonical_url() {
        assert_eq!(
            canonical_profile_url(Some("alice")).unwrap(),
            "https://www.linkedin.com/in/alice/"
        );
        assert_eq!(
            canonical_profile_url(Some("@alice")).unwrap(),
            "https://www.linkedin.com/in/alice/"
        );
    }

    #[test]
    fn missing_input_is_a_configuration_error() {
        assert!(matches!(
            canonical_profile_url(None),
            Err(ProfileUrlError::Missing)
        ));
        assert!(matches!(
            canonical_profile_url(Some("   ")),
            Err(ProfileUrlError::Missing)
        ));
    }
}
