use serde::Serialize;

//
// ──────────────────────────────────────────────────────────
// Presentation-boundary status
// ──────────────────────────────────────────────────────────
//

/// Why a section failed to load.
///
/// The presentation layer keys its messaging on this, so the variants
/// must stay distinguishable:
/// - `Configuration` is non-retryable and should point the owner at the
///   admin settings,
/// - `Upstream` is retryable by the user,
/// - `DataQuality` means the upstream answered but the payload was
///   unusable (no data is fabricated in that case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    Configuration,
    Upstream,
    DataQuality,
}

/// The only thing the presentation layer receives about a section's
/// lifecycle. The aggregation core's job ends at producing this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Ready,
    Empty,
    Error {
        reason: ErrorReason,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl LoadState {
    pub fn error(reason: ErrorReason, message: impl Into<String>) -> Self {
        LoadState::Error {
            reason,
            message: Some(message.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_constructor_keeps_reason_and_message() {
        let state = LoadState::error(ErrorReason::Configuration, "GitHub username is not set");
        match state {
            LoadState::Error { reason, message } => {
                assert_eq!(reason, ErrorReason::Configuration);
                assert_eq!(message.as_deref(), Some("GitHub username is not set"));
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn ready_is_ready() {
        assert!(LoadState::Ready.is_ready());
        assert!(!LoadState::Empty.is_ready());
    }
}
