use serde::Serialize;

use crate::shared::text::is_blank;

//
// ──────────────────────────────────────────────────────────
// Display-field precedence
// ──────────────────────────────────────────────────────────
//

/// Outcome of resolving one displayed field. `NotAvailable` is an
/// explicit state the presentation layer renders as such; an empty
/// string is never shown as if it were a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResolvedField {
    Value(String),
    NotAvailable,
}

impl ResolvedField {
    pub fn value(&self) -> Option<&str> {
        match self {
            ResolvedField::Value(v) => Some(v),
            ResolvedField::NotAvailable => None,
        }
    }
}

/// The one precedence rule for every displayed field (name, title, bio,
/// profile image): the user-edited portfolio value wins when present
/// and non-blank, the LinkedIn-derived value is the fallback, and when
/// both are missing the field is explicitly not available. No field may
/// prefer LinkedIn over an explicit user edit.
pub fn resolve_field(portfolio: Option<&str>, linkedin: Option<&str>) -> ResolvedField {
    if !is_blank(portfolio) {
        return ResolvedField::Value(portfolio.unwrap_or_default().trim().to_string());
    }
    if !is_blank(linkedin) {
        return ResolvedField::Value(linkedin.unwrap_or_default().trim().to_string());
    }
    ResolvedField::NotAvailable
}
