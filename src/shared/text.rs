//! Small text helpers shared across modules.

/// Convert a kebab-case (or snake_case) identifier into Title Case.
///
/// Repository names and topics arrive as `"android-app"` or
/// `"machine_learning"`; visitors should see `"Android App"`.
pub fn title_case_from_kebab(input: &str) -> String {
    input
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// A field counts as "present" only when it contains something visible.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}
