use regex::Regex;
use std::sync::LazyLock;

// Textual, not structural: the shortest run from the first `<svg` to the next
// `</svg>`. Nested or sibling <svg> blocks are not balanced.
static SVG_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<svg.*?</svg>").expect("svg block pattern"));

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("```svg\n|```").expect("code fence pattern"));

/// Recovers SVG markup from free-form model output.
///
/// Returns the first `<svg ...>...</svg>` substring. Failing that, output
/// that starts with `<` once trimmed is returned trimmed. Anything else yields
/// `None`.
pub fn extract_svg(raw: &str) -> Option<String> {
    if let Some(m) = SVG_BLOCK.find(raw) {
        return Some(m.as_str().to_string());
    }
    let trimmed = raw.trim();
    if trimmed.starts_with('<') {
        return Some(trimmed.to_string());
    }
    None
}

/// Drops every "```svg\n" and "```" marker, then trims.
pub fn strip_code_fences(code: &str) -> String {
    CODE_FENCE.replace_all(code, "").trim().to_string()
}
