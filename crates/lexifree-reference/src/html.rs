use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Decode the handful of entities that show up in definition text.
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Visible text of an HTML fragment, whitespace collapsed.
pub fn text_content(fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(fragment, "");
    let decoded = decode_entities(&stripped);
    SPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}
