//! Inline markup stripping.
//!
//! Mixed-style runs are not rendered: emphasis, inline code and links are
//! reduced to their inner text so each line is one styleless run.

use std::sync::OnceLock;

use regex::Regex;

struct InlinePatterns {
    code: Regex,
    link: Regex,
    bold_star: Regex,
    bold_underscore: Regex,
    italic_star: Regex,
    italic_underscore: Regex,
}

fn patterns() -> &'static InlinePatterns {
    static PATTERNS: OnceLock<InlinePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| InlinePatterns {
        code: Regex::new(r"`([^`]+)`").expect("inline code pattern"),
        link: Regex::new(r"\[([^\]]+)\]\([^)]*\)").expect("link pattern"),
        bold_star: Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"),
        bold_underscore: Regex::new(r"__(.+?)__").expect("bold pattern"),
        italic_star: Regex::new(r"\*([^*\s](?:[^*]*[^*\s])?)\*").expect("italic pattern"),
        italic_underscore: Regex::new(r"\b_([^_]+)_\b").expect("italic pattern"),
    })
}

/// Strip inline markers, keeping their inner text.
///
/// ```
/// use mdpage::layout::strip_inline;
///
/// assert_eq!(strip_inline("**bold** and `code`"), "bold and code");
/// assert_eq!(strip_inline("see [docs](https://example.com)"), "see docs");
/// ```
pub fn strip_inline(text: &str) -> String {
    if !text.contains(['*', '_', '`', '[']) {
        return text.to_string();
    }

    let p = patterns();
    let mut out = text.to_string();
    for re in [
        &p.code,
        &p.link,
        &p.bold_star,
        &p.bold_underscore,
        &p.italic_star,
        &p.italic_underscore,
    ] {
        out = re.replace_all(&out, "$1").into_owned();
    }
    out
}
