//! Selector namespacing
//!
//! A narrow textual rewrite, not a stylesheet parser. Two patterns are
//! recognised, scanning left to right:
//!
//! - a selector definition: `.` followed by an identifier, where the rest of
//!   the line is empty, a single character other than `;`, a quote or a
//!   digit, or starts with `{`;
//! - an extend target: `@extend` followed by whitespace, `.` and an
//!   identifier.
//!
//! Both get the identifier prefixed with `#{$__<token>__namespace__}`. The
//! prefixed form starts with `.#{`, which neither pattern matches, so
//! rewriting already namespaced text leaves it unchanged.
//!
//! Isolation is partial. A class followed by more selector text on the same
//! line is not treated as a definition, so `.foo:hover {`, `.foo, .bar {`
//! and `.foo > .bar {` all leave `.foo` unprefixed.

use std::sync::LazyLock;

use regex::Regex;

/// Characters that cannot appear in a namespace token.
const ILLEGAL_TOKEN_CHARS: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '.', '/', ':', ';', '<', '=',
    '>', '?', '@', '[', ']', '^', '{', '|', '}', '~',
];

/// Token used when a package name has no legal characters at all.
pub const FALLBACK_TOKEN: &str = "package";

static SELECTOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<extend>@extend\s+)\.(?P<extended>-?[_a-zA-Z][A-Za-z0-9_-]*)|\.(?P<selector>-?[_a-zA-Z][A-Za-z0-9_-]*)",
    )
    .expect("Invalid selector regex")
});

/// Derive the namespace token for a package name.
///
/// ```
/// use diamond_style::namespace_token;
///
/// assert_eq!(namespace_token("@acme/ui.grid"), "acmeuigrid");
/// assert_eq!(namespace_token("@/."), "package");
/// ```
pub fn namespace_token(name: &str) -> String {
    let token: String = name
        .chars()
        .filter(|c| !ILLEGAL_TOKEN_CHARS.contains(c))
        .collect();

    if token.is_empty() {
        FALLBACK_TOKEN.to_string()
    } else {
        token
    }
}

/// The text that replaces the leading `.` of a namespaced selector.
pub fn selector_prefix(token: &str) -> String {
    format!(".#{{$__{}__namespace__}}", token)
}

/// Whether the text following a selector identifier, up to the end of its
/// line, marks a selector definition.
fn defines_selector(rest: &str) -> bool {
    let line = rest.split('\n').next().unwrap_or_default();
    let trailing = line.trim();
    let mut chars = trailing.chars();

    match (chars.next(), chars.next()) {
        (None, _) | (Some('{'), _) => true,
        (Some(c), None) => !matches!(c, ';' | '"' | '\'') && !c.is_ascii_digit(),
        _ => false,
    }
}

/// Prefix every selector definition and `@extend` target in `text`.
///
/// # Example
/// ```
/// use diamond_style::rewrite_selectors;
///
/// let scss = ".card {\n  @extend .panel;\n}\n";
/// assert_eq!(
///     rewrite_selectors(scss, "ui"),
///     ".#{$__ui__namespace__}card {\n  @extend .#{$__ui__namespace__}panel;\n}\n"
/// );
/// ```
pub fn rewrite_selectors(text: &str, token: &str) -> String {
    let prefix = selector_prefix(token);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in SELECTOR_REGEX.captures_iter(text) {
        if let (Some(keyword), Some(target)) = (caps.name("extend"), caps.name("extended")) {
            out.push_str(&text[last..keyword.start()]);
            out.push_str(keyword.as_str());
            out.push_str(&prefix);
            out.push_str(target.as_str());
            last = target.end();
        } else if let Some(selector) = caps.name("selector") {
            if !defines_selector(&text[selector.end()..]) {
                continue;
            }
            // The match starts at the dot, one byte before the identifier.
            out.push_str(&text[last..selector.start() - 1]);
            out.push_str(&prefix);
            out.push_str(selector.as_str());
            last = selector.end();
        }
    }

    out.push_str(&text[last..]);
    out
}
