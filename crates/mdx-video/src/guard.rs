//! Context checks applied before any recognizer may match
//!
//! Code spans, markdown links, autolinks and raw HTML tags are consumed whole
//! by the host's own inline rules, so recognizers never start inside them.
//! What is left for us is the character immediately before a candidate URL:
//! an opening parenthesis or quote means the URL is already a link target or
//! an attribute value, and an unescaped backslash means the author asked for
//! literal text.

/// Characters that may never precede a recognized URL
pub const LINK_CONTEXT: &[char] = &['(', '"'];

/// Character immediately before byte offset `pos`, if any
pub fn preceding_char(src: &str, pos: usize) -> Option<char> {
    src.get(..pos)?.chars().next_back()
}

/// Whether the text at `pos` is preceded by an odd run of backslashes
pub fn is_escaped(src: &str, pos: usize) -> bool {
    let Some(before) = src.get(..pos) else {
        return false;
    };
    let run = before.chars().rev().take_while(|&c| c == '\\').count();
    run % 2 == 1
}

/// Whether a recognizer may start matching at `pos`
///
/// `forbidden` lists the leading characters the recognizer rejects on top of
/// escapes.
pub fn allows(src: &str, pos: usize, forbidden: &[char]) -> bool {
    if is_escaped(src, pos) {
        return false;
    }
    match preceding_char(src, pos) {
        Some(c) => !forbidden.contains(&c),
        None => true,
    }
}
