//! Character classes from the Turtle grammar.
//!
//! Covers the name productions (PN_CHARS_BASE, PN_CHARS_U, PN_CHARS,
//! PN_LOCAL) plus whitespace and IRI body characters.

/// Non-ASCII letter ranges of PN_CHARS_BASE.
const LETTER_RANGES: &[(u32, u32)] = &[
    (0x00C0, 0x00D6),
    (0x00D8, 0x00F6),
    (0x00F8, 0x02FF),
    (0x0370, 0x037D),
    (0x037F, 0x1FFF),
    (0x200C, 0x200D),
    (0x2070, 0x218F),
    (0x2C00, 0x2FEF),
    (0x3001, 0xD7FF),
    (0xF900, 0xFDCF),
    (0xFDF0, 0xFFFD),
    (0x10000, 0xEFFFF),
];

/// PN_CHARS_BASE: a character that can open a name.
pub fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic()
        || LETTER_RANGES
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&(c as u32)))
}

/// PN_CHARS_U: name start or underscore.
pub fn is_name_start_u(c: char) -> bool {
    c == '_' || is_name_start(c)
}

/// PN_CHARS: a character that can continue a name.
pub fn is_name_continue(c: char) -> bool {
    is_name_start_u(c)
        || c.is_ascii_digit()
        || matches!(c, '-' | '\u{00B7}')
        || matches!(c as u32, 0x0300..=0x036F | 0x203F..=0x2040)
}

/// First character of a PN_LOCAL (digits and a leading colon are legal).
pub fn is_local_start(c: char) -> bool {
    is_name_start_u(c) || c == ':' || c.is_ascii_digit()
}

/// Continuation character of a PN_LOCAL (colon allowed mid-name).
pub fn is_local_continue(c: char) -> bool {
    is_name_continue(c) || c == ':'
}

/// Turtle whitespace.
pub fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// A character legal inside `<...>` without escaping.
pub fn is_iri_char(c: char) -> bool {
    c > '\x20' && !matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}
