//! Turtle token scanner.
//!
//! A single winnow pass over the input that dispatches on the first
//! character of each token, so no backtracking happens across token
//! kinds. Scanning stops at the first invalid token with an error
//! pointing into the source.

use std::sync::Arc;

use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::{AsChar, Location};
use winnow::token::{any, one_of, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::chars::{
    is_iri_char, is_local_continue, is_local_start, is_name_continue, is_name_start,
    is_name_start_u, is_ws,
};
use super::token::{Token, TokenKind};
use crate::error::{Result, TurtleError};

/// Scanner input, carrying byte offsets for spans.
pub type Input<'a> = LocatingSlice<&'a str>;

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

/// Tokenize a Turtle document.
///
/// Stops at the first invalid token; the error message carries line and
/// column plus the offending source line.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::new();

    loop {
        skip_trivia(&mut input);

        let start = input.current_token_start();
        let Some(first) = input.chars().next() else {
            tokens.push(Token::new(TokenKind::Eof, start, start));
            return Ok(tokens);
        };

        match scan_token(&mut input, first) {
            Ok(kind) => {
                let end = input.current_token_start();
                tokens.push(Token::new(kind, start, end));
            }
            Err(_) => return Err(scan_error(source, start, first)),
        }
    }
}

/// Skip whitespace and `#` line comments.
fn skip_trivia(input: &mut Input<'_>) {
    loop {
        let _: ModalResult<&str> = take_while(0.., is_ws).parse_next(input);
        if !input.starts_with('#') {
            break;
        }
        let _: ModalResult<&str> = take_till(0.., ['\n', '\r']).parse_next(input);
    }
}

/// Dispatch on the token's first character.
fn scan_token(input: &mut Input<'_>, first: char) -> ModalResult<TokenKind> {
    match first {
        '<' => scan_iri(input),
        '@' => scan_at_word(input),
        '"' | '\'' => scan_string(input),
        '^' => "^^".value(TokenKind::DoubleCaret).parse_next(input),
        '_' => scan_blank_label(input),
        ':' => {
            let _: char = ':'.parse_next(input)?;
            finish_pname(input, "")
        }
        '[' => {
            if opt(('[', take_while(0.., is_ws), ']'))
                .parse_next(input)?
                .is_some()
            {
                Ok(TokenKind::Anon)
            } else {
                '['.value(TokenKind::LBracket).parse_next(input)
            }
        }
        ']' => ']'.value(TokenKind::RBracket).parse_next(input),
        ',' => ','.value(TokenKind::Comma).parse_next(input),
        ';' => ';'.value(TokenKind::Semicolon).parse_next(input),
        '.' => {
            if digit_follows(input) {
                scan_numeric(input)
            } else {
                '.'.value(TokenKind::Dot).parse_next(input)
            }
        }
        '+' | '-' | '0'..='9' => scan_numeric(input),
        c if is_name_start(c) => scan_word(input),
        _ => Err(backtrack()),
    }
}

/// Error for the token starting at `offset`, classified by its first char.
fn scan_error(source: &str, offset: usize, first: char) -> TurtleError {
    let what = match first {
        '"' | '\'' => "unterminated string literal".to_string(),
        '<' => "invalid or unterminated IRI".to_string(),
        c => format!("unexpected character '{}'", c),
    };
    TurtleError::lexer_in(source, offset, what)
}

fn digit_follows(input: &Input<'_>) -> bool {
    input
        .as_ref()
        .as_bytes()
        .get(1)
        .is_some_and(u8::is_ascii_digit)
}

/// IRI reference: `<...>`
fn scan_iri(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('<', take_while(0.., is_iri_char), '>')
        .map(|body: &str| TokenKind::Iri(Arc::from(body)))
        .parse_next(input)
}

/// `@prefix`, `@base`, or a language tag.
fn scan_at_word(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let word: &str = preceded(
        '@',
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-'),
    )
    .parse_next(input)?;

    Ok(match word {
        "prefix" => TokenKind::KwPrefix,
        "base" => TokenKind::KwBase,
        tag => TokenKind::LangTag(Arc::from(tag)),
    })
}

/// Bare word: `a`, `true`, `false`, or the prefix part of a prefixed name.
fn scan_word(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let first: char = any.parse_next(input)?;
    let mut word = String::from(first);

    loop {
        let run: &str = take_while(0.., is_name_continue).parse_next(input)?;
        word.push_str(run);

        // Dots appear mid-name only (PN_PREFIX)
        if input.starts_with('.')
            && input.as_ref()[1..]
                .chars()
                .next()
                .is_some_and(is_name_continue)
        {
            let _: char = '.'.parse_next(input)?;
            word.push('.');
        } else {
            break;
        }
    }

    if opt(':').parse_next(input)?.is_some() {
        return finish_pname(input, &word);
    }

    match word.as_str() {
        "a" => Ok(TokenKind::KwA),
        "true" => Ok(TokenKind::KwTrue),
        "false" => Ok(TokenKind::KwFalse),
        _ => Err(backtrack()),
    }
}

/// After the colon of a prefixed name: optional local part.
fn finish_pname(input: &mut Input<'_>, prefix: &str) -> ModalResult<TokenKind> {
    match opt(scan_local_name).parse_next(input)? {
        Some(local) => Ok(TokenKind::PrefixedName {
            prefix: Arc::from(prefix),
            local: Arc::from(local.as_str()),
        }),
        None => Ok(TokenKind::PrefixedNameNs(Arc::from(prefix))),
    }
}

/// PN_LOCAL: dots mid-name only, `%XX` escapes kept verbatim.
fn scan_local_name(input: &mut Input<'_>) -> ModalResult<String> {
    match input.chars().next() {
        Some(c) if is_local_start(c) || c == '%' => {}
        _ => return Err(backtrack()),
    }

    let mut name = String::new();
    loop {
        let run: &str = take_while(0.., is_local_continue).parse_next(input)?;
        name.push_str(run);

        if input.starts_with('.') && continues_local(input) {
            let _: char = '.'.parse_next(input)?;
            name.push('.');
        } else if input.starts_with('%') {
            let esc: &str = ('%', take_while(2..=2, AsChar::is_hex_digit))
                .take()
                .parse_next(input)?;
            name.push_str(esc);
        } else {
            break;
        }
    }

    if name.is_empty() {
        Err(backtrack())
    } else {
        Ok(name)
    }
}

fn continues_local(input: &Input<'_>) -> bool {
    input.as_ref()[1..]
        .chars()
        .next()
        .is_some_and(|c| is_local_continue(c) || c == '%')
}

/// Blank node label: `_:name`
fn scan_blank_label(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded(
        "_:",
        (
            one_of(|c: char| is_name_start_u(c) || c.is_ascii_digit()),
            take_while(0.., is_name_continue),
        )
            .take(),
    )
    .map(|label: &str| TokenKind::BlankNodeLabel(Arc::from(label)))
    .parse_next(input)
}

/// Quoted string with backslash escapes. The opening quote character
/// also closes the string.
fn scan_string(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let quote: char = one_of(['"', '\'']).parse_next(input)?;
    let mut text = String::new();

    loop {
        let run: &str = take_till(0.., move |c: char| {
            c == quote || c == '\\' || c == '\n' || c == '\r'
        })
        .parse_next(input)?;
        text.push_str(run);

        match input.chars().next() {
            Some(c) if c == quote => {
                let _: char = any.parse_next(input)?;
                return Ok(TokenKind::String(Arc::from(text)));
            }
            Some('\\') => {
                let _: char = any.parse_next(input)?;
                text.push(unescape(input)?);
            }
            _ => return Err(backtrack()),
        }
    }
}

/// The character after a backslash.
fn unescape(input: &mut Input<'_>) -> ModalResult<char> {
    let tag: char = any.parse_next(input)?;
    match tag {
        't' => Ok('\t'),
        'b' => Ok('\x08'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        'f' => Ok('\x0C'),
        '"' => Ok('"'),
        '\'' => Ok('\''),
        '\\' => Ok('\\'),
        'u' => hex_char(input, 4),
        'U' => hex_char(input, 8),
        _ => Err(backtrack()),
    }
}

fn hex_char(input: &mut Input<'_>, digits: usize) -> ModalResult<char> {
    let hex: &str = take_while(digits..=digits, AsChar::is_hex_digit).parse_next(input)?;
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(backtrack)
}

/// Integer, decimal, or double, keeping the written form.
///
/// A trailing `.` with no digit after it is not consumed, so `1.` lexes
/// as an integer followed by the statement terminator.
fn scan_numeric(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (
        opt(one_of(['+', '-'])),
        alt((
            ('.', digit1, opt(exponent)).take(),
            (digit1, '.', digit1, opt(exponent)).take(),
            (digit1, '.', exponent).take(),
            (digit1, opt(exponent)).take(),
        )),
    )
        .take()
        .parse_next(input)?;

    Ok(classify_numeric(text))
}

fn exponent<'a>(input: &mut Input<'a>) -> ModalResult<&'a str> {
    (one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)
        .take()
        .parse_next(input)
}

fn classify_numeric(text: &str) -> TokenKind {
    let lexical = Arc::from(text);
    if text.contains(['e', 'E']) {
        TokenKind::Double(lexical)
    } else if text.contains('.') {
        TokenKind::Decimal(lexical)
    } else {
        TokenKind::Integer(lexical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut out: Vec<_> = tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(out.pop(), Some(TokenKind::Eof));
        out
    }

    fn pname(prefix: &str, local: &str) -> TokenKind {
        TokenKind::PrefixedName {
            prefix: Arc::from(prefix),
            local: Arc::from(local),
        }
    }

    #[test]
    fn scans_iris_and_prefixed_names() {
        assert_eq!(
            kinds("<http://www.w3.org/ns/r2rml#>"),
            vec![TokenKind::Iri(Arc::from("http://www.w3.org/ns/r2rml#"))]
        );
        assert_eq!(kinds("rr:template"), vec![pname("rr", "template")]);
        assert_eq!(kinds("rr:"), vec![TokenKind::PrefixedNameNs(Arc::from("rr"))]);
    }

    #[test]
    fn scans_default_namespace_forms() {
        assert_eq!(kinds(":machine"), vec![pname("", "machine")]);
        assert_eq!(kinds(":"), vec![TokenKind::PrefixedNameNs(Arc::from(""))]);
    }

    #[test]
    fn scans_keywords_and_directives() {
        assert_eq!(kinds("a"), vec![TokenKind::KwA]);
        assert_eq!(kinds("true false"), vec![TokenKind::KwTrue, TokenKind::KwFalse]);
        assert_eq!(kinds("@prefix"), vec![TokenKind::KwPrefix]);
        assert_eq!(kinds("@base"), vec![TokenKind::KwBase]);
        assert_eq!(kinds("@en-US"), vec![TokenKind::LangTag(Arc::from("en-US"))]);
    }

    #[test]
    fn scans_blank_node_forms() {
        assert_eq!(
            kinds("_:row7"),
            vec![TokenKind::BlankNodeLabel(Arc::from("row7"))]
        );
        assert_eq!(kinds("[]"), vec![TokenKind::Anon]);
        assert_eq!(kinds("[ ]"), vec![TokenKind::Anon]);
        assert_eq!(
            kinds("[ ;"),
            vec![TokenKind::LBracket, TokenKind::Semicolon]
        );
    }

    #[test]
    fn scans_string_escapes() {
        assert_eq!(
            kinds(r#""tab\there""#),
            vec![TokenKind::String(Arc::from("tab\there"))]
        );
        assert_eq!(
            kinds(r#""say \"hi\"""#),
            vec![TokenKind::String(Arc::from("say \"hi\""))]
        );
        assert_eq!(
            kinds("'single'"),
            vec![TokenKind::String(Arc::from("single"))]
        );
    }

    #[test]
    fn template_braces_survive_inside_strings() {
        assert_eq!(
            kinds(r#""http://example.org/machine/{id}""#),
            vec![TokenKind::String(Arc::from("http://example.org/machine/{id}"))]
        );
    }

    #[test]
    fn numeric_tokens_keep_written_form() {
        assert_eq!(kinds("042"), vec![TokenKind::Integer(Arc::from("042"))]);
        assert_eq!(kinds("-7"), vec![TokenKind::Integer(Arc::from("-7"))]);
        assert_eq!(kinds("3.14"), vec![TokenKind::Decimal(Arc::from("3.14"))]);
        assert_eq!(kinds(".5"), vec![TokenKind::Decimal(Arc::from(".5"))]);
        assert_eq!(kinds("1e10"), vec![TokenKind::Double(Arc::from("1e10"))]);
        assert_eq!(kinds("1.5E-3"), vec![TokenKind::Double(Arc::from("1.5E-3"))]);
    }

    #[test]
    fn integer_before_statement_dot() {
        // `1.` is an integer then the terminator, not a broken decimal
        assert_eq!(
            kinds("ex:age 1."),
            vec![
                pname("ex", "age"),
                TokenKind::Integer(Arc::from("1")),
                TokenKind::Dot,
            ]
        );
    }

    #[test]
    fn scans_punctuation() {
        assert_eq!(
            kinds(". ; , ^^"),
            vec![
                TokenKind::Dot,
                TokenKind::Semicolon,
                TokenKind::Comma,
                TokenKind::DoubleCaret,
            ]
        );
    }

    #[test]
    fn skips_comments_between_tokens() {
        assert_eq!(
            kinds("rr:column # which column to read\n\"name\""),
            vec![pname("rr", "column"), TokenKind::String(Arc::from("name"))]
        );
    }

    #[test]
    fn rejects_stray_characters_with_position() {
        let msg = tokenize("rr:column $ .").unwrap_err().to_string();
        assert!(msg.contains("unexpected character '$'"));
        assert!(msg.contains("line 1, column 11"));
    }

    #[test]
    fn reports_errors_on_the_right_line() {
        let msg = tokenize("ex:a ex:b \"ok\" .\nex:c ex:d \"open")
            .unwrap_err()
            .to_string();
        assert!(msg.contains("unterminated string literal"));
        assert!(msg.contains("line 2"));
    }
}
