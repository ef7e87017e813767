//! JSON lexer implementation using winnow.
//!
//! Tokenizes JSON input into a stream of tokens with source spans.
//! Fails fast on the first lexical error with a clear, actionable message.

use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, opt};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::{AsChar, Location};
use winnow::token::{any, one_of, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::token::{Token, TokenKind};
use crate::error::{LintError, Result};

/// Input type for the lexer - tracks position for spans.
pub type Input<'a> = LocatingSlice<&'a str>;

/// Lexer for JSON documents.
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    /// Tokenize the entire input.
    ///
    /// Returns an error immediately on the first invalid token, providing
    /// a clear error message with line/column and source context.
    pub fn tokenize(self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut input = LocatingSlice::new(self.input);

        loop {
            skip_ws(&mut input);

            if input.is_empty() {
                let pos = input.current_token_start();
                tokens.push(Token::new(TokenKind::Eof, pos, pos));
                break;
            }

            let start = input.current_token_start();

            match next_token(&mut input) {
                Ok(kind) => {
                    let end = input.current_token_start();
                    tokens.push(Token::new(kind, start, end));
                }
                Err(_) => {
                    return Err(self.make_error(start, &input));
                }
            }
        }

        Ok(tokens)
    }

    /// Create a descriptive error message for an invalid token.
    fn make_error(&self, position: usize, input: &Input<'_>) -> LintError {
        let remaining = input.as_ref();
        let bad_char = remaining.chars().next().unwrap_or('?');

        let (line, col) = self.line_col(position);
        let line_content = self.get_line(line);

        let pointer = " ".repeat(col.saturating_sub(1));
        let message = if bad_char == '"' {
            format!(
                "unterminated string literal at line {}, column {}\n  |\n{} | {}\n  | {}^",
                line, col, line, line_content, pointer
            )
        } else {
            format!(
                "unexpected character '{}' at line {}, column {}\n  |\n{} | {}\n  | {}^",
                bad_char, line, col, line, line_content, pointer
            )
        };

        LintError::Lexer { position, message }
    }

    /// Convert a byte position to (line, column), 1-indexed.
    fn line_col(&self, position: usize) -> (usize, usize) {
        let mut line = 1;
        let mut col = 1;

        for (i, c) in self.input.char_indices() {
            if i >= position {
                break;
            }
            if c == '\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }

        (line, col)
    }

    /// Get the content of a specific line (1-indexed).
    fn get_line(&self, line_num: usize) -> &str {
        self.input
            .lines()
            .nth(line_num.saturating_sub(1))
            .unwrap_or("")
    }
}

/// Skip insignificant whitespace.
fn skip_ws(input: &mut Input<'_>) {
    let _: ModalResult<&str, ContextError> = take_while(0.., is_ws).parse_next(input);
}

fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Parse the next token.
fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        parse_string,
        parse_number,
        parse_keyword,
        parse_punctuation,
    ))
    .parse_next(input)
}

// =============================================================================
// Strings
// =============================================================================

/// Parse a string literal: `"..."` with JSON escapes.
fn parse_string(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('"', parse_string_content, '"')
        .map(TokenKind::String)
        .parse_next(input)
}

fn parse_string_content(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();

    loop {
        let chunk: &str = take_while(0.., |c| c != '"' && c != '\\' && c != '\n' && c != '\r')
            .parse_next(input)?;
        result.push_str(chunk);

        if input.is_empty() || input.starts_with('"') {
            break;
        }

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            let escaped = parse_escape_char(input)?;
            result.push(escaped);
        } else {
            // Raw control character inside the literal
            break;
        }
    }

    Ok(result)
}

fn parse_escape_char(input: &mut Input<'_>) -> ModalResult<char> {
    let c: char = any.parse_next(input)?;
    match c {
        't' => Ok('\t'),
        'b' => Ok('\x08'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        'f' => Ok('\x0C'),
        '"' => Ok('"'),
        '/' => Ok('/'),
        '\\' => Ok('\\'),
        'u' => parse_unicode_escape(input),
        _ => Err(ErrMode::Backtrack(ContextError::new())),
    }
}

/// Parse the hex digits of a `\uXXXX` escape (the `\u` is already
/// consumed), combining a surrogate pair into a single character.
fn parse_unicode_escape(input: &mut Input<'_>) -> ModalResult<char> {
    let code = parse_hex4(input)?;

    if (0xD800..0xDC00).contains(&code) {
        // High surrogate: a low surrogate escape must follow.
        "\\u".parse_next(input)?;
        let low = parse_hex4(input)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(ErrMode::Backtrack(ContextError::new()));
        }
        let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(combined).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
    } else {
        char::from_u32(code).ok_or_else(|| ErrMode::Backtrack(ContextError::new()))
    }
}

fn parse_hex4(input: &mut Input<'_>) -> ModalResult<u32> {
    let hex: &str = take_while(4..=4, AsChar::is_hex_digit).parse_next(input)?;
    if hex.len() != 4 {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    u32::from_str_radix(hex, 16).map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

// =============================================================================
// Numbers
// =============================================================================

/// Parse a numeric literal, retaining the raw source text.
fn parse_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let raw: &str = (
        opt(one_of(['-'])),
        digit1,
        opt(('.', digit1)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)?;

    let value = raw
        .parse::<f64>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))?;

    Ok(TokenKind::Number {
        raw: raw.to_string(),
        value,
    })
}

// =============================================================================
// Keywords and punctuation
// =============================================================================

fn parse_keyword(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        "true".value(TokenKind::True),
        "false".value(TokenKind::False),
        "null".value(TokenKind::Null),
    ))
    .parse_next(input)
}

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let c: char = one_of(['{', '}', '[', ']', ':', ',']).parse_next(input)?;
    let kind = match c {
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        ':' => TokenKind::Colon,
        ',' => TokenKind::Comma,
        _ => return Err(ErrMode::Backtrack(ContextError::new())),
    };
    Ok(kind)
}

/// Tokenize JSON input into a vector of tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}
