//! Span-carrying JSON value tree
//!
//! Parses a token stream into a value tree that mirrors the document's own
//! structure. Every node and every property-name token keeps its source
//! span; duplicate object keys are preserved in authored order. Both are
//! required for diagnostics positioning.

use crate::error::{LintError, Result};
use crate::lex::{tokenize, Token, TokenKind};

/// A property name with the span of its quoted key token.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyName {
    /// The unquoted key
    pub name: String,
    /// Start byte offset of the quoted key
    pub start: usize,
    /// End byte offset of the quoted key
    pub end: usize,
}

/// A JSON value with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonNode {
    /// The value itself
    pub value: JsonValue,
    /// Start byte offset
    pub start: usize,
    /// End byte offset
    pub end: usize,
}

/// JSON value kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// Object members in authored order; duplicate keys preserved
    Object(Vec<(PropertyName, JsonNode)>),
    /// Array elements in authored order
    Array(Vec<JsonNode>),
    /// String literal with escapes resolved
    String(String),
    /// Numeric literal; `raw` is the authored text
    Number { raw: String, value: f64 },
    /// Boolean literal
    Bool(bool),
    /// Null literal
    Null,
}

impl JsonNode {
    /// Object members, if this node is an object.
    pub fn as_object(&self) -> Option<&[(PropertyName, JsonNode)]> {
        match &self.value {
            JsonValue::Object(props) => Some(props),
            _ => None,
        }
    }

    /// Array elements, if this node is an array.
    pub fn as_array(&self) -> Option<&[JsonNode]> {
        match &self.value {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// String content, if this node is a string.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// First member with the given name, if this node is an object.
    pub fn property(&self, name: &str) -> Option<&JsonNode> {
        self.as_object()?
            .iter()
            .find(|(p, _)| p.name == name)
            .map(|(_, v)| v)
    }
}

/// Parse JSON text into a span-carrying value tree.
pub fn parse_document(text: &str) -> Result<JsonNode> {
    let mut parser = Parser {
        tokens: tokenize(text)?,
        pos: 0,
    };
    let node = parser.parse_value()?;
    parser.expect_eof()?;
    Ok(node)
}

/// JSON parser state.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Get the current token.
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Advance to the next token.
    fn advance(&mut self) -> &Token {
        let token = &self.tokens[self.pos];
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Consume a token of the expected kind, or return an error.
    fn expect(&mut self, kind: &TokenKind) -> Result<&Token> {
        if std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind) {
            Ok(self.advance())
        } else {
            Err(LintError::parse(
                self.current().start,
                format!("expected {:?}, found {:?}", kind, self.current().kind),
            ))
        }
    }

    fn expect_eof(&mut self) -> Result<()> {
        if self.current().is_eof() {
            Ok(())
        } else {
            Err(LintError::parse(
                self.current().start,
                format!("trailing content: {:?}", self.current().kind),
            ))
        }
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> Result<JsonNode> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::LBrace => self.parse_object(),
            TokenKind::LBracket => self.parse_array(),
            TokenKind::String(s) => {
                self.advance();
                Ok(JsonNode {
                    value: JsonValue::String(s),
                    start: token.start,
                    end: token.end,
                })
            }
            TokenKind::Number { raw, value } => {
                self.advance();
                Ok(JsonNode {
                    value: JsonValue::Number { raw, value },
                    start: token.start,
                    end: token.end,
                })
            }
            TokenKind::True => {
                self.advance();
                Ok(JsonNode {
                    value: JsonValue::Bool(true),
                    start: token.start,
                    end: token.end,
                })
            }
            TokenKind::False => {
                self.advance();
                Ok(JsonNode {
                    value: JsonValue::Bool(false),
                    start: token.start,
                    end: token.end,
                })
            }
            TokenKind::Null => {
                self.advance();
                Ok(JsonNode {
                    value: JsonValue::Null,
                    start: token.start,
                    end: token.end,
                })
            }
            TokenKind::Eof => Err(LintError::parse(token.start, "unexpected end of input")),
            other => Err(LintError::parse(
                token.start,
                format!("unexpected token {:?}", other),
            )),
        }
    }

    fn parse_object(&mut self) -> Result<JsonNode> {
        let start = self.current().start;
        self.advance(); // consume {

        let mut props = Vec::new();

        if matches!(self.current().kind, TokenKind::RBrace) {
            let end = self.advance().end;
            return Ok(JsonNode {
                value: JsonValue::Object(props),
                start,
                end,
            });
        }

        loop {
            let key_token = self.current().clone();
            let name = match key_token.kind {
                TokenKind::String(s) => s,
                other => {
                    return Err(LintError::parse(
                        key_token.start,
                        format!("expected property name, found {:?}", other),
                    ))
                }
            };
            self.advance();
            let property = PropertyName {
                name,
                start: key_token.start,
                end: key_token.end,
            };

            self.expect(&TokenKind::Colon)?;
            let value = self.parse_value()?;
            props.push((property, value));

            match &self.current().kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RBrace => {
                    let end = self.advance().end;
                    return Ok(JsonNode {
                        value: JsonValue::Object(props),
                        start,
                        end,
                    });
                }
                other => {
                    return Err(LintError::parse(
                        self.current().start,
                        format!("expected ',' or '}}', found {:?}", other),
                    ))
                }
            }
        }
    }

    fn parse_array(&mut self) -> Result<JsonNode> {
        let start = self.current().start;
        self.advance(); // consume [

        let mut items = Vec::new();

        if matches!(self.current().kind, TokenKind::RBracket) {
            let end = self.advance().end;
            return Ok(JsonNode {
                value: JsonValue::Array(items),
                start,
                end,
            });
        }

        loop {
            items.push(self.parse_value()?);

            match &self.current().kind {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RBracket => {
                    let end = self.advance().end;
                    return Ok(JsonNode {
                        value: JsonValue::Array(items),
                        start,
                        end,
                    });
                }
                other => {
                    return Err(LintError::parse(
                        self.current().start,
                        format!("expected ',' or ']', found {:?}", other),
                    ))
                }
            }
        }
    }
}
