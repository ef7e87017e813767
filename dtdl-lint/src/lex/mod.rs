//! JSON lexer module.
//!
//! Tokenizes JSON input using winnow, with byte-offset spans on every token.

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
