// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for the parameter list of a content line.
//!
//! Only the part before the value colon is lexed, so colons never appear.

use std::fmt::Display;

use logos::Logos;

#[derive(Debug, PartialEq, Eq, Clone, Copy, logos::Logos)]
pub(crate) enum Token<'a> {
    /// Parameter names and unquoted values.
    #[regex(r#"[^;,="]+"#)]
    Word(&'a str),

    /// Semicolon (;)
    #[token(";")]
    Semi,

    /// Equal sign (=)
    #[token("=")]
    Eq,

    /// Comma (,)
    #[token(",")]
    Comma,

    /// Quoted strings (including quotes), may hold `;`, `,` and `=`.
    #[regex(r#""[^"]*""#)]
    Quoted(&'a str),
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Word(s) => write!(f, "Word({s})"),
            Token::Semi => write!(f, "Semi"),
            Token::Eq => write!(f, "Eq"),
            Token::Comma => write!(f, "Comma"),
            Token::Quoted(s) => write!(f, "Quoted({s})"),
        }
    }
}

pub(crate) fn lex<'a>(src: &'a str) -> logos::Lexer<'a, Token<'a>> {
    Token::lexer(src)
}
