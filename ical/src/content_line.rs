// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tokenizing of one unfolded content line into name, parameters and value.

use crate::lexer::{Token, lex};

/// One content line, `NAME[;PARAM=...]:VALUE`.
///
/// The line is split at its first colon, the name is everything before the
/// first semicolon of the part before it. Parameter text is kept raw and
/// only lexed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentLine<'src> {
    /// Property name as written.
    pub name: &'src str,

    /// Raw parameter list, without the leading semicolon.
    pub params: &'src str,

    /// Value, verbatim.
    pub value: &'src str,
}

impl<'src> ContentLine<'src> {
    /// Split a logical line, `None` if it holds no colon.
    #[must_use]
    pub fn parse(line: &'src str) -> Option<Self> {
        let (key, value) = line.split_once(':')?;
        let (name, params) = key.split_once(';').unwrap_or((key, ""));
        Some(Self {
            name,
            params,
            value,
        })
    }

    /// Lex the parameter list.
    ///
    /// Lexing stops at the first malformed parameter; the ones before it are
    /// returned.
    #[must_use]
    pub fn parameters(&self) -> Vec<Parameter<'src>> {
        let mut params = Vec::new();
        let mut tokens = lex(self.params);

        'outer: loop {
            let name = match tokens.next() {
                Some(Ok(Token::Word(name))) => name,
                None => break,
                Some(Ok(token)) => {
                    tracing::trace!(%token, params = self.params, "unexpected token in parameters");
                    break;
                }
                Some(Err(())) => break,
            };
            if tokens.next() != Some(Ok(Token::Eq)) {
                break;
            }

            let mut values = Vec::new();
            loop {
                match tokens.next() {
                    Some(Ok(Token::Word(value))) => values.push(value),
                    Some(Ok(Token::Quoted(value))) => values.push(unquote(value)),
                    _ => break 'outer,
                }
                match tokens.next() {
                    Some(Ok(Token::Comma)) => {}
                    Some(Ok(Token::Semi)) => break,
                    None => {
                        params.push(Parameter { name, values });
                        break 'outer;
                    }
                    _ => break 'outer,
                }
            }
            params.push(Parameter { name, values });
        }
        params
    }

    /// Values of the first parameter called `name`, compared case-insensitively.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<Parameter<'src>> {
        self.parameters()
            .into_iter()
            .find(|param| param.name.eq_ignore_ascii_case(name))
    }
}

/// A property parameter, `NAME=VALUE[,VALUE...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter<'src> {
    /// Parameter name as written.
    pub name: &'src str,

    /// Values, quotes removed.
    pub values: Vec<&'src str>,
}

fn unquote(quoted: &str) -> &str {
    quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(quoted)
}
