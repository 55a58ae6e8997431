// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Escaping of TEXT property values.
//!
//! Only the newline and the comma are escaped. Backslashes and semicolons are
//! passed through untouched in both directions, so the pair is symmetric for
//! everything the encoder produces.

use std::borrow::Cow;

/// Decode `\n` into a newline and `\,` into a comma.
#[must_use]
pub fn unescape(value: &str) -> Cow<'_, str> {
    if value.contains('\\') {
        Cow::Owned(value.replace("\\n", "\n").replace("\\,", ","))
    } else {
        Cow::Borrowed(value)
    }
}

/// Encode newlines as `\n` and commas as `\,`.
///
/// Carriage returns, alone or before a newline, are encoded as `\n` too; a
/// raw one would terminate the physical line.
#[must_use]
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['\n', '\r', ',']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            ',' => out.push_str("\\,"),
            ch => out.push(ch),
        }
    }
    Cow::Owned(out)
}
