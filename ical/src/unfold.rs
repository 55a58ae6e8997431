// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Physical line splitting and RFC 5545 line unfolding.
//!
//! Physical lines end at `\n`, `\r\n` or a lone `\r`. A physical line that
//! starts with a single space or tab continues the previous logical line,
//! with exactly that one character removed.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// A logical line, remembering the physical line it started on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogicalLine {
    pub number: usize,
    pub text: String,
}

/// Output of [`Unfold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Unfolded {
    /// A complete logical line.
    Line(LogicalLine),

    /// A continuation line with nothing to continue, dropped.
    Orphan(usize),
}

/// Split text into physical lines.
pub(crate) fn physical_lines(src: &str) -> PhysicalLines<'_> {
    PhysicalLines { rest: src }
}

#[derive(Debug, Clone)]
pub(crate) struct PhysicalLines<'src> {
    rest: &'src str,
}

impl<'src> Iterator for PhysicalLines<'src> {
    type Item = &'src str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let Some(end) = self.rest.find(['\r', '\n']) else {
            // last line, no terminator
            let line = self.rest;
            self.rest = "";
            return Some(line);
        };

        let (line, tail) = self.rest.split_at(end);
        self.rest = tail
            .strip_prefix("\r\n")
            .or_else(|| tail.strip_prefix(['\r', '\n']))
            .unwrap_or(tail);
        Some(line)
    }
}

/// Physical lines read from a byte stream.
///
/// Invalid UTF-8 is replaced by U+FFFD. Neither `\r` nor `\n` occur inside a
/// multi-byte sequence, so splitting on them first is safe.
#[derive(Debug)]
pub(crate) struct ReaderLines<R> {
    reader: R,
    buf: Vec<u8>,
    queue: VecDeque<String>,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    fn fill(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }

        let mut chunk = self.buf.as_slice();
        if let Some(stripped) = chunk.strip_suffix(b"\n") {
            chunk = stripped;
        }
        if let Some(stripped) = chunk.strip_suffix(b"\r") {
            chunk = stripped;
        }
        self.queue.extend(
            chunk
                .split(|&b| b == b'\r')
                .map(|line| String::from_utf8_lossy(line).into_owned()),
        );
        Ok(true)
    }
}

impl<R: BufRead> Iterator for ReaderLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.queue.pop_front() {
                return Some(Ok(line));
            }
            match self.fill() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Join continuation lines onto their logical line.
#[derive(Debug)]
pub(crate) struct Unfold<I> {
    lines: I,
    number: usize,
    pending: Option<LogicalLine>,
}

impl<I> Unfold<I> {
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            number: 0,
            pending: None,
        }
    }
}

impl<I, S> Iterator for Unfold<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Unfolded;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(physical) = self.lines.next() else {
                return self.pending.take().map(Unfolded::Line);
            };
            self.number += 1;
            let physical = physical.as_ref();

            if let Some(continuation) = physical.strip_prefix([' ', '\t']) {
                match &mut self.pending {
                    Some(line) => line.text.push_str(continuation),
                    None => return Some(Unfolded::Orphan(self.number)),
                }
            } else {
                let line = LogicalLine {
                    number: self.number,
                    text: physical.to_owned(),
                };
                if let Some(done) = self.pending.replace(line) {
                    return Some(Unfolded::Line(done));
                }
            }
        }
    }
}
