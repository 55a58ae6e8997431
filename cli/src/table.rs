// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

/// A column of a [`Table`] over rows of type `T`.
pub trait Column<T> {
    fn name(&self) -> Cow<'_, str>;
    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;
    fn padding_direction(&self) -> PaddingDirection;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// Plain text table with a bold header, cells padded to the widest one.
#[derive(Debug)]
pub struct Table<'a, T, C: Column<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'a str,
}

impl<'a, T, C: Column<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
        }
    }
}

impl<T, C: Column<T>> fmt::Display for Table<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<_> = self.columns.iter().map(|col| col.name()).collect();
        let rows: Vec<Vec<_>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let mut widths: Vec<_> = header.iter().map(|name| name.width()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        self.write_row(f, &header, &widths, true)?;
        for row in &rows {
            self.write_row(f, row, &widths, false)?;
        }
        Ok(())
    }
}

impl<T, C: Column<T>> Table<'_, T, C> {
    fn write_row(
        &self,
        f: &mut fmt::Formatter<'_>,
        cells: &[Cow<'_, str>],
        widths: &[usize],
        bold: bool,
    ) -> fmt::Result {
        let last = self.columns.len().saturating_sub(1);
        for (i, ((col, cell), width)) in self.columns.iter().zip(cells).zip(widths).enumerate() {
            let padded = pad(cell, *width, col.padding_direction(), i == last);
            if bold {
                write!(f, "{}", padded.bold())?;
            } else {
                write!(f, "{padded}")?;
            }
            if i < last {
                write!(f, "{}", self.separator)?;
            }
        }
        writeln!(f)
    }
}

/// Pad `cell` to `width` display columns, measured with `unicode-width`.
fn pad(cell: &str, width: usize, direction: PaddingDirection, last: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        // last column does not need trailing padding
        PaddingDirection::Left if last => cell.to_owned(),
        PaddingDirection::Left => format!("{cell}{fill}"),
        PaddingDirection::Right => format!("{fill}{cell}"),
    }
}
