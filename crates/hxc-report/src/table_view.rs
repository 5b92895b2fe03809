//! Titled console tables for the HXC Stats report.
//!
//! A table is a title, a dashed underline of the same length, one
//! `key : value` line per entry sorted by value (largest first), and a blank
//! separator.

use std::io::{self, Write};

use hxc_core::formatting::{
    format_entry, format_fraction, format_integer, format_percentage, underline,
};
use hxc_core::models::{Fraction, SurvivalRate};

/// How table values are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStyle {
    /// Whole number, rounded down.
    Integer,
    /// Whole percentage with a trailing `%`.
    Percentage,
    /// `numerator/denominator` in lowest terms.
    Fraction,
}

impl ValueStyle {
    pub fn format(self, value: &Fraction) -> String {
        match self {
            ValueStyle::Integer => format_integer(value),
            ValueStyle::Percentage => format_percentage(value),
            ValueStyle::Fraction => format_fraction(value),
        }
    }
}

/// A metric value that can be sorted and printed in a table.
pub trait TableValue {
    /// The value as an exact fraction, used for both ordering and display.
    fn as_fraction(&self) -> Fraction;
}

impl TableValue for i64 {
    fn as_fraction(&self) -> Fraction {
        Fraction::from(i128::from(*self))
    }
}

impl TableValue for i128 {
    fn as_fraction(&self) -> Fraction {
        Fraction::from(*self)
    }
}

impl TableValue for u64 {
    fn as_fraction(&self) -> Fraction {
        Fraction::from(i128::from(*self))
    }
}

impl TableValue for Fraction {
    fn as_fraction(&self) -> Fraction {
        *self
    }
}

impl TableValue for SurvivalRate {
    fn as_fraction(&self) -> Fraction {
        self.fraction()
    }
}

/// Entries ordered by value, largest first.
///
/// The sort is stable, so entries with equal values keep their input order.
pub fn sort_descending<V: TableValue>(entries: &[(String, V)]) -> Vec<(&str, Fraction)> {
    let mut rows: Vec<(&str, Fraction)> = entries
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_fraction()))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// Write one table to `out`.
pub fn render_table<W, V>(
    out: &mut W,
    title: &str,
    entries: &[(String, V)],
    style: ValueStyle,
) -> io::Result<()>
where
    W: Write + ?Sized,
    V: TableValue,
{
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", underline(title))?;

    for (key, value) in sort_descending(entries) {
        writeln!(out, "{}", format_entry(key, &style.format(&value)))?;
    }

    // Separator: two empty lines.
    writeln!(out, "\n")
}

/// Render one table into a `String`.
pub fn render_table_to_string<V: TableValue>(
    title: &str,
    entries: &[(String, V)],
    style: ValueStyle,
) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render_table(&mut buf, title, entries, style);
    String::from_utf8_lossy(&buf).into_owned()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
