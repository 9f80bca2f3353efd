//! # Offer Table
//!
//! Plain-text tabular rendering of offers.
//!
//! Columns are left-aligned and separated by at least two spaces; the last
//! column is never padded.

use crate::domain::entities::Offer;
use std::io::{self, Write};

/// Longest title rendered, in characters.
pub const MAX_TITLE_CHARS: usize = 60;

/// Space between columns.
const COLUMN_GAP: usize = 2;

const HEADERS: [&str; 4] = ["Title", "Price", "Retailer", "URL"];

/// Writes `offers` to `out` as a table with a header row.
///
/// # Errors
///
/// Returns any I/O error raised by `out`.
pub fn render_table<W: Write>(out: &mut W, offers: &[Offer]) -> io::Result<()> {
    let rows: Vec<[String; 4]> = offers.iter().map(row).collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &HEADERS.map(str::to_string), &widths)?;
    for cells in &rows {
        write_row(out, cells, &widths)?;
    }
    out.flush()
}

fn row(offer: &Offer) -> [String; 4] {
    [
        offer.title().chars().take(MAX_TITLE_CHARS).collect(),
        format!("${:.2}", offer.price()),
        offer
            .retailer()
            .map_or_else(|| "-".to_string(), |retailer| retailer.to_string()),
        offer.url().to_string(),
    ]
}

fn write_row<W: Write>(out: &mut W, cells: &[String; 4], widths: &[usize; 4]) -> io::Result<()> {
    let last = cells.len() - 1;
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        if i == last {
            write!(out, "{}", cell)?;
        } else {
            let pad = width - cell.chars().count() + COLUMN_GAP;
            write!(out, "{}{:pad$}", cell, "", pad = pad)?;
        }
    }
    writeln!(out)
}
