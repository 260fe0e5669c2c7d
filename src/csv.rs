// src/csv.rs
use std::io::{self, Write};

use crate::config::FieldStyle;
use crate::engine::{DayId, MonthRange};

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Export-time transforms ---------------- */

/// `15-01-2020` → `15-jan-2020`. Dates that do not parse are kept as they are.
pub fn csv_date(day: &DayId) -> String {
    match day.to_date() {
        Some(d) => d.format("%d-%b-%Y").to_string().to_lowercase(),
        None => {
            logw!("Date '{day}' has an invalid format and will not be converted");
            s!(day.as_str())
        }
    }
}

/// Header row plus one row per range, dates rewritten for spreadsheets.
pub fn write_ranges<W: Write>(mut w: W, ranges: &[MonthRange], style: FieldStyle, sep: char) -> io::Result<()> {
    write_row(&mut w, &style.headers(), sep)?;
    for r in ranges {
        let row = [
            r.month_name.clone(),
            csv_date(&r.starting_date),
            csv_date(&r.ending_date),
        ];
        write_row(&mut w, &row, sep)?;
    }
    Ok(())
}
