// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::config::FieldStyle;
use crate::csv::write_ranges;
use crate::engine::{DayId, MonthRange, Observation};
use crate::error::{Error, Result};

/// Snake-case view of a range, for `FieldStyle::Snake` output.
#[derive(Serialize)]
struct SnakeRange<'a> {
    month_name: &'a str,
    starting_date: &'a DayId,
    ending_date: &'a DayId,
}

/// Write the reconciled list as a pretty JSON array. An empty list still
/// produces a file (`[]`).
pub fn write_ranges_json(path: &Path, ranges: &[MonthRange], style: FieldStyle) -> Result<()> {
    let mut out = create_file(path)?;
    match style {
        FieldStyle::Camel => serde_json::to_writer_pretty(&mut out, ranges)?,
        FieldStyle::Snake => {
            let view: Vec<SnakeRange<'_>> = ranges
                .iter()
                .map(|r| SnakeRange {
                    month_name: &r.month_name,
                    starting_date: &r.starting_date,
                    ending_date: &r.ending_date,
                })
                .collect();
            serde_json::to_writer_pretty(&mut out, &view)?
        }
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Read a previously written list. Accepts either key style and reports which
/// one the file used (camel when the list is empty).
pub fn read_ranges_json(path: &Path) -> Result<(Vec<MonthRange>, FieldStyle)> {
    let text = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;

    let style = match value.as_array().and_then(|a| a.first()).and_then(|v| v.as_object()) {
        Some(obj) if obj.contains_key("month_name") => FieldStyle::Snake,
        _ => FieldStyle::Camel,
    };
    let ranges: Vec<MonthRange> = serde_json::from_value(value)?;
    Ok((ranges, style))
}

pub fn write_ranges_csv(path: &Path, ranges: &[MonthRange], style: FieldStyle) -> Result<()> {
    let mut out = create_file(path)?;
    write_ranges(&mut out, ranges, style, ',')?;
    out.flush()?;
    Ok(())
}

/// Raw collected observations, for inspecting what the pages actually gave.
pub fn write_observations(path: &Path, observations: &[Observation]) -> Result<()> {
    let mut out = create_file(path)?;
    serde_json::to_writer_pretty(&mut out, observations)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// `months.json` → `months.csv`. Without an explicit output the CSV lands in
/// the working directory under the input's stem. Returns the path written.
pub fn convert_json_to_csv(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let (ranges, style) = read_ranges_json(input)?;
    let path = match output {
        Some(p) => p.to_path_buf(),
        None => {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| s!("months"));
            PathBuf::from(join!(stem, ".csv"))
        }
    };
    write_ranges_csv(&path, &ranges, style)?;
    logf!("Converted {} range(s): {} -> {}", ranges.len(), input.display(), path.display());
    Ok(path)
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Format(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
