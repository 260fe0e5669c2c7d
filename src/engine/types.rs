// src/engine/types.rs
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format used for day-identifiers we generate ourselves.
pub const DAY_FORMAT: &str = "%d-%m-%Y";

/// Formats accepted when reading a day-identifier as a calendar date.
const DAY_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y"];

/// Which page-marker convention produced an observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// A: start/end markers read from adjacent calendar cells.
    DirectMarker,
    /// B: new-moon event day, with the next month's name from a neighbouring cell.
    EventDerived,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::DirectMarker => f.write_str("direct-marker"),
            Strategy::EventDerived => f.write_str("event-derived"),
        }
    }
}

/// One Gregorian (year, month) scrape target. Orders by year, then month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthSlot {
    pub year: i32,
    pub month: u32,
}

impl MonthSlot {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The calendar month right after this one.
    pub fn next(self) -> Self {
        if self.month >= 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }
}

impl fmt::Display for MonthSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Day-identifier as rendered by the source. Kept literally; read as a date
/// only when arithmetic or comparison needs it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayId(String);

impl DayId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DAY_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        let raw = self.0.trim();
        DAY_FORMATS
            .iter()
            .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DayId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// One page's calendar anchor, already normalized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub year: i32,
    pub month: u32,
    pub period_name: Option<String>,
    pub start_marker: Option<DayId>,
    pub end_marker_of_previous: Option<DayId>,
    /// Event-derived only: the day of the cell the period name was read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferred_start: Option<DayId>,
    pub strategy: Strategy,
}

impl Observation {
    pub fn slot(&self) -> MonthSlot {
        MonthSlot::new(self.year, self.month)
    }

    /// Without a name, or without any marker, nothing can be built from it.
    pub fn is_usable(&self) -> bool {
        self.period_name.is_some()
            && (self.start_marker.is_some() || self.end_marker_of_previous.is_some())
    }
}

/// Reconciled lunar month. Field order is fixed: name, start, end.
///
/// Reads both key styles the tool writes, plus the `EndingDate` key older
/// exports used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRange {
    #[serde(alias = "month_name")]
    pub month_name: String,
    #[serde(alias = "starting_date")]
    pub starting_date: DayId,
    #[serde(alias = "ending_date", alias = "EndingDate")]
    pub ending_date: DayId,
}
