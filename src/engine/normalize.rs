// src/engine/normalize.rs
//! Raw page markers → canonical [`Observation`]s.
//!
//! The caller says which extraction path ran by the variant it hands over;
//! nothing here guesses the strategy or cross-checks one against the other.
use chrono::NaiveDate;

use crate::core::sanitize::{parse_day, value_after_eq};
use crate::engine::types::{DayId, MonthSlot, Observation, Strategy};
use crate::error::ExtractError;

/// Strategy A page: month title plus the data-urls of the day-`1` cell and the
/// cell laid out before it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectMarkers {
    pub month_title: Option<String>,
    pub start_url: Option<String>,
    pub prev_end_url: Option<String>,
}

/// Strategy B: one new-moon cell. Day fields are raw attribute text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventMarker {
    pub event_day: String,
    pub next_name: Option<String>,
    pub next_day: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawExtraction {
    Direct(DirectMarkers),
    Events(Vec<EventMarker>),
}

impl RawExtraction {
    pub fn strategy(&self) -> Strategy {
        match self {
            RawExtraction::Direct(_) => Strategy::DirectMarker,
            RawExtraction::Events(_) => Strategy::EventDerived,
        }
    }
}

/// A direct page yields at most one observation; an event page one per event,
/// in page order. Unusable observations are still returned so the reporter
/// can name them.
pub fn normalize(slot: MonthSlot, raw: RawExtraction) -> Result<Vec<Observation>, ExtractError> {
    match raw {
        RawExtraction::Direct(m) => Ok(vec![from_direct(slot, m)]),
        RawExtraction::Events(events) => events
            .into_iter()
            .map(|e| from_event(slot, e))
            .collect(),
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn from_direct(slot: MonthSlot, m: DirectMarkers) -> Observation {
    let marker = |url: &Option<String>| url.as_deref().and_then(value_after_eq).map(DayId::from);
    Observation {
        year: slot.year,
        month: slot.month,
        start_marker: marker(&m.start_url),
        end_marker_of_previous: marker(&m.prev_end_url),
        period_name: non_blank(m.month_title),
        inferred_start: None,
        strategy: Strategy::DirectMarker,
    }
}

fn date_in(slot: MonthSlot, day: u32) -> Result<NaiveDate, ExtractError> {
    NaiveDate::from_ymd_opt(slot.year, slot.month, day).ok_or(ExtractError::BadDate {
        year: slot.year,
        month: slot.month,
        day,
    })
}

fn from_event(slot: MonthSlot, e: EventMarker) -> Result<Observation, ExtractError> {
    let event_day = parse_day(&e.event_day)?;
    let event = date_in(slot, event_day)?;

    let inferred_start = e.next_day.as_deref().map(|raw| neighbour_day(slot, event_day, raw));

    Ok(Observation {
        year: slot.year,
        month: slot.month,
        period_name: non_blank(e.next_name),
        start_marker: Some(DayId::from_date(event)),
        end_marker_of_previous: None,
        inferred_start,
        strategy: Strategy::EventDerived,
    })
}

/// Day of the cell the name was read from. A neighbour day that does not come
/// after the event can only belong to the following Gregorian month. A label
/// that is no date there is kept as written; the pairing audit flags it.
fn neighbour_day(slot: MonthSlot, event_day: u32, raw: &str) -> DayId {
    let month_of = |d: u32| if d > event_day { slot } else { slot.next() };
    match parse_day(raw).and_then(|d| date_in(month_of(d), d)) {
        Ok(date) => DayId::from_date(date),
        Err(e) => {
            logd!("{slot}: neighbour cell day '{raw}' kept as is: {e}");
            DayId::new(raw.trim())
        }
    }
}
