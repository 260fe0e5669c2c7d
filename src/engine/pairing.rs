// src/engine/pairing.rs
//! Pairing rules: how two neighbouring observations become one month range.
//!
//! The builder owns the walk, the gap policy and the reporting; a rule only
//! answers "are these two adjacent?" and "what range do they make?".
use crate::engine::report::Diagnostic;
use crate::engine::types::{DayId, MonthRange, Observation, Strategy};

/// Upper bound on the distance between consecutive new-moon days. A larger
/// step means an event page is missing.
pub const LUNATION_MAX_DAYS: i64 = 31;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjacency {
    Adjacent,
    Gap,
    Duplicate,
}

pub trait PairingRule {
    fn strategy(&self) -> Strategy;

    /// Whether `next` directly follows `current` in calendar time.
    fn adjacency(&self, current: &Observation, next: &Observation) -> Adjacency;

    /// Build the range for `current`, closed by `next`. A missing field comes
    /// back as the diagnostic naming the side it is missing on.
    fn pair(&self, current: &Observation, next: &Observation) -> Result<MonthRange, Diagnostic>;

    /// Warning about a range that was built anyway.
    fn audit(&self, _current: &Observation, _range: &MonthRange) -> Option<Diagnostic> {
        None
    }
}

pub fn rule_for(strategy: Strategy) -> &'static dyn PairingRule {
    match strategy {
        Strategy::DirectMarker => &DirectMarkerPairing,
        Strategy::EventDerived => &EventDerivedPairing,
    }
}

fn missing(o: &Observation, field: &'static str) -> Diagnostic {
    Diagnostic::Incomplete { slot: o.slot(), field }
}

/* ---------------- A: direct markers ---------------- */

/// Name and start from this page, end from the next page's "previous month
/// ended" marker.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectMarkerPairing;

impl PairingRule for DirectMarkerPairing {
    fn strategy(&self) -> Strategy {
        Strategy::DirectMarker
    }

    fn adjacency(&self, current: &Observation, next: &Observation) -> Adjacency {
        let (a, b) = (current.slot(), next.slot());
        if a == b {
            Adjacency::Duplicate
        } else if a.next() == b {
            Adjacency::Adjacent
        } else {
            Adjacency::Gap
        }
    }

    fn pair(&self, current: &Observation, next: &Observation) -> Result<MonthRange, Diagnostic> {
        let name = current.period_name.as_ref().ok_or_else(|| missing(current, "periodName"))?;
        let start = current.start_marker.as_ref().ok_or_else(|| missing(current, "startMarker"))?;
        let end = next
            .end_marker_of_previous
            .as_ref()
            .ok_or_else(|| missing(next, "endMarkerOfPrevious"))?;
        Ok(MonthRange {
            month_name: name.clone(),
            starting_date: start.clone(),
            ending_date: end.clone(),
        })
    }
}

/* ---------------- B: event derived ---------------- */

/// The month starts the day after this event and ends on the next event day.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventDerivedPairing;

impl PairingRule for EventDerivedPairing {
    fn strategy(&self) -> Strategy {
        Strategy::EventDerived
    }

    fn adjacency(&self, current: &Observation, next: &Observation) -> Adjacency {
        let dates = current
            .start_marker
            .as_ref()
            .and_then(DayId::to_date)
            .zip(next.start_marker.as_ref().and_then(DayId::to_date));

        match dates {
            Some((a, b)) => {
                let days = (b - a).num_days();
                if days <= 0 {
                    Adjacency::Duplicate
                } else if days > LUNATION_MAX_DAYS {
                    Adjacency::Gap
                } else {
                    Adjacency::Adjacent
                }
            }
            // Without both days only the slots can tell; `pair` will name the
            // missing marker.
            None => {
                let (a, b) = (current.slot(), next.slot());
                if b == a || b == a.next() { Adjacency::Adjacent } else { Adjacency::Gap }
            }
        }
    }

    fn pair(&self, current: &Observation, next: &Observation) -> Result<MonthRange, Diagnostic> {
        let name = current.period_name.as_ref().ok_or_else(|| missing(current, "periodName"))?;
        let start = current
            .start_marker
            .as_ref()
            .and_then(DayId::to_date)
            .and_then(|d| d.succ_opt())
            .map(DayId::from_date)
            .ok_or_else(|| missing(current, "startMarker"))?;
        let end = next.start_marker.as_ref().ok_or_else(|| missing(next, "startMarker"))?;
        Ok(MonthRange {
            month_name: name.clone(),
            starting_date: start,
            ending_date: end.clone(),
        })
    }

    fn audit(&self, current: &Observation, range: &MonthRange) -> Option<Diagnostic> {
        let found = current.inferred_start.as_ref()?;
        let same_day = match (found.to_date(), range.starting_date.to_date()) {
            (Some(a), Some(b)) => a == b,
            _ => found == &range.starting_date,
        };
        if same_day {
            None
        } else {
            Some(Diagnostic::NeighborMismatch {
                slot: current.slot(),
                expected: range.starting_date.clone(),
                found: found.clone(),
            })
        }
    }
}
