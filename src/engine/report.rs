// src/engine/report.rs
//! Consistency reporting. Incomplete calendar data is expected: every problem
//! becomes one log line and one [`Diagnostic`], and the run carries on.
use std::fmt;

use crate::engine::types::{DayId, MonthSlot, Observation, Strategy};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// Dropped before sequencing: no name, or no marker at all.
    Unusable { slot: MonthSlot },
    /// Produced by the other strategy than the one this run reconciles with.
    WrongStrategy { slot: MonthSlot, found: Strategy },
    /// A field the pairing rule needs is missing on this side of the pair.
    Incomplete { slot: MonthSlot, field: &'static str },
    /// Neighbours in the list are not neighbours in time; pair skipped.
    Gap { after: MonthSlot, before: MonthSlot },
    /// Two observations claim the same slot (or the same event); pair skipped.
    Duplicate { slot: MonthSlot },
    /// Range built, but the name came from a cell that is not the day after
    /// the event. Typical at grid row boundaries.
    NeighborMismatch { slot: MonthSlot, expected: DayId, found: DayId },
    /// Range built, but it does not start the day after the previous one ended.
    Discontinuity { slot: MonthSlot, previous_end: DayId, starting: DayId },
}

impl Diagnostic {
    /// The Gregorian month the diagnostic is about.
    pub fn slot(&self) -> MonthSlot {
        match self {
            Diagnostic::Unusable { slot }
            | Diagnostic::WrongStrategy { slot, .. }
            | Diagnostic::Incomplete { slot, .. }
            | Diagnostic::Duplicate { slot }
            | Diagnostic::NeighborMismatch { slot, .. }
            | Diagnostic::Discontinuity { slot, .. } => *slot,
            Diagnostic::Gap { after, .. } => *after,
        }
    }

    /// Warnings accompany a range that was still emitted.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Diagnostic::NeighborMismatch { .. } | Diagnostic::Discontinuity { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unusable { slot } => {
                write!(f, "Unusable data for {slot}: no month name or no markers, skipped")
            }
            Diagnostic::WrongStrategy { slot, found } => {
                write!(f, "Observation for {slot} came from {found} extraction, skipped")
            }
            Diagnostic::Incomplete { slot, field } => {
                write!(f, "Incomplete data for {slot} (missing {field}), cannot form a complete range")
            }
            Diagnostic::Gap { after, before } => {
                write!(f, "Gap between {after} and {before}, range not bridged")
            }
            Diagnostic::Duplicate { slot } => {
                write!(f, "Ambiguous duplicate for {slot}, range skipped")
            }
            Diagnostic::NeighborMismatch { slot, expected, found } => write!(
                f,
                "Month name for {slot} read from cell {found}, expected {expected}; name may be wrong"
            ),
            Diagnostic::Discontinuity { slot, previous_end, starting } => write!(
                f,
                "Range for {slot} starts {starting} but previous range ended {previous_end}"
            ),
        }
    }
}

/// Collects diagnostics and logs each one as it arrives.
#[derive(Debug, Default)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, d: Diagnostic) {
        logw!("{d}");
        self.diagnostics.push(d);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Drop observations nothing can be built from, reporting each.
pub fn screen(
    observations: Vec<Observation>,
    strategy: Strategy,
    reporter: &mut Reporter,
) -> Vec<Observation> {
    let mut kept = Vec::with_capacity(observations.len());
    for o in observations {
        if o.strategy != strategy {
            reporter.report(Diagnostic::WrongStrategy { slot: o.slot(), found: o.strategy });
        } else if !o.is_usable() {
            reporter.report(Diagnostic::Unusable { slot: o.slot() });
        } else {
            kept.push(o);
        }
    }
    kept
}
