// src/engine/mod.rs
//! # Boundary reconciliation
//!
//! Turns per-page anchor observations, collected in any order and with holes,
//! into an ordered list of lunar month ranges.
//!
//! ```text
//! specs::extract → normalize ─┐
//!                             ▼
//!        working set ─ screen ─ sequence ─ build_ranges(rule) ─→ Vec<MonthRange>
//!                        └──────── Reporter (diagnostics) ◀──────┘
//! ```
//!
//! Everything here is pure and synchronous. Running it twice on the same input
//! gives the same output.
pub mod builder;
pub mod normalize;
pub mod pairing;
pub mod report;
pub mod sequence;
pub mod types;

pub use builder::build_ranges;
pub use normalize::{normalize, DirectMarkers, EventMarker, RawExtraction};
pub use pairing::{rule_for, Adjacency, DirectMarkerPairing, EventDerivedPairing, PairingRule};
pub use report::{screen, Diagnostic, Reporter};
pub use sequence::sequence;
pub use types::{DayId, MonthRange, MonthSlot, Observation, Strategy};

/// Ranges plus everything that was skipped or looked off on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub ranges: Vec<MonthRange>,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn reconcile(observations: Vec<Observation>, rule: &dyn PairingRule) -> Reconciliation {
    let mut reporter = Reporter::new();
    let usable = screen(observations, rule.strategy(), &mut reporter);
    let ordered = sequence(usable);
    let ranges = build_ranges(&ordered, rule, &mut reporter);
    Reconciliation { ranges, diagnostics: reporter.into_diagnostics() }
}
