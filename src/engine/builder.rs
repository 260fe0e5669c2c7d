// src/engine/builder.rs
use crate::engine::pairing::{Adjacency, PairingRule};
use crate::engine::report::{Diagnostic, Reporter};
use crate::engine::types::{MonthRange, Observation};

/// Walk `(O_i, O_i+1)` over an already ordered list and build one range per
/// pair that works out.
///
/// Only immediate neighbours are looked at: a missing observation removes a
/// range, it never merges two months into one. Failed pairs are reported and
/// the walk goes on.
pub fn build_ranges(
    ordered: &[Observation],
    rule: &dyn PairingRule,
    reporter: &mut Reporter,
) -> Vec<MonthRange> {
    let mut ranges: Vec<MonthRange> = Vec::with_capacity(ordered.len().saturating_sub(1));
    let mut last_pair: Option<usize> = None;

    for (i, w) in ordered.windows(2).enumerate() {
        let (current, next) = (&w[0], &w[1]);

        match rule.adjacency(current, next) {
            Adjacency::Adjacent => {}
            Adjacency::Gap => {
                reporter.report(Diagnostic::Gap { after: current.slot(), before: next.slot() });
                continue;
            }
            Adjacency::Duplicate => {
                reporter.report(Diagnostic::Duplicate { slot: next.slot() });
                continue;
            }
        }

        let range = match rule.pair(current, next) {
            Ok(r) => r,
            Err(d) => {
                reporter.report(d);
                continue;
            }
        };

        if let Some(d) = rule.audit(current, &range) {
            reporter.report(d);
        }

        // Consecutive pairs share an observation, so their ranges must touch.
        if let (Some(prev_i), Some(prev)) = (last_pair, ranges.last()) {
            if prev_i + 1 == i {
                if let Some(d) = continuity(prev, &range, current) {
                    reporter.report(d);
                }
            }
        }

        ranges.push(range);
        last_pair = Some(i);
    }

    ranges
}

fn continuity(prev: &MonthRange, range: &MonthRange, current: &Observation) -> Option<Diagnostic> {
    let end = prev.ending_date.to_date()?;
    let start = range.starting_date.to_date()?;
    if end.succ_opt() == Some(start) {
        None
    } else {
        Some(Diagnostic::Discontinuity {
            slot: current.slot(),
            previous_end: prev.ending_date.clone(),
            starting: range.starting_date.clone(),
        })
    }
}
