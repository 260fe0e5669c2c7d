// src/specs/mod.rs
//! # Page specs
//!
//! Each spec knows one page layout of the month panjika and where its
//! anchors live. Specs only read HTML into raw markers (`engine::RawExtraction`);
//! validation into observations happens in `engine::normalize`.
//!
//! ## Layouts
//! - `direct_marker` – the month grid (`.dpMonthGrid`): header title plus the
//!   cell whose small date is `1` and the cell laid out before it.
//! - `event_marker` – the calendar table (`#calendar`): cells carrying the
//!   Amavasya event icon, and the next open cell for the new month's name.
//!
//! ## Conventions
//! - A missing page container is an extraction failure for that month.
//! - A present container with missing anchors is not: the raw markers come back
//!   with holes and the engine reports them.
//! - Specs are tested offline against small inline pages.
pub mod direct_marker;
pub mod event_marker;

use crate::engine::{MonthSlot, RawExtraction, Strategy};
use crate::error::ExtractError;

/// Day of the month used in the navigation date.
pub fn probe_day(strategy: Strategy) -> u32 {
    match strategy {
        Strategy::DirectMarker => 28,
        Strategy::EventDerived => 31,
    }
}

/// `<base>?date=<probe>/<month>/<year>`
pub fn page_url(base: &str, strategy: Strategy, slot: MonthSlot) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!(
        "{base}{sep}date={}/{}/{}",
        probe_day(strategy),
        slot.month,
        slot.year
    )
}

pub fn extract(strategy: Strategy, html_doc: &str) -> Result<RawExtraction, ExtractError> {
    match strategy {
        Strategy::DirectMarker => direct_marker::parse_doc(html_doc).map(RawExtraction::Direct),
        Strategy::EventDerived => event_marker::parse_doc(html_doc).map(RawExtraction::Events),
    }
}
