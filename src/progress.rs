// src/progress.rs
use crate::engine::MonthSlot;

/// Lightweight progress reporting used by the month-by-month collection loop.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of months to visit.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One month's page was read; `found` observations came out of it.
    fn item_done(&mut self, _slot: MonthSlot, _found: usize) {}

    /// One month's page could not be fetched or read.
    fn item_failed(&mut self, _slot: MonthSlot, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Counts outcomes and logs a line per month.
#[derive(Debug, Default)]
pub struct LogProgress {
    pub total: usize,
    pub done: usize,
    pub failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        logf!("Visiting {total} month page(s)");
    }
    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }
    fn item_done(&mut self, slot: MonthSlot, found: usize) {
        self.done += 1;
        logd!("{slot}: {found} observation(s) ({}/{})", self.done + self.failed, self.total);
    }
    fn item_failed(&mut self, slot: MonthSlot, reason: &str) {
        self.failed += 1;
        logd!("{slot}: failed: {reason} ({}/{})", self.done + self.failed, self.total);
    }
    fn finish(&mut self) {
        if self.total == 0 {
            logf!("Scraping finished");
        } else {
            logf!("Scraping finished ({} read, {} failed, of {})", self.done, self.failed, self.total);
        }
    }
}
