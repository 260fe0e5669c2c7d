// src/scrape.rs
use std::thread;

use crate::{
    config::ScrapeOptions,
    core::PageSource,
    engine::{normalize, MonthSlot, Observation, Strategy},
    error::{Error, Result},
    progress::Progress,
    specs,
};

/// Everything the month walk produced. Nothing here has been reconciled yet.
#[derive(Debug, Default)]
pub struct Collection {
    pub observations: Vec<Observation>,
    /// Months whose page could not be fetched or read, with the reason.
    pub failures: Vec<(MonthSlot, String)>,
    /// The walk stopped early on a fetch failure.
    pub aborted: bool,
    pub attempted: usize,
}

/// Visit every month in the configured range, one page at a time.
///
/// A failed month is logged and recorded, and the walk moves on, unless
/// `abort_on_fetch_error` is set and the failure was a fetch failure.
pub fn collect(
    opts: &ScrapeOptions,
    source: &dyn PageSource,
    progress: &mut dyn Progress,
) -> Collection {
    let slots: Vec<MonthSlot> = opts.years.slots().collect();
    let mut out = Collection::default();

    progress.begin(slots.len());
    progress.log(&format!("Scraping {} ({}, via {})", opts.years, opts.strategy, source.label()));

    for (i, slot) in slots.iter().copied().enumerate() {
        if i > 0 && !opts.pause.is_zero() {
            thread::sleep(opts.pause); // be polite
        }
        out.attempted += 1;
        logd!("Scraping: {slot}");

        let url = specs::page_url(&opts.page_url, opts.strategy, slot);
        match scrape_month(opts.strategy, source, &url, slot) {
            Ok(found) => {
                progress.item_done(slot, found.len());
                out.observations.extend(found);
            }
            Err(e) => {
                let fetch_failed = matches!(e, Error::Fetch(_));
                if fetch_failed {
                    loge!("{slot}: {e}");
                } else {
                    logw!("{slot}: {e}");
                }
                let reason = e.to_string();
                progress.item_failed(slot, &reason);
                out.failures.push((slot, reason));

                if fetch_failed && opts.abort_on_fetch_error {
                    logw!("Stopping after {slot}; {} month(s) not visited", slots.len() - i - 1);
                    out.aborted = true;
                    break;
                }
            }
        }
    }

    progress.finish();
    out
}

/// Fetch, extract and normalize a single month page.
pub fn scrape_month(
    strategy: Strategy,
    source: &dyn PageSource,
    url: &str,
    slot: MonthSlot,
) -> Result<Vec<Observation>> {
    let html = source.fetch(url, slot)?;
    let raw = specs::extract(strategy, &html)?;
    Ok(normalize(slot, raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YearRange;
    use crate::error::FetchError;
    use crate::progress::{LogProgress, NullProgress};
    use std::cell::RefCell;
    use std::time::Duration;

    /// Serves a day-1 grid page for every month except those listed as down.
    struct StubSource {
        down: Vec<MonthSlot>,
        urls: RefCell<Vec<String>>,
    }

    impl StubSource {
        fn new(down: Vec<MonthSlot>) -> Self {
            Self { down, urls: RefCell::new(Vec::new()) }
        }
    }

    impl PageSource for StubSource {
        fn label(&self) -> &'static str { "stub" }

        fn fetch(&self, url: &str, slot: MonthSlot) -> std::result::Result<String, FetchError> {
            self.urls.borrow_mut().push(s!(url));
            if self.down.contains(&slot) {
                return Err(FetchError::EmptyBody(s!(url)));
            }
            Ok(format!(
                r#"<div class="dpPHeaderLeftTitle">Month {m}</div>
                   <div class="dpMonthGrid">
                     <div data-url="/d.html?date=14/{m:02}/{y}"><div><span class="dpSmallDate">30</span></div></div>
                     <div data-url="/d.html?date=15/{m:02}/{y}"><div><span class="dpSmallDate">1</span></div></div>
                   </div>"#,
                m = slot.month,
                y = slot.year,
            ))
        }
    }

    fn opts(abort: bool) -> ScrapeOptions {
        ScrapeOptions {
            years: YearRange::new(2020, 2020),
            pause: Duration::ZERO,
            abort_on_fetch_error: abort,
            ..Default::default()
        }
    }

    #[test]
    fn one_observation_per_month() {
        let src = StubSource::new(vec![]);
        let c = collect(&opts(false), &src, &mut NullProgress);
        assert_eq!(c.attempted, 12);
        assert_eq!(c.observations.len(), 12);
        assert!(c.failures.is_empty());
        assert!(src.urls.borrow()[0].ends_with("date=28/1/2020"));
    }

    #[test]
    fn failed_month_is_skipped_and_walk_continues() {
        let src = StubSource::new(vec![MonthSlot::new(2020, 3)]);
        let c = collect(&opts(false), &src, &mut NullProgress);
        assert_eq!(c.attempted, 12);
        assert_eq!(c.observations.len(), 11);
        assert_eq!(c.failures.len(), 1);
        assert_eq!(c.failures[0].0, MonthSlot::new(2020, 3));
        assert!(!c.aborted);
    }

    #[test]
    fn abort_mode_stops_at_first_fetch_failure() {
        let src = StubSource::new(vec![MonthSlot::new(2020, 3)]);
        let c = collect(&opts(true), &src, &mut NullProgress);
        assert!(c.aborted);
        assert_eq!(c.attempted, 3);
        assert_eq!(c.observations.len(), 2);
    }

    #[test]
    fn progress_sees_every_month() {
        let src = StubSource::new(vec![MonthSlot::new(2020, 7)]);
        let mut p = LogProgress::default();
        let _ = collect(&opts(false), &src, &mut p);
        assert_eq!(p.total, 12);
        assert_eq!(p.done, 11);
        assert_eq!(p.failed, 1);
    }
}
