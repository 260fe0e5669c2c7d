// src/specs/event_marker.rs
use scraper::{ElementRef, Html, Selector};

use crate::core::html::{attr, closest, has_class, is_tag, next_element, selector, text_of};
use crate::engine::EventMarker;
use crate::error::ExtractError;

const CALENDAR: &str = "#calendar";

/// Every Amavasya cell on a calendar page, in page order.
///
/// The new month's name comes from the cell after the event: the next sibling,
/// or, when that is missing or blank, the first open cell of the next row.
/// Near row boundaries this can land on the wrong cell; the day read from it is
/// kept so the engine can flag a mismatch.
pub fn parse_doc(html_doc: &str) -> Result<Vec<EventMarker>, ExtractError> {
    let doc = Html::parse_document(html_doc);

    if doc.select(&selector(CALENDAR)?).next().is_none() {
        return Err(ExtractError::StructureMissing(CALENDAR));
    }

    let event_icon = selector(r#".events img[title="Amavasya"]"#)?;
    let open_cell = selector("td.cal-day:not(.cal-day-blank)")?;
    let submonth = selector(".day-info .submonth-name")?;

    let mut out = Vec::new();
    for img in doc.select(&event_icon) {
        let Some(cell) = closest(img, |e| is_tag(e, "td") && has_class(e, "cal-day")) else {
            continue;
        };
        let Some(day) = attr(cell, "data-day") else { continue };

        let next = next_day_cell(cell, &open_cell);
        let next_name = next
            .and_then(|c| c.select(&submonth).next())
            .map(text_of)
            .filter(|t| !t.is_empty());
        let next_day = next.and_then(|c| attr(c, "data-day")).map(String::from);

        out.push(EventMarker { event_day: s!(day), next_name, next_day });
    }

    logd!("{} Amavasya cell(s) on page", out.len());
    Ok(out)
}

fn next_day_cell<'a>(cell: ElementRef<'a>, open_cell: &Selector) -> Option<ElementRef<'a>> {
    match next_element(cell) {
        Some(sib) if !has_class(sib, "cal-day-blank") => Some(sib),
        _ => {
            let row = closest(cell, |e| is_tag(e, "tr"))?;
            next_element(row)?.select(open_cell).next()
        }
    }
}
