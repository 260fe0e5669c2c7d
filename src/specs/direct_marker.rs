// src/specs/direct_marker.rs
use scraper::Html;

use crate::core::html::{attr, grandparent, is_tag, prev_element, selector, text_of};
use crate::core::sanitize::parse_day;
use crate::engine::DirectMarkers;
use crate::error::ExtractError;

const GRID: &str = ".dpMonthGrid";

/// Read the month title and the two boundary cells from a month-grid page.
///
/// The day-`1` label sits two levels under the cell `div` that carries the
/// `data-url`; the previous month's last day is the `div` right before it.
pub fn parse_doc(html_doc: &str) -> Result<DirectMarkers, ExtractError> {
    let doc = Html::parse_document(html_doc);

    if doc.select(&selector(GRID)?).next().is_none() {
        return Err(ExtractError::StructureMissing(GRID));
    }

    let month_title = doc
        .select(&selector(".dpPHeaderLeftTitle")?)
        .next()
        .map(text_of)
        .filter(|t| !t.is_empty());

    let mut out = DirectMarkers { month_title, ..Default::default() };

    for span in doc.select(&selector("span.dpSmallDate")?) {
        let label = text_of(span);
        match parse_day(&label) {
            Ok(1) => {}
            Ok(_) => continue,
            Err(_) => {
                logd!("Skipping day label '{label}'");
                continue;
            }
        }
        let Some(cell) = grandparent(span) else { continue };
        if !is_tag(cell, "div") {
            continue;
        }
        let Some(url) = attr(cell, "data-url") else { continue };

        out.start_url = Some(s!(url));
        out.prev_end_url = prev_element(cell)
            .and_then(|above| attr(above, "data-url"))
            .map(String::from);
        break;
    }

    if out.start_url.is_none() {
        logd!("No day-1 cell with a data-url on this page");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(date: &str, small: &str) -> String {
        format!(
            r#"<div class="dpDayCell" data-url="/bengali/bengali-day-panjika.html?date={date}">
                 <div class="dpCellDate"><span class="dpBigDate">x</span><span class="dpSmallDate">{small}</span></div>
               </div>"#
        )
    }

    fn page(cells: &[String]) -> String {
        format!(
            r#"<html><body>
                <div class="dpPHeaderLeftTitle"> Magh 1426 </div>
                <div class="dpMonthGrid">{}</div>
               </body></html>"#,
            cells.join("\n")
        )
    }

    #[test]
    fn reads_day_one_and_cell_before_it() {
        let doc = page(&[
            cell("13/01/2020", "29"),
            cell("14/01/2020", "30"),
            cell("15/01/2020", "1"),
            cell("16/01/2020", "2"),
        ]);
        let m = parse_doc(&doc).unwrap();
        assert_eq!(m.month_title.as_deref(), Some("Magh 1426"));
        assert_eq!(m.start_url.as_deref(), Some("/bengali/bengali-day-panjika.html?date=15/01/2020"));
        assert_eq!(m.prev_end_url.as_deref(), Some("/bengali/bengali-day-panjika.html?date=14/01/2020"));
    }

    #[test]
    fn first_day_one_wins() {
        let doc = page(&[
            cell("14/01/2020", "30"),
            cell("15/01/2020", "1"),
            cell("13/02/2020", "30"),
            cell("14/02/2020", "1"),
        ]);
        let m = parse_doc(&doc).unwrap();
        assert!(m.start_url.unwrap().ends_with("15/01/2020"));
    }

    #[test]
    fn day_one_in_first_cell_has_no_previous_end() {
        let doc = page(&[cell("15/01/2020", "1"), cell("16/01/2020", "2")]);
        let m = parse_doc(&doc).unwrap();
        assert!(m.start_url.is_some());
        assert!(m.prev_end_url.is_none());
    }

    #[test]
    fn missing_grid_is_structure_failure() {
        let err = parse_doc("<html><body><p>Access denied</p></body></html>").unwrap_err();
        assert!(matches!(err, ExtractError::StructureMissing(GRID)));
    }

    #[test]
    fn unreadable_day_labels_are_not_day_one() {
        let doc = page(&[cell("15/01/2020", "1st"), cell("16/01/2020", "x1")]);
        let m = parse_doc(&doc).unwrap();
        assert!(m.start_url.is_none());
        assert!(m.prev_end_url.is_none());
    }

    #[test]
    fn blank_filler_cell_does_not_hide_day_one() {
        let filler = s!(r#"<div class="dpDayCell dpFiller"><div class="dpCellDate"><span class="dpSmallDate"></span></div></div>"#);
        let doc = page(&[
            filler,
            cell("14/01/2020", "30"),
            cell("15/01/2020", "1"),
        ]);
        let m = parse_doc(&doc).unwrap();
        assert_eq!(m.start_url.as_deref(), Some("/bengali/bengali-day-panjika.html?date=15/01/2020"));
        assert_eq!(m.prev_end_url.as_deref(), Some("/bengali/bengali-day-panjika.html?date=14/01/2020"));
    }

    #[test]
    fn missing_title_is_left_empty() {
        let doc = format!(r#"<div class="dpMonthGrid">{}</div>"#, cell("15/01/2020", "1"));
        let m = parse_doc(&doc).unwrap();
        assert!(m.month_title.is_none());
        assert!(m.start_url.is_some());
    }
}
