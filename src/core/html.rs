// src/core/html.rs
//! Small DOM helpers over `scraper`, for walking calendar grids by
//! siblings and ancestors the way the pages lay them out.
use scraper::{ElementRef, Selector};

use crate::core::sanitize::normalize_ws;
use crate::error::ExtractError;

pub fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::Selector(css))
}

/// Text content with whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn is_tag(el: ElementRef<'_>, tag: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(tag)
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Nearest ancestor matching `pred` (the element itself excluded).
pub fn closest<'a, F>(el: ElementRef<'a>, pred: F) -> Option<ElementRef<'a>>
where
    F: Fn(ElementRef<'a>) -> bool,
{
    el.ancestors().filter_map(ElementRef::wrap).find(|a| pred(*a))
}

/// Nearest preceding sibling that is an element.
pub fn prev_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.prev_siblings().find_map(ElementRef::wrap)
}

/// Nearest following sibling that is an element.
pub fn next_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Parent's parent, if it is an element.
pub fn grandparent(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent()?.parent().and_then(ElementRef::wrap)
}
