use serde::{Deserialize, Serialize};

pub const DEFAULT_HEADER_OFFSET_PX: f64 = 80.0;

/// Where a click on an in-page anchor should scroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnchorDestination {
    /// Scroll the window back to the very top.
    Top,
    /// Scroll to the element with this id.
    Element(String),
    /// Not an in-page anchor; leave the browser default alone.
    External,
}

/// Resolves an `href` against the list of hrefs that mean "top of page".
#[must_use]
pub fn resolve_anchor(href: &str, top_hrefs: &[String]) -> AnchorDestination {
    if top_hrefs.iter().any(|top| top == href) {
        return AnchorDestination::Top;
    }
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => AnchorDestination::Element(id.to_owned()),
        Some(_) => AnchorDestination::Top,
        None => AnchorDestination::External,
    }
}

/// Document scroll position that puts an element just below the fixed header.
#[must_use]
pub fn scroll_offset_for(element_top_px: f64, page_y_offset_px: f64, header_offset_px: f64) -> f64 {
    element_top_px + page_y_offset_px - header_offset_px
}

#[cfg(test)]
mod tests {
    use super::{AnchorDestination, resolve_anchor, scroll_offset_for};

    fn tops() -> Vec<String> {
        vec!["#".to_owned(), "#home".to_owned()]
    }

    #[test]
    fn top_hrefs_scroll_to_top() {
        assert_eq!(resolve_anchor("#", &tops()), AnchorDestination::Top);
        assert_eq!(resolve_anchor("#home", &tops()), AnchorDestination::Top);
    }

    #[test]
    fn fragment_resolves_to_element_id() {
        assert_eq!(
            resolve_anchor("#collection", &tops()),
            AnchorDestination::Element("collection".to_owned())
        );
        assert_eq!(
            resolve_anchor("https://example.com", &tops()),
            AnchorDestination::External
        );
    }

    #[test]
    fn offset_subtracts_header() {
        assert_eq!(scroll_offset_for(300.0, 1200.0, 80.0), 1420.0);
    }
}
