//! DOM-bound widgets.
//!
//! Each widget is mounted against explicit anchors looked up from the config.
//! `mount` returns `None` when a required anchor is missing, so a page without
//! (say) a gallery simply has no gallery widget. Widgets own their state
//! exclusively and share nothing with each other.

mod accordion;
mod anchor_scroll;
mod gallery;
mod nav_menu;
mod newsletter;
mod product_options;
mod stats;

pub use accordion::AccordionWidget;
pub use anchor_scroll::AnchorScrollWidget;
pub use gallery::GalleryWidget;
pub use nav_menu::NavMenuWidget;
pub use newsletter::NewsletterWidget;
pub use product_options::ProductOptionsWidget;
pub use stats::StatsWidget;

use crate::dom::{Dom, ElementId};
use crate::host::HostQueue;

/// Borrowed environment handed to widgets for one mount or event.
pub struct WidgetContext<'a, D: Dom> {
    pub dom: &'a mut D,
    pub host: &'a mut HostQueue,
}

impl<'a, D: Dom> WidgetContext<'a, D> {
    pub fn new(dom: &'a mut D, host: &'a mut HostQueue) -> Self {
        Self { dom, host }
    }
}

/// Where in the propagation path a widget is being invoked.
///
/// `Element(id)` is the element whose listener runs (the DOM's
/// `currentTarget`); `Document` is the final document-level pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Element(ElementId),
    Document,
}

impl Phase {
    #[must_use]
    pub fn current(self) -> Option<ElementId> {
        match self {
            Self::Element(element) => Some(element),
            Self::Document => None,
        }
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
