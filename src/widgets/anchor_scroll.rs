use tracing::{debug, trace};

use crate::api::AnchorScrollConfig;
use crate::core::{AnchorDestination, resolve_anchor, scroll_offset_for};
use crate::dom::{Dom, DomEvent, ElementId, EventKind, EventOutcome, Selector};

use super::{Phase, WidgetContext};

/// Smooth scrolling for in-page `#` links, offset below the fixed header.
#[derive(Debug, Clone)]
pub struct AnchorScrollWidget {
    anchors: Vec<ElementId>,
    header_offset_px: f64,
    top_hrefs: Vec<String>,
}

impl AnchorScrollWidget {
    pub fn mount<D: Dom>(
        ctx: &mut WidgetContext<'_, D>,
        config: &AnchorScrollConfig,
    ) -> Option<Self> {
        let anchors = ctx.dom.query_all(None, &Selector::href_prefix("#"));
        if anchors.is_empty() {
            debug!("no in-page anchors, skipping anchor scroll");
            return None;
        }
        debug!(anchors = anchors.len(), "anchor scroll mounted");
        Some(Self {
            anchors,
            header_offset_px: config.header_offset_px,
            top_hrefs: config.top_hrefs.clone(),
        })
    }

    #[must_use]
    pub fn anchors(&self) -> &[ElementId] {
        &self.anchors
    }

    pub fn handle_event<D: Dom>(
        &mut self,
        ctx: &mut WidgetContext<'_, D>,
        event: &DomEvent,
        phase: Phase,
    ) -> EventOutcome {
        let (EventKind::Click, Some(current)) = (&event.kind, phase.current()) else {
            return EventOutcome::ignored();
        };
        if !self.anchors.contains(&current) {
            return EventOutcome::ignored();
        }
        let dom = &mut *ctx.dom;
        let href = dom.attribute(current, "href").unwrap_or_default();

        match resolve_anchor(&href, &self.top_hrefs) {
            AnchorDestination::Top => {
                trace!(%href, "scroll to top");
                dom.scroll_window_to(0.0);
                EventOutcome::prevent_default()
            }
            AnchorDestination::Element(id) => match dom.element_by_id(&id) {
                Some(target) => {
                    let top = scroll_offset_for(
                        dom.bounding_client_top(target),
                        dom.page_y_offset(),
                        self.header_offset_px,
                    );
                    trace!(%href, top, "scroll to anchor");
                    dom.scroll_window_to(top);
                    EventOutcome::prevent_default()
                }
                None => {
                    trace!(%href, "anchor target missing, keeping default");
                    EventOutcome::ignored()
                }
            },
            AnchorDestination::External => EventOutcome::ignored(),
        }
    }
}
