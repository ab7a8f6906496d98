use tracing::{debug, trace};

use crate::api::AccordionConfig;
use crate::core::AccordionState;
use crate::dom::{Dom, DomEvent, ElementId, EventKind, EventOutcome, Selector};

use super::{Phase, WidgetContext, bool_attr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Section {
    header: ElementId,
    content: Option<ElementId>,
}

/// Single-open accordion over every header carrying the configured class.
#[derive(Debug, Clone)]
pub struct AccordionWidget {
    sections: Vec<Section>,
    state: AccordionState,
}

impl AccordionWidget {
    /// Each header's content is its next element sibling. The first header
    /// already marked `aria-expanded="true"` starts open.
    pub fn mount<D: Dom>(ctx: &mut WidgetContext<'_, D>, config: &AccordionConfig) -> Option<Self> {
        let dom = &mut *ctx.dom;
        let sections: Vec<Section> = dom
            .query_all(None, &Selector::class(config.header_class.as_str()))
            .into_iter()
            .map(|header| Section {
                header,
                content: dom.next_element_sibling(header),
            })
            .collect();
        if sections.is_empty() {
            debug!("no accordion headers, skipping accordion");
            return None;
        }

        let initially_open = sections.iter().position(|section| {
            dom.attribute(section.header, "aria-expanded").as_deref() == Some("true")
        });
        let widget = Self {
            state: AccordionState::with_open(sections.len(), initially_open),
            sections,
        };
        widget.project(dom);
        debug!(
            sections = widget.sections.len(),
            open = ?widget.state.open_section(),
            "accordion mounted"
        );
        Some(widget)
    }

    #[must_use]
    pub fn state(&self) -> AccordionState {
        self.state
    }

    #[must_use]
    pub fn headers(&self) -> Vec<ElementId> {
        self.sections.iter().map(|section| section.header).collect()
    }

    pub fn toggle<D: Dom>(&mut self, dom: &mut D, section: usize) {
        self.state = self.state.toggle(section);
        trace!(section, open = ?self.state.open_section(), "accordion toggle");
        self.project(dom);
    }

    pub fn handle_event<D: Dom>(
        &mut self,
        ctx: &mut WidgetContext<'_, D>,
        event: &DomEvent,
        phase: Phase,
    ) -> EventOutcome {
        let Some(section) = phase
            .current()
            .and_then(|current| self.sections.iter().position(|s| s.header == current))
        else {
            return EventOutcome::ignored();
        };

        match &event.kind {
            EventKind::Click => {
                self.toggle(&mut *ctx.dom, section);
                EventOutcome::ignored()
            }
            EventKind::KeyDown(key) if key.is_activation() => {
                self.toggle(&mut *ctx.dom, section);
                EventOutcome::prevent_default()
            }
            _ => EventOutcome::ignored(),
        }
    }

    fn project<D: Dom>(&self, dom: &mut D) {
        for (index, section) in self.sections.iter().enumerate() {
            let open = self.state.is_open(index);
            dom.set_attribute(section.header, "aria-expanded", bool_attr(open));
            let Some(content) = section.content else {
                continue;
            };
            if open {
                let height = dom.scroll_height(content);
                dom.set_style_property(content, "max-height", &format!("{height}px"));
            } else {
                dom.set_style_property(content, "max-height", "0");
            }
        }
    }
}
