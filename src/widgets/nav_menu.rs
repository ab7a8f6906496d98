use tracing::{debug, trace};

use crate::api::NavConfig;
use crate::core::NavMenuState;
use crate::dom::{Dom, DomEvent, ElementId, EventKind, EventOutcome, Key, Selector};

use super::{Phase, WidgetContext, bool_attr};

/// Hamburger-toggled navigation list.
#[derive(Debug, Clone)]
pub struct NavMenuWidget {
    hamburger: ElementId,
    nav_list: ElementId,
    links: Vec<ElementId>,
    active_class: String,
    state: NavMenuState,
}

impl NavMenuWidget {
    pub fn mount<D: Dom>(ctx: &mut WidgetContext<'_, D>, config: &NavConfig) -> Option<Self> {
        let dom = &mut *ctx.dom;
        let (Some(hamburger), Some(nav_list)) = (
            dom.element_by_id(&config.hamburger_id),
            dom.element_by_id(&config.nav_list_id),
        ) else {
            debug!("navigation anchors missing, skipping nav menu");
            return None;
        };

        let widget = Self {
            hamburger,
            nav_list,
            links: dom.query_all(Some(nav_list), &Selector::tag("a")),
            active_class: config.active_class.clone(),
            state: NavMenuState::new(false),
        };
        widget.project(dom);
        debug!(links = widget.links.len(), "nav menu mounted");
        Some(widget)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    #[must_use]
    pub fn hamburger(&self) -> ElementId {
        self.hamburger
    }

    #[must_use]
    pub fn nav_list(&self) -> ElementId {
        self.nav_list
    }

    pub fn handle_event<D: Dom>(
        &mut self,
        ctx: &mut WidgetContext<'_, D>,
        event: &DomEvent,
        phase: Phase,
    ) -> EventOutcome {
        let dom = &mut *ctx.dom;
        match phase {
            Phase::Element(current) => self.handle_element(dom, event, current),
            Phase::Document => {
                self.handle_document(dom, event);
                EventOutcome::ignored()
            }
        }
    }

    fn handle_element<D: Dom>(
        &mut self,
        dom: &mut D,
        event: &DomEvent,
        current: ElementId,
    ) -> EventOutcome {
        if current == self.hamburger {
            return match &event.kind {
                EventKind::Click => {
                    self.set_state(dom, self.state.toggled());
                    EventOutcome::ignored()
                }
                EventKind::KeyDown(key) if key.is_activation() => {
                    self.set_state(dom, self.state.toggled());
                    EventOutcome::prevent_default()
                }
                _ => EventOutcome::ignored(),
            };
        }
        if matches!(event.kind, EventKind::Click) && self.links.contains(&current) {
            self.set_state(dom, self.state.closed());
        }
        EventOutcome::ignored()
    }

    fn handle_document<D: Dom>(&mut self, dom: &mut D, event: &DomEvent) {
        if !self.state.is_open() {
            return;
        }
        match &event.kind {
            EventKind::Click => {
                let inside = dom.contains(self.hamburger, event.target)
                    || dom.contains(self.nav_list, event.target);
                if !inside {
                    trace!("click outside navigation");
                    self.set_state(dom, self.state.closed());
                }
            }
            EventKind::KeyDown(Key::Escape) => {
                self.set_state(dom, self.state.closed());
                dom.focus(self.hamburger);
            }
            _ => {}
        }
    }

    fn set_state<D: Dom>(&mut self, dom: &mut D, state: NavMenuState) {
        if state == self.state {
            return;
        }
        self.state = state;
        trace!(open = state.is_open(), "nav menu");
        self.project(dom);
    }

    fn project<D: Dom>(&self, dom: &mut D) {
        let open = self.state.is_open();
        dom.set_class(self.nav_list, &self.active_class, open);
        dom.set_attribute(self.hamburger, "aria-expanded", bool_attr(open));
    }
}
