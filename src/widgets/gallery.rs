use tracing::{debug, trace, warn};

use crate::api::GalleryConfig;
use crate::core::{CarouselCommand, CarouselEngine};
use crate::dom::{Dom, DomEvent, ElementId, EventKind, EventOutcome, Key, Selector};

use super::{Phase, WidgetContext, bool_attr};

const DOT_CLASS: &str = "gallery-dot";
const THUMBNAIL_CLASS: &str = "gallery-thumbnail";
const ACTIVE_CLASS: &str = "active";

/// Product image carousel: main viewer, prev/next buttons, dots and thumbnails.
#[derive(Debug, Clone)]
pub struct GalleryWidget {
    engine: CarouselEngine,
    main_image: ElementId,
    prev_button: ElementId,
    next_button: ElementId,
    dots_container: Option<ElementId>,
    thumbnails_container: Option<ElementId>,
    dots: Vec<ElementId>,
    thumbnails: Vec<ElementId>,
}

impl GalleryWidget {
    /// Builds dots and thumbnails and projects the first image.
    ///
    /// Requires the main image and both navigation buttons.
    pub fn mount<D: Dom>(ctx: &mut WidgetContext<'_, D>, config: &GalleryConfig) -> Option<Self> {
        let dom = &mut *ctx.dom;
        let (Some(main_image), Some(prev_button), Some(next_button)) = (
            dom.element_by_id(&config.main_image_id),
            dom.element_by_id(&config.prev_button_id),
            dom.element_by_id(&config.next_button_id),
        ) else {
            debug!("gallery anchors missing, skipping gallery");
            return None;
        };

        let engine = match CarouselEngine::new(config.images.clone(), config.alt_prefix.as_str()) {
            Ok(engine) => engine,
            Err(err) => {
                warn!(error = %err, "skipping gallery");
                return None;
            }
        };

        let dots_container = dom.element_by_id(&config.dots_container_id);
        let thumbnails_container = dom.element_by_id(&config.thumbnails_container_id);

        let mut widget = Self {
            engine,
            main_image,
            prev_button,
            next_button,
            dots_container,
            thumbnails_container,
            dots: Vec::new(),
            thumbnails: Vec::new(),
        };
        widget.create_dots(dom);
        widget.create_thumbnails(dom, config.eager_thumbnail_count);
        widget.refresh(dom);

        debug!(
            images = widget.engine.images().len(),
            dots = widget.dots.len(),
            thumbnails = widget.thumbnails.len(),
            "gallery mounted"
        );
        Some(widget)
    }

    #[must_use]
    pub fn engine(&self) -> &CarouselEngine {
        &self.engine
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.engine.current_index()
    }

    #[must_use]
    pub fn main_image(&self) -> ElementId {
        self.main_image
    }

    #[must_use]
    pub fn prev_button(&self) -> ElementId {
        self.prev_button
    }

    #[must_use]
    pub fn next_button(&self) -> ElementId {
        self.next_button
    }

    #[must_use]
    pub fn dots(&self) -> &[ElementId] {
        &self.dots
    }

    #[must_use]
    pub fn thumbnails(&self) -> &[ElementId] {
        &self.thumbnails
    }

    pub fn go_to<D: Dom>(&mut self, dom: &mut D, index: usize) {
        self.navigate(dom, CarouselCommand::GoTo(index));
    }

    pub fn prev<D: Dom>(&mut self, dom: &mut D) {
        self.navigate(dom, CarouselCommand::Prev);
    }

    pub fn next<D: Dom>(&mut self, dom: &mut D) {
        self.navigate(dom, CarouselCommand::Next);
    }

    pub fn handle_event<D: Dom>(
        &mut self,
        ctx: &mut WidgetContext<'_, D>,
        event: &DomEvent,
        phase: Phase,
    ) -> EventOutcome {
        let Some(current) = phase.current() else {
            return EventOutcome::ignored();
        };
        let dom = &mut *ctx.dom;

        match &event.kind {
            EventKind::Click => {
                if let Some(command) = self.click_command(current) {
                    self.navigate(dom, command);
                }
                EventOutcome::ignored()
            }
            EventKind::KeyDown(key) if current == self.main_image => {
                match key {
                    Key::ArrowLeft => self.prev(dom),
                    Key::ArrowRight => self.next(dom),
                    _ => {}
                }
                EventOutcome::ignored()
            }
            EventKind::KeyDown(key) if key.is_activation() => {
                match self.indicator_index(current) {
                    Some(index) => {
                        self.go_to(dom, index);
                        EventOutcome::prevent_default()
                    }
                    None => EventOutcome::ignored(),
                }
            }
            _ => EventOutcome::ignored(),
        }
    }

    fn click_command(&self, current: ElementId) -> Option<CarouselCommand> {
        if current == self.prev_button {
            Some(CarouselCommand::Prev)
        } else if current == self.next_button {
            Some(CarouselCommand::Next)
        } else {
            self.indicator_index(current).map(CarouselCommand::GoTo)
        }
    }

    fn indicator_index(&self, element: ElementId) -> Option<usize> {
        self.dots
            .iter()
            .position(|&dot| dot == element)
            .or_else(|| self.thumbnails.iter().position(|&thumb| thumb == element))
    }

    fn navigate<D: Dom>(&mut self, dom: &mut D, command: CarouselCommand) {
        if self.engine.apply(command) {
            trace!(?command, index = self.engine.current_index(), "gallery navigate");
            self.refresh(dom);
        } else {
            trace!(?command, "gallery command ignored");
        }
    }

    fn create_dots<D: Dom>(&mut self, dom: &mut D) {
        let Some(container) = self.dots_container else {
            return;
        };
        dom.clear_children(container);
        for index in 0..self.engine.images().len() {
            let Some(dot) = dom.create_element("button") else {
                continue;
            };
            dom.set_attribute(dot, "class", DOT_CLASS);
            dom.set_attribute(dot, "role", "tab");
            dom.set_attribute(dot, "aria-label", &format!("Go to image {}", index + 1));
            dom.set_attribute(dot, "aria-selected", bool_attr(index == 0));
            dom.append_child(container, dot);
            self.dots.push(dot);
        }
    }

    fn create_thumbnails<D: Dom>(&mut self, dom: &mut D, eager_count: usize) {
        let Some(container) = self.thumbnails_container else {
            return;
        };
        dom.clear_children(container);
        for (index, src) in self.engine.images().iter().enumerate() {
            let (Some(thumbnail), Some(image)) = (dom.create_element("div"), dom.create_element("img"))
            else {
                continue;
            };
            dom.set_attribute(thumbnail, "class", THUMBNAIL_CLASS);
            dom.set_attribute(thumbnail, "role", "button");
            dom.set_attribute(thumbnail, "tabindex", "0");
            dom.set_attribute(thumbnail, "aria-label", &format!("View image {}", index + 1));

            dom.set_attribute(image, "src", src);
            dom.set_attribute(image, "alt", &format!("Product thumbnail {}", index + 1));
            dom.set_attribute(
                image,
                "loading",
                if index < eager_count { "eager" } else { "lazy" },
            );

            dom.append_child(thumbnail, image);
            dom.append_child(container, thumbnail);
            self.thumbnails.push(thumbnail);
        }
    }

    /// Writes the current index to every projection.
    ///
    /// Indicators are re-queried and all of them reset, so stray `active`
    /// classes left by anything else are cleared too.
    fn refresh<D: Dom>(&self, dom: &mut D) {
        let projection = self.engine.projection();
        dom.set_attribute(self.main_image, "src", &projection.src);
        dom.set_attribute(self.main_image, "alt", &projection.alt);

        if let Some(container) = self.dots_container {
            for (index, dot) in dom
                .query_all(Some(container), &Selector::class(DOT_CLASS))
                .into_iter()
                .enumerate()
            {
                let active = index == projection.active_index;
                dom.set_class(dot, ACTIVE_CLASS, active);
                dom.set_attribute(dot, "aria-selected", bool_attr(active));
            }
        }

        if let Some(container) = self.thumbnails_container {
            for (index, thumbnail) in dom
                .query_all(Some(container), &Selector::class(THUMBNAIL_CLASS))
                .into_iter()
                .enumerate()
            {
                dom.set_class(thumbnail, ACTIVE_CLASS, index == projection.active_index);
            }
        }
    }
}
