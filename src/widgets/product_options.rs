use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::api::ProductOptionsConfig;
use crate::core::{CartLink, CartLinkComposer, ChoiceOption, PanelVisibilitySet, SelectionModel};
use crate::dom::{Dom, DomEvent, ElementId, EventKind, EventOutcome, ScrollAlign, Selector};
use crate::host::{HostQueue, TimerToken};

use super::{Phase, WidgetContext};

/// One radio group bound to its input elements, in option order.
#[derive(Debug, Clone)]
struct RadioGroup {
    inputs: Vec<ElementId>,
    model: SelectionModel,
}

impl RadioGroup {
    fn mount<D: Dom>(dom: &D, group: &str, id_attribute: &str, label_class: &str) -> Option<Self> {
        let inputs = dom.query_all(None, &Selector::input_name(group));
        if inputs.is_empty() {
            return None;
        }
        let options = inputs
            .iter()
            .map(|&input| parse_option(dom, input, id_attribute, label_class))
            .collect();
        let mut model = SelectionModel::new(group, options);
        model.sync_checked(inputs.iter().map(|&input| dom.is_checked(input)));
        Some(Self { inputs, model })
    }

    fn owns(&self, element: ElementId) -> bool {
        self.inputs.contains(&element)
    }

    fn sync<D: Dom>(&mut self, dom: &D) -> bool {
        self.model
            .sync_checked(self.inputs.iter().map(|&input| dom.is_checked(input)))
    }
}

fn parse_option<D: Dom>(
    dom: &D,
    input: ElementId,
    id_attribute: &str,
    label_class: &str,
) -> ChoiceOption {
    let value = dom.input_value(input);
    let external_id = dom.attribute(input, id_attribute).unwrap_or_else(|| {
        warn!(
            attribute = id_attribute,
            value = %value,
            "option has no external id, falling back to its value"
        );
        value.clone()
    });
    let display_label = dom
        .next_element_sibling(input)
        .and_then(|sibling| dom.query_first(Some(sibling), &Selector::class(label_class)))
        .map(|label| dom.text_content(label).trim().to_owned())
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| value.clone());
    ChoiceOption::new(value, external_id, display_label)
}

/// Fragrance + purchase-type selector driving the add-to-cart link and the
/// purchase detail panels.
#[derive(Debug, Clone)]
pub struct ProductOptionsWidget {
    fragrance: RadioGroup,
    purchase: RadioGroup,
    add_to_cart: ElementId,
    composer: CartLinkComposer,
    panels: PanelVisibilitySet<ElementId>,
    scroll_delay: Duration,
    pending_scrolls: Vec<(TimerToken, ElementId)>,
    cart_link: Option<CartLink>,
}

impl ProductOptionsWidget {
    /// Requires both radio groups and the add-to-cart button. Detail panels are
    /// optional individually.
    pub fn mount<D: Dom>(
        ctx: &mut WidgetContext<'_, D>,
        config: &ProductOptionsConfig,
    ) -> Option<Self> {
        let dom = &*ctx.dom;
        let fragrance = RadioGroup::mount(
            dom,
            &config.fragrance_group,
            &config.fragrance_id_attribute,
            &config.fragrance_label_class,
        );
        let purchase = RadioGroup::mount(
            dom,
            &config.purchase_group,
            &config.purchase_id_attribute,
            &config.purchase_label_class,
        );
        let add_to_cart = dom.element_by_id(&config.add_to_cart_id);
        let (Some(fragrance), Some(purchase), Some(add_to_cart)) = (fragrance, purchase, add_to_cart)
        else {
            debug!("product option anchors missing, skipping product options");
            return None;
        };

        let composer =
            match CartLinkComposer::new(&config.cart_base_url, config.cart_label_prefix.as_str()) {
                Ok(composer) => composer,
                Err(err) => {
                    warn!(error = %err, "skipping product options");
                    return None;
                }
            };

        let mut panels = PanelVisibilitySet::new();
        for binding in &config.panels {
            match dom.element_by_id(&binding.element_id) {
                Some(panel) => {
                    panels.insert(binding.tag.as_str(), panel);
                }
                None => debug!(tag = %binding.tag, "detail panel missing"),
            }
        }

        let mut widget = Self {
            fragrance,
            purchase,
            add_to_cart,
            composer,
            panels,
            scroll_delay: Duration::from_millis(config.panel_scroll_delay_ms),
            pending_scrolls: Vec::new(),
            cart_link: None,
        };
        widget.update_panels(ctx);
        widget.update_cart_link(&mut *ctx.dom);

        debug!(
            fragrances = widget.fragrance.inputs.len(),
            purchase_types = widget.purchase.inputs.len(),
            panels = widget.panels.len(),
            "product options mounted"
        );
        Some(widget)
    }

    #[must_use]
    pub fn fragrance(&self) -> &SelectionModel {
        &self.fragrance.model
    }

    #[must_use]
    pub fn purchase(&self) -> &SelectionModel {
        &self.purchase.model
    }

    #[must_use]
    pub fn cart_link(&self) -> Option<&CartLink> {
        self.cart_link.as_ref()
    }

    #[must_use]
    pub fn visible_panel_tag(&self) -> Option<&str> {
        self.panels.visible_tag()
    }

    #[must_use]
    pub fn add_to_cart(&self) -> ElementId {
        self.add_to_cart
    }

    pub fn handle_event<D: Dom>(
        &mut self,
        ctx: &mut WidgetContext<'_, D>,
        event: &DomEvent,
        phase: Phase,
    ) -> EventOutcome {
        let (EventKind::Change, Some(current)) = (&event.kind, phase.current()) else {
            return EventOutcome::ignored();
        };

        if self.fragrance.owns(current) {
            self.fragrance.sync(&*ctx.dom);
            trace!(
                selected = ?self.fragrance.model.selected_index(),
                "fragrance selection changed"
            );
            self.update_cart_link(&mut *ctx.dom);
        } else if self.purchase.owns(current) {
            self.purchase.sync(&*ctx.dom);
            trace!(
                selected = ?self.purchase.model.selected_index(),
                "purchase selection changed"
            );
            self.update_panels(ctx);
            self.update_cart_link(&mut *ctx.dom);
        }
        EventOutcome::ignored()
    }

    /// Runs a deferred scroll if `token` belongs to this widget.
    ///
    /// Returns `false` for foreign tokens.
    pub fn handle_timeout<D: Dom>(&mut self, dom: &mut D, token: TimerToken) -> bool {
        let Some(position) = self
            .pending_scrolls
            .iter()
            .position(|(pending, _)| *pending == token)
        else {
            return false;
        };
        let (_, panel) = self.pending_scrolls.swap_remove(position);
        if dom.is_attached(panel) {
            dom.scroll_into_view(panel, ScrollAlign::Nearest);
        } else {
            trace!(panel = panel.raw(), "panel detached before deferred scroll");
        }
        true
    }

    fn update_cart_link<D: Dom>(&mut self, dom: &mut D) {
        let Some(link) = self
            .composer
            .compose(self.fragrance.model.current(), self.purchase.model.current())
        else {
            trace!("selection incomplete, keeping previous cart link");
            return;
        };
        dom.set_attribute(self.add_to_cart, "href", &link.href);
        dom.set_attribute(self.add_to_cart, "aria-label", &link.aria_label);
        self.cart_link = Some(link);
    }

    /// Shows the panel of the selected purchase type and schedules the
    /// cosmetic scroll. Leaves panels untouched while nothing is selected.
    fn update_panels<D: Dom>(&mut self, ctx: &mut WidgetContext<'_, D>) {
        let Some(tag) = self.purchase.model.current().map(|option| option.value.clone()) else {
            return;
        };
        let shown = self.panels.set_visible(&tag).copied();
        for (_, &panel, visible) in self.panels.visibility() {
            ctx.dom
                .set_style_property(panel, "display", if visible { "block" } else { "none" });
        }
        if let Some(panel) = shown {
            self.schedule_scroll(&mut *ctx.host, panel);
        }
    }

    /// At most one pending scroll per panel; a newer request supersedes the
    /// older token, which then answers as foreign.
    fn schedule_scroll(&mut self, host: &mut HostQueue, panel: ElementId) {
        let token = host.set_timeout(self.scroll_delay);
        match self
            .pending_scrolls
            .iter_mut()
            .find(|(_, pending)| *pending == panel)
        {
            Some(entry) => entry.0 = token,
            None => self.pending_scrolls.push((token, panel)),
        }
    }

    #[must_use]
    pub fn pending_scroll_count(&self) -> usize {
        self.pending_scrolls.len()
    }
}
