use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::dom::{Dom, DomEvent, ElementId, EventOutcome};
use crate::error::WidgetResult;
use crate::host::{HostQueue, HostRequest, TimerToken, VisibilityEntry};
use crate::widgets::{
    AccordionWidget, AnchorScrollWidget, GalleryWidget, NavMenuWidget, NewsletterWidget, Phase,
    ProductOptionsWidget, StatsWidget, WidgetContext,
};

use super::validation::validate_config;
use super::{GallerySnapshot, ProductOptionsSnapshot, StorefrontConfig, StorefrontSnapshot};

type PropagationPath = SmallVec<[ElementId; 8]>;

/// Every widget of one page, mounted against one [`Dom`].
///
/// The host feeds DOM events through [`Storefront::dispatch`] and answers the
/// requests returned by [`Storefront::drain_host_requests`] through the
/// clock inputs (`animation_frame`, `timeout_elapsed`, `visibility_changed`).
pub struct Storefront<D: Dom> {
    dom: D,
    host: HostQueue,
    nav: Option<NavMenuWidget>,
    gallery: Option<GalleryWidget>,
    product_options: Option<ProductOptionsWidget>,
    stats: Option<StatsWidget>,
    accordion: Option<AccordionWidget>,
    anchor_scroll: Option<AnchorScrollWidget>,
    newsletter: Option<NewsletterWidget>,
}

impl<D: Dom> Storefront<D> {
    /// Validates `config` and mounts every widget whose anchors exist.
    pub fn mount(mut dom: D, config: StorefrontConfig) -> WidgetResult<Self> {
        validate_config(&config)?;

        let mut host = HostQueue::new();
        let mut ctx = WidgetContext::new(&mut dom, &mut host);
        let nav = NavMenuWidget::mount(&mut ctx, &config.nav);
        let gallery = GalleryWidget::mount(&mut ctx, &config.gallery);
        let product_options = ProductOptionsWidget::mount(&mut ctx, &config.product_options);
        let stats = StatsWidget::mount(&mut ctx, &config.stats, config.capabilities);
        let accordion = AccordionWidget::mount(&mut ctx, &config.accordion);
        let anchor_scroll = AnchorScrollWidget::mount(&mut ctx, &config.anchor_scroll);
        let newsletter = NewsletterWidget::mount(&mut ctx, &config.newsletter);

        info!(
            nav = nav.is_some(),
            gallery = gallery.is_some(),
            product_options = product_options.is_some(),
            stats = stats.is_some(),
            accordion = accordion.is_some(),
            anchor_scroll = anchor_scroll.is_some(),
            newsletter = newsletter.is_some(),
            "storefront mounted"
        );

        Ok(Self {
            dom,
            host,
            nav,
            gallery,
            product_options,
            stats,
            accordion,
            anchor_scroll,
            newsletter,
        })
    }

    /// Delivers `event` along the target's ancestor path, innermost first,
    /// then once at document level.
    pub fn dispatch(&mut self, event: &DomEvent) -> EventOutcome {
        let path = self.propagation_path(event.target);
        let mut outcome = EventOutcome::ignored();
        for &element in &path {
            outcome = outcome.merge(self.deliver(event, Phase::Element(element)));
        }
        outcome = outcome.merge(self.deliver(event, Phase::Document));
        trace!(
            kind = ?event.kind,
            target = event.target.raw(),
            depth = path.len(),
            default_prevented = outcome.default_prevented,
            "event dispatched"
        );
        outcome
    }

    /// Answers an [`HostRequest::AnimationFrame`].
    pub fn animation_frame(&mut self, timestamp_ms: f64) {
        self.host.frame_delivered();
        if let Some(stats) = self.stats.as_mut() {
            let mut ctx = WidgetContext::new(&mut self.dom, &mut self.host);
            stats.handle_frame(&mut ctx, timestamp_ms);
        }
    }

    /// Answers an [`HostRequest::Timeout`]. Returns `false` for unknown tokens.
    pub fn timeout_elapsed(&mut self, token: TimerToken) -> bool {
        let handled = self
            .product_options
            .as_mut()
            .is_some_and(|options| options.handle_timeout(&mut self.dom, token));
        if !handled {
            debug!(token = token.raw(), "timeout for unknown token");
        }
        handled
    }

    /// Answers an [`HostRequest::ObserveVisibility`] with fresh entries.
    pub fn visibility_changed(&mut self, entries: &[VisibilityEntry]) {
        if let Some(stats) = self.stats.as_mut() {
            let mut ctx = WidgetContext::new(&mut self.dom, &mut self.host);
            stats.handle_visibility(&mut ctx, entries);
        }
    }

    pub fn drain_host_requests(&mut self) -> Vec<HostRequest> {
        self.host.drain()
    }

    #[must_use]
    pub fn pending_host_requests(&self) -> &[HostRequest] {
        self.host.pending()
    }

    #[must_use]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    #[must_use]
    pub fn into_dom(self) -> D {
        self.dom
    }

    #[must_use]
    pub fn nav(&self) -> Option<&NavMenuWidget> {
        self.nav.as_ref()
    }

    #[must_use]
    pub fn gallery(&self) -> Option<&GalleryWidget> {
        self.gallery.as_ref()
    }

    #[must_use]
    pub fn product_options(&self) -> Option<&ProductOptionsWidget> {
        self.product_options.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> Option<&StatsWidget> {
        self.stats.as_ref()
    }

    #[must_use]
    pub fn accordion(&self) -> Option<&AccordionWidget> {
        self.accordion.as_ref()
    }

    #[must_use]
    pub fn anchor_scroll(&self) -> Option<&AnchorScrollWidget> {
        self.anchor_scroll.as_ref()
    }

    #[must_use]
    pub fn newsletter(&self) -> Option<&NewsletterWidget> {
        self.newsletter.as_ref()
    }

    /// Builds a deterministic snapshot useful for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> StorefrontSnapshot {
        StorefrontSnapshot {
            nav_open: self.nav.as_ref().map(NavMenuWidget::is_open),
            gallery: self.gallery.as_ref().map(|gallery| {
                let projection = gallery.engine().projection();
                GallerySnapshot {
                    current_index: projection.active_index,
                    image_count: gallery.engine().images().len(),
                    src: projection.src,
                    alt: projection.alt,
                }
            }),
            product_options: self
                .product_options
                .as_ref()
                .map(|options| ProductOptionsSnapshot {
                    fragrance: options.fragrance().current().cloned(),
                    purchase: options.purchase().current().cloned(),
                    cart_link: options.cart_link().cloned(),
                    visible_panel: options.visible_panel_tag().map(str::to_owned),
                }),
            counters: self.stats.as_ref().map(|stats| stats.group().clone()),
            accordion: self.accordion.as_ref().map(AccordionWidget::state),
            newsletter_submissions: self.newsletter.as_ref().map(NewsletterWidget::submitted),
        }
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> WidgetResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }

    fn propagation_path(&self, target: ElementId) -> PropagationPath {
        let mut path = PropagationPath::new();
        let mut cursor = Some(target);
        while let Some(element) = cursor {
            path.push(element);
            cursor = self.dom.parent_element(element);
        }
        path
    }

    fn deliver(&mut self, event: &DomEvent, phase: Phase) -> EventOutcome {
        let mut ctx = WidgetContext::new(&mut self.dom, &mut self.host);
        let mut outcome = EventOutcome::ignored();
        if let Some(nav) = self.nav.as_mut() {
            outcome = outcome.merge(nav.handle_event(&mut ctx, event, phase));
        }
        if let Some(gallery) = self.gallery.as_mut() {
            outcome = outcome.merge(gallery.handle_event(&mut ctx, event, phase));
        }
        if let Some(options) = self.product_options.as_mut() {
            outcome = outcome.merge(options.handle_event(&mut ctx, event, phase));
        }
        if let Some(accordion) = self.accordion.as_mut() {
            outcome = outcome.merge(accordion.handle_event(&mut ctx, event, phase));
        }
        if let Some(anchor_scroll) = self.anchor_scroll.as_mut() {
            outcome = outcome.merge(anchor_scroll.handle_event(&mut ctx, event, phase));
        }
        if let Some(newsletter) = self.newsletter.as_mut() {
            outcome = outcome.merge(newsletter.handle_event(&mut ctx, event, phase));
        }
        outcome
    }
}
