use tracing::{debug, trace, warn};

use crate::api::StatsConfig;
use crate::core::{CounterGroup, TriggerPhase, parse_counter_target};
use crate::dom::{Dom, ElementId, Selector};
use crate::host::{HostCapabilities, VisibilityEntry};

use super::WidgetContext;

/// Percentage counters animated once when the stats section scrolls into view.
#[derive(Debug, Clone)]
pub struct StatsWidget {
    counters: Vec<ElementId>,
    group: CounterGroup,
    container: Option<ElementId>,
    threshold: f64,
    suffix: String,
}

impl StatsWidget {
    /// Mounts every counter with a numeric target.
    ///
    /// When visibility detection is unavailable or the container is missing
    /// the counters start right away instead of waiting for a trigger.
    pub fn mount<D: Dom>(
        ctx: &mut WidgetContext<'_, D>,
        config: &StatsConfig,
        capabilities: HostCapabilities,
    ) -> Option<Self> {
        let candidates = ctx
            .dom
            .query_all(None, &Selector::class(config.counter_class.as_str()));
        if candidates.is_empty() {
            debug!("no stat counters, skipping stats");
            return None;
        }

        let mut counters = Vec::with_capacity(candidates.len());
        let mut targets = Vec::with_capacity(candidates.len());
        for element in candidates {
            let raw = ctx
                .dom
                .attribute(element, &config.target_attribute)
                .unwrap_or_default();
            match parse_counter_target(&raw) {
                Ok(target) => {
                    counters.push(element);
                    targets.push(target);
                }
                Err(err) => warn!(error = %err, element = element.raw(), "skipping counter"),
            }
        }

        let mut widget = Self {
            counters,
            group: CounterGroup::new(&targets, config.duration_ms),
            container: None,
            threshold: config.visibility_threshold,
            suffix: config.value_suffix.clone(),
        };

        let container = ctx.dom.element_by_id(&config.container_id);
        match container {
            Some(container) if capabilities.visibility_observer => {
                widget.container = Some(container);
                ctx.host.observe_visibility(container, widget.threshold);
                debug!(
                    counters = widget.counters.len(),
                    threshold = widget.threshold,
                    "stats waiting for visibility"
                );
            }
            _ => {
                debug!(
                    observer = capabilities.visibility_observer,
                    container = container.is_some(),
                    "stats trigger unavailable, starting immediately"
                );
                widget.start(ctx);
            }
        }
        Some(widget)
    }

    #[must_use]
    pub fn group(&self) -> &CounterGroup {
        &self.group
    }

    #[must_use]
    pub fn counters(&self) -> &[ElementId] {
        &self.counters
    }

    #[must_use]
    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.group.is_running()
    }

    /// Fires the one-shot trigger on the first sufficiently visible entry for
    /// the container. Later entries are ignored.
    pub fn handle_visibility<D: Dom>(
        &mut self,
        ctx: &mut WidgetContext<'_, D>,
        entries: &[VisibilityEntry],
    ) {
        let Some(container) = self.container else {
            return;
        };
        if self.group.trigger() == TriggerPhase::Fired {
            return;
        }
        let visible = entries.iter().any(|entry| {
            entry.target == container && entry.intersection_ratio >= self.threshold
        });
        if visible {
            ctx.host.disconnect_visibility(container);
            self.start(ctx);
        }
    }

    /// Steps running counters and writes their text. Requests another frame
    /// while any counter is still running.
    pub fn handle_frame<D: Dom>(&mut self, ctx: &mut WidgetContext<'_, D>, timestamp_ms: f64) {
        for (index, value) in self.group.step(timestamp_ms) {
            let element = self.counters[index];
            if !ctx.dom.is_attached(element) {
                trace!(element = element.raw(), "counter detached, skipping frame write");
                continue;
            }
            ctx.dom
                .set_text_content(element, &format!("{value}{}", self.suffix));
        }
        if self.group.is_running() {
            ctx.host.request_animation_frame();
        } else {
            trace!("stat counters finished");
        }
    }

    fn start<D: Dom>(&mut self, ctx: &mut WidgetContext<'_, D>) {
        if self.group.fire() {
            debug!(counters = self.counters.len(), "stat counters started");
            if self.group.is_running() {
                ctx.host.request_animation_frame();
            }
        }
    }
}
