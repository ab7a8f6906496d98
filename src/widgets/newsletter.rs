use tracing::{debug, trace};

use crate::api::NewsletterConfig;
use crate::core::is_valid_email;
use crate::dom::{Dom, DomEvent, ElementId, EventKind, EventOutcome, Selector};
use crate::host::HostRequest;

use super::{Phase, WidgetContext};

/// Newsletter signup form. Delivery itself is left to the host.
#[derive(Debug, Clone)]
pub struct NewsletterWidget {
    form: ElementId,
    email_input: ElementId,
    success_message: String,
    invalid_message: String,
    submitted: usize,
}

impl NewsletterWidget {
    pub fn mount<D: Dom>(ctx: &mut WidgetContext<'_, D>, config: &NewsletterConfig) -> Option<Self> {
        let dom = &*ctx.dom;
        let (Some(form), Some(email_input)) = (
            dom.query_first(None, &Selector::class(config.form_class.as_str())),
            dom.element_by_id(&config.email_input_id),
        ) else {
            debug!("newsletter form missing, skipping newsletter");
            return None;
        };
        debug!("newsletter mounted");
        Some(Self {
            form,
            email_input,
            success_message: config.success_message.clone(),
            invalid_message: config.invalid_message.clone(),
            submitted: 0,
        })
    }

    #[must_use]
    pub fn form(&self) -> ElementId {
        self.form
    }

    #[must_use]
    pub fn email_input(&self) -> ElementId {
        self.email_input
    }

    /// Number of addresses accepted so far.
    #[must_use]
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn handle_event<D: Dom>(
        &mut self,
        ctx: &mut WidgetContext<'_, D>,
        event: &DomEvent,
        phase: Phase,
    ) -> EventOutcome {
        if !matches!(event.kind, EventKind::Submit) || phase.current() != Some(self.form) {
            return EventOutcome::ignored();
        }

        let email = ctx.dom.input_value(self.email_input).trim().to_owned();
        if is_valid_email(&email) {
            debug!("newsletter address accepted");
            ctx.host.push(HostRequest::NewsletterSubscription { email });
            ctx.dom.notify(&self.success_message);
            ctx.dom.set_input_value(self.email_input, "");
            self.submitted += 1;
        } else {
            trace!("newsletter address rejected");
            ctx.dom.notify(&self.invalid_message);
            ctx.dom.focus(self.email_input);
        }
        EventOutcome::prevent_default()
    }
}
