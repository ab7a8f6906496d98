//! Host-driven clock and capability plumbing.
//!
//! Widgets never own timers, frame callbacks or observers. They push
//! [`HostRequest`]s into a [`HostQueue`]; the embedding host drains the queue,
//! services each request with whatever its event loop offers, and answers by
//! calling back into [`crate::api::Storefront`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dom::ElementId;

/// What the embedding environment can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCapabilities {
    /// Viewport visibility detection (an `IntersectionObserver` in browsers).
    pub visibility_observer: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            visibility_observer: true,
        }
    }
}

/// Identifies one deferred call requested through [`HostRequest::Timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// One visibility observation reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityEntry {
    pub target: ElementId,
    /// Fraction of the target's area inside the viewport, `0.0..=1.0`.
    pub intersection_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostRequest {
    /// Call `Storefront::animation_frame` once on the next rendered frame.
    AnimationFrame,
    /// Call `Storefront::timeout_elapsed(token)` once after `delay`.
    Timeout { token: TimerToken, delay: Duration },
    /// Start reporting visibility entries for `target` when `threshold` is crossed.
    ObserveVisibility { target: ElementId, threshold: f64 },
    /// Stop reporting visibility entries for `target`.
    DisconnectVisibility { target: ElementId },
    /// Hand a validated newsletter address to the backend (not implemented here).
    NewsletterSubscription { email: String },
}

/// Pending requests for the host, filled by widgets during one call.
#[derive(Debug, Default)]
pub struct HostQueue {
    requests: Vec<HostRequest>,
    next_timer: u64,
    frame_requested: bool,
}

impl HostQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a frame unless one is already outstanding.
    pub fn request_animation_frame(&mut self) {
        if self.frame_requested {
            return;
        }
        self.frame_requested = true;
        self.requests.push(HostRequest::AnimationFrame);
    }

    /// Marks the outstanding frame request as answered.
    pub fn frame_delivered(&mut self) {
        self.frame_requested = false;
    }

    #[must_use]
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    pub fn set_timeout(&mut self, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_timer);
        self.next_timer += 1;
        self.requests.push(HostRequest::Timeout { token, delay });
        token
    }

    pub fn observe_visibility(&mut self, target: ElementId, threshold: f64) {
        self.requests
            .push(HostRequest::ObserveVisibility { target, threshold });
    }

    pub fn disconnect_visibility(&mut self, target: ElementId) {
        self.requests
            .push(HostRequest::DisconnectVisibility { target });
    }

    pub fn push(&mut self, request: HostRequest) {
        self.requests.push(request);
    }

    #[must_use]
    pub fn pending(&self) -> &[HostRequest] {
        &self.requests
    }

    pub fn drain(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }
}
