//! storefront-ui: interactive widgets for a single-product storefront page.
//!
//! Pure state machines live in [`core`], the DOM surface in [`dom`], and the
//! DOM-bound widgets in [`widgets`]. [`Storefront`] mounts all of them against
//! one document and routes events and host clock callbacks to them.

pub mod api;
pub mod core;
pub mod dom;
pub mod error;
pub mod host;
pub mod telemetry;
pub mod widgets;

#[cfg(feature = "web-adapter")]
pub mod platform_web;

pub use api::{Storefront, StorefrontConfig, StorefrontSnapshot};
pub use error::{WidgetError, WidgetResult};
