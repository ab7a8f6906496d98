//! Pure widget state machines.
//!
//! Nothing in this module touches the DOM; widgets in [`crate::widgets`] project
//! these states onto a [`crate::dom::Dom`].

pub mod accordion;
pub mod anchor_scroll;
pub mod carousel;
pub mod cart_link;
pub mod counter;
pub mod email;
pub mod nav;
pub mod panels;
pub mod selection;

pub use accordion::AccordionState;
pub use anchor_scroll::{
    AnchorDestination, DEFAULT_HEADER_OFFSET_PX, resolve_anchor, scroll_offset_for,
};
pub use carousel::{CarouselCommand, CarouselEngine, CarouselProjection, CarouselState};
pub use cart_link::{
    CartLink, CartLinkComposer, DEFAULT_CART_BASE_URL, DEFAULT_CART_LABEL_PREFIX,
};
pub use counter::{
    CounterAnimation, CounterGroup, CounterPhase, DEFAULT_COUNTER_DURATION_MS, TriggerPhase,
    ease_out_cubic, eased_value, parse_counter_target,
};
pub use email::is_valid_email;
pub use nav::NavMenuState;
pub use panels::PanelVisibilitySet;
pub use selection::{ChoiceOption, SelectionModel};
