//! DOM surface consumed by the widgets.
//!
//! Widgets never talk to a browser directly. They read and write through the
//! [`Dom`] trait, which is implemented by [`MemoryDom`] for headless use and
//! tests, and by `platform_web::WebDom` behind the `web-adapter` feature.

mod memory_dom;

pub use memory_dom::{ElementSpec, MemoryDom, WindowScroll};

use serde::{Deserialize, Serialize};

/// Opaque handle to one element owned by a [`Dom`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(u32);

impl ElementId {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// The selector shapes the widgets need; every variant has a CSS equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// `.name`
    Class(String),
    /// `tag`
    Tag(String),
    /// `input[name="group"]`
    InputName(String),
    /// `a[href^="prefix"]`
    HrefPrefix(String),
}

impl Selector {
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag(name.into())
    }

    #[must_use]
    pub fn input_name(group: impl Into<String>) -> Self {
        Self::InputName(group.into())
    }

    #[must_use]
    pub fn href_prefix(prefix: impl Into<String>) -> Self {
        Self::HrefPrefix(prefix.into())
    }

    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Class(name) => format!(".{name}"),
            Self::Tag(name) => name.clone(),
            Self::InputName(group) => format!("input[name=\"{group}\"]"),
            Self::HrefPrefix(prefix) => format!("a[href^=\"{prefix}\"]"),
        }
    }
}

/// Keyboard keys the widgets react to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Space,
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Maps a `KeyboardEvent.key` string.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Enter and Space activate buttons, headers and thumbnails.
    #[must_use]
    pub fn is_activation(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Click,
    KeyDown(Key),
    Change,
    Submit,
}

/// A DOM event as delivered by the host: what happened and on which element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: ElementId,
}

impl DomEvent {
    #[must_use]
    pub fn new(kind: EventKind, target: ElementId) -> Self {
        Self { kind, target }
    }

    #[must_use]
    pub fn click(target: ElementId) -> Self {
        Self::new(EventKind::Click, target)
    }

    #[must_use]
    pub fn key_down(target: ElementId, key: Key) -> Self {
        Self::new(EventKind::KeyDown(key), target)
    }

    #[must_use]
    pub fn change(target: ElementId) -> Self {
        Self::new(EventKind::Change, target)
    }

    #[must_use]
    pub fn submit(target: ElementId) -> Self {
        Self::new(EventKind::Submit, target)
    }
}

/// What the host must do with the native event after dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventOutcome {
    pub default_prevented: bool,
}

impl EventOutcome {
    #[must_use]
    pub const fn ignored() -> Self {
        Self {
            default_prevented: false,
        }
    }

    #[must_use]
    pub const fn prevent_default() -> Self {
        Self {
            default_prevented: true,
        }
    }

    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            default_prevented: self.default_prevented || other.default_prevented,
        }
    }
}

/// Vertical alignment for [`Dom::scroll_into_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollAlign {
    Start,
    Center,
    End,
    Nearest,
}

/// Query and mutation surface over one document.
///
/// Mutations are infallible from the widget's point of view; backends log
/// failures they cannot report (a detached node, a rejected style value).
/// Window scrolling and scroll-into-view are always smooth.
pub trait Dom {
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Matches in document order. `scope = None` searches the whole document,
    /// otherwise only descendants of `scope`.
    fn query_all(&self, scope: Option<ElementId>, selector: &Selector) -> Vec<ElementId>;

    fn query_first(&self, scope: Option<ElementId>, selector: &Selector) -> Option<ElementId> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn parent_element(&self, element: ElementId) -> Option<ElementId>;
    fn next_element_sibling(&self, element: ElementId) -> Option<ElementId>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn has_class(&self, element: ElementId, class: &str) -> bool;
    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool);

    fn text_content(&self, element: ElementId) -> String;
    fn set_text_content(&mut self, element: ElementId, text: &str);

    fn style_property(&self, element: ElementId, property: &str) -> Option<String>;
    fn set_style_property(&mut self, element: ElementId, property: &str, value: &str);

    fn input_value(&self, element: ElementId) -> String;
    fn set_input_value(&mut self, element: ElementId, value: &str);
    fn is_checked(&self, element: ElementId) -> bool;

    /// Creates a detached element; `None` when the backend refuses the tag.
    fn create_element(&mut self, tag: &str) -> Option<ElementId>;
    fn append_child(&mut self, parent: ElementId, child: ElementId);
    fn clear_children(&mut self, parent: ElementId);

    /// `true` when `element` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool;
    fn is_attached(&self, element: ElementId) -> bool;

    fn scroll_height(&self, element: ElementId) -> f64;
    fn bounding_client_top(&self, element: ElementId) -> f64;
    fn page_y_offset(&self) -> f64;
    fn scroll_window_to(&mut self, top: f64);
    fn scroll_into_view(&mut self, element: ElementId, align: ScrollAlign);
    fn focus(&mut self, element: ElementId);

    /// Blocking user-facing message (an `alert` in browsers).
    fn notify(&mut self, message: &str);
}
