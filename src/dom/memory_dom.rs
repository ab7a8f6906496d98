use indexmap::{IndexMap, IndexSet};
use tracing::warn;

use super::{Dom, ElementId, ScrollAlign, Selector};

/// Builder for elements inserted into a [`MemoryDom`].
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    text: Option<String>,
    value: Option<String>,
    checked: bool,
    scroll_height: f64,
    client_top: f64,
}

impl ElementSpec {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    #[must_use]
    pub fn scroll_height(mut self, px: f64) -> Self {
        self.scroll_height = px;
        self
    }

    #[must_use]
    pub fn client_top(mut self, px: f64) -> Self {
        self.client_top = px;
        self
    }
}

/// One recorded `scroll_window_to` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowScroll {
    pub top: f64,
}

#[derive(Debug, Clone, Default)]
struct MemoryNode {
    tag: String,
    attributes: IndexMap<String, String>,
    classes: IndexSet<String>,
    style: IndexMap<String, String>,
    text: String,
    value: String,
    checked: bool,
    scroll_height: f64,
    client_top: f64,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

/// Headless in-memory document used by tests, benchmarks and server-side
/// previews.
///
/// Besides the tree it records the side effects a browser would perform
/// (window scrolls, scroll-into-view calls, focus, notifications) so callers
/// can assert on them.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<MemoryNode>,
    body: ElementId,
    page_y_offset: f64,
    focused: Option<ElementId>,
    window_scrolls: Vec<WindowScroll>,
    scrolled_into_view: Vec<(ElementId, ScrollAlign)>,
    notifications: Vec<String>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    #[must_use]
    pub fn new() -> Self {
        let body = MemoryNode {
            tag: "body".to_owned(),
            ..MemoryNode::default()
        };
        Self {
            nodes: vec![body],
            body: ElementId::from_raw(0),
            page_y_offset: 0.0,
            focused: None,
            window_scrolls: Vec::new(),
            scrolled_into_view: Vec::new(),
            notifications: Vec::new(),
        }
    }

    #[must_use]
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Creates an element from `spec` and appends it to `parent`.
    pub fn insert(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let element = self.push_node(MemoryNode {
            tag: spec.tag.to_ascii_lowercase(),
            attributes: spec.attributes.into_iter().collect(),
            classes: spec.classes.into_iter().collect(),
            text: spec.text.unwrap_or_default(),
            value: spec.value.unwrap_or_default(),
            checked: spec.checked,
            scroll_height: spec.scroll_height,
            client_top: spec.client_top,
            ..MemoryNode::default()
        });
        self.append_child(parent, element);
        element
    }

    #[must_use]
    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|node| node.tag.as_str())
    }

    #[must_use]
    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.node(element)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Checks or unchecks an input. Checking a radio unchecks the other radios
    /// of its group, like a browser does.
    pub fn set_checked(&mut self, element: ElementId, checked: bool) {
        if checked {
            if let Some(group) = self.radio_group(element) {
                for other in self.query_all(None, &Selector::InputName(group)) {
                    if let Some(node) = self.node_mut(other) {
                        node.checked = false;
                    }
                }
            }
        }
        if let Some(node) = self.node_mut(element) {
            node.checked = checked;
        }
    }

    /// Removes `element` from its parent; the subtree becomes detached.
    pub fn detach(&mut self, element: ElementId) {
        let Some(parent) = self.node(element).and_then(|node| node.parent) else {
            return;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|&child| child != element);
        }
        if let Some(node) = self.node_mut(element) {
            node.parent = None;
        }
    }

    pub fn set_scroll_height(&mut self, element: ElementId, px: f64) {
        if let Some(node) = self.node_mut(element) {
            node.scroll_height = px;
        }
    }

    pub fn set_client_top(&mut self, element: ElementId, px: f64) {
        if let Some(node) = self.node_mut(element) {
            node.client_top = px;
        }
    }

    pub fn set_page_y_offset(&mut self, px: f64) {
        self.page_y_offset = px;
    }

    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    #[must_use]
    pub fn window_scrolls(&self) -> &[WindowScroll] {
        &self.window_scrolls
    }

    #[must_use]
    pub fn scrolled_into_view(&self) -> &[(ElementId, ScrollAlign)] {
        &self.scrolled_into_view
    }

    #[must_use]
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    fn push_node(&mut self, node: MemoryNode) -> ElementId {
        let raw = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(node);
        ElementId::from_raw(raw)
    }

    fn node(&self, element: ElementId) -> Option<&MemoryNode> {
        self.nodes.get(element.raw() as usize)
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(element.raw() as usize)
    }

    fn radio_group(&self, element: ElementId) -> Option<String> {
        let node = self.node(element)?;
        let is_radio = node.tag == "input"
            && node.attributes.get("type").map(String::as_str) == Some("radio");
        if is_radio {
            node.attributes.get("name").cloned()
        } else {
            None
        }
    }

    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut ordered = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(element) = stack.pop() {
            ordered.push(element);
            stack.extend(self.children(element).iter().rev().copied());
        }
        ordered
    }

    fn matches(&self, element: ElementId, selector: &Selector) -> bool {
        let Some(node) = self.node(element) else {
            return false;
        };
        match selector {
            Selector::Class(name) => node.classes.contains(name),
            Selector::Tag(tag) => node.tag.eq_ignore_ascii_case(tag),
            Selector::InputName(group) => {
                node.tag == "input" && node.attributes.get("name") == Some(group)
            }
            Selector::HrefPrefix(prefix) => {
                node.tag == "a"
                    && node
                        .attributes
                        .get("href")
                        .is_some_and(|href| href.starts_with(prefix.as_str()))
            }
        }
    }

    fn collect_text(&self, element: ElementId, out: &mut String) {
        if let Some(node) = self.node(element) {
            out.push_str(&node.text);
            for &child in &node.children {
                self.collect_text(child, out);
            }
        }
    }
}

impl Dom for MemoryDom {
    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.descendants(self.body).into_iter().find(|&element| {
            self.node(element)
                .and_then(|node| node.attributes.get("id"))
                .is_some_and(|value| value == id)
        })
    }

    fn query_all(&self, scope: Option<ElementId>, selector: &Selector) -> Vec<ElementId> {
        self.descendants(scope.unwrap_or(self.body))
            .into_iter()
            .filter(|&element| self.matches(element, selector))
            .collect()
    }

    fn parent_element(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|node| node.parent)
    }

    fn next_element_sibling(&self, element: ElementId) -> Option<ElementId> {
        let parent = self.parent_element(element)?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|&child| child == element)?;
        siblings.get(position + 1).copied()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        let node = self.node(element)?;
        if name == "class" {
            if node.classes.is_empty() {
                return None;
            }
            return Some(node.classes.iter().cloned().collect::<Vec<_>>().join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(node) = self.node_mut(element) else {
            warn!(
                element = element.raw(),
                attribute = name,
                "set_attribute on unknown element"
            );
            return;
        };
        if name == "class" {
            node.classes = value.split_whitespace().map(str::to_owned).collect();
        } else {
            node.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.node(element)
            .is_some_and(|node| node.classes.contains(class))
    }

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) {
        if let Some(node) = self.node_mut(element) {
            if enabled {
                node.classes.insert(class.to_owned());
            } else {
                node.classes.shift_remove(class);
            }
        }
    }

    fn text_content(&self, element: ElementId) -> String {
        let mut text = String::new();
        self.collect_text(element, &mut text);
        text
    }

    fn set_text_content(&mut self, element: ElementId, text: &str) {
        self.clear_children(element);
        if let Some(node) = self.node_mut(element) {
            node.text = text.to_owned();
        }
    }

    fn style_property(&self, element: ElementId, property: &str) -> Option<String> {
        self.node(element)
            .and_then(|node| node.style.get(property).cloned())
    }

    fn set_style_property(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.style.insert(property.to_owned(), value.to_owned());
        }
    }

    fn input_value(&self, element: ElementId) -> String {
        self.node(element)
            .map(|node| node.value.clone())
            .unwrap_or_default()
    }

    fn set_input_value(&mut self, element: ElementId, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.value = value.to_owned();
        }
    }

    fn is_checked(&self, element: ElementId) -> bool {
        self.node(element).is_some_and(|node| node.checked)
    }

    fn create_element(&mut self, tag: &str) -> Option<ElementId> {
        Some(self.push_node(MemoryNode {
            tag: tag.to_ascii_lowercase(),
            ..MemoryNode::default()
        }))
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || self.node(parent).is_none() || self.contains(child, parent) {
            warn!(
                parent = parent.raw(),
                child = child.raw(),
                "rejecting append that would break the tree"
            );
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    fn clear_children(&mut self, parent: ElementId) {
        let children = match self.node_mut(parent) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            if let Some(node) = self.node_mut(child) {
                node.parent = None;
            }
        }
    }

    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        let mut cursor = Some(element);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent_element(current);
        }
        false
    }

    fn is_attached(&self, element: ElementId) -> bool {
        self.contains(self.body, element)
    }

    fn scroll_height(&self, element: ElementId) -> f64 {
        self.node(element).map_or(0.0, |node| node.scroll_height)
    }

    fn bounding_client_top(&self, element: ElementId) -> f64 {
        self.node(element).map_or(0.0, |node| node.client_top)
    }

    fn page_y_offset(&self) -> f64 {
        self.page_y_offset
    }

    fn scroll_window_to(&mut self, top: f64) {
        self.window_scrolls.push(WindowScroll { top });
        self.page_y_offset = top;
    }

    fn scroll_into_view(&mut self, element: ElementId, align: ScrollAlign) {
        self.scrolled_into_view.push((element, align));
    }

    fn focus(&mut self, element: ElementId) {
        if self.is_attached(element) {
            self.focused = Some(element);
        }
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementSpec, MemoryDom};
    use crate::dom::{Dom, Selector};

    #[test]
    fn queries_follow_document_order() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let list = dom.insert(body, ElementSpec::new("ul").id("list"));
        let first = dom.insert(list, ElementSpec::new("li").class("item"));
        let nested = dom.insert(first, ElementSpec::new("span").class("item"));
        let second = dom.insert(list, ElementSpec::new("li").class("item"));

        assert_eq!(
            dom.query_all(None, &Selector::class("item")),
            vec![first, nested, second]
        );
        assert_eq!(dom.element_by_id("list"), Some(list));
        assert_eq!(dom.next_element_sibling(first), Some(second));
        assert_eq!(dom.next_element_sibling(second), None);
    }

    #[test]
    fn checking_a_radio_unchecks_its_group() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let radio = |value: &str| {
            ElementSpec::new("input")
                .attr("type", "radio")
                .attr("name", "plan")
                .value(value)
        };
        let a = dom.insert(body, radio("a").checked(true));
        let b = dom.insert(body, radio("b"));

        dom.set_checked(b, true);
        assert!(!dom.is_checked(a));
        assert!(dom.is_checked(b));
    }

    #[test]
    fn detached_subtrees_are_not_attached_or_found() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let section = dom.insert(body, ElementSpec::new("section").id("stats"));
        let inner = dom.insert(section, ElementSpec::new("span").class("stat"));

        dom.detach(section);
        assert!(!dom.is_attached(inner));
        assert_eq!(dom.element_by_id("stats"), None);
        assert!(dom.query_all(None, &Selector::class("stat")).is_empty());
    }

    #[test]
    fn text_content_concatenates_descendants_and_set_replaces_them() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let label = dom.insert(body, ElementSpec::new("label").text("Rose "));
        dom.insert(label, ElementSpec::new("span").text("Noir"));
        assert_eq!(dom.text_content(label), "Rose Noir");

        dom.set_text_content(label, "Oud");
        assert_eq!(dom.text_content(label), "Oud");
        assert!(dom.children(label).is_empty());
    }
}
