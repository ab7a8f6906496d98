//! Browser adapter: implements [`Dom`] over `web_sys` and services host
//! requests with `requestAnimationFrame`, `setTimeout` and
//! `IntersectionObserver`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions, Window,
};

use crate::api::{Storefront, StorefrontConfig};
use crate::dom::{Dom, DomEvent, ElementId, EventKind, Key, ScrollAlign, Selector};
use crate::error::{WidgetError, WidgetResult};
use crate::host::{HostCapabilities, HostRequest, TimerToken, VisibilityEntry};

const DELEGATED_EVENTS: [&str; 4] = ["click", "keydown", "change", "submit"];

fn js_error(context: &str, err: &JsValue) -> WidgetError {
    WidgetError::InvalidData(format!("{context}: {err:?}"))
}

/// [`Dom`] over the live browser document.
///
/// Elements are interned into a handle table the first time a query returns
/// them, so the same node always maps to the same [`ElementId`].
pub struct WebDom {
    window: Window,
    document: Document,
    elements: RefCell<Vec<Element>>,
}

impl WebDom {
    pub fn new() -> WidgetResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| WidgetError::InvalidData("no global window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| WidgetError::InvalidData("window has no document".to_owned()))?;
        Ok(Self {
            window,
            document,
            elements: RefCell::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn capabilities(&self) -> HostCapabilities {
        HostCapabilities {
            visibility_observer: js_sys::Reflect::has(
                &self.window,
                &JsValue::from_str("IntersectionObserver"),
            )
            .unwrap_or(false),
        }
    }

    pub fn intern(&self, element: Element) -> ElementId {
        let mut elements = self.elements.borrow_mut();
        if let Some(index) = elements.iter().position(|known| *known == element) {
            return ElementId::from_raw(index as u32);
        }
        elements.push(element);
        ElementId::from_raw((elements.len() - 1) as u32)
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.elements.borrow().get(id.raw() as usize).cloned()
    }

    fn html(&self, id: ElementId) -> Option<HtmlElement> {
        self.element(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    }

    fn input(&self, id: ElementId) -> Option<HtmlInputElement> {
        self.element(id)
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    }

    fn collect(&self, list: web_sys::NodeList) -> Vec<ElementId> {
        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }
}

impl Dom for WebDom {
    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.document
            .get_element_by_id(id)
            .map(|element| self.intern(element))
    }

    fn query_all(&self, scope: Option<ElementId>, selector: &Selector) -> Vec<ElementId> {
        let css = selector.to_css();
        let list = match scope {
            Some(scope) => match self.element(scope) {
                Some(element) => element.query_selector_all(&css),
                None => return Vec::new(),
            },
            None => self.document.query_selector_all(&css),
        };
        match list {
            Ok(list) => self.collect(list),
            Err(err) => {
                warn!(selector = %css, error = ?err, "selector query failed");
                Vec::new()
            }
        }
    }

    fn parent_element(&self, element: ElementId) -> Option<ElementId> {
        self.element(element)?
            .parent_element()
            .map(|parent| self.intern(parent))
    }

    fn next_element_sibling(&self, element: ElementId) -> Option<ElementId> {
        self.element(element)?
            .next_element_sibling()
            .map(|sibling| self.intern(sibling))
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.element(element) {
            if let Err(err) = node.set_attribute(name, value) {
                warn!(attribute = name, error = ?err, "set_attribute failed");
            }
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .is_some_and(|node| node.class_list().contains(class))
    }

    fn set_class(&mut self, element: ElementId, class: &str, enabled: bool) {
        if let Some(node) = self.element(element) {
            if let Err(err) = node.class_list().toggle_with_force(class, enabled) {
                warn!(class, error = ?err, "class toggle failed");
            }
        }
    }

    fn text_content(&self, element: ElementId) -> String {
        self.element(element)
            .and_then(|node| node.text_content())
            .unwrap_or_default()
    }

    fn set_text_content(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.element(element) {
            node.set_text_content(Some(text));
        }
    }

    fn style_property(&self, element: ElementId, property: &str) -> Option<String> {
        self.html(element)?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn set_style_property(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.html(element) {
            if let Err(err) = node.style().set_property(property, value) {
                warn!(property, value, error = ?err, "style update rejected");
            }
        }
    }

    fn input_value(&self, element: ElementId) -> String {
        self.input(element)
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn set_input_value(&mut self, element: ElementId, value: &str) {
        if let Some(input) = self.input(element) {
            input.set_value(value);
        }
    }

    fn is_checked(&self, element: ElementId) -> bool {
        self.input(element).is_some_and(|input| input.checked())
    }

    fn create_element(&mut self, tag: &str) -> Option<ElementId> {
        match self.document.create_element(tag) {
            Ok(element) => Some(self.intern(element)),
            Err(err) => {
                warn!(tag, error = ?err, "create_element failed");
                None
            }
        }
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) else {
            return;
        };
        if let Err(err) = parent.append_child(&child) {
            warn!(error = ?err, "append_child failed");
        }
    }

    fn clear_children(&mut self, parent: ElementId) {
        if let Some(node) = self.element(parent) {
            node.set_text_content(None);
        }
    }

    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        match (self.element(ancestor), self.element(element)) {
            (Some(ancestor), Some(element)) => ancestor.contains(Some(&element)),
            _ => false,
        }
    }

    fn is_attached(&self, element: ElementId) -> bool {
        self.element(element).is_some_and(|node| node.is_connected())
    }

    fn scroll_height(&self, element: ElementId) -> f64 {
        self.element(element)
            .map_or(0.0, |node| f64::from(node.scroll_height()))
    }

    fn bounding_client_top(&self, element: ElementId) -> f64 {
        self.element(element)
            .map_or(0.0, |node| node.get_bounding_client_rect().top())
    }

    fn page_y_offset(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn scroll_window_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_into_view(&mut self, element: ElementId, align: ScrollAlign) {
        let Some(node) = self.element(element) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(match align {
            ScrollAlign::Start => ScrollLogicalPosition::Start,
            ScrollAlign::Center => ScrollLogicalPosition::Center,
            ScrollAlign::End => ScrollLogicalPosition::End,
            ScrollAlign::Nearest => ScrollLogicalPosition::Nearest,
        });
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn focus(&mut self, element: ElementId) {
        if let Some(node) = self.html(element) {
            if let Err(err) = node.focus() {
                warn!(error = ?err, "focus failed");
            }
        }
    }

    fn notify(&mut self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            warn!(error = ?err, "alert failed");
        }
    }
}

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct Runtime {
    storefront: RefCell<Storefront<WebDom>>,
    window: Window,
    observers: RefCell<HashMap<ElementId, (IntersectionObserver, ObserverCallback)>>,
}

impl Runtime {
    /// Drains and services every pending host request.
    fn service(self: &Rc<Self>) {
        let requests = self.storefront.borrow_mut().drain_host_requests();
        for request in requests {
            match request {
                HostRequest::AnimationFrame => self.schedule_frame(),
                HostRequest::Timeout { token, delay } => self.schedule_timeout(token, delay),
                HostRequest::ObserveVisibility { target, threshold } => {
                    self.observe(target, threshold);
                }
                HostRequest::DisconnectVisibility { target } => {
                    if let Some((observer, _)) = self.observers.borrow().get(&target) {
                        observer.disconnect();
                    }
                }
                HostRequest::NewsletterSubscription { .. } => {
                    debug!("newsletter subscription has no backend");
                }
            }
        }
    }

    fn schedule_frame(self: &Rc<Self>) {
        let runtime = Rc::clone(self);
        let callback = Closure::once_into_js(move |timestamp_ms: f64| {
            runtime.storefront.borrow_mut().animation_frame(timestamp_ms);
            runtime.service();
        });
        if let Err(err) = self
            .window
            .request_animation_frame(callback.unchecked_ref::<js_sys::Function>())
        {
            warn!(error = ?err, "requestAnimationFrame failed");
        }
    }

    fn schedule_timeout(self: &Rc<Self>, token: TimerToken, delay: std::time::Duration) {
        let runtime = Rc::clone(self);
        let callback = Closure::once_into_js(move || {
            runtime.storefront.borrow_mut().timeout_elapsed(token);
            runtime.service();
        });
        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref::<js_sys::Function>(),
                delay_ms,
            )
        {
            warn!(token = token.raw(), error = ?err, "setTimeout failed");
        }
    }

    fn observe(self: &Rc<Self>, target: ElementId, threshold: f64) {
        let Some(element) = self.storefront.borrow().dom().element(target) else {
            return;
        };
        let weak: Weak<Self> = Rc::downgrade(self);
        let callback: ObserverCallback = Closure::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let Some(runtime) = weak.upgrade() else {
                    return;
                };
                let entries: Vec<VisibilityEntry> = {
                    let storefront = runtime.storefront.borrow();
                    entries
                        .iter()
                        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                        .map(|entry| VisibilityEntry {
                            target: storefront.dom().intern(entry.target()),
                            intersection_ratio: entry.intersection_ratio(),
                        })
                        .collect()
                };
                runtime.storefront.borrow_mut().visibility_changed(&entries);
                runtime.service();
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(&element);
                self.observers
                    .borrow_mut()
                    .insert(target, (observer, callback));
            }
            Err(err) => warn!(error = ?err, "IntersectionObserver construction failed"),
        }
    }

    fn dispatch(self: &Rc<Self>, event: &Event) {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        let kind = match event.type_().as_str() {
            "click" => EventKind::Click,
            "change" => EventKind::Change,
            "submit" => EventKind::Submit,
            "keydown" => match event.dyn_ref::<KeyboardEvent>() {
                Some(keyboard) => EventKind::KeyDown(Key::from_dom_key(&keyboard.key())),
                None => return,
            },
            _ => return,
        };

        let outcome = {
            let mut storefront = self.storefront.borrow_mut();
            let target = storefront.dom().intern(target);
            storefront.dispatch(&DomEvent::new(kind, target))
        };
        if outcome.default_prevented {
            event.prevent_default();
        }
        self.service();
    }
}

/// A storefront mounted on the live document, with its delegated listeners.
///
/// Dropping it removes the listeners; pending frames and timers still run once.
#[wasm_bindgen]
pub struct WebStorefront {
    runtime: Rc<Runtime>,
    document: Document,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl WebStorefront {
    /// Mounts every widget and installs document-level listeners.
    ///
    /// The visibility capability in `config` is overridden by what the browser
    /// actually supports.
    pub fn mount(config: StorefrontConfig) -> WidgetResult<Self> {
        let dom = WebDom::new()?;
        let window = dom.window.clone();
        let document = dom.document.clone();
        let config = config.with_capabilities(dom.capabilities());
        let storefront = Storefront::mount(dom, config)?;

        let runtime = Rc::new(Runtime {
            storefront: RefCell::new(storefront),
            window,
            observers: RefCell::new(HashMap::new()),
        });

        let mut listeners = Vec::with_capacity(DELEGATED_EVENTS.len());
        for event_type in DELEGATED_EVENTS {
            let runtime_for_event = Rc::clone(&runtime);
            let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                runtime_for_event.dispatch(&event);
            });
            document
                .add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())
                .map_err(|err| js_error("failed to install listener", &err))?;
            listeners.push((event_type, listener));
        }

        runtime.service();
        Ok(Self {
            runtime,
            document,
            listeners,
        })
    }
}

#[wasm_bindgen]
impl WebStorefront {
    /// Pretty JSON snapshot contract of the mounted widgets.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.runtime
            .storefront
            .borrow()
            .snapshot_json_contract_v1_pretty()
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}

impl Drop for WebStorefront {
    fn drop(&mut self) {
        for (event_type, listener) in &self.listeners {
            let _ = self
                .document
                .remove_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref());
        }
        for (observer, _) in self.runtime.observers.borrow().values() {
            observer.disconnect();
        }
    }
}

/// JS entry point. `config_json` may be omitted to use the page defaults.
#[wasm_bindgen(js_name = mountStorefront)]
pub fn mount_storefront(config_json: Option<String>) -> Result<WebStorefront, JsValue> {
    let config = match config_json {
        Some(json) => StorefrontConfig::from_json_str(&json),
        None => Ok(StorefrontConfig::default()),
    };
    config
        .and_then(WebStorefront::mount)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}
