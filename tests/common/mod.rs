#![allow(dead_code)]

use storefront_ui::api::{Storefront, StorefrontConfig};
use storefront_ui::dom::{Dom, ElementId, ElementSpec, MemoryDom};

/// Handles of the notable elements of the fixture page.
#[derive(Debug, Clone)]
pub struct PageIds {
    pub hamburger: ElementId,
    pub nav_list: ElementId,
    pub nav_links: Vec<ElementId>,
    pub shop_section: ElementId,
    pub gallery_main: ElementId,
    pub gallery_prev: ElementId,
    pub gallery_next: ElementId,
    pub gallery_dots: ElementId,
    pub gallery_thumbnails: ElementId,
    pub fragrance_inputs: Vec<ElementId>,
    pub purchase_inputs: Vec<ElementId>,
    pub add_to_cart: ElementId,
    pub single_panel: ElementId,
    pub double_panel: ElementId,
    pub onetime_panel: ElementId,
    pub stats_container: ElementId,
    pub counters: Vec<ElementId>,
    pub faq_section: ElementId,
    pub accordion_headers: Vec<ElementId>,
    pub accordion_contents: Vec<ElementId>,
    pub newsletter_form: ElementId,
    pub newsletter_email: ElementId,
    pub missing_anchor: ElementId,
}

pub const FRAGRANCES: [(&str, &str, &str); 3] = [
    ("original", "frag-1", "Original"),
    ("rose", "frag-2", "Rose Noir"),
    ("lily", "frag-3", "Lily Bloom"),
];

pub const PURCHASE_TYPES: [(&str, &str, &str); 3] = [
    ("single", "sub-1", "Monthly"),
    ("double", "sub-2", "Double Monthly"),
    ("onetime", "one-time", "One-Time Purchase"),
];

pub const COUNTER_TARGETS: [&str; 3] = ["87", "92", "abc"];

fn radio(
    dom: &mut MemoryDom,
    parent: ElementId,
    group: &str,
    id_attribute: &str,
    label_class: &str,
    (value, external_id, label): (&str, &str, &str),
    checked: bool,
) -> ElementId {
    let row = dom.insert(parent, ElementSpec::new("div").class("option-row"));
    let input = dom.insert(
        row,
        ElementSpec::new("input")
            .attr("type", "radio")
            .attr("name", group)
            .attr(id_attribute, external_id)
            .value(value)
            .checked(checked),
    );
    let label_wrapper = dom.insert(row, ElementSpec::new("label"));
    dom.insert(
        label_wrapper,
        ElementSpec::new("span").class(label_class).text(label),
    );
    input
}

/// Builds the storefront page markup the widgets expect.
pub fn build_page() -> (MemoryDom, PageIds) {
    let mut dom = MemoryDom::new();
    let body = dom.body();

    let header = dom.insert(body, ElementSpec::new("header"));
    let hamburger = dom.insert(header, ElementSpec::new("button").id("hamburger"));
    let nav_list = dom.insert(header, ElementSpec::new("ul").id("nav-list"));
    let nav_links: Vec<ElementId> = ["#home", "#shop", "#faq"]
        .into_iter()
        .map(|href| {
            let item = dom.insert(nav_list, ElementSpec::new("li"));
            dom.insert(item, ElementSpec::new("a").attr("href", href).text(href))
        })
        .collect();

    let shop_section = dom.insert(
        body,
        ElementSpec::new("section").id("shop").client_top(500.0),
    );
    let gallery_main = dom.insert(shop_section, ElementSpec::new("img").id("gallery-main-image"));
    let gallery_prev = dom.insert(shop_section, ElementSpec::new("button").id("gallery-prev"));
    let gallery_next = dom.insert(shop_section, ElementSpec::new("button").id("gallery-next"));
    let gallery_dots = dom.insert(shop_section, ElementSpec::new("div").id("gallery-dots"));
    let gallery_thumbnails =
        dom.insert(shop_section, ElementSpec::new("div").id("gallery-thumbnails"));

    let options = dom.insert(shop_section, ElementSpec::new("form").class("product-options"));
    let fragrance_inputs: Vec<ElementId> = FRAGRANCES
        .into_iter()
        .enumerate()
        .map(|(index, option)| {
            radio(
                &mut dom,
                options,
                "fragrance",
                "data-frag",
                "fragrance-name",
                option,
                index == 0,
            )
        })
        .collect();
    let purchase_inputs: Vec<ElementId> = PURCHASE_TYPES
        .into_iter()
        .enumerate()
        .map(|(index, option)| {
            radio(
                &mut dom,
                options,
                "subscription-type",
                "data-purchase",
                "pricing-label",
                option,
                index == 0,
            )
        })
        .collect();
    let single_panel = dom.insert(options, ElementSpec::new("div").id("single-sub-details"));
    let double_panel = dom.insert(options, ElementSpec::new("div").id("double-sub-details"));
    let onetime_panel = dom.insert(options, ElementSpec::new("div").id("onetime-sub-details"));
    let add_to_cart = dom.insert(
        shop_section,
        ElementSpec::new("a").id("add-to-cart-btn").attr("href", "#"),
    );

    let stats_container = dom.insert(body, ElementSpec::new("section").id("stats"));
    let counters: Vec<ElementId> = COUNTER_TARGETS
        .into_iter()
        .map(|target| {
            let stat = dom.insert(stats_container, ElementSpec::new("div").class("stat"));
            dom.insert(
                stat,
                ElementSpec::new("span")
                    .class("stat-percentage")
                    .attr("data-target", target)
                    .text("0%"),
            )
        })
        .collect();

    let faq_section = dom.insert(
        body,
        ElementSpec::new("section").id("faq").client_top(1200.0),
    );
    let mut accordion_headers = Vec::new();
    let mut accordion_contents = Vec::new();
    for height in [120.0, 80.0, 200.0] {
        accordion_headers.push(dom.insert(
            faq_section,
            ElementSpec::new("button")
                .class("accordion-header")
                .attr("aria-expanded", "false"),
        ));
        accordion_contents.push(dom.insert(
            faq_section,
            ElementSpec::new("div")
                .class("accordion-content")
                .scroll_height(height),
        ));
    }

    let footer = dom.insert(body, ElementSpec::new("footer"));
    let newsletter_form = dom.insert(footer, ElementSpec::new("form").class("newsletter-form"));
    let newsletter_email = dom.insert(
        newsletter_form,
        ElementSpec::new("input")
            .id("newsletter-email")
            .attr("type", "email"),
    );
    dom.insert(
        newsletter_form,
        ElementSpec::new("button").attr("type", "submit"),
    );
    let missing_anchor = dom.insert(footer, ElementSpec::new("a").attr("href", "#missing"));

    let ids = PageIds {
        hamburger,
        nav_list,
        nav_links,
        shop_section,
        gallery_main,
        gallery_prev,
        gallery_next,
        gallery_dots,
        gallery_thumbnails,
        fragrance_inputs,
        purchase_inputs,
        add_to_cart,
        single_panel,
        double_panel,
        onetime_panel,
        stats_container,
        counters,
        faq_section,
        accordion_headers,
        accordion_contents,
        newsletter_form,
        newsletter_email,
        missing_anchor,
    };
    (dom, ids)
}

pub fn mount_page(config: StorefrontConfig) -> (Storefront<MemoryDom>, PageIds) {
    let (dom, ids) = build_page();
    let storefront = Storefront::mount(dom, config).expect("storefront mounts");
    (storefront, ids)
}

pub fn mount_default_page() -> (Storefront<MemoryDom>, PageIds) {
    mount_page(StorefrontConfig::default())
}

pub fn display(dom: &MemoryDom, element: ElementId) -> Option<String> {
    dom.style_property(element, "display")
}
