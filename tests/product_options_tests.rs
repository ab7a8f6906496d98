mod common;

use std::time::Duration;

use storefront_ui::api::StorefrontConfig;
use storefront_ui::dom::{Dom, DomEvent, ElementId, ElementSpec, MemoryDom, ScrollAlign};
use storefront_ui::host::HostRequest;
use storefront_ui::Storefront;

use common::{PageIds, display, mount_default_page, mount_page};

fn choose(storefront: &mut Storefront<MemoryDom>, input: ElementId) {
    storefront.dom_mut().set_checked(input, true);
    storefront.dispatch(&DomEvent::change(input));
}

fn timeout_tokens(storefront: &Storefront<MemoryDom>) -> Vec<storefront_ui::host::TimerToken> {
    storefront
        .pending_host_requests()
        .iter()
        .filter_map(|request| match request {
            HostRequest::Timeout { token, .. } => Some(*token),
            _ => None,
        })
        .collect()
}

fn cart_href(storefront: &Storefront<MemoryDom>, ids: &PageIds) -> Option<String> {
    storefront.dom().attribute(ids.add_to_cart, "href")
}

#[test]
fn mount_composes_link_from_initially_checked_options() {
    let (storefront, ids) = mount_default_page();
    assert_eq!(
        cart_href(&storefront, &ids).as_deref(),
        Some("https://example.com/cart?frag=frag-1&type=sub-1")
    );
    assert_eq!(
        storefront
            .dom()
            .attribute(ids.add_to_cart, "aria-label")
            .as_deref(),
        Some("Add to cart: Original, Monthly")
    );

    let options = storefront.product_options().expect("product options mounted");
    assert_eq!(options.fragrance().options().len(), 3);
    assert_eq!(options.purchase().selected_index(), Some(0));
    assert_eq!(options.visible_panel_tag(), Some("single"));
}

#[test]
fn selecting_rose_noir_composes_expected_link() {
    let (mut storefront, ids) = mount_default_page();
    choose(&mut storefront, ids.fragrance_inputs[1]);

    let href = cart_href(&storefront, &ids).expect("href");
    assert!(href.ends_with("frag=frag-2&type=sub-1"), "{href}");
    assert_eq!(
        storefront
            .dom()
            .attribute(ids.add_to_cart, "aria-label")
            .as_deref(),
        Some("Add to cart: Rose Noir, Monthly")
    );
    let link = storefront
        .product_options()
        .and_then(|options| options.cart_link())
        .expect("link");
    assert_eq!(link.href, href);
}

#[test]
fn selecting_double_shows_only_the_double_panel() {
    let (mut storefront, ids) = mount_default_page();
    choose(&mut storefront, ids.purchase_inputs[1]);

    let dom = storefront.dom();
    assert_eq!(display(dom, ids.double_panel).as_deref(), Some("block"));
    assert_eq!(display(dom, ids.single_panel).as_deref(), Some("none"));
    assert_eq!(display(dom, ids.onetime_panel).as_deref(), Some("none"));
    assert_eq!(
        storefront
            .product_options()
            .and_then(|options| options.visible_panel_tag()),
        Some("double")
    );
    assert!(
        cart_href(&storefront, &ids)
            .expect("href")
            .ends_with("type=sub-2")
    );
}

#[test]
fn panel_scroll_is_deferred_until_the_timeout_elapses() {
    let (mut storefront, ids) = mount_default_page();
    storefront.drain_host_requests();

    choose(&mut storefront, ids.purchase_inputs[2]);
    assert!(storefront.dom().scrolled_into_view().is_empty());

    let pending = storefront.pending_host_requests().to_vec();
    let token = match pending.as_slice() {
        [HostRequest::Timeout { token, delay }] => {
            assert_eq!(*delay, Duration::from_millis(100));
            *token
        }
        other => panic!("unexpected requests: {other:?}"),
    };

    assert!(storefront.timeout_elapsed(token));
    assert_eq!(
        storefront.dom().scrolled_into_view(),
        &[(ids.onetime_panel, ScrollAlign::Nearest)]
    );
    assert!(!storefront.timeout_elapsed(token), "tokens fire once");
}

#[test]
fn deferred_scroll_skips_detached_panels() {
    let (mut storefront, ids) = mount_default_page();
    storefront.drain_host_requests();
    choose(&mut storefront, ids.purchase_inputs[1]);
    let tokens = timeout_tokens(&storefront);
    assert_eq!(tokens.len(), 1);

    storefront.dom_mut().detach(ids.double_panel);
    assert!(storefront.timeout_elapsed(tokens[0]));
    assert!(storefront.dom().scrolled_into_view().is_empty());
}

#[test]
fn unchecking_everything_keeps_the_previous_link() {
    let (mut storefront, ids) = mount_default_page();
    let before = cart_href(&storefront, &ids);

    storefront
        .dom_mut()
        .set_checked(ids.fragrance_inputs[0], false);
    storefront.dispatch(&DomEvent::change(ids.fragrance_inputs[0]));

    assert_eq!(
        storefront
            .product_options()
            .and_then(|options| options.fragrance().current()),
        None
    );
    assert_eq!(cart_href(&storefront, &ids), before);
}

#[test]
fn missing_external_id_and_label_fall_back_to_value() {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    for (group, attribute, value) in [
        ("fragrance", "data-frag", "amber"),
        ("subscription-type", "data-purchase", "single"),
    ] {
        let input = dom.insert(
            body,
            ElementSpec::new("input")
                .attr("type", "radio")
                .attr("name", group)
                .value(value)
                .checked(true),
        );
        if group == "subscription-type" {
            dom.set_attribute(input, attribute, "sub-9");
        }
    }
    let add_to_cart = dom.insert(body, ElementSpec::new("a").id("add-to-cart-btn"));

    let storefront = Storefront::mount(dom, StorefrontConfig::default()).expect("mount");
    let options = storefront.product_options().expect("product options");
    let amber = options.fragrance().current().expect("checked");
    assert_eq!(amber.external_id, "amber");
    assert_eq!(amber.display_label, "amber");
    assert_eq!(
        storefront.dom().attribute(add_to_cart, "href").as_deref(),
        Some("https://example.com/cart?frag=amber&type=sub-9")
    );
    assert!(storefront.gallery().is_none());
    assert_eq!(options.visible_panel_tag(), None);
}

#[test]
fn custom_cart_base_url_is_used() {
    let config = StorefrontConfig::default().with_cart_base_url("https://shop.test/checkout");
    let (mut storefront, ids) = mount_page(config);
    choose(&mut storefront, ids.fragrance_inputs[2]);
    assert_eq!(
        cart_href(&storefront, &ids).as_deref(),
        Some("https://shop.test/checkout?frag=frag-3&type=sub-1")
    );
}

#[test]
fn change_outside_the_radio_groups_is_ignored() {
    let (mut storefront, ids) = mount_default_page();
    storefront.drain_host_requests();
    storefront.dispatch(&DomEvent::change(ids.newsletter_email));
    assert!(storefront.pending_host_requests().is_empty());
    assert_eq!(
        storefront
            .product_options()
            .and_then(|options| options.fragrance().selected_index()),
        Some(0)
    );
}

#[test]
fn unanswered_scrolls_keep_one_entry_per_panel() {
    let (mut storefront, ids) = mount_default_page();
    let initial = timeout_tokens(&storefront);
    storefront.drain_host_requests();

    for _ in 0..5 {
        choose(&mut storefront, ids.purchase_inputs[1]);
        choose(&mut storefront, ids.purchase_inputs[0]);
    }
    let options = storefront.product_options().expect("product options");
    assert_eq!(options.pending_scroll_count(), 2);

    let latest = timeout_tokens(&storefront);
    assert_eq!(latest.len(), 10);
    assert!(!storefront.timeout_elapsed(initial[0]), "superseded token");
    assert!(storefront.timeout_elapsed(latest[9]));
    assert_eq!(
        storefront.dom().scrolled_into_view(),
        &[(ids.single_panel, ScrollAlign::Nearest)]
    );
    assert_eq!(
        storefront
            .product_options()
            .expect("product options")
            .pending_scroll_count(),
        1
    );
}
