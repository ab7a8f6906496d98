mod common;

use storefront_ui::api::StorefrontConfig;
use storefront_ui::dom::{Dom, DomEvent, ElementId, Key, MemoryDom};

use common::{mount_default_page, mount_page};

fn active_count(dom: &MemoryDom, elements: &[ElementId]) -> usize {
    elements
        .iter()
        .filter(|&&element| dom.has_class(element, "active"))
        .count()
}

#[test]
fn mount_builds_indicators_and_projects_first_image() {
    let (storefront, ids) = mount_default_page();
    let dom = storefront.dom();
    let gallery = storefront.gallery().expect("gallery mounted");

    assert_eq!(gallery.dots().len(), 9);
    assert_eq!(gallery.thumbnails().len(), 9);
    assert_eq!(dom.children(ids.gallery_dots).len(), 9);
    assert_eq!(
        dom.attribute(ids.gallery_main, "src").as_deref(),
        Some("images/products/main-product.png")
    );
    assert_eq!(
        dom.attribute(ids.gallery_main, "alt").as_deref(),
        Some("GTG Perfume Product - Image 1")
    );

    let first_dot = gallery.dots()[0];
    assert_eq!(dom.attribute(first_dot, "role").as_deref(), Some("tab"));
    assert_eq!(dom.attribute(first_dot, "aria-label").as_deref(), Some("Go to image 1"));
    assert_eq!(dom.attribute(first_dot, "aria-selected").as_deref(), Some("true"));
    assert_eq!(
        dom.attribute(gallery.dots()[1], "aria-selected").as_deref(),
        Some("false")
    );
}

#[test]
fn thumbnails_carry_accessible_markup_and_loading_hints() {
    let (storefront, _) = mount_default_page();
    let dom = storefront.dom();
    let gallery = storefront.gallery().expect("gallery mounted");

    for (index, &thumbnail) in gallery.thumbnails().iter().enumerate() {
        assert_eq!(dom.attribute(thumbnail, "role").as_deref(), Some("button"));
        assert_eq!(dom.attribute(thumbnail, "tabindex").as_deref(), Some("0"));
        let label = format!("View image {}", index + 1);
        assert_eq!(dom.attribute(thumbnail, "aria-label"), Some(label));

        let image = dom.children(thumbnail)[0];
        let alt = format!("Product thumbnail {}", index + 1);
        assert_eq!(dom.attribute(image, "alt"), Some(alt));
        let expected_loading = if index < 4 { "eager" } else { "lazy" };
        assert_eq!(dom.attribute(image, "loading").as_deref(), Some(expected_loading));
    }
}

#[test]
fn prev_from_first_image_wraps_to_last() {
    let (mut storefront, ids) = mount_default_page();
    storefront.dispatch(&DomEvent::click(ids.gallery_prev));

    let gallery = storefront.gallery().expect("gallery mounted");
    assert_eq!(gallery.current_index(), 8);
    let dom = storefront.dom();
    assert_eq!(
        dom.attribute(ids.gallery_main, "src").as_deref(),
        Some("images/products/thumbnails/thumb-8.png")
    );
    assert_eq!(
        dom.attribute(ids.gallery_main, "alt").as_deref(),
        Some("GTG Perfume Product - Image 9")
    );
    assert!(dom.has_class(gallery.dots()[8], "active"));
    assert_eq!(active_count(dom, gallery.dots()), 1);
    assert_eq!(active_count(dom, gallery.thumbnails()), 1);
}

#[test]
fn next_from_last_image_wraps_to_first() {
    let (mut storefront, ids) = mount_default_page();
    storefront.dispatch(&DomEvent::click(ids.gallery_prev));
    storefront.dispatch(&DomEvent::click(ids.gallery_next));
    assert_eq!(storefront.gallery().expect("gallery").current_index(), 0);
}

#[test]
fn click_on_thumbnail_image_bubbles_to_thumbnail() {
    let (mut storefront, _) = mount_default_page();
    let thumbnail = storefront.gallery().expect("gallery").thumbnails()[3];
    let inner_image = storefront.dom().children(thumbnail)[0];

    let outcome = storefront.dispatch(&DomEvent::click(inner_image));
    assert!(!outcome.default_prevented);

    let gallery = storefront.gallery().expect("gallery");
    assert_eq!(gallery.current_index(), 3);
    assert!(storefront.dom().has_class(thumbnail, "active"));
    assert_eq!(active_count(storefront.dom(), gallery.thumbnails()), 1);
}

#[test]
fn keyboard_activation_on_indicators_prevents_default() {
    let (mut storefront, _) = mount_default_page();
    let dot = storefront.gallery().expect("gallery").dots()[5];

    let outcome = storefront.dispatch(&DomEvent::key_down(dot, Key::Enter));
    assert!(outcome.default_prevented);
    assert_eq!(storefront.gallery().expect("gallery").current_index(), 5);

    let thumbnail = storefront.gallery().expect("gallery").thumbnails()[2];
    let outcome = storefront.dispatch(&DomEvent::key_down(thumbnail, Key::Space));
    assert!(outcome.default_prevented);
    assert_eq!(storefront.gallery().expect("gallery").current_index(), 2);

    let outcome = storefront.dispatch(&DomEvent::key_down(thumbnail, Key::Other("a".into())));
    assert!(!outcome.default_prevented);
}

#[test]
fn arrow_keys_on_main_image_navigate() {
    let (mut storefront, ids) = mount_default_page();
    storefront.dispatch(&DomEvent::key_down(ids.gallery_main, Key::ArrowRight));
    storefront.dispatch(&DomEvent::key_down(ids.gallery_main, Key::ArrowRight));
    assert_eq!(storefront.gallery().expect("gallery").current_index(), 2);

    storefront.dispatch(&DomEvent::key_down(ids.gallery_main, Key::ArrowLeft));
    assert_eq!(storefront.gallery().expect("gallery").current_index(), 1);
}

#[test]
fn refresh_clears_stray_active_indicators() {
    let (mut storefront, ids) = mount_default_page();
    let stray = storefront.gallery().expect("gallery").dots()[4];
    storefront.dom_mut().set_class(stray, "active", true);

    storefront.dispatch(&DomEvent::click(ids.gallery_next));

    let gallery = storefront.gallery().expect("gallery");
    assert!(!storefront.dom().has_class(stray, "active"));
    assert!(storefront.dom().has_class(gallery.dots()[1], "active"));
    assert_eq!(active_count(storefront.dom(), gallery.dots()), 1);
}

#[test]
fn custom_image_list_drives_indicator_count() {
    let config = StorefrontConfig::default().with_gallery_images(["a.png", "b.png"]);
    let (mut storefront, ids) = mount_page(config);
    assert_eq!(storefront.gallery().expect("gallery").dots().len(), 2);

    storefront.dispatch(&DomEvent::click(ids.gallery_prev));
    assert_eq!(
        storefront.dom().attribute(ids.gallery_main, "src").as_deref(),
        Some("b.png")
    );
}
