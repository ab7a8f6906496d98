use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use storefront_ui::api::{Storefront, StorefrontConfig};
use storefront_ui::core::{
    CartLinkComposer, ChoiceOption, CounterGroup, DEFAULT_CART_BASE_URL,
    DEFAULT_CART_LABEL_PREFIX, is_valid_email,
};
use storefront_ui::dom::{Dom, DomEvent, ElementSpec, MemoryDom};

fn bench_cart_link_compose(c: &mut Criterion) {
    let composer = CartLinkComposer::new(DEFAULT_CART_BASE_URL, DEFAULT_CART_LABEL_PREFIX)
        .expect("valid composer");
    let fragrance = ChoiceOption::new("rose", "frag-2", "Rose Noir");
    let purchase = ChoiceOption::new("single", "sub-1", "Monthly");

    c.bench_function("cart_link_compose", |b| {
        b.iter(|| {
            let _ = composer.compose(black_box(Some(&fragrance)), black_box(Some(&purchase)));
        })
    });
}

fn bench_counter_group_frames_1k(c: &mut Criterion) {
    let targets: Vec<u32> = (0..1_000).map(|i| i % 100).collect();

    c.bench_function("counter_group_frames_1k", |b| {
        b.iter(|| {
            let mut group = CounterGroup::new(&targets, 1_200.0);
            group.fire();
            let mut now = 0.0;
            while group.is_running() {
                let _ = group.step(black_box(now));
                now += 16.0;
            }
        })
    });
}

fn bench_email_validation(c: &mut Criterion) {
    c.bench_function("email_validation", |b| {
        b.iter(|| {
            let _ = is_valid_email(black_box("someone@example.org"));
            let _ = is_valid_email(black_box("not an email"));
        })
    });
}

fn bench_gallery_dispatch(c: &mut Criterion) {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    for id in [
        "gallery-main-image",
        "gallery-prev",
        "gallery-next",
        "gallery-dots",
        "gallery-thumbnails",
    ] {
        dom.insert(body, ElementSpec::new("div").id(id));
    }
    let mut storefront =
        Storefront::mount(dom, StorefrontConfig::default()).expect("storefront mounts");
    let next = storefront
        .dom()
        .element_by_id("gallery-next")
        .expect("next button");

    c.bench_function("gallery_next_dispatch", |b| {
        b.iter(|| {
            let _ = storefront.dispatch(black_box(&DomEvent::click(next)));
        })
    });
}

criterion_group!(
    benches,
    bench_cart_link_compose,
    bench_counter_group_frames_1k,
    bench_email_validation,
    bench_gallery_dispatch
);
criterion_main!(benches);
