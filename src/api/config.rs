use serde::{Deserialize, Serialize};

use crate::core::{
    DEFAULT_CART_BASE_URL, DEFAULT_CART_LABEL_PREFIX, DEFAULT_COUNTER_DURATION_MS,
    DEFAULT_HEADER_OFFSET_PX,
};
use crate::error::{WidgetError, WidgetResult};
use crate::host::HostCapabilities;

/// Public storefront bootstrap configuration.
///
/// Every field has a default matching the shipped page markup, so an empty JSON
/// object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub capabilities: HostCapabilities,
    #[serde(default)]
    pub nav: NavConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default)]
    pub product_options: ProductOptionsConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub accordion: AccordionConfig,
    #[serde(default)]
    pub anchor_scroll: AnchorScrollConfig,
    #[serde(default)]
    pub newsletter: NewsletterConfig,
}

impl StorefrontConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Replaces the gallery image list.
    #[must_use]
    pub fn with_gallery_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gallery.images = images.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_cart_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.product_options.cart_base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_panel_scroll_delay_ms(mut self, delay_ms: u64) -> Self {
        self.product_options.panel_scroll_delay_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_counter_duration_ms(mut self, duration_ms: f64) -> Self {
        self.stats.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_visibility_threshold(mut self, threshold: f64) -> Self {
        self.stats.visibility_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_header_offset_px(mut self, header_offset_px: f64) -> Self {
        self.anchor_scroll.header_offset_px = header_offset_px;
        self
    }

    pub fn from_json_str(input: &str) -> WidgetResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            WidgetError::InvalidConfig(format!("failed to parse storefront config json: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> WidgetResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            WidgetError::InvalidConfig(format!("failed to serialize storefront config: {e}"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub hamburger_id: String,
    pub nav_list_id: String,
    pub active_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            hamburger_id: "hamburger".to_owned(),
            nav_list_id: "nav-list".to_owned(),
            active_class: "active".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub main_image_id: String,
    pub prev_button_id: String,
    pub next_button_id: String,
    pub dots_container_id: String,
    pub thumbnails_container_id: String,
    pub images: Vec<String>,
    /// Main image alt text is `"<prefix> - Image N"`.
    pub alt_prefix: String,
    /// Thumbnails before this index load eagerly, the rest lazily.
    pub eager_thumbnail_count: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        let mut images = vec!["images/products/main-product.png".to_owned()];
        images.extend((1..=8).map(|n| format!("images/products/thumbnails/thumb-{n}.png")));
        Self {
            main_image_id: "gallery-main-image".to_owned(),
            prev_button_id: "gallery-prev".to_owned(),
            next_button_id: "gallery-next".to_owned(),
            dots_container_id: "gallery-dots".to_owned(),
            thumbnails_container_id: "gallery-thumbnails".to_owned(),
            images,
            alt_prefix: "GTG Perfume Product".to_owned(),
            eager_thumbnail_count: 4,
        }
    }
}

/// Binds a purchase-type value to the element id of its detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelBinding {
    pub tag: String,
    pub element_id: String,
}

impl PanelBinding {
    #[must_use]
    pub fn new(tag: impl Into<String>, element_id: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            element_id: element_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductOptionsConfig {
    pub fragrance_group: String,
    pub fragrance_id_attribute: String,
    pub fragrance_label_class: String,
    pub purchase_group: String,
    pub purchase_id_attribute: String,
    pub purchase_label_class: String,
    pub add_to_cart_id: String,
    pub cart_base_url: String,
    pub cart_label_prefix: String,
    pub panels: Vec<PanelBinding>,
    pub panel_scroll_delay_ms: u64,
}

impl Default for ProductOptionsConfig {
    fn default() -> Self {
        Self {
            fragrance_group: "fragrance".to_owned(),
            fragrance_id_attribute: "data-frag".to_owned(),
            fragrance_label_class: "fragrance-name".to_owned(),
            purchase_group: "subscription-type".to_owned(),
            purchase_id_attribute: "data-purchase".to_owned(),
            purchase_label_class: "pricing-label".to_owned(),
            add_to_cart_id: "add-to-cart-btn".to_owned(),
            cart_base_url: DEFAULT_CART_BASE_URL.to_owned(),
            cart_label_prefix: DEFAULT_CART_LABEL_PREFIX.to_owned(),
            panels: vec![
                PanelBinding::new("single", "single-sub-details"),
                PanelBinding::new("double", "double-sub-details"),
                PanelBinding::new("onetime", "onetime-sub-details"),
            ],
            panel_scroll_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub counter_class: String,
    pub target_attribute: String,
    pub container_id: String,
    pub visibility_threshold: f64,
    pub duration_ms: f64,
    pub value_suffix: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            counter_class: "stat-percentage".to_owned(),
            target_attribute: "data-target".to_owned(),
            container_id: "stats".to_owned(),
            visibility_threshold: 0.5,
            duration_ms: DEFAULT_COUNTER_DURATION_MS,
            value_suffix: "%".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionConfig {
    pub header_class: String,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            header_class: "accordion-header".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorScrollConfig {
    pub header_offset_px: f64,
    /// Hrefs that scroll back to the top of the page.
    pub top_hrefs: Vec<String>,
}

impl Default for AnchorScrollConfig {
    fn default() -> Self {
        Self {
            header_offset_px: DEFAULT_HEADER_OFFSET_PX,
            top_hrefs: vec!["#".to_owned(), "#home".to_owned()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    pub form_class: String,
    pub email_input_id: String,
    pub success_message: String,
    pub invalid_message: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            form_class: "newsletter-form".to_owned(),
            email_input_id: "newsletter-email".to_owned(),
            success_message: "Thank you for subscribing to our newsletter!".to_owned(),
            invalid_message: "Please enter a valid email address.".to_owned(),
        }
    }
}
