use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::ChoiceOption;
use crate::error::{WidgetError, WidgetResult};

pub const DEFAULT_CART_BASE_URL: &str = "https://example.com/cart";
pub const DEFAULT_CART_LABEL_PREFIX: &str = "Add to cart";

/// Outbound cart link and its accessible label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLink {
    pub href: String,
    pub aria_label: String,
}

/// Builds the add-to-cart link from the fragrance and purchase selections.
///
/// The composer only holds its fixed base URL and label prefix, so
/// [`CartLinkComposer::compose`] is a pure function of its two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLinkComposer {
    base_url: Url,
    label_prefix: String,
}

impl CartLinkComposer {
    pub fn new(base_url: &str, label_prefix: impl Into<String>) -> WidgetResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            WidgetError::InvalidConfig(format!("cart base url `{base_url}` is invalid: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(WidgetError::InvalidConfig(format!(
                "cart base url `{base_url}` cannot carry query parameters"
            )));
        }
        Ok(Self {
            base_url,
            label_prefix: label_prefix.into(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns `None` when either selection is missing; callers keep their
    /// previous link in that case.
    #[must_use]
    pub fn compose(
        &self,
        fragrance: Option<&ChoiceOption>,
        purchase: Option<&ChoiceOption>,
    ) -> Option<CartLink> {
        let (fragrance, purchase) = (fragrance?, purchase?);

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("frag", &fragrance.external_id)
            .append_pair("type", &purchase.external_id);

        Some(CartLink {
            href: url.into(),
            aria_label: format!(
                "{}: {}, {}",
                self.label_prefix, fragrance.display_label, purchase.display_label
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CartLinkComposer, DEFAULT_CART_BASE_URL, DEFAULT_CART_LABEL_PREFIX};
    use crate::core::ChoiceOption;

    #[test]
    fn missing_selection_composes_nothing() {
        let composer = CartLinkComposer::new(DEFAULT_CART_BASE_URL, DEFAULT_CART_LABEL_PREFIX)
            .expect("default composer");
        let rose = ChoiceOption::new("rose", "frag-2", "Rose Noir");
        assert!(composer.compose(Some(&rose), None).is_none());
        assert!(composer.compose(None, Some(&rose)).is_none());
        assert!(composer.compose(None, None).is_none());
    }

    #[test]
    fn query_values_are_url_encoded() {
        let composer = CartLinkComposer::new("https://shop.example/cart", "Buy").expect("composer");
        let frag = ChoiceOption::new("x", "a&b", "A");
        let kind = ChoiceOption::new("y", "one time", "B");
        let link = composer.compose(Some(&frag), Some(&kind)).expect("link");
        assert_eq!(link.href, "https://shop.example/cart?frag=a%26b&type=one+time");
        assert_eq!(link.aria_label, "Buy: A, B");
    }

    #[test]
    fn relative_or_opaque_base_urls_are_rejected() {
        assert!(CartLinkComposer::new("/cart", "Buy").is_err());
        assert!(CartLinkComposer::new("mailto:cart@example.com", "Buy").is_err());
    }
}
