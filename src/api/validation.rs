use std::collections::HashSet;

use crate::core::CartLinkComposer;
use crate::error::{WidgetError, WidgetResult};

use super::StorefrontConfig;

pub(super) fn validate_config(config: &StorefrontConfig) -> WidgetResult<()> {
    let stats = &config.stats;
    if !stats.duration_ms.is_finite() || stats.duration_ms <= 0.0 {
        return Err(WidgetError::InvalidConfig(format!(
            "counter duration must be finite and > 0, got {}",
            stats.duration_ms
        )));
    }
    if !stats.visibility_threshold.is_finite()
        || stats.visibility_threshold <= 0.0
        || stats.visibility_threshold > 1.0
    {
        return Err(WidgetError::InvalidConfig(format!(
            "visibility threshold must be in (0, 1], got {}",
            stats.visibility_threshold
        )));
    }

    if !config.anchor_scroll.header_offset_px.is_finite() {
        return Err(WidgetError::InvalidConfig(
            "header offset must be finite".to_owned(),
        ));
    }

    let options = &config.product_options;
    CartLinkComposer::new(&options.cart_base_url, options.cart_label_prefix.as_str())?;

    let mut tags = HashSet::new();
    for binding in &options.panels {
        if !tags.insert(binding.tag.as_str()) {
            return Err(WidgetError::InvalidConfig(format!(
                "duplicate panel tag `{}`",
                binding.tag
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_config;
    use crate::api::{PanelBinding, StorefrontConfig};
    use crate::error::WidgetError;

    #[test]
    fn default_config_is_valid() {
        validate_config(&StorefrontConfig::default()).expect("defaults validate");
    }

    #[test]
    fn empty_gallery_is_left_to_the_gallery_widget() {
        let config = StorefrontConfig::default().with_gallery_images(Vec::<String>::new());
        validate_config(&config).expect("empty gallery only disables the gallery");
    }

    #[test]
    fn rejected_settings_are_config_errors() {
        let config = StorefrontConfig::default().with_header_offset_px(f64::NAN);
        let err = validate_config(&config).expect_err("non-finite offset");
        assert!(matches!(err, WidgetError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_bad_counter_tuning() {
        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = StorefrontConfig::default().with_counter_duration_ms(duration);
            assert!(validate_config(&config).is_err(), "duration {duration}");
        }
        for threshold in [0.0, 1.5, f64::NAN] {
            let config = StorefrontConfig::default().with_visibility_threshold(threshold);
            assert!(validate_config(&config).is_err(), "threshold {threshold}");
        }
    }

    #[test]
    fn rejects_duplicate_panel_tags_and_bad_urls() {
        let mut config = StorefrontConfig::default();
        config
            .product_options
            .panels
            .push(PanelBinding::new("single", "other"));
        assert!(validate_config(&config).is_err());

        let config = StorefrontConfig::default().with_cart_base_url("not a url");
        assert!(validate_config(&config).is_err());
    }
}
