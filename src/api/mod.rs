mod config;
mod snapshot;
mod storefront;
mod validation;

pub use config::{
    AccordionConfig, AnchorScrollConfig, GalleryConfig, NavConfig, NewsletterConfig,
    PanelBinding, ProductOptionsConfig, StatsConfig, StorefrontConfig,
};
pub use snapshot::{
    GallerySnapshot, ProductOptionsSnapshot, STOREFRONT_SNAPSHOT_JSON_SCHEMA_V1,
    StorefrontSnapshot, StorefrontSnapshotJsonContractV1,
};
pub use storefront::Storefront;
