use serde::{Deserialize, Serialize};

use crate::core::{AccordionState, CartLink, ChoiceOption, CounterGroup};
use crate::error::{WidgetError, WidgetResult};

pub const STOREFRONT_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GallerySnapshot {
    pub current_index: usize,
    pub image_count: usize,
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOptionsSnapshot {
    pub fragrance: Option<ChoiceOption>,
    pub purchase: Option<ChoiceOption>,
    pub cart_link: Option<CartLink>,
    pub visible_panel: Option<String>,
}

/// Read-only view of every mounted widget. `None` marks a widget that was not
/// mounted on this page. Unknown fields are rejected so a versioned payload is
/// never mistaken for an empty bare snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorefrontSnapshot {
    pub nav_open: Option<bool>,
    pub gallery: Option<GallerySnapshot>,
    pub product_options: Option<ProductOptionsSnapshot>,
    pub counters: Option<CounterGroup>,
    pub accordion: Option<AccordionState>,
    pub newsletter_submissions: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: StorefrontSnapshot,
}

impl StorefrontSnapshot {
    pub fn to_json_pretty(&self) -> WidgetResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| WidgetError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> WidgetResult<String> {
        let payload = StorefrontSnapshotJsonContractV1 {
            schema_version: STOREFRONT_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            WidgetError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> WidgetResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<StorefrontSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: StorefrontSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                WidgetError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != STOREFRONT_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(WidgetError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::{StorefrontSnapshot, StorefrontSnapshotJsonContractV1};
    use crate::core::AccordionState;

    fn empty() -> StorefrontSnapshot {
        StorefrontSnapshot {
            nav_open: Some(false),
            gallery: None,
            product_options: None,
            counters: None,
            accordion: Some(AccordionState::with_open(3, Some(1))),
            newsletter_submissions: None,
        }
    }

    #[test]
    fn compat_parser_accepts_bare_and_versioned_payloads() {
        let snapshot = empty();
        let bare = snapshot.to_json_pretty().expect("bare");
        let versioned = snapshot.to_json_contract_v1_pretty().expect("versioned");

        assert_eq!(
            StorefrontSnapshot::from_json_compat_str(&bare).expect("parse bare"),
            snapshot
        );
        assert_eq!(
            StorefrontSnapshot::from_json_compat_str(&versioned).expect("parse versioned"),
            snapshot
        );
    }

    #[test]
    fn compat_parser_rejects_unknown_schema_version() {
        let payload = StorefrontSnapshotJsonContractV1 {
            schema_version: 7,
            snapshot: empty(),
        };
        let json = serde_json::to_string(&payload).expect("serialize");
        assert!(StorefrontSnapshot::from_json_compat_str(&json).is_err());
    }
}
