//! Item Model

use serde::{Deserialize, Serialize};

/// Item record as reported by the host platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub item_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_uom: Option<String>,
    /// Pieces per kg; the conversion factor between piece counts and weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_per_unit: Option<f64>,
    /// Whether this item is a template defining variants
    #[serde(default)]
    pub has_variants: bool,
    /// Template this item is a variant of, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_of: Option<String>,
    /// Per-meter weight when the profile carries a sticker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_per_meter_with_sticker: Option<f64>,
    /// Per-meter weight without a sticker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_per_meter_no_sticker: Option<f64>,
}

impl ItemSummary {
    pub fn new(item_code: impl Into<String>) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: None,
            description: None,
            stock_uom: None,
            weight_per_unit: None,
            has_variants: false,
            variant_of: None,
            weight_per_meter_with_sticker: None,
            weight_per_meter_no_sticker: None,
        }
    }
}

/// Result of resolving (or creating) a concrete variant
///
/// Only present members are ever applied to a line item; an absent member
/// never nulls out a previously populated field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedVariant {
    pub item_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_factor: Option<f64>,
}

impl ResolvedVariant {
    pub fn new(item_code: impl Into<String>) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: None,
            description: None,
            stock_uom: None,
            conversion_factor: None,
        }
    }
}
