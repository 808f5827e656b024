//! Host client trait
//!
//! The seam between the engine and the platform. Everything the engine needs
//! remotely goes through [`HostClient`], so document sessions and the bulk
//! creation tool run unchanged against [`crate::HttpHost`] in production and
//! [`crate::MockHost`] in tests.

use crate::error::HostResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{AttributeValue, ItemSummary, ResolvedVariant, TemplateAttributes};
use std::collections::BTreeMap;

/// Attribute name -> selected value for one variant
///
/// Ordered map so serialized call payloads are deterministic.
pub type SelectionValues = BTreeMap<String, String>;

/// Optional overrides applied when materializing a new variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantOverrides {
    /// Custom item code replacing the generated one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Calculated weight per unit, in `weight_uom`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_uom: Option<String>,
}

impl VariantOverrides {
    /// Whether any override is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Remote operations the engine performs against the host platform
#[async_trait]
pub trait HostClient: Send + Sync {
    /// Fetch the variant schema of a template item
    async fn template_attributes(&self, template: &str) -> HostResult<TemplateAttributes>;

    /// Search an attribute's permitted values matching `query`
    async fn search_attribute_values(
        &self,
        attribute: &str,
        query: &str,
    ) -> HostResult<Vec<AttributeValue>>;

    /// Look up an existing variant for the given selection
    ///
    /// `Ok(None)` is the host's definitive "no such variant"; transport and
    /// decoding failures come back as `Err`.
    async fn find_variant(
        &self,
        template: &str,
        values: &SelectionValues,
    ) -> HostResult<Option<ResolvedVariant>>;

    /// Materialize a new variant for the given selection
    async fn create_variant(
        &self,
        template: &str,
        values: &SelectionValues,
        overrides: &VariantOverrides,
    ) -> HostResult<ResolvedVariant>;

    /// Fetch an item record, `Ok(None)` when it does not exist
    async fn item(&self, item_code: &str) -> HostResult<Option<ItemSummary>>;

    /// Pieces-per-kg conversion factor of an item, when it has one
    async fn item_weight_per_unit(&self, item_code: &str) -> HostResult<Option<f64>> {
        Ok(self
            .item(item_code)
            .await?
            .and_then(|item| item.weight_per_unit))
    }

    /// Find the variant for a selection, creating it when allowed
    ///
    /// `Ok(None)` only when the variant does not exist and `create_missing`
    /// is off.
    async fn resolve_or_create_variant(
        &self,
        template: &str,
        values: &SelectionValues,
        create_missing: bool,
    ) -> HostResult<Option<ResolvedVariant>> {
        if let Some(variant) = self.find_variant(template, values).await? {
            return Ok(Some(variant));
        }
        if !create_missing {
            return Ok(None);
        }
        let created = self
            .create_variant(template, values, &VariantOverrides::default())
            .await?;
        Ok(Some(created))
    }
}
