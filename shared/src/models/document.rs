//! Document and line-item models
//!
//! In-memory state of the host documents the engine reacts to. Field names
//! follow the host platform's custom fields so rows serialize directly into
//! the host's document payloads.

use super::attribute::AttributeSlot;
use super::item::ResolvedVariant;
use serde::{Deserialize, Serialize};

// ============================================================================
// Embedded field groups
// ============================================================================

/// Variant-selection fields embedded in a document row
///
/// `generation` is bumped on every edit; a resolution result issued for an
/// older generation must not be applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powder_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip)]
    pub generation: u64,
}

impl VariantFields {
    /// Selected value for one slot; empty strings count as unset
    pub fn value(&self, slot: AttributeSlot) -> Option<&str> {
        let value = match slot {
            AttributeSlot::PowderCode => self.powder_code.as_deref(),
            AttributeSlot::Sticker => self.sticker.as_deref(),
            AttributeSlot::Length => self.length.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }

    /// Set one slot's value and bump the generation
    pub fn set_value(&mut self, slot: AttributeSlot, value: Option<String>) {
        match slot {
            AttributeSlot::PowderCode => self.powder_code = value,
            AttributeSlot::Sticker => self.sticker = value,
            AttributeSlot::Length => self.length = value,
        }
        self.generation += 1;
    }

    /// Set the template and bump the generation
    pub fn set_template(&mut self, template: Option<String>) {
        self.template_item = template;
        self.generation += 1;
    }

    /// Clear all attribute selections (template untouched)
    pub fn clear_selections(&mut self) {
        self.powder_code = None;
        self.sticker = None;
        self.length = None;
        self.generation += 1;
    }

    /// Whether any attribute selection is present
    pub fn has_any_selection(&self) -> bool {
        AttributeSlot::ALL.iter().any(|s| self.value(*s).is_some())
    }
}

/// Resolved-variant fields embedded in a document row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_uom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_factor: Option<f64>,
}

impl ResolvedFields {
    /// Apply a resolution result, touching only the members it carries
    ///
    /// `stock_uom` feeds both the transaction UOM and the stock UOM, matching
    /// how the host populates fresh rows.
    pub fn apply(&mut self, variant: &ResolvedVariant) {
        self.item_code = Some(variant.item_code.clone());
        if let Some(ref name) = variant.item_name {
            self.item_name = Some(name.clone());
        }
        if let Some(ref description) = variant.description {
            self.description = Some(description.clone());
        }
        if let Some(ref stock_uom) = variant.stock_uom {
            self.uom = Some(stock_uom.clone());
            self.stock_uom = Some(stock_uom.clone());
        }
        if let Some(factor) = variant.conversion_factor {
            self.conversion_factor = Some(factor);
        }
    }

    /// Drop all resolved data (stale selection)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// BOM
// ============================================================================

/// Bill of Materials header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bom {
    /// Finished good item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// Quantity of the finished good, in stock UOM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pcs: Option<f64>,
    #[serde(default)]
    pub items: Vec<BomItem>,
}

/// BOM component row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pcs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_factor: Option<f64>,
}

// ============================================================================
// Sales Order
// ============================================================================

/// Sales Order header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    #[serde(default)]
    pub items: Vec<SalesOrderItem>,
}

/// Sales Order line item with variant-selection fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderItem {
    #[serde(flatten)]
    pub variant: VariantFields,
    #[serde(flatten)]
    pub resolved: ResolvedFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pcs: Option<f64>,
}

impl SalesOrderItem {
    /// The template used for resolution: the explicit template field, or the
    /// row's item code when the user picked a template directly as the item
    pub fn template_source(&self) -> Option<&str> {
        self.variant
            .template_item
            .as_deref()
            .or(self.resolved.item_code.as_deref())
    }
}

// ============================================================================
// Work Order
// ============================================================================

/// Work Order header
///
/// Header quantities are in the production item's stock UOM, so the
/// pieces ⇄ quantity conversion on the header carries no conversion factor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bom_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pcs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produced_qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pcs_produced: Option<f64>,
    #[serde(default)]
    pub items: Vec<WorkOrderItem>,
}

/// Work Order required-items row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pcs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_factor: Option<f64>,
}

// ============================================================================
// Stock Entry
// ============================================================================

/// Stock Entry header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    /// Voucher number once saved
    #[serde(default)]
    pub name: String,
    /// Source Work Order, when generated from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_order: Option<String>,
    #[serde(default)]
    pub items: Vec<StockEntryDetail>,
}

/// Stock Entry detail row with variant-selection fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockEntryDetail {
    /// Row id, matched against ledger `voucher_detail_no`
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub variant: VariantFields,
    #[serde(flatten)]
    pub resolved: ResolvedFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pcs: Option<f64>,
}

// ============================================================================
// Delivery Note
// ============================================================================

/// Delivery Note header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryNote {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<DeliveryNoteItem>,
}

/// Delivery Note line item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryNoteItem {
    /// Row id, matched against ledger `voucher_detail_no`
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pcs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_factor: Option<f64>,
}

// ============================================================================
// Stock Reconciliation
// ============================================================================

/// Stock Reconciliation header
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockReconciliation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<StockReconciliationItem>,
}

/// Stock Reconciliation line item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockReconciliationItem {
    /// Row id, matched against ledger `voucher_detail_no`
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pcs: Option<f64>,
}

// ============================================================================
// Stock Ledger
// ============================================================================

/// Stock ledger row created by the host on document submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLedgerEntry {
    pub voucher_type: String,
    pub voucher_no: String,
    pub voucher_detail_no: String,
    pub item_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pcs: Option<f64>,
}
