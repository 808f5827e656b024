//! Shared types for the Alumina variant engine
//!
//! Common types used across multiple crates including domain models,
//! error types and the host API response envelope.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{
    AttributeDefinition, AttributeSlot, AttributeValue, Bom, BomItem, DeliveryNote,
    DeliveryNoteItem, ItemSummary, ResolvedFields, ResolvedVariant, SalesOrder, SalesOrderItem,
    StockEntry, StockEntryDetail, StockLedgerEntry, StockReconciliation, StockReconciliationItem,
    TemplateAttributes, VariantFields, WorkOrder, WorkOrderItem,
};
