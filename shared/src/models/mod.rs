//! Domain models shared between the engine and the host client

pub mod attribute;
pub mod document;
pub mod item;

pub use attribute::{AttributeDefinition, AttributeSlot, AttributeValue, TemplateAttributes};
pub use document::{
    Bom, BomItem, DeliveryNote, DeliveryNoteItem, ResolvedFields, SalesOrder, SalesOrderItem,
    StockEntry, StockEntryDetail, StockLedgerEntry, StockReconciliation, StockReconciliationItem,
    VariantFields, WorkOrder, WorkOrderItem,
};
pub use item::{ItemSummary, ResolvedVariant};
