//! Alumina Engine - variant resolution for document line items
//!
//! The in-memory counterpart of the host platform's form-event system:
//! field edits on documents (BOM, Sales Order, Work Order, Stock Entry,
//! Delivery Note) drive handlers that read and write line items and issue
//! remote calls through [`alumina_host::HostClient`].
//!
//! Core pieces:
//! - [`cache::TemplateAttributeCache`] - per-session template schemas
//! - [`matcher::FieldMatchPolicy`] - attribute-to-field slot assignment
//! - [`resolver::VariantResolver`] - selection -> concrete variant
//! - [`convert`] - pure pieces ⇄ quantity calculator
//! - [`documents`] - per-document form sessions
//! - [`ledger`] - piece propagation into stock-ledger entries on submit
//! - [`tool::VariantCreationTool`] - validated bulk variant creation

pub mod cache;
pub mod convert;
pub mod documents;
pub mod error;
pub mod ledger;
pub mod matcher;
pub mod resolver;
pub mod tool;

pub use cache::TemplateAttributeCache;
pub use documents::{
    BomSession, DeliveryNoteSession, SalesOrderSession, StockEntrySession, WorkOrderSession,
};
pub use error::{EngineError, EngineResult};
pub use matcher::{FieldAssignment, FieldMatchPolicy};
pub use resolver::{Outcome, ResolutionSnapshot, VariantResolver};
pub use tool::{CreationReport, ToolRow, VariantCreationTool};
