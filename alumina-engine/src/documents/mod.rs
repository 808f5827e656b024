//! Document form sessions
//!
//! One session per open document: it owns the document state, the
//! per-session attribute cache, and the handlers the host's form events map
//! onto. Field-edit handlers mutate line items in place and degrade to
//! clearing derived fields when inputs are malformed.

pub mod bom;
pub mod delivery_note;
pub mod sales_order;
pub mod stock_entry;
pub mod work_order;

pub use bom::BomSession;
pub use delivery_note::DeliveryNoteSession;
pub use sales_order::SalesOrderSession;
pub use stock_entry::StockEntrySession;
pub use work_order::WorkOrderSession;

use crate::error::EngineResult;
use alumina_host::HostClient;
use shared::{AppError, ErrorCode};

/// Pieces-per-kg factor of an item, `None` when unknown or item unset
pub(crate) async fn weight_per_unit(
    host: &dyn HostClient,
    item_code: Option<&str>,
) -> EngineResult<Option<f64>> {
    let Some(item_code) = item_code.filter(|c| !c.trim().is_empty()) else {
        return Ok(None);
    };
    Ok(host.item_weight_per_unit(item_code).await?)
}

/// Error for a line-item index outside the document
pub(crate) fn row_not_found(row: usize) -> AppError {
    AppError::new(ErrorCode::RowNotFound).with_detail("row", row as u64)
}
