//! Stock-ledger piece propagation
//!
//! On submit, each document row's piece count is copied onto the ledger
//! entries the host wrote for it. A ledger entry matches a row on voucher
//! type, voucher number, item code, and the detail-row id; rows without
//! pieces are skipped.

use shared::{DeliveryNote, StockEntry, StockLedgerEntry, StockReconciliation};

pub const VOUCHER_STOCK_ENTRY: &str = "Stock Entry";
pub const VOUCHER_DELIVERY_NOTE: &str = "Delivery Note";
pub const VOUCHER_STOCK_RECONCILIATION: &str = "Stock Reconciliation";

/// One submitted row carrying pieces into the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct RowPieces {
    pub detail_no: String,
    pub item_code: String,
    pub total_pcs: f64,
}

/// Copy row piece counts onto matching ledger entries
///
/// Returns the number of entries updated.
pub fn propagate_total_pcs(
    entries: &mut [StockLedgerEntry],
    voucher_type: &str,
    voucher_no: &str,
    rows: &[RowPieces],
) -> usize {
    let mut updated = 0;
    for entry in entries.iter_mut() {
        if entry.voucher_type != voucher_type || entry.voucher_no != voucher_no {
            continue;
        }
        let matched = rows.iter().find(|row| {
            row.detail_no == entry.voucher_detail_no && row.item_code == entry.item_code
        });
        if let Some(row) = matched {
            entry.total_pcs = Some(row.total_pcs);
            updated += 1;
        }
    }
    if updated > 0 {
        tracing::debug!(voucher_type, voucher_no, updated, "propagated row pieces to ledger");
    }
    updated
}

/// Rows of a submitted Stock Entry that carry pieces
pub fn stock_entry_rows(doc: &StockEntry) -> Vec<RowPieces> {
    doc.items
        .iter()
        .filter_map(|item| {
            let total_pcs = item.total_pcs?;
            let item_code = item.resolved.item_code.clone()?;
            Some(RowPieces {
                detail_no: item.name.clone(),
                item_code,
                total_pcs,
            })
        })
        .collect()
}

/// Rows of a submitted Delivery Note that carry pieces
pub fn delivery_note_rows(doc: &DeliveryNote) -> Vec<RowPieces> {
    doc.items
        .iter()
        .filter_map(|item| {
            let total_pcs = item.total_pcs?;
            let item_code = item.item_code.clone()?;
            Some(RowPieces {
                detail_no: item.name.clone(),
                item_code,
                total_pcs,
            })
        })
        .collect()
}

/// Rows of a submitted Stock Reconciliation that carry pieces
pub fn stock_reconciliation_rows(doc: &StockReconciliation) -> Vec<RowPieces> {
    doc.items
        .iter()
        .filter_map(|item| {
            let total_pcs = item.total_pcs?;
            let item_code = item.item_code.clone()?;
            Some(RowPieces {
                detail_no: item.name.clone(),
                item_code,
                total_pcs,
            })
        })
        .collect()
}

/// Submit hook for a Stock Entry
pub fn on_stock_entry_submit(doc: &StockEntry, entries: &mut [StockLedgerEntry]) -> usize {
    let rows = stock_entry_rows(doc);
    propagate_total_pcs(entries, VOUCHER_STOCK_ENTRY, &doc.name, &rows)
}

/// Submit hook for a Delivery Note
pub fn on_delivery_note_submit(doc: &DeliveryNote, entries: &mut [StockLedgerEntry]) -> usize {
    let rows = delivery_note_rows(doc);
    propagate_total_pcs(entries, VOUCHER_DELIVERY_NOTE, &doc.name, &rows)
}

/// Submit hook for a Stock Reconciliation
pub fn on_stock_reconciliation_submit(
    doc: &StockReconciliation,
    entries: &mut [StockLedgerEntry],
) -> usize {
    let rows = stock_reconciliation_rows(doc);
    propagate_total_pcs(entries, VOUCHER_STOCK_RECONCILIATION, &doc.name, &rows)
}
