//! Delivery Note form session

use super::{row_not_found, weight_per_unit};
use crate::convert;
use crate::error::EngineResult;
use alumina_host::HostClient;
use shared::DeliveryNote;
use std::sync::Arc;

pub struct DeliveryNoteSession {
    host: Arc<dyn HostClient>,
    doc: DeliveryNote,
}

impl DeliveryNoteSession {
    pub fn new(host: Arc<dyn HostClient>, doc: DeliveryNote) -> Self {
        Self { host, doc }
    }

    pub fn doc(&self) -> &DeliveryNote {
        &self.doc
    }

    /// Mutable document access for field edits preceding a handler call
    pub fn doc_mut(&mut self) -> &mut DeliveryNote {
        &mut self.doc
    }

    pub fn into_doc(self) -> DeliveryNote {
        self.doc
    }

    /// Row pieces edited: derive the row quantity
    pub async fn total_pcs_changed(&mut self, row: usize) -> EngineResult<()> {
        let item = self.doc.items.get(row).ok_or_else(|| row_not_found(row))?;
        let item_code = item.item_code.clone();
        let total_pcs = item.total_pcs;
        let factor = item.conversion_factor;

        let wpu = weight_per_unit(self.host.as_ref(), item_code.as_deref()).await?;
        let qty = match (total_pcs, wpu) {
            (Some(pcs), Some(wpu)) => convert::qty_from_total_pieces(pcs, wpu, factor),
            _ => None,
        };

        if let Some(item) = self.doc.items.get_mut(row) {
            item.qty = qty;
        }
        Ok(())
    }
}
