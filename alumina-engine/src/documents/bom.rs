//! BOM form session
//!
//! The header runs the inverse direction of every other document: editing
//! the finished-good quantity derives its piece count. Component rows derive
//! quantity from pieces as usual.

use super::{row_not_found, weight_per_unit};
use crate::convert;
use crate::error::EngineResult;
use alumina_host::HostClient;
use shared::Bom;
use std::sync::Arc;

pub struct BomSession {
    host: Arc<dyn HostClient>,
    doc: Bom,
}

impl BomSession {
    pub fn new(host: Arc<dyn HostClient>, doc: Bom) -> Self {
        Self { host, doc }
    }

    pub fn doc(&self) -> &Bom {
        &self.doc
    }

    /// Mutable document access for field edits preceding a handler call
    pub fn doc_mut(&mut self) -> &mut Bom {
        &mut self.doc
    }

    pub fn into_doc(self) -> Bom {
        self.doc
    }

    /// Header quantity edited: derive the finished good's piece count
    pub async fn quantity_changed(&mut self) -> EngineResult<()> {
        let wpu = weight_per_unit(self.host.as_ref(), self.doc.item.as_deref()).await?;
        self.doc.total_pcs = match (self.doc.quantity, wpu) {
            (Some(qty), Some(wpu)) => convert::total_pieces_from_qty(qty, wpu),
            _ => None,
        };
        Ok(())
    }

    /// Component row pieces edited: derive the row quantity
    pub async fn row_total_pcs_changed(&mut self, row: usize) -> EngineResult<()> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use alumina_host::MockHost;
    use shared::{BomItem, ItemSummary};

    fn host() -> Arc<MockHost> {
        let mut finished = ItemSummary::new("AL-DOOR");
        finished.weight_per_unit = Some(2.0);
        let mut component = ItemSummary::new("AL-PROFILE-001");
        component.weight_per_unit = Some(4.0);
        Arc::new(MockHost::new().with_item(finished).with_item(component))
    }

    #[tokio::test]
    async fn test_header_quantity_derives_pieces() {
        let doc = Bom {
            item: Some("AL-DOOR".to_string()),
            quantity: Some(50.0),
            ..Default::default()
        };
        let mut session = BomSession::new(host(), doc);

        session.quantity_changed().await.unwrap();
        assert_eq!(session.doc().total_pcs, Some(100.0));
    }

    #[tokio::test]
    async fn test_header_clears_on_unknown_item() {
        let doc = Bom {
            item: Some("NO-SUCH".to_string()),
            quantity: Some(50.0),
            total_pcs: Some(7.0),
            ..Default::default()
        };
        let mut session = BomSession::new(host(), doc);

        session.quantity_changed().await.unwrap();
        assert!(session.doc().total_pcs.is_none());
    }

    #[tokio::test]
    async fn test_row_pieces_derive_quantity() {
        let doc = Bom {
            items: vec![BomItem {
                item_code: Some("AL-PROFILE-001".to_string()),
                total_pcs: Some(100.0),
                conversion_factor: Some(5.0),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut session = BomSession::new(host(), doc);

        session.row_total_pcs_changed(0).await.unwrap();
        // 100 pcs / 4 pcs-per-kg / factor 5
        assert_eq!(session.doc().items[0].qty, Some(5.0));
    }

    #[tokio::test]
    async fn test_row_out_of_bounds() {
        let mut session = BomSession::new(host(), Bom::default());
        assert!(session.row_total_pcs_changed(3).await.is_err());
    }
}
