//! Work Order form session
//!
//! Header quantities are in the production item's stock UOM, so the header
//! piece conversions run without a conversion factor. Piece counts are the
//! source of truth: editing pieces always recomputes the paired quantity,
//! while deriving pieces from a quantity never overwrites a piece count the
//! user already filled in.

use super::{row_not_found, weight_per_unit};
use crate::convert;
use crate::error::EngineResult;
use alumina_host::HostClient;
use shared::{Bom, SalesOrder, WorkOrder};
use std::sync::Arc;

pub struct WorkOrderSession {
    host: Arc<dyn HostClient>,
    doc: WorkOrder,
}

fn is_unset(value: Option<f64>) -> bool {
    value.is_none_or(|v| v == 0.0)
}

impl WorkOrderSession {
    pub fn new(host: Arc<dyn HostClient>, doc: WorkOrder) -> Self {
        Self { host, doc }
    }

    pub fn doc(&self) -> &WorkOrder {
        &self.doc
    }

    /// Mutable document access for field edits preceding a handler call
    pub fn doc_mut(&mut self) -> &mut WorkOrder {
        &mut self.doc
    }

    pub fn into_doc(self) -> WorkOrder {
        self.doc
    }

    async fn production_weight_per_unit(&self) -> EngineResult<Option<f64>> {
        weight_per_unit(self.host.as_ref(), self.doc.production_item.as_deref()).await
    }

    /// Header pieces edited: recompute the order quantity
    pub async fn total_pcs_changed(&mut self) -> EngineResult<()> {
        if let (Some(pcs), Some(wpu)) = (self.doc.total_pcs, self.production_weight_per_unit().await?) {
            self.doc.qty = convert::qty_from_total_pieces(pcs, wpu, None);
        }
        Ok(())
    }

    /// Header quantity edited: derive the piece count, unless already set
    pub async fn qty_changed(&mut self) -> EngineResult<()> {
        if !is_unset(self.doc.total_pcs) {
            return Ok(());
        }
        if let (Some(qty), Some(wpu)) = (self.doc.qty, self.production_weight_per_unit().await?) {
            self.doc.total_pcs = convert::total_pieces_from_qty(qty, wpu);
        }
        Ok(())
    }

    /// Produced pieces edited: recompute the produced quantity
    pub async fn total_pcs_produced_changed(&mut self) -> EngineResult<()> {
        if let (Some(pcs), Some(wpu)) = (
            self.doc.total_pcs_produced,
            self.production_weight_per_unit().await?,
        ) {
            self.doc.produced_qty = convert::qty_from_total_pieces(pcs, wpu, None);
        }
        Ok(())
    }

    /// Produced quantity edited: derive the produced pieces, unless set
    pub async fn produced_qty_changed(&mut self) -> EngineResult<()> {
        if !is_unset(self.doc.total_pcs_produced) {
            return Ok(());
        }
        if let (Some(qty), Some(wpu)) = (
            self.doc.produced_qty,
            self.production_weight_per_unit().await?,
        ) {
            self.doc.total_pcs_produced = convert::total_pieces_from_qty(qty, wpu);
        }
        Ok(())
    }

    /// BOM picked on the header: inherit its piece count
    pub fn apply_bom(&mut self, bom: &Bom) {
        if let Some(pcs) = bom.total_pcs {
            self.doc.total_pcs = Some(pcs);
        }
    }

    /// Before save: inherit the header piece count from the Sales Order
    /// this order was created for
    ///
    /// Matches the Sales Order row selling the production item; a header
    /// piece count already present is left alone.
    pub fn pull_from_sales_order(&mut self, sales_order: &SalesOrder) {
        if !is_unset(self.doc.total_pcs) {
            return;
        }
        let Some(ref production_item) = self.doc.production_item else {
            return;
        };
        let inherited = sales_order
            .items
            .iter()
            .find(|item| item.resolved.item_code.as_deref() == Some(production_item.as_str()))
            .and_then(|item| item.total_pcs);
        if inherited.is_some() {
            self.doc.total_pcs = inherited;
        }
    }

    /// Required-items row pieces edited: derive the row quantity
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
    use shared::{ItemSummary, SalesOrderItem, WorkOrderItem};

    fn host() -> Arc<MockHost> {
        let mut item = ItemSummary::new("AL-PROFILE-001");
        item.weight_per_unit = Some(4.0);
        Arc::new(MockHost::new().with_item(item))
    }

    fn doc() -> WorkOrder {
        WorkOrder {
            production_item: Some("AL-PROFILE-001".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_header_pieces_derive_qty_without_factor() {
        let mut session = WorkOrderSession::new(host(), doc());
        session.doc.total_pcs = Some(100.0);

        session.total_pcs_changed().await.unwrap();
        assert_eq!(session.doc().qty, Some(25.0));
    }

    #[tokio::test]
    async fn test_header_pieces_reedit_recomputes_qty() {
        let mut session = WorkOrderSession::new(host(), doc());
        session.doc.total_pcs = Some(100.0);
        session.total_pcs_changed().await.unwrap();
        assert_eq!(session.doc().qty, Some(25.0));

        // pieces are the source of truth: a later edit recomputes qty
        session.doc.total_pcs = Some(200.0);
        session.total_pcs_changed().await.unwrap();
        assert_eq!(session.doc().qty, Some(50.0));
    }

    #[tokio::test]
    async fn test_qty_derives_pieces() {
        let mut session = WorkOrderSession::new(host(), doc());
        session.doc.qty = Some(25.0);

        session.qty_changed().await.unwrap();
        assert_eq!(session.doc().total_pcs, Some(100.0));
    }

    #[tokio::test]
    async fn test_qty_derivation_skips_set_pieces() {
        let mut session = WorkOrderSession::new(host(), doc());
        session.doc.qty = Some(25.0);
        session.doc.total_pcs = Some(999.0);

        session.qty_changed().await.unwrap();
        assert_eq!(session.doc().total_pcs, Some(999.0));

        // zero counts as unset
        session.doc.total_pcs = Some(0.0);
        session.qty_changed().await.unwrap();
        assert_eq!(session.doc().total_pcs, Some(100.0));
    }

    #[tokio::test]
    async fn test_produced_pair() {
        let mut session = WorkOrderSession::new(host(), doc());
        session.doc.total_pcs_produced = Some(40.0);
        session.total_pcs_produced_changed().await.unwrap();
        assert_eq!(session.doc().produced_qty, Some(10.0));

        // produced pieces re-edited: produced qty follows
        session.doc.total_pcs_produced = Some(80.0);
        session.total_pcs_produced_changed().await.unwrap();
        assert_eq!(session.doc().produced_qty, Some(20.0));

        let mut session = WorkOrderSession::new(host(), doc());
        session.doc.produced_qty = Some(10.0);
        session.produced_qty_changed().await.unwrap();
        assert_eq!(session.doc().total_pcs_produced, Some(40.0));

        // deriving pieces never overwrites a set count
        session.doc.produced_qty = Some(99.0);
        session.produced_qty_changed().await.unwrap();
        assert_eq!(session.doc().total_pcs_produced, Some(40.0));
    }

    #[tokio::test]
    async fn test_pull_from_sales_order() {
        let mut matched = SalesOrderItem::default();
        matched.resolved.item_code = Some("AL-PROFILE-001".to_string());
        matched.total_pcs = Some(300.0);
        let mut other = SalesOrderItem::default();
        other.resolved.item_code = Some("AL-OTHER".to_string());
        other.total_pcs = Some(40.0);
        let sales_order = SalesOrder {
            items: vec![other, matched],
        };

        let mut session = WorkOrderSession::new(host(), doc());
        session.pull_from_sales_order(&sales_order);
        assert_eq!(session.doc().total_pcs, Some(300.0));

        // a header count already present is left alone
        let mut session = WorkOrderSession::new(host(), doc());
        session.doc.total_pcs = Some(50.0);
        session.pull_from_sales_order(&sales_order);
        assert_eq!(session.doc().total_pcs, Some(50.0));
    }

    #[tokio::test]
    async fn test_apply_bom_pulls_pieces() {
        let mut session = WorkOrderSession::new(host(), doc());
        let bom = Bom {
            total_pcs: Some(240.0),
            ..Default::default()
        };

        session.apply_bom(&bom);
        assert_eq!(session.doc().total_pcs, Some(240.0));

        // a BOM without pieces changes nothing
        session.apply_bom(&Bom::default());
        assert_eq!(session.doc().total_pcs, Some(240.0));
    }

    #[tokio::test]
    async fn test_row_pieces_derive_qty() {
        let mut session = WorkOrderSession::new(host(), doc());
        session.doc.items.push(WorkOrderItem {
            item_code: Some("AL-PROFILE-001".to_string()),
            total_pcs: Some(100.0),
            conversion_factor: Some(2.0),
            ..Default::default()
        });

        session.row_total_pcs_changed(0).await.unwrap();
        assert_eq!(session.doc().items[0].qty, Some(12.5));
    }
}
