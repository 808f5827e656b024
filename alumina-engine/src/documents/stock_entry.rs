//! Stock Entry form session
//!
//! Detail rows carry the same variant-selection trio as Sales Order rows,
//! but the stock flow only looks variants up; it never materializes one.
//! A Stock Entry generated from a Work Order inherits the Work Order's row
//! piece counts before save.

use super::{row_not_found, weight_per_unit};
use crate::cache::TemplateAttributeCache;
use crate::convert;
use crate::error::EngineResult;
use crate::matcher::FieldMatchPolicy;
use crate::resolver::{Outcome, VariantResolver};
use alumina_host::HostClient;
use shared::{StockEntry, WorkOrder};
use std::sync::Arc;

pub struct StockEntrySession {
    host: Arc<dyn HostClient>,
    doc: StockEntry,
    cache: TemplateAttributeCache,
    resolver: VariantResolver,
}

impl StockEntrySession {
    pub fn new(host: Arc<dyn HostClient>, doc: StockEntry) -> Self {
        Self {
            host,
            doc,
            cache: TemplateAttributeCache::new(),
            resolver: VariantResolver::new(FieldMatchPolicy::Positional),
        }
    }

    pub fn doc(&self) -> &StockEntry {
        &self.doc
    }

    /// Mutable document access for field edits preceding a handler call
    pub fn doc_mut(&mut self) -> &mut StockEntry {
        &mut self.doc
    }

    pub fn into_doc(self) -> StockEntry {
        self.doc
    }

    /// Template edited on a row: drop the selection and the resolved
    /// variant, then prefetch the new schema
    pub async fn template_changed(&mut self, row: usize) -> EngineResult<()> {
        let item = self
            .doc
            .items
            .get_mut(row)
            .ok_or_else(|| row_not_found(row))?;
        item.variant.clear_selections();
        item.resolved.clear();

        let template = item.variant.template_item.clone();
        if let Some(template) = template {
            self.cache
                .fetch_and_cache(self.host.as_ref(), &template)
                .await?;
        }
        Ok(())
    }

    /// One of the attribute fields edited on a row
    pub async fn attribute_changed(&mut self, row: usize) -> EngineResult<Outcome> {
        let Self {
            host,
            doc,
            cache,
            resolver,
        } = self;
        let item = doc.items.get_mut(row).ok_or_else(|| row_not_found(row))?;

        let Some(template) = item.variant.template_item.clone() else {
            return Ok(Outcome::Incomplete);
        };
        resolver
            .resolve_row(
                host.as_ref(),
                cache,
                &template,
                &item.variant,
                &mut item.resolved,
            )
            .await
    }

    /// Row pieces edited: derive the row quantity
    pub async fn total_pcs_changed(&mut self, row: usize) -> EngineResult<()> {
        let item = self.doc.items.get(row).ok_or_else(|| row_not_found(row))?;
        let item_code = item.resolved.item_code.clone();
        let total_pcs = item.total_pcs;
        let factor = item.resolved.conversion_factor;

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

    /// Before save: inherit row piece counts from the source Work Order
    ///
    /// Required-items rows inherit from the matching Work Order item; a row
    /// for the production item itself inherits the header piece count. Rows
    /// that already carry pieces are left alone.
    pub fn pull_from_work_order(&mut self, work_order: &WorkOrder) {
        for item in &mut self.doc.items {
            if item.total_pcs.is_some() {
                continue;
            }
            let Some(ref code) = item.resolved.item_code else {
                continue;
            };
            let inherited = if work_order.production_item.as_deref() == Some(code.as_str()) {
                work_order.total_pcs
            } else {
                work_order
                    .items
                    .iter()
                    .find(|wo| wo.item_code.as_deref() == Some(code.as_str()))
                    .and_then(|wo| wo.total_pcs)
            };
            if inherited.is_some() {
                item.total_pcs = inherited;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumina_host::{MockHost, SelectionValues};
    use shared::{
        AttributeDefinition, AttributeSlot, AttributeValue, ResolvedVariant, StockEntryDetail,
        TemplateAttributes, WorkOrderItem,
    };

    fn schema() -> TemplateAttributes {
        TemplateAttributes {
            template: "AL-PROFILE".to_string(),
            template_name: None,
            attributes: vec![AttributeDefinition {
                name: "Powder Code".to_string(),
                values: vec![AttributeValue::new("Red")],
            }],
        }
    }

    fn doc_with_row() -> StockEntry {
        let mut detail = StockEntryDetail::default();
        detail.variant.template_item = Some("AL-PROFILE".to_string());
        StockEntry {
            items: vec![detail],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_template_change_clears_resolved() {
        let host = Arc::new(MockHost::new().with_template(schema()));
        let mut doc = doc_with_row();
        doc.items[0].resolved.item_code = Some("V-OLD".to_string());
        doc.items[0]
            .variant
            .set_value(AttributeSlot::PowderCode, Some("Red".to_string()));

        let mut session = StockEntrySession::new(host, doc);
        session.template_changed(0).await.unwrap();

        let row = &session.doc().items[0];
        assert!(row.resolved.item_code.is_none());
        assert!(!row.variant.has_any_selection());
    }

    #[tokio::test]
    async fn test_stock_flow_never_creates() {
        let host = Arc::new(MockHost::new().with_template(schema()));
        let mut session = StockEntrySession::new(host.clone(), doc_with_row());
        session.doc.items[0]
            .variant
            .set_value(AttributeSlot::PowderCode, Some("Red".to_string()));

        let outcome = session.attribute_changed(0).await.unwrap();
        assert_eq!(outcome, Outcome::NoMatch);
        assert_eq!(host.calls().await.create_variant, 0);
    }

    #[tokio::test]
    async fn test_attribute_complete_resolves() {
        let selection: SelectionValues = [("Powder Code".to_string(), "Red".to_string())]
            .into_iter()
            .collect();
        let host = Arc::new(
            MockHost::new()
                .with_template(schema())
                .with_variant("AL-PROFILE", selection, ResolvedVariant::new("V-001")),
        );
        let mut session = StockEntrySession::new(host, doc_with_row());
        session.doc.items[0]
            .variant
            .set_value(AttributeSlot::PowderCode, Some("Red".to_string()));

        let outcome = session.attribute_changed(0).await.unwrap();
        assert!(matches!(outcome, Outcome::Resolved(_)));
        assert_eq!(
            session.doc().items[0].resolved.item_code.as_deref(),
            Some("V-001")
        );
    }

    #[tokio::test]
    async fn test_emptied_attribute_clears_resolved() {
        let host = Arc::new(MockHost::new().with_template(schema()));
        let mut session = StockEntrySession::new(host, doc_with_row());
        session.doc.items[0].resolved.item_code = Some("V-001".to_string());
        session.doc.items[0]
            .variant
            .set_value(AttributeSlot::PowderCode, None);

        let outcome = session.attribute_changed(0).await.unwrap();
        assert_eq!(outcome, Outcome::Incomplete);
        assert!(session.doc().items[0].resolved.item_code.is_none());
    }

    #[test]
    fn test_pull_from_work_order() {
        let host = Arc::new(MockHost::new());
        let mut doc = StockEntry::default();

        let mut matched = StockEntryDetail::default();
        matched.resolved.item_code = Some("V-001".to_string());
        let mut already_set = StockEntryDetail::default();
        already_set.resolved.item_code = Some("V-002".to_string());
        already_set.total_pcs = Some(5.0);
        doc.items = vec![matched, already_set];

        let work_order = WorkOrder {
            items: vec![
                WorkOrderItem {
                    item_code: Some("V-001".to_string()),
                    total_pcs: Some(100.0),
                    ..Default::default()
                },
                WorkOrderItem {
                    item_code: Some("V-002".to_string()),
                    total_pcs: Some(60.0),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let mut session = StockEntrySession::new(host, doc);
        session.pull_from_work_order(&work_order);

        assert_eq!(session.doc().items[0].total_pcs, Some(100.0));
        assert_eq!(session.doc().items[1].total_pcs, Some(5.0));
    }

    #[test]
    fn test_pull_from_work_order_finished_good_row() {
        let host = Arc::new(MockHost::new());
        let mut finished = StockEntryDetail::default();
        finished.resolved.item_code = Some("AL-DOOR".to_string());
        let doc = StockEntry {
            items: vec![finished],
            ..Default::default()
        };

        // the production item row inherits the header count
        let work_order = WorkOrder {
            production_item: Some("AL-DOOR".to_string()),
            total_pcs: Some(500.0),
            ..Default::default()
        };

        let mut session = StockEntrySession::new(host, doc);
        session.pull_from_work_order(&work_order);
        assert_eq!(session.doc().items[0].total_pcs, Some(500.0));
    }
}
