//! Sales Order form session
//!
//! Item rows carry the variant-selection fields. Picking a template clears
//! any stale selection and prefetches its schema; completing the powder /
//! sticker / length trio resolves the concrete variant, creating it on the
//! host when it does not exist yet.

use super::{row_not_found, weight_per_unit};
use crate::cache::TemplateAttributeCache;
use crate::convert;
use crate::error::EngineResult;
use crate::matcher::FieldMatchPolicy;
use crate::resolver::{Outcome, VariantResolver};
use alumina_host::HostClient;
use shared::SalesOrder;
use std::sync::Arc;

pub struct SalesOrderSession {
    host: Arc<dyn HostClient>,
    doc: SalesOrder,
    cache: TemplateAttributeCache,
    resolver: VariantResolver,
}

impl SalesOrderSession {
    pub fn new(host: Arc<dyn HostClient>, doc: SalesOrder) -> Self {
        Self {
            host,
            doc,
            cache: TemplateAttributeCache::new(),
            // sales flow materializes missing variants
            resolver: VariantResolver::new(FieldMatchPolicy::Positional).with_create_missing(true),
        }
    }

    /// Override the attribute-to-field match policy
    pub fn with_policy(mut self, policy: FieldMatchPolicy) -> Self {
        self.resolver = VariantResolver::new(policy).with_create_missing(true);
        self
    }

    pub fn doc(&self) -> &SalesOrder {
        &self.doc
    }

    /// Mutable document access for field edits preceding a handler call
    pub fn doc_mut(&mut self) -> &mut SalesOrder {
        &mut self.doc
    }

    pub fn into_doc(self) -> SalesOrder {
        self.doc
    }

    pub fn cache(&self) -> &TemplateAttributeCache {
        &self.cache
    }

    /// Template (or item acting as template) edited on a row
    ///
    /// Clears the attribute selection and prefetches the schema so the
    /// pick lists are scoped before the user reaches them.
    pub async fn template_changed(&mut self, row: usize) -> EngineResult<()> {
        let item = self
            .doc
            .items
            .get_mut(row)
            .ok_or_else(|| row_not_found(row))?;
        item.variant.clear_selections();

        let template = item.template_source().map(str::to_string);
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

        let Some(template) = item.template_source().map(str::to_string) else {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumina_host::{MockHost, SelectionValues};
    use shared::{
        AttributeDefinition, AttributeSlot, AttributeValue, ItemSummary, ResolvedVariant,
        SalesOrderItem, TemplateAttributes,
    };

    fn schema() -> TemplateAttributes {
        TemplateAttributes {
            template: "AL-PROFILE".to_string(),
            template_name: None,
            attributes: vec![
                AttributeDefinition {
                    name: "Powder Code".to_string(),
                    values: vec![AttributeValue::new("Red")],
                },
                AttributeDefinition {
                    name: "Sticker".to_string(),
                    values: vec![AttributeValue::new("With Sticker")],
                },
            ],
        }
    }

    fn doc_with_template_row() -> SalesOrder {
        let mut item = SalesOrderItem::default();
        item.variant.template_item = Some("AL-PROFILE".to_string());
        SalesOrder { items: vec![item] }
    }

    #[tokio::test]
    async fn test_template_change_clears_and_prefetches() {
        let host = Arc::new(MockHost::new().with_template(schema()));
        let mut doc = doc_with_template_row();
        doc.items[0]
            .variant
            .set_value(AttributeSlot::PowderCode, Some("Red".to_string()));

        let mut session = SalesOrderSession::new(host.clone(), doc);
        session.template_changed(0).await.unwrap();

        assert!(!session.doc().items[0].variant.has_any_selection());
        assert_eq!(host.calls().await.template_attributes, 1);
        assert!(session.cache().get("AL-PROFILE").is_some());
    }

    #[tokio::test]
    async fn test_attribute_edits_resolve_once_complete() {
        let host = Arc::new(MockHost::new().with_template(schema()));
        let mut session = SalesOrderSession::new(host.clone(), doc_with_template_row());

        session.doc.items[0]
            .variant
            .set_value(AttributeSlot::PowderCode, Some("Red".to_string()));
        let outcome = session.attribute_changed(0).await.unwrap();
        assert_eq!(outcome, Outcome::Incomplete);
        assert_eq!(host.calls().await.find_variant, 0);

        session.doc.items[0]
            .variant
            .set_value(AttributeSlot::Sticker, Some("With Sticker".to_string()));
        let outcome = session.attribute_changed(0).await.unwrap();

        // missing variant gets created in the sales flow
        assert!(matches!(outcome, Outcome::Resolved(_)));
        assert_eq!(host.calls().await.create_variant, 1);
        assert!(session.doc().items[0].resolved.item_code.is_some());
    }

    #[tokio::test]
    async fn test_row_item_code_acts_as_template() {
        let host = Arc::new(MockHost::new().with_template(schema()));
        let mut item = SalesOrderItem::default();
        item.resolved.item_code = Some("AL-PROFILE".to_string());
        let mut session = SalesOrderSession::new(host.clone(), SalesOrder { items: vec![item] });

        session.template_changed(0).await.unwrap();
        assert_eq!(host.calls().await.template_attributes, 1);
    }

    #[tokio::test]
    async fn test_total_pcs_derives_qty() {
        let mut variant_item = ItemSummary::new("V-001");
        variant_item.weight_per_unit = Some(4.0);
        let selection: SelectionValues = [
            ("Powder Code".to_string(), "Red".to_string()),
            ("Sticker".to_string(), "With Sticker".to_string()),
        ]
        .into_iter()
        .collect();
        let host = Arc::new(
            MockHost::new()
                .with_template(schema())
                .with_item(variant_item)
                .with_variant("AL-PROFILE", selection, ResolvedVariant::new("V-001")),
        );

        let mut doc = doc_with_template_row();
        doc.items[0].resolved.item_code = Some("V-001".to_string());
        doc.items[0].total_pcs = Some(100.0);

        let mut session = SalesOrderSession::new(host, doc);
        session.total_pcs_changed(0).await.unwrap();
        assert_eq!(session.doc().items[0].qty, Some(25.0));
    }

    #[tokio::test]
    async fn test_total_pcs_without_weight_clears_qty() {
        let host = Arc::new(MockHost::new().with_item(ItemSummary::new("V-001")));
        let mut doc = SalesOrder {
            items: vec![SalesOrderItem::default()],
        };
        doc.items[0].resolved.item_code = Some("V-001".to_string());
        doc.items[0].total_pcs = Some(100.0);
        doc.items[0].qty = Some(3.0);

        let mut session = SalesOrderSession::new(host, doc);
        session.total_pcs_changed(0).await.unwrap();
        assert!(session.doc().items[0].qty.is_none());
    }
}
