//! In-memory host for tests
//!
//! Answers from seeded data and counts every remote call, so tests can
//! assert not just outcomes but how many round trips produced them.

use crate::client::{HostClient, SelectionValues, VariantOverrides};
use crate::error::{HostError, HostResult};
use async_trait::async_trait;
use shared::{AttributeValue, ItemSummary, ResolvedVariant, TemplateAttributes};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

/// Number of calls per remote operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub template_attributes: usize,
    pub search_attribute_values: usize,
    pub find_variant: usize,
    pub create_variant: usize,
    pub item: usize,
}

#[derive(Default)]
struct MockState {
    templates: HashMap<String, TemplateAttributes>,
    items: HashMap<String, ItemSummary>,
    variants: HashMap<(String, SelectionValues), ResolvedVariant>,
    calls: CallCounts,
    last_find: Option<(String, SelectionValues)>,
    created_codes: Vec<String>,
    created_seq: u64,
}

/// In-memory [`HostClient`] backed by seeded templates, items, and variants
#[derive(Default)]
pub struct MockHost {
    state: Mutex<MockState>,
    fail_remote: AtomicBool,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a template schema
    pub fn with_template(mut self, template: TemplateAttributes) -> Self {
        let state = self.state.get_mut();
        state.templates.insert(template.template.clone(), template);
        self
    }

    /// Seed an item record
    pub fn with_item(mut self, item: ItemSummary) -> Self {
        let state = self.state.get_mut();
        state.items.insert(item.item_code.clone(), item);
        self
    }

    /// Seed an existing variant for a template + selection
    pub fn with_variant(
        mut self,
        template: impl Into<String>,
        values: SelectionValues,
        variant: ResolvedVariant,
    ) -> Self {
        let state = self.state.get_mut();
        state.variants.insert((template.into(), values), variant);
        self
    }

    /// Make every remote operation fail, simulating a transport outage
    pub fn set_fail_remote(&self, fail: bool) {
        self.fail_remote.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of the per-operation call counters
    pub async fn calls(&self) -> CallCounts {
        self.state.lock().await.calls.clone()
    }

    /// Arguments of the most recent `find_variant` call
    pub async fn last_find(&self) -> Option<(String, SelectionValues)> {
        self.state.lock().await.last_find.clone()
    }

    /// Item codes materialized through `create_variant`, in order
    pub async fn created_codes(&self) -> Vec<String> {
        self.state.lock().await.created_codes.clone()
    }

    fn check_remote(&self) -> HostResult<()> {
        if self.fail_remote.load(Ordering::SeqCst) {
            return Err(HostError::Status {
                code: 500,
                message: "injected remote failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl HostClient for MockHost {
    async fn template_attributes(&self, template: &str) -> HostResult<TemplateAttributes> {
        self.check_remote()?;
        let mut state = self.state.lock().await;
        state.calls.template_attributes += 1;
        state
            .templates
            .get(template)
            .cloned()
            .ok_or_else(|| HostError::Status {
                code: 404,
                message: format!("template {} not found", template),
            })
    }

    async fn search_attribute_values(
        &self,
        attribute: &str,
        query: &str,
    ) -> HostResult<Vec<AttributeValue>> {
        self.check_remote()?;
        let mut state = self.state.lock().await;
        state.calls.search_attribute_values += 1;

        let needle = query.to_lowercase();
        let mut matches = Vec::new();
        for template in state.templates.values() {
            if let Some(definition) = template.attribute(attribute) {
                for value in &definition.values {
                    if value.value.to_lowercase().contains(&needle)
                        && !matches.contains(value)
                    {
                        matches.push(value.clone());
                    }
                }
            }
        }
        Ok(matches)
    }

    async fn find_variant(
        &self,
        template: &str,
        values: &SelectionValues,
    ) -> HostResult<Option<ResolvedVariant>> {
        self.check_remote()?;
        let mut state = self.state.lock().await;
        state.calls.find_variant += 1;
        state.last_find = Some((template.to_string(), values.clone()));
        Ok(state
            .variants
            .get(&(template.to_string(), values.clone()))
            .cloned())
    }

    async fn create_variant(
        &self,
        template: &str,
        values: &SelectionValues,
        overrides: &VariantOverrides,
    ) -> HostResult<ResolvedVariant> {
        self.check_remote()?;
        let mut state = self.state.lock().await;
        state.calls.create_variant += 1;
        state.created_seq += 1;

        let item_code = overrides
            .item_code
            .clone()
            .unwrap_or_else(|| format!("{}-{:03}", template, state.created_seq));

        let mut variant = ResolvedVariant::new(item_code.clone());
        variant.item_name = overrides.item_name.clone();
        variant.description = overrides.description.clone();
        variant.stock_uom = state
            .items
            .get(template)
            .and_then(|item| item.stock_uom.clone());

        state
            .variants
            .insert((template.to_string(), values.clone()), variant.clone());
        state.created_codes.push(item_code);
        Ok(variant)
    }

    async fn item(&self, item_code: &str) -> HostResult<Option<ItemSummary>> {
        self.check_remote()?;
        let mut state = self.state.lock().await;
        state.calls.item += 1;
        Ok(state.items.get(item_code).cloned())
    }
}
