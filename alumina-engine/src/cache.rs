//! Template attribute cache
//!
//! Per-session cache of template variant schemas. A template's attribute
//! definitions are immutable for the lifetime of an editing session, so a
//! schema is fetched at most once and every later lookup is served locally.
//! All fetches go through `&mut self`, which serializes them per session and
//! rules out redundant in-flight calls structurally.

use crate::error::EngineResult;
use alumina_host::HostClient;
use shared::TemplateAttributes;
use std::collections::HashMap;
use std::sync::Arc;

/// Template -> fetched variant schema, lazily filled
#[derive(Debug, Clone, Default)]
pub struct TemplateAttributeCache {
    entries: HashMap<String, Arc<TemplateAttributes>>,
}

impl TemplateAttributeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached schema
    pub fn get(&self, template: &str) -> Option<Arc<TemplateAttributes>> {
        self.entries.get(template).cloned()
    }

    /// Store a schema, overwriting any previous entry
    pub fn put(&mut self, attributes: TemplateAttributes) -> Arc<TemplateAttributes> {
        let arc = Arc::new(attributes);
        self.entries
            .insert(arc.template.clone(), Arc::clone(&arc));
        arc
    }

    /// Return the cached schema or fetch it from the host exactly once
    pub async fn fetch_and_cache(
        &mut self,
        host: &dyn HostClient,
        template: &str,
    ) -> EngineResult<Arc<TemplateAttributes>> {
        if let Some(cached) = self.get(template) {
            return Ok(cached);
        }

        tracing::debug!(template, "fetching template attributes");
        let attributes = host.template_attributes(template).await?;
        Ok(self.put(attributes))
    }

    /// Permitted values of one attribute, for scoping a field's pick list
    pub fn value_filter(&self, template: &str, attribute: &str) -> Option<Vec<String>> {
        let schema = self.entries.get(template)?;
        let definition = schema.attribute(attribute)?;
        Some(definition.values.iter().map(|v| v.value.clone()).collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
