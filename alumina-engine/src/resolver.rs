//! Variant resolver
//!
//! Turns a line item's attribute selection into a concrete variant. A
//! resolution only ever fires on a complete selection; anything less clears
//! the previously resolved fields and stays local. Results are applied
//! against a generation token captured at snapshot time, so an answer for a
//! selection the user has already moved past is discarded.

use crate::cache::TemplateAttributeCache;
use crate::error::EngineResult;
use crate::matcher::FieldMatchPolicy;
use alumina_host::{HostClient, SelectionValues};
use shared::{ResolvedFields, ResolvedVariant, TemplateAttributes, VariantFields};

/// Result of one resolution attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Selection incomplete: resolved fields cleared, no remote call made
    Incomplete,
    /// Host confirmed no variant exists for this selection
    NoMatch,
    /// The row changed while the call was in flight; result discarded
    Stale,
    /// Variant found (or created) and applied to the row
    Resolved(ResolvedVariant),
}

/// A complete selection captured at a point in time
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionSnapshot {
    pub template: String,
    pub values: SelectionValues,
    generation: u64,
}

/// Resolves line-item selections through a [`HostClient`]
#[derive(Debug, Clone, Copy, Default)]
pub struct VariantResolver {
    policy: FieldMatchPolicy,
    create_missing: bool,
}

impl VariantResolver {
    pub fn new(policy: FieldMatchPolicy) -> Self {
        Self {
            policy,
            create_missing: false,
        }
    }

    /// Materialize missing variants instead of reporting [`Outcome::NoMatch`]
    pub fn with_create_missing(mut self, create_missing: bool) -> Self {
        self.create_missing = create_missing;
        self
    }

    pub fn policy(&self) -> FieldMatchPolicy {
        self.policy
    }

    /// Capture the row's selection, `None` while it is incomplete
    ///
    /// The selection is complete when every attribute of the schema is
    /// assigned a slot and that slot holds a non-empty value.
    pub fn snapshot(
        &self,
        schema: &TemplateAttributes,
        fields: &VariantFields,
    ) -> Option<ResolutionSnapshot> {
        let mut values = SelectionValues::new();
        for assignment in self.policy.assign(&schema.attributes) {
            let slot = assignment.slot?;
            let value = fields.value(slot)?;
            values.insert(assignment.attribute, value.to_string());
        }
        Some(ResolutionSnapshot {
            template: schema.template.clone(),
            values,
            generation: fields.generation,
        })
    }

    /// Issue the remote lookup for a captured selection
    pub async fn resolve(
        &self,
        host: &dyn HostClient,
        snapshot: &ResolutionSnapshot,
    ) -> EngineResult<Option<ResolvedVariant>> {
        let result = host
            .resolve_or_create_variant(&snapshot.template, &snapshot.values, self.create_missing)
            .await?;
        Ok(result)
    }

    /// Apply a resolution result to the row, unless the row has moved on
    pub fn apply(
        &self,
        snapshot: &ResolutionSnapshot,
        result: Option<ResolvedVariant>,
        fields: &VariantFields,
        resolved: &mut ResolvedFields,
    ) -> Outcome {
        if fields.generation != snapshot.generation {
            tracing::debug!(
                template = %snapshot.template,
                issued = snapshot.generation,
                current = fields.generation,
                "discarding stale resolution result"
            );
            return Outcome::Stale;
        }
        match result {
            Some(variant) => {
                resolved.apply(&variant);
                Outcome::Resolved(variant)
            }
            None => Outcome::NoMatch,
        }
    }

    /// Full resolution pass over one row
    ///
    /// Fetches the schema through the cache, captures the selection, calls
    /// the host, and applies the answer. An incomplete selection clears the
    /// resolved fields and issues no call.
    pub async fn resolve_row(
        &self,
        host: &dyn HostClient,
        cache: &mut TemplateAttributeCache,
        template: &str,
        fields: &VariantFields,
        resolved: &mut ResolvedFields,
    ) -> EngineResult<Outcome> {
        let schema = cache.fetch_and_cache(host, template).await?;
        let Some(snapshot) = self.snapshot(&schema, fields) else {
            resolved.clear();
            return Ok(Outcome::Incomplete);
        };
        let result = self.resolve(host, &snapshot).await?;
        Ok(self.apply(&snapshot, result, fields, resolved))
    }
}
