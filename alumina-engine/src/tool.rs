//! Bulk variant creation tool
//!
//! Takes a batch of rows, each selecting up to three attribute values for a
//! template, validates the whole batch up front, then materializes the
//! missing variants. Validation aggregates every problem across the batch
//! so the user fixes them in one pass instead of one error at a time.

use crate::cache::TemplateAttributeCache;
use crate::convert;
use crate::error::{EngineError, EngineResult};
use crate::matcher::FieldMatchPolicy;
use alumina_host::{HostClient, SelectionValues, VariantOverrides};
use shared::{AppError, AttributeSlot, ErrorCode, TemplateAttributes};
use std::sync::Arc;

/// Rows may select at most this many attribute values
pub const MAX_ATTRIBUTES: usize = 3;

const WEIGHT_UOM: &str = "Kg";

/// One batch row: a template, positional attribute values, and optional
/// overrides for the created item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolRow {
    /// Row-level template, falling back to the batch default
    pub template: Option<String>,
    /// Values in attribute-definition order
    pub attribute_values: [Option<String>; MAX_ATTRIBUTES],
    pub item_code: Option<String>,
    pub item_name: Option<String>,
    pub variant_sku: Option<String>,
    pub description: Option<String>,
    /// Sticker-option label choosing the per-meter weight rate
    pub sticker_option: Option<String>,
    /// Calculated weight per unit, in `weight_uom`
    pub weight_per_unit: Option<f64>,
    pub weight_uom: Option<String>,
}

impl ToolRow {
    /// The value feeding one attribute position, blank treated as unset
    fn value_at(&self, index: usize) -> Option<&str> {
        self.attribute_values
            .get(index)?
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }
}

/// Result of a creation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreationReport {
    /// One human-readable line per row, in row order
    pub log: Vec<String>,
    /// Item codes of the variants actually created
    pub created: Vec<String>,
}

pub struct VariantCreationTool {
    host: Arc<dyn HostClient>,
    /// Batch-level default template
    pub template: Option<String>,
    pub rows: Vec<ToolRow>,
    cache: TemplateAttributeCache,
}

impl VariantCreationTool {
    pub fn new(host: Arc<dyn HostClient>) -> Self {
        Self {
            host,
            template: None,
            rows: Vec::new(),
            cache: TemplateAttributeCache::new(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_rows(mut self, rows: Vec<ToolRow>) -> Self {
        self.rows = rows;
        self
    }

    fn row_template(&self, row: &ToolRow) -> Option<String> {
        row.template.clone().or_else(|| self.template.clone())
    }

    /// Fetch a template's schema and enforce the attribute-count cap
    async fn template_context(
        &mut self,
        template: &str,
    ) -> EngineResult<Arc<TemplateAttributes>> {
        let schema = self
            .cache
            .fetch_and_cache(self.host.as_ref(), template)
            .await?;
        if schema.attributes.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::TemplateNoAttributes,
                format!("Template {} defines no attributes", template),
            )
            .into());
        }
        if schema.attributes.len() > MAX_ATTRIBUTES {
            return Err(AppError::with_message(
                ErrorCode::TemplateTooManyAttributes,
                format!(
                    "Template {} defines {} attributes, at most {} are supported",
                    template,
                    schema.attributes.len(),
                    MAX_ATTRIBUTES
                ),
            )
            .into());
        }
        Ok(schema)
    }

    /// Validate the whole batch, aggregating every row's problems
    pub async fn validate_rows(&mut self) -> EngineResult<()> {
        if self.rows.is_empty() {
            return Err(AppError::new(ErrorCode::DocumentEmpty).into());
        }

        let mut problems: Vec<String> = Vec::new();
        for index in 0..self.rows.len() {
            let row_no = index + 1;
            let Some(template) = self.row_template(&self.rows[index]) else {
                problems.push(format!("Row {}: no template selected", row_no));
                continue;
            };

            let schema = match self.template_context(&template).await {
                Ok(schema) => schema,
                Err(EngineError::Host(err)) if err.is_not_found() => {
                    problems.push(format!("Row {}: template {} not found", row_no, template));
                    continue;
                }
                Err(EngineError::App(err)) => {
                    problems.push(format!("Row {}: {}", row_no, err.message));
                    continue;
                }
                Err(err) => return Err(err),
            };

            let row = &self.rows[index];
            for (position, definition) in schema.attributes.iter().enumerate() {
                match row.value_at(position) {
                    None => problems.push(format!(
                        "Row {}: missing value for attribute {}",
                        row_no, definition.name
                    )),
                    Some(value) if !definition.allows(value) => problems.push(format!(
                        "Row {}: value '{}' is not allowed for attribute {}",
                        row_no, value, definition.name
                    )),
                    Some(_) => {}
                }
            }
        }

        if problems.is_empty() {
            return Ok(());
        }
        Err(AppError::with_message(
            ErrorCode::ValidationFailed,
            format!("{} validation problem(s) in the batch", problems.len()),
        )
        .with_detail("problems", problems)
        .into())
    }

    /// Create every missing variant in the batch
    ///
    /// Validates first; existing variants are skipped with a log line.
    pub async fn create_variants(&mut self) -> EngineResult<CreationReport> {
        self.validate_rows().await?;

        let mut report = CreationReport::default();
        for index in 0..self.rows.len() {
            let row_no = index + 1;
            // row_template and the schema are Some/valid after validate_rows
            let Some(template) = self.row_template(&self.rows[index]) else {
                continue;
            };
            let schema = self.template_context(&template).await?;

            let row = &self.rows[index];
            let mut values = SelectionValues::new();
            for (position, definition) in schema.attributes.iter().enumerate() {
                if let Some(value) = row.value_at(position) {
                    values.insert(definition.name.clone(), value.to_string());
                }
            }

            if let Some(existing) = self.host.find_variant(&template, &values).await? {
                report.log.push(format!(
                    "Row {}: skipped, variant {} already exists",
                    row_no, existing.item_code
                ));
                continue;
            }

            let overrides = VariantOverrides {
                item_code: row.item_code.clone(),
                item_name: row.item_name.clone(),
                variant_sku: row.variant_sku.clone(),
                description: row.description.clone(),
                weight_per_unit: row.weight_per_unit,
                weight_uom: row.weight_uom.clone(),
            };
            let created = self
                .host
                .create_variant(&template, &values, &overrides)
                .await?;

            tracing::info!(template = %template, item_code = %created.item_code, "created variant");
            report
                .log
                .push(format!("Row {}: created {}", row_no, created.item_code));
            report.created.push(created.item_code);
        }
        Ok(report)
    }

    /// Derive a row's weight per unit from its length value and the
    /// template's per-meter rate for the row's sticker option
    ///
    /// Clears the weight and its UOM when there is no usable length or rate.
    pub async fn calculate_row_weight(&mut self, index: usize) -> EngineResult<()> {
        let row = self
            .rows
            .get(index)
            .ok_or_else(|| AppError::new(ErrorCode::RowNotFound).with_detail("row", index as u64))?;
        let Some(template) = self.row_template(row) else {
            return Ok(());
        };
        let schema = self.template_context(&template).await?;

        let row = &self.rows[index];
        let length = FieldMatchPolicy::NameBased
            .assign(&schema.attributes)
            .iter()
            .position(|a| a.slot == Some(AttributeSlot::Length))
            .and_then(|position| row.value_at(position))
            .and_then(convert::extract_length);

        let has_sticker = row
            .sticker_option
            .as_deref()
            .is_some_and(convert::sticker_from_label);
        let rate = self
            .host
            .item(&template)
            .await?
            .and_then(|item| convert::per_meter_rate(&item, has_sticker));

        let weight = match (length, rate) {
            (Some(length), Some(rate)) => convert::weight_from_length(length, rate),
            _ => None,
        };

        let row = &mut self.rows[index];
        match weight {
            Some(weight) => {
                row.weight_per_unit = Some(weight);
                row.weight_uom = Some(WEIGHT_UOM.to_string());
            }
            None => {
                row.weight_per_unit = None;
                row.weight_uom = None;
            }
        }
        Ok(())
    }
}
