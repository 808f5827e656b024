//! Attribute Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One permitted value of a variant-defining attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub value: String,
    /// Abbreviation used in generated variant codes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbr: Option<String>,
}

impl AttributeValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            abbr: None,
        }
    }
}

/// A variant-defining attribute with its permitted values
///
/// Order of definitions on a template is significant: the positional
/// field-match policy maps the first attribute to the first line-item slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub name: String,
    /// Permitted values, in display order
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

impl AttributeDefinition {
    /// Check whether `value` is within the permitted set
    pub fn allows(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.value == value)
    }
}

/// The fetched variant schema for one template item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateAttributes {
    pub template: String,
    /// Display name of the template item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    /// Ordered attribute definitions
    pub attributes: Vec<AttributeDefinition>,
}

impl TemplateAttributes {
    /// Comma-joined attribute names, used as form helper text
    pub fn attribute_names(&self) -> String {
        self.attributes
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Attribute name -> comma-joined permitted values, for pick-list hints
    pub fn value_labels(&self) -> HashMap<String, String> {
        self.attributes
            .iter()
            .map(|a| {
                let joined = a
                    .values
                    .iter()
                    .map(|v| v.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                (a.name.clone(), joined)
            })
            .collect()
    }

    /// Find an attribute definition by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// The line-item slot an attribute value is entered into
///
/// Every variant-bearing document row carries exactly these three fields;
/// the field-match policy decides which attribute feeds which slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeSlot {
    PowderCode,
    Sticker,
    Length,
}

impl AttributeSlot {
    /// All slots in positional order
    pub const ALL: [AttributeSlot; 3] = [
        AttributeSlot::PowderCode,
        AttributeSlot::Sticker,
        AttributeSlot::Length,
    ];

    /// The row field name backing this slot
    pub fn field_name(&self) -> &'static str {
        match self {
            AttributeSlot::PowderCode => "powder_code",
            AttributeSlot::Sticker => "sticker",
            AttributeSlot::Length => "length",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TemplateAttributes {
        TemplateAttributes {
            template: "AL-PROFILE".to_string(),
            template_name: Some("Aluminium Profile".to_string()),
            attributes: vec![
                AttributeDefinition {
                    name: "Powder Code".to_string(),
                    values: vec![AttributeValue::new("Red"), AttributeValue::new("Black")],
                },
                AttributeDefinition {
                    name: "Sticker".to_string(),
                    values: vec![
                        AttributeValue::new("With Sticker"),
                        AttributeValue::new("No Sticker"),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_allows() {
        let schema = schema();
        let powder = schema.attribute("Powder Code").unwrap();
        assert!(powder.allows("Red"));
        assert!(!powder.allows("Neon Green"));
    }

    #[test]
    fn test_attribute_names() {
        assert_eq!(schema().attribute_names(), "Powder Code, Sticker");
    }

    #[test]
    fn test_value_labels() {
        let labels = schema().value_labels();
        assert_eq!(labels.get("Powder Code").unwrap(), "Red, Black");
        assert_eq!(labels.get("Sticker").unwrap(), "With Sticker, No Sticker");
    }

    #[test]
    fn test_attribute_lookup_missing() {
        assert!(schema().attribute("Length").is_none());
    }

    #[test]
    fn test_slot_field_names() {
        assert_eq!(AttributeSlot::PowderCode.field_name(), "powder_code");
        assert_eq!(AttributeSlot::Sticker.field_name(), "sticker");
        assert_eq!(AttributeSlot::Length.field_name(), "length");
    }
}
