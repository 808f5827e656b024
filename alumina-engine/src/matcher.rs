//! Attribute-to-field matcher
//!
//! Decides which line-item slot (powder code / sticker / length) each of a
//! template's attributes is entered into. Templates define at most three
//! attributes, in a significant order.

use shared::{AttributeDefinition, AttributeSlot};

/// How template attributes map onto the three line-item slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMatchPolicy {
    /// Attribute index 0/1/2 -> powder-code/sticker/length
    #[default]
    Positional,
    /// Case-insensitive substring match on the attribute name
    NameBased,
}

/// One attribute's slot assignment; `None` when no slot matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAssignment {
    pub attribute: String,
    pub slot: Option<AttributeSlot>,
}

impl FieldMatchPolicy {
    /// Assign each attribute, in definition order, to a slot
    ///
    /// Each slot is handed out at most once; under `NameBased` the first
    /// attribute matching a slot's token wins it.
    pub fn assign(&self, attributes: &[AttributeDefinition]) -> Vec<FieldAssignment> {
        let mut taken = [false; AttributeSlot::ALL.len()];
        attributes
            .iter()
            .enumerate()
            .map(|(index, definition)| {
                let slot = match self {
                    FieldMatchPolicy::Positional => AttributeSlot::ALL.get(index).copied(),
                    FieldMatchPolicy::NameBased => Self::slot_by_name(&definition.name),
                };
                let slot = slot.filter(|s| {
                    let i = AttributeSlot::ALL.iter().position(|x| x == s);
                    match i {
                        Some(i) if !taken[i] => {
                            taken[i] = true;
                            true
                        }
                        _ => false,
                    }
                });
                FieldAssignment {
                    attribute: definition.name.clone(),
                    slot,
                }
            })
            .collect()
    }

    fn slot_by_name(name: &str) -> Option<AttributeSlot> {
        let name = name.to_lowercase();
        if name.contains("powder") {
            Some(AttributeSlot::PowderCode)
        } else if name.contains("sticker") {
            Some(AttributeSlot::Sticker)
        } else if name.contains("length") {
            Some(AttributeSlot::Length)
        } else {
            None
        }
    }
}
