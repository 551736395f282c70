//! Attribute selection for configurable products.

use crate::catalog::Product;
use crate::ids::{AttributeId, AttributeValueId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A (possibly partial) mapping from attribute to chosen value.
///
/// The map is ordered so [`Selection::key`] is canonical: two selections
/// with the same choices always produce the same key, which is what the
/// variation resolver uses to deduplicate identical consecutive fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    choices: BTreeMap<AttributeId, AttributeValueId>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a value for an attribute, replacing any previous choice.
    ///
    /// Returns `true` if the selection actually changed.
    pub fn set(&mut self, attribute: AttributeId, value: AttributeValueId) -> bool {
        self.choices.insert(attribute, value) != Some(value)
    }

    /// Get the chosen value for an attribute.
    pub fn get(&self, attribute: AttributeId) -> Option<AttributeValueId> {
        self.choices.get(&attribute).copied()
    }

    /// Remove the choice for an attribute.
    pub fn clear(&mut self, attribute: AttributeId) -> bool {
        self.choices.remove(&attribute).is_some()
    }

    /// Number of attributes chosen so far.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Check whether nothing has been chosen yet.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Check whether every attribute of `product` has a chosen value.
    pub fn is_complete_for(&self, product: &Product) -> bool {
        product
            .variations
            .iter()
            .all(|a| self.choices.contains_key(&a.attribute_id))
    }

    /// Names of the attributes still missing a choice.
    pub fn missing_for<'p>(&self, product: &'p Product) -> Vec<&'p str> {
        product
            .variations
            .iter()
            .filter(|a| !self.choices.contains_key(&a.attribute_id))
            .map(|a| a.attribute_name.as_str())
            .collect()
    }

    /// Canonical key for this selection, stable across insertion order.
    pub fn key(&self) -> String {
        let mut key = String::new();
        for (attr, value) in &self.choices {
            if !key.is_empty() {
                key.push(',');
            }
            key.push_str(&format!("{}={}", attr, value));
        }
        key
    }

    /// Iterate over the chosen (attribute, value) pairs in attribute order.
    pub fn iter(&self) -> impl Iterator<Item = (AttributeId, AttributeValueId)> + '_ {
        self.choices.iter().map(|(a, v)| (*a, *v))
    }
}
