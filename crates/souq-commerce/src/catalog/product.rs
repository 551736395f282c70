//! Product and attribute types.

use crate::ids::{AttributeId, AttributeValueId, ProductId, VariationId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an attribute is presented for selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// Color swatch picker.
    Color,
    /// Multi-value picker (sizes, materials, ...).
    #[default]
    Multi,
    /// Anything else the backend may add.
    #[serde(untagged)]
    Other(String),
}

impl AttributeType {
    pub fn as_str(&self) -> &str {
        match self {
            AttributeType::Color => "color",
            AttributeType::Multi => "multi",
            AttributeType::Other(s) => s.as_str(),
        }
    }
}

/// A selectable value of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// Unique value identifier.
    pub id: AttributeValueId,
    /// Display value (e.g. "XL").
    #[serde(default)]
    pub value: String,
    /// Optional color swatch (e.g. "#ff0000") for color attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A configurable dimension of a product (e.g. "Color").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute identifier, unique within a product.
    pub attribute_id: AttributeId,
    /// Display name.
    pub attribute_name: String,
    /// Presentation type.
    #[serde(default)]
    pub attribute_type: AttributeType,
    /// Ordered list of selectable values.
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// URL-friendly slug.
    #[serde(default)]
    pub slug: String,
    /// Category name.
    #[serde(default)]
    pub category: String,
    /// Base price.
    pub price: Decimal,
    /// Pre-discount price, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Decimal>,
    /// Price after discount, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_after_discount: Option<Decimal>,
    /// When set, the product is non-configurable and always resolves to
    /// this purchasable unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_variation_id: Option<VariationId>,
    /// Ordered list of configurable attributes.
    #[serde(default)]
    pub variations: Vec<Attribute>,
}

impl Product {
    /// Check whether purchasing requires resolving a variation first.
    ///
    /// A product with `default_variation_id` never requires a selection,
    /// regardless of what `variations` contains. A product with no
    /// attributes at all is purchasable by its own id.
    pub fn requires_selection(&self) -> bool {
        self.default_variation_id.is_none() && !self.variations.is_empty()
    }

    /// Check whether the product has any configurable attributes.
    pub fn is_configurable(&self) -> bool {
        !self.variations.is_empty()
    }

    /// Find an attribute by id.
    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.variations.iter().find(|a| a.attribute_id == id)
    }

    /// Effective unit price shown to the customer.
    pub fn display_price(&self) -> Decimal {
        self.price_after_discount.unwrap_or(self.price)
    }
}
