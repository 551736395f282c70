//! Catalog types: products, attributes, selections, variations.

mod product;
mod selection;
mod variation;

pub use product::{Attribute, AttributeType, AttributeValue, Product};
pub use selection::Selection;
pub use variation::Variation;
