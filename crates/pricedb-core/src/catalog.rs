//! Canonical catalog schema shared by every price-list source.
//!
//! Every source normalizes into the same [`Store`] / [`Product`] shape so
//! downstream consumers never branch on the chain. Optional fields are empty
//! strings rather than `Option`s: consumers rely on field presence.

use serde::{Deserialize, Serialize};

/// Target fields of the canonical product schema.
///
/// Declaration order is significant: normalization checks required columns
/// in this order, so the first missing required field reported is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    ProductId,
    Barcode,
    Product,
    Brand,
    Quantity,
    Category,
    Unit,
    Price,
    UnitPrice,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 9] = [
        CanonicalField::ProductId,
        CanonicalField::Barcode,
        CanonicalField::Product,
        CanonicalField::Brand,
        CanonicalField::Quantity,
        CanonicalField::Category,
        CanonicalField::Unit,
        CanonicalField::Price,
        CanonicalField::UnitPrice,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalField::ProductId => "product_id",
            CanonicalField::Barcode => "barcode",
            CanonicalField::Product => "product",
            CanonicalField::Brand => "brand",
            CanonicalField::Quantity => "quantity",
            CanonicalField::Category => "category",
            CanonicalField::Unit => "unit",
            CanonicalField::Price => "price",
            CanonicalField::UnitPrice => "unit_price",
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One priced product line from a store's catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Chain-internal article code. Always non-empty.
    pub product_id: String,
    pub barcode: String,
    /// Product display name. Always non-empty.
    pub product: String,
    pub brand: String,
    /// Pack size as published, e.g. `"500 g"`.
    pub quantity: String,
    pub category: String,
    /// Unit of sale; sources fill a default label when the file has none.
    pub unit: String,
    /// Retail price exactly as published (decimal separator untouched).
    pub price: String,
    pub unit_price: String,
}

impl Product {
    #[must_use]
    pub fn field(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::ProductId => &self.product_id,
            CanonicalField::Barcode => &self.barcode,
            CanonicalField::Product => &self.product,
            CanonicalField::Brand => &self.brand,
            CanonicalField::Quantity => &self.quantity,
            CanonicalField::Category => &self.category,
            CanonicalField::Unit => &self.unit,
            CanonicalField::Price => &self.price,
            CanonicalField::UnitPrice => &self.unit_price,
        }
    }

    pub fn field_mut(&mut self, field: CanonicalField) -> &mut String {
        match field {
            CanonicalField::ProductId => &mut self.product_id,
            CanonicalField::Barcode => &mut self.barcode,
            CanonicalField::Product => &mut self.product,
            CanonicalField::Brand => &mut self.brand,
            CanonicalField::Quantity => &mut self.quantity,
            CanonicalField::Category => &mut self.category,
            CanonicalField::Unit => &mut self.unit,
            CanonicalField::Price => &mut self.price,
            CanonicalField::UnitPrice => &mut self.unit_price,
        }
    }
}

/// Store location metadata recovered from a catalog file name.
///
/// `store_id` and `display_name` are always non-empty; the location fields
/// are empty when the file naming convention does not carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreIdentity {
    pub chain: String,
    pub store_type: String,
    pub store_id: String,
    pub display_name: String,
    pub street_address: String,
    pub zipcode: String,
    pub city: String,
}

/// A store together with every product normalized from its catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    #[serde(flatten)]
    pub identity: StoreIdentity,
    pub items: Vec<Product>,
}

impl Store {
    /// Assembles a store from its identity and normalized rows.
    ///
    /// Returns `None` when `items` is empty: a store without products carries
    /// no price information and is never handed to consumers.
    #[must_use]
    pub fn assemble(identity: StoreIdentity, items: Vec<Product>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self { identity, items })
    }
}
