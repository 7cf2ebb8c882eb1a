//! Mapping raw catalog rows onto canonical [`Product`] records.
//!
//! Normalization runs in two stages: the source's own fixup first, then the
//! shared cleanup. The shared stage always runs last so that no fixup can
//! produce a product with an empty id or name.

use pricedb_core::{CanonicalField, FieldMap, Product, SourceConfig};

use crate::error::ScraperError;
use crate::rows::CatalogRow;
use crate::source::RowFixup;

/// Normalizes one raw row with `source`'s field map and fixup.
///
/// # Errors
///
/// Returns [`ScraperError::MissingRequiredField`] when a required column is
/// absent or blank, checked in canonical field order.
pub fn normalize_row(
    row: &CatalogRow,
    source: &SourceConfig,
    fixup: RowFixup,
) -> Result<Product, ScraperError> {
    let mut product = map_fields(row, &source.fields)?;
    fixup(&mut product, source);
    base_cleanup(product, &source.fields)
}

/// Copies mapped columns into a fresh product.
///
/// Optional fields the row lacks stay empty.
///
/// # Errors
///
/// Returns [`ScraperError::MissingRequiredField`] for the first required
/// column that is missing or blank.
pub fn map_fields(row: &CatalogRow, fields: &FieldMap) -> Result<Product, ScraperError> {
    let mut product = Product::default();

    for (&field, spec) in fields {
        match row.get(&spec.column) {
            Some(value) if !value.trim().is_empty() => {
                value.clone_into(product.field_mut(field));
            }
            _ if spec.required => {
                return Err(ScraperError::MissingRequiredField {
                    column: spec.column.clone(),
                    field,
                });
            }
            _ => {}
        }
    }

    Ok(product)
}

/// Shared cleanup applied after every source fixup.
///
/// Trims every field and re-checks that required fields, plus the product id
/// and name, are still non-empty.
///
/// # Errors
///
/// Returns [`ScraperError::MissingRequiredField`] if a fixup blanked a
/// required field.
pub fn base_cleanup(mut product: Product, fields: &FieldMap) -> Result<Product, ScraperError> {
    for field in CanonicalField::ALL {
        let value = product.field_mut(field);
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_owned();
        }
    }

    for field in CanonicalField::ALL {
        let spec = fields.get(&field);
        let required = spec.is_some_and(|s| s.required)
            || matches!(field, CanonicalField::ProductId | CanonicalField::Product);
        if required && product.field(field).is_empty() {
            return Err(ScraperError::MissingRequiredField {
                column: spec.map_or_else(|| field.as_str().to_owned(), |s| s.column.clone()),
                field,
            });
        }
    }

    Ok(product)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
