//! Žabac Food Outlet price lists.
//!
//! Žabac publishes one CSV per store on its price-list page. Files carry no
//! store metadata inside, so the identity comes from the filename.

mod filename;

use pricedb_core::{CanonicalField, ColumnSpec, FieldMap, Product, SourceConfig};

use crate::source::Source;

pub use filename::{match_filename, resolve_store_identity, FilenameFormat};

pub const CHAIN: &str = "zabac";
pub const INDEX_URL: &str = "https://zabacfoodoutlet.hr/cjenik/";

/// Built-in source definition, used when no sources file overrides it.
#[must_use]
pub fn source_config() -> SourceConfig {
    let mut fields = FieldMap::new();
    fields.insert(CanonicalField::ProductId, ColumnSpec::required("Artikl"));
    fields.insert(CanonicalField::Barcode, ColumnSpec::optional("Barcode"));
    fields.insert(
        CanonicalField::Product,
        ColumnSpec::required("Naziv artikla / usluge"),
    );
    fields.insert(CanonicalField::Brand, ColumnSpec::optional("Marka"));
    fields.insert(CanonicalField::Quantity, ColumnSpec::optional("Gramaža"));
    fields.insert(
        CanonicalField::Category,
        ColumnSpec::optional("Naziv grupe artikla"),
    );
    fields.insert(CanonicalField::Price, ColumnSpec::optional("Mpc"));
    fields.insert(CanonicalField::UnitPrice, ColumnSpec::optional("Mpc"));

    SourceConfig {
        chain: CHAIN.to_string(),
        label: "Žabac".to_string(),
        index_url: INDEX_URL.to_string(),
        encodings: vec!["utf-8".to_string(), "windows-1250".to_string()],
        delimiter: ',',
        file_extension: ".csv".to_string(),
        default_unit: "kom".to_string(),
        fields,
    }
}

/// Žabac files have no unit column; every line is sold per piece unless the
/// configured default says otherwise. Names are often space-padded.
pub fn fix_product(product: &mut Product, config: &SourceConfig) {
    let name = product.product.trim();
    if name.len() != product.product.len() {
        product.product = name.to_owned();
    }
    if product.unit.trim().is_empty() {
        product.unit.clone_from(&config.default_unit);
    }
}

/// The Žabac source with its built-in configuration.
#[must_use]
pub fn source() -> Source {
    with_config(source_config())
}

/// The Žabac source driven by an externally supplied configuration.
#[must_use]
pub fn with_config(config: SourceConfig) -> Source {
    Source {
        config,
        resolve_identity: resolve_store_identity,
        fixup: fix_product,
    }
}
