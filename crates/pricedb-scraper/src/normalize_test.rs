use pricedb_core::ColumnSpec;

use super::*;

fn no_fixup(_product: &mut Product, _config: &SourceConfig) {}

fn source() -> SourceConfig {
    let mut fields = FieldMap::new();
    fields.insert(CanonicalField::ProductId, ColumnSpec::required("Artikl"));
    fields.insert(
        CanonicalField::Product,
        ColumnSpec::required("Naziv artikla / usluge"),
    );
    fields.insert(CanonicalField::Brand, ColumnSpec::optional("Marka"));
    fields.insert(CanonicalField::Price, ColumnSpec::optional("Mpc"));
    fields.insert(CanonicalField::UnitPrice, ColumnSpec::optional("Mpc"));
    SourceConfig {
        chain: "zabac".to_string(),
        label: "Žabac".to_string(),
        index_url: "https://zabacfoodoutlet.hr/cjenik/".to_string(),
        encodings: vec!["utf-8".to_string()],
        delimiter: ',',
        file_extension: ".csv".to_string(),
        default_unit: "kom".to_string(),
        fields,
    }
}

fn row(pairs: &[(&str, &str)]) -> CatalogRow {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn maps_columns_onto_canonical_fields() {
    let raw = row(&[
        ("Artikl", "1001"),
        ("Naziv artikla / usluge", "Mlijeko 2.8%"),
        ("Marka", "Dukat"),
        ("Mpc", "1.29"),
    ]);
    let product = normalize_row(&raw, &source(), no_fixup).unwrap();
    assert_eq!(product.product_id, "1001");
    assert_eq!(product.product, "Mlijeko 2.8%");
    assert_eq!(product.brand, "Dukat");
    assert_eq!(product.price, "1.29");
    assert_eq!(product.unit_price, "1.29");
}

#[test]
fn missing_optional_columns_become_empty() {
    let raw = row(&[("Artikl", "1001"), ("Naziv artikla / usluge", "Kruh")]);
    let product = normalize_row(&raw, &source(), no_fixup).unwrap();
    assert_eq!(product.brand, "");
    assert_eq!(product.barcode, "");
    assert_eq!(product.price, "");
}

#[test]
fn missing_required_column_is_reported() {
    let raw = row(&[("Artikl", "1001"), ("Marka", "Dukat")]);
    let err = normalize_row(&raw, &source(), no_fixup).unwrap_err();
    assert!(
        matches!(
            err,
            ScraperError::MissingRequiredField { ref column, field: CanonicalField::Product }
                if column == "Naziv artikla / usluge"
        ),
        "unexpected error: {err:?}"
    );
}

#[test]
fn blank_required_value_counts_as_missing() {
    let raw = row(&[("Artikl", "   "), ("Naziv artikla / usluge", "Kruh")]);
    let err = normalize_row(&raw, &source(), no_fixup).unwrap_err();
    assert!(matches!(
        err,
        ScraperError::MissingRequiredField {
            field: CanonicalField::ProductId,
            ..
        }
    ));
}

#[test]
fn first_missing_field_follows_canonical_order() {
    let raw = row(&[("Marka", "Dukat")]);
    let err = normalize_row(&raw, &source(), no_fixup).unwrap_err();
    assert!(matches!(
        err,
        ScraperError::MissingRequiredField {
            field: CanonicalField::ProductId,
            ..
        }
    ));
}

#[test]
fn cleanup_trims_every_field() {
    let raw = row(&[
        ("Artikl", " 1001 "),
        ("Naziv artikla / usluge", "  Kruh bijeli\t"),
        ("Marka", " Klara "),
    ]);
    let product = normalize_row(&raw, &source(), no_fixup).unwrap();
    assert_eq!(product.product_id, "1001");
    assert_eq!(product.product, "Kruh bijeli");
    assert_eq!(product.brand, "Klara");
}

#[test]
fn fixup_runs_before_cleanup() {
    fn shout_brand(product: &mut Product, _: &SourceConfig) {
        product.brand = format!("  {}  ", product.brand.to_uppercase());
    }
    let raw = row(&[
        ("Artikl", "1001"),
        ("Naziv artikla / usluge", "Kruh"),
        ("Marka", "klara"),
    ]);
    let product = normalize_row(&raw, &source(), shout_brand).unwrap();
    assert_eq!(product.brand, "KLARA");
}

#[test]
fn fixup_cannot_blank_the_product_name() {
    fn blank_name(product: &mut Product, _: &SourceConfig) {
        product.product = "   ".to_string();
    }
    let raw = row(&[("Artikl", "1001"), ("Naziv artikla / usluge", "Kruh")]);
    let err = normalize_row(&raw, &source(), blank_name).unwrap_err();
    assert!(matches!(
        err,
        ScraperError::MissingRequiredField {
            field: CanonicalField::Product,
            ..
        }
    ));
}

#[test]
fn cleanup_enforces_identity_fields_even_when_unmapped() {
    let err = base_cleanup(Product::default(), &FieldMap::new()).unwrap_err();
    assert!(
        matches!(
            err,
            ScraperError::MissingRequiredField { ref column, field: CanonicalField::ProductId }
                if column == "product_id"
        ),
        "unexpected error: {err:?}"
    );
}

#[test]
fn same_column_can_feed_two_fields() {
    let raw = row(&[
        ("Artikl", "1001"),
        ("Naziv artikla / usluge", "Kruh"),
        ("Mpc", "0.99"),
    ]);
    let product = map_fields(&raw, &source().fields).unwrap();
    assert_eq!(product.price, product.unit_price);
}
