use super::*;
use crate::zabac::source_config;

fn resolve(url: &str) -> Result<StoreIdentity, ScraperError> {
    resolve_store_identity(url, &source_config())
}

#[test]
fn outlet_unit_filename() {
    let id = resolve(
        "https://zabacfoodoutlet.hr/wp-content/uploads/2025/05/Cjenik-Zabac-Food-Outlet-PJ-11-Savska-Cesta-206.csv",
    )
    .unwrap();
    assert_eq!(id.chain, "zabac");
    assert_eq!(id.store_id, "PJ-11");
    assert_eq!(id.display_name, "Žabac PJ-11");
    assert_eq!(id.street_address, "Savska Cesta 206");
    assert_eq!(id.store_type, "");
    assert_eq!(id.zipcode, "");
    assert_eq!(id.city, "");
}

#[test]
fn outlet_unit_strips_upload_duplicate_suffixes() {
    let id = resolve("https://example.com/Cjenik-PJ-4-Ilica-12_1_2.csv").unwrap();
    assert_eq!(id.store_id, "PJ-4");
    assert_eq!(id.street_address, "Ilica 12");
}

#[test]
fn supermarket_filename() {
    let id = resolve(
        "https://zabacfoodoutlet.hr/wp-content/uploads/2026/01/SupermarketDubrava-256L-Zagreb-10000-16.1.2026-7.00h-C164.csv",
    )
    .unwrap();
    assert_eq!(id.store_id, "SM-C164");
    assert_eq!(id.store_type, "supermarket");
    assert_eq!(id.display_name, "Žabac Zagreb Dubrava");
    assert_eq!(id.street_address, "Dubrava 256L");
    assert_eq!(id.zipcode, "10000");
    assert_eq!(id.city, "Zagreb");
}

#[test]
fn supermarket_multi_word_street() {
    let (format, id) = match_filename(
        "SupermarketAvenija-Dubrava-256L-Zagreb-10000-16.1.2026-7.00h-C164.csv",
        &source_config(),
    )
    .unwrap();
    assert_eq!(format, FilenameFormat::Supermarket);
    assert_eq!(id.street_address, "Avenija Dubrava 256L");
    assert_eq!(id.display_name, "Žabac Zagreb Avenija Dubrava");
}

#[test]
fn percent_encoded_filename_is_decoded() {
    let id = resolve("https://example.com/Cjenik-PJ-7-Trg%20Bana-Jela%C4%8Di%C4%87a.csv").unwrap();
    assert_eq!(id.street_address, "Trg Bana Jelačića");
}

#[test]
fn query_string_is_not_part_of_filename() {
    let id = resolve("https://example.com/Cjenik-PJ-3-Vukovarska-1.csv?ver=2").unwrap();
    assert_eq!(id.store_id, "PJ-3");
    assert_eq!(id.street_address, "Vukovarska 1");
}

#[test]
fn unrecognized_filename_is_an_error() {
    let err = resolve("https://example.com/uploads/cjenik-2025.csv").unwrap_err();
    assert!(
        matches!(err, ScraperError::UnrecognizedFormat { ref filename } if filename == "cjenik-2025.csv"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn wrong_extension_does_not_match() {
    assert!(resolve("https://example.com/Cjenik-PJ-11-Savska.xlsx").is_err());
}

#[test]
fn outlet_unit_requires_an_address() {
    assert!(match_filename("Cjenik-PJ-11-.csv", &source_config()).is_none());
}

#[test]
fn ambiguous_name_resolves_as_outlet_unit() {
    let (format, id) = match_filename(
        "SupermarketPJ-12-Ilica-10000-16.1.2026-7.00h-C9.csv",
        &source_config(),
    )
    .unwrap();
    assert!(
        FilenameFormat::Supermarket
            .extract("SupermarketPJ-12-Ilica-10000-16.1.2026-7.00h-C9.csv", &source_config())
            .is_some(),
        "fixture must match both formats"
    );
    assert_eq!(format, FilenameFormat::OutletUnit);
    assert_eq!(id.store_id, "PJ-12");
}

#[test]
fn formats_yield_distinct_store_ids() {
    let outlet = resolve("https://example.com/Cjenik-PJ-11-Savska-206.csv").unwrap();
    let market =
        resolve("https://example.com/SupermarketDubrava-256L-Zagreb-10000-16.1.2026-7.00h-C164.csv")
            .unwrap();
    assert_ne!(outlet.store_id, market.store_id);
    assert_ne!(outlet.display_name, market.display_name);
}

#[test]
fn label_comes_from_source_config() {
    let mut config = source_config();
    config.label = "Zabac Outlet".to_string();
    let id = resolve_store_identity("https://example.com/Cjenik-PJ-2-Ilica.csv", &config).unwrap();
    assert_eq!(id.display_name, "Zabac Outlet PJ-2");
}
