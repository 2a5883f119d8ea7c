use super::executor::{CatalogQuery, QueryError};
use super::parser::{parse_filter, parse_filters};
use crate::config::Config;
use crate::record::loader::load_catalog_from_files;
use crate::record::models::Catalog;
use std::collections::HashMap;

fn catalog() -> Catalog {
    let mut files = HashMap::new();
    files.insert(
        "8r-370.toml".to_string(),
        r#"
model = "8R 370"
company = "John Deere"

[specs]
rated_power_net = "370 HP"
shipping_weight = "15000 lbs"
height = "3.4 m"
height_rops = "3.6 m"
numero_de_cilindros = "6"

[attributes]
drive_type = "4WD"
differential_lock = true
"#
        .to_string(),
    );
    files.insert(
        "724-vario.toml".to_string(),
        r#"
model = "724 Vario"
company = "Fendt"

[specs]
rated_power_net = "174 kW"
height = "3,15 m"
numero_de_cilindros = "6"

[attributes]
drive_type = "4WD"
differential_lock = false
"#
        .to_string(),
    );
    files.insert(
        "5075e.toml".to_string(),
        r#"
model = "5075E"
company = "John Deere"

[specs]
rated_power_net = "75"
height = "98 in"
numero_de_cilindros = "3"

[attributes]
drive_type = "MFWD"
"#
        .to_string(),
    );

    let (catalog, validation) = load_catalog_from_files(files, &Config::empty());
    assert!(validation.is_valid(), "{}", validation);
    catalog
}

fn models(catalog: &Catalog, exprs: &[&str]) -> Vec<String> {
    let filters = parse_filters(exprs).unwrap();
    CatalogQuery::new(catalog)
        .filter(&filters)
        .unwrap()
        .into_iter()
        .map(|r| r.model.clone())
        .collect()
}

#[test]
fn test_no_filters_returns_everything_in_order() {
    let catalog = catalog();
    assert_eq!(models(&catalog, &[]), vec!["5075E", "724 Vario", "8R 370"]);
}

#[test]
fn test_numeric_range() {
    let catalog = catalog();
    assert_eq!(
        models(&catalog, &["rated_power_net_kw>=150", "rated_power_net_kw<=300"]),
        vec!["724 Vario", "8R 370"]
    );
    assert_eq!(models(&catalog, &["rated_power_net_kw>200"]), vec!["8R 370"]);
    assert_eq!(models(&catalog, &["numero_de_cilindros_num=3"]), vec!["5075E"]);
}

#[test]
fn test_missing_canonical_value_never_matches() {
    let catalog = catalog();
    // 5075E has only a raw "75" without unit
    assert_eq!(models(&catalog, &["rated_power_net_kw<100"]), Vec::<String>::new());
    assert_eq!(
        models(&catalog, &["rated_power_net_kw!=174"]),
        vec!["8R 370"]
    );
}

#[test]
fn test_zero_bound_is_applied() {
    let catalog = catalog();
    assert_eq!(models(&catalog, &["shipping_weight_kg>0"]), vec!["8R 370"]);
}

#[test]
fn test_height_prefers_rops_height() {
    let catalog = catalog();
    // 8R 370: height 3.4 m, ROPS height 3.6 m
    assert_eq!(models(&catalog, &["height_m>=3.5"]), vec!["8R 370"]);
    assert_eq!(models(&catalog, &["height_m<3.5"]), vec!["5075E", "724 Vario"]);
    // The ROPS column itself is not coalesced
    assert_eq!(models(&catalog, &["height_rops_m>0"]), vec!["8R 370"]);
}

#[test]
fn test_text_and_boolean_filters() {
    let catalog = catalog();
    assert_eq!(models(&catalog, &["company~deere"]), vec!["5075E", "8R 370"]);
    assert_eq!(models(&catalog, &["model~VARIO"]), vec!["724 Vario"]);
    assert_eq!(models(&catalog, &["drive_type=4WD"]), vec!["724 Vario", "8R 370"]);
    assert_eq!(models(&catalog, &["drive_type=4wd"]), Vec::<String>::new());
    assert_eq!(models(&catalog, &["differential_lock=true"]), vec!["8R 370"]);
    // 5075E has no differential_lock value
    assert_eq!(models(&catalog, &["differential_lock!=true"]), vec!["724 Vario"]);
    assert_eq!(
        models(&catalog, &["company~deere", "rated_power_net_kw>=100"]),
        vec!["8R 370"]
    );
}

#[test]
fn test_invalid_filters_are_rejected_before_running() {
    let catalog = catalog();
    let query = CatalogQuery::new(&catalog);

    let run = |expr: &str| query.filter(&[parse_filter(expr).unwrap()]);

    assert!(matches!(run("warp_factor>1"), Err(QueryError::UnknownField(_))));
    assert!(matches!(run("torque_nm>lots"), Err(QueryError::InvalidOperand { .. })));
    assert!(matches!(run("torque_nm~12"), Err(QueryError::UnsupportedOperator { .. })));
    assert!(matches!(run("company>=A"), Err(QueryError::UnsupportedOperator { .. })));
    assert!(matches!(run("differential_lock=maybe"), Err(QueryError::InvalidOperand { .. })));
    assert!(matches!(run("differential_lock>1"), Err(QueryError::UnsupportedOperator { .. })));
}

#[test]
fn test_error_messages() {
    let catalog = catalog();
    let err = CatalogQuery::new(&catalog)
        .filter(&[parse_filter("pressure_bar>=high").unwrap()])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid value 'high' for pressure_bar: expected float"
    );
}
