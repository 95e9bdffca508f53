use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::domain::product::Product;
use crate::errors::{ApplicationError, DomainError};

/// Demo catalog used when no fixture file is configured: (id, name, category, price in cents).
const DEMO_PRODUCTS: &[(u32, &str, &str, i64)] = &[
    (1, "Wireless Headphones", "Electronics", 12_999),
    (2, "Cotton T-Shirt", "Clothing", 1_999),
    (3, "Smart Watch", "Electronics", 19_950),
    (4, "Mystery Novel", "Books", 1_450),
    (5, "Denim Jacket", "Clothing", 7_900),
    (6, "Coffee Grinder", "Home", 4_525),
    (7, "Cookbook", "Books", 2_800),
    (8, "Desk Lamp", "Home", 3_400),
];

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("could not read fixture file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse fixture file `{path}`: {source}")]
    ParseToml { path: PathBuf, source: toml::de::Error },
    #[error("could not parse fixture file `{path}`: {source}")]
    ParseJson { path: PathBuf, source: serde_json::Error },
    #[error("unsupported fixture format for `{0}` (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("fixture `{path}` is invalid: {source}")]
    Invalid { path: PathBuf, source: DomainError },
    #[error("builtin demo catalog is invalid: {0}")]
    InvalidBuiltin(DomainError),
}

impl From<FixtureError> for ApplicationError {
    fn from(value: FixtureError) -> Self {
        Self::Fixture(value.to_string())
    }
}

pub fn demo_products() -> Vec<Product> {
    DEMO_PRODUCTS
        .iter()
        .map(|(id, name, category, cents)| Product::new(*id, *name, *category, Decimal::new(*cents, 2)))
        .collect()
}

pub fn demo_catalog() -> Result<Catalog, FixtureError> {
    Catalog::new(demo_products()).map_err(FixtureError::InvalidBuiltin)
}

/// Loads the configured fixture, or the demo catalog when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, FixtureError> {
    match path {
        Some(path) => load_catalog_file(path),
        None => demo_catalog(),
    }
}

pub fn load_catalog_file(path: &Path) -> Result<Catalog, FixtureError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    let format = match extension.as_deref() {
        Some("toml") => FixtureFormat::Toml,
        Some("json") => FixtureFormat::Json,
        _ => return Err(FixtureError::UnsupportedFormat(path.to_path_buf())),
    };

    let raw = fs::read_to_string(path)
        .map_err(|source| FixtureError::Read { path: path.to_path_buf(), source })?;
    let products = parse_products(&raw, format, path)?;

    Catalog::new(products)
        .map_err(|source| FixtureError::Invalid { path: path.to_path_buf(), source })
}

#[derive(Clone, Copy, Debug)]
enum FixtureFormat {
    Toml,
    Json,
}

#[derive(Debug, Deserialize)]
struct FixtureDocument {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonFixture {
    Bare(Vec<Product>),
    Document(FixtureDocument),
}

fn parse_products(raw: &str, format: FixtureFormat, path: &Path) -> Result<Vec<Product>, FixtureError> {
    match format {
        FixtureFormat::Toml => toml::from_str::<FixtureDocument>(raw)
            .map(|document| document.products)
            .map_err(|source| FixtureError::ParseToml { path: path.to_path_buf(), source }),
        FixtureFormat::Json => serde_json::from_str::<JsonFixture>(raw)
            .map(|fixture| match fixture {
                JsonFixture::Bare(products) => products,
                JsonFixture::Document(document) => document.products,
            })
            .map_err(|source| FixtureError::ParseJson { path: path.to_path_buf(), source }),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io;

    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use crate::domain::product::ProductId;
    use crate::errors::DomainError;

    use super::{demo_catalog, demo_products, load_catalog, load_catalog_file, FixtureError};

    #[test]
    fn demo_catalog_is_valid_and_has_repeated_categories() {
        let catalog = demo_catalog().expect("builtin products pass catalog validation");
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.categories(), vec!["Electronics", "Clothing", "Books", "Home"]);
        assert_eq!(load_catalog(None).expect("demo catalog"), catalog);
    }

    #[test]
    fn demo_products_have_unique_ids_and_valid_prices() {
        let products = demo_products();
        let mut ids: Vec<u32> = products.iter().map(|product| product.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
        assert!(products.iter().all(|product| product.price > Decimal::ZERO));
    }

    #[test]
    fn loads_toml_fixture() -> Result<(), io::Error> {
        let dir = TempDir::new()?;
        let path = dir.path().join("products.toml");
        fs::write(
            &path,
            r#"
[[products]]
id = 10
name = "Kettle"
category = "Kitchen"
price = "39.90"

[[products]]
id = 11
name = "Teapot"
category = "Kitchen"
price = "24.00"
"#,
        )?;

        let catalog = load_catalog_file(&path).expect("toml fixture loads");
        assert_eq!(catalog.len(), 2);
        let kettle = catalog.find(ProductId(10)).expect("kettle present");
        assert_eq!(kettle.price, Decimal::new(3990, 2));
        Ok(())
    }

    #[test]
    fn loads_bare_and_wrapped_json_fixtures() -> Result<(), io::Error> {
        let dir = TempDir::new()?;
        let bare = dir.path().join("bare.json");
        fs::write(&bare, r#"[{"id":1,"name":"A","category":"X","price":10.0}]"#)?;
        let wrapped = dir.path().join("wrapped.json");
        fs::write(&wrapped, r#"{"products":[{"id":2,"name":"B","category":"Y","price":"2.50"}]}"#)?;

        assert_eq!(load_catalog_file(&bare).expect("bare json").len(), 1);
        let catalog = load_catalog_file(&wrapped).expect("wrapped json");
        assert_eq!(catalog.products()[0].price, Decimal::new(250, 2));
        Ok(())
    }

    #[test]
    fn duplicate_ids_make_fixture_invalid() -> Result<(), io::Error> {
        let dir = TempDir::new()?;
        let path = dir.path().join("dupes.json");
        fs::write(
            &path,
            r#"[{"id":1,"name":"A","category":"X","price":1},{"id":1,"name":"B","category":"X","price":2}]"#,
        )?;

        let error = load_catalog_file(&path).expect_err("duplicate ids rejected");
        assert!(matches!(
            error,
            FixtureError::Invalid { source: DomainError::InvalidCatalog(_), .. }
        ));
        Ok(())
    }

    #[test]
    fn unknown_extension_and_missing_file_are_reported() -> Result<(), io::Error> {
        let dir = TempDir::new()?;
        let yaml = dir.path().join("products.yaml");
        fs::write(&yaml, "products: []")?;

        assert!(matches!(load_catalog_file(&yaml), Err(FixtureError::UnsupportedFormat(_))));
        assert!(matches!(
            load_catalog_file(&dir.path().join("missing.toml")),
            Err(FixtureError::Read { .. })
        ));
        Ok(())
    }
}
