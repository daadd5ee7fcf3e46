//! Product catalog.
//!
//! DESIGN
//! ======
//! The catalog is fixed at startup and never mutated, so it is shared as a
//! plain `Arc<ProductCatalog>` with no lock. NFC tags encode a product ID
//! (`?productId=P001`); everything else about a product is looked up here.

use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use serde::Serialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product not found: {0}")]
    NotFound(String),
}

/// Immutable product record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub image_url: String,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

impl Product {
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}

fn product(id: &str, name: &str, description: &str, image_url: &str, sizes: &[&str], colors: &[&str]) -> Product {
    Product {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        image_url: image_url.to_owned(),
        sizes: sizes.iter().map(|s| (*s).to_owned()).collect(),
        colors: colors.iter().map(|c| (*c).to_owned()).collect(),
    }
}

/// Read-only product lookup keyed by product ID.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: BTreeMap<String, Product>,
}

impl ProductCatalog {
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self { products: products.into_iter().map(|p| (p.id.clone(), p)).collect() }
    }

    /// The store's demo catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new([
            product(
                "P001",
                "블랙 자켓",
                "미니멀 블랙 테일러드 자켓",
                "/img/placeholder-jacket.jpg",
                &["S", "M", "L"],
                &["black", "white"],
            ),
            product(
                "P002",
                "데님 팬츠",
                "스트레이트 중청 데님 팬츠",
                "/img/placeholder-denim.jpg",
                &["M", "L", "XL"],
                &["blue", "navy"],
            ),
            product(
                "P003",
                "코튼 셔츠",
                "화이트 옥스포드 셔츠",
                "/img/placeholder-shirt.jpg",
                &["S", "M", "L", "XL"],
                &["white", "beige"],
            ),
        ])
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when `id` is not in the catalog.
    pub fn get(&self, id: &str) -> Result<&Product, CatalogError> {
        self.products.get(id).ok_or_else(|| CatalogError::NotFound(id.to_owned()))
    }

    #[cfg(test)]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.products.contains_key(id)
    }

    /// Product IDs in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// A uniformly random product ID, for exercising the NFC flow without a tag.
    #[must_use]
    pub fn random_id(&self) -> Option<&str> {
        let ids: Vec<&str> = self.ids().collect();
        ids.choose(&mut rand::rng()).copied()
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
