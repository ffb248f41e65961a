//! # Product Repository
//!
//! Read-only access to the product catalog.
//!
//! ## Key Operations
//! - Lookup by id
//! - Shop grid search with [`CatalogQuery`]
//! - Distinct categories and vibes for the filter bar
//!
//! Products never change after load, so the list is shared behind an `Arc`
//! and every method is synchronous.

use std::collections::HashSet;
use std::sync::Arc;

use flickd_core::{CatalogQuery, Product, ProductId};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// Repository for catalog products.
///
/// ## Usage
/// ```rust,ignore
/// let repo = catalog.products();
///
/// let hits = repo.search(&CatalogQuery::all().with_vibe("coquette"));
/// let dress = repo.require(1)?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    products: Arc<Vec<Product>>,
}

impl ProductRepository {
    /// Wraps a product list.
    ///
    /// ## Errors
    /// [`CatalogError::Seed`] if two products share an id.
    pub fn new(products: Vec<Product>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::Seed(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }

        Ok(ProductRepository {
            products: Arc::new(products),
        })
    }

    /// Every product in catalog order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Gets a product by its id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Gets a product by its id, failing with NotFound.
    pub fn require(&self, id: ProductId) -> CatalogResult<&Product> {
        self.get(id)
            .ok_or_else(|| CatalogError::not_found("Product", id))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Filters and sorts the catalog.
    pub fn search(&self, query: &CatalogQuery) -> Vec<&Product> {
        let hits = query.apply(&self.products);
        debug!(
            vibe = ?query.vibe,
            category = ?query.category,
            search = ?query.search,
            band = %query.price_band,
            sort = %query.sort,
            count = hits.len(),
            "Catalog search"
        );
        hits
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Distinct vibes in first-seen order.
    pub fn vibes(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.vibe.as_str()))
    }

    pub fn count(&self) -> usize {
        self.products.len()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;
    use flickd_core::{PriceBand, SortOrder};

    fn repo() -> ProductRepository {
        Catalog::embedded().unwrap().products().clone()
    }

    #[test]
    fn test_get_and_require() {
        let repo = repo();
        assert_eq!(repo.get(2).map(|p| p.name.as_str()), Some("Essential Cotton Tee"));
        assert!(repo.get(999).is_none());
        assert!(matches!(
            repo.require(999),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let product = repo().all()[0].clone();
        let result = ProductRepository::new(vec![product.clone(), product]);
        assert!(matches!(result, Err(CatalogError::Seed(_))));
    }

    #[test]
    fn test_search_under_50_by_price() {
        let repo = repo();
        let query = CatalogQuery::all()
            .with_price_band(PriceBand::Under50)
            .sorted_by(SortOrder::PriceLow);
        let hits = repo.search(&query);

        assert!(!hits.is_empty());
        assert!(hits.iter().all(|p| p.price.cents() < 5_000));
        assert!(hits.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn test_categories_and_vibes_are_distinct() {
        let repo = repo();
        let categories = repo.categories();
        assert_eq!(categories[0], "dresses");
        assert_eq!(
            categories.len(),
            categories.iter().collect::<HashSet<_>>().len()
        );
        assert!(repo.vibes().contains(&"coquette"));
    }
}
