//! # Product Catalog
//!
//! The menu. Products are never hard-deleted: taking one off the menu flips
//! `is_active`, which keeps old tickets pointing at something real.

use mesa_core::{CoreError, CoreResult, NewProduct, Product, Severity};
use tracing::info;

use super::PosState;
use crate::new_id;

#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        ProductCatalog { products }
    }

    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// What the POS screen offers.
    pub fn active_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.is_active)
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Category labels in menu order, without repeats.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Case-insensitive match on name or description (header search box).
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub(crate) fn require(&self, id: &str) -> CoreResult<&Product> {
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    fn require_mut(&mut self, id: &str) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }
}

impl PosState {
    pub fn add_product(&mut self, form: NewProduct) -> CoreResult<Product> {
        let product = form.into_product(new_id());
        product.validate()?;

        info!(product_id = %product.id, name = %product.name, price = %product.price(), "Product added");
        self.catalog.products.push(product.clone());
        self.add_notification(
            format!("Producto \"{}\" agregado exitosamente", product.name),
            Severity::Success,
        );
        Ok(product)
    }

    /// Replaces the product with the same id.
    ///
    /// Lines already on orders keep the snapshot they were rung up with.
    pub fn update_product(&mut self, product: Product) -> CoreResult<()> {
        product.validate()?;
        let slot = self.catalog.require_mut(&product.id)?;
        let name = product.name.clone();
        *slot = product;

        info!(name = %name, "Product updated");
        self.add_notification(format!("Producto \"{}\" actualizado", name), Severity::Info);
        Ok(())
    }

    pub fn set_product_active(&mut self, id: &str, active: bool) -> CoreResult<()> {
        let product = self.catalog.require_mut(id)?;
        product.is_active = active;
        info!(product_id = %id, active, "Product availability changed");
        Ok(())
    }
}
