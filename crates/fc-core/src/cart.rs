//! Storefront cart and browsing state

use crate::catalog::store::{find_product, products_in};
use crate::catalog::{Category, Product};
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Always at least 1
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> u64 {
        u64::from(self.product.price) * u64::from(self.quantity)
    }
}

/// Cart lines in insertion order. Totals are computed from the lines on
/// every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, id: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product.id == id)
            .map(|item| item.quantity)
    }

    /// One more of `product`, inserting a new line if needed
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(item) => item.quantity += 1,
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Drop the line for `id` whatever its quantity
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product.id != id);
        self.items.len() != before
    }

    /// Adjust a line by `delta`. A result below 1 leaves the line as it
    /// was; only [`Cart::remove`] deletes lines.
    pub fn change_quantity(&mut self, id: &str, delta: i64) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.product.id == id) else {
            return false;
        };
        let updated = i64::from(item.quantity) + delta;
        if updated <= 0 {
            debug!("Ignoring quantity change for {} to {}", id, updated);
            return false;
        }
        match u32::try_from(updated) {
            Ok(quantity) => {
                item.quantity = quantity;
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn subtotal(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Storefront section: category filter, product detail view, cart panel
#[derive(Debug, Clone)]
pub struct Storefront {
    category: Category,
    detail: Option<Product>,
    cart_open: bool,
    cart: Cart,
}

impl Storefront {
    pub fn new() -> Self {
        Self {
            category: Category::All,
            detail: None,
            cart_open: false,
            cart: Cart::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn visible_products(&self) -> Vec<Product> {
        products_in(self.category)
    }

    pub fn detail(&self) -> Option<&Product> {
        self.detail.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn open_detail(&mut self, id: &str) -> CoreResult<()> {
        let product = find_product(id)
            .ok_or_else(|| CoreError::Catalog(format!("unknown product '{}'", id)))?;
        self.detail = Some(product);
        Ok(())
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Add one of `id` to the cart, open the cart panel and close the
    /// detail view.
    pub fn add_to_cart(&mut self, id: &str) -> CoreResult<()> {
        let product = find_product(id)
            .ok_or_else(|| CoreError::Catalog(format!("unknown product '{}'", id)))?;
        self.cart.add(&product);
        self.cart_open = true;
        self.detail = None;
        Ok(())
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    /// Clicking the backdrop closes both the cart and the detail view.
    pub fn close_overlay(&mut self) {
        self.cart_open = false;
        self.detail = None;
    }
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new()
    }
}
