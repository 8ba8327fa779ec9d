/// Local cart mutations
///
/// Every mutation works on a copy of the cart. The caller pushes the
/// result to the server with `PUT /cart` and only adopts it once the
/// server accepted it.
use super::data::{Cart, CartLineItem, ProductId};

impl Cart {
    /// Quantity of a product currently in the cart (0 if absent)
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.products
            .iter()
            .find(|item| &item.id == product_id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }

    /// Total number of units across all line items (saturates at u32::MAX)
    pub fn item_count(&self) -> u32 {
        self.products
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Line items with a non-zero quantity
    pub fn visible_items(&self) -> impl Iterator<Item = &CartLineItem> {
        self.products.iter().filter(|item| item.quantity > 0)
    }

    /// True when nothing in the cart would be rendered
    pub fn is_empty(&self) -> bool {
        self.visible_items().next().is_none()
    }

    /// Add one unit of a product, creating its line item if needed
    pub fn with_added(&self, product_id: &ProductId) -> Cart {
        let mut cart = self.clone();
        match cart.products.iter_mut().find(|item| &item.id == product_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => cart.products.push(CartLineItem {
                id: product_id.clone(),
                quantity: 1,
            }),
        }
        cart
    }

    /// Remove one unit of a product; the line item is dropped at zero.
    ///
    /// Removing a product that is not in the cart leaves it unchanged.
    pub fn with_removed(&self, product_id: &ProductId) -> Cart {
        let mut cart = self.clone();
        if let Some(item) = cart.products.iter_mut().find(|item| &item.id == product_id) {
            item.quantity = item.quantity.saturating_sub(1);
            if item.quantity == 0 {
                cart.products.retain(|item| &item.id != product_id);
            }
        }
        cart
    }

    /// Zero out a line item but keep it in the cart.
    ///
    /// Used by the cart panel's delete button; the entry stays in the
    /// array and is hidden from display.
    pub fn with_cleared(&self, product_id: &ProductId) -> Cart {
        let mut cart = self.clone();
        for item in cart.products.iter_mut().filter(|item| &item.id == product_id) {
            item.quantity = 0;
        }
        cart
    }
}
