/// Cart summary: per-line prices and the order total
use super::data::{Cart, Product, ProductId};

/// Placeholder shown when a line item's product could not be resolved
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a money amount with two decimals (no currency symbol)
pub fn format_price(amount: f64) -> String {
    // -0.0 must print as 0.00
    let amount = if amount == 0.0 { 0.0 } else { amount };
    format!("{:.2}", amount)
}

/// One rendered cart line
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub id: ProductId,
    pub quantity: u32,
    /// The matching product, if it was fetched
    pub product: Option<Product>,
}

impl SummaryLine {
    pub fn name(&self) -> String {
        match &self.product {
            Some(product) => product.name.clone(),
            None => format!("Product {}", self.id),
        }
    }

    pub fn line_total(&self) -> Option<f64> {
        self.product
            .as_ref()
            .map(|product| product.price * f64::from(self.quantity))
    }

    pub fn unit_price_label(&self) -> String {
        self.product
            .as_ref()
            .map(|product| format_price(product.price))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn line_total_label(&self) -> String {
        self.line_total()
            .map(format_price)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

/// Visible cart lines joined with their product details
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    pub lines: Vec<SummaryLine>,
    pub item_count: u32,
}

impl CartSummary {
    /// Join the cart against fetched product details.
    ///
    /// Zero-quantity items are skipped. Items whose product is missing
    /// from `details` are kept and contribute nothing to the total.
    pub fn build(cart: &Cart, details: &[Product]) -> Self {
        let lines = cart
            .visible_items()
            .map(|item| SummaryLine {
                id: item.id.clone(),
                quantity: item.quantity,
                product: details.iter().find(|p| p.id == item.id).cloned(),
            })
            .collect();

        Self {
            lines,
            item_count: cart.item_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ price × quantity over resolvable lines
    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .filter_map(SummaryLine::line_total)
            .fold(0.0, |acc, line| acc + line)
    }

    pub fn total_label(&self) -> String {
        format_price(self.total())
    }
}
