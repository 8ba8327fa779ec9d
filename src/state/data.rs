/// Shared data structures for the application state
///
/// These structs mirror the JSON documents served by the dessert API
/// and flow unchanged between the HTTP layer and the UI layer.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a product or cart as the backend spells it.
///
/// Some backends number their records, others hand out string ids.
/// The original form is kept so a cart written back with `PUT /cart`
/// looks exactly like the one that was read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ProductId {
    Number(u64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

/// A dessert offered by the shop (read-only on the client)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    /// Image URL, absolute or relative to the API base
    #[serde(default)]
    pub image: String,
}

/// A product id and how many of it are in the cart
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CartLineItem {
    pub id: ProductId,
    /// 0 means "removed" and is never rendered
    pub quantity: u32,
}

/// The server-side cart, always read and replaced as a whole
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: ProductId,
    #[serde(default)]
    pub products: Vec<CartLineItem>,
}
