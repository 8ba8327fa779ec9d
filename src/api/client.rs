use futures::future::try_join_all;
use reqwest::{Client, StatusCode, Url};

use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::state::data::{Cart, Product, ProductId};

/// Thin client for the dessert shop REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: Client,
    base_url: Url,
}

impl StoreClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("dessert-shop/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Absolute URL for an API path such as `desserts/5`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// URL of a single dessert, with the id percent-encoded as one path segment
    pub fn dessert_url(&self, id: &ProductId) -> Result<String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push("desserts")
            .push(&id.to_string());
        Ok(url.to_string())
    }

    /// Resolve a product image reference.
    ///
    /// Absolute URLs are used as-is; anything else is taken relative to
    /// the API base. Returns None when the product has no image.
    pub fn image_url(&self, product: &Product) -> Option<String> {
        let image = product.image.trim();
        if image.is_empty() {
            return None;
        }
        if Url::parse(image).is_ok() {
            return Some(image.to_string());
        }
        Some(self.endpoint(image.trim_start_matches("./")))
    }

    /// `GET /desserts`
    pub async fn list_desserts(&self) -> Result<Vec<Product>> {
        let url = self.endpoint("desserts");
        tracing::debug!(%url, "Fetching desserts");
        let products = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Product>>()
            .await?;
        Ok(products)
    }

    /// `GET /desserts/:id`; a 404 yields `None`
    pub async fn get_dessert(&self, id: &ProductId) -> Result<Option<Product>> {
        let url = self.dessert_url(id)?;
        tracing::debug!(%url, "Fetching dessert");
        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::warn!(product_id = %id, "Dessert not found");
            return Ok(None);
        }
        let product = response.error_for_status()?.json::<Product>().await?;
        Ok(Some(product))
    }

    /// `GET /cart`
    pub async fn get_cart(&self) -> Result<Cart> {
        let url = self.endpoint("cart");
        tracing::debug!(%url, "Fetching cart");
        let cart = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Cart>()
            .await?;
        Ok(cart)
    }

    /// `PUT /cart` with the whole cart.
    ///
    /// The server's echo is adopted only when it is a cart with a
    /// `products` array; an empty body or any other acknowledgement means
    /// the submitted cart is taken as stored.
    pub async fn put_cart(&self, cart: &Cart) -> Result<Cart> {
        let url = self.endpoint("cart");
        tracing::debug!(%url, lines = cart.products.len(), "Replacing cart");
        let body = self
            .http
            .put(&url)
            .json(cart)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(cart.clone());
        }
        let echoed = serde_json::from_slice::<Value>(&body)
            .ok()
            .filter(|value| value.get("products").is_some_and(Value::is_array))
            .map(serde_json::from_value::<Cart>);
        match echoed {
            Some(Ok(stored)) => Ok(stored),
            Some(Err(e)) => {
                tracing::warn!(
                    error = %e,
                    "PUT /cart echoed a malformed cart, keeping submitted cart"
                );
                Ok(cart.clone())
            }
            None => {
                tracing::debug!("PUT /cart acknowledged without a cart, keeping submitted cart");
                Ok(cart.clone())
            }
        }
    }

    /// Products and cart, fetched concurrently; either failure fails both
    pub async fn fetch_storefront(&self) -> Result<(Vec<Product>, Cart)> {
        tokio::try_join!(self.list_desserts(), self.get_cart())
    }

    /// Details for every visible line item, fetched concurrently.
    ///
    /// Products the server no longer knows are left out of the result.
    pub async fn fetch_cart_details(&self, cart: &Cart) -> Result<Vec<Product>> {
        let lookups = cart.visible_items().map(|item| self.get_dessert(&item.id));
        let found = try_join_all(lookups).await?;
        Ok(found.into_iter().flatten().collect())
    }

    /// Raw bytes behind a URL (used for product images)
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(%url, "Downloading");
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}
