use iced::widget::image::Handle;
use iced::widget::{column, container, row, scrollable, text};
use iced::{Element, Length, Task, Theme};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::api::StoreClient;
use crate::error::StoreError;
use crate::images;
use crate::state::data::{Cart, Product, ProductId};
use crate::state::summary::CartSummary;
use crate::ui::{cart_panel, confirm_dialog, product_grid, style};

pub const LOAD_FAILED: &str = "Failed to load data";
pub const UPDATE_FAILED: &str = "Failed to update cart";
pub const DETAILS_FAILED: &str = "Failed to fetch product details";

/// Where the page is in its startup
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Loading,
    Failed(String),
    Ready,
}

/// Main application state
pub struct DessertShop {
    client: StoreClient,
    image_cache_dir: PathBuf,
    phase: Phase,
    /// The catalogue from `GET /desserts`
    products: Vec<Product>,
    /// Last cart the server accepted
    cart: Option<Cart>,
    images: HashMap<ProductId, Handle>,
    /// Per-line product details from `GET /desserts/:id`
    cart_details: Vec<Product>,
    details_loading: bool,
    details_error: Option<String>,
    /// Bumped on every cart change; older detail results are dropped
    details_generation: u64,
    /// A `PUT /cart` is in flight
    updating: bool,
    update_error: Option<String>,
    confirming: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Initial products + cart fetch finished
    Loaded(Result<(Vec<Product>, Cart), StoreError>),
    /// A product image finished loading
    ImageLoaded(ProductId, Result<Option<Handle>, StoreError>),
    /// Add one unit of a product
    AddToCart(ProductId),
    /// Take one unit of a product away
    RemoveFromCart(ProductId),
    /// Cart panel delete button: zero the line item
    ClearItem(ProductId),
    /// `PUT /cart` finished
    CartSaved(Result<Cart, StoreError>),
    /// Detail fetch for a given cart generation finished
    DetailsLoaded(u64, Result<Vec<Product>, StoreError>),
    /// Open the confirmation dialog
    ConfirmOrder,
    /// Confirm inside the dialog
    PlaceOrder,
    /// Close the dialog without ordering
    DismissOrder,
}

impl DessertShop {
    /// Create the application and kick off the initial load
    pub fn new(client: StoreClient, image_cache_dir: PathBuf) -> (Self, Task<Message>) {
        let shop = DessertShop {
            client: client.clone(),
            image_cache_dir,
            phase: Phase::Loading,
            products: Vec::new(),
            cart: None,
            images: HashMap::new(),
            cart_details: Vec::new(),
            details_loading: false,
            details_error: None,
            details_generation: 0,
            updating: false,
            update_error: None,
            confirming: false,
        };

        tracing::info!("Loading desserts and cart");
        let load = Task::perform(
            async move { client.fetch_storefront().await },
            Message::Loaded,
        );

        (shop, load)
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(Ok((products, cart))) => {
                tracing::info!(
                    products = products.len(),
                    cart_lines = cart.products.len(),
                    "Storefront loaded"
                );
                self.products = products;
                self.cart = Some(cart);
                self.phase = Phase::Ready;

                let mut tasks: Vec<Task<Message>> = self
                    .products
                    .iter()
                    .map(|product| self.load_image(product))
                    .collect();
                tasks.push(self.refresh_details());
                Task::batch(tasks)
            }
            Message::Loaded(Err(e)) => {
                tracing::error!(error = %e, "Error fetching data");
                self.phase = Phase::Failed(LOAD_FAILED.to_string());
                Task::none()
            }
            Message::ImageLoaded(id, Ok(Some(handle))) => {
                self.images.insert(id, handle);
                Task::none()
            }
            Message::ImageLoaded(_, Ok(None)) => Task::none(),
            Message::ImageLoaded(id, Err(e)) => {
                tracing::warn!(product_id = %id, error = %e, "Could not load product image");
                Task::none()
            }
            Message::AddToCart(id) => self.mutate(|cart| cart.with_added(&id)),
            Message::RemoveFromCart(id) => self.mutate(|cart| cart.with_removed(&id)),
            Message::ClearItem(id) => self.mutate(|cart| cart.with_cleared(&id)),
            Message::CartSaved(Ok(cart)) => {
                tracing::info!(items = cart.item_count(), "Cart updated");
                self.updating = false;
                self.cart = Some(cart);
                self.refresh_details()
            }
            Message::CartSaved(Err(e)) => {
                tracing::error!(error = %e, "Error updating cart");
                self.updating = false;
                self.update_error = Some(UPDATE_FAILED.to_string());
                Task::none()
            }
            Message::DetailsLoaded(generation, result) => {
                if generation != self.details_generation {
                    tracing::debug!(
                        generation,
                        current = self.details_generation,
                        "Dropping stale cart details"
                    );
                    return Task::none();
                }
                self.details_loading = false;
                match result {
                    Ok(products) => {
                        self.cart_details = products;
                        self.details_error = None;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Error fetching cart details");
                        self.details_error = Some(DETAILS_FAILED.to_string());
                    }
                }
                Task::none()
            }
            Message::ConfirmOrder => {
                if self.summary().is_some_and(|summary| !summary.is_empty()) {
                    self.confirming = true;
                }
                Task::none()
            }
            Message::PlaceOrder => {
                if let Some(summary) = self.summary() {
                    for line in &summary.lines {
                        tracing::info!(
                            product_id = %line.id,
                            name = %line.name(),
                            quantity = line.quantity,
                            line_total = %line.line_total_label(),
                            "Order line"
                        );
                    }
                    tracing::info!(
                        items = summary.item_count,
                        total = %summary.total_label(),
                        "Order confirmed"
                    );
                }
                self.confirming = false;
                Task::none()
            }
            Message::DismissOrder => {
                self.confirming = false;
                Task::none()
            }
        }
    }

    /// Build the user interface
    pub fn view(&self) -> Element<Message> {
        let page: Element<Message> = match (&self.phase, &self.cart) {
            (Phase::Loading, _) => text("Loading...").size(24).into(),
            (Phase::Failed(error), _) => text(format!("Error: {}", error))
                .size(24)
                .color(style::ERROR)
                .into(),
            (Phase::Ready, None) => text("Loading...").size(24).into(),
            (Phase::Ready, Some(cart)) => return self.storefront(cart),
        };

        container(page)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(style::page)
            .into()
    }

    /// Set the application theme
    pub fn theme(&self) -> Theme {
        Theme::Light
    }

    fn storefront<'a>(&'a self, cart: &'a Cart) -> Element<'a, Message> {
        let mut catalogue = column![text("Desserts").size(48).font(style::BOLD)].spacing(24);
        if let Some(error) = &self.update_error {
            catalogue = catalogue.push(text(error).color(style::ERROR));
        }
        catalogue = catalogue.push(product_grid::view(
            &self.products,
            cart,
            &self.images,
            self.updating,
        ));

        let summary = CartSummary::build(cart, &self.cart_details);
        let panel = cart_panel::view(
            summary.clone(),
            cart_panel::PanelStatus {
                loading: self.details_loading,
                error: self.details_error.as_deref(),
                busy: self.updating,
            },
        );

        let layout = row![
            scrollable(catalogue).width(Length::FillPortion(2)),
            container(panel).width(Length::FillPortion(1)),
        ]
        .spacing(32)
        .padding([64, 48]);

        let base: Element<Message> = container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(style::page)
            .into();

        if self.confirming {
            confirm_dialog::overlay(base, &summary)
        } else {
            base
        }
    }

    fn summary(&self) -> Option<CartSummary> {
        self.cart
            .as_ref()
            .map(|cart| CartSummary::build(cart, &self.cart_details))
    }

    /// Apply a local mutation and push the whole cart to the server.
    ///
    /// The displayed cart only changes once the server accepted it.
    fn mutate<F>(&mut self, change: F) -> Task<Message>
    where
        F: FnOnce(&Cart) -> Cart,
    {
        if self.updating {
            return Task::none();
        }
        let Some(cart) = &self.cart else {
            return Task::none();
        };

        let updated = change(cart);
        self.updating = true;
        self.update_error = None;

        let client = self.client.clone();
        Task::perform(
            async move { client.put_cart(&updated).await },
            Message::CartSaved,
        )
    }

    /// Re-fetch product details for the current cart
    fn refresh_details(&mut self) -> Task<Message> {
        self.details_generation += 1;
        let generation = self.details_generation;

        let Some(cart) = self.cart.clone() else {
            return Task::none();
        };
        if cart.is_empty() {
            self.details_loading = false;
            self.details_error = None;
            return Task::none();
        }

        self.details_loading = true;
        self.details_error = None;
        let client = self.client.clone();
        Task::perform(
            async move { client.fetch_cart_details(&cart).await },
            move |result| Message::DetailsLoaded(generation, result),
        )
    }

    fn load_image(&self, product: &Product) -> Task<Message> {
        let id = product.id.clone();
        Task::perform(
            images::load_product_image(
                self.client.clone(),
                self.image_cache_dir.clone(),
                product.clone(),
            ),
            move |result| Message::ImageLoaded(id.clone(), result),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::CartLineItem;
    use reqwest::Url;

    fn product(id: u64, name: &str, price: f64) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.to_string(),
            category: "Cake".to_string(),
            price,
            image: String::new(),
        }
    }

    fn cart(items: &[(u64, u32)]) -> Cart {
        Cart {
            id: ProductId::from(1),
            products: items
                .iter()
                .map(|&(id, quantity)| CartLineItem {
                    id: ProductId::from(id),
                    quantity,
                })
                .collect(),
        }
    }

    fn shop() -> DessertShop {
        let client = StoreClient::new(Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let (shop, _) = DessertShop::new(client, std::env::temp_dir().join("dessert-shop-tests"));
        shop
    }

    fn loaded(items: &[(u64, u32)]) -> DessertShop {
        let mut shop = shop();
        let _ = shop.update(Message::Loaded(Ok((
            vec![product(5, "Baklava", 3.5), product(6, "Macaron", 8.0)],
            cart(items),
        ))));
        shop
    }

    #[test]
    fn test_starts_loading() {
        assert_eq!(shop().phase, Phase::Loading);
    }

    #[test]
    fn test_load_failure_sets_single_error() {
        let mut shop = shop();
        let _ = shop.update(Message::Loaded(Err(StoreError::Http("connection refused".into()))));
        assert_eq!(shop.phase, Phase::Failed(LOAD_FAILED.to_string()));
        assert!(shop.cart.is_none());
    }

    #[test]
    fn test_load_success_starts_detail_fetch() {
        let shop = loaded(&[(5, 2)]);
        assert_eq!(shop.phase, Phase::Ready);
        assert!(shop.details_loading);
        assert_eq!(shop.details_generation, 1);
    }

    #[test]
    fn test_empty_cart_needs_no_details() {
        let shop = loaded(&[]);
        assert!(!shop.details_loading);
        let summary = shop.summary().unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total_label(), "0.00");
    }

    #[test]
    fn test_mutation_waits_for_server() {
        let mut shop = loaded(&[(5, 1)]);
        let _ = shop.update(Message::AddToCart(ProductId::from(5)));
        assert!(shop.updating);
        // Displayed cart is unchanged until the PUT succeeds
        assert_eq!(shop.cart, Some(cart(&[(5, 1)])));

        let _ = shop.update(Message::CartSaved(Ok(cart(&[(5, 2)]))));
        assert!(!shop.updating);
        assert_eq!(shop.cart, Some(cart(&[(5, 2)])));
    }

    #[test]
    fn test_second_click_while_updating_is_ignored() {
        let mut shop = loaded(&[(5, 1)]);
        let _ = shop.update(Message::AddToCart(ProductId::from(5)));
        let _ = shop.update(Message::RemoveFromCart(ProductId::from(5)));
        assert!(shop.updating);
        assert_eq!(shop.cart, Some(cart(&[(5, 1)])));
    }

    #[test]
    fn test_update_failure_keeps_prior_state() {
        let mut shop = loaded(&[(5, 1)]);
        let _ = shop.update(Message::AddToCart(ProductId::from(6)));
        let _ = shop.update(Message::CartSaved(Err(StoreError::Status {
            url: "http://127.0.0.1:9/cart".into(),
            status: 500,
        })));

        assert_eq!(shop.phase, Phase::Ready);
        assert_eq!(shop.cart, Some(cart(&[(5, 1)])));
        assert_eq!(shop.update_error.as_deref(), Some(UPDATE_FAILED));
        assert!(!shop.updating);
    }

    #[test]
    fn test_stale_details_are_dropped() {
        let mut shop = loaded(&[(5, 1)]);
        let _ = shop.update(Message::AddToCart(ProductId::from(5)));
        let _ = shop.update(Message::CartSaved(Ok(cart(&[(5, 2)]))));
        assert_eq!(shop.details_generation, 2);

        let _ = shop.update(Message::DetailsLoaded(1, Ok(vec![product(5, "Old Baklava", 1.0)])));
        assert!(shop.cart_details.is_empty());
        assert!(shop.details_loading);

        let _ = shop.update(Message::DetailsLoaded(2, Ok(vec![product(5, "Baklava", 3.5)])));
        assert!(!shop.details_loading);
        assert_eq!(shop.summary().unwrap().total_label(), "7.00");
    }

    #[test]
    fn test_details_failure_sets_panel_error() {
        let mut shop = loaded(&[(5, 1)]);
        let _ = shop.update(Message::DetailsLoaded(1, Err(StoreError::Http("reset".into()))));
        assert_eq!(shop.details_error.as_deref(), Some(DETAILS_FAILED));
        assert_eq!(shop.phase, Phase::Ready);
    }

    #[test]
    fn test_confirm_order_opens_and_closes_without_request() {
        let mut shop = loaded(&[(5, 2)]);
        let _ = shop.update(Message::DetailsLoaded(1, Ok(vec![product(5, "Baklava", 3.5)])));

        let _ = shop.update(Message::ConfirmOrder);
        assert!(shop.confirming);

        let _ = shop.update(Message::PlaceOrder);
        assert!(!shop.confirming);
        assert!(!shop.updating);
        assert_eq!(shop.cart, Some(cart(&[(5, 2)])));
    }

    #[test]
    fn test_confirm_order_needs_items() {
        let mut shop = loaded(&[(5, 0)]);
        let _ = shop.update(Message::ConfirmOrder);
        assert!(!shop.confirming);
    }

    #[test]
    fn test_dismiss_order() {
        let mut shop = loaded(&[(5, 1)]);
        let _ = shop.update(Message::ConfirmOrder);
        let _ = shop.update(Message::DismissOrder);
        assert!(!shop.confirming);
    }
}
