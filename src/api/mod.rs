/// REST API access
///
/// This module wraps the dessert shop backend:
/// - `GET /desserts` and `GET /desserts/:id` for the catalogue
/// - `GET /cart` and `PUT /cart` for the shared cart

pub mod client;

pub use client::StoreClient;
