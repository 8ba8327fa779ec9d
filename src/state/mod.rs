/// State management module
///
/// This module handles all client-side storefront state, including:
/// - Shared data structures mirroring the API documents (data.rs)
/// - Local cart mutations pushed back with `PUT /cart` (cart.rs)
/// - Cart totals and per-line labels (summary.rs)

pub mod data;
pub mod cart;
pub mod summary;
