/// View layer
///
/// This module builds the iced widget trees:
/// - Product cards with quantity controls (product_grid.rs)
/// - The cart summary panel (cart_panel.rs)
/// - The order confirmation modal (confirm_dialog.rs)
/// - Shared palette and widget styles (style.rs)

pub mod style;
pub mod product_grid;
pub mod cart_panel;
pub mod confirm_dialog;
