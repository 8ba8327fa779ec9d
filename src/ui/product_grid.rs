/// Dessert cards with add/remove controls
use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Color, ContentFit, Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;

use super::style;
use crate::images::CARD_IMAGE_SIZE;
use crate::state::data::{Cart, Product, ProductId};
use crate::state::summary::format_price;
use crate::Message;

const CARD_WIDTH: f32 = CARD_IMAGE_SIZE as f32;

/// Build the product grid.
///
/// Quantity controls are disabled while `busy` (a cart update is in flight).
pub fn view<'a>(
    products: &'a [Product],
    cart: &'a Cart,
    images: &'a HashMap<ProductId, Handle>,
    busy: bool,
) -> Element<'a, Message> {
    let cards = products
        .iter()
        .map(|product| card(product, cart.quantity_of(&product.id), images.get(&product.id), busy))
        .collect();

    Wrap::with_elements(cards)
        .spacing(24.0)
        .line_spacing(32.0)
        .into()
}

fn card<'a>(
    product: &'a Product,
    quantity: u32,
    image: Option<&'a Handle>,
    busy: bool,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match image {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(CARD_WIDTH))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(Space::new(Length::Fixed(CARD_WIDTH), Length::Fixed(CARD_WIDTH)))
            .style(style::image_placeholder)
            .into(),
    };

    let framed = container(picture)
        .padding(2)
        .style(style::image_frame(quantity > 0));

    let controls =
        container(cart_controls(&product.id, quantity, busy)).center_x(Length::Fixed(CARD_WIDTH));

    let details = column![
        text(&product.category).size(14).color(style::ROSE_500),
        text(&product.name).size(16).font(style::SEMIBOLD),
        text(format!("${}", format_price(product.price)))
            .size(16)
            .font(style::SEMIBOLD)
            .color(style::ORANGE),
    ]
    .spacing(4);

    column![framed, controls, details]
        .spacing(12)
        .width(Length::Fixed(CARD_WIDTH + 4.0))
        .into()
}

/// "Add to Cart" when absent, otherwise a − n + stepper
fn cart_controls<'a>(id: &ProductId, quantity: u32, busy: bool) -> Element<'a, Message> {
    let enabled = |message: Message| (!busy).then_some(message);

    if quantity == 0 {
        return button(text("Add to Cart").font(style::SEMIBOLD))
            .padding([10, 24])
            .style(style::outline_button)
            .on_press_maybe(enabled(Message::AddToCart(id.clone())))
            .into();
    }

    let stepper = row![
        button(text("−").size(18))
            .padding([4, 14])
            .style(style::primary_button)
            .on_press_maybe(enabled(Message::RemoveFromCart(id.clone()))),
        text(quantity.to_string()).size(16).color(Color::WHITE),
        button(text("+").size(18))
            .padding([4, 14])
            .style(style::primary_button)
            .on_press_maybe(enabled(Message::AddToCart(id.clone()))),
    ]
    .spacing(24)
    .align_y(Alignment::Center);

    container(stepper).padding([4, 8]).style(style::stepper).into()
}
