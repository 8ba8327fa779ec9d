/// Modal order confirmation
use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, opaque, row, stack, text,
    Column,
};
use iced::{Alignment, Element, Length};

use super::style;
use crate::state::summary::CartSummary;
use crate::Message;

/// Lay the confirmation dialog over `base`.
///
/// Clicking the backdrop dismisses it like the cancel button does.
pub fn overlay<'a>(base: Element<'a, Message>, summary: &CartSummary) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(dialog(summary))).style(style::backdrop))
                .on_press(Message::DismissOrder)
        )
    ]
    .into()
}

fn dialog<'a>(summary: &CartSummary) -> Element<'a, Message> {
    let lines: Vec<Element<'a, Message>> = summary
        .lines
        .iter()
        .map(|line| {
            row![
                text(format!("{}x", line.quantity))
                    .font(style::SEMIBOLD)
                    .color(style::ORANGE),
                text(line.name()),
                horizontal_space(),
                text(format!("${}", line.line_total_label())).font(style::SEMIBOLD),
            ]
            .spacing(12)
            .into()
        })
        .collect();

    let total = row![
        text("Order Total"),
        horizontal_space(),
        text(format!("${}", summary.total_label()))
            .size(24)
            .font(style::BOLD),
    ]
    .align_y(Alignment::Center);

    let actions = row![
        button(text("Cancel"))
            .padding([10, 24])
            .style(style::outline_button)
            .on_press(Message::DismissOrder),
        horizontal_space(),
        button(text("Place Order").font(style::SEMIBOLD))
            .padding([10, 24])
            .style(style::primary_button)
            .on_press(Message::PlaceOrder),
    ];

    container(
        column![
            text("Confirm your order").size(32).font(style::BOLD),
            text("Review your desserts before placing the order.").color(style::ROSE_500),
            Column::with_children(lines).spacing(10),
            total,
            actions,
        ]
        .spacing(20),
    )
    .width(Length::Fixed(420.0))
    .padding(32)
    .style(style::panel)
    .into()
}
