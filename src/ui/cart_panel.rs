/// Cart summary panel: line items, order total and the confirm action
use iced::alignment::Horizontal;
use iced::widget::{
    button, column, container, horizontal_rule, horizontal_space, row, text, Column,
};
use iced::{Alignment, Element, Length};

use super::style;
use crate::state::summary::{CartSummary, SummaryLine};
use crate::Message;

/// What the panel should show besides the lines themselves
#[derive(Debug, Clone, Copy)]
pub struct PanelStatus<'a> {
    /// Product details for the current cart are still in flight
    pub loading: bool,
    /// Failure message for the detail fetch
    pub error: Option<&'a str>,
    /// A cart update is in flight
    pub busy: bool,
}

pub const EMPTY_CART_TEXT: &str = "Your cart is empty";

pub fn view<'a>(summary: CartSummary, status: PanelStatus<'a>) -> Element<'a, Message> {
    let header = text(format!("Your Cart ({})", summary.item_count))
        .size(24)
        .font(style::BOLD)
        .color(style::ORANGE);

    let body: Element<'a, Message> = if status.loading {
        text("Loading cart items...").into()
    } else if let Some(error) = status.error {
        text(error).color(style::ERROR).into()
    } else if summary.is_empty() {
        text(EMPTY_CART_TEXT).color(style::ROSE_500).into()
    } else {
        filled(summary, status.busy)
    };

    container(column![header, body].spacing(20))
        .padding(24)
        .width(Length::Fill)
        .style(style::panel)
        .into()
}

fn filled<'a>(summary: CartSummary, busy: bool) -> Element<'a, Message> {
    let lines = summary
        .lines
        .iter()
        .map(|line| line_row(line, busy))
        .collect::<Vec<_>>();

    let total = row![
        text("Order Total").size(14),
        horizontal_space(),
        text(format!("${}", summary.total_label()))
            .size(24)
            .font(style::BOLD),
    ]
    .align_y(Alignment::Center);

    let delivery = container(
        row![
            text("This is a ").size(14),
            text("carbon-neutral").size(14).font(style::SEMIBOLD).color(style::GREEN),
            text(" delivery").size(14),
        ],
    )
    .padding(12)
    .center_x(Length::Fill)
    .style(style::note);

    let confirm = button(
        text("Confirm Order")
            .font(style::SEMIBOLD)
            .width(Length::Fill)
            .align_x(Horizontal::Center),
    )
    .width(Length::Fill)
    .padding(14)
    .style(style::primary_button)
    .on_press_maybe((!busy).then_some(Message::ConfirmOrder));

    Column::with_children(lines)
        .push(total)
        .push(delivery)
        .push(confirm)
        .spacing(16)
        .into()
}

fn line_row<'a>(line: &SummaryLine, busy: bool) -> Element<'a, Message> {
    let info = column![
        text(line.name()).font(style::SEMIBOLD),
        row![
            text(format!("{}x", line.quantity))
                .font(style::SEMIBOLD)
                .color(style::ORANGE),
            text(format!("@ ${}", line.unit_price_label())).color(style::ROSE_500),
            text(format!("${}", line.line_total_label()))
                .font(style::SEMIBOLD)
                .color(style::ROSE_500),
        ]
        .spacing(12),
    ]
    .spacing(6);

    let remove = button(text("×").size(14))
        .padding([0, 6])
        .style(style::icon_button)
        .on_press_maybe((!busy).then_some(Message::ClearItem(line.id.clone())));

    column![
        row![info, horizontal_space(), remove].align_y(Alignment::Center),
        horizontal_rule(1),
    ]
    .spacing(12)
    .into()
}
