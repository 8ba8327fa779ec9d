/// Storefront palette and widget styles
use iced::font::Weight;
use iced::widget::{button, container};
use iced::{Background, Border, Color, Font, Shadow, Theme};

/// Opaque colour from normalised channels, usable in constants
const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color { r, g, b, a: 1.0 }
}

pub const ROSE_50: Color = rgb(0.988, 0.973, 0.965);
pub const ROSE_100: Color = rgb(0.961, 0.933, 0.925);
pub const ROSE_300: Color = rgb(0.792, 0.686, 0.655);
pub const ROSE_500: Color = rgb(0.529, 0.388, 0.353);
pub const ROSE_900: Color = rgb(0.149, 0.059, 0.031);
pub const ORANGE: Color = rgb(0.780, 0.231, 0.059);
pub const ORANGE_LIGHT: Color = rgb(0.878, 0.416, 0.235);
pub const GREEN: Color = rgb(0.118, 0.647, 0.459);
pub const ERROR: Color = rgb(0.863, 0.149, 0.149);

pub const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

pub const SEMIBOLD: Font = Font {
    weight: Weight::Semibold,
    ..Font::DEFAULT
};

/// Page background
pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ROSE_100)),
        text_color: Some(ROSE_900),
        ..container::Style::default()
    }
}

/// White rounded panel (cart, dialog)
pub fn panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::WHITE)),
        border: Border {
            radius: 12.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Frame around a product image; highlighted when the product is in the cart
pub fn image_frame(in_cart: bool) -> impl Fn(&Theme) -> container::Style {
    move |_theme| container::Style {
        border: Border {
            color: if in_cart { ORANGE } else { Color::TRANSPARENT },
            width: 2.0,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}

/// Grey placeholder while an image is loading (or failed to)
pub fn image_placeholder(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ROSE_300)),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Tinted box for the delivery note
pub fn note(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ROSE_50)),
        border: Border {
            radius: 8.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Orange pill holding the quantity stepper
pub fn stepper(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(ORANGE)),
        border: Border {
            radius: 999.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Dimmed backdrop behind the order dialog
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: 0.5,
            ..Color::BLACK
        })),
        ..container::Style::default()
    }
}

/// Filled orange pill (stepper, confirm order)
pub fn primary_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => ORANGE_LIGHT,
        button::Status::Disabled => ROSE_300,
        button::Status::Active => ORANGE,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: Color::WHITE,
        border: Border {
            radius: 999.0.into(),
            ..Border::default()
        },
        shadow: Shadow::default(),
    }
}

/// White pill with an orange outline ("Add to Cart")
pub fn outline_button(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, text_color) = match status {
        button::Status::Hovered | button::Status::Pressed => (ORANGE, Color::WHITE),
        button::Status::Disabled => (ROSE_50, ROSE_300),
        button::Status::Active => (Color::WHITE, ROSE_900),
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: ORANGE_LIGHT,
            width: 1.0,
            radius: 999.0.into(),
        },
        shadow: Shadow::default(),
    }
}

/// Outlined round button (cart line delete)
pub fn icon_button(_theme: &Theme, status: button::Status) -> button::Style {
    let color = match status {
        button::Status::Hovered | button::Status::Pressed => ROSE_900,
        _ => ROSE_300,
    };
    button::Style {
        background: None,
        text_color: color,
        border: Border {
            color,
            width: 1.0,
            radius: 999.0.into(),
        },
        shadow: Shadow::default(),
    }
}
