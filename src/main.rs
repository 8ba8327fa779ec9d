mod api;
mod app;
mod config;
mod error;
mod images;
mod logging;
mod state;
mod ui;

use app::{DessertShop, Message};
use config::AppConfig;

fn main() -> iced::Result {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    logging::init(&config.log_filter);
    tracing::info!(
        api_url = %config.api_url,
        image_cache = %config.image_cache_dir.display(),
        "Dessert shop starting"
    );

    let client = match api::StoreClient::new(config.api_url.clone()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Could not build HTTP client");
            std::process::exit(1);
        }
    };
    let image_cache_dir = config.image_cache_dir;

    iced::application("Dessert Shop", DessertShop::update, DessertShop::view)
        .theme(DessertShop::theme)
        .window_size((1280.0, 860.0))
        .centered()
        .run_with(move || DessertShop::new(client, image_cache_dir))
}
