use dotenvy::dotenv;
use reqwest::Url;
use std::env;
use std::path::PathBuf;

use crate::error::{Result, StoreError};

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings, read once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the dessert/cart REST API, without a trailing slash
    pub api_url: Url,
    /// Where cropped product images are cached
    pub image_cache_dir: PathBuf,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from the environment (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("DESSERT_SHOP_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = parse_api_url(&raw_url)?;

        let image_cache_dir = match lookup("DESSERT_SHOP_IMAGE_CACHE") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_image_cache_dir()?,
        };

        let log_filter = lookup("RUST_LOG")
            .or_else(|| lookup("DESSERT_SHOP_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            api_url,
            image_cache_dir,
            log_filter,
        })
    }
}

/// Parse the API base URL, keeping at most one trailing slash off
fn parse_api_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

    let url = Url::parse(trimmed)
        .map_err(|e| StoreError::Config(format!("Invalid DESSERT_SHOP_API_URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(StoreError::Config(format!(
            "Unsupported scheme '{}' in DESSERT_SHOP_API_URL",
            other
        ))),
    }
}

/// Get the image cache directory
/// Returns ~/.cache/dessert-shop/images on Linux
fn default_image_cache_dir() -> Result<PathBuf> {
    let mut path = dirs::cache_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| StoreError::Config("Could not determine cache directory".to_string()))?;

    path.push("dessert-shop");
    path.push("images");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("DESSERT_SHOP_IMAGE_CACHE", "/tmp/img")]))
                .unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.image_cache_dir, PathBuf::from("/tmp/img"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DESSERT_SHOP_API_URL", "http://shop.local:8080/api/"),
            ("DESSERT_SHOP_IMAGE_CACHE", "/tmp/img"),
        ]))
        .unwrap();
        assert_eq!(config.api_url.path(), "/api");
    }

    #[test]
    fn test_rust_log_wins_over_app_filter() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("RUST_LOG", "debug"),
            ("DESSERT_SHOP_LOG", "warn"),
            ("DESSERT_SHOP_IMAGE_CACHE", "/tmp/img"),
        ]))
        .unwrap();
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let err = AppConfig::from_lookup(lookup_from(&[("DESSERT_SHOP_API_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));

        let err =
            AppConfig::from_lookup(lookup_from(&[("DESSERT_SHOP_API_URL", "ftp://shop.local")]))
                .unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }
}
