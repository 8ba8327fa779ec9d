/// Product image loading and caching
///
/// Images are downloaded once, centre-cropped to the card size and kept
/// as PNG files in the cache directory, keyed by product id.
use iced::widget::image::Handle;
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::StoreClient;
use crate::error::Result;
use crate::state::data::{Product, ProductId};

/// Edge length of the square product card image
pub const CARD_IMAGE_SIZE: u32 = 240;

/// Get the cache path for a product image (doesn't load, just returns the expected path)
///
/// Numeric and string ids live in separate namespaces, and string ids are
/// hex-encoded so distinct ids never share a file.
pub fn cached_image_path(cache_dir: &Path, id: &ProductId) -> PathBuf {
    let key = match id {
        ProductId::Number(n) => format!("n-{}", n),
        ProductId::Text(s) => {
            let hex: String = s.bytes().map(|b| format!("{:02x}", b)).collect();
            format!("s-{}", hex)
        }
    };
    cache_dir.join(format!("{}.png", key))
}

/// Fetch, crop and cache a product's image.
///
/// Returns `Ok(None)` when the product has no image reference.
pub async fn load_product_image(
    client: StoreClient,
    cache_dir: PathBuf,
    product: Product,
) -> Result<Option<Handle>> {
    let path = cached_image_path(&cache_dir, &product.id);
    if path.exists() {
        tracing::debug!(product_id = %product.id, path = %path.display(), "Image cache hit");
        return Ok(Some(Handle::from_path(path)));
    }

    let Some(url) = client.image_url(&product) else {
        return Ok(None);
    };

    let bytes = client.fetch_bytes(&url).await?;

    // Decoding and resampling are CPU-bound
    let saved =
        tokio::task::spawn_blocking(move || crop_and_save(&bytes, &cache_dir, &path)).await??;

    tracing::info!(product_id = %product.id, path = %saved.display(), "Cached product image");
    Ok(Some(Handle::from_path(saved)))
}

/// Decode an image and crop it to the card square
pub fn crop_to_card(bytes: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(bytes)?;
    Ok(img.resize_to_fill(CARD_IMAGE_SIZE, CARD_IMAGE_SIZE, FilterType::Lanczos3))
}

fn crop_and_save(bytes: &[u8], cache_dir: &Path, path: &Path) -> Result<PathBuf> {
    let card = crop_to_card(bytes)?;
    fs::create_dir_all(cache_dir)?;

    // Only complete files may appear under the final name
    let partial = path.with_extension("png.part");
    if let Err(e) = card.save_with_format(&partial, ImageFormat::Png) {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    fs::rename(&partial, path)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use image::{GenericImageView, Rgb, RgbImage};
    use reqwest::Url;
    use std::io::Cursor;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 80, 40]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn product(id: &str, image: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: "Panna Cotta".to_string(),
            category: "Panna Cotta".to_string(),
            price: 6.5,
            image: image.to_string(),
        }
    }

    #[test]
    fn test_crop_to_card_is_square() {
        let card = crop_to_card(&encoded_png(400, 300)).unwrap();
        assert_eq!(card.dimensions(), (CARD_IMAGE_SIZE, CARD_IMAGE_SIZE));
    }

    #[test]
    fn test_crop_rejects_garbage() {
        let err = crop_to_card(b"definitely not an image").unwrap_err();
        assert!(matches!(err, StoreError::Image(_)));
    }

    #[test]
    fn test_cache_path_is_filesystem_safe() {
        let path = cached_image_path(Path::new("/cache"), &ProductId::from("a/b c"));
        assert_eq!(path, PathBuf::from("/cache/s-612f622063.png"));
        assert_eq!(
            cached_image_path(Path::new("/cache"), &ProductId::from(5)),
            PathBuf::from("/cache/n-5.png")
        );
    }

    #[test]
    fn test_distinct_ids_never_share_a_cache_file() {
        let ids = [
            ProductId::from(5),
            ProductId::from("5"),
            ProductId::from("a/b"),
            ProductId::from("a_b"),
            ProductId::from("n-5"),
        ];
        let paths: std::collections::HashSet<_> = ids
            .iter()
            .map(|id| cached_image_path(Path::new("/cache"), id))
            .collect();
        assert_eq!(paths.len(), ids.len());
    }

    #[test]
    fn test_crop_and_save_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let cache_dir = dir.path().join("images");
        let path = cached_image_path(&cache_dir, &ProductId::from(7));

        let saved = crop_and_save(&encoded_png(300, 500), &cache_dir, &path).unwrap();
        let reloaded = image::open(&saved).unwrap();
        assert_eq!(reloaded.dimensions(), (CARD_IMAGE_SIZE, CARD_IMAGE_SIZE));

        let leftovers: Vec<_> = fs::read_dir(&cache_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("n-7.png")]);
    }

    #[test]
    fn test_failed_decode_leaves_no_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = cached_image_path(dir.path(), &ProductId::from(7));

        assert!(crop_and_save(b"truncated", dir.path(), &path).is_err());
        assert!(!path.exists());
        assert!(!path.with_extension("png.part").exists());
    }

    #[tokio::test]
    async fn test_cached_image_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let product = product("9", "http://127.0.0.1:9/unreachable.jpg");
        let path = cached_image_path(dir.path(), &product.id);
        fs::write(&path, encoded_png(CARD_IMAGE_SIZE, CARD_IMAGE_SIZE)).unwrap();

        let client = StoreClient::new(Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let handle = load_product_image(client, dir.path().to_path_buf(), product).await.unwrap();
        assert!(handle.is_some());
    }

    #[tokio::test]
    async fn test_product_without_image() {
        let dir = tempfile::tempdir().unwrap();
        let client = StoreClient::new(Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let handle = load_product_image(client, dir.path().to_path_buf(), product("3", ""))
            .await
            .unwrap();
        assert!(handle.is_none());
    }
}
