use shared_models::identity::ImageRef;

/// Fallback avatar used when a record carries no usable image reference.
pub const DEFAULT_AVATAR_URL: &str = "https://cdn-icons-png.flaticon.com/512/149/149071.png";

/// Resolve an API image field to a displayable URL.
///
/// Applied once at the data-ingestion boundary, never in presentation code.
/// Precedence: hosted object url, then absolute string, then a
/// `/uploads/`-rooted path under the asset host, then a bare path under the
/// asset host's upload directory, then the default avatar.
pub fn normalize_image_url(image: Option<&ImageRef>, asset_base_url: &str) -> String {
    let base = asset_base_url.trim_end_matches('/');

    match image {
        Some(ImageRef::Hosted { url }) => url.clone(),
        Some(ImageRef::Path(path)) if path.starts_with("http") => path.clone(),
        Some(ImageRef::Path(path)) if path.starts_with("/uploads/") => {
            format!("{}{}", base, path)
        }
        Some(ImageRef::Path(path)) if !path.is_empty() => {
            format!("{}/uploads/{}", base, path)
        }
        _ => DEFAULT_AVATAR_URL.to_string(),
    }
}

/// Same resolution, packaged back into an `ImageRef` so ingested records
/// carry a ready-to-display hosted URL.
pub fn normalize_image(image: Option<&ImageRef>, asset_base_url: &str) -> ImageRef {
    ImageRef::Hosted {
        url: normalize_image_url(image, asset_base_url),
    }
}
