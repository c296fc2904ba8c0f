use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Upper bound on one avatar download.
pub const AVATAR_TIMEOUT: Duration = Duration::from_secs(10);

/// Decoded RGBA avatar, ready for a `SharedPixelBuffer`.
#[derive(Debug, Clone)]
pub struct AvatarPixels {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Adds GitHub's `s` size hint to an avatar URL.
pub fn sized_avatar_url(url: &str, size: u32) -> String {
    if url.contains('?') {
        format!("{url}&s={size}")
    } else {
        format!("{url}?s={size}")
    }
}

/// Downloads avatar image bytes and decodes them into raw RGBA pixels.
///
/// Any failure yields `None`; the card simply renders without an image.
pub async fn download_avatar_pixels(client: &Client, url: &str, size: u32) -> Option<AvatarPixels> {
    let sized_url = sized_avatar_url(url, size);

    let response = client.get(&sized_url).send().await.ok()?;
    if !response.status().is_success() {
        debug!(url = %sized_url, status = %response.status(), "avatar download failed");
        return None;
    }
    let bytes = response.bytes().await.ok()?;
    let image = match image::load_from_memory(&bytes) {
        Ok(image) => image,
        Err(err) => {
            debug!(url = %sized_url, error = %err, "avatar decode failed");
            return None;
        }
    };

    // GitHub may serve a cached avatar larger than requested.
    let rgba = image.thumbnail_exact(size, size).to_rgba8();
    let (width, height) = rgba.dimensions();

    Some(AvatarPixels {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

/// Downloads an avatar for a lookup. Gives up with `None` when the lookup is
/// cancelled or the download exceeds [`AVATAR_TIMEOUT`].
pub async fn load_avatar(
    client: &Client,
    url: &str,
    size: u32,
    cancel: &CancellationToken,
) -> Option<AvatarPixels> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        result = tokio::time::timeout(AVATAR_TIMEOUT, download_avatar_pixels(client, url, size)) => {
            result.unwrap_or_else(|_| {
                debug!(url, "avatar download timed out");
                None
            })
        }
    }
}
