/// Preview of the picture picked in the "add photo" form
/// Decoded and downscaled off the UI thread
use iced::widget::image::Handle;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Longest edge of a generated preview
const PREVIEW_SIZE: u32 = 256;

#[derive(Debug, Clone)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

/// Generate a preview for the picked file
pub async fn load_preview(path: PathBuf) -> Result<Preview, String> {
    // Spawn blocking task for CPU-bound work
    tokio::task::spawn_blocking(move || load_preview_blocking(&path))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
}

/// Blocking version of preview generation
fn load_preview_blocking(path: &Path) -> Result<Preview, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to decode {}: {}", path.display(), e))?;

    // Only ever shrink; small pictures are shown as they are
    let img = if img.width() > PREVIEW_SIZE || img.height() > PREVIEW_SIZE {
        img.resize(PREVIEW_SIZE, PREVIEW_SIZE, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    debug!(width, height, "generated upload preview for {}", path.display());

    Ok(Preview {
        width,
        height,
        handle: Handle::from_rgba(width, height, rgba.into_raw()),
    })
}
