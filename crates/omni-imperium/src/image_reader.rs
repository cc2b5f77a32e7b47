use std::fs;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use omni_service_environment::image_reference::ImageReference;

/// Reads an image file into an embedded `data:<mime>;base64,<payload>`
/// reference. The mime type is taken from the file extension.
pub fn read_image(path: &Path) -> Result<ImageReference> {
    let media_type = media_type(path)?;
    let bytes =
        fs::read(path).with_context(|| format!("could not read image {}", path.display()))?;
    if bytes.is_empty() {
        bail!("image {} is empty", path.display());
    }

    Ok(ImageReference::new(format!(
        "data:{};base64,{}",
        media_type,
        B64.encode(bytes)
    )))
}

fn media_type(path: &Path) -> Result<&'static str> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .with_context(|| format!("{} has no file extension", path.display()))?;

    Ok(match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        other => bail!("unsupported image type .{}", other),
    })
}
