//! Image attachment loading: file on disk to an inline `data:` URI.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::imageops::FilterType;
use image::ImageFormat;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLimits {
    /// Longest side in pixels before the image is downscaled.
    pub max_dimension: u32,
    /// Files larger than this are refused outright.
    pub max_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            max_dimension: 1600,
            max_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageDataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not an image ({mime})")]
    UnsupportedType { path: PathBuf, mime: String },
    #[error("{path} is {size} bytes, above the {limit} byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image read task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub fn encode_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Validate image bytes and shrink them if either side exceeds the limit.
///
/// Small images keep their original encoding; downscaled ones become PNG.
pub fn prepare_image(bytes: &[u8], mime: &str, limits: ImageLimits) -> Result<String, ImageDataError> {
    let decoded = image::load_from_memory(bytes)?;
    let (width, height) = (decoded.width(), decoded.height());
    if width.max(height) <= limits.max_dimension {
        return Ok(encode_data_uri(bytes, mime));
    }

    let resized = decoded.resize(limits.max_dimension, limits.max_dimension, FilterType::Triangle);
    let mut out = Cursor::new(Vec::new());
    resized.write_to(&mut out, ImageFormat::Png)?;
    debug!(
        width,
        height,
        resized_width = resized.width(),
        resized_height = resized.height(),
        "downscaled image attachment"
    );
    Ok(encode_data_uri(out.get_ref(), "image/png"))
}

fn read_data_uri(path: &Path, limits: ImageLimits) -> Result<String, ImageDataError> {
    let io_err = |source| ImageDataError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        return Err(ImageDataError::UnsupportedType {
            path: path.to_path_buf(),
            mime: mime.essence_str().to_string(),
        });
    }

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > limits.max_bytes {
        return Err(ImageDataError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: limits.max_bytes,
        });
    }

    let bytes = std::fs::read(path).map_err(io_err)?;
    prepare_image(&bytes, mime.essence_str(), limits)
}

/// Read an image file off the UI thread and encode it as a data URI.
pub async fn load_data_uri(path: PathBuf, limits: ImageLimits) -> Result<String, ImageDataError> {
    let data_uri = tokio::task::spawn_blocking(move || {
        let result = read_data_uri(&path, limits);
        if result.is_ok() {
            info!(path = %path.display(), "loaded image attachment");
        }
        result
    })
    .await??;
    Ok(data_uri)
}
