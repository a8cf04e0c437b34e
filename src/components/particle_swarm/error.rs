//! Error types for sampling, gallery selection and configuration.

use thiserror::Error;

/// Failure to turn an image resource into samples.
///
/// A successfully decoded image with no pixels above the threshold is *not*
/// an error; it yields an empty sample list.
#[derive(Debug, Error)]
pub enum SampleError {
	/// The encoded bytes could not be decoded.
	#[error("failed to decode image: {0}")]
	Decode(#[from] image::ImageError),
	/// The browser reported a load error for the resource.
	#[error("failed to load image {src}")]
	Load { src: String },
	/// The image decoded but has a zero dimension.
	#[error("image has zero size ({width}x{height})")]
	EmptyImage { width: u32, height: u32 },
	/// Rasterizing through an offscreen canvas failed.
	#[error("failed to rasterize image: {0}")]
	Raster(String),
}

/// Failure to resolve a gallery selection to a sample set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
	#[error("no image named {0:?}")]
	Unknown(String),
	#[error("image {0:?} has not finished loading")]
	NotLoaded(String),
	#[error("image {name:?} failed to load: {reason}")]
	Failed { name: String, reason: String },
}

/// Invalid [`SwarmConfig`](super::config::SwarmConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid config JSON: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("canvas must be non-empty, got {width}x{height}")]
	EmptyCanvas { width: u32, height: u32 },
	#[error("stride must be at least 1")]
	ZeroStride,
	#[error("duration_steps must be at least 1")]
	ZeroDuration,
	#[error("{name} must be finite and non-negative, got {value}")]
	InvalidParameter { name: &'static str, value: f64 },
}
