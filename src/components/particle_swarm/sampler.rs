//! Image to particle sampling.
//!
//! An image is rasterized to the canvas width (keeping its aspect ratio) and
//! walked on a fixed grid. Every grid pixel whose channel sum reaches the
//! threshold becomes a [`Sample`]. Sampling is deterministic: the same image
//! always yields the same samples in the same row-major order.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use super::config::SwarmConfig;
use super::error::SampleError;

/// RGBA color, one byte per channel.
pub type Rgba = [u8; 4];

/// A single point extracted from a source image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
	pub x: f64,
	pub y: f64,
	pub color: Rgba,
}

impl Sample {
	pub const fn new(x: f64, y: f64, color: Rgba) -> Self {
		Self { x, y, color }
	}
}

/// Converts raster images into sparse sample sets.
#[derive(Clone, Debug)]
pub struct ImageSampler {
	width: u32,
	stride: u32,
	threshold: u32,
}

impl ImageSampler {
	pub fn new(config: &SwarmConfig) -> Self {
		Self {
			width: config.canvas_width,
			stride: config.stride.max(1),
			threshold: config.threshold,
		}
	}

	/// Working bitmap size for a source image of the given native size.
	///
	/// Width is fixed to the canvas width; height follows the aspect ratio.
	pub fn working_size(&self, image_width: u32, image_height: u32) -> (u32, u32) {
		let height = (self.width as f64 * image_height as f64 / image_width as f64).round();
		(self.width, height as u32)
	}

	/// Upper bound on the number of samples a `width x height` bitmap can produce.
	pub fn max_samples(&self, width: u32, height: u32) -> usize {
		(width.div_ceil(self.stride) as usize) * (height.div_ceil(self.stride) as usize)
	}

	/// Rasterize `image` to the working size and sample it.
	pub fn sample(&self, image: &DynamicImage) -> Result<Vec<Sample>, SampleError> {
		let (image_width, image_height) = (image.width(), image.height());
		if image_width == 0 || image_height == 0 {
			return Err(SampleError::EmptyImage {
				width: image_width,
				height: image_height,
			});
		}

		let (width, height) = self.working_size(image_width, image_height);
		if height == 0 {
			return Ok(Vec::new());
		}

		let bitmap = if (width, height) == (image_width, image_height) {
			image.to_rgba8()
		} else {
			imageops::resize(&image.to_rgba8(), width, height, FilterType::Triangle)
		};
		Ok(self.sample_bitmap(&bitmap))
	}

	/// Decode PNG/JPEG bytes and sample the result.
	pub fn sample_bytes(&self, bytes: &[u8]) -> Result<Vec<Sample>, SampleError> {
		let image = image::load_from_memory(bytes)?;
		self.sample(&image)
	}

	/// Walk an already rasterized bitmap on the sampling grid.
	pub fn sample_bitmap(&self, bitmap: &RgbaImage) -> Vec<Sample> {
		let step = self.stride as usize;
		let mut samples = Vec::new();

		for y in (0..bitmap.height()).step_by(step) {
			for x in (0..bitmap.width()).step_by(step) {
				let [r, g, b, a] = bitmap.get_pixel(x, y).0;
				let sum = r as u32 + g as u32 + b as u32 + a as u32;
				if sum >= self.threshold {
					samples.push(Sample::new(x as f64, y as f64, [r, g, b, a]));
				}
			}
		}

		samples
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use image::{ImageFormat, Rgba as Pixel};
	use std::io::Cursor;

	fn config(width: u32, stride: u32) -> SwarmConfig {
		SwarmConfig {
			canvas_width: width,
			canvas_height: width,
			stride,
			..SwarmConfig::default()
		}
	}

	/// Opaque diagonal stripes on a transparent background.
	fn stripes(width: u32, height: u32) -> RgbaImage {
		RgbaImage::from_fn(width, height, |x, y| {
			if (x + y) % 3 == 0 {
				Pixel([200, 40, 10, 255])
			} else {
				Pixel([0, 0, 0, 0])
			}
		})
	}

	#[test]
	fn working_size_keeps_aspect_ratio() {
		let sampler = ImageSampler::new(&config(450, 5));
		assert_eq!(sampler.working_size(900, 450), (450, 225));
		assert_eq!(sampler.working_size(200, 300), (450, 675));
		// 450 * 2 / 3 = 300 exactly, 450 * 1 / 7 = 64.28 rounds down
		assert_eq!(sampler.working_size(3, 2), (450, 300));
		assert_eq!(sampler.working_size(7, 1), (450, 64));
	}

	#[test]
	fn bitmap_threshold_and_grid() {
		let sampler = ImageSampler::new(&config(10, 5));
		let mut bitmap = RgbaImage::new(10, 10);
		// On-grid pixels
		bitmap.put_pixel(0, 0, Pixel([255, 0, 0, 255]));
		bitmap.put_pixel(5, 0, Pixel([25, 25, 25, 25]));
		bitmap.put_pixel(0, 5, Pixel([24, 25, 25, 25]));
		// Off-grid pixel is never visited
		bitmap.put_pixel(3, 3, Pixel([255, 255, 255, 255]));

		let samples = sampler.sample_bitmap(&bitmap);
		assert_eq!(
			samples,
			vec![
				Sample::new(0.0, 0.0, [255, 0, 0, 255]),
				Sample::new(5.0, 0.0, [25, 25, 25, 25]),
			]
		);
	}

	#[test]
	fn sampling_is_deterministic() {
		let sampler = ImageSampler::new(&config(64, 3));
		let image = DynamicImage::ImageRgba8(stripes(97, 41));
		let first = sampler.sample(&image).unwrap();
		let second = sampler.sample(&image).unwrap();
		assert!(!first.is_empty());
		assert_eq!(first, second);
	}

	#[test]
	fn sample_count_is_bounded_by_grid() {
		let sampler = ImageSampler::new(&config(50, 4));
		let solid = DynamicImage::ImageRgba8(RgbaImage::from_pixel(33, 21, Pixel([9, 9, 9, 255])));
		let (w, h) = sampler.working_size(33, 21);
		let samples = sampler.sample(&solid).unwrap();
		assert_eq!(samples.len(), sampler.max_samples(w, h));
		assert!(samples.iter().all(|s| s.x < w as f64 && s.y < h as f64));
	}

	#[test]
	fn transparent_image_is_empty_not_error() {
		let sampler = ImageSampler::new(&config(20, 2));
		let blank = DynamicImage::ImageRgba8(RgbaImage::new(20, 20));
		assert_eq!(sampler.sample(&blank).unwrap(), Vec::new());
	}

	#[test]
	fn zero_sized_image_is_error() {
		let sampler = ImageSampler::new(&config(20, 2));
		let empty = DynamicImage::ImageRgba8(RgbaImage::new(0, 4));
		assert!(matches!(
			sampler.sample(&empty),
			Err(SampleError::EmptyImage { width: 0, height: 4 })
		));
	}

	#[test]
	fn decodes_png_bytes() {
		let mut bytes = Vec::new();
		DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Pixel([0, 0, 255, 255])))
			.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
			.unwrap();

		let sampler = ImageSampler::new(&config(8, 4));
		let samples = sampler.sample_bytes(&bytes).unwrap();
		assert_eq!(samples.len(), 4);
		assert!(samples.iter().all(|s| s.color == [0, 0, 255, 255]));
	}

	#[test]
	fn garbage_bytes_fail_to_decode() {
		let sampler = ImageSampler::new(&config(8, 4));
		assert!(matches!(
			sampler.sample_bytes(b"definitely not a png"),
			Err(SampleError::Decode(_))
		));
	}
}
