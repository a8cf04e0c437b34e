//! The 2D drawing surface the swarm renders onto.

use web_sys::CanvasRenderingContext2d;

use super::sampler::Rgba;

/// Minimal raster surface: clear a rectangle, fill a rectangle.
pub trait Surface {
	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

	/// Fill a rectangle with `color`, its alpha channel scaled by `opacity`.
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba, opacity: f64);
}

/// CSS `rgba()` string for a color, with alpha = `a / 255 * opacity`.
pub fn css_rgba(color: Rgba, opacity: f64) -> String {
	let [r, g, b, a] = color;
	let alpha = (a as f64 / 255.0 * opacity).clamp(0.0, 1.0);
	format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

impl Surface for CanvasRenderingContext2d {
	fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba, opacity: f64) {
		self.set_fill_style_str(&css_rgba(color, opacity));
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}
}
