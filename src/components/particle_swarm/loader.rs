//! Browser image loading.
//!
//! Images are fetched through an `HtmlImageElement`, drawn at the sampler's
//! working size into a detached canvas and read back with `getImageData`. The
//! browser does the decoding and scaling; sampling runs on the pixel buffer.

use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::config::SwarmConfig;
use super::error::SampleError;
use super::sampler::{ImageSampler, Sample};

type Done = Box<dyn FnOnce(Result<Vec<Sample>, SampleError>)>;

/// Load and sample `src`. `on_done` runs exactly once, after the image has
/// loaded or failed, and never before `load_image` returns.
pub fn load_image<F>(src: &str, config: &SwarmConfig, on_done: F)
where
	F: FnOnce(Result<Vec<Sample>, SampleError>) + 'static,
{
	let image = match HtmlImageElement::new() {
		Ok(image) => image,
		Err(e) => {
			let err = SampleError::Raster(js_message(&e));
			spawn_local(async move { on_done(Err(err)) });
			return;
		}
	};
	image.set_cross_origin(Some(""));

	// Shared so whichever of load/error fires first consumes it.
	let on_done: Done = Box::new(on_done);
	let done = Rc::new(RefCell::new(Some(on_done)));
	let sampler = ImageSampler::new(config);

	let (done_load, image_load) = (done.clone(), image.clone());
	let on_load = Closure::once_into_js(move || {
		let callback = done_load.borrow_mut().take();
		if let Some(callback) = callback {
			callback(rasterize(&image_load, &sampler));
		}
	});

	let (done_error, src_error) = (done, src.to_string());
	let on_error = Closure::once_into_js(move || {
		let callback = done_error.borrow_mut().take();
		if let Some(callback) = callback {
			callback(Err(SampleError::Load { src: src_error }));
		}
	});

	image.set_onload(Some(on_load.unchecked_ref()));
	image.set_onerror(Some(on_error.unchecked_ref()));
	image.set_src(src);
}

/// Draw a loaded image into an offscreen canvas and sample its pixels.
pub fn rasterize(
	image: &HtmlImageElement,
	sampler: &ImageSampler,
) -> Result<Vec<Sample>, SampleError> {
	let (natural_width, natural_height) = (image.natural_width(), image.natural_height());
	if natural_width == 0 || natural_height == 0 {
		return Err(SampleError::EmptyImage {
			width: natural_width,
			height: natural_height,
		});
	}

	let (width, height) = sampler.working_size(natural_width, natural_height);
	if height == 0 {
		return Ok(Vec::new());
	}

	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| SampleError::Raster("no document".into()))?;
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")
		.map_err(|e| SampleError::Raster(js_message(&e)))?
		.dyn_into()
		.map_err(|_| SampleError::Raster("created element is not a canvas".into()))?;
	canvas.set_width(width);
	canvas.set_height(height);

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.map_err(|e| SampleError::Raster(js_message(&e)))?
		.ok_or_else(|| SampleError::Raster("2d context unavailable".into()))?
		.dyn_into()
		.map_err(|_| SampleError::Raster("unexpected context type".into()))?;

	ctx.draw_image_with_html_image_element_and_dw_and_dh(
		image,
		0.0,
		0.0,
		width as f64,
		height as f64,
	)
	.map_err(|e| SampleError::Raster(js_message(&e)))?;

	// Throws on a cross-origin image without CORS headers.
	let data = ctx
		.get_image_data(0.0, 0.0, width as f64, height as f64)
		.map_err(|e| SampleError::Raster(js_message(&e)))?;

	let bitmap = RgbaImage::from_raw(width, height, data.data().0)
		.ok_or_else(|| SampleError::Raster("pixel buffer size mismatch".into()))?;
	Ok(sampler.sample_bitmap(&bitmap))
}

/// Best-effort human readable message for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
	value
		.dyn_ref::<js_sys::Error>()
		.map(|e| String::from(e.message()))
		.or_else(|| value.as_string())
		.unwrap_or_else(|| format!("{:?}", value))
}
