//! particle-morph: Interactive particle swarm that morphs between image shapes.
//!
//! This crate provides a WASM-based canvas component that samples images into
//! colored points, animates a persistent particle pool between them, and
//! scatters particles away from the pointer.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Only pulled in to enable the `js` entropy backend for `rand` on wasm32.
use getrandom as _;

pub mod components;

pub use components::particle_swarm::{
	AnimationLoop, GalleryManifest, ImageEntry, ImageSampler, Particle, ParticlePool,
	ParticleSwarmCanvas, Pointer, Sample, SampleError, Surface, SwarmConfig,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-morph: logging initialized");
}

/// Text content of the script element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Parse JSON embedded in a script element, falling back to the default.
fn load_json<T: DeserializeOwned + Default>(id: &str) -> T {
	let Some(json_text) = script_text(id) else {
		return T::default();
	};
	match serde_json::from_str::<T>(&json_text) {
		Ok(value) => value,
		Err(e) => {
			warn!("particle-morph: failed to parse #{}: {}", id, e);
			T::default()
		}
	}
}

/// Load simulation parameters from a script element with id="swarm-config".
fn load_config() -> SwarmConfig {
	load_json::<SwarmConfig>("swarm-config").or_default()
}

/// Load the image gallery from a script element with id="swarm-gallery".
/// Expected format: JSON with { default: "name", images: [{ name, src, selectable }] }
fn load_manifest() -> GalleryManifest {
	let manifest: GalleryManifest = load_json("swarm-gallery");
	info!(
		"particle-morph: gallery has {} images",
		manifest.images.len()
	);
	manifest
}

/// Main application component.
/// Loads configuration and gallery from the DOM and renders the swarm.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let manifest = load_manifest();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Particle Morph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="swarm-page">
			<ParticleSwarmCanvas manifest=manifest config=config />
			<p class="subtitle">"Pick a shape below. Move the pointer over the swarm to scatter it."</p>
		</div>
	}
}
