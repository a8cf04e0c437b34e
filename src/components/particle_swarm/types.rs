//! Gallery manifest structures for input to the swarm component.

use serde::Deserialize;

/// One image that can be turned into a swarm shape.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ImageEntry {
	/// Stable identifier, shown as the menu label.
	pub name: String,
	/// URL the browser loads the image from.
	pub src: String,
	/// Whether the entry appears in the gallery menu.
	/// Non-selectable entries can still be the default shape.
	#[serde(default = "default_selectable")]
	pub selectable: bool,
}

fn default_selectable() -> bool {
	true
}

/// Complete gallery: the images plus the shape shown on startup.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GalleryManifest {
	/// Name of the entry applied as soon as it loads.
	#[serde(default)]
	pub default: Option<String>,
	#[serde(default)]
	pub images: Vec<ImageEntry>,
}
