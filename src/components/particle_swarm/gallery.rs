//! Named image resources and their cached sample sets.
//!
//! Each manifest entry is sampled once, asynchronously, and the result is kept
//! for every later selection. A failed load leaves the entry unselectable; it
//! never touches the pool of the shape currently on screen.

use std::collections::HashMap;
use std::rc::Rc;

use log::{info, warn};

use super::error::{GalleryError, SampleError};
use super::pool::ParticlePool;
use super::sampler::Sample;
use super::types::{GalleryManifest, ImageEntry};

/// Load progress of one gallery entry.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
	Pending,
	/// Sampled successfully. May be empty if no pixel passed the threshold.
	Ready(Rc<[Sample]>),
	Failed(String),
}

/// The image resource set backing the gallery menu.
pub struct Gallery {
	entries: Vec<ImageEntry>,
	default: Option<String>,
	states: HashMap<String, LoadState>,
}

impl Gallery {
	pub fn new(manifest: GalleryManifest) -> Self {
		let states = manifest
			.images
			.iter()
			.map(|entry| (entry.name.clone(), LoadState::Pending))
			.collect();
		Self {
			entries: manifest.images,
			default: manifest.default,
			states,
		}
	}

	pub fn entries(&self) -> &[ImageEntry] {
		&self.entries
	}

	pub fn default_name(&self) -> Option<&str> {
		self.default.as_deref()
	}

	/// Entries shown in the menu, in manifest order.
	pub fn selectable_entries(&self) -> Vec<ImageEntry> {
		self.entries
			.iter()
			.filter(|entry| entry.selectable)
			.cloned()
			.collect()
	}

	/// Record the outcome of sampling `name`. Results for unknown names are ignored.
	pub fn complete(&mut self, name: &str, result: Result<Vec<Sample>, SampleError>) {
		let Some(state) = self.states.get_mut(name) else {
			warn!("particle-morph: load result for unknown image {:?}", name);
			return;
		};
		*state = match result {
			Ok(samples) => {
				info!("particle-morph: sampled {:?}: {} points", name, samples.len());
				LoadState::Ready(samples.into())
			}
			Err(e) => {
				warn!("particle-morph: {:?} unavailable: {}", name, e);
				LoadState::Failed(e.to_string())
			}
		};
	}

	/// Cached samples for `name`, or why they are not available.
	pub fn samples_for(&self, name: &str) -> Result<Rc<[Sample]>, GalleryError> {
		match self.states.get(name) {
			None => Err(GalleryError::Unknown(name.to_string())),
			Some(LoadState::Pending) => Err(GalleryError::NotLoaded(name.to_string())),
			Some(LoadState::Failed(reason)) => Err(GalleryError::Failed {
				name: name.to_string(),
				reason: reason.clone(),
			}),
			Some(LoadState::Ready(samples)) => Ok(samples.clone()),
		}
	}

	/// Morph `pool` into the shape of `name`. On error the pool is left as is.
	pub fn select(&self, name: &str, pool: &mut ParticlePool) -> Result<(), GalleryError> {
		let samples = self.samples_for(name)?;
		pool.retarget(&samples);
		Ok(())
	}
}
