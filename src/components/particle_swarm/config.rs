//! Simulation and sampling parameters.
//!
//! Every tunable of the swarm lives in [`SwarmConfig`] and is passed explicitly
//! into the sampler, particles and pool, so the whole simulation can be run on
//! small synthetic canvases in tests.

use log::warn;
use serde::Deserialize;

use super::error::ConfigError;

/// Immutable configuration shared by the sampler, particles and pool.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
	/// Canvas width in pixels. Also the sampler's working width.
	pub canvas_width: u32,
	/// Canvas height in pixels.
	pub canvas_height: u32,
	/// Grid stride used when walking a rasterized image, on both axes.
	pub stride: u32,
	/// Minimum `r + g + b + a` for a pixel to become a sample.
	pub threshold: u32,
	/// Characteristic response time of the chase motion, in ticks.
	/// Also the length of the fade-in.
	pub duration_steps: u32,
	/// Half the side of the square drawn for each particle.
	pub particle_radius: f64,
	/// Pointer influence radius; repulsion scales as `influence_radius / d`.
	pub influence_radius: f64,
	/// Repulsion strength multiplier.
	pub intensity: f64,
	/// Upper bound on the repulsion force scale as `d -> 0`.
	pub force_clamp: f64,
	/// Restart the fade-in of every particle on retarget.
	pub reset_opacity_on_retarget: bool,
}

impl Default for SwarmConfig {
	fn default() -> Self {
		Self {
			canvas_width: 450,
			canvas_height: 450,
			stride: 5,
			threshold: 100,
			duration_steps: 40,
			particle_radius: 1.2,
			influence_radius: 40.0,
			intensity: 1.5,
			force_clamp: 7.0,
			reset_opacity_on_retarget: false,
		}
	}
}

impl SwarmConfig {
	/// Check the parameters that would otherwise produce divisions by zero,
	/// empty canvases or NaN positions.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.canvas_width == 0 || self.canvas_height == 0 {
			return Err(ConfigError::EmptyCanvas {
				width: self.canvas_width,
				height: self.canvas_height,
			});
		}
		if self.stride == 0 {
			return Err(ConfigError::ZeroStride);
		}
		if self.duration_steps == 0 {
			return Err(ConfigError::ZeroDuration);
		}
		for (name, value) in [
			("particle_radius", self.particle_radius),
			("influence_radius", self.influence_radius),
			("intensity", self.intensity),
			("force_clamp", self.force_clamp),
		] {
			if !value.is_finite() || value < 0.0 {
				return Err(ConfigError::InvalidParameter { name, value });
			}
		}
		Ok(())
	}

	/// Parse a JSON document, filling missing fields from the defaults.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	pub fn width(&self) -> f64 {
		self.canvas_width as f64
	}

	pub fn height(&self) -> f64 {
		self.canvas_height as f64
	}

	/// This config if it validates, otherwise the defaults.
	pub fn or_default(self) -> Self {
		match self.validate() {
			Ok(()) => self,
			Err(e) => {
				warn!("particle-morph: invalid config, using defaults: {}", e);
				Self::default()
			}
		}
	}
}
