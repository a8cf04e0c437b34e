//! A single animated point of the swarm.

use rand::Rng;

use super::config::SwarmConfig;
use super::sampler::{Rgba, Sample};
use super::surface::Surface;

/// Pointer position in canvas-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

/// A particle chasing its target position.
///
/// Velocity is recomputed from the remaining displacement on every tick, so
/// the particle closes a fixed fraction of the gap each frame and approaches
/// its target geometrically rather than arriving at a fixed time.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub target_x: f64,
	pub target_y: f64,
	pub color: Rgba,
	pub velocity_x: f64,
	pub velocity_y: f64,
	pub radius: f64,
	/// Ticks since the fade-in started. Saturates at `duration_steps`.
	age: u32,
	duration_steps: u32,
	influence_radius: f64,
	intensity: f64,
	force_clamp: f64,
}

impl Particle {
	/// Spawn at a random whole-pixel position on the canvas, heading to the target.
	pub fn new<R: Rng>(
		target_x: f64,
		target_y: f64,
		color: Rgba,
		config: &SwarmConfig,
		rng: &mut R,
	) -> Self {
		let x = spawn_coordinate(rng, config.width());
		let y = spawn_coordinate(rng, config.height());
		Self::spawn_at(x, y, target_x, target_y, color, config)
	}

	pub fn from_sample<R: Rng>(sample: &Sample, config: &SwarmConfig, rng: &mut R) -> Self {
		Self::new(sample.x, sample.y, sample.color, config, rng)
	}

	/// Spawn at a known position.
	pub fn spawn_at(
		x: f64,
		y: f64,
		target_x: f64,
		target_y: f64,
		color: Rgba,
		config: &SwarmConfig,
	) -> Self {
		Self {
			x,
			y,
			target_x,
			target_y,
			color,
			velocity_x: 0.0,
			velocity_y: 0.0,
			radius: config.particle_radius,
			age: 0,
			duration_steps: config.duration_steps.max(1),
			influence_radius: config.influence_radius,
			intensity: config.intensity,
			force_clamp: config.force_clamp,
		}
	}

	/// Fade-in progress in `[0, 1]`; exactly `1.0` once `duration_steps` ticks have passed.
	pub fn opacity(&self) -> f64 {
		(self.age as f64 / self.duration_steps as f64).min(1.0)
	}

	pub fn distance_to_target(&self) -> f64 {
		(self.target_x - self.x).hypot(self.target_y - self.y)
	}

	/// Repulsion force scale at distance `d` from the pointer.
	pub fn force_scale(&self, distance: f64) -> f64 {
		(self.influence_radius / distance).min(self.force_clamp)
	}

	/// Advance one tick.
	pub fn update(&mut self, pointer: Option<Pointer>) {
		let steps = self.duration_steps as f64;
		self.velocity_x = (self.target_x - self.x) / steps;
		self.velocity_y = (self.target_y - self.y) / steps;

		if let Some(pointer) = pointer {
			let (dx, dy) = (pointer.x - self.x, pointer.y - self.y);
			// d == 0 gives an infinite ratio that the clamp absorbs, and atan2(0, 0) == 0.
			let force = self.force_scale(dx.hypot(dy)) * self.intensity;
			let angle = dy.atan2(dx);
			self.velocity_x -= angle.cos() * force;
			self.velocity_y -= angle.sin() * force;
		}

		self.x += self.velocity_x;
		self.y += self.velocity_y;

		if self.age < self.duration_steps {
			self.age += 1;
		}
	}

	pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
		let size = self.radius * 2.0;
		surface.fill_rect(self.x, self.y, size, size, self.color, self.opacity());
	}

	/// Point the particle at a new target. Position, velocity and fade-in carry over.
	pub fn retarget(&mut self, target_x: f64, target_y: f64, color: Rgba) {
		self.target_x = target_x;
		self.target_y = target_y;
		self.color = color;
	}

	/// Restart the fade-in.
	pub fn reset_opacity(&mut self) {
		self.age = 0;
	}

	/// Exchange destinations with another particle, leaving both positions alone.
	pub fn swap_targets(&mut self, other: &mut Particle) {
		std::mem::swap(&mut self.target_x, &mut other.target_x);
		std::mem::swap(&mut self.target_y, &mut other.target_y);
		std::mem::swap(&mut self.color, &mut other.color);
	}
}

/// Whole-pixel coordinate in `[0, extent)`; a degenerate canvas spawns at 0.
fn spawn_coordinate<R: Rng>(rng: &mut R, extent: f64) -> f64 {
	if extent > 0.0 {
		rng.gen_range(0.0..extent).floor()
	} else {
		0.0
	}
}
