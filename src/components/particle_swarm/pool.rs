//! The live particle set and its retargeting logic.
//!
//! Created once when the component mounts, then mutated by the animation loop
//! (`tick`), pointer handlers and gallery selections (`retarget`). All three run
//! on the browser event loop, so none can interleave with another.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::SwarmConfig;
use super::particle::{Particle, Pointer};
use super::sampler::Sample;
use super::surface::Surface;

/// Particles bound to one canvas, plus the pointer they react to.
pub struct ParticlePool {
	particles: Vec<Particle>,
	pointer: Option<Pointer>,
	config: SwarmConfig,
	rng: SmallRng,
}

impl ParticlePool {
	pub fn new(config: SwarmConfig) -> Self {
		Self::with_rng(config, SmallRng::from_entropy())
	}

	/// Deterministic pool for tests and reproducible demos.
	pub fn with_seed(config: SwarmConfig, seed: u64) -> Self {
		Self::with_rng(config, SmallRng::seed_from_u64(seed))
	}

	fn with_rng(config: SwarmConfig, rng: SmallRng) -> Self {
		Self {
			particles: Vec::new(),
			pointer: None,
			config,
			rng,
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn pointer(&self) -> Option<Pointer> {
		self.pointer
	}

	pub fn set_pointer(&mut self, pointer: Option<Pointer>) {
		self.pointer = pointer;
	}

	/// Record a pointer move given client coordinates and the canvas origin.
	pub fn pointer_move(&mut self, client_x: f64, client_y: f64, left: f64, top: f64) {
		self.pointer = Some(Pointer {
			x: client_x - left,
			y: client_y - top,
		});
	}

	pub fn pointer_leave(&mut self) {
		self.pointer = None;
	}

	/// Morph the pool towards a new sample set.
	///
	/// Existing particles keep their position and velocity and only receive new
	/// destinations; missing ones spawn at random, surplus ones are dropped.
	/// Destinations are then shuffled across the pool so particles cross paths
	/// instead of sliding as a rigid grid.
	pub fn retarget(&mut self, samples: &[Sample]) {
		if self.particles.is_empty() {
			self.particles = samples
				.iter()
				.map(|s| Particle::from_sample(s, &self.config, &mut self.rng))
				.collect();
			debug!("particle-morph: spawned {} particles", self.particles.len());
			return;
		}

		let old_len = self.particles.len();
		for (idx, sample) in samples.iter().enumerate() {
			match self.particles.get_mut(idx) {
				Some(particle) => {
					particle.retarget(sample.x, sample.y, sample.color);
					if self.config.reset_opacity_on_retarget {
						particle.reset_opacity();
					}
				}
				None => self
					.particles
					.push(Particle::from_sample(sample, &self.config, &mut self.rng)),
			}
		}
		self.particles.truncate(samples.len());

		self.shuffle_targets();
		debug!(
			"particle-morph: retargeted {} -> {} particles",
			old_len,
			self.particles.len()
		);
	}

	/// Fisher-Yates over destinations only; positions stay where they are.
	fn shuffle_targets(&mut self) {
		for bound in (1..self.particles.len()).rev() {
			let pick = self.rng.gen_range(0..=bound);
			if pick == bound {
				continue;
			}
			let (head, tail) = self.particles.split_at_mut(bound);
			head[pick].swap_targets(&mut tail[0]);
		}
	}

	/// Clear the canvas, then advance and draw every particle.
	pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
		surface.clear_rect(0.0, 0.0, self.config.width(), self.config.height());
		let pointer = self.pointer;
		for particle in &mut self.particles {
			particle.update(pointer);
			particle.draw(surface);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_swarm::sampler::Rgba;
	use crate::components::particle_swarm::surface::recording::{Command, RecordingSurface};

	fn pool() -> ParticlePool {
		ParticlePool::with_seed(SwarmConfig::default(), 42)
	}

	fn samples(n: usize) -> Vec<Sample> {
		(0..n)
			.map(|i| Sample::new(i as f64 * 3.0, 400.0 - i as f64, [i as u8, 255 - i as u8, 7, 255]))
			.collect()
	}

	/// Sorted (target, color) triples, for permutation comparisons.
	fn destinations(particles: &[Particle]) -> Vec<(u64, u64, Rgba)> {
		let mut out: Vec<_> = particles
			.iter()
			.map(|p| (p.target_x.to_bits(), p.target_y.to_bits(), p.color))
			.collect();
		out.sort();
		out
	}

	fn sample_destinations(samples: &[Sample]) -> Vec<(u64, u64, Rgba)> {
		let mut out: Vec<_> = samples
			.iter()
			.map(|s| (s.x.to_bits(), s.y.to_bits(), s.color))
			.collect();
		out.sort();
		out
	}

	#[test]
	fn empty_pool_spawns_one_particle_per_sample() {
		let mut pool = pool();
		let input = [
			Sample::new(10.0, 10.0, [255, 0, 0, 255]),
			Sample::new(20.0, 20.0, [0, 255, 0, 255]),
			Sample::new(30.0, 30.0, [0, 0, 255, 255]),
		];
		pool.retarget(&input);

		assert_eq!(pool.len(), 3);
		for (particle, sample) in pool.particles().iter().zip(&input) {
			assert_eq!(particle.target_x, sample.x);
			assert_eq!(particle.target_y, sample.y);
			assert_eq!(particle.color, sample.color);
			assert!((0.0..450.0).contains(&particle.x));
			assert!((0.0..450.0).contains(&particle.y));
		}
	}

	#[test]
	fn growth_keeps_existing_positions() {
		let mut pool = pool();
		pool.retarget(&samples(4));
		for _ in 0..3 {
			pool.tick(&mut RecordingSurface::default());
		}
		let before: Vec<(f64, f64)> = pool.particles().iter().map(|p| (p.x, p.y)).collect();

		let next = samples(9);
		pool.retarget(&next);

		assert_eq!(pool.len(), 9);
		let after: Vec<(f64, f64)> = pool.particles()[..4].iter().map(|p| (p.x, p.y)).collect();
		assert_eq!(before, after);
		assert_eq!(destinations(pool.particles()), sample_destinations(&next));
	}

	#[test]
	fn shrink_truncates_without_moving_survivors() {
		let mut pool = pool();
		pool.retarget(&samples(5));
		let before: Vec<(f64, f64)> = pool.particles().iter().map(|p| (p.x, p.y)).collect();

		let next = samples(2);
		pool.retarget(&next);

		assert_eq!(pool.len(), 2);
		let after: Vec<(f64, f64)> = pool.particles().iter().map(|p| (p.x, p.y)).collect();
		assert_eq!(&before[..2], &after[..]);
		assert_eq!(destinations(pool.particles()), sample_destinations(&next));
	}

	#[test]
	fn shuffle_is_a_permutation_of_samples() {
		let mut pool = pool();
		pool.retarget(&samples(50));
		for n in [50, 80, 13, 13, 1] {
			let next: Vec<Sample> = samples(n).into_iter().rev().collect();
			pool.retarget(&next);
			assert_eq!(pool.len(), n);
			assert_eq!(destinations(pool.particles()), sample_destinations(&next));
		}
	}

	#[test]
	fn shuffle_actually_redistributes() {
		let mut pool = pool();
		let input = samples(64);
		pool.retarget(&input);
		pool.retarget(&input);
		let moved = pool
			.particles()
			.iter()
			.zip(&input)
			.filter(|(p, s)| p.target_x != s.x)
			.count();
		assert!(moved > 32, "only {} of 64 destinations moved", moved);
	}

	#[test]
	fn duplicate_samples_are_not_aliased() {
		let mut pool = pool();
		let same = Sample::new(1.0, 1.0, [5, 5, 5, 255]);
		pool.retarget(&[same, same]);
		pool.retarget(&[Sample::new(2.0, 2.0, [9, 9, 9, 255]), same]);
		let colors: Vec<Rgba> = pool.particles().iter().map(|p| p.color).collect();
		assert!(colors.contains(&[9, 9, 9, 255]));
		assert!(colors.contains(&[5, 5, 5, 255]));
	}

	#[test]
	fn empty_sample_set_clears_pool() {
		let mut pool = pool();
		pool.retarget(&samples(3));
		pool.retarget(&[]);
		assert!(pool.is_empty());
		pool.retarget(&[]);
		assert!(pool.is_empty());
	}

	#[test]
	fn opacity_carries_over_by_default() {
		let mut pool = pool();
		pool.retarget(&samples(3));
		for _ in 0..40 {
			pool.tick(&mut RecordingSurface::default());
		}
		pool.retarget(&samples(5));
		let opacities: Vec<f64> = pool.particles().iter().map(|p| p.opacity()).collect();
		assert!(opacities[..3].iter().all(|&o| o == 1.0));
		assert!(opacities[3..].iter().all(|&o| o == 0.0));
	}

	#[test]
	fn opacity_resets_when_configured() {
		let config = SwarmConfig {
			reset_opacity_on_retarget: true,
			..SwarmConfig::default()
		};
		let mut pool = ParticlePool::with_seed(config, 1);
		pool.retarget(&samples(3));
		for _ in 0..40 {
			pool.tick(&mut RecordingSurface::default());
		}
		pool.retarget(&samples(3));
		assert!(pool.particles().iter().all(|p| p.opacity() == 0.0));
	}

	#[test]
	fn degenerate_canvas_does_not_panic_on_retarget() {
		for (width, height) in [(0, 450), (450, 0), (0, 0)] {
			let config = SwarmConfig {
				canvas_width: width,
				canvas_height: height,
				..SwarmConfig::default()
			};
			let mut pool = ParticlePool::with_seed(config, 1);
			pool.retarget(&[Sample::new(1.0, 1.0, [255; 4])]);
			pool.retarget(&samples(3));
			pool.tick(&mut RecordingSurface::default());
			assert_eq!(pool.len(), 3);
		}
	}

	#[test]
	fn pointer_is_canvas_local_and_clears_on_leave() {
		let mut pool = pool();
		assert_eq!(pool.pointer(), None);
		pool.pointer_move(130.0, 250.0, 100.0, 200.0);
		assert_eq!(pool.pointer(), Some(Pointer { x: 30.0, y: 50.0 }));
		pool.pointer_move(100.0, 200.0, 100.0, 200.0);
		assert_eq!(pool.pointer(), Some(Pointer { x: 0.0, y: 0.0 }));
		pool.pointer_leave();
		assert_eq!(pool.pointer(), None);
	}

	#[test]
	fn tick_clears_then_draws_in_order() {
		let mut pool = pool();
		pool.retarget(&samples(3));
		let mut surface = RecordingSurface::default();
		pool.tick(&mut surface);

		assert_eq!(surface.commands.len(), 4);
		assert_eq!(
			surface.commands[0],
			Command::Clear {
				width: 450.0,
				height: 450.0
			}
		);
		for (command, particle) in surface.commands[1..].iter().zip(pool.particles()) {
			assert_eq!(
				*command,
				Command::Fill {
					x: particle.x,
					y: particle.y,
					size: 2.4,
					color: particle.color,
					opacity: 1.0 / 40.0,
				}
			);
		}
	}

	#[test]
	fn tick_applies_pointer_to_every_particle() {
		let mut pool = pool();
		pool.retarget(&samples(6));
		let mut still = ParticlePool::with_seed(SwarmConfig::default(), 42);
		still.retarget(&samples(6));

		pool.set_pointer(Some(Pointer { x: 225.0, y: 225.0 }));
		pool.tick(&mut RecordingSurface::default());
		still.tick(&mut RecordingSurface::default());

		for (pushed, free) in pool.particles().iter().zip(still.particles()) {
			assert_ne!((pushed.x, pushed.y), (free.x, free.y));
		}
	}
}
