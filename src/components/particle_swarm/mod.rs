//! Image-morphing particle swarm.
//!
//! Renders a swarm of particles on an HTML canvas that:
//! - Samples source images into sparse sets of colored points
//! - Chases those points with eased, per-tick recomputed motion
//! - Morphs between shapes by retargeting the live particles instead of respawning them
//! - Scatters away from the pointer with a clamped repulsion field
//!
//! The simulation core ([`ImageSampler`], [`Particle`], [`ParticlePool`]) has
//! no browser dependencies beyond the [`Surface`] it draws on, and can be
//! ticked at any cadence. [`AnimationLoop`] and [`ParticleSwarmCanvas`] bind it
//! to `requestAnimationFrame` and the DOM.
//!
//! # Example
//!
//! ```ignore
//! use particle_morph::{GalleryManifest, ImageEntry, ParticleSwarmCanvas};
//!
//! let manifest = GalleryManifest {
//!     default: Some("logo".into()),
//!     images: vec![
//!         ImageEntry { name: "logo".into(), src: "assets/logo.png".into(), selectable: false },
//!         ImageEntry { name: "rust".into(), src: "assets/rust.png".into(), selectable: true },
//!     ],
//! };
//!
//! view! { <ParticleSwarmCanvas manifest=manifest /> }
//! ```

mod animation;
mod component;
pub mod config;
mod error;
mod gallery;
mod loader;
mod particle;
mod pool;
mod sampler;
mod surface;
mod types;

pub use animation::AnimationLoop;
pub use component::ParticleSwarmCanvas;
pub use config::SwarmConfig;
pub use error::{ConfigError, GalleryError, SampleError};
pub use gallery::{Gallery, LoadState};
pub use loader::{load_image, rasterize};
pub use particle::{Particle, Pointer};
pub use pool::ParticlePool;
pub use sampler::{ImageSampler, Rgba, Sample};
pub use surface::{Surface, css_rgba};
pub use types::{GalleryManifest, ImageEntry};
