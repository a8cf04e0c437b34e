//! Leptos component wrapping the particle swarm canvas.
//!
//! The component creates the canvas and a menu of selectable gallery images,
//! starts loading every image in the manifest, and runs the simulation through
//! an [`AnimationLoop`]. Pool, gallery and loop state are shared between the
//! frame callback, the pointer handlers and the load callbacks via `Rc<RefCell>`;
//! all of them run on the browser event loop.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::animation::AnimationLoop;
use super::config::SwarmConfig;
use super::gallery::Gallery;
use super::loader::load_image;
use super::pool::ParticlePool;
use super::types::GalleryManifest;

/// Renders the particle swarm and its gallery menu.
///
/// Every manifest image is loaded and sampled in the background. The default
/// entry (if any) is shown as soon as it is ready, unless the user has already
/// picked something. Menu buttons stay disabled until their image is sampled.
#[component]
pub fn ParticleSwarmCanvas(
	manifest: GalleryManifest,
	#[prop(optional)] config: SwarmConfig,
) -> impl IntoView {
	let config = config.or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let pool = Rc::new(RefCell::new(ParticlePool::new(config.clone())));
	let gallery = Rc::new(RefCell::new(Gallery::new(manifest)));
	let animation: Rc<RefCell<Option<AnimationLoop>>> = Rc::new(RefCell::new(None));

	let active = RwSignal::new(None::<String>);
	let ready = RwSignal::new(Vec::<String>::new());

	let (entries, default) = {
		let gallery = gallery.borrow();
		(
			gallery.entries().to_vec(),
			gallery.default_name().map(str::to_string),
		)
	};
	for entry in entries {
		let (gallery_done, pool_done, default_done) = (gallery.clone(), pool.clone(), default.clone());
		let name = entry.name;
		load_image(&entry.src, &config, move |result| {
			let loaded = result.is_ok();
			gallery_done.borrow_mut().complete(&name, result);
			if !loaded {
				return;
			}
			// The component may already be gone when a slow image finishes.
			let _ = ready.try_update(|names| names.push(name.clone()));

			let is_default = default_done.as_deref() == Some(name.as_str());
			if is_default && active.try_get_untracked().flatten().is_none() {
				if let Err(e) = gallery_done.borrow().select(&name, &mut pool_done.borrow_mut()) {
					warn!("particle-morph: default shape unavailable: {}", e);
				}
			}
		});
	}

	let (pool_init, animation_init) = (pool.clone(), animation.clone());
	let (width, height) = (config.canvas_width, config.canvas_height);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if animation_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(width);
		canvas.set_height(height);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
			_ => None,
		};
		let Some(mut ctx) = ctx else {
			error!("particle-morph: canvas 2d context unavailable");
			return;
		};

		let pool_anim = pool_init.clone();
		match AnimationLoop::start(move || pool_anim.borrow_mut().tick(&mut ctx)) {
			Some(handle) => *animation_init.borrow_mut() = Some(handle),
			None => error!("particle-morph: failed to start animation loop"),
		}
		info!("particle-morph: canvas ready ({}x{})", width, height);
	});

	let pool_mm = pool.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		pool_mm.borrow_mut().pointer_move(
			ev.client_x() as f64,
			ev.client_y() as f64,
			rect.left(),
			rect.top(),
		);
	};

	let pool_ml = pool.clone();
	let on_mouseleave = move |_: MouseEvent| {
		pool_ml.borrow_mut().pointer_leave();
	};

	let selectable = gallery.borrow().selectable_entries();
	let options = selectable
		.into_iter()
		.map(|entry| {
			let (gallery_click, pool_click) = (gallery.clone(), pool.clone());
			let name = entry.name;
			let (name_active, name_ready, label) = (name.clone(), name.clone(), name.clone());
			let alt = name.clone();
			let on_click = move |_: MouseEvent| {
				match gallery_click.borrow().select(&name, &mut pool_click.borrow_mut()) {
					Ok(()) => active.set(Some(name.clone())),
					Err(e) => warn!("particle-morph: cannot select {:?}: {}", name, e),
				}
			};
			view! {
				<button
					class="swarm-option"
					class:active=move || active.with(|a| a.as_deref() == Some(name_active.as_str()))
					disabled=move || !ready.with(|names| names.contains(&name_ready))
					on:click=on_click
				>
					<img class="swarm-thumb" src=entry.src alt=alt width="48" height="48" />
					<span class="swarm-label">{label}</span>
				</button>
			}
		})
		.collect_view();

	view! {
		<div class="particle-swarm">
			<canvas
				node_ref=canvas_ref
				class="particle-swarm-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				style="display: block;"
			/>
			<div class="swarm-options">{options}</div>
		</div>
	}
}
