//! `requestAnimationFrame` driver.
//!
//! The simulation only exposes `tick`; this module is what calls it once per
//! display refresh in the browser. Tests drive `tick` directly instead.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running frame loop. Stops when [`stop`](Self::stop) is called or the
/// handle is dropped.
pub struct AnimationLoop {
	callback: FrameCallback,
	frame: Rc<Cell<Option<i32>>>,
	running: Rc<Cell<bool>>,
}

impl AnimationLoop {
	/// Start calling `tick` every frame. Returns `None` outside a browser window.
	pub fn start<F>(mut tick: F) -> Option<Self>
	where
		F: FnMut() + 'static,
	{
		let window = web_sys::window()?;
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let frame = Rc::new(Cell::new(None));
		let running = Rc::new(Cell::new(true));

		// The closure only holds a weak reference to its own slot so dropping the
		// handle frees it.
		let slot: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&callback);
		let (frame_inner, running_inner) = (frame.clone(), running.clone());
		*callback.borrow_mut() = Some(Closure::new(move || {
			frame_inner.set(None);
			if !running_inner.get() {
				return;
			}
			tick();
			// `tick` may have stopped the loop.
			if !running_inner.get() {
				return;
			}
			if let (Some(slot), Some(window)) = (slot.upgrade(), web_sys::window()) {
				frame_inner.set(request_frame(&window, &slot));
			}
		}));

		frame.set(Some(request_frame(&window, &callback)?));
		debug!("particle-morph: animation loop started");

		Some(Self {
			callback,
			frame,
			running,
		})
	}

	pub fn is_running(&self) -> bool {
		self.running.get()
	}

	/// Cancel the pending frame. Safe to call from inside the tick callback.
	pub fn stop(&self) {
		if !self.running.replace(false) {
			return;
		}
		if let (Some(id), Some(window)) = (self.frame.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		debug!("particle-morph: animation loop stopped");
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.stop();
		self.callback.borrow_mut().take();
	}
}

fn request_frame(window: &Window, slot: &RefCell<Option<Closure<dyn FnMut()>>>) -> Option<i32> {
	let slot = slot.borrow();
	let callback = slot.as_ref()?;
	match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
		Ok(id) => Some(id),
		Err(e) => {
			warn!("particle-morph: requestAnimationFrame failed: {:?}", e);
			None
		}
	}
}
