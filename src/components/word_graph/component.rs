//! The interactive word graph canvas component.
//!
//! Derives the node/link model from the edge list (memoized), rebuilds the
//! simulation whenever that model changes, and drives rendering from a
//! `requestAnimationFrame` loop. An empty model builds no simulation at all.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::model::GraphModel;
use super::render;
use super::state::{WordGraphState, ZOOM_MAX, ZOOM_MIN};
use super::types::GraphData;

const DEFAULT_WIDTH: f64 = 1200.0;
const DEFAULT_HEIGHT: f64 = 800.0;

/// Cursor position relative to the canvas.
fn event_position(ev: &MouseEvent, canvas: &HtmlCanvasElement) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

#[component]
pub fn WordGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let (w, h) = (
		width.unwrap_or(DEFAULT_WIDTH),
		height.unwrap_or(DEFAULT_HEIGHT),
	);

	let model = Memo::new(move |_| GraphModel::derive(&data.get()));

	let state: Rc<RefCell<Option<WordGraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let running = Arc::new(AtomicBool::new(true));
	let loop_started = Rc::new(Cell::new(false));
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	// Stop the rAF loop when the component is removed; dropping the state
	// afterwards stops the simulation itself.
	let running_cleanup = running.clone();
	on_cleanup(move || running_cleanup.store(false, Ordering::Relaxed));

	// Rebuild the simulation whenever the derived model changes. The old
	// state (and its simulation) is dropped in the swap; an empty model
	// performs no simulation setup.
	let state_model = state.clone();
	Effect::new(move |_| {
		let m = model.get();
		*state_model.borrow_mut() = if m.is_empty() {
			None
		} else {
			Some(WordGraphState::new(&m, w, h))
		};
	});

	// Start the render loop once the canvas is mounted.
	let (state_anim, animate_init, running_anim, loop_guard) = (
		state.clone(),
		animate.clone(),
		running.clone(),
		loop_started.clone(),
	);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if loop_guard.replace(true) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let window: Window = web_sys::window().unwrap();

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let (state_inner, animate_inner, running_inner) = (
			state_anim.clone(),
			animate_init.clone(),
			running_anim.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !running_inner.load(Ordering::Relaxed) {
				return;
			}
			if let Some(ref mut s) = *state_inner.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			} else {
				render::render_empty(&ctx, w, h);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&ev, &canvas);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&ev, &canvas);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					// Pin the dragged node; the simulation keeps running so
					// the rest of the graph reacts to it.
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			} else {
				s.set_hover(x, y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			// Release the pin so the node rejoins the simulation.
			if let Some(idx) = s.drag.node_idx {
				s.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = false;
					}
				});
			}
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			if let Some(idx) = s.drag.node_idx {
				s.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.is_anchor = false;
					}
				});
			}
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.clear_hover();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = event_position(&ev, &canvas);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(ZOOM_MIN, ZOOM_MAX);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="word-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
