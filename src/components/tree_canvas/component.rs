use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{TreeCanvasState, ZOOM_STEP};
use crate::lineage::{HighlightPaths, PositionedGraph};

fn viewport(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Pointer position relative to the canvas.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn with_state<R>(
	state: &Rc<RefCell<Option<TreeCanvasState>>>,
	f: impl FnOnce(&mut TreeCanvasState) -> R,
) -> Option<R> {
	state.borrow_mut().as_mut().map(f)
}

#[component]
pub fn TreeCanvas(
	#[prop(into)] graph: Signal<PositionedGraph>,
	#[prop(into)] highlight: Signal<HighlightPaths>,
	#[prop(into)] physics: Signal<bool>,
	#[prop(into)] on_select: Callback<String>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<TreeCanvasState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			viewport(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			return;
		};

		let mut initial = TreeCanvasState::new(&graph.get_untracked(), physics.get_untracked(), w, h);
		initial.set_highlight(highlight.get_untracked());
		*state_init.borrow_mut() = Some(initial);

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_graph = state.clone();
	Effect::new(move |prev: Option<()>| {
		let data = graph.get();
		// The first run happens alongside initialisation, which already used `data`.
		if prev.is_none() {
			return;
		}
		if let Some(ref mut s) = *state_graph.borrow_mut() {
			debug!("re-rendering {} nodes", data.nodes.len());
			s.rebuild(&data);
		}
	});

	let state_highlight = state.clone();
	Effect::new(move |_| {
		let paths = highlight.get();
		with_state(&state_highlight, |s| s.set_highlight(paths));
	});

	let state_physics = state.clone();
	Effect::new(move |_| {
		let on = physics.get();
		with_state(&state_physics, |s| s.set_physics(on));
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(canvas_ref, &ev) {
			with_state(&state_md, |s| s.press(x, y));
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = local_point(canvas_ref, &ev) {
			with_state(&state_mm, |s| s.pointer_moved(x, y));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		// The borrow ends before the callback, which may update the highlight.
		if let Some(id) = with_state(&state_mu, TreeCanvasState::release).flatten() {
			on_select.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_state(&state_ml, TreeCanvasState::leave);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = local_point(canvas_ref, &ev) {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			with_state(&state_wh, |s| s.zoom_at(x, y, factor));
		}
	};

	let (state_zi, state_zo, state_fit) = (state.clone(), state.clone(), state.clone());
	let zoom_in = move |_: MouseEvent| {
		with_state(&state_zi, |s| s.zoom_centre(ZOOM_STEP));
	};
	let zoom_out = move |_: MouseEvent| {
		with_state(&state_zo, |s| s.zoom_centre(1.0 / ZOOM_STEP));
	};
	let fit = move |_: MouseEvent| {
		with_state(&state_fit, TreeCanvasState::fit_view);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="tree-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<div class="canvas-controls">
			<button title="Zoom in" on:click=zoom_in>"+"</button>
			<button title="Zoom out" on:click=zoom_out>"−"</button>
			<button title="Fit view" on:click=fit>"⤢"</button>
		</div>
	}
}
