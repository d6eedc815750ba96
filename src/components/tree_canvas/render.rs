use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::TreeCanvasState;
use crate::config::{NODE_HEIGHT, NODE_WIDTH};
use crate::lineage::LayoutDirection;

const BACKGROUND: &str = "#f8fafc";
const DOT_COLOR: &str = "#aaaaaa";
const TEXT_COLOR: &str = "#1a202c";
const CORNER_RADIUS: f64 = 8.0;
const DOT_GAP: f64 = 16.0;
const MINIMAP_MASK: &str = "rgba(240, 240, 240, 0.6)";
const MINIMAP_BORDER: &str = "#cbd5e1";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
	from + (to - from) * t
}

pub fn render(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_dots(state, ctx);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_minimap(state, ctx);
}

fn draw_dots(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	// Coarsen the grid when zoomed out so dots stay at least 12px apart.
	let mut gap = DOT_GAP;
	while gap * k < 12.0 {
		gap *= 2.0;
	}
	let (x0, y0) = state.screen_to_graph(0.0, 0.0);
	let (x1, y1) = state.screen_to_graph(state.width, state.height);
	let size = 1.0 / k;

	ctx.set_fill_style_str(DOT_COLOR);
	ctx.begin_path();
	let mut x = (x0 / gap).floor() * gap;
	while x <= x1 {
		let mut y = (y0 / gap).floor() * gap;
		while y <= y1 {
			ctx.rect(x, y, size, size);
			y += gap;
		}
		x += gap;
	}
	ctx.fill();
}

/// Orthogonal "step" route between two node centres.
fn step_route(direction: LayoutDirection, (x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> [(f64, f64); 4] {
	match direction {
		LayoutDirection::TopBottom => {
			let (sy, ty) = (y1 + NODE_HEIGHT / 2.0, y2 - NODE_HEIGHT / 2.0);
			let mid = (sy + ty) / 2.0;
			[(x1, sy), (x1, mid), (x2, mid), (x2, ty)]
		}
		LayoutDirection::LeftRight => {
			let (sx, tx) = (x1 + NODE_WIDTH / 2.0, x2 - NODE_WIDTH / 2.0);
			let mid = (sx + tx) / 2.0;
			[(sx, y1), (mid, y1), (mid, y2), (tx, y2)]
		}
	}
}

fn draw_edges(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	let (dash, gap) = (5.0, 5.0);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.highlight.t);
	let paths = state.active_paths();

	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
	ctx.set_line_dash_offset(dash_offset);

	state.graph.visit_edges(|n1, n2, _| {
		let (source, target) = (&n1.data.user_data, &n2.data.user_data);
		let palette = source.palette;
		let up = paths.is_some_and(|p| p.edge_up(&source.id, &target.id));
		let down = paths.is_some_and(|p| p.edge_down(&source.id, &target.id));
		let on_path = up || down;

		let alpha = match paths {
			Some(_) if !on_path => lerp(1.0, 0.2, t),
			_ => 1.0,
		};
		let stroke = if down && !up { palette.secondary } else { palette.primary };

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(stroke);
		ctx.set_line_width(if on_path { 2.0 + t } else { 2.0 });

		let route = step_route(
			state.direction,
			(n1.x() as f64, n1.y() as f64),
			(n2.x() as f64, n2.y() as f64),
		);
		ctx.begin_path();
		ctx.move_to(route[0].0, route[0].1);
		for &(x, y) in &route[1..] {
			ctx.line_to(x, y);
		}
		ctx.stroke();
	});

	ctx.set_global_alpha(1.0);
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_nodes(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.highlight.t);
	let paths = state.active_paths();

	ctx.set_text_align("center");
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let palette = info.palette;
		let (cx, cy) = (node.x() as f64, node.y() as f64);
		let (x, y) = (cx - NODE_WIDTH / 2.0, cy - NODE_HEIGHT / 2.0);

		let up = paths.is_some_and(|p| p.up.contains(&info.id));
		let down = paths.is_some_and(|p| p.down.contains(&info.id));
		let on_path = up || down;
		let hovered = state.hovered == Some(node.index());

		let alpha = match paths {
			Some(_) if !on_path => lerp(1.0, 0.4, t),
			_ => 1.0,
		};
		let fill = if up {
			format!("{}22", palette.primary)
		} else if down || hovered {
			format!("{}22", palette.secondary)
		} else {
			palette.background.to_string()
		};
		let border = if down && !up { palette.secondary } else { palette.primary };
		let border_width = if on_path || hovered { 3.0 } else { 2.0 };

		ctx.set_global_alpha(alpha);
		if on_path && t > 0.01 {
			ctx.set_shadow_color(&format!("{}44", palette.primary));
			ctx.set_shadow_blur(12.0 * t);
			ctx.set_shadow_offset_y(4.0);
		}
		rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, CORNER_RADIUS);
		// Opaque base first so translucent tints do not show edges underneath.
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill();
		ctx.set_shadow_color("transparent");
		ctx.set_fill_style_str(&fill);
		ctx.fill();
		ctx.set_stroke_style_str(border);
		ctx.set_line_width(border_width);
		ctx.stroke();

		ctx.set_fill_style_str(TEXT_COLOR);
		ctx.set_font("bold 14px sans-serif");
		let _ = ctx.fill_text_with_max_width(&info.name, cx, cy - 4.0, NODE_WIDTH - 16.0);
		ctx.set_global_alpha(alpha * 0.8);
		ctx.set_font("12px sans-serif");
		let _ = ctx.fill_text_with_max_width(&info.caption, cx, cy + 16.0, NODE_WIDTH - 16.0);
		ctx.set_global_alpha(1.0);
	});
}

/// Overview in the corner: every node as a block in its house colour, with
/// the off-screen area masked.
fn draw_minimap(state: &TreeCanvasState, ctx: &CanvasRenderingContext2d) {
	let Some(map) = state.minimap() else {
		return;
	};
	let frame = map.frame;

	ctx.save();
	ctx.set_shadow_color("rgba(0, 0, 0, 0.1)");
	ctx.set_shadow_blur(8.0);
	rounded_rect(ctx, frame.min_x, frame.min_y, frame.width(), frame.height(), 4.0);
	ctx.set_fill_style_str("#ffffff");
	ctx.fill();
	ctx.set_shadow_color("transparent");
	ctx.clip();

	let (w, h) = (NODE_WIDTH * map.scale, NODE_HEIGHT * map.scale);
	state.graph.visit_nodes(|node| {
		let (x, y) = map.project(node.x() as f64, node.y() as f64);
		ctx.set_fill_style_str(node.data.user_data.palette.primary);
		ctx.fill_rect(x - w / 2.0, y - h / 2.0, w, h);
	});

	// Mask everything outside the viewport.
	let view = state.visible_bounds();
	let (vx0, vy0) = map.project(view.min_x, view.min_y);
	let (vx1, vy1) = map.project(view.max_x, view.max_y);
	ctx.begin_path();
	ctx.rect(frame.min_x, frame.min_y, frame.width(), frame.height());
	ctx.rect(vx1, vy0, vx0 - vx1, vy1 - vy0);
	ctx.set_fill_style_str(MINIMAP_MASK);
	ctx.fill();
	ctx.restore();

	rounded_rect(ctx, frame.min_x, frame.min_y, frame.width(), frame.height(), 4.0);
	ctx.set_stroke_style_str(MINIMAP_BORDER);
	ctx.set_line_width(1.0);
	ctx.stroke();
}
