use std::collections::HashMap;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::config::{FIT_MAX_ZOOM, FIT_PADDING, MAX_ZOOM, MIN_ZOOM, NODE_HEIGHT, NODE_WIDTH};
use crate::lineage::{GroupPalette, HighlightPaths, LayoutDirection, PositionedGraph, palette_for};

/// Pointer travel (screen px) below which a press on a node counts as a click.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub name: String,
	pub caption: String,
	pub palette: GroupPalette,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Minimap frame size (screen px).
pub const MINIMAP_SIZE: (f64, f64) = (200.0, 150.0);
pub const MINIMAP_MARGIN: f64 = 16.0;

/// Step applied by the zoom buttons.
pub const ZOOM_STEP: f64 = 1.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn union(&self, other: &Bounds) -> Bounds {
		Bounds {
			min_x: self.min_x.min(other.min_x),
			min_y: self.min_y.min(other.min_y),
			max_x: self.max_x.max(other.max_x),
			max_y: self.max_y.max(other.max_y),
		}
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		(self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
	}
}

/// Screen placement of the overview: `screen = graph * scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minimap {
	pub frame: Bounds,
	pub scale: f64,
	pub offset_x: f64,
	pub offset_y: f64,
}

impl Minimap {
	pub fn project(&self, gx: f64, gy: f64) -> (f64, f64) {
		(gx * self.scale + self.offset_x, gy * self.scale + self.offset_y)
	}
}

/// Current lineage highlight plus the one fading out after it was cleared.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	pub paths: HighlightPaths,
	pub fading: HighlightPaths,
	pub t: f64,
}

pub struct TreeCanvasState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub highlight: HighlightState,
	pub hovered: Option<DefaultNodeIdx>,
	pub direction: LayoutDirection,
	pub width: f64,
	pub height: f64,
	pub physics: bool,
	pub flow_time: f64,
}

fn simulation() -> SimulationParameters {
	SimulationParameters {
		force_charge: 4000.0,
		force_spring: 0.02,
		force_max: 280.0,
		node_speed: 7000.0,
		damping_factor: 0.9,
	}
}

fn build_graph(data: &PositionedGraph, physics: bool) -> ForceGraph<NodeInfo, ()> {
	let mut graph = ForceGraph::new(simulation());
	let mut id_to_idx = HashMap::new();

	for placed in &data.nodes {
		let node = &placed.node;
		let idx = graph.add_node(NodeData {
			x: placed.x as f32,
			y: placed.y as f32,
			mass: 10.0,
			is_anchor: !physics,
			user_data: NodeInfo {
				id: node.id.clone(),
				name: node.label().to_string(),
				caption: node.caption().to_string(),
				palette: palette_for(node.group.as_deref()),
			},
		});
		id_to_idx.insert(node.id.clone(), idx);
	}

	for edge in &data.edges {
		if let (Some(&src), Some(&tgt)) = (id_to_idx.get(&edge.source), id_to_idx.get(&edge.target)) {
			graph.add_edge(src, tgt, EdgeData::default());
		}
	}
	graph
}

impl TreeCanvasState {
	pub fn new(data: &PositionedGraph, physics: bool, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: build_graph(data, physics),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			highlight: HighlightState::default(),
			hovered: None,
			direction: data.direction,
			width,
			height,
			physics,
			flow_time: 0.0,
		};
		state.fit_view();
		state
	}

	/// Swap in a freshly laid out graph and refit the view.
	pub fn rebuild(&mut self, data: &PositionedGraph) {
		self.graph = build_graph(data, self.physics);
		self.direction = data.direction;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hovered = None;
		self.fit_view();
	}

	/// Bounding box of every node box in graph space.
	pub fn graph_bounds(&self) -> Option<Bounds> {
		let mut bounds: Option<Bounds> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			let node_box = Bounds {
				min_x: x - NODE_WIDTH / 2.0,
				min_y: y - NODE_HEIGHT / 2.0,
				max_x: x + NODE_WIDTH / 2.0,
				max_y: y + NODE_HEIGHT / 2.0,
			};
			bounds = Some(bounds.map_or(node_box, |b| b.union(&node_box)));
		});
		bounds
	}

	/// Centre the graph and zoom so all of it is visible.
	pub fn fit_view(&mut self) {
		let Some(b) = self.graph_bounds() else {
			self.transform = ViewTransform {
				x: self.width / 2.0,
				y: self.height / 2.0,
				k: 1.0,
			};
			return;
		};

		let usable = 1.0 - 2.0 * FIT_PADDING;
		let k = (self.width * usable / b.width())
			.min(self.height * usable / b.height())
			.min(FIT_MAX_ZOOM)
			.max(MIN_ZOOM);
		let (cx, cy) = ((b.min_x + b.max_x) / 2.0, (b.min_y + b.max_y) / 2.0);
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	/// The part of graph space currently on screen.
	pub fn visible_bounds(&self) -> Bounds {
		let (min_x, min_y) = self.screen_to_graph(0.0, 0.0);
		let (max_x, max_y) = self.screen_to_graph(self.width, self.height);
		Bounds {
			min_x,
			min_y,
			max_x,
			max_y,
		}
	}

	/// Overview frame in the bottom-right corner, scaled to show every node
	/// and the visible area.
	pub fn minimap(&self) -> Option<Minimap> {
		let world = self.graph_bounds()?.union(&self.visible_bounds());
		let (w, h) = MINIMAP_SIZE;
		let scale = (w / world.width()).min(h / world.height());
		let frame = Bounds {
			min_x: self.width - w - MINIMAP_MARGIN,
			min_y: self.height - h - MINIMAP_MARGIN,
			max_x: self.width - MINIMAP_MARGIN,
			max_y: self.height - MINIMAP_MARGIN,
		};
		// Centre the content inside the frame.
		let offset_x = frame.min_x + (w - world.width() * scale) / 2.0 - world.min_x * scale;
		let offset_y = frame.min_y + (h - world.height() * scale) / 2.0 - world.min_y * scale;
		Some(Minimap {
			frame,
			scale,
			offset_x,
			offset_y,
		})
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node whose box contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if dx.abs() <= NODE_WIDTH / 2.0 && dy.abs() <= NODE_HEIGHT / 2.0 {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		self.hovered = node;
	}

	pub fn set_highlight(&mut self, paths: HighlightPaths) {
		if paths.is_empty() && !self.highlight.paths.is_empty() {
			self.highlight.fading = std::mem::take(&mut self.highlight.paths);
		} else {
			self.highlight.fading = HighlightPaths::default();
		}
		self.highlight.paths = paths;
	}

	/// The paths to paint: the live highlight, or the one still fading out.
	pub fn active_paths(&self) -> Option<&HighlightPaths> {
		if !self.highlight.paths.is_empty() {
			Some(&self.highlight.paths)
		} else if !self.highlight.fading.is_empty() {
			Some(&self.highlight.fading)
		} else {
			None
		}
	}

	/// Release (or pin) every node so the force simulation moves it.
	pub fn set_physics(&mut self, on: bool) {
		if self.physics == on {
			return;
		}
		self.physics = on;
		self.graph.visit_nodes_mut(|node| {
			node.data.is_anchor = !on;
		});
	}

	/// Pointer pressed: grab the node under it, or start panning.
	pub fn press(&mut self, sx: f64, sy: f64) {
		if self.minimap().is_some_and(|m| m.frame.contains(sx, sy)) {
			return;
		}
		let Some(idx) = self.node_at_position(sx, sy) else {
			self.pan = PanState {
				active: true,
				start_x: sx,
				start_y: sy,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
			return;
		};
		let mut origin = (0.0, 0.0);
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				origin = (node.x(), node.y());
			}
		});
		self.drag = DragState {
			active: true,
			moved: false,
			node_idx: Some(idx),
			start_x: sx,
			start_y: sy,
			node_start_x: origin.0,
			node_start_y: origin.1,
		};
	}

	/// Pointer moved. Grabbed nodes only follow once past [`CLICK_SLOP`].
	pub fn pointer_moved(&mut self, sx: f64, sy: f64) {
		if !self.drag.active {
			let hovered = self.node_at_position(sx, sy);
			self.set_hover(hovered);
			if self.pan.active {
				self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
				self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
			}
			return;
		}

		let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
		if dx.hypot(dy) > CLICK_SLOP {
			self.drag.moved = true;
		}
		let Some(idx) = self.drag.node_idx.filter(|_| self.drag.moved) else {
			return;
		};
		let k = self.transform.k;
		let (nx, ny) = (
			self.drag.node_start_x + (dx / k) as f32,
			self.drag.node_start_y + (dy / k) as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = nx;
				node.data.y = ny;
				node.data.is_anchor = true;
			}
		});
	}

	/// Pointer released. Returns the node id when the press was a click.
	pub fn release(&mut self) -> Option<String> {
		let clicked = match (self.drag.active, self.drag.moved, self.drag.node_idx) {
			(true, false, Some(idx)) => self.node_id(idx),
			_ => None,
		};
		self.drag = DragState::default();
		self.pan.active = false;
		clicked
	}

	pub fn leave(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.set_hover(None);
	}

	/// Zoom about the middle of the canvas, as the zoom buttons do.
	pub fn zoom_centre(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f32) {
		if self.physics {
			self.graph.update(dt);
		}
		self.flow_time += dt as f64;

		let (target, speed) = if self.highlight.paths.is_empty() {
			(0.0, 4.5)
		} else {
			(1.0, 6.0)
		};
		let step = ((target - self.highlight.t) * speed * dt as f64).clamp(-1.0, 1.0);
		self.highlight.t += step;
		if target == 0.0 && self.highlight.t < 0.01 {
			self.highlight.t = 0.0;
			self.highlight.fading = HighlightPaths::default();
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lineage::{GroupingRules, LayoutConfig, TreeNode, flatten, layout};

	fn state() -> TreeCanvasState {
		let tree = TreeNode::with_children(
			"Great Houses",
			vec![TreeNode::with_children("House Alder", vec![TreeNode::leaf("Ada")])],
		);
		let graph = flatten(&tree, &GroupingRules::default());
		let placed = layout(&graph, LayoutDirection::TopBottom, &LayoutConfig::default());
		TreeCanvasState::new(&placed, false, 1000.0, 800.0)
	}

	#[test]
	fn fit_view_respects_zoom_ceiling() {
		let s = state();
		assert!(s.transform.k <= FIT_MAX_ZOOM);
		assert!(s.transform.k >= MIN_ZOOM);
	}

	#[test]
	fn clicking_a_node_centre_hits_it() {
		let s = state();
		let mut centre = None;
		s.graph.visit_nodes(|node| {
			if node.data.user_data.name == "Ada" {
				centre = Some((node.x() as f64, node.y() as f64));
			}
		});
		let (gx, gy) = centre.unwrap();
		let (sx, sy) = (gx * s.transform.k + s.transform.x, gy * s.transform.k + s.transform.y);
		let idx = s.node_at_position(sx, sy).unwrap();
		assert_eq!(s.node_id(idx).as_deref(), Some("Ada-2"));
		assert!(s.node_at_position(-5000.0, -5000.0).is_none());
	}

	fn screen_centre_of(s: &TreeCanvasState, name: &str) -> (f64, f64) {
		let mut centre = (0.0, 0.0);
		s.graph.visit_nodes(|node| {
			if node.data.user_data.name == name {
				centre = (node.x() as f64, node.y() as f64);
			}
		});
		(
			centre.0 * s.transform.k + s.transform.x,
			centre.1 * s.transform.k + s.transform.y,
		)
	}

	#[test]
	fn small_jitter_still_counts_as_click() {
		let mut s = state();
		let (x, y) = screen_centre_of(&s, "Ada");
		s.press(x, y);
		s.pointer_moved(x + 1.0, y + 1.0);
		assert_eq!(s.release().as_deref(), Some("Ada-2"));
		assert!(!s.drag.active);
	}

	#[test]
	fn dragging_moves_the_node_and_is_not_a_click() {
		let mut s = state();
		let (x, y) = screen_centre_of(&s, "Ada");
		s.press(x, y);
		s.pointer_moved(x + 60.0, y);
		assert_eq!(s.release(), None);
		let (nx, _) = screen_centre_of(&s, "Ada");
		assert!((nx - (x + 60.0)).abs() < 0.5);
	}

	#[test]
	fn pressing_empty_space_pans() {
		let mut s = state();
		let before = s.transform.x;
		s.press(-4000.0, -4000.0);
		s.pointer_moved(-3970.0, -4000.0);
		assert_eq!(s.release(), None);
		assert!((s.transform.x - (before + 30.0)).abs() < 1e-9);
		s.pointer_moved(0.0, 0.0);
		assert!((s.transform.x - (before + 30.0)).abs() < 1e-9);
	}

	#[test]
	fn cleared_highlight_fades_out() {
		let mut s = state();
		let paths = HighlightPaths {
			up: ["Ada-2".to_string()].into(),
			down: Default::default(),
		};
		s.set_highlight(paths.clone());
		s.tick(0.1);
		assert!(s.highlight.t > 0.0);

		s.set_highlight(HighlightPaths::default());
		assert_eq!(s.active_paths(), Some(&paths));
		for _ in 0..200 {
			s.tick(0.016);
		}
		assert_eq!(s.highlight.t, 0.0);
		assert_eq!(s.active_paths(), None);
	}

	#[test]
	fn zoom_buttons_keep_the_centre_fixed() {
		let mut s = state();
		let before = s.screen_to_graph(500.0, 400.0);
		s.zoom_centre(ZOOM_STEP);
		let after = s.screen_to_graph(500.0, 400.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);

		let fitted = s.transform.k / ZOOM_STEP;
		s.zoom_centre(1.0 / ZOOM_STEP);
		assert!((s.transform.k - fitted).abs() < 1e-9);
	}

	#[test]
	fn fit_view_undoes_zoom_and_pan() {
		let mut s = state();
		let fitted = (s.transform.x, s.transform.y, s.transform.k);
		s.zoom_centre(ZOOM_STEP);
		s.press(-4000.0, -4000.0);
		s.pointer_moved(-3900.0, -3950.0);
		s.release();
		s.fit_view();
		assert_eq!((s.transform.x, s.transform.y, s.transform.k), fitted);
	}

	#[test]
	fn minimap_shows_every_node_inside_its_frame() {
		let s = state();
		let map = s.minimap().unwrap();
		assert_eq!(map.frame.max_x, 1000.0 - MINIMAP_MARGIN);
		assert_eq!(map.frame.max_y, 800.0 - MINIMAP_MARGIN);
		let eps = 1e-6;
		s.graph.visit_nodes(|node| {
			let (x, y) = map.project(node.x() as f64, node.y() as f64);
			assert!(x >= map.frame.min_x - eps && x <= map.frame.max_x + eps);
			assert!(y >= map.frame.min_y - eps && y <= map.frame.max_y + eps);
		});
		let view = s.visible_bounds();
		let (x0, y0) = map.project(view.min_x, view.min_y);
		let (x1, y1) = map.project(view.max_x, view.max_y);
		assert!(x0 >= map.frame.min_x - eps && x1 <= map.frame.max_x + eps);
		assert!(y0 >= map.frame.min_y - eps && y1 <= map.frame.max_y + eps);
	}

	#[test]
	fn pressing_the_minimap_does_not_pan() {
		let mut s = state();
		let before = s.transform.x;
		let map = s.minimap().unwrap();
		let (x, y) = (map.frame.min_x + 5.0, map.frame.min_y + 5.0);
		s.press(x, y);
		s.pointer_moved(x + 50.0, y);
		assert!(!s.pan.active);
		assert_eq!(s.transform.x, before);
	}

	#[test]
	fn empty_scene_has_no_minimap() {
		let s = TreeCanvasState::new(&PositionedGraph::default(), false, 800.0, 600.0);
		assert!(s.minimap().is_none());
		assert_eq!(s.transform.k, 1.0);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..100 {
			s.zoom_at(10.0, 10.0, 1.1);
		}
		assert_eq!(s.transform.k, MAX_ZOOM);
		for _ in 0..100 {
			s.zoom_at(10.0, 10.0, 0.9);
		}
		assert_eq!(s.transform.k, MIN_ZOOM);
	}
}
