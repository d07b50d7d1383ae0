//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation around the derived
//! presentation. Courses with fixed positions are anchored; the rest are
//! placed by the simulation. Element styles ease towards the latest
//! presentation so selection changes fade instead of snapping.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::scale::{ScaleConfig, ScaledValues};
use super::theme::Color;
use crate::present::Presentation;

/// Per-node metadata attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Index into the presentation's node list.
	pub element: usize,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Distinguishes a click from the start of a drag or pan.
#[derive(Clone, Debug, Default)]
pub struct PressState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	/// Pointer travelled further than the click slop since the press.
	pub moved: bool,
}

impl PressState {
	pub fn begin(&mut self, x: f64, y: f64) {
		*self = Self {
			active: true,
			start_x: x,
			start_y: y,
			moved: false,
		};
	}

	pub fn track(&mut self, x: f64, y: f64, slop: f64) {
		if self.active && (x - self.start_x).hypot(y - self.start_y) > slop {
			self.moved = true;
		}
	}

	/// End the press; true when it was a click.
	pub fn finish(&mut self) -> bool {
		let click = self.active && !self.moved;
		self.active = false;
		click
	}
}

/// An element's color and opacity, easing from the previous presentation to
/// the current one.
///
/// Uses exponential smoothing on the blend factor for natural-feeling
/// transitions that slow down as they approach their target.
#[derive(Clone, Debug)]
pub struct StyleFade {
	from: (Color, f64),
	to: (Color, f64),
	t: f64,
}

impl StyleFade {
	pub fn new(color: Color, opacity: f64) -> Self {
		Self {
			from: (color, opacity),
			to: (color, opacity),
			t: 1.0,
		}
	}

	/// Start fading from wherever the element is now towards a new style.
	pub fn retarget(&mut self, color: Color, opacity: f64) {
		if self.to == (color, opacity) {
			return;
		}
		self.from = (self.color(), self.opacity());
		self.to = (color, opacity);
		self.t = 0.0;
	}

	/// `factor` is the share of the remaining distance covered this frame.
	pub fn tick(&mut self, factor: f64) {
		self.t += (1.0 - self.t) * factor;
		if self.t > 0.995 {
			self.t = 1.0;
		}
	}

	pub fn color(&self) -> Color {
		self.from.0.lerp(self.to.0, self.t)
	}

	pub fn opacity(&self) -> f64 {
		if self.t >= 1.0 {
			return self.to.1;
		}
		self.from.1 + (self.to.1 - self.from.1) * self.t
	}
}

/// Core graph state combining physics simulation with interaction and style
/// tracking.
///
/// Created when the canvas mounts and again whenever the set of courses
/// changes; restyled in place when only the selection changes.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub press: PressState,
	pub presentation: Presentation,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	node_styles: Vec<StyleFade>,
	edge_styles: Vec<StyleFade>,
	/// Node element indices of each edge's endpoints.
	edge_ends: Vec<Option<(usize, usize)>>,
	/// Edges whose reverse transition also exists; drawn curved.
	curved: Vec<bool>,
}

impl ForceGraphState {
	pub fn new(presentation: &Presentation, width: f64, height: f64, config: &ScaleConfig) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 4000.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let anchored: Vec<(f64, f64)> = presentation
			.nodes
			.iter()
			.filter_map(|n| n.position.map(|p| (p.x, p.y)))
			.collect();
		let (cx, cy) = if anchored.is_empty() {
			(0.0, 0.0)
		} else {
			let n = anchored.len() as f64;
			(
				anchored.iter().map(|p| p.0).sum::<f64>() / n,
				anchored.iter().map(|p| p.1).sum::<f64>() / n,
			)
		};

		let floating = presentation.nodes.len() - anchored.len();
		let mut node_idx = Vec::with_capacity(presentation.nodes.len());
		let mut placed = 0;
		for (element, node) in presentation.nodes.iter().enumerate() {
			let (x, y, is_anchor) = match node.position {
				Some(p) => (p.x, p.y, true),
				None => {
					// Spread around the anchored centroid, starting straight up.
					let angle = (placed as f64) * 2.0 * PI / floating.max(1) as f64 - PI / 2.0;
					placed += 1;
					(cx + 150.0 * angle.cos(), cy + 150.0 * angle.sin(), false)
				}
			};
			node_idx.push(graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor,
				user_data: NodeInfo { element },
			}));
		}

		let id_to_element: HashMap<&str, usize> = presentation
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		for edge in presentation.edges.iter().filter(|e| !e.self_loop) {
			if let (Some(&src), Some(&tgt)) = (
				id_to_element.get(edge.source.as_str()),
				id_to_element.get(edge.target.as_str()),
			) {
				graph.add_edge(node_idx[src], node_idx[tgt], EdgeData::default());
			}
		}

		let mut state = Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			press: PressState::default(),
			presentation: Presentation::default(),
			width,
			height,
			animation_running: floating > 0,
			node_styles: Vec::new(),
			edge_styles: Vec::new(),
			edge_ends: Vec::new(),
			curved: Vec::new(),
		};
		state.apply(presentation);
		state.fit_view(config);
		state
	}

	/// Whether `presentation` draws the same courses in the same order, so
	/// the current layout can be kept.
	pub fn same_layout(&self, presentation: &Presentation) -> bool {
		self.presentation.nodes.len() == presentation.nodes.len()
			&& self
				.presentation
				.nodes
				.iter()
				.zip(&presentation.nodes)
				.all(|(a, b)| a.id == b.id)
	}

	/// Restyle for a new presentation of the same courses.
	pub fn apply(&mut self, presentation: &Presentation) {
		let fresh = !self.same_layout(presentation) || self.node_styles.is_empty();

		if fresh {
			self.node_styles = presentation
				.nodes
				.iter()
				.map(|n| StyleFade::new(Color::parse(n.fill), n.opacity))
				.collect();
		} else {
			for (fade, node) in self.node_styles.iter_mut().zip(&presentation.nodes) {
				fade.retarget(Color::parse(node.fill), node.opacity);
			}
		}

		if fresh || self.edge_styles.len() != presentation.edges.len() {
			self.edge_styles = presentation
				.edges
				.iter()
				.map(|e| StyleFade::new(Color::parse(e.color), e.opacity))
				.collect();
		} else {
			for (fade, edge) in self.edge_styles.iter_mut().zip(&presentation.edges) {
				fade.retarget(Color::parse(edge.color), edge.opacity);
			}
		}

		let id_to_element: HashMap<&str, usize> = presentation
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		self.edge_ends = presentation
			.edges
			.iter()
			.map(|e| {
				Some((
					*id_to_element.get(e.source.as_str())?,
					*id_to_element.get(e.target.as_str())?,
				))
			})
			.collect();

		let pairs: HashSet<(&str, &str)> = presentation
			.edges
			.iter()
			.map(|e| (e.source.as_str(), e.target.as_str()))
			.collect();
		self.curved = presentation
			.edges
			.iter()
			.map(|e| !e.self_loop && pairs.contains(&(e.target.as_str(), e.source.as_str())))
			.collect();

		self.presentation = presentation.clone();
	}

	pub fn node_style(&self, element: usize) -> (Color, f64) {
		self.node_styles
			.get(element)
			.map(|f| (f.color(), f.opacity()))
			.unwrap_or((Color::rgb(128, 128, 128), 1.0))
	}

	pub fn edge_style(&self, element: usize) -> (Color, f64) {
		self.edge_styles
			.get(element)
			.map(|f| (f.color(), f.opacity()))
			.unwrap_or((Color::rgb(128, 128, 128), 1.0))
	}

	pub fn edge_ends(&self, element: usize) -> Option<(usize, usize)> {
		self.edge_ends.get(element).copied().flatten()
	}

	pub fn is_curved(&self, element: usize) -> bool {
		self.curved.get(element).copied().unwrap_or(false)
	}

	/// Current world position of every node, indexed by element.
	pub fn positions(&self) -> Vec<(f64, f64)> {
		let mut out = vec![(0.0, 0.0); self.presentation.nodes.len()];
		self.graph.visit_nodes(|node| {
			if let Some(slot) = out.get_mut(node.data.user_data.element) {
				*slot = (node.x() as f64, node.y() as f64);
			}
		});
		out
	}

	/// Zoom and pan so the courses with fixed positions fit the canvas, or
	/// all courses when none has one.
	pub fn fit_view(&mut self, config: &ScaleConfig) {
		let all = self.positions();
		let anchored: Vec<(f64, f64)> = all
			.iter()
			.zip(&self.presentation.nodes)
			.filter(|(_, n)| n.position.is_some())
			.map(|(p, _)| *p)
			.collect();
		let positions = if anchored.is_empty() { all } else { anchored };
		if positions.is_empty() {
			return;
		}
		let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
		let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
		for &(x, y) in &positions {
			min_x = min_x.min(x);
			min_y = min_y.min(y);
			max_x = max_x.max(x);
			max_y = max_y.max(y);
		}
		let margin = config.node.radius + config.fit_padding;
		let (span_x, span_y) = (max_x - min_x + 2.0 * margin, max_y - min_y + 2.0 * margin);
		let k = (self.width / span_x).min(self.height / span_y).clamp(0.1, 2.0);

		self.transform = ViewTransform {
			x: self.width / 2.0 - (min_x + max_x) / 2.0 * k,
			y: self.height / 2.0 - (min_y + max_y) / 2.0 * k,
			k,
		};
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if dx.hypot(dy) < scale.node_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Presentation element of a simulation node.
	pub fn element_of(&self, idx: DefaultNodeIdx) -> Option<usize> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.element);
			}
		});
		found
	}

	/// Closest edge within click tolerance of a screen point.
	pub fn edge_at_position(&self, sx: f64, sy: f64, config: &ScaleConfig) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let positions = self.positions();

		let mut best: Option<(usize, f64)> = None;
		for element in 0..self.presentation.edges.len() {
			let Some((src, tgt)) = self.edge_ends(element) else {
				continue;
			};
			let (p1, p2) = (positions[src], positions[tgt]);
			let dist = if src == tgt {
				let (cx, cy) = scale.loop_center(p1.0, p1.1);
				((gx - cx).hypot(gy - cy) - scale.loop_radius).abs()
			} else if self.is_curved(element) {
				let ctrl = curve_control(p1, p2, config.edge.curve_tension);
				distance_to_quadratic((gx, gy), p1, ctrl, p2)
			} else {
				distance_to_segment((gx, gy), p1, p2)
			};
			if dist <= scale.edge_hit_tolerance + scale.edge_line_width
				&& best.is_none_or(|(_, d)| dist < d)
			{
				best = Some((element, dist));
			}
		}
		best.map(|(element, _)| element)
	}

	pub fn tick(&mut self, dt: f32) {
		// ~150ms to 95%
		const FADE_SPEED: f64 = 6.0;

		if self.animation_running {
			self.graph.update(dt);
		}
		let factor = 1.0 - (-FADE_SPEED * dt as f64).exp();
		for fade in self.node_styles.iter_mut().chain(self.edge_styles.iter_mut()) {
			fade.tick(factor);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

/// Control point bending the line `p1 → p2` to its left.
pub fn curve_control(p1: (f64, f64), p2: (f64, f64), tension: f64) -> (f64, f64) {
	let (dx, dy) = (p2.0 - p1.0, p2.1 - p1.1);
	let dist = dx.hypot(dy).max(0.001);
	let offset = dist * tension * 0.5;
	let (px, py) = (-dy / dist * offset, dx / dist * offset);
	((p1.0 + p2.0) / 2.0 + px, (p1.1 + p2.1) / 2.0 + py)
}

/// Point on the quadratic curve `p0, ctrl, p2` at parameter `t`.
pub fn quadratic_point(p0: (f64, f64), ctrl: (f64, f64), p2: (f64, f64), t: f64) -> (f64, f64) {
	let u = 1.0 - t;
	(
		u * u * p0.0 + 2.0 * u * t * ctrl.0 + t * t * p2.0,
		u * u * p0.1 + 2.0 * u * t * ctrl.1 + t * t * p2.1,
	)
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < 1e-9 {
		0.0
	} else {
		(((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	(p.0 - (a.0 + t * dx)).hypot(p.1 - (a.1 + t * dy))
}

fn distance_to_quadratic(
	p: (f64, f64),
	p0: (f64, f64),
	ctrl: (f64, f64),
	p2: (f64, f64),
) -> f64 {
	const STEPS: usize = 16;
	(0..STEPS)
		.map(|i| {
			let a = quadratic_point(p0, ctrl, p2, i as f64 / STEPS as f64);
			let b = quadratic_point(p0, ctrl, p2, (i + 1) as f64 / STEPS as f64);
			distance_to_segment(p, a, b)
		})
		.fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::tests::sample_graph;
	use crate::present::{Selection, derive};

	fn state() -> ForceGraphState {
		let p = derive(&sample_graph(), &Selection::None);
		ForceGraphState::new(&p, 800.0, 600.0, &ScaleConfig::default())
	}

	#[test]
	fn press_without_travel_is_a_click() {
		let mut press = PressState::default();
		press.begin(10.0, 10.0);
		press.track(12.0, 11.0, 4.0);
		assert!(press.finish());

		press.begin(10.0, 10.0);
		press.track(30.0, 10.0, 4.0);
		assert!(!press.finish());
		assert!(!press.finish(), "a finished press is not clicked twice");
	}

	#[test]
	fn fades_converge_on_the_new_style() {
		let mut fade = StyleFade::new(Color::parse("#8D99AE"), 0.85);
		fade.retarget(Color::parse("#D0D4DC"), 0.10);
		fade.tick(0.5);
		assert!(fade.opacity() < 0.85 && fade.opacity() > 0.10);
		for _ in 0..20 {
			fade.tick(0.5);
		}
		assert_eq!(fade.opacity(), 0.10);
		assert_eq!(fade.color(), Color::parse("#D0D4DC"));
	}

	#[test]
	fn anchored_courses_keep_their_positions() {
		let s = state();
		let positions = s.positions();
		assert_eq!(positions[0], (0.0, 0.0));
		assert_eq!(positions[1], (200.0, 0.0));
		assert!(s.animation_running, "three courses have no fixed position");
	}

	#[test]
	fn hit_tests_find_nodes_and_edges() {
		let s = state();
		let to_screen = |x: f64, y: f64| {
			(
				x * s.transform.k + s.transform.x,
				y * s.transform.k + s.transform.y,
			)
		};
		let config = ScaleConfig::default();

		let (sx, sy) = to_screen(200.0, 0.0);
		let idx = s.node_at_position(sx, sy, &config).unwrap();
		assert_eq!(s.element_of(idx), Some(1));

		// Midway along Algebra I → Geometry.
		let (sx, sy) = to_screen(100.0, 0.0);
		assert_eq!(s.node_at_position(sx, sy, &config), None);
		let edge = s.edge_at_position(sx, sy, &config).unwrap();
		assert_eq!(s.presentation.edges[edge].id, "algebra_i→geometry");
	}

	#[test]
	fn restyling_keeps_layout() {
		let mut s = state();
		let focused = derive(&sample_graph(), &Selection::course("Graduate"));
		assert!(s.same_layout(&focused));
		s.apply(&focused);
		assert_eq!(s.presentation, focused);
		// Basic Math is dimmed but has not faded yet.
		let (_, opacity) = s.node_style(3);
		assert_eq!(opacity, 1.0);
		s.tick(1.0);
		assert!(s.node_style(3).1 < 0.2);
	}

	#[test]
	fn segment_distance() {
		assert_eq!(distance_to_segment((5.0, 3.0), (0.0, 0.0), (10.0, 0.0)), 3.0);
		assert_eq!(distance_to_segment((-4.0, 3.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
	}
}
