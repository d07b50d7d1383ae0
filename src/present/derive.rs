use std::collections::HashSet;

use log::debug;

use super::palette::{
	BORDER_WIDTH, DIM_COLOR, EDGE_COLOR, EDGE_DIM_OPACITY, EDGE_FOCUS_OPACITY, EDGE_HIGHLIGHT,
	EDGE_OPACITY, NODE_BORDER, NODE_DIM_OPACITY, NODE_OPACITY, SELECTED_BORDER_WIDTH, fill_for,
};
use super::{EdgeView, ElementClass, NodeView, Presentation, Selection, friendly_percent};
use crate::graph::{CourseGraph, Transition};

/// The part of the graph related to the current selection.
struct Focus<'a> {
	tracks: HashSet<&'a str>,
	neighbors: HashSet<&'a str>,
	edges: HashSet<(&'a str, &'a str)>,
}

impl<'a> Focus<'a> {
	fn new(graph: &'a CourseGraph, selection: &'a Selection) -> Option<Self> {
		match selection {
			Selection::Course(course) => {
				let course = course.as_str();
				if !graph.contains(course) {
					debug!("course-pathways: selected course {course:?} is not in this graph");
					return None;
				}
				let mut focus = Focus {
					tracks: graph.node_tracks(course).into_iter().collect(),
					neighbors: HashSet::from([course]),
					edges: HashSet::new(),
				};
				for edge in graph.edges().iter().filter(|e| e.touches(course)) {
					let (source, target) = (edge.source.as_str(), edge.target.as_str());
					focus.neighbors.insert(source);
					focus.neighbors.insert(target);
					focus.edges.insert((source, target));
				}
				Some(focus)
			}
			Selection::Transition { source, target } => {
				if !graph.contains(source) || !graph.contains(target) {
					debug!("course-pathways: selected transition {source:?} -> {target:?} is not in this graph");
					return None;
				}
				Some(Focus {
					tracks: graph.edge_tracks(source, target).into_iter().collect(),
					neighbors: HashSet::from([source.as_str(), target.as_str()]),
					edges: HashSet::from([(source.as_str(), target.as_str())]),
				})
			}
			Selection::None | Selection::Unresolved(_) => None,
		}
	}

	fn shares_track(&self, tracks: &[&str]) -> bool {
		tracks.iter().any(|t| self.tracks.contains(t))
	}

	fn covers_node(&self, graph: &CourseGraph, course: &str) -> bool {
		self.neighbors.contains(course) || self.shares_track(&graph.node_tracks(course))
	}

	fn covers_edge(&self, graph: &CourseGraph, edge: &Transition) -> bool {
		self.edges
			.contains(&(edge.source.as_str(), edge.target.as_str()))
			|| self.shares_track(&graph.edge_tracks(&edge.source, &edge.target))
	}
}

/// Compute node and edge display attributes for `selection`.
///
/// With no usable selection nothing is dimmed. A selected course focuses its
/// tracks and direct neighbors; a selected transition focuses its edge-track
/// set and both endpoints.
pub fn derive(graph: &CourseGraph, selection: &Selection) -> Presentation {
	let focus = Focus::new(graph, selection);
	let selected_course = selection.selected_course();
	let selected_pair = selection.selected_transition();

	let nodes = graph
		.nodes()
		.iter()
		.zip(graph.ids.ids())
		.map(|(course, id)| {
			let mut view = NodeView {
				id: id.clone(),
				label: course.clone(),
				fill: fill_for(graph.primary_track(course)),
				opacity: NODE_OPACITY,
				border: NODE_BORDER,
				border_width: BORDER_WIDTH,
				classes: Vec::new(),
				position: graph.position(course),
			};
			if focus.as_ref().is_some_and(|f| !f.covers_node(graph, course)) {
				view.fill = DIM_COLOR;
				view.opacity = NODE_DIM_OPACITY;
				view.classes.push(ElementClass::Dim);
			}
			if selected_course == Some(course.as_str()) {
				view.border_width = SELECTED_BORDER_WIDTH;
				view.classes.push(ElementClass::Selected);
			}
			view
		})
		.collect();

	let edges = graph
		.edges()
		.iter()
		.filter_map(|edge| {
			let (Some(id), Some(source), Some(target)) = (
				graph.ids.edge_id(&edge.source, &edge.target),
				graph.ids.id_of(&edge.source),
				graph.ids.id_of(&edge.target),
			) else {
				debug!(
					"course-pathways: skipping transition {:?} -> {:?} with an unknown endpoint",
					edge.source, edge.target
				);
				return None;
			};

			let self_loop = edge.is_self_loop();
			let show_label = self_loop
				|| selected_course.is_some_and(|c| edge.touches(c))
				|| selected_pair.is_some_and(|(s, t)| edge.connects(s, t));

			let mut view = EdgeView {
				id,
				source: source.to_string(),
				target: target.to_string(),
				label: if show_label {
					friendly_percent(edge.probability)
				} else {
					String::new()
				},
				color: EDGE_COLOR,
				opacity: EDGE_OPACITY,
				classes: Vec::new(),
				self_loop,
			};

			if self_loop {
				view.classes.push(ElementClass::SelfLoop);
			} else if let Some(f) = &focus {
				if f.covers_edge(graph, edge) {
					view.color = EDGE_HIGHLIGHT;
					view.opacity = EDGE_FOCUS_OPACITY;
					view.classes.push(ElementClass::Focus);
				} else {
					view.color = DIM_COLOR;
					view.opacity = EDGE_DIM_OPACITY;
					view.classes.push(ElementClass::Dim);
				}
			}
			Some(view)
		})
		.collect();

	Presentation {
		nodes,
		edges,
		focus: focus.is_some(),
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::graph::tests::sample_graph;

	fn dimmed(p: &Presentation) -> Vec<&str> {
		p.nodes
			.iter()
			.filter(|n| n.has_class(ElementClass::Dim))
			.map(|n| n.label.as_str())
			.collect()
	}

	#[test]
	fn no_selection_dims_nothing() {
		let p = derive(&sample_graph(), &Selection::None);
		assert!(!p.focus);
		assert!(dimmed(&p).is_empty());
		for edge in p.edges.iter().filter(|e| !e.self_loop) {
			assert_eq!((edge.color, edge.opacity, edge.label.as_str()), (EDGE_COLOR, 0.85, ""));
		}
		let algebra = p.node("algebra_i").unwrap();
		assert_eq!(algebra.fill, "#43AA8B");
		assert_eq!(algebra.border_width, BORDER_WIDTH);
		assert_eq!(p.node("graduate").unwrap().fill, "#2B2D42");
	}

	#[test]
	fn self_loops_are_always_labelled() {
		let g = sample_graph();
		for selection in [
			Selection::None,
			Selection::course("Geometry"),
			Selection::transition("Geometry", "Algebra II"),
			Selection::Unresolved("bogus".into()),
		] {
			let p = derive(&g, &selection);
			let repeat = p.edge("algebra_i→algebra_i").unwrap();
			assert_eq!(repeat.label, "20%");
			assert_eq!(repeat.classes, [ElementClass::SelfLoop]);
			assert_eq!(repeat.opacity, EDGE_OPACITY);
		}
	}

	#[test]
	fn selecting_a_course_focuses_tracks_and_neighbors() {
		let g = sample_graph();
		let p = derive(&g, &Selection::course("Algebra I"));
		assert!(p.focus);

		// Algebra I is Regular + Honors and adjacent to Basic Math.
		assert_eq!(dimmed(&p), ["Graduate"]);

		let selected = p.node("algebra_i").unwrap();
		assert_eq!(selected.border_width, SELECTED_BORDER_WIDTH);
		assert_eq!(selected.class_list(), "selected");

		let next = p.edge("algebra_i→geometry").unwrap();
		assert_eq!(next.label, "80%");
		assert!(next.has_class(ElementClass::Focus));
		assert_eq!((next.color, next.opacity), (EDGE_HIGHLIGHT, 1.0));

		let from = p.edge("basic_math→algebra_i").unwrap();
		assert_eq!(from.label, "60%");
		assert!(from.has_class(ElementClass::Focus));

		// Regular ∪ {} for the Graduate edge, which meets the focus tracks.
		let grad = p.edge("algebra_ii→graduate").unwrap();
		assert_eq!(grad.label, "");
		assert!(grad.has_class(ElementClass::Focus));
	}

	#[test]
	fn unrelated_course_is_dimmed() {
		let g = sample_graph();
		let p = derive(&g, &Selection::course("Graduate"));
		// Graduate has no tracks; only its direct neighbors stay in focus.
		assert_eq!(dimmed(&p), ["Algebra I", "Basic Math"]);
		let dim = p.node("basic_math").unwrap();
		assert_eq!((dim.fill, dim.opacity), (DIM_COLOR, NODE_DIM_OPACITY));

		let unrelated = p.edge("basic_math→algebra_i").unwrap();
		assert_eq!(unrelated.class_list(), "dim");
		assert_eq!((unrelated.color, unrelated.opacity), (DIM_COLOR, EDGE_DIM_OPACITY));
		assert_eq!(unrelated.label, "");
	}

	#[test]
	fn selecting_a_transition_uses_shared_tracks() {
		let g = sample_graph();
		let p = derive(&g, &Selection::transition("Algebra I", "Geometry"));
		assert!(p.focus);
		// Focus tracks are {Honors}; Algebra II and Basic Math fall outside.
		assert_eq!(dimmed(&p), ["Algebra II", "Basic Math", "Graduate"]);
		assert!(p.nodes.iter().all(|n| !n.has_class(ElementClass::Selected)));

		let chosen = p.edge("algebra_i→geometry").unwrap();
		assert_eq!(chosen.label, "80%");
		assert!(chosen.has_class(ElementClass::Focus));

		// Geometry → Algebra II has edge tracks Regular ∪ Honors.
		let onward = p.edge("geometry→algebra_ii").unwrap();
		assert_eq!(onward.label, "");
		assert!(onward.has_class(ElementClass::Focus));

		let other = p.edge("algebra_ii→graduate").unwrap();
		assert!(other.has_class(ElementClass::Dim));
	}

	#[test]
	fn unknown_or_unresolved_selection_has_no_focus() {
		let g = sample_graph();
		let neutral = derive(&g, &Selection::None);
		assert_eq!(derive(&g, &Selection::transition("Algebra I", "Calculus")), neutral);
		assert_eq!(derive(&g, &Selection::course("Calculus")), neutral);
		assert_eq!(derive(&g, &Selection::Unresolved("x→y→z".into())), neutral);
	}

	#[test]
	fn positions_pass_through() {
		let p = derive(&sample_graph(), &Selection::None);
		assert_eq!(p.node("geometry").unwrap().position.map(|pos| pos.x), Some(200.0));
		assert_eq!(p.node("graduate").unwrap().position, None);
	}
}
