//! Display attributes for every course and transition.
//!
//! [`derive`] is a pure function of the loaded graph and the current
//! selection. Each interaction recomputes the whole [`Presentation`], which
//! the canvas then draws.

mod derive;
pub mod palette;
mod selection;

pub use derive::derive;
pub use selection::Selection;

use crate::graph::Position;

/// Style tags attached to rendered elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementClass {
	/// Outside the current focus.
	Dim,
	/// The exactly selected course.
	Selected,
	/// A transition inside the current focus.
	Focus,
	/// A transition from a course to itself.
	SelfLoop,
}

impl ElementClass {
	pub fn as_str(self) -> &'static str {
		match self {
			ElementClass::Dim => "dim",
			ElementClass::Selected => "selected",
			ElementClass::Focus => "focus",
			ElementClass::SelfLoop => "selfloop",
		}
	}
}

fn class_list(classes: &[ElementClass]) -> String {
	classes
		.iter()
		.map(|c| c.as_str())
		.collect::<Vec<_>>()
		.join(" ")
}

/// How one course is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeView {
	pub id: String,
	pub label: String,
	/// Hex fill color.
	pub fill: &'static str,
	pub opacity: f64,
	pub border: &'static str,
	pub border_width: f64,
	pub classes: Vec<ElementClass>,
	/// Fixed coordinate; `None` leaves placement to the canvas.
	pub position: Option<Position>,
}

impl NodeView {
	pub fn has_class(&self, class: ElementClass) -> bool {
		self.classes.contains(&class)
	}

	/// Space-separated class names.
	pub fn class_list(&self) -> String {
		class_list(&self.classes)
	}
}

/// How one transition is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeView {
	pub id: String,
	pub source: String,
	pub target: String,
	/// Percentage text, empty when the label is hidden.
	pub label: String,
	/// Hex line and arrow color.
	pub color: &'static str,
	pub opacity: f64,
	pub classes: Vec<ElementClass>,
	pub self_loop: bool,
}

impl EdgeView {
	pub fn has_class(&self, class: ElementClass) -> bool {
		self.classes.contains(&class)
	}

	/// Space-separated class names.
	pub fn class_list(&self) -> String {
		class_list(&self.classes)
	}
}

/// Everything the canvas needs for one render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Presentation {
	pub nodes: Vec<NodeView>,
	pub edges: Vec<EdgeView>,
	/// Whether a usable selection is dimming part of the graph.
	pub focus: bool,
}

impl Presentation {
	pub fn node(&self, id: &str) -> Option<&NodeView> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge(&self, id: &str) -> Option<&EdgeView> {
		self.edges.iter().find(|e| e.id == id)
	}
}

/// Probability as a whole percentage, e.g. `0.2` → `"20%"`.
pub fn friendly_percent(probability: f64) -> String {
	format!("{:.0}%", probability * 100.0)
}
