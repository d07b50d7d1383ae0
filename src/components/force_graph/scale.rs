//! Zoom-dependent scaling configuration for graph visuals.
//!
//! This module centralizes all zoom-dependent visual parameters, making it easy to
//! understand and tune how elements behave at different zoom levels.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The coordinate system of the graph, shared with the fixed
//!   course positions in the data files. Values in world-space scale
//!   proportionally with zoom (appear larger when zoomed in).
//! - **Screen-space**: Pixel coordinates on the canvas. Values in screen-space
//!   remain constant regardless of zoom level.
//!
//! # Scaling Behaviors
//!
//! - [`ScaleBehavior::World`]: Scales with zoom, like the course circles.
//! - [`ScaleBehavior::Screen`]: Constant screen size, like click tolerances.
//! - [`ScaleBehavior::Clamped`]: World-space scaling with min/max screen-size bounds,
//!   used for text so labels stay legible when zoomed out.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	/// `(min_screen_px, max_screen_px)` - use `f64::NEG_INFINITY` or `f64::INFINITY` for unbounded.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	///
	/// The returned value should be used directly in world-space drawing commands
	/// (after the canvas transform has been applied).
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Course circle sizing.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Circle radius in world units.
	pub radius: f64,
	pub radius_behavior: ScaleBehavior,
	/// Course name font size in world units.
	pub label_size: f64,
	pub label_behavior: ScaleBehavior,
}

/// Transition line sizing.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Line width in world units.
	pub line_width: f64,
	/// Line width of repeat loops in world units.
	pub loop_width: f64,
	pub width_behavior: ScaleBehavior,
	/// How far from a line a click still selects it, in screen pixels.
	pub hit_tolerance: f64,
	pub hit_behavior: ScaleBehavior,
	/// Percentage label font size in world units.
	pub label_size: f64,
	pub label_behavior: ScaleBehavior,
	/// Bend of the two lines between a pair of courses linked both ways
	/// (0.0 = straight).
	pub curve_tension: f64,
}

/// Arrowhead sizing.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Arrowhead length in world units.
	pub size: f64,
	pub size_behavior: ScaleBehavior,
}

/// Repeat loop geometry.
#[derive(Clone, Debug)]
pub struct LoopScaleConfig {
	/// Loop radius in world units.
	pub radius: f64,
	/// Direction of the loop from the node center, in radians
	/// (canvas y grows downwards, so negative angles point up).
	pub angle: f64,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	pub node: NodeScaleConfig,
	pub edge: EdgeScaleConfig,
	pub arrow: ArrowScaleConfig,
	pub self_loop: LoopScaleConfig,
	/// Pointer travel in screen pixels that turns a press into a drag.
	pub click_slop: f64,
	/// Margin kept around the graph when fitting it to the canvas.
	pub fit_padding: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 32.0,
				radius_behavior: ScaleBehavior::World,
				label_size: 12.0,
				label_behavior: ScaleBehavior::Clamped {
					min_screen: 9.0,
					max_screen: 26.0,
				},
			},
			edge: EdgeScaleConfig {
				line_width: 3.0,
				loop_width: 4.0,
				width_behavior: ScaleBehavior::Clamped {
					min_screen: 1.0,
					max_screen: f64::INFINITY,
				},
				hit_tolerance: 6.0,
				hit_behavior: ScaleBehavior::Screen,
				label_size: 14.0,
				label_behavior: ScaleBehavior::Clamped {
					min_screen: 10.0,
					max_screen: 24.0,
				},
				curve_tension: 0.35,
			},
			arrow: ArrowScaleConfig {
				size: 12.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 5.0,
					max_screen: 30.0,
				},
			},
			self_loop: LoopScaleConfig {
				radius: 18.0,
				angle: -std::f64::consts::FRAC_PI_4,
			},
			click_slop: 4.0,
			fit_padding: 60.0,
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering and hit-testing
/// functions. All sizes are in world-space (ready to use after canvas
/// transform).
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	pub node_radius: f64,
	pub node_label_size: f64,
	pub edge_line_width: f64,
	pub loop_line_width: f64,
	pub edge_hit_tolerance: f64,
	pub edge_label_size: f64,
	pub arrow_size: f64,
	pub loop_radius: f64,
	/// Unit vector from a node center towards its repeat loop.
	pub loop_dir: (f64, f64),
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let edge = &config.edge;
		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			node_label_size: config.node.label_behavior.apply(config.node.label_size, k),
			edge_line_width: edge.width_behavior.apply(edge.line_width, k),
			loop_line_width: edge.width_behavior.apply(edge.loop_width, k),
			edge_hit_tolerance: edge.hit_behavior.apply(edge.hit_tolerance, k),
			edge_label_size: edge.label_behavior.apply(edge.label_size, k),
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
			loop_radius: config.self_loop.radius,
			loop_dir: (config.self_loop.angle.cos(), config.self_loop.angle.sin()),
		}
	}

	/// Center of the repeat loop drawn on a node at `(x, y)`.
	pub fn loop_center(&self, x: f64, y: f64) -> (f64, f64) {
		let reach = self.node_radius + self.loop_radius * 0.4;
		(x + self.loop_dir.0 * reach, y + self.loop_dir.1 * reach)
	}

	/// Font string for course names.
	pub fn node_font(&self, family: &str) -> String {
		format!("bold {}px {}", self.node_label_size, family)
	}

	/// Font string for percentage labels.
	pub fn edge_font(&self, family: &str) -> String {
		format!("{}px {}", self.edge_label_size, family)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn behaviors_convert_to_world_units() {
		assert_eq!(ScaleBehavior::World.apply(10.0, 2.0), 10.0);
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 2.0), 5.0);
		let clamped = ScaleBehavior::Clamped {
			min_screen: 8.0,
			max_screen: 20.0,
		};
		// At k = 0.5 a 10-unit label would be 5px on screen; grow it to 8px.
		assert_eq!(clamped.apply(10.0, 0.5), 16.0);
		assert_eq!(clamped.apply(10.0, 1.0), 10.0);
		assert_eq!(clamped.apply(10.0, 4.0), 5.0);
	}

	#[test]
	fn loop_sits_outside_the_node() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 1.0);
		let (cx, cy) = scale.loop_center(0.0, 0.0);
		assert!(cx > 0.0 && cy < 0.0);
		assert!((cx * cx + cy * cy).sqrt() > scale.node_radius);
	}
}
