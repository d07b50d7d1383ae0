//! Dashboard-level settings.
//!
//! Defaults cover the bundled schools. A page may override any field by
//! embedding `<script id="dashboard-config" type="application/json">`.

use serde::Deserialize;

use crate::error::ConfigError;

/// Element id of the optional configuration script.
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

/// Tunable dashboard behavior.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
	/// How many next-step and came-from transitions the details panel lists.
	pub top_transitions: usize,
	/// Height of the graph canvas in CSS pixels.
	pub graph_height: f64,
	/// Allowed distance from 1.0 for a course's outgoing probability sum
	/// before the load-time audit warns about it.
	pub sum_tolerance: f64,
}

impl Default for DashboardConfig {
	fn default() -> Self {
		Self {
			top_transitions: 6,
			graph_height: 740.0,
			sum_tolerance: 0.02,
		}
	}
}

impl DashboardConfig {
	/// Parse a JSON override. Missing fields keep their defaults.
	pub fn from_json(text: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(text)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_override_keeps_defaults() {
		let config = DashboardConfig::from_json(r#"{ "top_transitions": 3 }"#).unwrap();
		assert_eq!(config.top_transitions, 3);
		assert_eq!(config.graph_height, 740.0);
		assert_eq!(config.sum_tolerance, 0.02);
	}

	#[test]
	fn invalid_json_is_an_error() {
		assert!(DashboardConfig::from_json("{ top_transitions: }").is_err());
	}
}
