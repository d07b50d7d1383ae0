//! Fixed colors and emphasis values for course nodes and transition edges.

/// Fill for courses whose primary track has no palette entry.
pub const FALLBACK_FILL: &str = "#2B2D42";
/// Fill and line color of anything outside the current focus.
pub const DIM_COLOR: &str = "#D0D4DC";
/// Neutral transition line color.
pub const EDGE_COLOR: &str = "#8D99AE";
/// Line color of focused transitions.
pub const EDGE_HIGHLIGHT: &str = "#111827";
pub const NODE_BORDER: &str = "#111827";

pub const NODE_OPACITY: f64 = 1.0;
pub const NODE_DIM_OPACITY: f64 = 0.18;
pub const EDGE_OPACITY: f64 = 0.85;
pub const EDGE_FOCUS_OPACITY: f64 = 1.0;
pub const EDGE_DIM_OPACITY: f64 = 0.10;

pub const BORDER_WIDTH: f64 = 2.0;
pub const SELECTED_BORDER_WIDTH: f64 = 6.0;

const TRACK_COLORS: &[(&str, &str)] = &[
	("Special education", "#7B61FF"),
	("Lower-basic", "#FF8C42"),
	("Upper-basic", "#F9C74F"),
	("Regular", "#43AA8B"),
	("Accelerated", "#277DA1"),
	("Honors", "#577590"),
	("Pre-IB", "#4D908E"),
	("IB-general", "#90BE6D"),
	("IB-standard", "#F9844A"),
	("IB-honors", "#F94144"),
];

/// Palette color of a track, if it has one.
pub fn track_color(track: &str) -> Option<&'static str> {
	TRACK_COLORS
		.iter()
		.find(|(name, _)| *name == track)
		.map(|(_, color)| *color)
}

/// Node fill for a course whose primary track is `track`.
pub fn fill_for(track: Option<&str>) -> &'static str {
	track.and_then(track_color).unwrap_or(FALLBACK_FILL)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_and_missing_tracks_fall_back() {
		assert_eq!(fill_for(Some("Honors")), "#577590");
		assert_eq!(fill_for(Some("Night classes")), FALLBACK_FILL);
		assert_eq!(fill_for(None), FALLBACK_FILL);
	}
}
