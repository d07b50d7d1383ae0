//! Visual theming for the course graph canvas.
//!
//! Element colors come from the derived presentation; the theme covers
//! everything around them: background, label text and label backdrops.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// Linear interpolation between two colors
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a * (1.0 - t) + other.a * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation;
	/// anything else becomes mid gray.
	pub fn parse(color_str: &str) -> Color {
		if color_str.starts_with('#') && color_str.len() == 7 && color_str.is_ascii() {
			let channel = |range: std::ops::Range<usize>| {
				u8::from_str_radix(&color_str[range], 16).unwrap_or(128)
			};
			Color::rgb(channel(1..3), channel(3..5), channel(5..7))
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let channel = |i: usize| {
				nums.get(i)
					.and_then(|s| s.trim().parse().ok())
					.unwrap_or(128)
			};
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Color::rgba(channel(0), channel(1), channel(2), a)
		} else {
			Color::rgb(128, 128, 128)
		}
	}
}

/// Course node style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes get a soft radial shading.
	pub use_gradient: bool,
	/// Course name color.
	pub label_color: Color,
	pub font_family: &'static str,
}

/// Transition label style.
#[derive(Clone, Debug)]
pub struct EdgeLabelStyle {
	pub color: Color,
	/// Backdrop drawn behind the percentage text.
	pub background: Color,
	/// Backdrop padding in world units.
	pub padding: f64,
	pub font_family: &'static str,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: Color,
	pub node: NodeStyle,
	pub edge_label: EdgeLabelStyle,
}

impl Theme {
	/// Light page theme with white labels on colored nodes.
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: Color::rgb(255, 255, 255),
			node: NodeStyle {
				use_gradient: true,
				label_color: Color::rgb(255, 255, 255),
				font_family: "sans-serif",
			},
			edge_label: EdgeLabelStyle {
				color: Color::rgb(17, 24, 39),
				background: Color::rgba(255, 255, 255, 0.85),
				padding: 3.0,
				font_family: "sans-serif",
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_functional_colors() {
		assert_eq!(Color::parse("#43AA8B"), Color::rgb(0x43, 0xaa, 0x8b));
		assert_eq!(Color::parse("rgba(1, 2, 3, 0.5)"), Color::rgba(1, 2, 3, 0.5));
		assert_eq!(Color::parse("teal"), Color::rgb(128, 128, 128));
	}

	#[test]
	fn lerp_reaches_both_ends() {
		let (a, b) = (Color::parse("#D0D4DC"), Color::parse("#111827"));
		assert_eq!(a.lerp(b, 0.0), a);
		assert_eq!(a.lerp(b, 1.0), b);
		assert_eq!(a.lerp(b, 1.0).to_css(), "#111827");
	}
}
