//! Canvas rendering for the course graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Transition lines, arrowheads and repeat loops (world space)
//! 3. Dimmed courses, then courses in focus on top
//! 4. Percentage labels above everything else

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{ForceGraphState, curve_control, quadratic_point};
use super::theme::{Color, Theme};
use crate::present::ElementClass;

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);
	let positions = state.positions();

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let labels = draw_edges(state, ctx, config, &scale, &positions);
	draw_nodes(state, ctx, &scale, theme, &positions);
	for label in &labels {
		draw_edge_label(ctx, &scale, theme, label);
	}

	ctx.restore();
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// A percentage label placed in world space, drawn after the nodes.
struct EdgeLabel<'a> {
	text: &'a str,
	x: f64,
	y: f64,
	alpha: f64,
}

fn draw_edges<'a>(
	state: &'a ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	positions: &[(f64, f64)],
) -> Vec<EdgeLabel<'a>> {
	let mut labels = Vec::new();

	// Dimmed transitions underneath the rest.
	let mut order: Vec<usize> = (0..state.presentation.edges.len()).collect();
	order.sort_by_key(|&i| !state.presentation.edges[i].has_class(ElementClass::Dim));

	for element in order {
		let view = &state.presentation.edges[element];
		let Some((src, tgt)) = state.edge_ends(element) else {
			continue;
		};
		let (color, alpha) = state.edge_style(element);
		let (p1, p2) = (positions[src], positions[tgt]);

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_fill_style_str(&color.to_css());

		let anchor = if view.self_loop {
			draw_self_loop(ctx, scale, p1)
		} else if state.is_curved(element) {
			draw_curved_edge(ctx, scale, p1, p2, config.edge.curve_tension)
		} else {
			draw_straight_edge(ctx, scale, p1, p2)
		};

		if !view.label.is_empty() {
			if let Some((x, y)) = anchor {
				labels.push(EdgeLabel {
					text: &view.label,
					x,
					y,
					alpha,
				});
			}
		}
	}

	ctx.set_global_alpha(1.0);
	labels
}

/// Returns the label anchor, or `None` when the endpoints overlap.
fn draw_straight_edge(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	p1: (f64, f64),
	p2: (f64, f64),
) -> Option<(f64, f64)> {
	let (dx, dy) = (p2.0 - p1.0, p2.1 - p1.1);
	let dist = dx.hypot(dy);
	if dist < scale.node_radius * 2.0 {
		return None;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let tip = (p2.0 - ux * scale.node_radius, p2.1 - uy * scale.node_radius);

	ctx.set_line_width(scale.edge_line_width);
	ctx.begin_path();
	ctx.move_to(p1.0 + ux * scale.node_radius, p1.1 + uy * scale.node_radius);
	ctx.line_to(tip.0 - ux * scale.arrow_size, tip.1 - uy * scale.arrow_size);
	ctx.stroke();

	draw_arrowhead(ctx, scale, tip, (ux, uy));
	Some(((p1.0 + p2.0) / 2.0, (p1.1 + p2.1) / 2.0))
}

/// One of a pair of opposite transitions, bent apart so both stay visible.
fn draw_curved_edge(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	p1: (f64, f64),
	p2: (f64, f64),
	tension: f64,
) -> Option<(f64, f64)> {
	if (p2.0 - p1.0).hypot(p2.1 - p1.1) < scale.node_radius * 2.0 {
		return None;
	}
	let ctrl = curve_control(p1, p2, tension);

	// Trim both ends to the node circles along the tangent at each end.
	let unit = |from: (f64, f64), to: (f64, f64)| {
		let (dx, dy) = (to.0 - from.0, to.1 - from.1);
		let d = dx.hypot(dy).max(0.001);
		(dx / d, dy / d)
	};
	let (sx, sy) = unit(p1, ctrl);
	let (ex, ey) = unit(ctrl, p2);
	let start = (p1.0 + sx * scale.node_radius, p1.1 + sy * scale.node_radius);
	let tip = (p2.0 - ex * scale.node_radius, p2.1 - ey * scale.node_radius);
	let end = (tip.0 - ex * scale.arrow_size, tip.1 - ey * scale.arrow_size);

	ctx.set_line_width(scale.edge_line_width);
	ctx.begin_path();
	ctx.move_to(start.0, start.1);
	let _ = ctx.quadratic_curve_to(ctrl.0, ctrl.1, end.0, end.1);
	ctx.stroke();

	draw_arrowhead(ctx, scale, tip, (ex, ey));
	Some(quadratic_point(p1, ctrl, p2, 0.5))
}

/// A repeat loop on the upper right of the course.
fn draw_self_loop(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	p: (f64, f64),
) -> Option<(f64, f64)> {
	let (cx, cy) = scale.loop_center(p.0, p.1);

	ctx.set_line_width(scale.loop_line_width);
	ctx.begin_path();
	let _ = ctx.arc(cx, cy, scale.loop_radius, 0.0, 2.0 * PI);
	ctx.stroke();

	// Arrow re-entering the node a little clockwise of the loop direction.
	let (lx, ly) = scale.loop_dir;
	let angle = ly.atan2(lx) + 0.5;
	let (ux, uy) = (angle.cos(), angle.sin());
	let tip = (p.0 + ux * scale.node_radius, p.1 + uy * scale.node_radius);
	draw_arrowhead(ctx, scale, tip, (-ux, -uy));

	let reach = scale.loop_radius + scale.edge_label_size * 0.8;
	Some((cx + lx * reach, cy + ly * reach))
}

/// Filled triangle with its point at `tip`, facing `dir`.
fn draw_arrowhead(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	tip: (f64, f64),
	dir: (f64, f64),
) {
	let (ux, uy) = dir;
	let (back_x, back_y) = (tip.0 - ux * scale.arrow_size, tip.1 - uy * scale.arrow_size);
	let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

	ctx.begin_path();
	ctx.move_to(tip.0, tip.1);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_edge_label(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	label: &EdgeLabel<'_>,
) {
	let style = &theme.edge_label;
	ctx.set_font(&scale.edge_font(style.font_family));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	let width = ctx
		.measure_text(label.text)
		.map(|m| m.width())
		.unwrap_or(scale.edge_label_size * label.text.len() as f64 * 0.6);
	let height = scale.edge_label_size;
	let pad = style.padding / scale.k.max(0.1);

	ctx.set_global_alpha(label.alpha);
	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(
		label.x - width / 2.0 - pad,
		label.y - height / 2.0 - pad,
		width + 2.0 * pad,
		height + 2.0 * pad,
	);
	ctx.set_fill_style_str(&style.color.to_css());
	let _ = ctx.fill_text(label.text, label.x, label.y);
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	positions: &[(f64, f64)],
) {
	let nodes = &state.presentation.nodes;

	// Pass 1: dimmed courses; pass 2: everything else on top.
	for dimmed in [true, false] {
		for (element, view) in nodes.iter().enumerate() {
			if view.has_class(ElementClass::Dim) != dimmed {
				continue;
			}
			let (color, alpha) = state.node_style(element);
			let border = Color::parse(view.border);
			draw_node(
				ctx,
				scale,
				theme,
				positions[element],
				color,
				alpha,
				(border, view.border_width),
			);
			draw_node_label(ctx, scale, theme, positions[element], &view.label, alpha);
		}
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	(x, y): (f64, f64),
	color: Color,
	alpha: f64,
	(border, border_width): (Color, f64),
) {
	let radius = scale.node_radius;
	ctx.set_global_alpha(alpha);

	let gradient = theme
		.node
		.use_gradient
		.then(|| ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius))
		.and_then(Result::ok);

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &color.lighten(0.3).to_css());
			let _ = gradient.add_color_stop(0.7, &color.to_css());
			let _ = gradient.add_color_stop(1.0, &color.darken(0.15).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&color.to_css()),
	}
	ctx.fill();

	if border_width > 0.0 {
		ctx.set_stroke_style_str(&border.to_css());
		ctx.set_line_width(border_width / scale.k);
		ctx.stroke();
	}

	ctx.set_global_alpha(1.0);
}

fn draw_node_label(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	(x, y): (f64, f64),
	label: &str,
	alpha: f64,
) {
	let style = &theme.node;
	ctx.set_font(&scale.node_font(style.font_family));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	let max_width = scale.node_radius * 1.7;
	let lines = wrap_label(label, |line| {
		ctx.measure_text(line)
			.map(|m| m.width() <= max_width)
			.unwrap_or(true)
	});

	let line_height = scale.node_label_size * 1.15;
	let top = y - line_height * (lines.len() as f64 - 1.0) / 2.0;

	ctx.set_global_alpha(alpha);
	ctx.set_fill_style_str(&style.label_color.to_css());
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, x, top + line_height * i as f64);
	}
	ctx.set_global_alpha(1.0);
}

/// Greedy word wrap. A single word wider than the limit gets its own line.
fn wrap_label(label: &str, fits: impl Fn(&str) -> bool) -> Vec<String> {
	let mut lines: Vec<String> = Vec::new();
	let mut current = String::new();
	for word in label.split_whitespace() {
		if current.is_empty() {
			current.push_str(word);
			continue;
		}
		let candidate = format!("{current} {word}");
		if fits(&candidate) {
			current = candidate;
		} else {
			lines.push(std::mem::replace(&mut current, word.to_string()));
		}
	}
	if !current.is_empty() {
		lines.push(current);
	}
	lines
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wraps_on_word_boundaries() {
		let fits = |s: &str| s.len() <= 10;
		assert_eq!(wrap_label("Algebra I", fits), ["Algebra I"]);
		assert_eq!(
			wrap_label("IB Math Analysis HL", fits),
			["IB Math", "Analysis", "HL"]
		);
		assert_eq!(wrap_label("Precalculus Honors", fits), ["Precalculus", "Honors"]);
		assert!(wrap_label("  ", fits).is_empty());
	}
}
