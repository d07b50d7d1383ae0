//! Placeholder demographic charts drawn with plain HTML.

use leptos::prelude::*;

use super::force_graph::theme::Color;
use crate::panel::{CrossShare, Share, placeholder};
use crate::present::friendly_percent;

const BAR_COLOR: &str = "#277DA1";
const HEAT_LOW: Color = Color::rgb(239, 246, 255);
const HEAT_HIGH: Color = Color::rgb(30, 64, 175);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChartTab {
	Gender,
	Race,
	GenderByRace,
}

impl ChartTab {
	const ALL: [ChartTab; 3] = [ChartTab::Gender, ChartTab::Race, ChartTab::GenderByRace];

	fn label(self) -> &'static str {
		match self {
			ChartTab::Gender => "Gender",
			ChartTab::Race => "Race",
			ChartTab::GenderByRace => "Gender × Race",
		}
	}
}

/// Heat-map cell color, scaled against the largest share.
fn heat_color(share: f64, max: f64) -> String {
	let t = if max > 0.0 { share / max } else { 0.0 };
	HEAT_LOW.lerp(HEAT_HIGH, t).to_css()
}

/// Text color readable on top of [`heat_color`].
fn heat_text(share: f64, max: f64) -> &'static str {
	if max > 0.0 && share / max > 0.55 {
		"#FFFFFF"
	} else {
		"#111827"
	}
}

/// Horizontal bars, largest share first.
#[component]
fn ShareBars(title: &'static str, shares: &'static [Share]) -> impl IntoView {
	let rows = placeholder::sorted(shares)
		.into_iter()
		.map(|s| {
			let width = format!("width: {:.1}%; background: {BAR_COLOR};", s.share * 100.0);
			view! {
				<div class="bar-row">
					<span class="bar-label">{s.group}</span>
					<div class="bar-track">
						<div class="bar-fill" style=width></div>
					</div>
					<span class="bar-value">{friendly_percent(s.share)}</span>
				</div>
			}
		})
		.collect_view();

	view! {
		<div class="chart">
			<p>
				<strong>{title}</strong>
			</p>
			{rows}
			<p class="chart-axis">"Share of students"</p>
		</div>
	}
}

/// Gender rows by race columns.
#[component]
fn HeatGrid(cells: &'static [CrossShare]) -> impl IntoView {
	let mut genders: Vec<&'static str> = Vec::new();
	let mut races: Vec<&'static str> = Vec::new();
	for cell in cells {
		if !genders.contains(&cell.gender) {
			genders.push(cell.gender);
		}
		if !races.contains(&cell.race) {
			races.push(cell.race);
		}
	}
	let max = cells.iter().map(|c| c.share).fold(0.0, f64::max);

	let header = races
		.iter()
		.map(|race| view! { <th>{*race}</th> })
		.collect_view();
	let body = genders
		.into_iter()
		.map(|gender| {
			let row = races
				.iter()
				.map(|race| {
					let share = cells
						.iter()
						.find(|c| c.gender == gender && c.race == *race)
						.map_or(0.0, |c| c.share);
					let style = format!(
						"background: {}; color: {};",
						heat_color(share, max),
						heat_text(share, max)
					);
					view! { <td style=style>{friendly_percent(share)}</td> }
				})
				.collect_view();
			view! {
				<tr>
					<th>{gender}</th>
					{row}
				</tr>
			}
		})
		.collect_view();

	view! {
		<div class="chart">
			<p>
				<strong>"Gender × Race (placeholder)"</strong>
			</p>
			<p>"This is an “intersection”: we look at two things at the same time."</p>
			<table class="heat-grid">
				<thead>
					<tr>
						<th></th>
						{header}
					</tr>
				</thead>
				<tbody>{body}</tbody>
			</table>
		</div>
	}
}

/// Tabbed example charts shown under a course's details.
#[component]
pub fn ExampleCharts() -> impl IntoView {
	let tab = RwSignal::new(ChartTab::Gender);

	let buttons = ChartTab::ALL
		.into_iter()
		.map(|t| {
			view! {
				<button
					class="tab"
					class:active=move || tab.get() == t
					on:click=move |_| tab.set(t)
				>
					{t.label()}
				</button>
			}
		})
		.collect_view();

	view! {
		<section class="example-charts">
			<h3>"Example charts (demo)"</h3>
			<p>"Pick a tab to see a placeholder chart. These are not real numbers yet."</p>
			<div class="tabs">{buttons}</div>
			{move || match tab.get() {
				ChartTab::Gender => {
					view! { <ShareBars title="Gender (placeholder)" shares=&placeholder::GENDER /> }
						.into_any()
				}
				ChartTab::Race => {
					view! { <ShareBars title="Race (placeholder)" shares=&placeholder::RACE /> }
						.into_any()
				}
				ChartTab::GenderByRace => {
					view! { <HeatGrid cells=&placeholder::GENDER_BY_RACE /> }.into_any()
				}
			}}
		</section>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn heat_scale_spans_light_to_dark() {
		assert_eq!(heat_color(0.0, 0.22), HEAT_LOW.to_css());
		assert_eq!(heat_color(0.22, 0.22), HEAT_HIGH.to_css());
		assert_eq!(heat_text(0.22, 0.22), "#FFFFFF");
		assert_eq!(heat_text(0.05, 0.22), "#111827");
		assert_eq!(heat_color(0.1, 0.0), HEAT_LOW.to_css());
	}
}
