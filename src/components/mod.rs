//! Leptos components making up the dashboard page.

mod charts;
mod details;
pub mod force_graph;
mod sidebar;

pub use details::DetailsPanel;
pub use force_graph::ForceGraphCanvas;
pub use sidebar::Sidebar;
