//! Course graph visualization component.
//!
//! Draws a derived [`Presentation`](crate::present::Presentation) on an HTML
//! canvas with:
//! - Fixed course positions, with a force simulation placing the rest
//! - Arrowed transitions, bent apart when two courses link both ways
//! - Repeat loops for courses students take again
//! - Pan, zoom, node dragging and click selection
//! - Eased color and opacity changes between selections
//!
//! # Example
//!
//! ```ignore
//! use course_pathways::components::force_graph::ForceGraphCanvas;
//!
//! view! {
//!     <ForceGraphCanvas
//!         data=presentation
//!         on_select=move |target| session.update(|s| s.apply_click(target, &ids))
//!         height=740.0
//!     />
//! }
//! ```

mod component;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use theme::Theme;
