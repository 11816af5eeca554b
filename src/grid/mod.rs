//! Heatmap grid: geometry, scene construction and pointer interaction.

pub mod interaction;
pub mod layout;
pub mod scene;

pub use interaction::{Confirm, ElementState, GridSession, HoverTarget};
pub use layout::GridLayout;
pub use scene::{render, CellView, ColumnLabel, FontWeight, GridScene, RowLabel, View, EMPTY_MESSAGE};
