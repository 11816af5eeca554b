//! The single floating tooltip
//!
//! There is one tooltip per grid. Whatever element currently has the pointer
//! owns it; a new hover simply overwrites the previous content (last writer
//! wins). Positions are relative to the grid container's bounding box, nudged
//! 10 px right and 10 px up so the box does not sit under the cursor.
//!
//! ```text
//!            hover_start            move_to
//!   Hidden ───────────────▶ Shown ◀─────────┐
//!     ▲                       │  └───────────┘
//!     └───────────────────────┘
//!        hover_end / reset
//! ```

use serde::Serialize;

/// Horizontal offset from the pointer, in pixels.
pub const OFFSET_X: f64 = 10.0;
/// Vertical offset from the pointer, in pixels.
pub const OFFSET_Y: f64 = -10.0;

/// How the tooltip box is aligned to its (x, y) anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    /// Column label: box grows up and to the right of the anchor.
    #[default]
    Label,
    /// Grid cell: box is centered horizontally above the anchor.
    Cell,
}

impl AnchorMode {
    /// CSS transform that places the box relative to its anchor.
    pub fn transform(self) -> &'static str {
        match self {
            AnchorMode::Label => "translate(0, -100%)",
            AnchorMode::Cell => "translate(-50%, -100%)",
        }
    }
}

/// Pointer position in client (viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub client_x: f64,
    pub client_y: f64,
}

impl Pointer {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Bounding box of the element the grid is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
}

impl ContainerRect {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TooltipState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    /// May contain `\n` line breaks.
    pub content: String,
    #[serde(rename = "type")]
    pub mode: AnchorMode,
}

/// Owner of the tooltip state.
#[derive(Debug, Clone, Default)]
pub struct TooltipController {
    state: TooltipState,
}

impl TooltipController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    /// Show `content`. The position is unknown until the first [`move_to`].
    ///
    /// [`move_to`]: TooltipController::move_to
    pub fn hover_start(&mut self, content: impl Into<String>, mode: AnchorMode) {
        self.state = TooltipState {
            visible: true,
            x: 0.0,
            y: 0.0,
            content: content.into(),
            mode,
        };
    }

    /// Track the pointer. Content and visibility are left untouched.
    pub fn move_to(&mut self, pointer: Pointer, container: ContainerRect) {
        self.state.x = pointer.client_x - container.left + OFFSET_X;
        self.state.y = pointer.client_y - container.top + OFFSET_Y;
    }

    /// Hide, keeping the last content and position.
    pub fn hover_end(&mut self) {
        self.state.visible = false;
    }

    /// Back to the initial hidden state. Used when the grid is torn down or
    /// redrawn for a new selection.
    pub fn reset(&mut self) {
        self.state = TooltipState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        let tooltip = TooltipController::new();
        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.state().content, "");
        assert_eq!(tooltip.state().mode, AnchorMode::Label);
    }

    #[test]
    fn test_hover_start_shows_content_at_origin() {
        let mut tooltip = TooltipController::new();
        tooltip.hover_start("Total Score: 3.00", AnchorMode::Label);

        let state = tooltip.state();
        assert!(state.visible);
        assert_eq!(state.content, "Total Score: 3.00");
        assert_eq!((state.x, state.y), (0.0, 0.0));
    }

    #[test]
    fn test_move_is_relative_to_container_with_offset() {
        let mut tooltip = TooltipController::new();
        tooltip.hover_start("x", AnchorMode::Cell);
        tooltip.move_to(Pointer::new(150.0, 220.0), ContainerRect::new(40.0, 100.0));

        assert_eq!(tooltip.state().x, 120.0);
        assert_eq!(tooltip.state().y, 110.0);
    }

    #[test]
    fn test_hover_end_hides_but_keeps_last_state() {
        let mut tooltip = TooltipController::new();
        tooltip.hover_start("Skill: SQL\nScore: 3", AnchorMode::Cell);
        tooltip.move_to(Pointer::new(10.0, 10.0), ContainerRect::default());
        tooltip.hover_end();

        let state = tooltip.state();
        assert!(!state.visible);
        assert_eq!(state.content, "Skill: SQL\nScore: 3");
        assert_eq!(state.mode, AnchorMode::Cell);
    }

    #[test]
    fn test_last_writer_wins() {
        let mut tooltip = TooltipController::new();
        tooltip.hover_start("first", AnchorMode::Label);
        tooltip.move_to(Pointer::new(50.0, 50.0), ContainerRect::default());
        tooltip.hover_start("second", AnchorMode::Cell);

        let state = tooltip.state();
        assert_eq!(state.content, "second");
        assert_eq!(state.mode, AnchorMode::Cell);
        assert_eq!((state.x, state.y), (0.0, 0.0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut tooltip = TooltipController::new();
        tooltip.hover_start("x", AnchorMode::Cell);
        tooltip.move_to(Pointer::new(5.0, 5.0), ContainerRect::default());
        tooltip.reset();
        assert_eq!(tooltip.state(), &TooltipState::default());
    }

    #[test]
    fn test_anchor_transforms() {
        assert_eq!(AnchorMode::Label.transform(), "translate(0, -100%)");
        assert_eq!(AnchorMode::Cell.transform(), "translate(-50%, -100%)");
    }

    #[test]
    fn test_state_serializes_type_field() {
        let mut tooltip = TooltipController::new();
        tooltip.hover_start("x", AnchorMode::Cell);
        let value = serde_json::to_value(tooltip.state()).unwrap();
        assert_eq!(value["type"], "cell");
        assert_eq!(value["visible"], true);
    }
}
