//! Pointer interactions over a rendered grid
//!
//! Candidate labels and cells each run a tiny state machine:
//!
//! ```text
//! label:  Idle ──over──▶ Hovered (total-score tooltip, follows pointer) ──out──▶ Idle
//!         any state ──click──▶ confirm? ──yes──▶ on_remove(candidate)
//!
//! cell:   Idle ──over──▶ Hovered (value text revealed, tooltip) ──out──▶ Idle
//! ```
//!
//! There is only one pointer, so at most one element is hovered at a time and
//! hovering a new element implicitly leaves the previous one. Removal never
//! touches the scene: the caller rebuilds the matrix and hands a fresh view to
//! [`GridSession::redraw`], which also drops any tooltip left over from the
//! previous pass.

use super::scene::{removal_prompt, View};
use crate::candidate::CandidateId;
use crate::tooltip::{AnchorMode, ContainerRect, Pointer, TooltipController, TooltipState};

/// Element under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    ColumnLabel(usize),
    Cell { row: usize, column: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Idle,
    Hovered,
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Interaction state for one mounted grid.
pub struct GridSession<R>
where
    R: FnMut(&CandidateId),
{
    view: View,
    hover: Option<HoverTarget>,
    tooltip: TooltipController,
    on_remove: R,
}

impl<R> GridSession<R>
where
    R: FnMut(&CandidateId),
{
    pub fn new(view: View, on_remove: R) -> Self {
        Self {
            view,
            hover: None,
            tooltip: TooltipController::new(),
            on_remove,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn tooltip(&self) -> &TooltipState {
        self.tooltip.state()
    }

    pub fn hovered(&self) -> Option<HoverTarget> {
        self.hover
    }

    /// Pointer entered `target`. Returns false if the target does not exist.
    pub fn pointer_over(&mut self, target: HoverTarget) -> bool {
        let Some(scene) = self.view.scene() else {
            return false;
        };

        let (content, mode) = match target {
            HoverTarget::ColumnLabel(column) => match scene.column_labels.get(column) {
                Some(label) => (label.tooltip.clone(), AnchorMode::Label),
                None => return false,
            },
            HoverTarget::Cell { row, column } => match scene.cell(row, column) {
                Some(cell) => (cell.tooltip.clone(), AnchorMode::Cell),
                None => return false,
            },
        };

        self.hover = Some(target);
        self.tooltip.hover_start(content, mode);
        true
    }

    /// Pointer moved over the hovered element.
    pub fn pointer_move(&mut self, pointer: Pointer, container: ContainerRect) {
        if self.hover.is_some() {
            self.tooltip.move_to(pointer, container);
        }
    }

    /// Pointer left the hovered element.
    pub fn pointer_out(&mut self) {
        if self.hover.take().is_some() {
            self.tooltip.hover_end();
        }
    }

    /// Candidate label clicked. If `confirm` agrees, the removal callback is
    /// invoked and the removed id returned.
    pub fn click_label<C: Confirm>(&mut self, column: usize, confirm: &mut C) -> Option<CandidateId> {
        let label = self.view.scene()?.column_labels.get(column)?;
        let candidate = label.candidate.clone();

        if !confirm.confirm(&removal_prompt(&label.name)) {
            return None;
        }

        tracing::debug!(candidate = %candidate, "candidate removal confirmed");
        (self.on_remove)(&candidate);
        Some(candidate)
    }

    pub fn label_state(&self, column: usize) -> ElementState {
        match self.hover {
            Some(HoverTarget::ColumnLabel(c)) if c == column => ElementState::Hovered,
            _ => ElementState::Idle,
        }
    }

    pub fn cell_state(&self, row: usize, column: usize) -> ElementState {
        match self.hover {
            Some(HoverTarget::Cell { row: r, column: c }) if r == row && c == column => {
                ElementState::Hovered
            }
            _ => ElementState::Idle,
        }
    }

    /// Whether a cell's value text is currently shown.
    pub fn value_visible(&self, row: usize, column: usize) -> bool {
        let always = self
            .view
            .scene()
            .and_then(|scene| scene.cell(row, column))
            .map(|cell| cell.text_always_visible)
            .unwrap_or(false);
        always || self.cell_state(row, column) == ElementState::Hovered
    }

    /// Replace the view after the selection changed. Hover and tooltip state
    /// from the previous pass are discarded.
    pub fn redraw(&mut self, view: View) {
        self.view = view;
        self.hover = None;
        self.tooltip.reset();
    }

    /// Tear down, clearing the tooltip.
    pub fn unmount(&mut self) {
        self.hover = None;
        self.tooltip.reset();
    }
}
