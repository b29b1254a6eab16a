//! Step schedule for windowed-console resizes.
//!
//! The OS requires the view rectangle to fit inside the screen buffer at
//! every moment. Each axis is therefore ordered by its own direction: a
//! growing axis enlarges the buffer before the view, a shrinking axis
//! shrinks the view before the buffer.

use crate::geometry::{CharacterGrid, PixelSize};
use crate::resize::types::ResizeStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDirection {
    Grow,
    Shrink,
    Unchanged,
}

/// Half of an axis pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisStep {
    Buffer,
    View,
}

impl AxisDirection {
    pub fn between(old: u16, new: u16) -> Self {
        match new.cmp(&old) {
            std::cmp::Ordering::Greater => AxisDirection::Grow,
            std::cmp::Ordering::Less => AxisDirection::Shrink,
            std::cmp::Ordering::Equal => AxisDirection::Unchanged,
        }
    }

    /// Directional policy table.
    pub fn order(self) -> [AxisStep; 2] {
        match self {
            AxisDirection::Grow => [AxisStep::Buffer, AxisStep::View],
            AxisDirection::Shrink | AxisDirection::Unchanged => [AxisStep::View, AxisStep::Buffer],
        }
    }
}

/// The five steps of a windowed-console resize, in execution order.
///
/// 1. outer window pixels
/// 2-3. column axis: view of at most the old and new size, buffer at the
///    new column count and old row count
/// 4-5. row axis: view and buffer at the full requested size
pub fn plan_console_steps(
    window_pixels: PixelSize,
    previous: CharacterGrid,
    requested: CharacterGrid,
) -> Vec<ResizeStep> {
    let mut steps = Vec::with_capacity(5);
    steps.push(ResizeStep::SetWindowPixels(window_pixels));

    let column_pair = (
        ResizeStep::SetViewRect(previous.min_each(requested)),
        ResizeStep::SetBufferSize(requested.with_rows_of(previous)),
    );
    push_axis(
        &mut steps,
        AxisDirection::between(previous.columns(), requested.columns()),
        column_pair,
    );

    let row_pair = (
        ResizeStep::SetViewRect(requested),
        ResizeStep::SetBufferSize(requested),
    );
    push_axis(
        &mut steps,
        AxisDirection::between(previous.rows(), requested.rows()),
        row_pair,
    );

    steps
}

fn push_axis(
    steps: &mut Vec<ResizeStep>,
    direction: AxisDirection,
    (view, buffer): (ResizeStep, ResizeStep),
) {
    for half in direction.order() {
        steps.push(match half {
            AxisStep::View => view,
            AxisStep::Buffer => buffer,
        });
    }
}
