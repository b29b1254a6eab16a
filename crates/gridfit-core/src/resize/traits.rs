//! Terminal capability traits.
//!
//! A terminal is either a windowed console, whose screen buffer and visible
//! view rectangle are sized separately, or a pseudo-terminal with a single
//! row/column size.

use crate::geometry::CharacterGrid;
use crate::resize::errors::ResizeError;

pub trait ConsoleBuffer {
    /// Size of the currently visible view rectangle.
    fn view_grid(&self) -> Result<CharacterGrid, ResizeError>;

    /// Show the top-left `view` cells of the buffer.
    ///
    /// The view must fit inside the current buffer size.
    fn set_view_rect(&mut self, view: CharacterGrid) -> Result<(), ResizeError>;

    /// Resize the screen buffer.
    ///
    /// The buffer must stay at least as large as the current view.
    fn set_buffer_size(&mut self, size: CharacterGrid) -> Result<(), ResizeError>;
}

pub trait PseudoTerminal {
    /// Device path or other human-readable identifier.
    fn describe(&self) -> String;

    fn set_size(&mut self, rows: u16, columns: u16) -> Result<(), ResizeError>;
}
