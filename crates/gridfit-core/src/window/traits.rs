//! Window capability trait.

use crate::geometry::PixelSize;
use crate::process::Pid;
use crate::window::errors::WindowError;

/// A top-level window on the current platform.
///
/// Each platform backend implements this over its native handle type.
/// Every capability may fail independently; callers decide which failures
/// are fatal.
pub trait WindowHandle {
    /// Platform window identifier, for logging and display.
    fn id(&self) -> u64;

    /// Window title, if the platform reported one.
    fn title(&self) -> Option<String> {
        None
    }

    /// The process that owns this window.
    fn owning_process(&self) -> Result<Pid, WindowError>;

    /// Size of the drawable area, excluding borders and title bar.
    fn client_frame(&self) -> Result<PixelSize, WindowError>;

    /// Size of the whole window including decorations.
    fn outer_size(&self) -> Result<PixelSize, WindowError>;

    /// Hide the window. It is not shown again automatically.
    fn hide(&self) -> Result<(), WindowError>;

    /// Move the window to `(x, y)` and resize its outer frame to `size`.
    fn set_position_and_size(&self, x: i32, y: i32, size: PixelSize) -> Result<(), WindowError>;
}

impl<'a> std::fmt::Debug for dyn WindowHandle + 'a {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowHandle")
            .field("id", &self.id())
            .field("title", &self.title())
            .finish_non_exhaustive()
    }
}
