//! JSON output shapes for `--json`.

use serde::Serialize;

use gridfit_core::{Pid, PixelSize, ResizeOutcome, WindowHandle};

#[derive(Serialize)]
pub struct WindowOutput {
    pub id: u64,
    pub title: Option<String>,
    pub client: Option<PixelSize>,
    pub outer: Option<PixelSize>,
}

impl WindowOutput {
    /// Sizes that cannot be read are reported as null.
    pub fn from_window(window: &dyn WindowHandle) -> Self {
        Self {
            id: window.id(),
            title: window.title(),
            client: window.client_frame().ok(),
            outer: window.outer_size().ok(),
        }
    }
}

#[derive(Serialize)]
pub struct LocateOutput {
    pub pid: Pid,
    pub processes: Vec<Pid>,
    pub owner: Option<Pid>,
    pub window: Option<WindowOutput>,
}

#[derive(Serialize)]
pub struct ResizeResult {
    pub requested: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ResizeOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_pixels: Option<PixelSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct ResizeOutput {
    pub pid: Pid,
    pub window: Option<u64>,
    pub results: Vec<ResizeResult>,
}
