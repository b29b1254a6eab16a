//! Character grid to OS size translation.
//!
//! A pseudo-terminal only needs the grid itself. A windowed console has two
//! independent sizes: the window in pixels and the screen buffer in cells.
//! The window's client area is scaled by the same ratio as the grid while
//! the decoration overhead (borders, title bar) is carried over unchanged.

use tracing::debug;

use super::types::{
    CharacterGrid, ConsoleGeometrySnapshot, PixelSize, RoundingMode, TargetOSDimensions,
};

/// Which kind of terminal the request is translated for.
#[derive(Debug, Clone, Copy)]
pub enum Regime<'a> {
    PseudoTerminal,
    WindowedConsole(&'a ConsoleGeometrySnapshot),
}

/// Translate a requested grid into platform-native dimensions.
///
/// Pure function of its inputs.
pub fn translate(
    requested: CharacterGrid,
    regime: Regime<'_>,
    rounding: RoundingMode,
) -> TargetOSDimensions {
    match regime {
        Regime::PseudoTerminal => TargetOSDimensions::PseudoTerminal {
            rows: requested.rows(),
            columns: requested.columns(),
        },
        Regime::WindowedConsole(snapshot) => {
            let window_pixels = window_pixels(requested, snapshot, rounding);
            debug!(
                event = "core.geometry.translate_completed",
                requested = %requested,
                previous = %snapshot.grid(),
                pixel_width = window_pixels.width,
                pixel_height = window_pixels.height,
            );
            TargetOSDimensions::WindowedConsole {
                window_pixels,
                previous: snapshot.grid(),
                requested,
            }
        }
    }
}

/// Outer window size that shows `requested` cells, decoration included.
pub fn window_pixels(
    requested: CharacterGrid,
    snapshot: &ConsoleGeometrySnapshot,
    rounding: RoundingMode,
) -> PixelSize {
    let old = snapshot.grid();
    let client = snapshot.client();
    let decoration = snapshot.decoration();

    PixelSize::new(
        scale(client.width, requested.columns(), old.columns(), rounding)
            .saturating_add(decoration.width),
        scale(client.height, requested.rows(), old.rows(), rounding)
            .saturating_add(decoration.height),
    )
}

/// `length * numerator / denominator`, computed in i64.
///
/// `denominator` comes from a `CharacterGrid` and is never zero.
fn scale(length: i32, numerator: u16, denominator: u16, rounding: RoundingMode) -> i32 {
    let product = i64::from(length) * i64::from(numerator);
    let denominator = i64::from(denominator);

    let scaled = match rounding {
        RoundingMode::Truncate => product / denominator,
        RoundingMode::Nearest => {
            let doubled = product * 2;
            if doubled >= 0 {
                (doubled + denominator) / (denominator * 2)
            } else {
                (doubled - denominator) / (denominator * 2)
            }
        }
    };

    i32::try_from(scaled).unwrap_or(if scaled > 0 { i32::MAX } else { i32::MIN })
}
