use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::GeometryError;

/// A terminal size in text cells.
///
/// Both components are always positive. Construct with [`CharacterGrid::new`]
/// or parse the `COLUMNSxROWS` form with [`str::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CharacterGrid {
    columns: u16,
    rows: u16,
}

impl CharacterGrid {
    pub fn new(columns: u16, rows: u16) -> Result<Self, GeometryError> {
        if columns == 0 || rows == 0 {
            return Err(GeometryError::ZeroDimension { columns, rows });
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Per-component minimum of two grids.
    pub fn min_each(self, other: CharacterGrid) -> CharacterGrid {
        CharacterGrid {
            columns: self.columns.min(other.columns),
            rows: self.rows.min(other.rows),
        }
    }

    /// This grid's columns with `other`'s rows.
    pub fn with_rows_of(self, other: CharacterGrid) -> CharacterGrid {
        CharacterGrid {
            columns: self.columns,
            rows: other.rows,
        }
    }
}

impl fmt::Display for CharacterGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

impl FromStr for CharacterGrid {
    type Err = GeometryError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.split(['x', 'X']).map(str::trim).collect();
        let [columns, rows] = parts.as_slice() else {
            return Err(GeometryError::MalformedGrid {
                input: input.to_string(),
            });
        };

        let parse = |part: &str, axis: &str| {
            part.parse::<u16>()
                .map_err(|e| GeometryError::InvalidDimension {
                    input: input.to_string(),
                    reason: format!("{} '{}' is not a valid count: {}", axis, part, e),
                })
        };

        let columns = parse(*columns, "columns")?;
        let rows = parse(*rows, "rows")?;
        CharacterGrid::new(columns, rows)
    }
}

/// A window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelSize {
    pub width: i32,
    pub height: i32,
}

impl PixelSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for PixelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}px", self.width, self.height)
    }
}

/// How scaled client-area pixel lengths are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Drop the fractional part.
    #[default]
    Truncate,
    /// Round half away from zero.
    Nearest,
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "truncate" => Ok(RoundingMode::Truncate),
            "nearest" => Ok(RoundingMode::Nearest),
            other => Err(format!(
                "Unknown rounding mode '{}' (expected truncate or nearest)",
                other
            )),
        }
    }
}

/// Console and window geometry captured immediately before one resize.
///
/// The grid is the currently visible view (not the scrollback buffer), so
/// it is never zero and can be divided by safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleGeometrySnapshot {
    grid: CharacterGrid,
    client: PixelSize,
    outer: PixelSize,
}

impl ConsoleGeometrySnapshot {
    pub fn new(grid: CharacterGrid, client: PixelSize, outer: PixelSize) -> Self {
        Self {
            grid,
            client,
            outer,
        }
    }

    pub fn grid(&self) -> CharacterGrid {
        self.grid
    }

    pub fn client(&self) -> PixelSize {
        self.client
    }

    pub fn outer(&self) -> PixelSize {
        self.outer
    }

    /// Pixels spent on borders and title bar.
    pub fn decoration(&self) -> PixelSize {
        PixelSize::new(
            self.outer.width.saturating_sub(self.client.width),
            self.outer.height.saturating_sub(self.client.height),
        )
    }
}

/// Platform-native parameters for one resize request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "regime", rename_all = "snake_case")]
pub enum TargetOSDimensions {
    PseudoTerminal {
        rows: u16,
        columns: u16,
    },
    WindowedConsole {
        window_pixels: PixelSize,
        previous: CharacterGrid,
        requested: CharacterGrid,
    },
}
