pub mod errors;
pub mod translate;
pub mod types;

pub use errors::GeometryError;
pub use translate::{Regime, translate, window_pixels};
pub use types::{
    CharacterGrid, ConsoleGeometrySnapshot, PixelSize, RoundingMode, TargetOSDimensions,
};
