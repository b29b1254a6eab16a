pub mod errors;
pub mod locator;
pub mod traits;

pub use errors::WindowError;
pub use locator::locate;
pub use traits::WindowHandle;
