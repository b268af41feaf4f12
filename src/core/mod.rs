pub mod constants;
pub mod dial;
pub mod display;
pub mod note;
pub mod pitch;

pub use constants::*;
pub use dial::*;
pub use display::*;
pub use note::*;
pub use pitch::*;
