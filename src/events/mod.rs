pub mod controls;
pub mod pointer;

pub use controls::*;
pub use pointer::*;
