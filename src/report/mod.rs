//! Report module - text summary, terminal display and file exports

pub mod display;
pub mod export;
pub mod summary;

pub use display::*;
pub use export::*;
pub use summary::*;
