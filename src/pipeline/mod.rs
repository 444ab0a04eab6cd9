//! Pipeline module - the shipping analysis stages

pub mod analysis;
pub mod anomaly;
pub mod config;
pub mod correlation;
pub mod dates;
pub mod delay;
pub mod error;
pub mod group_stats;
pub mod loader;
pub mod records;
pub mod series;
pub mod stats;

pub use analysis::*;
pub use anomaly::*;
pub use config::*;
pub use correlation::*;
pub use dates::*;
pub use delay::*;
pub use error::*;
pub use group_stats::*;
pub use loader::*;
pub use records::*;
pub use series::*;
pub use stats::*;
