//! Shiplag: Shipping-Performance Diagnostics Library
//!
//! Computes per-record shipping delays from retail order data, per-ship-mode
//! delay statistics, suspicious-delay flags and the rank correlation between
//! order value and delay, and renders a deterministic text summary.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
