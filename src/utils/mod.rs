//! Utility functions and helpers for Visionary Insights.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and secret masking.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
