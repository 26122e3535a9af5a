// Visionary Insights - Medical image analysis assistant backed by Gemini
// Author: kelexine (https://github.com/kelexine)

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod metrics;
pub mod models;
pub mod prompt;
pub mod server;
pub mod ui;
pub mod utils;
pub mod vision;
