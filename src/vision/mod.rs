//! Upload format handling and previews.
//!
//! Uploads are only filtered by format: magic bytes, extension, or the
//! browser's content type must name JPEG or PNG. Size and content checks are
//! left to the hosting layer and to the model API.
//!
//! # Submodules
//!
//! - `models`: Supported formats and sniffing.
//! - `preview`: Data-URI previews shown next to the upload control.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod models;
pub mod preview;

pub use models::{ImageFormat, ACCEPTED_EXTENSIONS};
pub use preview::Preview;
