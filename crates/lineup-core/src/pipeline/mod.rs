//! The batch tagging pipeline.
//!
//! Stages, in execution order:
//! - **validate**: path existence, size limits, image magic bytes
//! - **decode**: full decode and dimension-limit check
//! - **runner**: orchestrates validate → XMP extract → tag → JSON write

pub mod decode;
pub mod runner;
pub mod validate;

pub use decode::{DecodedImage, ImageDecoder};
pub use runner::{run_batch, tag_file_name};
pub use validate::Validator;
