//! Text and image diffing for page snapshot regression checks.
//!
//! [`text::diff_text`] compares two texts line by line with the Myers
//! shortest-edit-script algorithm. [`pixel::diff_images`] compares two
//! encoded images pixel by pixel and produces a visualization of where they
//! differ, which [`artifact::ArtifactWriter`] can persist.

pub mod artifact;
pub mod error;
pub mod hunk;
pub mod myers;
pub mod pixel;
pub mod text;
pub mod token;

pub use error::{CodecError, DiffError, DiffResult, ImageSide};
pub use pixel::{diff_images, ImageDiffOptions, ImageDiffResult, PixelGrid};
pub use text::{diff_text, TextDiffResult};
pub use token::CallToken;
