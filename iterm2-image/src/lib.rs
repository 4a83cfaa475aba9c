// ABOUTME: Library exports for the iTerm2 Inline Images Protocol encoder
// ABOUTME: Re-exports the encoder entry points, display options, and error types

pub mod config;
pub mod counting;
pub mod encoder;
pub mod error;
pub mod options;

pub use counting::CountingWriter;
pub use encoder::{encode, inline_image, inline_image_to, InlineImage};
pub use error::{DimensionParseError, PartialWrite};
pub use options::{Dimension, ImageOption, ImageOptions};
