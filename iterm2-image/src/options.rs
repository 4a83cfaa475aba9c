// ABOUTME: Display options for inline images and the configuration units that set them
// ABOUTME: Dimensions render to their wire form and parse back from strings or integers

use crate::error::DimensionParseError;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Size of the rendered image along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Character cells
    Cells(u32),
    Pixels(u32),
    /// Percentage of the terminal session's width or height
    Percent(u32),
    /// Use the image's intrinsic size
    Auto,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Cells(n) => write!(f, "{n}"),
            Dimension::Pixels(n) => write!(f, "{n}px"),
            Dimension::Percent(n) => write!(f, "{n}%"),
            Dimension::Auto => f.write_str("auto"),
        }
    }
}

impl FromStr for Dimension {
    type Err = DimensionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DimensionParseError::Empty);
        }
        if s == "auto" {
            return Ok(Dimension::Auto);
        }

        let invalid = || DimensionParseError::Invalid(s.to_string());

        let (digits, unit): (&str, fn(u32) -> Dimension) =
            if let Some(n) = s.strip_suffix("px") {
                (n, Dimension::Pixels)
            } else if let Some(n) = s.strip_suffix('%') {
                (n, Dimension::Percent)
            } else {
                (s, Dimension::Cells)
            };

        // u32::from_str would accept a leading '+'
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        digits.parse().map(unit).map_err(|_| invalid())
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DimensionVisitor;

        impl Visitor<'_> for DimensionVisitor {
            type Value = Dimension;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a cell count or a string like \"40\", \"300px\", \"50%\" or \"auto\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Dimension, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Dimension, E> {
                u32::try_from(v)
                    .map(Dimension::Cells)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Dimension, E> {
                u32::try_from(v)
                    .map(Dimension::Cells)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }
        }

        deserializer.deserialize_any(DimensionVisitor)
    }
}

/// Parameters of an inline image. Unset fields are left out of the sequence
/// so the terminal applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageOptions {
    pub name: Option<String>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    #[serde(alias = "preserveAspectRatio")]
    pub preserve_aspect_ratio: Option<bool>,
    pub inline: Option<bool>,
}

impl ImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_width(mut self, width: Dimension) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_preserve_aspect_ratio(mut self, flag: bool) -> Self {
        self.preserve_aspect_ratio = Some(flag);
        self
    }

    pub fn with_inline(mut self, flag: bool) -> Self {
        self.inline = Some(flag);
        self
    }

    /// Overwrites the field targeted by `option`
    pub fn apply(&mut self, option: ImageOption) {
        match option {
            ImageOption::Name(name) => self.name = Some(name),
            ImageOption::Width(width) => self.width = Some(width),
            ImageOption::Height(height) => self.height = Some(height),
            ImageOption::PreserveAspectRatio(flag) => self.preserve_aspect_ratio = Some(flag),
            ImageOption::Inline(flag) => self.inline = Some(flag),
        }
    }

    /// Merge with another set of options, giving precedence to fields set in `other`
    pub fn merge(self, other: ImageOptions) -> ImageOptions {
        ImageOptions {
            name: other.name.or(self.name),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
            preserve_aspect_ratio: other.preserve_aspect_ratio.or(self.preserve_aspect_ratio),
            inline: other.inline.or(self.inline),
        }
    }

    /// The name as it should appear on the wire; an empty name counts as unset
    pub(crate) fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

impl Extend<ImageOption> for ImageOptions {
    fn extend<I: IntoIterator<Item = ImageOption>>(&mut self, iter: I) {
        for option in iter {
            self.apply(option);
        }
    }
}

impl FromIterator<ImageOption> for ImageOptions {
    fn from_iter<I: IntoIterator<Item = ImageOption>>(iter: I) -> Self {
        let mut options = ImageOptions::default();
        options.extend(iter);
        options
    }
}

/// One configuration unit. Units are applied in order and a later unit for
/// the same field replaces the earlier value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOption {
    Name(String),
    Width(Dimension),
    Height(Dimension),
    PreserveAspectRatio(bool),
    Inline(bool),
}

impl ImageOption {
    /// Name given to the inlined or downloaded file
    pub fn name(name: impl Into<String>) -> Self {
        ImageOption::Name(name.into())
    }

    pub fn width_cells(cells: u32) -> Self {
        ImageOption::Width(Dimension::Cells(cells))
    }

    pub fn width_pixels(pixels: u32) -> Self {
        ImageOption::Width(Dimension::Pixels(pixels))
    }

    /// Width as a percentage of the terminal session's width
    pub fn width_percent(percent: u32) -> Self {
        ImageOption::Width(Dimension::Percent(percent))
    }

    pub fn width_auto() -> Self {
        ImageOption::Width(Dimension::Auto)
    }

    pub fn height_cells(cells: u32) -> Self {
        ImageOption::Height(Dimension::Cells(cells))
    }

    pub fn height_pixels(pixels: u32) -> Self {
        ImageOption::Height(Dimension::Pixels(pixels))
    }

    /// Height as a percentage of the terminal session's height
    pub fn height_percent(percent: u32) -> Self {
        ImageOption::Height(Dimension::Percent(percent))
    }

    pub fn height_auto() -> Self {
        ImageOption::Height(Dimension::Auto)
    }

    pub fn preserve_aspect_ratio(flag: bool) -> Self {
        ImageOption::PreserveAspectRatio(flag)
    }

    /// `false` asks the terminal to download the file instead of showing it
    pub fn inline(flag: bool) -> Self {
        ImageOption::Inline(flag)
    }
}
