// ABOUTME: iTerm2 Inline Images Protocol encoder
// ABOUTME: Streams the OSC 1337 File= escape sequence to any writer and counts accepted bytes

use crate::counting::CountingWriter;
use crate::error::PartialWrite;
use crate::options::{ImageOption, ImageOptions};
use base64::{display::Base64Display, engine::general_purpose::STANDARD};
use log::{debug, trace};
use std::fmt;
use std::io::{self, Write};

/// Escape sequence for one image, rendered through `Display`.
///
/// Wire format, parameters in this order and each only when set:
///
/// ```text
/// \x1b]1337;File=size=N[;name=B64][;height=H][;width=W]
///     [;preserveAspectRatio=0|1][;inline=0|1]:B64\x07
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InlineImage<'a> {
    data: &'a [u8],
    options: &'a ImageOptions,
}

impl<'a> InlineImage<'a> {
    pub fn new(data: &'a [u8], options: &'a ImageOptions) -> Self {
        Self { data, options }
    }
}

impl fmt::Display for InlineImage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = self.options;

        write!(f, "\x1b]1337;File=size={}", self.data.len())?;

        if let Some(name) = options.display_name() {
            write!(f, ";name={}", Base64Display::new(name.as_bytes(), &STANDARD))?;
        }
        if let Some(height) = options.height {
            write!(f, ";height={height}")?;
        }
        if let Some(width) = options.width {
            write!(f, ";width={width}")?;
        }
        if let Some(flag) = options.preserve_aspect_ratio {
            write!(f, ";preserveAspectRatio={}", u8::from(flag))?;
        }
        if let Some(flag) = options.inline {
            write!(f, ";inline={}", u8::from(flag))?;
        }

        write!(f, ":{}\x07", Base64Display::new(self.data, &STANDARD))
    }
}

/// Write the escape sequence for `data` to `sink`.
///
/// Returns the number of bytes the sink accepted. On the first write error
/// nothing more is written and the error carries the sink's `io::Error`
/// together with the bytes accepted up to that point. Failed writes are
/// never retried, including `ErrorKind::Interrupted`.
pub fn encode<W>(
    sink: &mut W,
    data: &[u8],
    options: &ImageOptions,
) -> Result<usize, PartialWrite>
where
    W: Write + ?Sized,
{
    debug!("Encoding inline image: {} bytes, {:?}", data.len(), options);

    let mut out = CountingWriter::new(sink);
    match write!(out, "{}", InlineImage::new(data, options)) {
        Ok(()) => {
            trace!("Inline image written: {} bytes", out.written());
            Ok(out.written())
        }
        Err(err) => {
            debug!("Sink failed after {} bytes: {}", out.written(), err);
            Err(PartialWrite::new(out.written(), err))
        }
    }
}

/// Apply `options` in order and write the escape sequence for `data` to `sink`.
pub fn inline_image_to<W, I>(
    sink: &mut W,
    data: &[u8],
    options: I,
) -> Result<usize, PartialWrite>
where
    W: Write + ?Sized,
    I: IntoIterator<Item = ImageOption>,
{
    let options: ImageOptions = options.into_iter().collect();
    encode(sink, data, &options)
}

/// Same as [`inline_image_to`] with standard output as the sink.
///
/// Standard output is flushed afterwards so the terminal sees the complete
/// sequence; a failed flush is reported like a failed write.
///
/// ```no_run
/// use iterm2_image::{inline_image, ImageOption};
///
/// let png = std::fs::read("diagram.png")?;
/// inline_image(&png, [ImageOption::name("diagram.png"), ImageOption::width_percent(50)])?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn inline_image<I>(data: &[u8], options: I) -> Result<usize, PartialWrite>
where
    I: IntoIterator<Item = ImageOption>,
{
    let mut stdout = io::stdout().lock();
    let written = inline_image_to(&mut stdout, data, options)?;
    stdout
        .flush()
        .map_err(|err| PartialWrite::new(written, err))?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Dimension;

    fn render(data: &[u8], options: &ImageOptions) -> String {
        InlineImage::new(data, options).to_string()
    }

    #[test]
    fn test_no_options() {
        assert_eq!(
            render(b"foo", &ImageOptions::default()),
            "\x1b]1337;File=size=3:Zm9v\x07"
        );
    }

    #[test]
    fn test_reference_example() {
        let options = ImageOptions::new().with_name("x");
        assert_eq!(
            render(&[0xFF, 0x00], &options),
            "\x1b]1337;File=size=2;name=eA==:/wA=\x07"
        );
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(
            render(&[], &ImageOptions::default()),
            "\x1b]1337;File=size=0:\x07"
        );
    }

    #[test]
    fn test_empty_name_omitted() {
        let options = ImageOptions::new().with_name("");
        assert_eq!(render(b"a", &options), "\x1b]1337;File=size=1:YQ==\x07");
    }

    #[test]
    fn test_height_precedes_width() {
        let options = ImageOptions::new()
            .with_width(Dimension::Pixels(640))
            .with_height(Dimension::Percent(25));
        assert_eq!(
            render(b"", &options),
            "\x1b]1337;File=size=0;height=25%;width=640px:\x07"
        );
    }

    #[test]
    fn test_display_matches_encode() {
        let options = ImageOptions::new()
            .with_name("photo.jpg")
            .with_width(Dimension::Auto)
            .with_inline(false);
        let data = b"\x89PNG\r\n\x1a\n";

        let mut sink = Vec::new();
        let written = encode(&mut sink, data, &options).unwrap();

        let expected = render(data, &options);
        assert_eq!(written, expected.len());
        assert_eq!(sink, expected.as_bytes());
    }

    #[test]
    fn test_encode_into_dyn_writer() {
        let mut sink: Vec<u8> = Vec::new();
        let writer: &mut dyn Write = &mut sink;
        let written = inline_image_to(writer, b"hi", [ImageOption::inline(true)]).unwrap();

        assert_eq!(written, sink.len());
        assert_eq!(sink, b"\x1b]1337;File=size=2;inline=1:aGk=\x07");
    }
}
