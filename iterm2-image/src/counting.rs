// ABOUTME: Write decorator that tallies the bytes accepted by the wrapped sink
// ABOUTME: Lets the encoder report partial progress when a sink fails mid-sequence

use std::io::{self, Write};

/// Forwards writes to `inner` and keeps a running total of accepted bytes.
///
/// Only the counts returned by successful `write` calls are added, so after
/// an error `written()` is exactly what the sink took before it failed.
///
/// `write_all` stops at the first error of any kind. Unlike the default
/// implementation it does not retry `ErrorKind::Interrupted`.
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    written: usize,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n;
        Ok(n)
    }

    fn write_all(&mut self, mut buf: &[u8]) -> io::Result<()> {
        while !buf.is_empty() {
            match self.write(buf)? {
                0 => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write whole buffer",
                    ));
                }
                n => buf = &buf[n..],
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts at most `chunk` bytes per call
    struct Trickle {
        buf: Vec<u8>,
        chunk: usize,
    }

    impl Write for Trickle {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.chunk);
            self.buf.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_counts_all_writes() {
        let mut writer = CountingWriter::new(Vec::new());
        writer.write_all(b"hello").unwrap();
        write!(writer, " {}", 42).unwrap();

        assert_eq!(writer.written(), 8);
        assert_eq!(writer.into_inner(), b"hello 42");
    }

    #[test]
    fn test_counts_short_writes() {
        let mut writer = CountingWriter::new(Trickle {
            buf: Vec::new(),
            chunk: 3,
        });
        writer.write_all(b"abcdefgh").unwrap();

        assert_eq!(writer.written(), 8);
        assert_eq!(writer.get_ref().buf, b"abcdefgh");
    }

    /// Fails with `Interrupted` on the first call, then accepts everything
    struct InterruptOnce {
        buf: Vec<u8>,
        calls: usize,
    }

    impl Write for InterruptOnce {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.calls == 1 {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
            }
            self.buf.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_all_does_not_retry_interrupted() {
        let mut writer = CountingWriter::new(InterruptOnce {
            buf: Vec::new(),
            calls: 0,
        });

        let err = writer.write_all(b"abc").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
        assert_eq!(writer.written(), 0);
        assert_eq!(writer.get_ref().calls, 1);
        assert!(writer.get_ref().buf.is_empty());
    }

    #[test]
    fn test_write_all_reports_zero_length_write() {
        let mut writer = CountingWriter::new(Trickle {
            buf: Vec::new(),
            chunk: 0,
        });

        let err = writer.write_all(b"abc").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
        assert_eq!(writer.written(), 0);
    }

    #[test]
    fn test_write_into_borrowed_sink() {
        let mut sink = Vec::new();
        {
            let mut writer = CountingWriter::new(&mut sink);
            writer.write_all(b"xyz").unwrap();
            writer.flush().unwrap();
            assert_eq!(writer.written(), 3);
        }
        assert_eq!(sink, b"xyz");
    }
}
