//! Plain-text PPM (P3) reading and writing.
//!
//! The layout is a three line header (`P3`, `width height`, max value)
//! followed by one whitespace separated `r g b` triple per pixel.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use lumen_math::{Color, MAX_CHANNEL};

use crate::sink::{ImageBuffer, ImageError, ImageResult, ImageSink};

/// True when `path` has a `.ppm` extension, in any case.
pub fn is_ppm_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"))
}

/// Streaming P3 writer.
pub struct PpmWriter<W: Write> {
    writer: W,
    expected: Option<u64>,
    written: u64,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            expected: None,
            written: 0,
        }
    }

    /// Number of pixels written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl PpmWriter<BufWriter<File>> {
    /// Create (or truncate) a file and wrap it in a buffered writer.
    pub fn create(path: impl AsRef<Path>) -> ImageResult<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ImageSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> ImageResult<()> {
        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", width, height)?;
        writeln!(self.writer, "{}", MAX_CHANNEL)?;
        self.expected = Some(width as u64 * height as u64);
        self.written = 0;
        Ok(())
    }

    fn write_pixel(&mut self, color: Color) -> ImageResult<()> {
        let expected = self.expected.ok_or(ImageError::NotStarted)?;
        if self.written >= expected {
            return Err(ImageError::PixelCount {
                expected,
                actual: self.written + 1,
            });
        }
        writeln!(self.writer, "{} {} {}", color.r, color.g, color.b)?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> ImageResult<()> {
        let expected = self.expected.ok_or(ImageError::NotStarted)?;
        if self.written != expected {
            return Err(ImageError::PixelCount {
                expected,
                actual: self.written,
            });
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Parse a P3 image. Channels are rescaled to 0-255 when the file uses a
/// different max value. `#` comments are skipped.
pub fn read_ppm<R: Read>(mut reader: R) -> ImageResult<ImageBuffer> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let tokens: Vec<&str> = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::split_whitespace)
        .collect();
    let mut tokens = tokens.into_iter();

    let magic = tokens
        .next()
        .ok_or_else(|| ImageError::Malformed("empty file".to_string()))?;
    if magic != "P3" {
        return Err(ImageError::Malformed(format!("unsupported magic {magic:?}")));
    }

    let mut header = [0u32; 3];
    for (slot, name) in header.iter_mut().zip(["width", "height", "max value"]) {
        *slot = next_number(&mut tokens, name)?;
    }
    let [width, height, max_value] = header;
    if max_value == 0 {
        return Err(ImageError::Malformed("max value must be positive".to_string()));
    }

    // The body must hold three tokens per pixel; check before allocating.
    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| ImageError::Malformed(format!("{width}x{height} is too large")))?;
    let available = tokens.len() / 3;
    if count > available {
        return Err(ImageError::Malformed(format!(
            "header claims {width}x{height} pixels but only {available} are present"
        )));
    }

    let mut pixels = Vec::with_capacity(count);
    let scale = MAX_CHANNEL as f64 / max_value as f64;
    for _ in 0..count {
        let mut rgb = [0u8; 3];
        for channel in rgb.iter_mut() {
            let value: u32 = next_number(&mut tokens, "channel")?;
            if value > max_value {
                return Err(ImageError::Malformed(format!(
                    "channel {value} exceeds max value {max_value}"
                )));
            }
            *channel = (value as f64 * scale).round() as u8;
        }
        pixels.push(Color::from(rgb));
    }

    Ok(ImageBuffer {
        width,
        height,
        pixels,
    })
}

/// Read a P3 file from disk.
pub fn read_ppm_file(path: impl AsRef<Path>) -> ImageResult<ImageBuffer> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_ppm(file)
}

fn next_number<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> ImageResult<u32> {
    let token = tokens
        .next()
        .ok_or_else(|| ImageError::Malformed(format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| ImageError::Malformed(format!("bad {what} {token:?}")))
}
