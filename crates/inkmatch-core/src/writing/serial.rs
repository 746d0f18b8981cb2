//! Serialization for Writing
//!
//! Line-oriented text format, used to hand samples between the capture
//! tools and the trainer and to keep regression fixtures readable.
//!
//! # Writing format
//!
//! ```text
//! \nWriting Version 1\n
//! width = W, height = H\n
//! Number of strokes = N\n
//! Stroke[0]: points = M\n
//!    (x0, y0)\n
//!    (x1, y1) pressure = P, xtilt = -, ytilt = -, timestamp = T\n
//!    ...
//! Stroke[1]: points = M\n
//!    ...
//! ```
//!
//! The attribute tail is only written for points that carry pressure,
//! tilt or timestamp; absent channels are written as `-`.

use crate::error::{Error, Result};
use crate::stroke::{Point, Stroke};
use crate::writing::Writing;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Writing serialization format version
const WRITING_VERSION: i32 = 1;

/// Maximum number of strokes in a Writing.
const MAX_STROKES: usize = 10_000;

/// Maximum number of points in a Stroke.
const MAX_STROKE_POINTS: usize = 1_000_000;

/// Maximum input size in bytes to prevent unbounded memory growth.
const MAX_INPUT_SIZE: u64 = 100_000_000;

impl Writing {
    /// Read a Writing from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> Result<Self> {
        let mut buf = Vec::new();
        reader.take(MAX_INPUT_SIZE + 1).read_to_end(&mut buf)?;
        if buf.len() as u64 > MAX_INPUT_SIZE {
            return Err(Error::DecodeError(format!(
                "input too large: exceeds maximum allowed size of {MAX_INPUT_SIZE} bytes"
            )));
        }
        Self::read_from_bytes(&buf)
    }

    /// Read a Writing from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_from_reader(&mut BufReader::new(file))
    }

    /// Read a Writing from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|e| Error::DecodeError(format!("writing is not valid UTF-8: {e}")))?;
        let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

        let version_line = next_line(&mut lines, "version")?;
        let version: i32 = version_line
            .strip_prefix("Writing Version ")
            .ok_or_else(|| Error::DecodeError("Writing version line not found".to_string()))?
            .trim()
            .parse()
            .map_err(|e| Error::DecodeError(format!("failed to parse Writing version: {e}")))?;
        if version != WRITING_VERSION {
            return Err(Error::DecodeError(format!(
                "invalid Writing version: {version}"
            )));
        }

        let (width, height) = parse_canvas_line(next_line(&mut lines, "canvas")?)?;
        let nstrokes: usize = parse_count(
            next_line(&mut lines, "stroke count")?,
            "Number of strokes = ",
        )?;
        if nstrokes > MAX_STROKES {
            return Err(Error::DecodeError(format!(
                "too many strokes: {nstrokes} exceeds maximum {MAX_STROKES}"
            )));
        }

        let mut writing = Writing::with_canvas(width, height);
        for i in 0..nstrokes {
            let header = next_line(&mut lines, "stroke header")?;
            let prefix = format!("Stroke[{i}]: points = ");
            let npoints: usize = parse_count(header, &prefix)?;
            if npoints == 0 || npoints > MAX_STROKE_POINTS {
                return Err(Error::DecodeError(format!(
                    "stroke {i} has invalid point count {npoints}"
                )));
            }

            let mut points = Vec::with_capacity(npoints);
            for _ in 0..npoints {
                points.push(parse_point_line(next_line(&mut lines, "point")?)?);
            }
            writing.push_stroke(Stroke::from_points(points)?);
        }

        Ok(writing)
    }

    /// Write a Writing to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        writeln!(writer, "\nWriting Version {WRITING_VERSION}")?;
        writeln!(writer, "width = {}, height = {}", self.width, self.height)?;
        writeln!(writer, "Number of strokes = {}", self.strokes.len())?;

        for (i, stroke) in self.strokes.iter().enumerate() {
            writeln!(writer, "Stroke[{i}]: points = {}", stroke.len())?;
            for p in stroke {
                if p.has_extras() {
                    writeln!(
                        writer,
                        "   ({}, {}) pressure = {}, xtilt = {}, ytilt = {}, timestamp = {}",
                        p.x,
                        p.y,
                        opt_to_text(p.pressure),
                        opt_to_text(p.xtilt),
                        opt_to_text(p.ytilt),
                        opt_to_text(p.timestamp)
                    )?;
                } else {
                    writeln!(writer, "   ({}, {})", p.x, p.y)?;
                }
            }
        }
        Ok(())
    }

    /// Write a Writing to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a Writing to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

// ============================================================================
// Internal helpers
// ============================================================================

fn next_line<'a>(lines: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<&'a str> {
    lines
        .next()
        .ok_or_else(|| Error::DecodeError(format!("unexpected end of input: missing {what} line")))
}

fn parse_count(line: &str, prefix: &str) -> Result<usize> {
    line.strip_prefix(prefix)
        .ok_or_else(|| Error::DecodeError(format!("expected '{prefix}...', got '{line}'")))?
        .trim()
        .parse()
        .map_err(|e| Error::DecodeError(format!("failed to parse count in '{line}': {e}")))
}

/// Parse "width = W, height = H".
fn parse_canvas_line(line: &str) -> Result<(u32, u32)> {
    let mut width = None;
    let mut height = None;
    for part in line.split(',') {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| Error::DecodeError(format!("malformed canvas line: '{line}'")))?;
        let value: u32 = value
            .trim()
            .parse()
            .map_err(|e| Error::DecodeError(format!("failed to parse canvas size: {e}")))?;
        match key.trim() {
            "width" => width = Some(value),
            "height" => height = Some(value),
            other => {
                return Err(Error::DecodeError(format!("unknown canvas key '{other}'")));
            }
        }
    }
    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(Error::DecodeError(format!(
            "canvas line missing width or height: '{line}'"
        ))),
    }
}

/// Parse "(x, y)" with an optional attribute tail.
fn parse_point_line(line: &str) -> Result<Point> {
    let rest = line
        .strip_prefix('(')
        .ok_or_else(|| Error::DecodeError(format!("malformed point line: '{line}'")))?;
    let (coords, tail) = rest
        .split_once(')')
        .ok_or_else(|| Error::DecodeError(format!("malformed point line: '{line}'")))?;
    let (xs, ys) = coords
        .split_once(',')
        .ok_or_else(|| Error::DecodeError(format!("malformed point line: '{line}'")))?;

    let mut point = Point::new(parse_coord(xs)?, parse_coord(ys)?);
    let tail = tail.trim();
    if tail.is_empty() {
        return Ok(point);
    }

    for part in tail.split(',') {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| Error::DecodeError(format!("malformed point attribute: '{part}'")))?;
        let value = value.trim();
        match key.trim() {
            "pressure" => point.pressure = parse_opt(value)?,
            "xtilt" => point.xtilt = parse_opt(value)?,
            "ytilt" => point.ytilt = parse_opt(value)?,
            "timestamp" => point.timestamp = parse_opt(value)?,
            other => {
                return Err(Error::DecodeError(format!(
                    "unknown point attribute '{other}'"
                )));
            }
        }
    }
    Ok(point)
}

fn parse_coord(s: &str) -> Result<i32> {
    s.trim()
        .parse()
        .map_err(|e| Error::DecodeError(format!("failed to parse coordinate '{s}': {e}")))
}

fn parse_opt<T: std::str::FromStr>(value: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    if value == "-" {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|e| Error::DecodeError(format!("failed to parse attribute '{value}': {e}")))
}

fn opt_to_text<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
