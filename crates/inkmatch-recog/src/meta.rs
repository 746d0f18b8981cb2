//! Training metadata side-car
//!
//! Every model file has a companion text file (`<model>.meta`) of
//! `key = value` lines. It names the model for selection by a host and
//! records the preprocessing options the model was trained with, so a
//! recognizer can reproduce them.
//!
//! # Format
//!
//! ```text
//! # comments and blank lines are ignored
//! name = Japanese kanji
//! shortname = ja
//! language = ja
//! path = ja.model
//! feature = xy
//! downsample_threshold = 50
//! upsample_threshold = 50
//! ```
//!
//! Keys are written in sorted order. Unknown keys are kept.

use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{RecogError, RecogResult};

/// Human-readable model name (required for training)
pub const META_NAME: &str = "name";
/// Short model label (required for training)
pub const META_SHORTNAME: &str = "shortname";
/// Optional language tag
pub const META_LANGUAGE: &str = "language";
/// Model file path, relative to the side-car's directory
pub const META_PATH: &str = "path";

/// File extension of the side-car
pub const META_EXTENSION: &str = "meta";

/// Parsed `key = value` training metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingMeta {
    values: BTreeMap<String, String>,
}

impl TrainingMeta {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metadata with the two required keys set.
    pub fn with_names(name: &str, shortname: &str) -> Self {
        let mut meta = Self::new();
        meta.set(META_NAME, name);
        meta.set(META_SHORTNAME, shortname);
        meta
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn name(&self) -> Option<&str> {
        self.get(META_NAME)
    }

    pub fn shortname(&self) -> Option<&str> {
        self.get(META_SHORTNAME)
    }

    pub fn language(&self) -> Option<&str> {
        self.get(META_LANGUAGE)
    }

    pub fn path(&self) -> Option<&str> {
        self.get(META_PATH)
    }

    /// Check that the keys required for training are present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::Config`] naming the first missing key, or any
    /// error of [`TrainingMeta::check_format`].
    pub fn validate(&self) -> RecogResult<()> {
        for key in [META_NAME, META_SHORTNAME] {
            match self.get(key) {
                Some(v) if !v.trim().is_empty() => {}
                _ => {
                    return Err(RecogError::Config(format!(
                        "required metadata key '{key}' is missing"
                    )));
                }
            }
        }
        self.check_format()
    }

    /// Check that every entry survives a write/parse round trip.
    ///
    /// Keys must be non-empty, must not start with `#`, and must not contain
    /// `=` or a line break. Values must not contain a line break. Neither may
    /// carry leading or trailing whitespace, which parsing strips.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::Config`] naming the first offending key.
    pub fn check_format(&self) -> RecogResult<()> {
        let has_break = |s: &str| s.contains(['\n', '\r']);
        for (key, value) in &self.values {
            if key.is_empty()
                || key.starts_with('#')
                || key.contains('=')
                || has_break(key)
                || key.trim() != key.as_str()
            {
                return Err(RecogError::Config(format!(
                    "metadata key {key:?} cannot be written"
                )));
            }
            if has_break(value) || value.trim() != value.as_str() {
                return Err(RecogError::Config(format!(
                    "metadata value of '{key}' cannot be written: {value:?}"
                )));
            }
        }
        Ok(())
    }

    /// Parse metadata text.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::Config`] for a non-comment line without `=`
    /// or with an empty key.
    pub fn parse(text: &str) -> RecogResult<Self> {
        let mut meta = Self::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                RecogError::Config(format!("line {}: expected 'key = value'", lineno + 1))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(RecogError::Config(format!("line {}: empty key", lineno + 1)));
            }
            meta.set(key, value.trim());
        }
        Ok(meta)
    }

    /// Read metadata from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> RecogResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    /// Write metadata to a writer.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::Config`] if an entry would not read back
    /// unchanged (see [`TrainingMeta::check_format`]), or an I/O error.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> RecogResult<()> {
        self.check_format()?;
        for (key, value) in &self.values {
            writeln!(writer, "{key} = {value}")?;
        }
        Ok(())
    }

    /// Write metadata to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> RecogResult<()> {
        self.check_format()?;
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
