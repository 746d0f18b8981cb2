//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::{golden_dir, regout_dir};
use inkmatch_core::Writing;
use std::fs;
use std::path::Path;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Generate golden files
    Generate,
    /// Compare with golden files (default)
    #[default]
    Compare,
    /// Display mode - run without comparison
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "generate" => Self::Generate,
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running check index, the mode and the
/// accumulated failures of one regression test.
pub struct RegParams {
    /// Name of the test (e.g., "dtw")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (generate, compare, or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(golden_dir());
        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Path for an output file of this test in the regout directory.
    ///
    /// Does not advance the check index.
    pub fn output_path(&self, name: &str) -> String {
        format!("{}/{}.{}", regout_dir(), self.test_name, name)
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta || diff.is_nan() {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Record a boolean condition as a check
    pub fn compare_bool(&mut self, expected: bool, actual: bool) -> bool {
        self.compare_values(
            if expected { 1.0 } else { 0.0 },
            if actual { 1.0 } else { 0.0 },
            0.0,
        )
    }

    /// Compare two writings for exact equality of canvas, strokes and points
    pub fn compare_writings(&mut self, w1: &Writing, w2: &Writing) -> bool {
        self.index += 1;

        if w1.width() != w2.width()
            || w1.height() != w2.height()
            || w1.stroke_count() != w2.stroke_count()
        {
            let msg = format!(
                "Failure in {}_reg: writing comparison for index {} - shape mismatch",
                self.test_name, self.index
            );
            self.record_failure(msg);
            return false;
        }

        for (i, (s1, s2)) in w1.strokes().iter().zip(w2.strokes()).enumerate() {
            if s1 != s2 {
                let msg = format!(
                    "Failure in {}_reg: writing comparison for index {} - stroke {} differs",
                    self.test_name, self.index, i
                );
                self.record_failure(msg);
                return false;
            }
        }

        true
    }

    /// Compare two binary data arrays
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len()
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Write data to file and check against golden file
    ///
    /// # Arguments
    ///
    /// * `data` - Data to write
    /// * `ext` - File extension (e.g., "wrt", "model")
    pub fn write_data_and_check(&mut self, data: &[u8], ext: &str) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            ext
        );

        fs::write(&local_path, data)?;
        self.check_file(&local_path)
    }

    /// Check a file against its golden counterpart
    ///
    /// In generate mode, copies the file to golden.
    /// In compare mode, compares with the golden file; a missing golden
    /// file is a failure.
    /// In display mode, does nothing.
    fn check_file(&mut self, local_path: &str) -> TestResult<()> {
        let ext = Path::new(local_path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        let golden_path = format!(
            "{}/{}_golden.{:02}.{}",
            golden_dir(),
            self.test_name,
            self.index,
            ext
        );

        match self.mode {
            RegTestMode::Generate => {
                fs::copy(local_path, &golden_path)?;
                eprintln!("Generated: {}", golden_path);
            }
            RegTestMode::Compare => {
                if !Path::new(&golden_path).exists() {
                    let msg = format!(
                        "Failure in {}_reg: {}",
                        self.test_name,
                        TestError::GoldenNotFound { path: golden_path }
                    );
                    self.record_failure(msg);
                    return Ok(());
                }

                let local_data = fs::read(local_path)?;
                let golden_data = fs::read(&golden_path)?;
                if local_data != golden_data {
                    let msg = format!(
                        "Failure in {}_reg, index {}: comparing {} with {}",
                        self.test_name, self.index, local_path, golden_path
                    );
                    self.record_failure(msg);
                }
            }
            RegTestMode::Display => {}
        }

        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_env() {
        let mode = RegTestMode::from_env();
        assert!(matches!(
            mode,
            RegTestMode::Compare | RegTestMode::Generate | RegTestMode::Display
        ));
    }

    #[test]
    fn test_compare_values() {
        let mut rp = RegParams::new("params");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.index(), 2);
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_values_nan_fails() {
        let mut rp = RegParams::new("params_nan");
        assert!(!rp.compare_values(0.0, f64::NAN, 1.0));
    }

    #[test]
    fn test_missing_golden_fails() {
        let mut rp = RegParams::new("params_nogolden");
        rp.mode = RegTestMode::Compare;
        rp.write_data_and_check(b"no golden recorded", "txt").unwrap();
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
        assert!(rp.failures()[0].contains("golden file not found"));
    }

    #[test]
    fn test_display_mode_skips_golden() {
        let mut rp = RegParams::new("params_display");
        rp.mode = RegTestMode::Display;
        rp.write_data_and_check(b"not compared", "txt").unwrap();
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_writings() {
        use inkmatch_core::Stroke;

        let w1 = Writing::from_strokes(vec![Stroke::from_coords(&[(1, 1), (2, 2)]).unwrap()]);
        let w2 = w1.clone();
        let w3 = Writing::from_strokes(vec![Stroke::from_coords(&[(1, 1), (2, 3)]).unwrap()]);

        let mut rp = RegParams::new("params_writing");
        assert!(rp.compare_writings(&w1, &w2));
        assert!(!rp.compare_writings(&w1, &w3));
    }
}
