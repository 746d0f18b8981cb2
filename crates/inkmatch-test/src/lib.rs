//! inkmatch-test - Regression test framework for inkmatch
//!
//! Provides the shared regression-test harness used by the `tests/*_reg.rs`
//! files of every crate, supporting three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison
//!
//! It also provides [`SampleGen`], a seeded generator of synthetic
//! handwriting used by the property-style tests.
//!
//! # Usage
//!
//! ```ignore
//! use inkmatch_test::{RegParams, RegTestMode};
//!
//! let mut rp = RegParams::new("dtw");
//! rp.compare_values(0.0, distance as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod generate;
mod params;

pub use error::{TestError, TestResult};
pub use generate::SampleGen;
pub use params::{RegParams, RegTestMode};

use inkmatch_core::Writing;

/// Load a writing fixture from the test data directory
///
/// # Arguments
///
/// * `name` - Fixture filename (e.g., "ichi1.wrt")
pub fn load_test_writing(name: &str) -> TestResult<Writing> {
    let path = test_data_path(name);
    Writing::read_from_file(&path).map_err(|e| TestError::FixtureLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // inkmatch-test is at crates/inkmatch-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/writings/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
