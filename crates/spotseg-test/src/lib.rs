//! spotseg-test - Regression test framework for spot segmentation
//!
//! This crate provides a golden-file regression test framework supporting
//! three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison
//!
//! It also provides synthetic fixtures (ASCII and seeded random occupancy
//! grids, predictable datasets) and loaders for the checked-in datasets.
//!
//! # Usage
//!
//! ```ignore
//! use spotseg_test::{RegParams, RegTestMode};
//!
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(3.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{SyntheticDataset, grid_from_ascii, random_occupancy_grid};
pub use params::{RegParams, RegTestMode};

use spotseg_io::JsonDataset;

/// Load a dataset from the test data directory
///
/// # Arguments
///
/// * `name` - Dataset filename (e.g., "two_slides.json")
pub fn load_test_dataset(name: &str) -> TestResult<JsonDataset> {
    let path = test_data_path(name);
    JsonDataset::read_from_file(&path).map_err(|e| TestError::DatasetLoad {
        path: path.clone(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // spotseg-test is at crates/spotseg-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/datasets/{}", workspace_root(), name)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
