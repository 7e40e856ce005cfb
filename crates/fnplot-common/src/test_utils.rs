//! Test utilities and shared test helpers for the fnplot workspace.
//!
//! This module provides logging setup, float comparison and filesystem
//! fixtures that are shared by the unit and integration tests of every crate.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Whether the host can lay out text with a system font.
///
/// Rendering tests draw captions and tick labels, which fail on minimal
/// containers without any installed font. Those tests return early when this
/// is false.
#[cfg(feature = "plotters")]
pub fn fonts_available() -> bool {
    use plotters::style::IntoFont;

    ("sans-serif", 12.0).into_font().box_size("0.5").is_ok()
}

/// Property-based testing strategies.
#[cfg(any(test, feature = "proptest"))]
pub mod strategies {
    use proptest::prelude::*;

    /// Finite interval bounds with `min < max`.
    pub fn interval_strategy() -> impl Strategy<Value = (f64, f64)> {
        (-1.0e6..1.0e6f64, 1.0e-3..1.0e6f64).prop_map(|(min, width)| (min, min + width))
    }

    /// Sample counts that the sampler accepts.
    pub fn point_count_strategy() -> impl Strategy<Value = usize> {
        2usize..2_000
    }
}
