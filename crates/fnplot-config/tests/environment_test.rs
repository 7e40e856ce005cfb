//! Process-wide settings pick up `FNPLOT_*` variables.
//!
//! Kept in its own test binary: the global cache is seeded once per process.

use fnplot_config::{current, install, PlotSettings};

#[test]
fn test_global_settings_follow_environment() {
    std::env::set_var("FNPLOT_WINDOW_WIDTH", "1280");
    std::env::set_var("FNPLOT_VIEWER_ENABLED", "false");

    let settings = current();
    assert_eq!(settings.window.width, 1280);
    assert!(!settings.viewer.enabled);

    install(PlotSettings::default()).unwrap();
    assert_eq!(current().window.width, 800);
}
