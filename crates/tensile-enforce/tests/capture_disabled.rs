//! Turning stack capture off from the environment.
//!
//! Runs in its own binary: the variable must be set before the process-wide
//! configuration is first read.

use tensile_enforce::config;
use tensile_enforce::{enforce, EnforceError};

fn launch(rows: usize) -> Result<(), EnforceError> {
    enforce!(rows > 0, "empty batch");
    Ok(())
}

#[test]
fn disabled_capture_yields_empty_stacks() {
    std::env::set_var("TENSILE_CAPTURE_STACKS", "0");

    assert!(!config::global().capture_stacks);

    let err = launch(0).unwrap_err();
    assert!(err.stack().is_empty());
    assert!(err.message().starts_with("empty batch at ["));
    assert!(err.message().ends_with("]\nCall Stacks:"));
}
