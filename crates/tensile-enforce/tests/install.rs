//! Process-wide installation of the configuration and the stack capturer.
//!
//! Both live in once-only globals, so everything runs in a single test in
//! its own binary, in the order a host application would do it.

use tensile_enforce::config;
use tensile_enforce::stack;
use tensile_enforce::{
    enforce, ConfigError, EnforceConfig, EnforceError, FixedCapturer, NoopCapturer,
};

fn launch(rows: usize) -> Result<(), EnforceError> {
    enforce!(rows > 0, "empty batch");
    Ok(())
}

#[test]
fn installed_config_and_capturer_drive_every_error() {
    // ---------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------

    let installed = EnforceConfig {
        stack_limit: 2,
        capture_stacks: false,
        legacy_rand_phrase: true,
    };
    assert_eq!(config::install(installed.clone()), Ok(()));
    assert_eq!(
        config::install(EnforceConfig::default()),
        Err(ConfigError::AlreadyInitialized)
    );
    assert_eq!(config::global(), &installed);

    // ---------------------------------------------------------------------
    // Capturer
    // ---------------------------------------------------------------------

    let fixed = FixedCapturer::new(["host::ops::launch", "host::worker::run", "main"]);
    assert!(stack::install(Box::new(fixed)).is_ok());
    assert_eq!(
        stack::install(Box::new(NoopCapturer)).unwrap_err(),
        ConfigError::CapturerAlreadyInstalled
    );

    // ---------------------------------------------------------------------
    // Errors pick up both
    // ---------------------------------------------------------------------

    let err = launch(0).unwrap_err();
    assert_eq!(err.stack(), ["host::ops::launch", "host::worker::run"]);
    assert!(err
        .message()
        .ends_with("Call Stacks:\nhost::ops::launch\nhost::worker::run"));
    assert!(launch(4).is_ok());
}
