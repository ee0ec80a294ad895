use std::path::PathBuf;

use dslog::{ConfigBuilder, Severity};

#[test]
fn test_builder_from_env() {
    // SAFETY: the only test of this binary, nothing else reads the environment concurrently.
    unsafe {
        std::env::set_var("DSLOG_LEVEL", "latency");
        std::env::set_var("DSLOG_FILE", "/tmp/dslog_from_env.log");
        std::env::set_var("DSLOG_SAVE_TO_FILE", "true");
        std::env::set_var("DSLOG_TIMER", "true");
        std::env::set_var("DSLOG_ENABLED", "false");
    }
    let logger = ConfigBuilder::from_env().unwrap().build();
    assert_eq!(logger.level(), Severity::Latency);
    assert_eq!(logger.file_path(), PathBuf::from("/tmp/dslog_from_env.log"));
    assert!(logger.is_file_sink_enabled());
    assert!(logger.is_timer_enabled());
    assert!(!logger.is_enabled());

    unsafe {
        std::env::set_var("DSLOG_LEVEL", "shouting");
    }
    assert!(ConfigBuilder::from_env().is_err());

    unsafe {
        for var in [
            "DSLOG_LEVEL",
            "DSLOG_FILE",
            "DSLOG_SAVE_TO_FILE",
            "DSLOG_TIMER",
            "DSLOG_ENABLED",
        ] {
            std::env::remove_var(var);
        }
    }
    let logger = ConfigBuilder::from_env().unwrap().build();
    assert_eq!(logger.level(), Severity::Info);
    assert_eq!(logger.file_path(), PathBuf::from("log.txt"));
    assert!(!logger.is_file_sink_enabled());
    assert!(!logger.is_timer_enabled());
    assert!(logger.is_enabled());
}
