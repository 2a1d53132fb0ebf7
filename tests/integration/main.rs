// Integration tests

// Initialize logger for tests when logging feature is enabled
#[cfg(feature = "logging")]
#[ctor::ctor]
fn init() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

mod mocks;
mod session_test;
mod packing_test;
mod filter_test;
#[cfg(feature = "builder")]
mod manifest_test;
