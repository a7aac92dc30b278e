//! Platform glue
//!
//! Browser and native differ in where logs go and how panics surface.

/// Install the logger for the current platform. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    // RUST_LOG overrides the default filter
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the logger for the current platform. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Seed for a fresh session
pub fn random_seed() -> u64 {
    rand::random()
}
