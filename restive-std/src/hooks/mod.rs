//! Standard dispatch hooks.

mod logging;

pub use logging::LoggingHook;
