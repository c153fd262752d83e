//! Logging facilities for chronopick.
//!
//! chronopick uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("chronopick=debug,chronopick_core=trace")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "chronopick_core::signal";
    /// Deferred task queue target.
    pub const TASK: &str = "chronopick_core::task";
    /// Picker controller target.
    pub const PICKER: &str = "chronopick::picker";
    /// Open/view state machine target.
    pub const VIEW: &str = "chronopick::view";
    /// Focus coordinator target.
    pub const FOCUS: &str = "chronopick::focus";
    /// Text parsing target.
    pub const PARSE: &str = "chronopick::parse";
}
