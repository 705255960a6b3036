//! Logging facilities for Somnia.
//!
//! Somnia uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! All events are tagged with one of the targets below, so a filter like
//! `RUST_LOG=somnia::diff=debug` narrows output to a single subsystem.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "somnia::signal";
    /// Diff engine target.
    pub const DIFF: &str = "somnia::diff";
    /// List adapter target.
    pub const ADAPTER: &str = "somnia::adapter";
    /// Row-holder pool target.
    pub const POOL: &str = "somnia::pool";
    /// Tracker controller target.
    pub const TRACKER: &str = "somnia::tracker";
}
