//! Logging facilities for Trellis.
//!
//! Trellis uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in your application:
//!
//! ```
//! use trellis_core::logging::targets;
//!
//! let filter = format!("{}=debug,{}=trace", targets::FOCUS, targets::INPUT);
//! let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
//! ```
//!
//! Soft failures (focus requested on a widget that cannot take it, host-bound
//! calls before validation) are reported at `warn` level and otherwise
//! ignored, so a subscriber is the only place they surface.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Tree structure: insertion, removal, validation.
    pub const TREE: &str = "trellis::tree";
    /// Layout passes.
    pub const LAYOUT: &str = "trellis::layout";
    /// Focus transitions and cycling.
    pub const FOCUS: &str = "trellis::focus";
    /// Pointer and keyboard dispatch.
    pub const INPUT: &str = "trellis::input";
    /// Host session lifecycle.
    pub const HOST: &str = "trellis::host";
    /// Performance spans.
    pub const PERF: &str = "trellis::perf";
}

/// A guard that keeps a tracing span open until dropped.
///
/// Useful for timing a paint or layout pass with a span-aware subscriber.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "trellis::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
