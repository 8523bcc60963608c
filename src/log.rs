//! Logging shims.
//!
//! With the `tracing` feature on, `debug!` and `trace!` are the `tracing`
//! macros and accept its field syntax (`x = 1.0, "msg"`). With the feature
//! off they swallow their arguments, so the render path carries no logging
//! cost by default.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace};
