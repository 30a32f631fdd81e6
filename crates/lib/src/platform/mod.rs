//! Host platform detection.
//!
//! Dialect backends declare the operating system they target; the registry
//! compares it against the host to choose a default dialect.

pub mod os;

pub use os::Os;

/// Returns the current operating system
///
/// Returns `None` if the OS is not supported
pub fn host_os() -> Option<Os> {
  Os::current()
}
