//! Built-in dialect backends and the registry that selects between them.

pub mod cmd;
pub mod registry;

pub use cmd::CmdShell;
pub use registry::{RegistryError, ShellRegistry, ShellRegistryBuilder};

/// Build the registry of every backend shipped with this crate.
///
/// Call once at start-up and share the result; the returned registry is
/// frozen.
///
/// # Errors
///
/// Returns `RegistryError::Duplicate` if two built-in backends share a name.
pub fn builtin() -> Result<ShellRegistry, RegistryError> {
  Ok(ShellRegistry::builder().register(CmdShell)?.build())
}
