//! Lookup of dialect backends by name.
//!
//! Backends are registered on a [`ShellRegistryBuilder`] during start-up and
//! the builder is then frozen into a [`ShellRegistry`]. The frozen registry
//! has no mutating methods, so it can be shared across threads freely.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::script::Shell;

/// Errors from registering or selecting a backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
  #[error("shell '{0}' is already registered")]
  Duplicate(String),

  #[error("unknown shell '{name}' (available: {available})")]
  Unknown { name: String, available: String },

  #[error("no shells registered")]
  Empty,
}

/// Collects backends before the registry is frozen.
#[derive(Default)]
pub struct ShellRegistryBuilder {
  shells: BTreeMap<&'static str, Arc<dyn Shell>>,
}

impl ShellRegistryBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a backend under its own name.
  ///
  /// # Errors
  ///
  /// Returns `RegistryError::Duplicate` if a backend with the same name was
  /// already registered.
  pub fn register(mut self, shell: impl Shell + 'static) -> Result<Self, RegistryError> {
    let name = shell.name();
    if self.shells.contains_key(name) {
      return Err(RegistryError::Duplicate(name.to_string()));
    }
    debug!(shell = name, "registering shell");
    self.shells.insert(name, Arc::new(shell));
    Ok(self)
  }

  /// Freeze the registry.
  pub fn build(self) -> ShellRegistry {
    ShellRegistry { shells: self.shells }
  }
}

/// Read-only set of backends.
#[derive(Clone)]
pub struct ShellRegistry {
  shells: BTreeMap<&'static str, Arc<dyn Shell>>,
}

impl ShellRegistry {
  pub fn builder() -> ShellRegistryBuilder {
    ShellRegistryBuilder::new()
  }

  /// Registered backend names, sorted.
  pub fn names(&self) -> Vec<&'static str> {
    self.shells.keys().copied().collect()
  }

  pub fn len(&self) -> usize {
    self.shells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.shells.is_empty()
  }

  /// Look up a backend by name.
  ///
  /// # Errors
  ///
  /// Returns `RegistryError::Unknown` listing the registered names.
  pub fn select(&self, name: &str) -> Result<Arc<dyn Shell>, RegistryError> {
    self.shells.get(name).cloned().ok_or_else(|| RegistryError::Unknown {
      name: name.to_string(),
      available: self.names().join(", "),
    })
  }

  /// The backend native to the host, if any.
  pub fn select_default(&self) -> Option<Arc<dyn Shell>> {
    self.shells.values().find(|shell| shell.is_default()).cloned()
  }

  /// Resolve a configured name, falling back to the host default and then
  /// to the first registered backend.
  ///
  /// # Errors
  ///
  /// Returns `RegistryError::Unknown` for an unregistered name and
  /// `RegistryError::Empty` when nothing is registered.
  pub fn select_or_default(&self, name: Option<&str>) -> Result<Arc<dyn Shell>, RegistryError> {
    if let Some(name) = name {
      return self.select(name);
    }
    if let Some(shell) = self.select_default() {
      return Ok(shell);
    }
    let shell = self.shells.values().next().cloned().ok_or(RegistryError::Empty)?;
    warn!(shell = shell.name(), "no shell targets this host, falling back");
    Ok(shell)
  }
}

impl std::fmt::Debug for ShellRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ShellRegistry").field("shells", &self.names()).finish()
  }
}
