//! Types shared by every script dialect.
//!
//! This module defines the build description handed to a backend, the
//! variables it materializes, the descriptor it produces, and the errors
//! generation can report.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters that can never appear in a variable key, whatever the dialect.
const FORBIDDEN_KEY_CHARS: &[char] = &['=', '"', '%', '!', '^', '&', '|', '<', '>'];

/// One of the four ordered build stages, each rendered to its own script body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  PreBuild,
  Build,
  AfterBuild,
  PostBuild,
}

impl Phase {
  /// All phases in execution order.
  pub const ALL: [Phase; 4] = [Phase::PreBuild, Phase::Build, Phase::AfterBuild, Phase::PostBuild];

  pub fn as_str(&self) -> &'static str {
    match self {
      Phase::PreBuild => "pre_build",
      Phase::Build => "build",
      Phase::AfterBuild => "after_build",
      Phase::PostBuild => "post_build",
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// An environment binding to materialize in a script.
///
/// When `file` is set the value is written to a temporary file and the
/// variable holds that file's path instead of the value itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildVariable {
  pub key: String,
  pub value: String,
  #[serde(default)]
  pub file: bool,
}

impl BuildVariable {
  pub fn new(key: &str, value: &str) -> Self {
    Self {
      key: key.to_string(),
      value: value.to_string(),
      file: false,
    }
  }

  pub fn file(key: &str, value: &str) -> Self {
    Self {
      key: key.to_string(),
      value: value.to_string(),
      file: true,
    }
  }

  /// Check that the key is usable as a variable name.
  ///
  /// # Errors
  ///
  /// Returns `ScriptError::InvalidVariable` for empty keys and keys containing
  /// whitespace, `=`, quotes, or interpreter control characters.
  pub fn validate(&self) -> Result<(), ScriptError> {
    let reason = if self.key.is_empty() {
      Some("key is empty".to_string())
    } else if let Some(c) = self.key.chars().find(|c| c.is_whitespace() || c.is_control()) {
      Some(format!("key contains whitespace or control character {:?}", c))
    } else {
      self
        .key
        .chars()
        .find(|c| FORBIDDEN_KEY_CHARS.contains(c))
        .map(|c| format!("key contains reserved character '{}'", c))
    };

    match reason {
      Some(reason) => Err(ScriptError::InvalidVariable {
        key: self.key.clone(),
        reason,
      }),
      None => Ok(()),
    }
  }
}

/// Read-only description of the build a script is generated for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInfo {
  /// Directory the project is checked out into.
  pub project_dir: String,

  /// Name of the machine the job was scheduled on, shown in the banner.
  #[serde(default)]
  pub hostname: Option<String>,

  /// Root for temporary files; defaults to `<project_dir>.tmp`.
  #[serde(default)]
  pub temporary_dir: Option<String>,
}

impl ScriptInfo {
  pub fn new(project_dir: &str) -> Self {
    Self {
      project_dir: project_dir.to_string(),
      hostname: None,
      temporary_dir: None,
    }
  }

  pub fn with_hostname(mut self, hostname: &str) -> Self {
    self.hostname = Some(hostname.to_string());
    self
  }

  pub fn with_temporary_dir(mut self, dir: &str) -> Self {
    self.temporary_dir = Some(dir.to_string());
    self
  }

  /// Directory file-backed variables are written into.
  pub fn temporary_path(&self) -> String {
    match &self.temporary_dir {
      Some(dir) => dir.clone(),
      None => format!("{}.tmp", self.project_dir.trim_end_matches(['/', '\\'])),
    }
  }
}

/// Generated script bodies plus the metadata needed to run them.
///
/// Produced once per build and never mutated by consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDescriptor {
  pub pre_script: String,
  pub build_script: String,
  pub after_script: String,
  pub post_script: String,

  /// Interpreter program.
  pub command: String,

  /// Arguments placed before the script path.
  pub arguments: Vec<String>,

  /// Whether the script is passed as a file path rather than piped in.
  pub pass_file: bool,

  /// Extension for the materialized script file.
  pub extension: String,
}

impl ScriptDescriptor {
  /// Body for the given phase.
  pub fn body(&self, phase: Phase) -> &str {
    match phase {
      Phase::PreBuild => &self.pre_script,
      Phase::Build => &self.build_script,
      Phase::AfterBuild => &self.after_script,
      Phase::PostBuild => &self.post_script,
    }
  }

  /// File name to use when materializing a phase body.
  pub fn file_name(&self, phase: Phase) -> String {
    format!("{}.{}", phase, self.extension)
  }
}

/// Errors that can occur while generating a script.
#[derive(Debug, Error)]
pub enum ScriptError {
  /// A phase generator refused to produce its steps.
  #[error("{phase} generation failed: {message}")]
  Phase { phase: Phase, message: String },

  /// A variable key cannot be expressed in the target dialect.
  #[error("invalid variable '{key}': {reason}")]
  InvalidVariable { key: String, reason: String },
}
