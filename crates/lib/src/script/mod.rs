//! Dialect-independent script generation contracts.
//!
//! Three traits meet here:
//! - [`ShellWriter`]: the operations an orchestrator can emit into a script
//! - [`PhaseGenerator`]: the orchestrator side, which decides what to emit
//! - [`Shell`]: a dialect backend that drives writers through all phases
//!
//! Data only flows one way: a [`PhaseGenerator`] calls writer operations,
//! the writer escapes and accumulates text, and the [`Shell`] packages the
//! four bodies into a [`ScriptDescriptor`].

pub mod types;

use std::fmt;

pub use types::{BuildVariable, Phase, ScriptDescriptor, ScriptError, ScriptInfo};

use crate::platform::Os;

/// Operations every dialect writer supports.
///
/// Paths are passed in forward- or backslash form; the writer converts them
/// to whatever its dialect expects. Message operations take preformatted
/// arguments so callers use `format_args!` instead of runtime format strings.
pub trait ShellWriter {
  /// Append one raw line at the current nesting depth.
  fn line(&mut self, text: &str);

  /// Invoke `name` with `args`, aborting the script if it fails.
  fn command(&mut self, name: &str, args: &[&str]);

  /// Bind an environment variable, persisting it to a file when requested.
  fn variable(&mut self, variable: &BuildVariable);

  /// Open a block that runs only if `path` exists as a directory.
  fn if_directory(&mut self, path: &str);

  /// Open a block that runs only if `path` exists as a file.
  fn if_file(&mut self, path: &str);

  /// Switch the innermost open block to its alternative branch.
  fn else_branch(&mut self);

  /// Close the innermost open block.
  fn end_if(&mut self);

  /// Change the working directory, aborting the script if it fails.
  fn cd(&mut self, path: &str);

  /// Remove a directory tree; failures are ignored.
  fn rm_dir(&mut self, path: &str);

  /// Remove a file; failures are ignored.
  fn rm_file(&mut self, path: &str);

  fn print(&mut self, message: fmt::Arguments<'_>);
  fn notice(&mut self, message: fmt::Arguments<'_>);
  fn warning(&mut self, message: fmt::Arguments<'_>);
  fn error(&mut self, message: fmt::Arguments<'_>);

  /// Print a blank line to the job output.
  fn empty_line(&mut self);

  /// Resolve `path` against the working directory the script runs in.
  ///
  /// Absolute paths are returned unchanged.
  fn absolute(&self, path: &str) -> String;
}

/// The orchestrator that decides which operations each phase emits.
///
/// Implementations must leave every writer balanced: each `if_*` closed by an
/// `end_if` before returning.
pub trait PhaseGenerator {
  fn generate_pre_build(&self, w: &mut dyn ShellWriter, info: &ScriptInfo) -> Result<(), ScriptError>;
  fn generate_build(&self, w: &mut dyn ShellWriter, info: &ScriptInfo) -> Result<(), ScriptError>;
  fn generate_after_build(&self, w: &mut dyn ShellWriter, info: &ScriptInfo) -> Result<(), ScriptError>;
  fn generate_post_build(&self, w: &mut dyn ShellWriter, info: &ScriptInfo) -> Result<(), ScriptError>;

  /// Dispatch to the generator for `phase`.
  fn generate(&self, phase: Phase, w: &mut dyn ShellWriter, info: &ScriptInfo) -> Result<(), ScriptError> {
    match phase {
      Phase::PreBuild => self.generate_pre_build(w, info),
      Phase::Build => self.generate_build(w, info),
      Phase::AfterBuild => self.generate_after_build(w, info),
      Phase::PostBuild => self.generate_post_build(w, info),
    }
  }
}

/// A script dialect backend.
pub trait Shell: Send + Sync {
  /// Stable identifier used for registry lookup and configuration.
  fn name(&self) -> &'static str;

  /// Operating system whose native interpreter this dialect targets.
  fn target_os(&self) -> Option<Os>;

  /// Whether this dialect should be used when none is configured.
  fn is_default(&self) -> bool {
    self.target_os().is_some_and(|os| os.is_host())
  }

  /// Generate all four phase bodies and the invocation metadata.
  ///
  /// # Errors
  ///
  /// Returns the first error reported by `phases`, unchanged.
  fn generate_script(&self, info: &ScriptInfo, phases: &dyn PhaseGenerator) -> Result<ScriptDescriptor, ScriptError>;
}
