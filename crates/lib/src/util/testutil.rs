//! Test utilities for runscript-lib.
//!
//! Phase generators with predictable output for exercising dialect backends
//! without a real plan.

use std::cell::RefCell;

use crate::script::{Phase, PhaseGenerator, ScriptError, ScriptInfo, ShellWriter};

/// Prints `phase <name>` into each phase and records the order of calls.
#[derive(Debug, Default)]
pub struct RecordingGenerator {
  pub calls: RefCell<Vec<Phase>>,
}

impl RecordingGenerator {
  fn record(&self, phase: Phase, w: &mut dyn ShellWriter) -> Result<(), ScriptError> {
    self.calls.borrow_mut().push(phase);
    w.print(format_args!("phase {}", phase));
    Ok(())
  }
}

impl PhaseGenerator for RecordingGenerator {
  fn generate_pre_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.record(Phase::PreBuild, w)
  }

  fn generate_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.record(Phase::Build, w)
  }

  fn generate_after_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.record(Phase::AfterBuild, w)
  }

  fn generate_post_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.record(Phase::PostBuild, w)
  }
}

/// Succeeds for every phase except `phase`, which fails with "boom".
#[derive(Debug)]
pub struct FailingGenerator {
  phase: Phase,
}

impl FailingGenerator {
  pub fn at(phase: Phase) -> Self {
    Self { phase }
  }

  fn run(&self, phase: Phase, w: &mut dyn ShellWriter) -> Result<(), ScriptError> {
    w.line("rem ok");
    if phase == self.phase {
      return Err(ScriptError::Phase {
        phase,
        message: "boom".to_string(),
      });
    }
    Ok(())
  }
}

impl PhaseGenerator for FailingGenerator {
  fn generate_pre_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.run(Phase::PreBuild, w)
  }

  fn generate_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.run(Phase::Build, w)
  }

  fn generate_after_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.run(Phase::AfterBuild, w)
  }

  fn generate_post_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.run(Phase::PostBuild, w)
  }
}
