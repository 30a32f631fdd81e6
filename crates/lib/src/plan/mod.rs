//! Declarative build plans.
//!
//! A [`ScriptPlan`] lists the steps of each phase as data, so a build can be
//! described once in JSON and rendered by any dialect backend. It implements
//! [`PhaseGenerator`] by replaying its steps into the writer.
//!
//! # Example
//!
//! ```
//! use runscript_lib::plan::ScriptPlan;
//! use runscript_lib::script::{ScriptInfo, Shell};
//! use runscript_lib::shells::CmdShell;
//!
//! let plan = ScriptPlan::from_json(r#"{
//!   "build": [
//!     { "op": "variable", "key": "CI", "value": "true" },
//!     { "op": "command", "name": "cargo", "args": ["build"] }
//!   ]
//! }"#).unwrap();
//!
//! let script = CmdShell.generate_script(&ScriptInfo::new("C:\\builds\\app"), &plan).unwrap();
//! assert!(script.build_script.contains("SET CI=true\r\n\"cargo\" \"build\"\r\n"));
//! ```

pub mod types;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::script::{Phase, PhaseGenerator, ScriptError, ScriptInfo, ShellWriter};

pub use types::{PathOperand, PlanError, ScriptPlan, Step};

impl ScriptPlan {
  /// Parse a plan from JSON text.
  pub fn from_json(json: &str) -> Result<Self, PlanError> {
    Ok(serde_json::from_str(json)?)
  }

  /// Load a plan from a JSON file.
  pub fn from_file(path: &Path) -> Result<Self, PlanError> {
    let content = fs::read_to_string(path).map_err(|source| PlanError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&content)
  }

  /// Steps belonging to `phase`.
  pub fn steps(&self, phase: Phase) -> &[Step] {
    match phase {
      Phase::PreBuild => &self.pre_build,
      Phase::Build => &self.build,
      Phase::AfterBuild => &self.after_build,
      Phase::PostBuild => &self.post_build,
    }
  }

  /// Total number of steps across all phases, counting nested ones.
  pub fn step_count(&self) -> usize {
    Phase::ALL.iter().map(|phase| count_steps(self.steps(*phase))).sum()
  }

  fn render(&self, phase: Phase, w: &mut dyn ShellWriter) -> Result<(), ScriptError> {
    let steps = self.steps(phase);
    debug!(phase = %phase, steps = steps.len(), "rendering plan phase");
    // Validate up front so a bad variable never leaves a half-written block.
    validate_steps(steps)?;
    emit_steps(w, steps);
    Ok(())
  }
}

fn count_steps(steps: &[Step]) -> usize {
  steps
    .iter()
    .map(|step| match step {
      Step::IfDirectory { then, otherwise, .. } | Step::IfFile { then, otherwise, .. } => {
        1 + count_steps(then) + count_steps(otherwise)
      }
      _ => 1,
    })
    .sum()
}

fn validate_steps(steps: &[Step]) -> Result<(), ScriptError> {
  for step in steps {
    match step {
      Step::Variable(variable) => variable.validate()?,
      Step::IfDirectory { then, otherwise, .. } | Step::IfFile { then, otherwise, .. } => {
        validate_steps(then)?;
        validate_steps(otherwise)?;
      }
      _ => {}
    }
  }
  Ok(())
}

fn resolve(w: &dyn ShellWriter, path: &str, absolute: bool) -> String {
  if absolute { w.absolute(path) } else { path.to_string() }
}

fn emit_block(w: &mut dyn ShellWriter, then: &[Step], otherwise: &[Step]) {
  emit_steps(w, then);
  if !otherwise.is_empty() {
    w.else_branch();
    emit_steps(w, otherwise);
  }
  w.end_if();
}

fn emit_steps(w: &mut dyn ShellWriter, steps: &[Step]) {
  for step in steps {
    match step {
      Step::Line { text } => w.line(text),
      Step::Command { name, args } => {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        w.command(name, &args);
      }
      Step::Variable(variable) => w.variable(variable),
      Step::IfDirectory {
        path,
        absolute,
        then,
        otherwise,
      } => {
        let path = resolve(w, path, *absolute);
        w.if_directory(&path);
        emit_block(w, then, otherwise);
      }
      Step::IfFile {
        path,
        absolute,
        then,
        otherwise,
      } => {
        let path = resolve(w, path, *absolute);
        w.if_file(&path);
        emit_block(w, then, otherwise);
      }
      Step::Cd(operand) => {
        let path = resolve(w, &operand.path, operand.absolute);
        w.cd(&path);
      }
      Step::RmDir(operand) => {
        let path = resolve(w, &operand.path, operand.absolute);
        w.rm_dir(&path);
      }
      Step::RmFile(operand) => {
        let path = resolve(w, &operand.path, operand.absolute);
        w.rm_file(&path);
      }
      Step::Print { message } => w.print(format_args!("{}", message)),
      Step::Notice { message } => w.notice(format_args!("{}", message)),
      Step::Warning { message } => w.warning(format_args!("{}", message)),
      Step::Error { message } => w.error(format_args!("{}", message)),
      Step::EmptyLine => w.empty_line(),
    }
  }
}

impl PhaseGenerator for ScriptPlan {
  fn generate_pre_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.render(Phase::PreBuild, w)
  }

  fn generate_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.render(Phase::Build, w)
  }

  fn generate_after_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.render(Phase::AfterBuild, w)
  }

  fn generate_post_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    self.render(Phase::PostBuild, w)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::script::BuildVariable;
  use crate::shells::cmd::CmdWriter;
  use std::io::Write;
  use tempfile::NamedTempFile;

  fn render(plan: &ScriptPlan, phase: Phase) -> String {
    let mut w = CmdWriter::new("C:\\tmp");
    plan.generate(phase, &mut w, &ScriptInfo::new("C:\\builds\\app")).unwrap();
    w.finish()
  }

  #[test]
  fn parses_all_step_kinds() {
    let plan = ScriptPlan::from_json(
      r#"{
        "pre_build": [
          { "op": "line", "text": "rem hi" },
          { "op": "command", "name": "git", "args": ["fetch", "origin"] },
          { "op": "variable", "key": "TOKEN", "value": "abc", "file": true },
          { "op": "if_directory", "path": "cache", "then": [{ "op": "empty_line" }], "else": [{ "op": "print", "message": "x" }] },
          { "op": "if_file", "path": "a.lock", "absolute": true },
          { "op": "cd", "path": "src" },
          { "op": "rm_dir", "path": "out", "absolute": true },
          { "op": "rm_file", "path": "a.log" },
          { "op": "notice", "message": "n" },
          { "op": "warning", "message": "w" },
          { "op": "error", "message": "e" }
        ]
      }"#,
    )
    .unwrap();

    assert_eq!(plan.pre_build.len(), 11);
    assert!(plan.build.is_empty());
    assert_eq!(plan.step_count(), 13);
    assert_eq!(plan.pre_build[2], Step::Variable(BuildVariable::file("TOKEN", "abc")));
    assert_eq!(plan.pre_build[6], Step::RmDir(PathOperand::absolute("out")));
    assert_eq!(plan.pre_build[7], Step::RmFile(PathOperand::new("a.log")));
  }

  #[test]
  fn rejects_unknown_op() {
    let err = ScriptPlan::from_json(r#"{ "build": [{ "op": "reboot" }] }"#).unwrap_err();
    assert!(matches!(err, PlanError::Parse(_)));
  }

  #[test]
  fn renders_nested_blocks_balanced() {
    let plan = ScriptPlan {
      build: vec![Step::IfDirectory {
        path: "cache".to_string(),
        absolute: true,
        then: vec![Step::IfFile {
          path: "cache/a".to_string(),
          absolute: false,
          then: vec![Step::Print {
            message: "hit".to_string(),
          }],
          otherwise: vec![],
        }],
        otherwise: vec![Step::EmptyLine],
      }],
      ..Default::default()
    };

    assert_eq!(
      render(&plan, Phase::Build),
      "IF EXIST \"%CD%\\cache\" (\r\n  IF EXIST \"cache\\a\" (\r\n    echo hit\r\n  )\r\n) ELSE (\r\n  echo.\r\n)\r\n"
    );
  }

  #[test]
  fn renders_only_requested_phase() {
    let plan = ScriptPlan {
      pre_build: vec![Step::Cd(PathOperand::new("src"))],
      post_build: vec![Step::RmDir(PathOperand::new("tmp"))],
      ..Default::default()
    };
    assert!(render(&plan, Phase::PreBuild).starts_with("cd /D \"src\""));
    assert_eq!(render(&plan, Phase::Build), "");
    assert!(render(&plan, Phase::PostBuild).starts_with("rd /s /q \"tmp\""));
  }

  #[test]
  fn invalid_variable_fails_phase_without_output() {
    let plan = ScriptPlan {
      build: vec![
        Step::Print {
          message: "before".to_string(),
        },
        Step::IfFile {
          path: "x".to_string(),
          absolute: false,
          then: vec![Step::Variable(BuildVariable::new("BAD KEY", "v"))],
          otherwise: vec![],
        },
      ],
      ..Default::default()
    };

    let mut w = CmdWriter::new("tmp");
    let err = plan
      .generate(Phase::Build, &mut w, &ScriptInfo::new("app"))
      .unwrap_err();
    assert!(matches!(err, ScriptError::InvalidVariable { ref key, .. } if key == "BAD KEY"));
    assert_eq!(w.depth(), 0);
    assert_eq!(w.as_str(), "");
  }

  #[test]
  fn from_file_reads_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "after_build": [{{ "op": "empty_line" }}] }}"#).unwrap();
    let plan = ScriptPlan::from_file(file.path()).unwrap();
    assert_eq!(plan.after_build, vec![Step::EmptyLine]);
  }

  #[test]
  fn from_file_missing() {
    let err = ScriptPlan::from_file(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, PlanError::Read { .. }));
  }
}
