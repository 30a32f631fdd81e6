use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::script::BuildVariable;

/// A single dialect-independent build operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
  /// Raw script text, written as-is.
  Line { text: String },
  Command {
    name: String,
    #[serde(default)]
    args: Vec<String>,
  },
  Variable(BuildVariable),
  IfDirectory {
    path: String,
    #[serde(default)]
    absolute: bool,
    #[serde(default)]
    then: Vec<Step>,
    #[serde(default, rename = "else")]
    otherwise: Vec<Step>,
  },
  IfFile {
    path: String,
    #[serde(default)]
    absolute: bool,
    #[serde(default)]
    then: Vec<Step>,
    #[serde(default, rename = "else")]
    otherwise: Vec<Step>,
  },
  Cd(PathOperand),
  RmDir(PathOperand),
  RmFile(PathOperand),
  Print { message: String },
  Notice { message: String },
  Warning { message: String },
  Error { message: String },
  EmptyLine,
}

/// A path argument, optionally resolved against the script's working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathOperand {
  pub path: String,
  #[serde(default)]
  pub absolute: bool,
}

impl PathOperand {
  pub fn new(path: &str) -> Self {
    Self {
      path: path.to_string(),
      absolute: false,
    }
  }

  pub fn absolute(path: &str) -> Self {
    Self {
      path: path.to_string(),
      absolute: true,
    }
  }
}

/// Steps for each of the four build phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPlan {
  #[serde(default)]
  pub pre_build: Vec<Step>,
  #[serde(default)]
  pub build: Vec<Step>,
  #[serde(default)]
  pub after_build: Vec<Step>,
  #[serde(default)]
  pub post_build: Vec<Step>,
}

/// Errors from loading a plan.
#[derive(Debug, Error)]
pub enum PlanError {
  #[error("failed to read plan {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid plan: {0}")]
  Parse(#[from] serde_json::Error),
}
