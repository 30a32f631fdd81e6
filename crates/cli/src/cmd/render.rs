//! Implementation of the `runscript render` command.
//!
//! Loads a JSON plan, renders it with the selected dialect and prints or
//! writes the resulting scripts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use tracing::info;

use runscript_lib::plan::ScriptPlan;
use runscript_lib::script::{Phase, ScriptDescriptor, ScriptInfo};
use runscript_lib::shells::ShellRegistry;

use crate::output::{OutputFormat, count_lines, print_json, print_stat, print_success, symbols};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PhaseArg {
  PreBuild,
  Build,
  AfterBuild,
  PostBuild,
}

impl From<PhaseArg> for Phase {
  fn from(arg: PhaseArg) -> Self {
    match arg {
      PhaseArg::PreBuild => Phase::PreBuild,
      PhaseArg::Build => Phase::Build,
      PhaseArg::AfterBuild => Phase::AfterBuild,
      PhaseArg::PostBuild => Phase::PostBuild,
    }
  }
}

#[derive(Debug)]
pub struct RenderOptions {
  pub plan: PathBuf,
  pub shell: Option<String>,
  pub project_dir: Option<String>,
  pub hostname: Option<String>,
  pub tmp_dir: Option<String>,
  pub phase: Option<PhaseArg>,
  pub out: Option<PathBuf>,
  pub format: OutputFormat,
}

impl RenderOptions {
  fn script_info(&self) -> Result<ScriptInfo> {
    let project_dir = match &self.project_dir {
      Some(dir) => dir.clone(),
      None => std::env::current_dir()
        .context("Failed to determine current directory")?
        .display()
        .to_string(),
    };

    let mut info = ScriptInfo::new(&project_dir);
    info.hostname = self.hostname.clone();
    info.temporary_dir = self.tmp_dir.clone();
    Ok(info)
  }
}

pub fn cmd_render(options: &RenderOptions, registry: &ShellRegistry) -> Result<()> {
  if options.phase.is_some() && options.format.is_json() {
    bail!("--phase prints a raw script body and cannot be combined with --format json");
  }

  let plan = ScriptPlan::from_file(&options.plan)
    .with_context(|| format!("Failed to load plan: {}", options.plan.display()))?;
  let shell = registry.select_or_default(options.shell.as_deref())?;
  let script_info = options.script_info()?;

  info!(shell = shell.name(), steps = plan.step_count(), "rendering plan");

  let descriptor = shell
    .generate_script(&script_info, &plan)
    .with_context(|| format!("Failed to generate {} script", shell.name()))?;

  if let Some(dir) = &options.out {
    write_scripts(dir, &descriptor)?;
  }

  if let Some(phase) = options.phase {
    print!("{}", descriptor.body(phase.into()));
    return Ok(());
  }

  if options.format.is_json() {
    return print_json(&descriptor);
  }

  print_success(&format!("Rendered {} with {}", options.plan.display(), shell.name()));
  print_stat(
    "Command",
    &format!("{} {}", descriptor.command, descriptor.arguments.join(" ")),
  );
  print_stat("Pass file", &descriptor.pass_file.to_string());
  for phase in Phase::ALL {
    print_stat(
      phase.as_str(),
      &format!("{} lines", count_lines(descriptor.body(phase))),
    );
  }
  if let Some(dir) = &options.out {
    print_stat("Written", &format!("{} {}", symbols::ARROW, dir.display()));
  }
  Ok(())
}

fn write_scripts(dir: &Path, descriptor: &ScriptDescriptor) -> Result<()> {
  fs::create_dir_all(dir).with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

  for phase in Phase::ALL {
    let path = dir.join(descriptor.file_name(phase));
    fs::write(&path, descriptor.body(phase)).with_context(|| format!("Failed to write script: {}", path.display()))?;
  }

  let descriptor_path = dir.join("descriptor.json");
  let json = serde_json::to_string_pretty(descriptor).context("Failed to serialize descriptor")?;
  fs::write(&descriptor_path, json)
    .with_context(|| format!("Failed to write descriptor: {}", descriptor_path.display()))?;

  Ok(())
}
