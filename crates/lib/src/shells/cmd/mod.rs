//! Windows `cmd.exe` batch dialect.

pub mod escape;
pub mod writer;

use tracing::{debug, info};

use crate::platform::Os;
use crate::script::{Phase, PhaseGenerator, ScriptDescriptor, ScriptError, ScriptInfo, Shell, ShellWriter};

pub use writer::CmdWriter;

use escape::batch_escape;

/// Backend producing batch scripts run with `cmd /Q /C <file>.cmd`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CmdShell;

impl CmdShell {
  pub const NAME: &'static str = "cmd";

  fn phase_writer(info: &ScriptInfo) -> CmdWriter {
    CmdWriter::with_prologue(&info.temporary_path())
  }

  fn banner(writer: &mut CmdWriter, info: &ScriptInfo) {
    match info.hostname.as_deref().filter(|h| !h.is_empty()) {
      Some(hostname) => writer.line(&format!("echo Running on %COMPUTERNAME% via {}...", batch_escape(hostname))),
      None => writer.line("echo Running on %COMPUTERNAME%..."),
    }
  }

  fn render(phases: &dyn PhaseGenerator, phase: Phase, mut writer: CmdWriter, info: &ScriptInfo) -> Result<String, ScriptError> {
    debug!(shell = Self::NAME, phase = %phase, "generating phase");
    phases.generate(phase, &mut writer, info)?;
    Ok(writer.finish())
  }
}

impl Shell for CmdShell {
  fn name(&self) -> &'static str {
    Self::NAME
  }

  fn target_os(&self) -> Option<Os> {
    Some(Os::Windows)
  }

  fn generate_script(&self, info: &ScriptInfo, phases: &dyn PhaseGenerator) -> Result<ScriptDescriptor, ScriptError> {
    let mut pre = Self::phase_writer(info);
    Self::banner(&mut pre, info);
    let pre_script = Self::render(phases, Phase::PreBuild, pre, info)?;
    let build_script = Self::render(phases, Phase::Build, Self::phase_writer(info), info)?;
    let after_script = Self::render(phases, Phase::AfterBuild, Self::phase_writer(info), info)?;
    let post_script = Self::render(phases, Phase::PostBuild, Self::phase_writer(info), info)?;

    info!(shell = Self::NAME, project_dir = %info.project_dir, "generated script");

    Ok(ScriptDescriptor {
      pre_script,
      build_script,
      after_script,
      post_script,
      command: "cmd".to_string(),
      arguments: vec!["/Q".to_string(), "/C".to_string()],
      pass_file: true,
      extension: "cmd".to_string(),
    })
  }
}
