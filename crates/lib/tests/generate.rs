//! End-to-end generation through the built-in registry.

use runscript_lib::plan::{PathOperand, ScriptPlan, Step};
use runscript_lib::script::{BuildVariable, Phase, PhaseGenerator, ScriptError, ScriptInfo, Shell, ShellWriter};
use runscript_lib::shells::{self, CmdShell};

const CHECK_LINE: &str = "IF %errorlevel% NEQ 0 exit /b %errorlevel%";

/// Drives every writer operation by hand, the way an orchestrator would.
struct CheckoutGenerator;

impl CheckoutGenerator {
  fn checkout(w: &mut dyn ShellWriter, info: &ScriptInfo) {
    let git_dir = format!("{}/.git", info.project_dir);
    w.notice(format_args!("Fetching changes for {}...", info.project_dir));
    w.if_directory(&git_dir);
    w.cd(&info.project_dir);
    w.command("git", &["clean", "-ffdx"]);
    w.else_branch();
    w.rm_dir(&info.project_dir);
    w.command("git", &["clone", "https://example.com/repo.git", info.project_dir.as_str()]);
    w.end_if();
  }
}

impl PhaseGenerator for CheckoutGenerator {
  fn generate_pre_build(&self, w: &mut dyn ShellWriter, info: &ScriptInfo) -> Result<(), ScriptError> {
    Self::checkout(w, info);
    Ok(())
  }

  fn generate_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    w.variable(&BuildVariable::new("FOO", "100%"));
    w.variable(&BuildVariable::file("SECRET", "multi\nline"));
    w.command("echo", &["hello & goodbye"]);
    Ok(())
  }

  fn generate_after_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    w.if_file("coverage.xml");
    w.warning(format_args!("coverage {}%", 80));
    w.end_if();
    Ok(())
  }

  fn generate_post_build(&self, w: &mut dyn ShellWriter, _info: &ScriptInfo) -> Result<(), ScriptError> {
    w.error(format_args!("cleanup"));
    w.rm_file("artifacts.zip");
    Ok(())
  }
}

fn info() -> ScriptInfo {
  ScriptInfo::new("C:/builds/group/project").with_hostname("win-runner")
}

#[test]
fn builtin_registry_generates_cmd() {
  let registry = shells::builtin().unwrap();
  let shell = registry.select("cmd").unwrap();
  let script = shell.generate_script(&info(), &CheckoutGenerator).unwrap();

  assert_eq!(script.command, "cmd");
  assert!(script.pre_script.contains("echo Running on %COMPUTERNAME% via win-runner...\r\n"));
  assert!(script.pre_script.contains("IF EXIST \"C:\\builds\\group\\project\\.git\" (\r\n"));
  assert!(script.pre_script.contains(") ELSE (\r\n"));
}

#[test]
fn commands_and_cd_followed_by_status_check() {
  let script = CmdShell.generate_script(&info(), &CheckoutGenerator).unwrap();
  for phase in Phase::ALL {
    let lines: Vec<&str> = script.body(phase).split("\r\n").map(str::trim_start).collect();
    for (i, line) in lines.iter().enumerate() {
      let is_step = line.starts_with("\"git\"") || line.starts_with("\"echo\"") || line.starts_with("cd /D");
      if is_step {
        assert_eq!(lines[i + 1], CHECK_LINE, "{}: '{}' not checked", phase, line);
      }
    }
  }
}

#[test]
fn file_backed_variable_scenario() {
  let script = CmdShell.generate_script(&info(), &CheckoutGenerator).unwrap();
  let lines: Vec<&str> = script.build_script.split("\r\n").collect();
  let md = lines.iter().position(|l| l.starts_with("md ")).unwrap();
  assert_eq!(lines[md], "md \"C:\\builds\\group\\project.tmp\" 2>NUL 1>NUL");
  assert_eq!(lines[md + 1], "echo multi!nl!line > C:\\builds\\group\\project.tmp\\SECRET");
  assert_eq!(lines[md + 2], "SET SECRET=C:\\builds\\group\\project.tmp\\SECRET");
  assert!(lines.contains(&"SET FOO=100%%"));
}

#[test]
fn messages_double_percent() {
  let script = CmdShell.generate_script(&info(), &CheckoutGenerator).unwrap();
  assert!(script.after_script.contains("IF EXIST \"coverage.xml\" (\r\n  echo coverage 80%%\r\n)\r\n"));
  assert!(script.post_script.contains("echo cleanup\r\ndel /f /q \"artifacts.zip\" 2>NUL 1>NUL\r\n"));
}

#[test]
fn plan_and_hand_written_generator_agree() {
  let plan = ScriptPlan {
    build: vec![
      Step::Variable(BuildVariable::new("FOO", "100%")),
      Step::Variable(BuildVariable::file("SECRET", "multi\nline")),
      Step::Command {
        name: "echo".to_string(),
        args: vec!["hello & goodbye".to_string()],
      },
    ],
    post_build: vec![
      Step::Error {
        message: "cleanup".to_string(),
      },
      Step::RmFile(PathOperand::new("artifacts.zip")),
    ],
    ..Default::default()
  };

  let from_plan = CmdShell.generate_script(&info(), &plan).unwrap();
  let by_hand = CmdShell.generate_script(&info(), &CheckoutGenerator).unwrap();
  assert_eq!(from_plan.build_script, by_hand.build_script);
  assert_eq!(from_plan.post_script, by_hand.post_script);
}

#[test]
fn failing_phase_yields_no_descriptor() {
  let plan = ScriptPlan {
    post_build: vec![Step::Variable(BuildVariable::new("", "x"))],
    ..Default::default()
  };
  let result = CmdShell.generate_script(&info(), &plan);
  assert!(matches!(result, Err(ScriptError::InvalidVariable { .. })));
}
