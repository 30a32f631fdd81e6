mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use runscript_lib::consts::{APP_NAME, SHELL_ENV};
use runscript_lib::shells;

use cmd::{PhaseArg, RenderOptions};
use output::OutputFormat;

/// runscript - Render build plans into interpreter scripts
#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate scripts for a JSON build plan
  Render {
    /// Path to the plan file
    plan: PathBuf,

    /// Script dialect (defaults to the one native to this host)
    #[arg(short, long, env = SHELL_ENV)]
    shell: Option<String>,

    /// Directory the project is checked out into
    #[arg(long)]
    project_dir: Option<String>,

    /// Runner hostname shown in the pre-build banner
    #[arg(long)]
    hostname: Option<String>,

    /// Directory for file-backed variables (defaults to <project-dir>.tmp)
    #[arg(long)]
    tmp_dir: Option<String>,

    /// Print only the raw body of this phase (not valid with --format json)
    #[arg(long, value_enum)]
    phase: Option<PhaseArg>,

    /// Write the phase bodies and descriptor into this directory
    #[arg(short, long)]
    out: Option<PathBuf>,
  },

  /// List available script dialects
  Shells,

  /// Show host information
  Info,
}

fn init_logging(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let registry = shells::builtin().context("Failed to register built-in shells")?;

  match cli.command {
    Commands::Render {
      plan,
      shell,
      project_dir,
      hostname,
      tmp_dir,
      phase,
      out,
    } => {
      let options = RenderOptions {
        plan,
        shell,
        project_dir,
        hostname,
        tmp_dir,
        phase,
        out,
        format: cli.format,
      };
      cmd::cmd_render(&options, &registry)
    }
    Commands::Shells => cmd::cmd_shells(&registry, cli.format),
    Commands::Info => cmd::cmd_info(&registry, cli.format),
  }
}
