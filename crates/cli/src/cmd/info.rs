use anyhow::Result;
use serde::Serialize;

use runscript_lib::consts::APP_NAME;
use runscript_lib::platform::host_os;
use runscript_lib::shells::ShellRegistry;

use crate::output::{OutputFormat, print_json, print_stat};

#[derive(Serialize)]
struct HostInfo {
  os: Option<String>,
  default_shell: Option<String>,
  version: &'static str,
}

pub fn cmd_info(registry: &ShellRegistry, format: OutputFormat) -> Result<()> {
  let info = HostInfo {
    os: host_os().map(|os| os.to_string()),
    default_shell: registry.select_default().map(|shell| shell.name().to_string()),
    version: env!("CARGO_PKG_VERSION"),
  };

  if format.is_json() {
    return print_json(&info);
  }

  println!("{} v{}", APP_NAME, info.version);
  print_stat("OS", info.os.as_deref().unwrap_or("unsupported"));
  print_stat("Default shell", info.default_shell.as_deref().unwrap_or("none"));
  Ok(())
}
