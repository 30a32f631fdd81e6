//! Implementation of the `runscript shells` command.

use anyhow::Result;
use serde::Serialize;

use runscript_lib::shells::ShellRegistry;

use crate::output::{OutputFormat, print_json, symbols};

#[derive(Serialize)]
struct ShellEntry {
  name: &'static str,
  target_os: Option<String>,
  default: bool,
}

pub fn cmd_shells(registry: &ShellRegistry, format: OutputFormat) -> Result<()> {
  let mut entries = Vec::with_capacity(registry.len());
  for name in registry.names() {
    let shell = registry.select(name)?;
    entries.push(ShellEntry {
      name,
      target_os: shell.target_os().map(|os| os.to_string()),
      default: shell.is_default(),
    });
  }

  if format.is_json() {
    return print_json(&entries);
  }

  for entry in &entries {
    let marker = if entry.default { symbols::DEFAULT } else { " " };
    match &entry.target_os {
      Some(os) => println!("{} {} ({})", marker, entry.name, os),
      None => println!("{} {}", marker, entry.name),
    }
  }
  Ok(())
}
