//! Batch implementation of [`ShellWriter`].

use std::fmt;

use crate::script::{BuildVariable, ShellWriter};

use super::escape::{batch_escape, batch_escape_variable, batch_quote, to_backslash};

/// Line terminator expected by `cmd.exe`.
const LINE_ENDING: &str = "\r\n";

/// Expression the interpreter expands to its working directory.
const CURRENT_DIR: &str = "%CD%";

/// Batch has no exceptions: after each step that can fail, exit with the
/// step's own status so the executor sees the failure.
const CHECK_ERRORLEVEL: &str = "IF %errorlevel% NEQ 0 exit /b %errorlevel%";

/// Lines every batch body starts with.
///
/// The final entry defines `nl` as a literal line break, which
/// [`super::escape::NEWLINE_TOKEN`] expands to.
pub const PROLOGUE: [&str; 4] = [
  "@echo off",
  "setlocal enableextensions",
  "setlocal enableDelayedExpansion",
  "set nl=^\r\n\r\n",
];

/// Accumulates one phase of a batch script.
///
/// Blocks opened with `if_directory`/`if_file` must be closed with `end_if`
/// before [`CmdWriter::finish`]; closing a block that was never opened
/// panics.
#[derive(Debug)]
pub struct CmdWriter {
  buffer: String,
  indent: usize,
  temporary_path: String,
}

impl CmdWriter {
  /// Create an empty writer.
  ///
  /// File-backed variables are written below `temporary_path`.
  pub fn new(temporary_path: &str) -> Self {
    Self {
      buffer: String::new(),
      indent: 0,
      temporary_path: temporary_path.to_string(),
    }
  }

  /// Create a writer that already contains the batch prologue.
  pub fn with_prologue(temporary_path: &str) -> Self {
    let mut writer = Self::new(temporary_path);
    for line in PROLOGUE {
      writer.line(line);
    }
    writer
  }

  /// Current nesting depth.
  pub fn depth(&self) -> usize {
    self.indent
  }

  /// Directory that file-backed variables are written below.
  pub fn temporary_path(&self) -> &str {
    &self.temporary_path
  }

  /// Text written so far.
  pub fn as_str(&self) -> &str {
    &self.buffer
  }

  /// Consume the writer and return the script body.
  pub fn finish(self) -> String {
    debug_assert_eq!(self.indent, 0, "script finished with {} unclosed block(s)", self.indent);
    self.buffer
  }

  fn open_block(&mut self) {
    self.indent += 1;
  }

  fn close_block(&mut self) {
    assert!(self.indent > 0, "block closed without a matching if_directory/if_file");
    self.indent -= 1;
  }

  fn check_errorlevel(&mut self) {
    self.line(CHECK_ERRORLEVEL);
    self.line("");
  }

  fn echo(&mut self, message: fmt::Arguments<'_>) {
    let text = message.to_string();
    self.line(&format!("echo {}", batch_escape_variable(&text)));
  }
}

/// Whether `path` is absolute on Windows or in forward-slash form.
fn is_absolute(path: &str) -> bool {
  let bytes = path.as_bytes();
  match bytes {
    [b'/' | b'\\', ..] => true,
    [drive, b':', b'/' | b'\\', ..] => drive.is_ascii_alphabetic(),
    _ => false,
  }
}

/// Segments of a relative backslash path with empty and `.` segments
/// dropped and `..` folded into its parent where there is one.
fn clean_relative(path: &str) -> Vec<&str> {
  let mut segments: Vec<&str> = Vec::new();
  for segment in path.split('\\') {
    match segment {
      "" | "." => {}
      ".." if segments.last().is_some_and(|last| *last != "..") => {
        segments.pop();
      }
      _ => segments.push(segment),
    }
  }
  segments
}

impl ShellWriter for CmdWriter {
  fn line(&mut self, text: &str) {
    for _ in 0..self.indent {
      self.buffer.push_str("  ");
    }
    self.buffer.push_str(text);
    self.buffer.push_str(LINE_ENDING);
  }

  fn command(&mut self, name: &str, args: &[&str]) {
    let mut list = vec![batch_quote(name)];
    list.extend(args.iter().map(|arg| batch_quote(arg)));
    self.line(&list.join(" "));
    self.check_errorlevel();
  }

  fn variable(&mut self, variable: &BuildVariable) {
    if variable.file {
      let temporary_path = to_backslash(&self.temporary_path);
      let file = to_backslash(&self.absolute(&format!("{}/{}", self.temporary_path, variable.key)));
      self.line(&format!("md {} 2>NUL 1>NUL", batch_quote(&temporary_path)));
      self.line(&format!(
        "echo {} > {}",
        batch_escape_variable(&variable.value),
        batch_escape(&file)
      ));
      self.line(&format!("SET {}={}", batch_escape_variable(&variable.key), batch_escape(&file)));
    } else {
      self.line(&format!(
        "SET {}={}",
        batch_escape_variable(&variable.key),
        batch_escape_variable(&variable.value)
      ));
    }
  }

  fn if_directory(&mut self, path: &str) {
    self.line(&format!("IF EXIST {} (", batch_quote(&to_backslash(path))));
    self.open_block();
  }

  fn if_file(&mut self, path: &str) {
    self.line(&format!("IF EXIST {} (", batch_quote(&to_backslash(path))));
    self.open_block();
  }

  fn else_branch(&mut self) {
    self.close_block();
    self.line(") ELSE (");
    self.open_block();
  }

  fn end_if(&mut self) {
    self.close_block();
    self.line(")");
  }

  fn cd(&mut self, path: &str) {
    self.line(&format!("cd /D {}", batch_quote(&to_backslash(path))));
    self.check_errorlevel();
  }

  fn rm_dir(&mut self, path: &str) {
    self.line(&format!("rd /s /q {} 2>NUL 1>NUL", batch_quote(&to_backslash(path))));
  }

  fn rm_file(&mut self, path: &str) {
    self.line(&format!("del /f /q {} 2>NUL 1>NUL", batch_quote(&to_backslash(path))));
  }

  fn print(&mut self, message: fmt::Arguments<'_>) {
    self.echo(message);
  }

  fn notice(&mut self, message: fmt::Arguments<'_>) {
    self.echo(message);
  }

  fn warning(&mut self, message: fmt::Arguments<'_>) {
    self.echo(message);
  }

  fn error(&mut self, message: fmt::Arguments<'_>) {
    self.echo(message);
  }

  fn empty_line(&mut self) {
    self.line("echo.");
  }

  fn absolute(&self, path: &str) -> String {
    if is_absolute(path) {
      return path.to_string();
    }

    let path = to_backslash(path);
    let relative = clean_relative(&path);
    if relative.is_empty() {
      CURRENT_DIR.to_string()
    } else {
      format!("{}\\{}", CURRENT_DIR, relative.join("\\"))
    }
  }
}
