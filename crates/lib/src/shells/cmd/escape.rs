//! Escaping rules for `cmd.exe` batch scripts.
//!
//! Batch has no multi-line string literal and no quoting that disables
//! metacharacters, so text is made safe by prefixing every control
//! character with the caret escape. Scripts run with delayed expansion
//! enabled, which adds a second pass where `!` is special; it needs a
//! doubled caret to survive both passes.
//!
//! Line breaks become `!nl!`, a delayed-expansion reference to the `nl`
//! variable defined in the script prologue.

/// Continuation token substituted for each line break.
pub const NEWLINE_TOKEN: &str = "!nl!";

/// Escape text for a literal position.
///
/// The caret is replaced first so the carets added by later substitutions
/// are not escaped again.
pub fn batch_escape(text: &str) -> String {
  text
    .replace('^', "^^")
    .replace('!', "^^!")
    .replace('&', "^&")
    .replace('<', "^<")
    .replace('>', "^>")
    .replace('|', "^|")
    .replace('\r', "")
    .replace('\n', NEWLINE_TOKEN)
}

/// Escape and wrap text in double quotes.
pub fn batch_quote(text: &str) -> String {
  format!("\"{}\"", batch_escape(text))
}

/// Escape text that must not be re-read as a `%VAR%` reference.
pub fn batch_escape_variable(text: &str) -> String {
  batch_escape(&text.replace('%', "%%"))
}

/// Convert forward slashes to the Windows path separator.
pub fn to_backslash(path: &str) -> String {
  path.replace('/', "\\")
}
