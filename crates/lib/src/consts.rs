/// Application name used in log targets and CLI output
pub const APP_NAME: &str = "runscript";

/// Environment variable selecting the script dialect when none is given explicitly
pub const SHELL_ENV: &str = "RUNSCRIPT_SHELL";
