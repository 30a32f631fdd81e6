use std::fmt;

/// Operating systems a script dialect can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    Self::from_consts(std::env::consts::OS)
  }

  /// Map a `std::env::consts::OS` identifier onto a supported OS
  pub fn from_consts(os: &str) -> Option<Self> {
    match os {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
    }
  }

  /// Whether this OS is the one the process is running on
  pub fn is_host(&self) -> bool {
    Self::current() == Some(*self)
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
