//! Error types for quatt-release
//!
//! A single error enum covers the three failure classes the pipeline knows
//! about: configuration problems, external compiler failures, and filesystem
//! errors while publishing. Errors carry an optional help message that is
//! printed below the error itself.

use std::fmt;
use std::path::PathBuf;

pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Top-level error type for all quatt-release operations
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration problem (release.toml or extracted metadata)
  Config(ConfigError),

  /// The external firmware compiler exited non-zero
  Compiler { command: String, stderr: String },

  /// Filesystem failure with a description of what was being attempted
  Io {
    context: String,
    source: std::io::Error,
  },

  /// Free-form error, optionally with a suggested fix
  Message {
    message: String,
    help: Option<String>,
  },
}

/// Configuration-specific errors
#[derive(Debug)]
pub enum ConfigError {
  /// release.toml exists but could not be parsed
  Invalid { path: PathBuf, reason: String },

  /// A required scalar was not found in the base configuration document
  MissingField { field: String, path: PathBuf },
}

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  Success,
  Failure,
}

impl ExitCode {
  pub fn as_i32(self) -> i32 {
    match self {
      ExitCode::Success => 0,
      ExitCode::Failure => 1,
    }
  }
}

impl ReleaseError {
  /// Create a free-form error without help text
  pub fn message(message: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: message.into(),
      help: None,
    }
  }

  /// Create a free-form error with a suggested fix
  pub fn with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: message.into(),
      help: Some(help.into()),
    }
  }

  pub fn exit_code(&self) -> ExitCode {
    ExitCode::Failure
  }

  /// Help text to print below the error, if any
  pub fn help(&self) -> Option<&str> {
    match self {
      ReleaseError::Message { help, .. } => help.as_deref(),
      ReleaseError::Config(ConfigError::MissingField { field, .. }) => match field.as_str() {
        "version" => Some("Add a `version: \"x.y.z\"` entry to the base configuration"),
        "name" => Some("Add a `name: <project>` entry to the base configuration"),
        _ => None,
      },
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Compiler { command, stderr } => {
        write!(f, "compiler command `{}` failed", command)?;
        let stderr = stderr.trim();
        if !stderr.is_empty() {
          write!(f, "\n{}", stderr)?;
        }
        Ok(())
      }
      ReleaseError::Io { context, source } => write!(f, "{}: {}", context, source),
      ReleaseError::Message { message, .. } => write!(f, "{}", message),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { path, reason } => {
        write!(f, "invalid configuration in {}: {}", path.display(), reason)
      }
      ConfigError::MissingField { field, path } => {
        write!(f, "no `{}:` scalar found in {}", field, path.display())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io { source, .. } => Some(source),
      _ => None,
    }
  }
}

impl From<std::io::Error> for ReleaseError {
  fn from(source: std::io::Error) -> Self {
    ReleaseError::Io {
      context: "I/O error".to_string(),
      source,
    }
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON serialization failed: {}", err))
  }
}

/// Extension trait for attaching context to fallible operations
pub trait ResultExt<T> {
  fn context(self, msg: &str) -> ReleaseResult<T>;
  fn with_context<F: FnOnce() -> String>(self, f: F) -> ReleaseResult<T>;
}

impl<T> ResultExt<T> for Result<T, std::io::Error> {
  fn context(self, msg: &str) -> ReleaseResult<T> {
    self.map_err(|source| ReleaseError::Io {
      context: msg.to_string(),
      source,
    })
  }

  fn with_context<F: FnOnce() -> String>(self, f: F) -> ReleaseResult<T> {
    self.map_err(|source| ReleaseError::Io {
      context: f(),
      source,
    })
  }
}

/// Print an error (and its help text) to stderr
pub fn print_error(err: &ReleaseError) {
  eprintln!("❌ Error: {}", err);
  if let Some(help) = err.help() {
    eprintln!();
    eprintln!("💡 {}", help);
  }
}
