//! Error taxonomy for the library: one [`Error`] enum covering the parse,
//! template, widget, and project failures, plus `#[from]` wrappers for the
//! I/O and JSON errors that surface through the pipeline.

use thiserror::Error;

/// Library result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong converting or validating a component.
#[derive(Debug, Error)]
pub enum Error {
  /// The `entry_data.ini` config was malformed at a specific 1-based line.
  #[error("malformed config at line {line}: {message}")]
  MalformedConfig { line: usize, message: String },

  /// A previously generated Lua template no longer matches the expected shape.
  #[error("malformed template: {0}")]
  MalformedLua(String),

  /// No component matched the requested name.
  #[error("component not found: {0}")]
  ComponentNotFound(String),

  /// The widget tree has no root (`template`/`root`) section.
  #[error("no root section found")]
  MissingRoot,

  /// A section was claimed as a child by more than one parent.
  #[error("section claimed by multiple parents: {0}")]
  DuplicateChild(String),

  /// Underlying filesystem error.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// Underlying JSON (de)serialization error.
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

impl Error {
  /// Construct a [`Error::MalformedConfig`] for the given 1-based line.
  pub fn malformed(line: usize, message: impl Into<String>) -> Self {
    Error::MalformedConfig {
      line,
      message: message.into(),
    }
  }
}
