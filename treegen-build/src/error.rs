use std::fmt;

use thiserror::Error;

/// A fatal error. The pass stops, and no output is produced.
#[derive(Debug, Error)]
pub enum GenError {
  #[error("node type `{name}` is generated by more than one production")]
  NameCollision { name: String },

  #[error("`{name}` is not a valid identifier")]
  InvalidName { name: String },

  #[error("`{name}` is reserved for a support type")]
  ReservedName { name: String },

  #[error("production `{referenced_from}` refers to undefined production `{name}`")]
  UndefinedProduction { name: String, referenced_from: String },

  #[error("failed to write generated code")]
  Fmt(#[from] fmt::Error),
}
