use thiserror::Error;

use crate::token::LexError;

#[derive(Debug, Error)]
pub enum GrammarError {
  #[error("invalid grammar: {0}")]
  Ungrammar(#[from] ungrammar::Error),

  #[error("lexer error: {0}")]
  Lex(#[from] LexError),

  #[error("expected {expected} at offset {offset}, found {found}")]
  UnexpectedToken { expected: String, found: String, offset: usize },

  #[error("expected {expected}, found end of file")]
  UnexpectedEof { expected: String },

  #[error("no rule found for production `{name}`")]
  UnknownProduction { name: String },
}
