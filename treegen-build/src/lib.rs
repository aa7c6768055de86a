//! Generates syntax tree node types and their visitors from a grammar.
//!
//! Each production of a [`treegen_grammar::Grammar`] becomes one node type:
//! a class with one field per child, a constructor taking every child, a
//! second constructor leaving out the children that can build themselves
//! (tokens with a fixed image), and the four `accept` methods shared by all
//! node types. Alongside, the support node classes, four visitor interfaces
//! and a depth-first visitor are generated. Grammar comments are carried
//! over to the fields and visitor methods they document.
//!
//! The entry point is [`Generator`].

#[macro_use]
extern crate log;

pub mod base;
mod class_info;
pub mod comments;
mod config;
mod diagnostics;
pub mod dispatch;
mod error;
pub mod lower;
pub mod naming;
mod spacing;
pub mod visitor;

mod generate;

#[cfg(test)]
mod tests;

pub use class_info::{ClassInfo, FieldSpec};
pub use config::{Config, DEPTH_FIRST_VOID_VISITOR};
pub use diagnostics::{Diagnostic, Diagnostics, DiagnosticsCollector, Severity};
pub use error::GenError;
pub use generate::{Generator, Output, Unit};
pub use spacing::Spacing;
