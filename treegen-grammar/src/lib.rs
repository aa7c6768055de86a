//! The grammar tree consumed by the generator.
//!
//! A [`Grammar`] is a list of productions in source order, plus every line
//! comment found in the source. Each production body is either a BNF
//! expansion (choices of sequences of units) or a raw code block. All nodes
//! carry a [`Span`] so that comments can be matched back to the parts of a
//! production they document.
//!
//! The tree is plain data: front ends build it, the generator only reads it.
//!
//! The [`ungram`] front end only covers what ungrammar can express. Code
//! productions, inline code fragments and one-or-more units have no ungrammar
//! syntax, so they are only produced by building the tree directly.

use std::{fmt, ops::Range};

#[macro_use]
extern crate log;

mod error;
pub mod token;
pub mod ungram;

#[cfg(test)]
mod tests;

pub use error::GrammarError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
  pub start: usize,
  pub end:   usize,
}

impl From<Range<usize>> for Span {
  fn from(range: Range<usize>) -> Self { Span { start: range.start, end: range.end } }
}

impl Span {
  pub fn new(start: usize, end: usize) -> Self { Span { start, end } }

  /// The smallest span covering both `self` and `other`.
  pub fn cover(self, other: Span) -> Span {
    Span { start: self.start.min(other.start), end: self.end.max(other.end) }
  }

  pub fn contains(&self, other: Span) -> bool {
    self.start <= other.start && other.end <= self.end
  }
}

impl fmt::Display for Span {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}..{}", self.start, self.end)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grammar {
  pub productions: Vec<Production>,
  /// Line comments, sorted by position.
  pub comments:    Vec<Comment>,
}

/// A single `//` comment. `text` excludes the marker and the line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
  pub span: Span,
  pub text: String,
}

// Productions

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
  pub name: String,
  pub span: Span,
  pub body: ProductionBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductionBody {
  Bnf(ExpansionChoices),
  /// A production whose body is user code only. It has no tree children.
  Code { code: String },
}

// Expansions

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionChoices {
  pub span:    Span,
  pub choices: Vec<Expansion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
  pub span:  Span,
  pub units: Vec<ExpansionUnit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionUnit {
  pub span: Span,
  pub kind: UnitKind,
  /// Inline user code attached to this unit. Passed through untouched.
  pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitKind {
  Terminal { image: String },
  NonTerminal { name: String },
  Group(ExpansionChoices),
  Optional(ExpansionChoices),
  ZeroOrMore(ExpansionChoices),
  OneOrMore(ExpansionChoices),
}

impl Grammar {
  pub fn production(&self, name: &str) -> Option<&Production> {
    self.productions.iter().find(|p| p.name == name)
  }

  /// Comments lying entirely inside `span`.
  pub fn comments_in(&self, span: Span) -> impl Iterator<Item = &Comment> + '_ {
    self.comments.iter().filter(move |c| span.contains(c.span))
  }
}

impl Production {
  pub fn bnf(name: impl Into<String>, span: Span, choices: ExpansionChoices) -> Self {
    Production { name: name.into(), span, body: ProductionBody::Bnf(choices) }
  }

  pub fn code(name: impl Into<String>, span: Span, code: impl Into<String>) -> Self {
    Production { name: name.into(), span, body: ProductionBody::Code { code: code.into() } }
  }

  pub fn choices(&self) -> Option<&ExpansionChoices> {
    match &self.body {
      ProductionBody::Bnf(choices) => Some(choices),
      ProductionBody::Code { .. } => None,
    }
  }
}

impl ExpansionChoices {
  pub fn new(choices: Vec<Expansion>) -> Self {
    let span = cover_all(choices.iter().map(|c| c.span));
    ExpansionChoices { span, choices }
  }

  pub fn is_choice(&self) -> bool { self.choices.len() > 1 }
}

impl Expansion {
  pub fn new(units: Vec<ExpansionUnit>) -> Self {
    let span = cover_all(units.iter().map(|u| u.span));
    Expansion { span, units }
  }
}

impl ExpansionUnit {
  pub fn new(span: Span, kind: UnitKind) -> Self { ExpansionUnit { span, kind, code: None } }

  pub fn terminal(span: Span, image: impl Into<String>) -> Self {
    Self::new(span, UnitKind::Terminal { image: image.into() })
  }

  pub fn non_terminal(span: Span, name: impl Into<String>) -> Self {
    Self::new(span, UnitKind::NonTerminal { name: name.into() })
  }

  pub fn with_code(mut self, code: impl Into<String>) -> Self {
    self.code = Some(code.into());
    self
  }

  /// The nested choices of a composite unit, `None` for terminals and
  /// non-terminals.
  pub fn nested(&self) -> Option<&ExpansionChoices> {
    match &self.kind {
      UnitKind::Terminal { .. } | UnitKind::NonTerminal { .. } => None,
      UnitKind::Group(c)
      | UnitKind::Optional(c)
      | UnitKind::ZeroOrMore(c)
      | UnitKind::OneOrMore(c) => Some(c),
    }
  }

  fn is_atom(&self) -> bool { self.nested().is_none() }
}

fn cover_all(mut spans: impl Iterator<Item = Span>) -> Span {
  let first = spans.next().unwrap_or_default();
  spans.fold(first, Span::cover)
}

// Display renders the grammar back in ungrammar notation.

impl fmt::Display for Grammar {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for p in &self.productions {
      writeln!(f, "{p}")?;
    }
    Ok(())
  }
}

impl fmt::Display for Production {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.body {
      ProductionBody::Bnf(choices) => write!(f, "{} = {}", self.name, choices),
      ProductionBody::Code { code } => write!(f, "{} = {{ {} }}", self.name, code.trim()),
    }
  }
}

impl fmt::Display for ExpansionChoices {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, choice) in self.choices.iter().enumerate() {
      if i > 0 {
        write!(f, " | ")?;
      }
      write!(f, "{choice}")?;
    }
    Ok(())
  }
}

impl fmt::Display for Expansion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, unit) in self.units.iter().enumerate() {
      if i > 0 {
        write!(f, " ")?;
      }
      write!(f, "{unit}")?;
    }
    Ok(())
  }
}

impl fmt::Display for ExpansionUnit {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fn postfix(f: &mut fmt::Formatter<'_>, c: &ExpansionChoices, op: char) -> fmt::Result {
      match c.choices.as_slice() {
        [single] if single.units.len() == 1 && single.units[0].is_atom() => {
          write!(f, "{}{op}", single.units[0])
        }
        _ => write!(f, "({c}){op}"),
      }
    }

    match &self.kind {
      UnitKind::Terminal { image } => write!(f, "'{}'", image.replace('\'', "\\'"))?,
      UnitKind::NonTerminal { name } => write!(f, "{name}")?,
      UnitKind::Group(c) => write!(f, "({c})")?,
      UnitKind::Optional(c) => postfix(f, c, '?')?,
      UnitKind::ZeroOrMore(c) => postfix(f, c, '*')?,
      UnitKind::OneOrMore(c) => postfix(f, c, '+')?,
    }
    if let Some(code) = &self.code {
      write!(f, " {{ {} }}", code.trim())?;
    }
    Ok(())
  }
}
