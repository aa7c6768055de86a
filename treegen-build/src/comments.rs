//! Matches grammar comments with the parts of a production they document.
//!
//! A production lowers to one or more fields. Each field gets the comments
//! written between the end of the previous field and its own end. Comments
//! written inside a group, optional or repetition nested in a field belong to
//! that anonymous sub-part instead. Sub-parts are numbered in pre-order across
//! the whole production, which is the order the visitors walk them in.

use std::sync::atomic::{AtomicUsize, Ordering};

use treegen_grammar::{ExpansionChoices, Grammar, Production, Span};

use crate::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
  pub bare:  String,
  pub debug: Option<String>,
}

pub type CommentBlock = Vec<CommentLine>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubPart {
  /// The index of the field containing this sub-part.
  pub field: usize,
  pub block: CommentBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentsData {
  /// One block per field, in field order.
  pub fields: Vec<CommentBlock>,
  /// Only kept with `inline_accept_methods`.
  pub subs:   Option<Vec<SubPart>>,
}

impl CommentsData {
  pub fn field(&self, i: usize) -> Option<&CommentBlock> { self.fields.get(i) }

  /// The sub-parts of field `i`, with their production-wide index.
  pub fn subs_of(&self, i: usize) -> impl Iterator<Item = (usize, &SubPart)> + '_ {
    self.subs.iter().flatten().enumerate().filter(move |(_, sub)| sub.field == i)
  }
}

struct FieldSlot {
  span: Span,
  subs: Vec<Span>,
}

pub struct CommentAssociator<'g> {
  grammar: &'g Grammar,
  config:  &'g Config,
  walks:   AtomicUsize,
}

impl<'g> CommentAssociator<'g> {
  pub fn new(grammar: &'g Grammar, config: &'g Config) -> Self {
    CommentAssociator { grammar, config, walks: AtomicUsize::new(0) }
  }

  /// How many productions have been walked so far.
  pub fn walks(&self) -> usize { self.walks.load(Ordering::Relaxed) }

  /// Splits the comments of `production` into field and sub-part blocks.
  /// Returns `None` for a code-only production.
  pub fn associate(&self, production: &Production) -> Option<CommentsData> {
    let choices = production.choices()?;
    self.walks.fetch_add(1, Ordering::Relaxed);

    let slots = field_slots(choices);
    let mut fields: Vec<CommentBlock> = slots.iter().map(|_| vec![]).collect();
    let mut subs: Vec<SubPart> = slots
      .iter()
      .enumerate()
      .flat_map(|(i, slot)| slot.subs.iter().map(move |_| SubPart { field: i, block: vec![] }))
      .collect();

    let Some(last) = slots.len().checked_sub(1) else {
      return Some(CommentsData { fields, subs: self.keep_subs(subs) });
    };

    for comment in self.grammar.comments_in(production.span) {
      let i = slots.iter().position(|slot| comment.span.start < slot.span.end).unwrap_or(last);

      let first_sub = slots[..i].iter().map(|slot| slot.subs.len()).sum::<usize>();
      let innermost = slots[i].subs.iter().rposition(|span| span.contains(comment.span));

      let bare = comment.text.trim().to_string();
      match innermost {
        Some(j) => {
          let k = first_sub + j;
          let debug = self.config.debug_comments.then(|| format!(" // s{k} @{}", comment.span));
          subs[k].block.push(CommentLine { bare, debug });
        }
        None => {
          let debug = self.config.debug_comments.then(|| format!(" // f{i} @{}", comment.span));
          fields[i].push(CommentLine { bare, debug });
        }
      }
    }

    Some(CommentsData { fields, subs: self.keep_subs(subs) })
  }

  fn keep_subs(&self, subs: Vec<SubPart>) -> Option<Vec<SubPart>> {
    self.config.inline_accept_methods.then_some(subs)
  }
}

// Mirrors the field layout produced by lowering: a choice is one field,
// otherwise every unit of the sequence is a field.
fn field_slots(choices: &ExpansionChoices) -> Vec<FieldSlot> {
  if choices.is_choice() {
    let mut subs = vec![];
    collect_subs(choices, &mut subs);
    return vec![FieldSlot { span: choices.span, subs }];
  }

  choices
    .choices
    .iter()
    .flat_map(|seq| &seq.units)
    .map(|unit| {
      let mut subs = vec![];
      if let Some(nested) = unit.nested() {
        collect_subs(nested, &mut subs);
      }
      FieldSlot { span: unit.span, subs }
    })
    .collect()
}

fn collect_subs(choices: &ExpansionChoices, out: &mut Vec<Span>) {
  for unit in choices.choices.iter().flat_map(|seq| &seq.units) {
    if let Some(nested) = unit.nested() {
      out.push(unit.span);
      collect_subs(nested, out);
    }
  }
}
