//! Turns productions into node type descriptions.

use treegen_grammar::{ExpansionUnit, Production, ProductionBody, UnitKind};

use crate::{naming::fixed_name, ClassInfo, Config};

pub fn lower<'g>(production: &'g Production, config: &'g Config) -> ClassInfo<'g> {
  let mut class = ClassInfo::new(production, config);

  let ProductionBody::Bnf(choices) = &production.body else { return class };

  if choices.is_choice() {
    class.add_field("NodeChoice", "f0", None, None);
  } else {
    for (i, unit) in choices.choices.iter().flat_map(|seq| &seq.units).enumerate() {
      let initializer = initializer(config, unit);
      class.add_field(
        unit_type(config, unit),
        format!("f{i}"),
        initializer.as_deref(),
        unit.code.as_deref(),
      );
    }
  }

  trace!("lowered {} with {} fields", class.class_name, class.fields().len());
  class
}

/// The node type holding `unit` at runtime.
pub fn unit_type(config: &Config, unit: &ExpansionUnit) -> String {
  match &unit.kind {
    UnitKind::Terminal { .. } => config.node_token.clone(),
    UnitKind::NonTerminal { name } => fixed_name(config, name),
    UnitKind::Group(c) if c.is_choice() => "NodeChoice".into(),
    UnitKind::Group(_) => "NodeSequence".into(),
    UnitKind::Optional(_) => "NodeOptional".into(),
    UnitKind::ZeroOrMore(_) => "NodeListOptional".into(),
    UnitKind::OneOrMore(_) => "NodeList".into(),
  }
}

// Tokens with a fixed image can be built by the node itself, so they are left
// out of the initializing constructor.
fn initializer(config: &Config, unit: &ExpansionUnit) -> Option<String> {
  match &unit.kind {
    UnitKind::Terminal { image } if !image.is_empty() => {
      Some(format!("new {}(\"{}\")", config.node_token, escape_java(image)))
    }
    _ => None,
  }
}

pub fn escape_java(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      c => out.push(c),
    }
  }
  out
}
