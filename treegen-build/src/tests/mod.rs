use treegen_grammar::{ungram, Grammar};

use crate::{comments::CommentAssociator, dispatch::CommonCode, lower::lower, Config};

mod comments;
mod generate;

pub fn grammar(src: &str) -> Grammar {
  match ungram::parse(src) {
    Ok(grammar) => grammar,
    Err(e) => panic!("invalid test grammar: {e}"),
  }
}

/// The text of the node type generated for production `name`.
pub fn class_text(config: &Config, grammar: &Grammar, name: &str) -> String {
  let production = grammar.production(name).unwrap();
  let class = lower(production, config);
  let common = CommonCode::new(config).unwrap();
  let assoc = CommentAssociator::new(grammar, config);
  class.gen_class_string(&common, &assoc).unwrap()
}

/// Same as `class_text`, without the shared dispatch methods at the end.
pub fn class_head(config: &Config, grammar: &Grammar, name: &str) -> String {
  let text = class_text(config, grammar, name);
  let common = CommonCode::new(config).unwrap();
  match text.strip_suffix(common.as_str()) {
    Some(head) => head.to_string(),
    None => panic!("class does not end with the common code:\n{text}"),
  }
}
