use std::collections::HashSet;

use crate::{config::DEPTH_FIRST_VOID_VISITOR, Config, GenError};

/// The name of the node type generated for production `name`.
pub fn fixed_name(config: &Config, name: &str) -> String {
  format!("{}{}{}", config.name_prefix, name, config.name_suffix)
}

const JAVA_KEYWORDS: &[&str] = &[
  "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
  "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
  "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
  "native", "new", "null", "package", "private", "protected", "public", "return", "short",
  "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient",
  "true", "try", "void", "volatile", "while",
];

pub fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  let Some(first) = chars.next() else { return false };

  (first.is_alphabetic() || first == '_' || first == '$')
    && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
    && !JAVA_KEYWORDS.contains(&name)
}

/// The set of node type names claimed so far in a pass.
pub struct NameTable {
  reserved: HashSet<String>,
  names:    HashSet<String>,
}

impl NameTable {
  pub fn new(config: &Config) -> Self {
    let mut reserved: HashSet<String> =
      config.base_classes().iter().map(|s| s.to_string()).collect();
    reserved.extend([
      config.node_interface.clone(),
      config.ret_argu_visitor.clone(),
      config.ret_visitor.clone(),
      config.void_argu_visitor.clone(),
      config.void_visitor.clone(),
      DEPTH_FIRST_VOID_VISITOR.to_string(),
    ]);

    NameTable { reserved, names: HashSet::new() }
  }

  pub fn register(&mut self, name: &str) -> Result<(), GenError> {
    if !is_identifier(name) {
      return Err(GenError::InvalidName { name: name.into() });
    }
    if self.reserved.contains(name) {
      return Err(GenError::ReservedName { name: name.into() });
    }
    if !self.names.insert(name.into()) {
      return Err(GenError::NameCollision { name: name.into() });
    }
    Ok(())
  }

  pub fn contains(&self, name: &str) -> bool { self.names.contains(name) }
}
