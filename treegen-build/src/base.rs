//! The support node classes that generated node types are built from: a
//! choice, the three kinds of node list, an optional node and the token.

use std::fmt::{self, Write};

use crate::{dispatch::CommonCode, Config, Spacing};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseClass {
  Choice,
  List,
  ListOptional,
  Optional,
  Sequence,
  Token,
}

impl BaseClass {
  /// Same order as [`Config::base_classes`].
  pub const ALL: [BaseClass; 6] = [
    BaseClass::Choice,
    BaseClass::List,
    BaseClass::ListOptional,
    BaseClass::Optional,
    BaseClass::Sequence,
    BaseClass::Token,
  ];

  pub fn name(self, config: &Config) -> &str {
    match self {
      BaseClass::Choice => "NodeChoice",
      BaseClass::List => "NodeList",
      BaseClass::ListOptional => "NodeListOptional",
      BaseClass::Optional => "NodeOptional",
      BaseClass::Sequence => "NodeSequence",
      BaseClass::Token => &config.node_token,
    }
  }

  fn is_list(self) -> bool {
    matches!(self, BaseClass::List | BaseClass::ListOptional | BaseClass::Sequence)
  }

  // (type, name, doc)
  fn fields(self, config: &Config) -> Vec<(String, &'static str, &'static str)> {
    let node = &config.node_interface;
    match self {
      BaseClass::Choice => vec![
        (node.clone(), "choice", "The real node"),
        ("int".into(), "which", "The index of the choice that was taken"),
        ("int".into(), "total", "The total number of choices"),
      ],
      BaseClass::List | BaseClass::ListOptional | BaseClass::Sequence => {
        vec![(format!("ArrayList<{node}>"), "nodes", "The list of nodes")]
      }
      BaseClass::Optional => vec![(node.clone(), "node", "The node, if present")],
      BaseClass::Token => vec![("String".into(), "tokenImage", "The token image")],
    }
  }

  /// Writes the whole class, ending with the shared dispatch methods.
  pub fn gen_class_string(
    self,
    config: &Config,
    common: &CommonCode,
  ) -> Result<String, fmt::Error> {
    let mut buf = String::new();
    let name = self.name(config);
    let node = &config.node_interface;
    let s1 = Spacing::at(config.indent_amount, 1).to_string();
    let s2 = Spacing::at(config.indent_amount, 2).to_string();
    let s3 = Spacing::at(config.indent_amount, 3).to_string();

    if self.is_list() {
      writeln!(buf, "import java.util.ArrayList;")?;
      writeln!(buf)?;
    }
    write!(buf, "public class {name}")?;
    if let Some(superclass) = &config.nodes_superclass {
      write!(buf, " extends {superclass}")?;
    }
    writeln!(buf, " implements {node} {{")?;
    writeln!(buf)?;

    for (ty, field, doc) in self.fields(config) {
      if config.javadoc_comments {
        writeln!(buf, "{s1}/** {doc} */")?;
      }
      writeln!(buf, "{s1}public {ty} {field};")?;
      writeln!(buf)?;
    }

    if config.parent_pointer {
      if config.javadoc_comments {
        writeln!(buf, "{s1}/** The parent node */")?;
      }
      writeln!(buf, "{s1}private {node} parent;")?;
      writeln!(buf)?;
    }
    if config.javadoc_comments {
      writeln!(buf, "{s1}/** The serial version UID */")?;
    }
    writeln!(buf, "{s1}private static final long serialVersionUID = {}L;", config.serial_uid)?;
    writeln!(buf)?;

    match self {
      BaseClass::Choice => {
        writeln!(
          buf,
          "{s1}public {name}(final {node} node, final int whichChoice, final int totalChoices) {{"
        )?;
        writeln!(buf, "{s2}choice = node;")?;
        register(&mut buf, config, "choice", &s2, &s3)?;
        writeln!(buf, "{s2}which = whichChoice;")?;
        writeln!(buf, "{s2}total = totalChoices;")?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
      }
      BaseClass::List | BaseClass::ListOptional | BaseClass::Sequence => {
        writeln!(buf, "{s1}public {name}() {{")?;
        writeln!(buf, "{s2}nodes = new ArrayList<>();")?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
        writeln!(buf, "{s1}public {name}(final {node} firstNode) {{")?;
        writeln!(buf, "{s2}nodes = new ArrayList<>();")?;
        writeln!(buf, "{s2}addNode(firstNode);")?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
        writeln!(buf, "{s1}public void addNode(final {node} n) {{")?;
        writeln!(buf, "{s2}nodes.add(n);")?;
        register(&mut buf, config, "n", &s2, &s3)?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
        writeln!(buf, "{s1}public {node} elementAt(final int i) {{")?;
        writeln!(buf, "{s2}return nodes.get(i);")?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
        writeln!(buf, "{s1}public int size() {{")?;
        writeln!(buf, "{s2}return nodes.size();")?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
        if self == BaseClass::ListOptional {
          writeln!(buf, "{s1}public boolean present() {{")?;
          writeln!(buf, "{s2}return nodes.size() != 0;")?;
          writeln!(buf, "{s1}}}")?;
          writeln!(buf)?;
        }
      }
      BaseClass::Optional => {
        writeln!(buf, "{s1}public {name}() {{")?;
        writeln!(buf, "{s2}node = null;")?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
        writeln!(buf, "{s1}public {name}(final {node} n) {{")?;
        writeln!(buf, "{s2}addNode(n);")?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
        writeln!(buf, "{s1}public void addNode(final {node} n) {{")?;
        writeln!(buf, "{s2}if (node != null)")?;
        writeln!(buf, "{s3}throw new Error(\"Attempt to set optional node twice\");")?;
        writeln!(buf, "{s2}node = n;")?;
        register(&mut buf, config, "n", &s2, &s3)?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
        writeln!(buf, "{s1}public boolean present() {{")?;
        writeln!(buf, "{s2}return node != null;")?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
      }
      BaseClass::Token => {
        writeln!(buf, "{s1}public {name}(final String s) {{")?;
        writeln!(buf, "{s2}tokenImage = s;")?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
        writeln!(buf, "{s1}@Override")?;
        writeln!(buf, "{s1}public String toString() {{")?;
        writeln!(buf, "{s2}return tokenImage;")?;
        writeln!(buf, "{s1}}}")?;
        writeln!(buf)?;
      }
    }

    buf.push_str(common.as_str());
    Ok(buf)
  }
}

fn register(buf: &mut String, config: &Config, var: &str, s2: &str, s3: &str) -> fmt::Result {
  if config.parent_pointer {
    writeln!(buf, "{s2}if ({var} != null)")?;
    writeln!(buf, "{s3}{var}.setParent(this);")?;
  }
  Ok(())
}
