//! Writes the node interface, the four visitor interfaces and the default
//! depth-first visitor.

use std::fmt::{self, Write};

use crate::{
  comments::CommentAssociator,
  config::DEPTH_FIRST_VOID_VISITOR,
  dispatch::accept_signatures,
  ClassInfo, Config, Spacing,
};

/// The four ways a visitor can be invoked: with or without a return value,
/// and with or without a user argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
  RetArgu,
  Ret,
  VoidArgu,
  Void,
}

impl Flavor {
  pub const ALL: [Flavor; 4] = [Flavor::RetArgu, Flavor::Ret, Flavor::VoidArgu, Flavor::Void];

  pub fn name(self, config: &Config) -> &str {
    match self {
      Flavor::RetArgu => &config.ret_argu_visitor,
      Flavor::Ret => &config.ret_visitor,
      Flavor::VoidArgu => &config.void_argu_visitor,
      Flavor::Void => &config.void_visitor,
    }
  }

  fn returns(self) -> bool { matches!(self, Flavor::RetArgu | Flavor::Ret) }
  fn takes_argu(self) -> bool { matches!(self, Flavor::RetArgu | Flavor::VoidArgu) }

  /// The interface name with its type parameters.
  fn generic_name(self, config: &Config) -> String {
    let (r, a) = (&config.ret_type, &config.argu_type);
    match self {
      Flavor::RetArgu => format!("{}<{r}, {a}>", self.name(config)),
      Flavor::Ret => format!("{}<{r}>", self.name(config)),
      Flavor::VoidArgu => format!("{}<{a}>", self.name(config)),
      Flavor::Void => self.name(config).to_string(),
    }
  }

  fn visit_signature(self, config: &Config, node: &str) -> String {
    let ret = if self.returns() { config.ret_type.as_str() } else { "void" };
    if self.takes_argu() {
      format!("{ret} visit(final {node} n, {})", config.argu_param())
    } else {
      format!("{ret} visit(final {node} n)")
    }
  }
}

pub fn node_interface(config: &Config) -> Result<String, fmt::Error> {
  let mut buf = String::new();
  let spc = Spacing::at(config.indent_amount, 1);
  let node = &config.node_interface;

  writeln!(buf, "public interface {node} {{")?;
  writeln!(buf)?;
  for signature in accept_signatures(config) {
    writeln!(buf, "{spc}public {signature};")?;
    writeln!(buf)?;
  }
  if config.parent_pointer {
    writeln!(buf, "{spc}public void setParent(final {node} n);")?;
    writeln!(buf)?;
    writeln!(buf, "{spc}public {node} getParent();")?;
    writeln!(buf)?;
  }
  writeln!(buf, "}}")?;

  Ok(buf)
}

pub fn visitor_interface(
  config: &Config,
  flavor: Flavor,
  classes: &[ClassInfo],
  assoc: &CommentAssociator,
) -> Result<String, fmt::Error> {
  let mut buf = String::new();
  let spacing = Spacing::at(config.indent_amount, 1);
  let spc = spacing.spc();

  writeln!(buf, "public interface {} {{", flavor.generic_name(config))?;
  writeln!(buf)?;

  for base in config.base_classes() {
    write_visit_doc(&mut buf, config, flavor, &spacing, base, None, assoc)?;
    writeln!(buf, "{spc}public {};", flavor.visit_signature(config, base))?;
    writeln!(buf)?;
  }
  for class in classes {
    write_visit_doc(&mut buf, config, flavor, &spacing, &class.class_name, Some(class), assoc)?;
    writeln!(buf, "{spc}public {};", flavor.visit_signature(config, &class.class_name))?;
    writeln!(buf)?;
  }

  writeln!(buf, "}}")?;
  Ok(buf)
}

fn write_visit_doc(
  buf: &mut String,
  config: &Config,
  flavor: Flavor,
  spacing: &Spacing,
  node: &str,
  class: Option<&ClassInfo>,
  assoc: &CommentAssociator,
) -> fmt::Result {
  if !config.javadoc_comments {
    return Ok(());
  }
  let spc = spacing.spc();

  writeln!(buf, "{spc}/**")?;
  writeln!(buf, "{spc} * Visits a {{@link {node}}} node.")?;
  if let Some(class) = class {
    class.fmt_fields_javadoc_cmts(buf, spacing, assoc);
  }
  writeln!(buf, "{spc} *")?;
  writeln!(buf, "{spc} * @param n - the node to visit")?;
  if flavor.takes_argu() {
    let what = if config.variadic_args { "the user arguments" } else { "the user argument" };
    writeln!(buf, "{spc} * @param argu - {what}")?;
  }
  if flavor.returns() {
    writeln!(buf, "{spc} * @return the user return information")?;
  }
  writeln!(buf, "{spc} */")
}

/// A visitor that walks every child of every node, and does nothing else.
pub fn depth_first_void_visitor(
  config: &Config,
  classes: &[ClassInfo],
  assoc: &CommentAssociator,
) -> Result<String, fmt::Error> {
  let mut buf = String::new();
  let mut spacing = Spacing::at(config.indent_amount, 1);
  let spc = spacing.spc().to_string();
  let flavor = Flavor::Void;
  let node = &config.node_interface;

  writeln!(
    buf,
    "public class {} implements {} {{",
    DEPTH_FIRST_VOID_VISITOR,
    flavor.name(config)
  )?;
  writeln!(buf)?;

  for base in config.base_classes() {
    write_visit_doc(&mut buf, config, flavor, &spacing, base, None, assoc)?;
    writeln!(buf, "{spc}@Override")?;
    writeln!(buf, "{spc}public {} {{", flavor.visit_signature(config, base))?;

    let body = Spacing::at(config.indent_amount, 2);
    let inner = Spacing::at(config.indent_amount, 3);
    let deepest = Spacing::at(config.indent_amount, 4);
    let (b, i, d) = (body.spc(), inner.spc(), deepest.spc());
    match base {
      "NodeChoice" => writeln!(buf, "{b}n.choice.accept(this);")?,
      "NodeList" | "NodeSequence" => {
        writeln!(buf, "{b}for (final {node} e : n.nodes) {{")?;
        writeln!(buf, "{i}e.accept(this);")?;
        writeln!(buf, "{b}}}")?;
      }
      "NodeListOptional" => {
        writeln!(buf, "{b}if (n.present()) {{")?;
        writeln!(buf, "{i}for (final {node} e : n.nodes) {{")?;
        writeln!(buf, "{d}e.accept(this);")?;
        writeln!(buf, "{i}}}")?;
        writeln!(buf, "{b}}}")?;
      }
      "NodeOptional" => {
        writeln!(buf, "{b}if (n.present()) {{")?;
        writeln!(buf, "{i}n.node.accept(this);")?;
        writeln!(buf, "{b}}}")?;
      }
      // Tokens are leaves.
      _ => {}
    }

    writeln!(buf, "{spc}}}")?;
    writeln!(buf)?;
  }

  for class in classes {
    let doc_class = if config.inline_accept_methods { None } else { Some(class) };
    write_visit_doc(&mut buf, config, flavor, &spacing, &class.class_name, doc_class, assoc)?;
    writeln!(buf, "{spc}@Override")?;
    writeln!(buf, "{spc}public {} {{", flavor.visit_signature(config, &class.class_name))?;

    spacing.nested(|body| write_visit_body(&mut buf, config, body, class, assoc))?;

    writeln!(buf, "{spc}}}")?;
    writeln!(buf)?;
  }

  writeln!(buf, "}}")?;
  Ok(buf)
}

fn write_visit_body(
  buf: &mut String,
  config: &Config,
  spacing: &Spacing,
  class: &ClassInfo,
  assoc: &CommentAssociator,
) -> fmt::Result {
  let spc = spacing.spc();
  let data = if config.inline_accept_methods { class.gen_comments_data(assoc) } else { None };

  for (i, field) in class.fields().iter().enumerate() {
    if let Some(data) = data {
      class.fmt1_javacode_field_cmt(buf, spacing, i, Some(field.name.as_str()), assoc);
      for (k, _) in data.subs_of(i) {
        class.fmt1_javacode_sub_cmt(buf, spacing, k, Some(format!("s{k}").as_str()), assoc);
      }
    }
    if let Some(code) = &field.inline_code {
      for line in code.lines().map(str::trim).filter(|l| !l.is_empty()) {
        writeln!(buf, "{spc}{line}")?;
      }
    }
    writeln!(buf, "{spc}n.{}.accept(this);", field.name)?;
  }

  Ok(())
}
