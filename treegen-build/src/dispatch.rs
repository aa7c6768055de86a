use std::fmt::{self, Write};

use crate::{Config, Spacing};

/// The end of every node type: the four `accept` methods, the parent
/// accessors, and the closing brace.
///
/// The text only depends on the [`Config`], so it is built once per pass and
/// appended to each node type as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonCode {
  text: String,
}

impl CommonCode {
  pub fn new(config: &Config) -> Result<Self, fmt::Error> {
    let mut text = String::new();
    write_common(&mut text, config)?;
    Ok(CommonCode { text })
  }

  pub fn as_str(&self) -> &str { &self.text }
}

fn write_common(buf: &mut String, config: &Config) -> fmt::Result {
  let spacing = Spacing::at(config.indent_amount, 1);
  let inner = Spacing::at(config.indent_amount, 2);
  let (spc, body) = (spacing.spc(), inner.spc());
  let (r, a) = (&config.ret_type, &config.argu_type);
  let doc = config.javadoc_comments;

  let [ret_argu, ret, void_argu, void] = accept_signatures(config);
  let accepts = [
    (ret_argu, "return vis.visit(this, argu);", &config.ret_argu_visitor, true, true),
    (ret, "return vis.visit(this);", &config.ret_visitor, true, false),
    (void_argu, "vis.visit(this, argu);", &config.void_argu_visitor, false, true),
    (void, "vis.visit(this);", &config.void_visitor, false, false),
  ];

  for (signature, forward, visitor, returns, takes_argu) in accepts {
    if doc {
      writeln!(buf, "{spc}/**")?;
      writeln!(buf, "{spc} * Accepts the {{@link {visitor}}} visitor.")?;
      writeln!(buf, "{spc} *")?;
      if returns {
        writeln!(buf, "{spc} * @param <{r}> - the user return type")?;
      }
      if takes_argu {
        writeln!(buf, "{spc} * @param <{a}> - the user argument type")?;
      }
      writeln!(buf, "{spc} * @param vis - the visitor")?;
      if takes_argu {
        let what =
          if config.variadic_args { "the user arguments" } else { "a user chosen argument" };
        writeln!(buf, "{spc} * @param argu - {what}")?;
      }
      if returns {
        writeln!(buf, "{spc} * @return a user chosen return information")?;
      }
      writeln!(buf, "{spc} */")?;
    }
    writeln!(buf, "{spc}@Override")?;
    writeln!(buf, "{spc}public {signature} {{")?;
    writeln!(buf, "{body}{forward}")?;
    writeln!(buf, "{spc}}}")?;
    writeln!(buf)?;
  }

  if config.parent_pointer {
    let node = &config.node_interface;

    if doc {
      writeln!(buf, "{spc}/**")?;
      writeln!(buf, "{spc} * Sets the parent node.")?;
      writeln!(buf, "{spc} *")?;
      writeln!(buf, "{spc} * @param n - the parent node")?;
      writeln!(buf, "{spc} */")?;
    }
    writeln!(buf, "{spc}@Override")?;
    writeln!(buf, "{spc}public void setParent(final {node} n) {{")?;
    writeln!(buf, "{body}parent = n;")?;
    writeln!(buf, "{spc}}}")?;
    writeln!(buf)?;

    if doc {
      writeln!(buf, "{spc}/**")?;
      writeln!(buf, "{spc} * Gets the parent node.")?;
      writeln!(buf, "{spc} *")?;
      writeln!(buf, "{spc} * @return the parent node")?;
      writeln!(buf, "{spc} */")?;
    }
    writeln!(buf, "{spc}@Override")?;
    writeln!(buf, "{spc}public {node} getParent() {{")?;
    writeln!(buf, "{body}return parent;")?;
    writeln!(buf, "{spc}}}")?;
    writeln!(buf)?;
  }

  writeln!(buf, "}}")
}

/// The `accept` signatures, as declared by the node interface.
pub fn accept_signatures(config: &Config) -> [String; 4] {
  let (r, a) = (&config.ret_type, &config.argu_type);
  let argu = config.argu_param();
  [
    format!("<{r}, {a}> {r} accept(final {}<{r}, {a}> vis, {argu})", config.ret_argu_visitor),
    format!("<{r}> {r} accept(final {}<{r}> vis)", config.ret_visitor),
    format!("<{a}> void accept(final {}<{a}> vis, {argu})", config.void_argu_visitor),
    format!("void accept(final {} vis)", config.void_visitor),
  ]
}
