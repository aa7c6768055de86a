use std::{fmt::Write, sync::OnceLock};

use itertools::Itertools;
use treegen_grammar::{Production, ProductionBody};

use crate::{
  comments::{CommentAssociator, CommentBlock, CommentsData},
  dispatch::CommonCode,
  naming::fixed_name,
  Config, Spacing,
};

/// One child slot of a node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
  pub ty:          String,
  pub name:        String,
  /// The expression the field is set to when it isn't passed to the
  /// constructor.
  pub initializer: Option<String>,
  pub inline_code: Option<String>,
}

impl FieldSpec {
  pub fn is_initialized(&self) -> bool { self.initializer.is_some() }
}

/// Everything needed to write the node type of one production.
#[derive(Debug)]
pub struct ClassInfo<'g> {
  pub production: &'g Production,
  pub config:     &'g Config,
  pub class_name: String,
  /// `None` for a code-only production.
  pub fields:     Option<Vec<FieldSpec>>,

  pub needs_initializing_constructor: bool,

  comments:         OnceLock<Option<CommentsData>>,
  visit_field_cmts: OnceLock<String>,
}

impl<'g> ClassInfo<'g> {
  pub fn new(production: &'g Production, config: &'g Config) -> Self {
    let fields = match &production.body {
      ProductionBody::Bnf(choices) => {
        let capacity = match choices.choices.as_slice() {
          [seq] => seq.units.len(),
          _ => 1,
        };
        Some(Vec::with_capacity(capacity))
      }
      ProductionBody::Code { .. } => None,
    };

    ClassInfo {
      production,
      config,
      class_name: fixed_name(config, &production.name),
      fields,
      needs_initializing_constructor: false,
      comments: OnceLock::new(),
      visit_field_cmts: OnceLock::new(),
    }
  }

  /// Appends a field. Empty initializers and inline code count as absent.
  pub fn add_field(
    &mut self,
    ty: impl Into<String>,
    name: impl Into<String>,
    initializer: Option<&str>,
    inline_code: Option<&str>,
  ) {
    let initializer = initializer.filter(|s| !s.is_empty()).map(String::from);
    let inline_code = inline_code.filter(|s| !s.is_empty()).map(String::from);
    if initializer.is_some() {
      self.needs_initializing_constructor = true;
    }

    self.fields.get_or_insert_with(Vec::new).push(FieldSpec {
      ty: ty.into(),
      name: name.into(),
      initializer,
      inline_code,
    });
  }

  pub fn fields(&self) -> &[FieldSpec] { self.fields.as_deref().unwrap_or_default() }

  /// The comment blocks of this production. The association walk runs on
  /// the first call only.
  pub fn gen_comments_data(&self, assoc: &CommentAssociator) -> Option<&CommentsData> {
    self.comments.get_or_init(|| assoc.associate(self.production)).as_ref()
  }

  /// Writes every field comment as a documentation line. Visitor methods
  /// (level 1) all share the same text, so it is only rendered once.
  pub fn fmt_fields_javadoc_cmts(
    &self,
    buf: &mut String,
    spacing: &Spacing,
    assoc: &CommentAssociator,
  ) {
    if spacing.level() == 1 {
      let cached = self.visit_field_cmts.get_or_init(|| self.render_javadoc(spacing, assoc));
      buf.push_str(cached);
    } else {
      buf.push_str(&self.render_javadoc(spacing, assoc));
    }
  }

  /// The cached level 1 rendering, if it has been requested yet.
  pub fn visit_field_cmts(&self) -> Option<&str> { self.visit_field_cmts.get().map(String::as_str) }

  fn render_javadoc(&self, spacing: &Spacing, assoc: &CommentAssociator) -> String {
    let mut out = String::new();
    let Some(data) = self.gen_comments_data(assoc) else { return out };
    for line in data.fields.iter().flatten() {
      out.push_str(spacing.spc());
      out.push_str(" * ");
      out.push_str(&line.bare);
      if let Some(debug) = &line.debug {
        out.push_str(debug);
      }
      out.push('\n');
    }
    out
  }

  /// Writes the comments of field `i` as code comments.
  pub fn fmt1_javacode_field_cmt(
    &self,
    buf: &mut String,
    spacing: &Spacing,
    i: usize,
    extra: Option<&str>,
    assoc: &CommentAssociator,
  ) {
    let Some(block) = self.gen_comments_data(assoc).and_then(|data| data.field(i)) else { return };
    self.write_code_cmt(buf, spacing, block, extra);
  }

  /// Writes the comments of sub-part `i` as code comments. An unknown index
  /// leaves a note in the output instead of failing.
  pub fn fmt1_javacode_sub_cmt(
    &self,
    buf: &mut String,
    spacing: &Spacing,
    i: usize,
    extra: Option<&str>,
    assoc: &CommentAssociator,
  ) {
    let Some(subs) = self.gen_comments_data(assoc).and_then(|data| data.subs.as_ref()) else {
      return;
    };

    match subs.get(i) {
      Some(sub) => self.write_code_cmt(buf, spacing, &sub.block, extra),
      None => {
        warn!("{}: invalid sub comment index ({i}), size = {}", self.class_name, subs.len());
        buf.push_str(&format!(
          "{}// invalid sub comment index ({i}), size = {}",
          spacing.spc(),
          subs.len()
        ));
        if let Some(extra) = extra {
          buf.push_str(" ; ");
          buf.push_str(extra);
        }
        buf.push('\n');
      }
    }
  }

  fn write_code_cmt(
    &self,
    buf: &mut String,
    spacing: &Spacing,
    block: &CommentBlock,
    extra: Option<&str>,
  ) {
    for line in block {
      buf.push_str(spacing.spc());
      buf.push_str("// ");
      buf.push_str(&line.bare);
      if let (true, Some(extra)) = (self.config.debug_comments, extra) {
        buf.push_str(" ; ");
        buf.push_str(extra);
      }
      buf.push('\n');
    }
  }

  /// Writes the whole node type: declaration, fields, constructors, and the
  /// shared dispatch methods.
  pub fn gen_class_string(
    &self,
    common: &CommonCode,
    assoc: &CommentAssociator,
  ) -> Result<String, std::fmt::Error> {
    let config = self.config;
    let mut buf = String::new();
    let mut spacing = Spacing::new(config.indent_amount);

    write!(buf, "public class {}", self.class_name)?;
    if let Some(superclass) = &config.nodes_superclass {
      write!(buf, " extends {superclass}")?;
    }
    writeln!(buf, " implements {} {{", config.node_interface)?;
    writeln!(buf)?;

    spacing.update(1);
    let spc = spacing.spc().to_string();

    if let Some(fields) = &self.fields {
      let data = if config.javadoc_comments { self.gen_comments_data(assoc) } else { None };
      for (i, field) in fields.iter().enumerate() {
        if let Some(block) = data.and_then(|d| d.field(i)).filter(|b| !b.is_empty()) {
          writeln!(buf, "{spc}/**")?;
          for line in block {
            writeln!(buf, "{spc} * {}{}", line.bare, line.debug.as_deref().unwrap_or(""))?;
          }
          writeln!(buf, "{spc} */")?;
        }
        writeln!(buf, "{spc}public {} {};", field.ty, field.name)?;
        writeln!(buf)?;
      }
    }

    if config.parent_pointer {
      if config.javadoc_comments {
        writeln!(buf, "{spc}/** The parent node */")?;
      }
      writeln!(buf, "{spc}private {} parent;", config.node_interface)?;
      writeln!(buf)?;
    }

    if config.javadoc_comments {
      writeln!(buf, "{spc}/** The serial version UID */")?;
    }
    writeln!(buf, "{spc}private static final long serialVersionUID = {}L;", config.serial_uid)?;
    writeln!(buf)?;

    match &self.fields {
      Some(fields) => {
        self.write_constructor(&mut buf, &mut spacing, fields, false)?;
        if self.needs_initializing_constructor {
          self.write_constructor(&mut buf, &mut spacing, fields, true)?;
        }
      }
      None => {
        if config.javadoc_comments {
          writeln!(buf, "{spc}/**")?;
          writeln!(buf, "{spc} * Constructs the node (which has no child).")?;
          writeln!(buf, "{spc} */")?;
        }
        writeln!(buf, "{spc}public {}() {{", self.class_name)?;
        writeln!(buf, "{spc}}}")?;
        writeln!(buf)?;
      }
    }

    buf.push_str(common.as_str());
    Ok(buf)
  }

  // With `initializing`, fields with an initializer are left out of the
  // parameters and assigned their initializer instead.
  fn write_constructor(
    &self,
    buf: &mut String,
    spacing: &mut Spacing,
    fields: &[FieldSpec],
    initializing: bool,
  ) -> std::fmt::Result {
    let config = self.config;
    let spc = spacing.spc().to_string();

    let params = fields
      .iter()
      .filter(|f| !(initializing && f.is_initialized()))
      .enumerate()
      .map(|(n, f)| format!("final {} n{n}", f.ty))
      .collect::<Vec<_>>();

    if config.javadoc_comments {
      writeln!(buf, "{spc}/**")?;
      match (initializing, fields.len()) {
        (true, n) => writeln!(
          buf,
          "{spc} * Constructs the node with only its non {} child node{}",
          config.node_token,
          if n > 1 { "(s)." } else { "." }
        )?,
        (false, 1) => writeln!(buf, "{spc} * Constructs the node with its child node.")?,
        (false, _) => writeln!(buf, "{spc} * Constructs the node with all its children nodes.")?,
      }
      writeln!(buf, "{spc} *")?;
      for n in 0..params.len() {
        let what = match (n, initializing, fields.len()) {
          (0, false, 1) => "the child node",
          (0, ..) => "first child node",
          _ => "next child node",
        };
        writeln!(buf, "{spc} * @param n{n} - {what}")?;
      }
      writeln!(buf, "{spc} */")?;
    }

    writeln!(buf, "{spc}public {}({}) {{", self.class_name, params.iter().join(", "))?;

    spacing.update(1);
    let body = spacing.spc().to_string();
    spacing.update(1);
    let guarded = spacing.spc().to_string();
    spacing.update(-2);

    let mut n = 0;
    for field in fields {
      match (&field.initializer, initializing) {
        (Some(init), true) => writeln!(buf, "{body}{} = {init};", field.name)?,
        _ => {
          writeln!(buf, "{body}{} = n{n};", field.name)?;
          n += 1;
        }
      }
      if config.parent_pointer {
        writeln!(buf, "{body}if ({} != null)", field.name)?;
        writeln!(buf, "{guarded}{}.setParent(this);", field.name)?;
      }
    }

    writeln!(buf, "{spc}}}")?;
    writeln!(buf)
  }
}
