use treegen_grammar::{ExpansionChoices, Grammar, Production, Span, UnitKind};

use crate::{
  comments::CommentAssociator,
  dispatch::CommonCode,
  lower::lower,
  naming::NameTable,
  base::BaseClass,
  visitor::{self, Flavor},
  ClassInfo, Config, Diagnostics, GenError, Severity, DEPTH_FIRST_VOID_VISITOR,
};

/// One generated compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
  pub name: String,
  pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
  /// One unit per production, in grammar order.
  pub node_types:     Vec<Unit>,
  pub node_interface: Unit,
  /// The support classes node types are built from.
  pub base_classes:   Vec<Unit>,
  /// The four visitor interfaces, then the depth-first visitor.
  pub visitors:       Vec<Unit>,
}

pub struct Generator<'a> {
  config:  &'a Config,
  grammar: &'a Grammar,
}

impl<'a> Generator<'a> {
  pub fn new(config: &'a Config, grammar: &'a Grammar) -> Self { Generator { config, grammar } }

  /// Runs a full pass over the grammar. Fatal problems are reported to
  /// `diagnostics` before being returned.
  pub fn generate(&self, diagnostics: &dyn Diagnostics) -> Result<Output, GenError> {
    let config = self.config;
    let classes: Vec<ClassInfo> =
      self.grammar.productions.iter().map(|p| lower(p, config)).collect();

    let mut names = NameTable::new(config);
    for class in &classes {
      names
        .register(&class.class_name)
        .map_err(|e| report(diagnostics, e, Some(class.production.span)))?;
    }
    for production in &self.grammar.productions {
      self.check_references(production).map_err(|(e, span)| report(diagnostics, e, Some(span)))?;
    }

    let common = CommonCode::new(config)?;
    let assoc = CommentAssociator::new(self.grammar, config);

    let mut node_types = Vec::with_capacity(classes.len());
    for class in &classes {
      let text = class.gen_class_string(&common, &assoc)?;
      debug!("generated node type {}", class.class_name);
      node_types.push(Unit { name: class.class_name.clone(), text });
    }

    let node_interface =
      Unit { name: config.node_interface.clone(), text: visitor::node_interface(config)? };

    let mut base_classes = Vec::with_capacity(BaseClass::ALL.len());
    for base in BaseClass::ALL {
      let text = base.gen_class_string(config, &common)?;
      base_classes.push(Unit { name: base.name(config).to_string(), text });
    }

    let mut visitors = Vec::with_capacity(Flavor::ALL.len() + 1);
    for flavor in Flavor::ALL {
      let text = visitor::visitor_interface(config, flavor, &classes, &assoc)?;
      debug!("generated visitor {}", flavor.name(config));
      visitors.push(Unit { name: flavor.name(config).to_string(), text });
    }
    visitors.push(Unit {
      name: DEPTH_FIRST_VOID_VISITOR.to_string(),
      text: visitor::depth_first_void_visitor(config, &classes, &assoc)?,
    });

    info!(
      "generated {} node types and {} visitors ({} comment walks)",
      node_types.len(),
      visitors.len(),
      assoc.walks()
    );

    Ok(Output { node_types, node_interface, base_classes, visitors })
  }

  fn check_references(&self, production: &Production) -> Result<(), (GenError, Span)> {
    match production.choices() {
      Some(choices) => self.check_choices(production, choices),
      None => Ok(()),
    }
  }

  fn check_choices(
    &self,
    production: &Production,
    choices: &ExpansionChoices,
  ) -> Result<(), (GenError, Span)> {
    for unit in choices.choices.iter().flat_map(|seq| &seq.units) {
      match &unit.kind {
        UnitKind::NonTerminal { name } if self.grammar.production(name).is_none() => {
          let err = GenError::UndefinedProduction {
            name:            name.clone(),
            referenced_from: production.name.clone(),
          };
          return Err((err, unit.span));
        }
        _ => {}
      }
      if let Some(nested) = unit.nested() {
        self.check_choices(production, nested)?;
      }
    }
    Ok(())
  }
}

fn report(diagnostics: &dyn Diagnostics, err: GenError, span: Option<Span>) -> GenError {
  diagnostics.report(Severity::Error, &err.to_string(), span);
  err
}
