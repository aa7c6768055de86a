use expect_test::expect;
use pretty_assertions::assert_eq;
use treegen_grammar::{Expansion, ExpansionChoices, ExpansionUnit, Grammar, Production, Span};

use super::grammar;
use crate::{Config, DiagnosticsCollector, GenError, Generator, Output, Severity};

const EXPR: &str = "
Expr = Literal | Paren
Paren = '(' Expr ')'
Literal = 'int'
";

fn generate(config: &Config, g: &Grammar) -> Output {
  let diagnostics = DiagnosticsCollector::new();
  let output = match Generator::new(config, g).generate(&diagnostics) {
    Ok(output) => output,
    Err(e) => panic!("generation failed: {e}"),
  };
  assert!(diagnostics.diagnostics().is_empty());
  output
}

fn unit<'a>(output: &'a Output, name: &str) -> &'a str {
  let mut units = output.visitors.iter().chain(&output.node_types).chain(&output.base_classes);
  match units.find(|u| u.name == name) {
    Some(unit) => &unit.text,
    None => panic!("no unit named {name}"),
  }
}

/// The `visit` method for `node`, from `@Override` to its closing brace,
/// moved out of the class body.
fn visit_method(text: &str, node: &str) -> String {
  let at = text.find(&format!("public void visit(final {node} n)")).unwrap();
  let start = text[..at].rfind("  @Override").unwrap();
  let end = start + text[start..].find("\n  }\n").unwrap() + "\n  }\n".len();
  text[start..end].lines().map(|l| format!("{}\n", l.strip_prefix("  ").unwrap_or(l))).collect()
}

fn generate_err(config: &Config, g: &Grammar) -> (GenError, DiagnosticsCollector) {
  let diagnostics = DiagnosticsCollector::new();
  match Generator::new(config, g).generate(&diagnostics) {
    Ok(_) => panic!("generation should have failed"),
    Err(e) => (e, diagnostics),
  }
}

#[test]
fn units_in_grammar_order() {
  let output = generate(&Config::default(), &grammar(EXPR));

  let names = output.node_types.iter().map(|u| u.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, ["Expr", "Paren", "Literal"]);
  assert_eq!(output.node_interface.name, "INode");

  let names = output.base_classes.iter().map(|u| u.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, Config::default().base_classes());

  let names = output.visitors.iter().map(|u| u.name.as_str()).collect::<Vec<_>>();
  assert_eq!(
    names,
    ["IRetArguVisitor", "IRetVisitor", "IVoidArguVisitor", "IVoidVisitor", "DepthFirstVoidVisitor"]
  );
}

#[test]
fn four_accept_methods_each() {
  let config = Config { parent_pointer: true, ..Default::default() };
  let output = generate(&config, &grammar(EXPR));

  for unit in &output.node_types {
    assert_eq!(unit.text.matches(" accept(").count(), 4, "{}", unit.name);
    assert_eq!(unit.text.matches("@Override").count(), 6, "{}", unit.name);
    assert!(unit.text.ends_with("\n}\n"));
  }
}

#[test]
fn node_interface() {
  let output = generate(&Config::default(), &grammar(EXPR));

  expect![[r#"
    public interface INode {

      public <R, A> R accept(final IRetArguVisitor<R, A> vis, final A argu);

      public <R> R accept(final IRetVisitor<R> vis);

      public <A> void accept(final IVoidArguVisitor<A> vis, final A argu);

      public void accept(final IVoidVisitor vis);

    }
  "#]]
  .assert_eq(&output.node_interface.text);

  let config = Config { parent_pointer: true, ..Default::default() };
  let output = generate(&config, &grammar(EXPR));
  assert!(output.node_interface.text.ends_with(
    "  public void setParent(final INode n);\n\n  public INode getParent();\n\n}\n"
  ));
}

#[test]
fn void_visitor() {
  let output = generate(&Config::default(), &grammar(EXPR));

  expect![[r#"
    public interface IVoidVisitor {

      public void visit(final NodeChoice n);

      public void visit(final NodeList n);

      public void visit(final NodeListOptional n);

      public void visit(final NodeOptional n);

      public void visit(final NodeSequence n);

      public void visit(final NodeToken n);

      public void visit(final Expr n);

      public void visit(final Paren n);

      public void visit(final Literal n);

    }
  "#]]
  .assert_eq(unit(&output, "IVoidVisitor"));
}

#[test]
fn argument_visitors() {
  let config = Config { variadic_args: true, ..Default::default() };
  let output = generate(&config, &grammar(EXPR));

  let ret_argu = unit(&output, "IRetArguVisitor");
  assert!(ret_argu.starts_with("public interface IRetArguVisitor<R, A> {\n"));
  assert!(ret_argu.contains("  public R visit(final Paren n, final A... argu);\n"));
  assert_eq!(ret_argu.matches("public R visit(").count(), 9);

  let ret = unit(&output, "IRetVisitor");
  assert!(ret.starts_with("public interface IRetVisitor<R> {\n"));
  assert!(ret.contains("  public R visit(final NodeToken n);\n"));

  let void_argu = unit(&output, "IVoidArguVisitor");
  assert!(void_argu.starts_with("public interface IVoidArguVisitor<A> {\n"));
  assert!(void_argu.contains("  public void visit(final Literal n, final A... argu);\n"));
}

#[test]
fn depth_first_visitor() {
  let output = generate(&Config::default(), &grammar(EXPR));

  expect![[r#"
    public class DepthFirstVoidVisitor implements IVoidVisitor {

      @Override
      public void visit(final NodeChoice n) {
        n.choice.accept(this);
      }

      @Override
      public void visit(final NodeList n) {
        for (final INode e : n.nodes) {
          e.accept(this);
        }
      }

      @Override
      public void visit(final NodeListOptional n) {
        if (n.present()) {
          for (final INode e : n.nodes) {
            e.accept(this);
          }
        }
      }

      @Override
      public void visit(final NodeOptional n) {
        if (n.present()) {
          n.node.accept(this);
        }
      }

      @Override
      public void visit(final NodeSequence n) {
        for (final INode e : n.nodes) {
          e.accept(this);
        }
      }

      @Override
      public void visit(final NodeToken n) {
      }

      @Override
      public void visit(final Expr n) {
        n.f0.accept(this);
      }

      @Override
      public void visit(final Paren n) {
        n.f0.accept(this);
        n.f1.accept(this);
        n.f2.accept(this);
      }

      @Override
      public void visit(final Literal n) {
        n.f0.accept(this);
      }

    }
  "#]]
  .assert_eq(unit(&output, "DepthFirstVoidVisitor"));
}

#[test]
fn visitor_docs_carry_field_comments() {
  let g = grammar(
    "
Paren =
  // opening
  '('
  // inner
  Expr
  ')'
Expr = 'e'
",
  );
  let config = Config { javadoc_comments: true, ..Default::default() };
  let output = generate(&config, &g);

  let doc = "  /**
   * Visits a {@link Paren} node.
   * opening
   * inner
   *
   * @param n - the node to visit
";
  assert!(unit(&output, "IVoidVisitor").contains(&format!("{doc}   */\n  public void visit(")));
  assert!(unit(&output, "IRetArguVisitor").contains(&format!(
    "{doc}   * @param argu - the user argument\n   * @return the user return information\n   */\n"
  )));
  assert!(unit(&output, "DepthFirstVoidVisitor")
    .contains(&format!("{doc}   */\n  @Override\n  public void visit(final Paren n) {{\n")));
}

#[test]
fn inline_comments_in_depth_first_visitor() {
  let g = grammar(
    "
Args =
  '['
  (
    (',' // comma separated
      Item)*
    (';' // semicolon separated
      Item)*
  )?
  // closing
  ']'
Item = 'x'
",
  );
  let config = Config { inline_accept_methods: true, ..Default::default() };
  let output = generate(&config, &g);

  expect![[r#"
      @Override
      public void visit(final Args n) {
        n.f0.accept(this);
        // comma separated
        // semicolon separated
        n.f1.accept(this);
        // closing
        n.f2.accept(this);
      }
  "#]]
  .assert_eq(&visit_method(unit(&output, "DepthFirstVoidVisitor"), "Args"));

  let config = Config { inline_accept_methods: true, debug_comments: true, ..config };
  let output = generate(&config, &g);
  let method = visit_method(unit(&output, "DepthFirstVoidVisitor"), "Args");
  assert!(method.contains("  // comma separated ; s0\n"));
  assert!(method.contains("  // semicolon separated ; s1\n"));
  assert!(method.contains("  // closing ; f2\n"));
}

#[test]
fn inline_code_in_depth_first_visitor() {
  let unit_with_code =
    ExpansionUnit::non_terminal(Span::new(6, 10), "Item").with_code("count++;\n  log(n);");
  let choices = ExpansionChoices::new(vec![Expansion::new(vec![unit_with_code])]);
  let g = Grammar {
    productions: vec![
      Production::bnf("List", Span::new(0, 10), choices),
      Production::code("Item", Span::new(11, 20), "return null;"),
    ],
    comments:    vec![],
  };
  let output = generate(&Config::default(), &g);

  let dfv = unit(&output, "DepthFirstVoidVisitor");
  expect![[r#"
      @Override
      public void visit(final List n) {
        count++;
        log(n);
        n.f0.accept(this);
      }
  "#]]
  .assert_eq(&visit_method(dfv, "List"));
  expect![[r#"
      @Override
      public void visit(final Item n) {
      }
  "#]]
  .assert_eq(&visit_method(dfv, "Item"));
}

#[test]
fn name_collision() {
  let g = Grammar {
    productions: vec![
      Production::code("Foo", Span::new(0, 3), ""),
      Production::code("Foo", Span::new(10, 13), ""),
    ],
    comments:    vec![],
  };
  let (err, diagnostics) = generate_err(&Config::default(), &g);

  assert!(matches!(&err, GenError::NameCollision { name } if name == "Foo"));
  let reported = diagnostics.diagnostics();
  assert_eq!(reported.len(), 1);
  assert_eq!(reported[0].severity, Severity::Error);
  assert_eq!(reported[0].message, "node type `Foo` is generated by more than one production");
  assert_eq!(reported[0].span, Some(Span::new(10, 13)));
}

#[test]
fn reserved_and_invalid_names() {
  let (err, diagnostics) = generate_err(&Config::default(), &grammar("NodeToken = 'x'\n"));
  assert!(matches!(err, GenError::ReservedName { .. }));
  assert_eq!(diagnostics.error_count(), 1);

  let config = Config { name_prefix: "1".into(), ..Default::default() };
  let (err, _) = generate_err(&config, &grammar("Expr = 'e'\n"));
  assert!(matches!(&err, GenError::InvalidName { name } if name == "1Expr"));

  let g =
    Grammar { productions: vec![Production::code("class", Span::new(0, 5), "")], comments: vec![] };
  let (err, _) = generate_err(&Config::default(), &g);
  assert!(matches!(err, GenError::InvalidName { .. }));
}

#[test]
fn undefined_production() {
  let inner = ExpansionUnit::non_terminal(Span::new(13, 16), "Bar");
  let group = ExpansionUnit::new(
    Span::new(12, 18),
    treegen_grammar::UnitKind::Optional(ExpansionChoices::new(vec![Expansion::new(vec![inner])])),
  );
  let choices = ExpansionChoices::new(vec![Expansion::new(vec![group])]);
  let g = Grammar {
    productions: vec![Production::bnf("Foo", Span::new(6, 18), choices)],
    comments:    vec![],
  };

  let (err, diagnostics) = generate_err(&Config::default(), &g);
  match &err {
    GenError::UndefinedProduction { name, referenced_from } => {
      assert_eq!(name, "Bar");
      assert_eq!(referenced_from, "Foo");
    }
    _ => panic!("unexpected error: {err:?}"),
  }
  assert_eq!(diagnostics.diagnostics()[0].span, Some(Span::new(13, 16)));
  assert_eq!(err.to_string(), "production `Foo` refers to undefined production `Bar`");
}
