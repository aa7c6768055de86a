use expect_test::{expect, Expect};

use crate::{ungram, Grammar, GrammarError, ProductionBody, UnitKind};

fn parse_ok(src: &str) -> Grammar {
  match ungram::parse(src) {
    Ok(grammar) => grammar,
    Err(e) => panic!("failed to parse grammar: {e}"),
  }
}

fn check(src: &str, expect: Expect) {
  let grammar = parse_ok(src);
  expect.assert_eq(&grammar.to_string());
}

fn slice(src: &str, span: crate::Span) -> &str { &src[span.start..span.end] }

#[test]
fn productions_in_source_order() {
  check(
    "
Expr = Literal | BinExpr
BinExpr = lhs:Expr op:('+' | '-') rhs:Expr
Literal = 'int'
Block = '{' Stmt* '}'
Stmt = Expr ';'?
",
    expect![[r#"
      Expr = Literal | BinExpr
      BinExpr = Expr ('+' | '-') Expr
      Literal = 'int'
      Block = '{' Stmt* '}'
      Stmt = Expr ';'?
    "#]],
  );
}

#[test]
fn nested_groups() {
  check(
    "
List = '[' (Item (',' Item)*)? ']'
Item = 'x'
",
    expect![[r#"
      List = '[' (Item (',' Item)*)? ']'
      Item = 'x'
    "#]],
  );
}

#[test]
fn unit_spans() {
  let src = "Foo = x:Bar (Baz | 'q')?\nBar = 'b'\nBaz = 'z'\n";
  let grammar = parse_ok(src);

  let foo = &grammar.productions[0];
  assert_eq!(slice(src, foo.span), "Foo = x:Bar (Baz | 'q')?");

  let ProductionBody::Bnf(choices) = &foo.body else { panic!() };
  assert_eq!(choices.choices.len(), 1);
  let units = &choices.choices[0].units;
  assert_eq!(units.len(), 2);
  assert_eq!(slice(src, units[0].span), "x:Bar");
  assert_eq!(slice(src, units[1].span), "(Baz | 'q')?");

  let UnitKind::Optional(inner) = &units[1].kind else { panic!() };
  assert!(inner.is_choice());
  assert_eq!(slice(src, inner.choices[1].span), "'q'");
}

#[test]
fn composite_spans_include_parens() {
  let src = "List = '[' ( ( // first\n ',' Item)* )? (Item | ',') ']'\nItem = 'i'\n";
  let grammar = parse_ok(src);

  let ProductionBody::Bnf(choices) = &grammar.productions[0].body else { panic!() };
  let units = &choices.choices[0].units;
  assert_eq!(slice(src, units[1].span), "( ( // first\n ',' Item)* )?");
  assert_eq!(slice(src, units[2].span), "(Item | ',')");
  assert!(matches!(units[2].kind, UnitKind::Group(_)));

  let UnitKind::Optional(inner) = &units[1].kind else { panic!() };
  let rep = &inner.choices[0].units[0];
  assert_eq!(slice(src, rep.span), "( // first\n ',' Item)*");
  assert!(rep.span.contains(grammar.comments[0].span));
}

#[test]
fn comments_are_kept() {
  let src = "// a block\nBlock =\n  // opening\n  '{'\n  Stmt* // body\n  '}'\nStmt = 's'\n";
  let grammar = parse_ok(src);

  let texts = grammar.comments.iter().map(|c| c.text.as_str()).collect::<Vec<_>>();
  assert_eq!(texts, [" a block", " opening", " body"]);

  let block = grammar.production("Block").unwrap();
  assert_eq!(slice(src, block.span), "Block =\n  // opening\n  '{'\n  Stmt* // body\n  '}'");

  let inside = grammar.comments_in(block.span).map(|c| c.text.as_str()).collect::<Vec<_>>();
  assert_eq!(inside, [" opening", " body"]);
}

#[test]
fn invalid_grammar() {
  let err = ungram::parse("A = (B").unwrap_err();
  assert!(matches!(err, GrammarError::Ungrammar(_)), "{err:?}");
}
