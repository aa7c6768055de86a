use pretty_assertions::assert_eq;

use super::grammar;
use crate::{
  comments::{CommentAssociator, CommentLine},
  lower::lower,
  Config, Spacing,
};

const PAREN: &str = "
Paren =
  // opening
  // paren
  '('
  // inner
  Expr
  ')' // not part of the production
Expr = 'e'
";

const ARGS: &str = "
Args =
  '['
  (
    (',' // comma separated
      Item)*
    (';' // semicolon separated
      Item)*
  )?
  ']'
Item = 'x'
";

fn bare(lines: &[CommentLine]) -> Vec<&str> { lines.iter().map(|l| l.bare.as_str()).collect() }

#[test]
fn comments_per_field() {
  let g = grammar(PAREN);
  let config = Config::default();
  let assoc = CommentAssociator::new(&g, &config);

  let data = assoc.associate(g.production("Paren").unwrap()).unwrap();
  assert_eq!(data.fields.len(), 3);
  assert_eq!(bare(&data.fields[0]), ["opening", "paren"]);
  assert_eq!(bare(&data.fields[1]), ["inner"]);
  assert!(data.fields[2].is_empty());
  assert!(data.fields.iter().flatten().all(|l| l.debug.is_none()));
  assert_eq!(data.subs, None);

  let expr = assoc.associate(g.production("Expr").unwrap()).unwrap();
  assert_eq!(expr.fields.len(), 1);
  assert!(expr.fields[0].is_empty());
  assert_eq!(assoc.walks(), 2);
}

#[test]
fn debug_suffixes() {
  let g = grammar(PAREN);
  let config = Config { debug_comments: true, ..Default::default() };
  let assoc = CommentAssociator::new(&g, &config);
  let data = assoc.associate(g.production("Paren").unwrap()).unwrap();

  let start = PAREN.find("// inner").unwrap();
  assert_eq!(
    data.fields[1],
    vec![CommentLine {
      bare:  "inner".into(),
      debug: Some(format!(" // f1 @{}..{}", start, start + "// inner".len())),
    }]
  );
}

#[test]
fn sub_parts_kept_inline() {
  let g = grammar(ARGS);
  let config = Config { inline_accept_methods: true, ..Default::default() };
  let assoc = CommentAssociator::new(&g, &config);
  let data = assoc.associate(g.production("Args").unwrap()).unwrap();

  assert_eq!(data.fields.len(), 3);
  assert!(data.fields.iter().all(|f| f.is_empty()));

  let subs = data.subs.as_ref().unwrap();
  assert_eq!(subs.len(), 2);
  assert_eq!(subs[0].field, 1);
  assert_eq!(bare(&subs[0].block), ["comma separated"]);
  assert_eq!(subs[1].field, 1);
  assert_eq!(bare(&subs[1].block), ["semicolon separated"]);

  assert_eq!(data.subs_of(1).map(|(k, _)| k).collect::<Vec<_>>(), [0, 1]);
  assert_eq!(data.subs_of(0).count(), 0);
}

#[test]
fn sub_parts_dropped_otherwise() {
  let g = grammar(ARGS);
  let config = Config::default();
  let assoc = CommentAssociator::new(&g, &config);
  let data = assoc.associate(g.production("Args").unwrap()).unwrap();

  assert_eq!(data.subs, None);
  assert!(data.fields.iter().all(|f| f.is_empty()));
}

#[test]
fn nested_sub_parts_are_innermost() {
  let src = "
Block =
  (
    'a'
    ('b' // inner group
      'c')*
    // outer group
    'd'
  )?
";
  let g = grammar(src);
  let config = Config { inline_accept_methods: true, debug_comments: true, ..Default::default() };
  let assoc = CommentAssociator::new(&g, &config);
  let data = assoc.associate(g.production("Block").unwrap()).unwrap();

  // The optional is the only field, so it is not a sub-part itself.
  let subs = data.subs.unwrap();
  assert_eq!(subs.len(), 1);
  assert_eq!(bare(&subs[0].block), ["inner group"]);
  assert!(subs[0].block[0].debug.as_deref().unwrap().starts_with(" // s0 @"));
  assert_eq!(bare(&data.fields[0]), ["outer group"]);
}

#[test]
fn comment_right_after_open_paren() {
  let src = "
Args =
  '['
  (
    ( // comma separated
      ',' Item)*
  )?
  ']'
Item = 'x'
";
  let g = grammar(src);
  let config = Config { inline_accept_methods: true, ..Default::default() };
  let assoc = CommentAssociator::new(&g, &config);
  let data = assoc.associate(g.production("Args").unwrap()).unwrap();

  assert!(data.fields.iter().all(|f| f.is_empty()));
  let subs = data.subs.unwrap();
  assert_eq!(subs.len(), 1);
  assert_eq!(subs[0].field, 1);
  assert_eq!(bare(&subs[0].block), ["comma separated"]);
}

#[test]
fn comments_data_is_computed_once() {
  let g = grammar(PAREN);
  let config = Config::default();
  let assoc = CommentAssociator::new(&g, &config);
  let class = lower(g.production("Paren").unwrap(), &config);

  assert_eq!(assoc.walks(), 0);
  let first = class.gen_comments_data(&assoc).unwrap();
  let second = class.gen_comments_data(&assoc).unwrap();
  assert!(std::ptr::eq(first, second));
  assert_eq!(assoc.walks(), 1);
}

#[test]
fn javadoc_rendering_cached_at_level_one() {
  let g = grammar(PAREN);
  let config = Config { debug_comments: true, ..Default::default() };
  let assoc = CommentAssociator::new(&g, &config);
  let class = lower(g.production("Paren").unwrap(), &config);

  let mut buf = String::new();
  class.fmt_fields_javadoc_cmts(&mut buf, &Spacing::at(2, 2), &assoc);
  assert_eq!(class.visit_field_cmts(), None);
  assert!(buf.starts_with("     * opening // f0 @"));
  assert_eq!(buf.lines().count(), 3);

  let mut buf = String::new();
  class.fmt_fields_javadoc_cmts(&mut buf, &Spacing::at(2, 1), &assoc);
  class.fmt_fields_javadoc_cmts(&mut buf, &Spacing::at(2, 1), &assoc);
  let cached = class.visit_field_cmts().unwrap();
  assert!(cached.starts_with("   * opening // f0 @"));
  assert_eq!(buf, format!("{cached}{cached}"));
  assert_eq!(assoc.walks(), 1);
}

#[test]
fn code_comments() {
  let g = grammar(PAREN);
  let assoc_config = Config::default();
  let assoc = CommentAssociator::new(&g, &assoc_config);

  let class = lower(g.production("Paren").unwrap(), &assoc_config);
  let mut buf = String::new();
  class.fmt1_javacode_field_cmt(&mut buf, &Spacing::at(2, 2), 0, Some("f0"), &assoc);
  class.fmt1_javacode_field_cmt(&mut buf, &Spacing::at(2, 2), 2, Some("f2"), &assoc);
  assert_eq!(buf, "    // opening\n    // paren\n");

  let debug_config = Config { debug_comments: true, ..Default::default() };
  let assoc = CommentAssociator::new(&g, &debug_config);
  let class = lower(g.production("Paren").unwrap(), &debug_config);
  let mut buf = String::new();
  class.fmt1_javacode_field_cmt(&mut buf, &Spacing::at(2, 1), 1, Some("f1"), &assoc);
  assert_eq!(buf, "  // inner ; f1\n");
}

#[test]
fn sub_comment_rendering() {
  let g = grammar(ARGS);
  let config = Config { inline_accept_methods: true, ..Default::default() };
  let assoc = CommentAssociator::new(&g, &config);
  let class = lower(g.production("Args").unwrap(), &config);

  let mut buf = String::new();
  class.fmt1_javacode_sub_cmt(&mut buf, &Spacing::at(2, 2), 1, None, &assoc);
  assert_eq!(buf, "    // semicolon separated\n");
}

#[test]
fn invalid_sub_comment_index() {
  let g = grammar(ARGS);
  let config = Config { inline_accept_methods: true, ..Default::default() };
  let assoc = CommentAssociator::new(&g, &config);
  let class = lower(g.production("Args").unwrap(), &config);

  let mut buf = String::new();
  class.fmt1_javacode_sub_cmt(&mut buf, &Spacing::at(2, 2), 5, None, &assoc);
  assert_eq!(buf, "    // invalid sub comment index (5), size = 2\n");

  let mut extra = String::new();
  class.fmt1_javacode_sub_cmt(&mut extra, &Spacing::at(2, 2), 2, Some("s2"), &assoc);
  assert_eq!(extra, "    // invalid sub comment index (2), size = 2 ; s2\n");

  // Later sub-parts still render.
  class.fmt1_javacode_sub_cmt(&mut buf, &Spacing::at(2, 2), 0, None, &assoc);
  assert!(buf.ends_with("    // comma separated\n"));
}

#[test]
fn sub_comments_need_inline_mode() {
  let g = grammar(ARGS);
  let config = Config::default();
  let assoc = CommentAssociator::new(&g, &config);
  let class = lower(g.production("Args").unwrap(), &config);

  let mut buf = String::new();
  class.fmt1_javacode_sub_cmt(&mut buf, &Spacing::at(2, 2), 5, None, &assoc);
  assert_eq!(buf, "");
}
