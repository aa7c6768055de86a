//! Builds a [`Grammar`] from `.ungram` text.
//!
//! The text is parsed twice: once by the `ungrammar` crate, which validates
//! it and gives us the rule structure, and once by our own lexer, which
//! gives us positions and comments. The rule tree is then walked in source
//! order while a cursor walks the tokens, so every unit picks up the span of
//! the tokens it was written with.

use std::collections::HashMap;

use ungrammar::Rule;

use crate::{
  token::{self, Lexeme, Token},
  ExpansionChoices, Expansion, ExpansionUnit, Grammar, GrammarError, Production, Span, UnitKind,
};

type Result<T> = std::result::Result<T, GrammarError>;

pub fn parse(text: &str) -> Result<Grammar> {
  let grammar: ungrammar::Grammar = text.parse()?;
  let (lexemes, comments) = token::tokenize(text)?;

  let rules: HashMap<&str, &Rule> =
    grammar.iter().map(|node| (grammar[node].name.as_str(), &grammar[node].rule)).collect();

  let mut cursor = Cursor { grammar: &grammar, lexemes: &lexemes, pos: 0, opens: vec![] };
  let mut productions = vec![];

  loop {
    cursor.skip_punct();
    if cursor.at_end() {
      break;
    }

    cursor.opens.clear();
    let name = cursor.expect(Token::Ident, "production name")?;
    cursor.expect(Token::Eq, "`=`")?;
    let rule = rules
      .get(name.text.as_str())
      .ok_or_else(|| GrammarError::UnknownProduction { name: name.text.clone() })?;

    let choices = cursor.lower_choices(rule)?;
    let span = name.span.cover(choices.span);
    productions.push(Production::bnf(name.text.clone(), span, choices));
  }

  debug!("read {} productions and {} comments", productions.len(), comments.len());

  Ok(Grammar { productions, comments })
}

struct Cursor<'a> {
  grammar: &'a ungrammar::Grammar,
  lexemes: &'a [Lexeme],
  pos:     usize,
  /// Opening parens skipped since the last unit, outermost first.
  opens:   Vec<Span>,
}

impl<'a> Cursor<'a> {
  fn at_end(&self) -> bool { self.pos >= self.lexemes.len() }

  fn peek(&self) -> Option<&'a Lexeme> { self.lexemes.get(self.pos) }

  // Parentheses and `|` are folded away by ungrammar, so they never line up
  // with a rule. Skip them until the next token that does, remembering the
  // opening parens for the composite units that follow.
  fn skip_punct(&mut self) {
    while let Some(lexeme) = self.peek() {
      match lexeme.kind {
        Token::OpenParen => self.opens.push(lexeme.span),
        Token::CloseParen | Token::Pipe => self.opens.clear(),
        _ => break,
      }
      self.pos += 1;
    }
  }

  /// The opening paren of the composite unit about to be lowered, if it was
  /// written with one.
  fn take_open(&mut self) -> Option<Span> {
    (!self.opens.is_empty()).then(|| self.opens.remove(0))
  }

  // A leaf unit ends any run of parens before it.
  fn leaf(&mut self, kind: Token, text: &str) -> Result<&'a Lexeme> {
    self.opens.clear();
    self.expect_text(kind, text)
  }

  fn expect(&mut self, kind: Token, expected: &str) -> Result<&'a Lexeme> {
    match self.peek() {
      Some(lexeme) if lexeme.kind == kind => {
        self.pos += 1;
        Ok(lexeme)
      }
      Some(lexeme) => Err(GrammarError::UnexpectedToken {
        expected: expected.to_string(),
        found:    lexeme.text.clone(),
        offset:   lexeme.span.start,
      }),
      None => Err(GrammarError::UnexpectedEof { expected: expected.to_string() }),
    }
  }

  fn expect_text(&mut self, kind: Token, text: &str) -> Result<&'a Lexeme> {
    let expected = format!("`{text}`");
    let lexeme = self.expect(kind, &expected)?;
    if lexeme.text != text {
      return Err(GrammarError::UnexpectedToken {
        expected,
        found: lexeme.text.clone(),
        offset: lexeme.span.start,
      });
    }
    Ok(lexeme)
  }

  fn expect_postfix(&mut self, kind: Token, expected: &str) -> Result<&'a Lexeme> {
    while matches!(self.peek().map(|l| l.kind), Some(Token::CloseParen)) {
      self.pos += 1;
    }
    self.expect(kind, expected)
  }

  fn lower_choices(&mut self, rule: &Rule) -> Result<ExpansionChoices> {
    let choices = match rule {
      Rule::Alt(alts) => alts.iter().map(|alt| self.lower_expansion(alt)).collect::<Result<_>>()?,
      _ => vec![self.lower_expansion(rule)?],
    };
    Ok(ExpansionChoices::new(choices))
  }

  fn lower_expansion(&mut self, rule: &Rule) -> Result<Expansion> {
    let units = match rule {
      Rule::Seq(rules) => rules.iter().map(|r| self.lower_unit(r)).collect::<Result<_>>()?,
      _ => vec![self.lower_unit(rule)?],
    };
    Ok(Expansion::new(units))
  }

  fn lower_unit(&mut self, rule: &Rule) -> Result<ExpansionUnit> {
    self.skip_punct();

    match rule {
      Rule::Node(node) => {
        let name = &self.grammar[*node].name;
        let lexeme = self.leaf(Token::Ident, name)?;
        Ok(ExpansionUnit::non_terminal(lexeme.span, name))
      }
      Rule::Token(token) => {
        let image = &self.grammar[*token].name;
        let lexeme = self.leaf(Token::Literal, image)?;
        Ok(ExpansionUnit::terminal(lexeme.span, image))
      }
      Rule::Labeled { label, rule } => {
        let start = self.leaf(Token::Ident, label)?.span;
        self.expect(Token::Colon, "`:`")?;
        let mut unit = self.lower_unit(rule)?;
        unit.span = start.cover(unit.span);
        Ok(unit)
      }
      Rule::Opt(inner) => {
        let open = self.take_open();
        let choices = self.lower_choices(inner)?;
        let op = self.expect_postfix(Token::Question, "`?`")?;
        let span = cover_open(open, choices.span).cover(op.span);
        Ok(ExpansionUnit::new(span, UnitKind::Optional(choices)))
      }
      Rule::Rep(inner) => {
        let open = self.take_open();
        let choices = self.lower_choices(inner)?;
        let op = self.expect_postfix(Token::Star, "`*`")?;
        let span = cover_open(open, choices.span).cover(op.span);
        Ok(ExpansionUnit::new(span, UnitKind::ZeroOrMore(choices)))
      }
      Rule::Seq(_) | Rule::Alt(_) => {
        let open = self.take_open();
        let choices = self.lower_choices(rule)?;
        let mut span = cover_open(open, choices.span);
        if open.is_some() {
          if let Some(close) = self.peek().filter(|l| l.kind == Token::CloseParen) {
            span = span.cover(close.span);
            self.pos += 1;
            self.opens.clear();
          }
        }
        Ok(ExpansionUnit::new(span, UnitKind::Group(choices)))
      }
    }
  }
}

fn cover_open(open: Option<Span>, span: Span) -> Span {
  open.map_or(span, |open| open.cover(span))
}
