use std::ops::Range;

use thiserror::Error;

use crate::{Comment, Span};

// The ungrammar crate parses the grammar for us, but it throws away
// positions and comments. This lexer only exists to recover both: it walks
// the same text and yields every token with its byte range.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
  Ident,
  /// A quoted terminal, such as `'if'`.
  Literal,
  Comment,

  Eq,
  Pipe,
  Question,
  Star,
  Colon,
  OpenParen,
  CloseParen,
}

pub type Result<T> = std::result::Result<T, LexError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
  #[error("invalid character {c:?} at offset {offset}")]
  InvalidChar { c: char, offset: usize },

  #[error("unterminated literal starting at offset {offset}")]
  UnterminatedLiteral { offset: usize },

  #[error("end of file")]
  EOF,
}

/// A non-comment token with its position and text. For literals, `text` is
/// the unescaped image without quotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
  pub kind: Token,
  pub span: Span,
  pub text: String,
}

pub struct Lexer<'a> {
  source: &'a str,
  index:  usize,
  span:   Range<usize>,
}

impl<'a> Lexer<'a> {
  pub fn new(input: &'a str) -> Self { Lexer { source: input, index: 0, span: 0..0 } }

  fn peek(&self) -> Option<char> { self.source[self.index..].chars().next() }

  fn bump(&mut self) -> Option<char> {
    let c = self.peek()?;
    self.index += c.len_utf8();
    Some(c)
  }

  fn eat_whitespace(&mut self) {
    while self.peek().is_some_and(char::is_whitespace) {
      self.bump();
    }
  }

  pub fn next(&mut self) -> Result<Token> {
    self.eat_whitespace();

    let start = self.index;
    let Some(first) = self.bump() else { return Err(LexError::EOF) };
    let tok = match first {
      '=' => Token::Eq,
      '|' => Token::Pipe,
      '?' => Token::Question,
      '*' => Token::Star,
      ':' => Token::Colon,
      '(' => Token::OpenParen,
      ')' => Token::CloseParen,

      '/' if self.peek() == Some('/') => {
        let len = self.source[self.index..].find('\n').unwrap_or(self.source.len() - self.index);
        self.index += len;
        Token::Comment
      }

      '\'' => {
        loop {
          match self.bump() {
            Some('\\') => {
              self.bump();
            }
            Some('\'') => break,
            Some(_) => {}
            None => return Err(LexError::UnterminatedLiteral { offset: start }),
          }
        }
        Token::Literal
      }

      'a'..='z' | 'A'..='Z' | '_' => {
        while matches!(self.peek(), Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_')) {
          self.bump();
        }
        Token::Ident
      }

      c => return Err(LexError::InvalidChar { c, offset: start }),
    };

    self.span = start..self.index;
    Ok(tok)
  }

  pub fn slice(&self) -> &'a str { &self.source[self.span.clone()] }
  pub fn span(&self) -> Range<usize> { self.span.clone() }
}

/// Splits `text` into tokens and comments, both in source order.
pub fn tokenize(text: &str) -> Result<(Vec<Lexeme>, Vec<Comment>)> {
  let mut lexer = Lexer::new(text);
  let mut lexemes = vec![];
  let mut comments = vec![];

  loop {
    let tok = match lexer.next() {
      Ok(tok) => tok,
      Err(LexError::EOF) => break,
      Err(e) => return Err(e),
    };
    let span = Span::from(lexer.span());
    match tok {
      Token::Comment => {
        let text = lexer.slice().trim_start_matches('/').trim_end_matches('\r');
        comments.push(Comment { span, text: text.to_string() });
      }
      Token::Literal => {
        lexemes.push(Lexeme { kind: tok, span, text: unescape_literal(lexer.slice()) });
      }
      _ => lexemes.push(Lexeme { kind: tok, span, text: lexer.slice().to_string() }),
    }
  }

  Ok((lexemes, comments))
}

fn unescape_literal(lit: &str) -> String {
  let inner = &lit[1..lit.len() - 1];
  let mut buf = String::with_capacity(inner.len());
  let mut chars = inner.chars();
  while let Some(c) = chars.next() {
    if c == '\\' {
      if let Some(escaped) = chars.next() {
        buf.push(escaped);
      }
    } else {
      buf.push(c);
    }
  }
  buf
}
