#![allow(non_camel_case_types)]

use std::borrow::Borrow;
use std::fmt;
use std::mem::discriminant;
use std::ops::Range;

use logos::Logos;
use span::Span;

#[derive(Clone, Debug)]
pub struct Token {
  pub kind: TokenKind,
  pub span: Span,
}

impl Token {
  pub fn is(&self, kind: impl Borrow<TokenKind>) -> bool {
    discriminant(&self.kind) == discriminant(kind.borrow())
  }
}

#[derive(Clone)]
pub struct Lexer<'src> {
  src: &'src str,
  inner: logos::Lexer<'src, TokenKind>,
  previous: Token,
  current: Token,
  eof: Token,
}

impl<'src> Lexer<'src> {
  pub fn new(src: &'src str) -> Self {
    let end = src.len();
    let eof = Token {
      span: (end..end).into(),
      kind: TokenKind::Tok_Eof,
    };

    let mut lex = Self {
      src,
      inner: TokenKind::lexer(src),
      previous: eof.clone(),
      current: eof.clone(),
      eof,
    };
    lex.bump();

    lex
  }

  #[inline]
  pub fn previous(&self) -> &Token {
    &self.previous
  }

  #[inline]
  pub fn current(&self) -> &Token {
    &self.current
  }

  #[inline]
  pub fn eof(&self) -> &Token {
    &self.eof
  }

  #[inline]
  pub fn lexeme(&self, token: &Token) -> &'src str {
    &self.src[Range::from(token.span)]
  }

  /// Move forward by one token. The EOF token repeats indefinitely.
  #[inline]
  pub fn bump(&mut self) {
    std::mem::swap(&mut self.previous, &mut self.current);

    self.current = self.next_token().unwrap_or_else(|| self.eof.clone());
  }

  fn next_token(&mut self) -> Option<Token> {
    let kind = self.inner.next()?;
    Some(Token {
      kind,
      span: self.inner.span().into(),
    })
  }
}

// Reserved words and type markers are matched by the longest-match rule,
// so `enddef` is a single identifier while `#numberx` is the marker
// `#number` followed by the identifier `x` (markers are prefix-matched).
#[derive(Clone, Copy, Debug, Logos, PartialEq)]
pub enum TokenKind {
  // Keywords
  #[token("if")]
  Kw_If,
  #[token("do")]
  Kw_Do,
  #[token("then")]
  Kw_Then,
  #[token("end")]
  Kw_End,
  #[token("while")]
  Kw_While,
  #[token("loop")]
  Kw_Loop,
  #[token("def")]
  Kw_Def,
  #[token("return")]
  Kw_Return,
  #[token("class")]
  Kw_Class,
  #[token("self")]
  Kw_Self,

  // Type markers
  #[token("#number")]
  Ty_Number,
  #[token("#bool")]
  Ty_Bool,
  #[token("#include")]
  Ty_Include,
  #[token("#exclude")]
  Ty_Exclude,

  // Brackets
  #[token("(")]
  Brk_ParenL,
  #[token(")")]
  Brk_ParenR,
  #[token("[")]
  Brk_SquareL,
  #[token("]")]
  Brk_SquareR,
  #[token("{")]
  Brk_CurlyL,
  #[token("}")]
  Brk_CurlyR,

  // Misc characters
  #[token(",")]
  Tok_Comma,
  #[token(":")]
  Tok_Colon,
  #[token(".")]
  Op_Dot,
  #[token("..")]
  Op_Range,

  // Operators
  #[token("=")]
  Op_Equal,
  #[token("==")]
  Op_EqualEqual,
  #[token("!=")]
  Op_BangEqual,
  #[token("+")]
  Op_Plus,
  #[token("-")]
  Op_Minus,
  #[token("*")]
  Op_Star,
  #[token("/")]
  Op_Slash,
  #[token("<")]
  Op_Less,
  #[token(">")]
  Op_More,

  // Literals
  /// `true` or `false`
  #[token("true")]
  #[token("false")]
  Lit_Bool,
  /// `0`, `23`, `65535`, etc.
  #[regex("[0-9]+")]
  Lit_Num,
  /// `a`, `bc2`, `Counter`, etc. No underscores.
  #[regex("[a-zA-Z][a-zA-Z0-9]*")]
  Lit_Ident,

  #[doc(hidden)]
  #[regex(r"[ \t\n]+", logos::skip)]
  _Tok_Whitespace,
  /// A `#` that does not begin a type marker starts a line comment.
  #[doc(hidden)]
  #[token("#", lex_comment)]
  _Tok_Comment,

  #[error]
  Tok_Error,
  Tok_Eof,
}

fn lex_comment<'src>(lex: &mut logos::Lexer<'src, TokenKind>) -> logos::Skip {
  let rest = lex.remainder();
  let end = rest.find('\n').unwrap_or(rest.len());
  lex.bump(end);
  logos::Skip
}

impl TokenKind {
  pub fn name(&self) -> &'static str {
    match self {
      TokenKind::Kw_If => "if",
      TokenKind::Kw_Do => "do",
      TokenKind::Kw_Then => "then",
      TokenKind::Kw_End => "end",
      TokenKind::Kw_While => "while",
      TokenKind::Kw_Loop => "loop",
      TokenKind::Kw_Def => "def",
      TokenKind::Kw_Return => "return",
      TokenKind::Kw_Class => "class",
      TokenKind::Kw_Self => "self",
      TokenKind::Ty_Number => "#number",
      TokenKind::Ty_Bool => "#bool",
      TokenKind::Ty_Include => "#include",
      TokenKind::Ty_Exclude => "#exclude",
      TokenKind::Brk_ParenL => "(",
      TokenKind::Brk_ParenR => ")",
      TokenKind::Brk_SquareL => "[",
      TokenKind::Brk_SquareR => "]",
      TokenKind::Brk_CurlyL => "{",
      TokenKind::Brk_CurlyR => "}",
      TokenKind::Tok_Comma => ",",
      TokenKind::Tok_Colon => ":",
      TokenKind::Op_Dot => ".",
      TokenKind::Op_Range => "..",
      TokenKind::Op_Equal => "=",
      TokenKind::Op_EqualEqual => "==",
      TokenKind::Op_BangEqual => "!=",
      TokenKind::Op_Plus => "+",
      TokenKind::Op_Minus => "-",
      TokenKind::Op_Star => "*",
      TokenKind::Op_Slash => "/",
      TokenKind::Op_Less => "<",
      TokenKind::Op_More => ">",
      TokenKind::Lit_Bool => "bool",
      TokenKind::Lit_Num => "number",
      TokenKind::Lit_Ident => "identifier",
      TokenKind::_Tok_Whitespace => "whitespace",
      TokenKind::_Tok_Comment => "comment",
      TokenKind::Tok_Error => "error",
      TokenKind::Tok_Eof => "eof",
    }
  }
}

/// Drains a lexer into `(lexeme, token)` pairs. Test helper.
pub struct Tokens<'src>(pub Lexer<'src>);

impl<'src> Iterator for Tokens<'src> {
  type Item = (&'src str, Token);

  fn next(&mut self) -> Option<Self::Item> {
    let token = self.0.current().clone();
    self.0.bump();
    if !token.is(TokenKind::Tok_Eof) {
      Some((self.0.lexeme(&token), token))
    } else {
      None
    }
  }
}

impl<'src> fmt::Debug for Lexer<'src> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Lexer")
      .field("previous", &self.previous)
      .field("current", &self.current)
      .finish()
  }
}
