#![deny(unused_must_use)]

use beef::lean::Cow;
use span::{Span, Spanned};

use crate::lexer::TokenKind::*;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::{ast, Error, Result};

/// Parse one program. The first error aborts the parse; there is no
/// resynchronisation.
pub fn parse(src: &str) -> Result<ast::Module> {
  let lexer = Lexer::new(src);
  let parser = Parser::new(lexer);
  parser.module()
}

struct Context {
  current_func: Option<Func>,
  current_class: Option<()>,
}

#[derive(Clone, Copy)]
struct Func {
  is_method: bool,
}

#[allow(clippy::derivable_impls)]
impl Default for Context {
  fn default() -> Self {
    Self {
      current_func: None,
      current_class: None,
    }
  }
}

struct Parser<'src> {
  lex: Lexer<'src>,
  ctx: Context,
}

impl<'src> Parser<'src> {
  fn new(lex: Lexer<'src>) -> Self {
    Self {
      lex,
      ctx: Context::default(),
    }
  }

  fn module(mut self) -> Result<ast::Module<'src>> {
    let mut module = ast::Module::new();

    while !self.current().is(Tok_Eof) {
      let stmt = self.top_level_stmt()?;
      module.body.push(stmt);
    }

    Ok(module)
  }

  #[inline]
  fn previous(&self) -> &Token {
    self.lex.previous()
  }

  #[inline]
  fn current(&self) -> &Token {
    self.lex.current()
  }

  #[inline]
  fn expect(&mut self, kind: TokenKind) -> Result<()> {
    if self.bump_if(kind) {
      Ok(())
    } else {
      Err(Error::new(
        format!("expected `{}`", kind.name()),
        self.current().span,
      ))
    }
  }

  #[inline]
  fn bump_if(&mut self, kind: TokenKind) -> bool {
    if self.current().is(kind) {
      self.bump();
      true
    } else {
      false
    }
  }

  /// Move forward by one token, returning the previous one.
  #[inline]
  fn bump(&mut self) -> &Token {
    self.lex.bump();
    self.previous()
  }

  /// An unrecognised input byte under the cursor, if any.
  fn check_unknown_token(&self) -> Result<()> {
    let token = self.current();
    if token.is(Tok_Error) {
      Err(Error::new(
        format!("undefined token `{}`", self.lex.lexeme(token)),
        token.span,
      ))
    } else {
      Ok(())
    }
  }

  /// Calls `f` in the context `ctx`.
  /// `ctx` is used only for the duration of the call to `f`.
  #[inline]
  fn with_ctx<T>(&mut self, mut ctx: Context, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
    std::mem::swap(&mut self.ctx, &mut ctx);
    let res = f(self);
    std::mem::swap(&mut self.ctx, &mut ctx);
    res
  }
}

mod common;
mod expr;
mod stmt;

// On average, a single parse_XXX() method consumes between 10 and 700 bytes
// of stack space. Assuming ~50 recursive calls per dive and 700 bytes of
// stack space per call, we'll require 50 * 700 = 35k bytes of stack space
// in order to dive. For future proofing, we round this value up to 64k
// bytes.
const MINIMUM_STACK_REQUIRED: usize = 64_000;

#[cfg(any(not(feature = "check-recursion-limit"), target_family = "wasm"))]
fn check_recursion_limit(_span: Span) -> Result<()> {
  Ok(())
}

#[cfg(all(feature = "check-recursion-limit", not(target_family = "wasm")))]
fn check_recursion_limit(span: Span) -> Result<()> {
  if stacker::remaining_stack()
    .map(|available| available > MINIMUM_STACK_REQUIRED)
    .unwrap_or(true)
  {
    Ok(())
  } else {
    Err(Error::new("nesting limit reached", span))
  }
}

#[cfg(test)]
mod tests;
