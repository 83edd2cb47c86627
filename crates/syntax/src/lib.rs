use beef::lean::Cow;
use span::Span;

pub mod ast;
pub mod lexer;
pub mod parser;

pub use parser::parse;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// What went wrong, in the terms the diagnostics use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
  /// Unexpected token or unrecognised input byte.
  Syntax,
  /// Integer literal outside `[0, 65536)`.
  Constant,
}

#[derive(Clone, Debug)]
pub struct Error {
  pub kind: ErrorKind,
  pub message: Cow<'static, str>,
  pub span: Span,
}

impl Error {
  pub fn new(message: impl Into<Cow<'static, str>>, span: impl Into<Span>) -> Self {
    Error {
      kind: ErrorKind::Syntax,
      message: message.into(),
      span: span.into(),
    }
  }

  pub fn constant(message: impl Into<Cow<'static, str>>, span: impl Into<Span>) -> Self {
    Error {
      kind: ErrorKind::Constant,
      message: message.into(),
      span: span.into(),
    }
  }

  pub fn report<'a>(&self, source: impl Into<diag::Source<'a>>) -> String {
    diag::Report::error()
      .source(source)
      .message(self.message.to_string())
      .span(self.span)
      .build()
      .emit_to_string()
      .unwrap()
  }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let Error { message, span, .. } = self;
    write!(f, "error at {span}: {message}")
  }
}
