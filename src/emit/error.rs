use beef::lean::Cow;
use span::Span;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
  /// Identifier used with no binding in scope.
  UnresolvedSymbol,
  /// A node that has no lowering in the position it appears in.
  Syntax,
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

  pub fn unresolved(name: &str, span: impl Into<Span>) -> Self {
    Error {
      kind: ErrorKind::UnresolvedSymbol,
      message: format!("undefined symbol `{name}`").into(),
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
    write!(f, "{}", self.message)
  }
}
