//! Error reporting
//!
//! The entrypoint to this module is [Report][`crate::Report`]. A report
//! renders as the compiler's two-line diagnostic:
//!
//! ```text
//! LINE:COL: <message>
//! <offending line>
//! <caret under COL>
//! ```
//!
//! LINE and COL are 1-based; COL is a byte column. The caret points at the
//! start of the reported span.

use std::fmt;
use std::fmt::Write;

use beef::lean::Cow;
use span::Span;
use thiserror::Error;

use crate::snippet::Snippet;
use crate::source::Source;

#[derive(Clone)]
pub struct ReportBuilder<Src, Msg, Sp> {
  source: Src,
  message: Msg,
  span: Sp,
}

impl<Msg, Sp> ReportBuilder<(), Msg, Sp> {
  pub fn source<'a>(self, source: impl Into<Source<'a>>) -> ReportBuilder<Source<'a>, Msg, Sp> {
    ReportBuilder {
      source: source.into(),
      message: self.message,
      span: self.span,
    }
  }
}

impl<Src, Sp> ReportBuilder<Src, (), Sp> {
  pub fn message<'a>(
    self,
    message: impl Into<Cow<'a, str>>,
  ) -> ReportBuilder<Src, Cow<'a, str>, Sp> {
    ReportBuilder {
      source: self.source,
      message: message.into(),
      span: self.span,
    }
  }
}

impl<Src, Msg> ReportBuilder<Src, Msg, ()> {
  pub fn span(self, span: impl Into<Span>) -> ReportBuilder<Src, Msg, Span> {
    ReportBuilder {
      source: self.source,
      message: self.message,
      span: span.into(),
    }
  }
}

impl<'a> ReportBuilder<Source<'a>, Cow<'a, str>, Span> {
  pub fn build(self) -> Report<'a> {
    Report {
      source: self.source,
      message: self.message,
      span: self.span,
    }
  }
}

/// A single located error, ready to be emitted to anything which
/// implements [`fmt::Write`].
pub struct Report<'a> {
  pub source: Source<'a>,
  pub message: Cow<'a, str>,
  pub span: Span,
}

impl<'a> Report<'a> {
  pub fn error() -> ReportBuilder<(), (), ()> {
    ReportBuilder {
      source: (),
      message: (),
      span: (),
    }
  }

  /// Emit the report to `w`.
  pub fn emit<W: Write>(self, w: &mut W) -> Result<(), EmitError> {
    if self.span.start > self.source.str().len() {
      return Err(EmitError::OutOfBounds);
    }

    let snippet = Snippet::new(self.source.str(), self.span.start);

    // {line}:{col}: {message}
    writeln!(w, "{}:{}: {}", snippet.line, snippet.col, self.message)?;
    // {offending line}
    writeln!(w, "{}", snippet.text)?;
    // {caret under col}
    write!(w, "{:width$}^", "", width = snippet.col - 1)?;

    Ok(())
  }

  /// Emit the report to a string.
  pub fn emit_to_string(self) -> Result<String, EmitError> {
    let mut buf = String::new();
    self.emit(&mut buf)?;
    Ok(buf)
  }
}

#[derive(Debug, Error)]
pub enum EmitError {
  #[error("failed to format")]
  Fmt(#[from] fmt::Error),
  #[error("span does not fit within source string")]
  OutOfBounds,
}

#[cfg(test)]
mod tests;
