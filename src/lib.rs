//! Ahead-of-time compiler for the T language.
//!
//! The pipeline is a straight line: the source text is lexed and parsed
//! into a syntax tree ([`syntax`]), lowered into stack bytecode with a
//! typed constant pool and an optional class pool ([`emit`]), and packed
//! into a byte-accurate container rendered as lowercase hex
//! ([`container`]).
//!
//! ```
//! let hex = tarto::compile("1 + 2").unwrap();
//! assert!(hex.starts_with("ffffffff"));
//! ```

pub mod bytecode;
pub mod container;
pub mod emit;
pub mod pool;

pub use container::Program;
pub use syntax::{ast, parse};

use tracing::debug;

/// Any error the pipeline can stop with. Each stage keeps its own kind
/// and span; both render the same two-line diagnostic.
#[derive(Clone, Debug)]
pub enum Error {
  Syntax(syntax::Error),
  Emit(emit::Error),
}

impl Error {
  pub fn span(&self) -> span::Span {
    match self {
      Error::Syntax(e) => e.span,
      Error::Emit(e) => e.span,
    }
  }

  /// Renders `LINE:COL: message`, the offending line, and a caret.
  pub fn report<'a>(&self, source: impl Into<diag::Source<'a>>) -> String {
    match self {
      Error::Syntax(e) => e.report(source),
      Error::Emit(e) => e.report(source),
    }
  }
}

impl From<syntax::Error> for Error {
  fn from(value: syntax::Error) -> Self {
    Error::Syntax(value)
  }
}

impl From<emit::Error> for Error {
  fn from(value: emit::Error) -> Self {
    Error::Emit(value)
  }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::Syntax(e) => std::fmt::Display::fmt(e, f),
      Error::Emit(e) => std::fmt::Display::fmt(e, f),
    }
  }
}

/// Compile a program text to its hex-encoded container.
pub fn compile(src: &str) -> Result<String, Error> {
  Ok(compile_program(src)?.to_hex())
}

/// Compile a program text to its container, before hex encoding.
pub fn compile_program(src: &str) -> Result<Program, Error> {
  let module = syntax::parse(src)?;
  debug!(statements = module.body.len(), "parsed module");

  let program = emit::emit(&module)?;
  debug!(
    classes = program.classes.len(),
    constants = program.constants.len(),
    instructions = program.instructions.len(),
    "lowered module"
  );

  Ok(program)
}
