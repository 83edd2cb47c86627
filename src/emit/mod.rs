//! Lowering from the syntax tree to bytecode.
//!
//! The compiler owns a stack of compilation scopes. Each scope pairs an
//! instruction builder with a symbol frame; the bottom scope is the
//! program top level and every function body pushes a child scope. Only
//! the top scope's builder is written to, and a function scope's buffer
//! is snapshotted into a [`Function`] constant when the scope is left.

pub mod error;
mod expr;
mod stmt;
pub mod table;

pub use error::{Error, ErrorKind, Result};

use syntax::ast;
use tracing::debug;

use crate::bytecode::builder::BytecodeBuilder;
use crate::bytecode::opcode::symbolic::*;
use crate::bytecode::opcode::{Count, Index, MethodId, Slot};
use crate::container::Program;
use crate::pool::{Class, Constant, Function, PoolTarget};
use table::{ClassTable, MethodTable, Symbol, SymbolFrame, SymbolScope};

/// Lower a parsed module into a serialisable [`Program`].
pub fn emit<'src>(module: &'src ast::Module<'src>) -> Result<Program> {
  let mut compiler = Compiler::new();
  for stmt in module.body.iter() {
    compiler.emit_stmt(stmt)?;
  }
  compiler.finish()
}

struct Scope<'src> {
  builder: BytecodeBuilder,
  symbols: SymbolFrame<'src>,
}

struct Compiler<'src> {
  scopes: Vec<Scope<'src>>,
  constants: Vec<Constant>,
  class_pool: Vec<Class>,
  classes: ClassTable<'src>,
  methods: MethodTable<'src>,
  pool_target: PoolTarget,
  functions: usize,
}

impl<'src> Compiler<'src> {
  fn new() -> Self {
    Compiler {
      scopes: vec![Scope {
        builder: BytecodeBuilder::new(),
        symbols: SymbolFrame::global(),
      }],
      constants: Vec::new(),
      class_pool: Vec::new(),
      classes: ClassTable::new(),
      methods: MethodTable::new(),
      pool_target: PoolTarget::Global,
      functions: 0,
    }
  }

  fn finish(mut self) -> Result<Program> {
    self.builder().emit(Done);

    let scope = self.scopes.pop().expect("scope stack is never empty");
    debug!(
      constants = self.constants.len(),
      classes = self.class_pool.len(),
      "finished lowering"
    );

    Ok(Program {
      classes: self.class_pool,
      constants: self.constants,
      instructions: scope.builder.finish(),
    })
  }

  fn builder(&mut self) -> &mut BytecodeBuilder {
    let top = self.scopes.len() - 1;
    &mut self.scopes[top].builder
  }

  fn frame(&mut self) -> &mut SymbolFrame<'src> {
    let top = self.scopes.len() - 1;
    &mut self.scopes[top].symbols
  }

  fn enter_scope(&mut self) {
    self.scopes.push(Scope {
      builder: BytecodeBuilder::new(),
      symbols: SymbolFrame::local(),
    });
  }

  fn leave_scope(&mut self) -> Vec<u8> {
    let scope = self.scopes.pop().expect("scope stack is never empty");
    scope.builder.finish()
  }

  /// Rvalue resolution: the current frame first, and on a miss inside a
  /// function scope the bottom frame exactly once.
  fn resolve(&self, name: &str) -> Option<Symbol> {
    let top = self.scopes.len() - 1;
    match self.scopes[top].symbols.resolve(name) {
      Some(symbol) => Some(symbol),
      None if top > 0 => self.scopes[0].symbols.resolve(name),
      None => None,
    }
  }

  /// Appends to the pool selected by `pool_target` and returns the
  /// post-push length: the first constant of every pool has index 1.
  fn add_constant(&mut self, constant: Constant) -> Index {
    let pool = match self.pool_target {
      PoolTarget::Global => &mut self.constants,
      PoolTarget::Class(index) => &mut self.class_pool[index].constants,
    };
    pool.push(constant);
    Index(pool.len() as u16)
  }

  fn next_function_id(&mut self) -> usize {
    let id = self.functions;
    self.functions += 1;
    id
  }
}
