//! Typed constants and the class pool.
//!
//! Pools are append-only and never deduplicated: adding the same integer
//! twice produces two entries. Instruction operands index pools 1-based
//! (see [`crate::emit`]).

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constant {
  Int(u16),
  Function(Function),
}

/// A compiled function body, snapshotted from its scope's instruction
/// buffer when the scope is left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
  pub id: usize,
  pub instructions: Vec<u8>,
  pub num_args: u8,
}

/// One class-pool entry. Methods and the literals inside them land in the
/// class's private constant sub-pool instead of the global pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
  pub name: String,
  pub index: u8,
  pub num_instance_vars: u8,
  pub num_methods: u8,
  pub constants: Vec<Constant>,
}

impl Class {
  pub fn new(name: impl Into<String>, index: u8) -> Self {
    Class {
      name: name.into(),
      index,
      num_instance_vars: 0,
      num_methods: 0,
      constants: Vec::new(),
    }
  }
}

/// Where `add_constant` currently appends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PoolTarget {
  #[default]
  Global,
  Class(usize),
}

impl fmt::Display for Constant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Constant::Int(v) => write!(f, "{v}"),
      Constant::Function(v) => write!(f, "<function {}>", v.id),
    }
  }
}
