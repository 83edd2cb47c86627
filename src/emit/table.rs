//! Name resolution tables: symbol frames, the class table and the method
//! table.

use beef::lean::Cow;
use indexmap::IndexMap;
use syntax::ast::{RangeLit, ValType};

/// Whether a name binds in the program's bottom frame or a function frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymbolScope {
  #[default]
  Global,
  Local,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbol {
  pub scope: SymbolScope,
  pub index: u8,
}

/// One frame of the symbol table. Indices are dense, assigned in order of
/// first definition, and never shift.
#[derive(Default)]
pub struct SymbolFrame<'src> {
  store: IndexMap<Cow<'src, str>, Symbol>,
  scope: SymbolScope,
}

impl<'src> SymbolFrame<'src> {
  pub fn global() -> Self {
    SymbolFrame {
      store: IndexMap::new(),
      scope: SymbolScope::Global,
    }
  }

  pub fn local() -> Self {
    SymbolFrame {
      store: IndexMap::new(),
      scope: SymbolScope::Local,
    }
  }

  pub fn define(&mut self, name: Cow<'src, str>) -> Symbol {
    let symbol = Symbol {
      scope: self.scope,
      index: self.store.len() as u8,
    };
    self.store.insert(name, symbol);
    symbol
  }

  /// Looks at this frame only.
  pub fn resolve(&self, name: &str) -> Option<Symbol> {
    self.store.get(name).copied()
  }

  pub fn len(&self) -> usize {
    self.store.len()
  }

  pub fn is_empty(&self) -> bool {
    self.store.is_empty()
  }
}

/// An instance variable slot, together with the value constraint recorded
/// from a type marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceVar {
  pub index: u8,
  pub val_type: ValType,
  pub val_limit: Option<RangeLit>,
}

pub struct ClassEntry<'src> {
  pub index: usize,
  pub instance_vars: IndexMap<Cow<'src, str>, InstanceVar>,
  pub has_init: bool,
}

impl<'src> ClassEntry<'src> {
  /// Defines `name` on first sight, then returns the slot for constraint
  /// updates.
  pub fn define_instance_var(&mut self, name: Cow<'src, str>) -> &mut InstanceVar {
    let index = self.instance_vars.len() as u8;
    self.instance_vars.entry(name).or_insert(InstanceVar {
      index,
      val_type: ValType::Any,
      val_limit: None,
    })
  }

  pub fn resolve_instance_var(&self, name: &str) -> Option<InstanceVar> {
    self.instance_vars.get(name).copied()
  }
}

/// Classes in definition order.
#[derive(Default)]
pub struct ClassTable<'src> {
  store: IndexMap<Cow<'src, str>, ClassEntry<'src>>,
}

impl<'src> ClassTable<'src> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn define(&mut self, name: Cow<'src, str>) -> usize {
    let index = self.store.len();
    self.store.insert(
      name,
      ClassEntry {
        index,
        instance_vars: IndexMap::new(),
        has_init: false,
      },
    );
    index
  }

  pub fn resolve(&self, name: &str) -> Option<&ClassEntry<'src>> {
    self.store.get(name)
  }

  pub fn entry_mut(&mut self, index: usize) -> &mut ClassEntry<'src> {
    let (_, entry) = self
      .store
      .get_index_mut(index)
      .expect("class table entry out of bounds");
    entry
  }

  pub fn entry(&self, index: usize) -> &ClassEntry<'src> {
    let (_, entry) = self
      .store
      .get_index(index)
      .expect("class table entry out of bounds");
    entry
  }
}

/// Method names to ids. Id 0 is reserved for the constructor name `init`;
/// other ids are assigned on first reference.
pub struct MethodTable<'src> {
  store: IndexMap<Cow<'src, str>, u8>,
}

impl<'src> MethodTable<'src> {
  pub fn new() -> Self {
    let mut store = IndexMap::new();
    store.insert(Cow::borrowed("init"), 0);
    MethodTable { store }
  }

  pub fn id(&mut self, name: Cow<'src, str>) -> u8 {
    if let Some(id) = self.store.get(name.as_ref()) {
      return *id;
    }
    let id = self.store.len() as u8;
    self.store.insert(name, id);
    id
  }
}

impl<'src> Default for MethodTable<'src> {
  fn default() -> Self {
    Self::new()
  }
}
