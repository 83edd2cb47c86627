use std::ops::Deref;

use super::*;

impl<'src> Compiler<'src> {
  pub(super) fn emit_stmt(&mut self, stmt: &'src ast::Stmt<'src>) -> Result<()> {
    match stmt.deref() {
      ast::StmtKind::Assign(v) => self.emit_assign_stmt(v),
      ast::StmtKind::If(v) => self.emit_if_stmt(v),
      ast::StmtKind::While(v) => self.emit_while_stmt(v),
      ast::StmtKind::Return(v) => self.emit_return_stmt(v),
      ast::StmtKind::Func(v) => self.emit_func_stmt(v),
      ast::StmtKind::Class(v) => self.emit_class_stmt(v),
      ast::StmtKind::Expr(v) => self.emit_expr(v),
    }
  }

  fn emit_stmt_list(&mut self, list: &'src [ast::Stmt<'src>]) -> Result<()> {
    for stmt in list {
      self.emit_stmt(stmt)?;
    }
    Ok(())
  }

  /// Assignment resolves in the current frame only: a name first assigned
  /// inside a function always becomes a local, even if a global of the
  /// same name exists.
  fn emit_assign_stmt(&mut self, stmt: &'src ast::Assign<'src>) -> Result<()> {
    self.emit_expr(&stmt.value)?;

    if stmt.target.is_self {
      return self.emit_store_instance_var(&stmt.target);
    }

    let name = stmt.target.name.clone().into_inner();
    let frame = self.frame();
    let symbol = match frame.resolve(name.as_ref()) {
      Some(symbol) => symbol,
      None => frame.define(name),
    };
    self.emit_store(symbol);
    Ok(())
  }

  fn emit_store(&mut self, symbol: Symbol) {
    match symbol.scope {
      SymbolScope::Global => self.builder().emit(StoreGlobal {
        slot: Slot(symbol.index),
      }),
      SymbolScope::Local => self.builder().emit(StoreLocal {
        slot: Slot(symbol.index),
      }),
    }
  }

  fn emit_store_instance_var(&mut self, target: &'src ast::IdentExpr<'src>) -> Result<()> {
    let PoolTarget::Class(class) = self.pool_target else {
      return Err(Error::new(
        "cannot assign `self` outside of a class method",
        target.name.span,
      ));
    };

    let name = target.name.clone().into_inner();
    let entry = self.classes.entry_mut(class);
    let ivar = entry.define_instance_var(name);
    if target.val_type != ast::ValType::Any {
      ivar.val_type = target.val_type;
      ivar.val_limit = target.val_limit;
    }
    let slot = ivar.index;
    let count = entry.instance_vars.len() as u8;

    self.class_pool[class].num_instance_vars = count;
    self.builder().emit(StoreInstanceVar { slot: Slot(slot) });
    Ok(())
  }

  fn emit_if_stmt(&mut self, stmt: &'src ast::If<'src>) -> Result<()> {
    let end = self.builder().label("end");

    self.emit_expr(&stmt.cond)?;
    self.builder().emit_jump_if_false(&end);
    self.emit_stmt_list(&stmt.body)?;
    self.builder().bind_label(end);
    Ok(())
  }

  fn emit_while_stmt(&mut self, stmt: &'src ast::While<'src>) -> Result<()> {
    let header = self.builder().loop_header();
    let end = self.builder().label("end");

    self.emit_expr(&stmt.cond)?;
    self.builder().emit_jump_if_false(&end);
    self.emit_stmt_list(&stmt.body)?;
    self.builder().emit_jump_loop(&header);
    self.builder().bind_label(end);
    Ok(())
  }

  fn emit_return_stmt(&mut self, stmt: &'src ast::Return<'src>) -> Result<()> {
    self.emit_expr(&stmt.value)?;
    self.builder().emit(Return);
    Ok(())
  }

  fn emit_func_stmt(&mut self, stmt: &'src ast::Func<'src>) -> Result<()> {
    // the name is bound before the body so the function can call itself
    let name = stmt.name.clone().into_inner();
    let frame = self.frame();
    let symbol = match frame.resolve(name.as_ref()) {
      Some(symbol) => symbol,
      None => frame.define(name),
    };

    let function = self.emit_function(stmt)?;
    let index = self.add_constant(Constant::Function(function));
    self.builder().emit(LoadConst { index });
    self.emit_store(symbol);
    Ok(())
  }

  fn emit_function(&mut self, stmt: &'src ast::Func<'src>) -> Result<Function> {
    self.enter_scope();
    for param in stmt.params.iter() {
      self.frame().define(param.clone().into_inner());
    }
    self.emit_stmt_list(&stmt.body)?;
    let instructions = self.leave_scope();

    Ok(Function {
      id: self.next_function_id(),
      instructions,
      num_args: stmt.params.len() as u8,
    })
  }

  fn emit_class_stmt(&mut self, stmt: &'src ast::Class<'src>) -> Result<()> {
    let index = self.classes.define(stmt.name.clone().into_inner());
    self.class_pool.push(Class::new(stmt.name.to_string(), index as u8));

    // method bodies write their constants into the class's private pool
    let previous = std::mem::replace(&mut self.pool_target, PoolTarget::Class(index));
    for method in stmt.methods.iter() {
      self.emit_method(index, method)?;
    }
    self.pool_target = previous;
    Ok(())
  }

  /// Methods become `Function` constants in the enclosing class's
  /// sub-pool; nothing is emitted in the current instruction stream.
  fn emit_method(&mut self, class: usize, stmt: &'src ast::Func<'src>) -> Result<()> {
    self.methods.id(stmt.name.clone().into_inner());
    if stmt.name.as_ref() == "init" {
      self.classes.entry_mut(class).has_init = true;
    }

    let function = self.emit_function(stmt)?;
    self.add_constant(Constant::Function(function));
    self.class_pool[class].num_methods += 1;
    Ok(())
  }
}
