use std::ops::Deref;

use super::*;

impl<'src> Compiler<'src> {
  pub(super) fn emit_expr(&mut self, expr: &'src ast::Expr<'src>) -> Result<()> {
    match expr.deref() {
      ast::ExprKind::Int(v) => self.emit_int(*v),
      ast::ExprKind::Bool(v) => self.emit_bool(*v),
      ast::ExprKind::Range(_) => Err(Error::new(
        "range literal is only allowed in a type marker",
        expr.span,
      )),
      ast::ExprKind::GetVar(v) => self.emit_get_var(v, expr.span),
      ast::ExprKind::Binary(v) => self.emit_binary_expr(v),
      ast::ExprKind::Call(v) => self.emit_call_expr(v),
      ast::ExprKind::Instance(v) => self.emit_instance_expr(v),
      ast::ExprKind::CallMethod(v) => self.emit_call_method_expr(v),
    }
  }

  fn emit_int(&mut self, value: u16) -> Result<()> {
    let index = self.add_constant(Constant::Int(value));
    self.builder().emit(LoadConst { index });
    Ok(())
  }

  // the constant pool is closed over integers and functions, so booleans
  // are stored as 1 and 0
  fn emit_bool(&mut self, value: bool) -> Result<()> {
    self.emit_int(value as u16)
  }

  fn emit_binary_expr(&mut self, expr: &'src ast::Binary<'src>) -> Result<()> {
    self.emit_expr(&expr.left)?;
    self.emit_expr(&expr.right)?;
    match expr.op {
      ast::BinaryOp::Add => self.builder().emit(Add),
      ast::BinaryOp::Sub => self.builder().emit(Sub),
      ast::BinaryOp::Mul => self.builder().emit(Mul),
      ast::BinaryOp::Div => self.builder().emit(Div),
      ast::BinaryOp::Eq => self.builder().emit(Eq),
      ast::BinaryOp::Neq => self.builder().emit(Neq),
      ast::BinaryOp::Less => self.builder().emit(Less),
      ast::BinaryOp::Greater => self.builder().emit(Greater),
    }
    Ok(())
  }

  fn emit_get_var(&mut self, ident: &'src ast::IdentExpr<'src>, span: span::Span) -> Result<()> {
    if ident.is_self {
      return self.emit_load_instance_var(ident, span);
    }

    let Some(symbol) = self.resolve(ident.name.as_ref()) else {
      return Err(Error::unresolved(ident.name.as_ref(), span));
    };
    self.emit_load(symbol);
    Ok(())
  }

  fn emit_load(&mut self, symbol: Symbol) {
    match symbol.scope {
      SymbolScope::Global => self.builder().emit(LoadGlobal {
        slot: Slot(symbol.index),
      }),
      SymbolScope::Local => self.builder().emit(LoadLocal {
        slot: Slot(symbol.index),
      }),
    }
  }

  fn emit_load_instance_var(
    &mut self,
    ident: &'src ast::IdentExpr<'src>,
    span: span::Span,
  ) -> Result<()> {
    let PoolTarget::Class(class) = self.pool_target else {
      return Err(Error::new(
        "cannot access `self` outside of a class method",
        span,
      ));
    };

    let name = ident.name.as_ref();
    let Some(ivar) = self.classes.entry(class).resolve_instance_var(name) else {
      return Err(Error::unresolved(&format!("self.{name}"), span));
    };
    self.builder().emit(LoadInstanceVar {
      slot: Slot(ivar.index),
    });
    Ok(())
  }

  /// Calls resolve their callee for diagnostics, but the instruction
  /// stream names no target: only the arguments are materialised.
  fn emit_call_expr(&mut self, call: &'src ast::Call<'src>) -> Result<()> {
    let name = call.callee.name.as_ref();
    if self.resolve(name).is_none() {
      return Err(Error::unresolved(name, call.callee.name.span));
    }

    for arg in call.args.iter() {
      self.emit_expr(arg)?;
    }
    self.builder().emit(Call {
      argc: Count(call.args.len() as u8),
    });
    Ok(())
  }

  /// `Foo()` checks the class table and lowers its arguments; no
  /// instruction exists for instantiation.
  fn emit_instance_expr(&mut self, call: &'src ast::Call<'src>) -> Result<()> {
    let name = call.callee.name.as_ref();
    if self.classes.resolve(name).is_none() {
      return Err(Error::unresolved(name, call.callee.name.span));
    }

    for arg in call.args.iter() {
      self.emit_expr(arg)?;
    }
    Ok(())
  }

  fn emit_call_method_expr(&mut self, expr: &'src ast::CallMethod<'src>) -> Result<()> {
    self.emit_expr(&expr.receiver)?;

    let ast::ExprKind::Call(call) = expr.call.deref() else {
      return Err(Error::new("expected a method call", expr.call.span));
    };
    for arg in call.args.iter() {
      self.emit_expr(arg)?;
    }
    let id = self.methods.id(call.callee.name.clone().into_inner());
    self.builder().emit(CallMethod {
      method: MethodId(id),
    });
    Ok(())
  }
}
