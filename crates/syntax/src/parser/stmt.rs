use super::*;

/// A function takes at most this many positional parameters.
pub(super) const MAX_PARAMS: usize = 6;

impl<'src> Parser<'src> {
  pub(super) fn top_level_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    match self.current().kind {
      Kw_Class => self.class_stmt(),
      Kw_Def => self.func_stmt(),
      _ => self.stmt(),
    }
  }

  fn stmt(&mut self) -> Result<ast::Stmt<'src>> {
    check_recursion_limit(self.current().span)?;
    match self.current().kind {
      Kw_If => self.if_stmt(),
      Kw_While => self.while_stmt(),
      Kw_Return => self.return_stmt(),
      _ => self.assign_stmt(),
    }
  }

  /// Statements up to (not including) the closing `end`.
  fn block(&mut self) -> Result<Vec<ast::Stmt<'src>>> {
    let mut body = vec![];
    while !self.current().is(Kw_End) && !self.current().is(Tok_Eof) {
      body.push(self.stmt()?);
    }
    Ok(body)
  }

  fn if_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    self.expect(Kw_If)?;
    let start = self.previous().span.start;
    let cond = self.expr()?;
    self.expect(Kw_Do)?;
    let body = self.block()?;
    self.expect(Kw_End)?;
    let end = self.previous().span.end;
    Ok(ast::if_stmt(start..end, cond, body))
  }

  fn while_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    self.expect(Kw_While)?;
    let start = self.previous().span.start;
    let cond = self.expr()?;
    self.expect(Kw_Do)?;
    let body = self.block()?;
    self.expect(Kw_End)?;
    let end = self.previous().span.end;
    Ok(ast::while_stmt(start..end, cond, body))
  }

  fn return_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    self.expect(Kw_Return)?;
    let start = self.previous().span.start;
    let value = self.expr()?;
    let end = self.previous().span.end;
    Ok(ast::return_stmt(start..end, value))
  }

  fn assign_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    let target = self.expr()?;

    if self.bump_if(Op_Equal) {
      let target_span = target.span;
      let ast::ExprKind::GetVar(ident) = target.into_inner() else {
        return Err(Error::new("invalid assignment target", target_span));
      };
      let value = self.expr()?;
      return Ok(ast::assign_stmt(*ident, value));
    }

    Ok(ast::expr_stmt(target))
  }

  fn func_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    let start = self.current().span.start;
    let func = self.func(false)?;
    let end = self.previous().span.end;
    Ok(ast::func_stmt(start..end, func))
  }

  pub(super) fn func(&mut self, is_method: bool) -> Result<ast::Func<'src>> {
    self.expect(Kw_Def)?;
    let name = self.ident()?;
    self.expect(Brk_ParenL)?;
    let params = self.func_params()?;
    self.expect(Brk_ParenR)?;

    let ctx = Context {
      current_func: Some(Func { is_method }),
      current_class: if is_method { Some(()) } else { None },
    };
    let body = self.with_ctx(ctx, |p| p.block())?;
    self.expect(Kw_End)?;

    Ok(ast::Func {
      name,
      params,
      body,
      is_method,
    })
  }

  fn func_params(&mut self) -> Result<Vec<ast::Ident<'src>>> {
    let mut params = vec![];
    if self.current().is(Brk_ParenR) {
      return Ok(params);
    }

    params.push(self.ident()?);
    while self.bump_if(Tok_Comma) {
      if params.len() == MAX_PARAMS {
        return Err(Error::new(
          "too many parameters",
          self.current().span,
        ));
      }
      params.push(self.ident()?);
    }
    Ok(params)
  }

  fn class_stmt(&mut self) -> Result<ast::Stmt<'src>> {
    self.expect(Kw_Class)?;
    let start = self.previous().span.start;
    let name = self.ident()?;
    if !name.as_ref().starts_with(|c: char| c.is_ascii_uppercase()) {
      return Err(Error::new(
        "class name must start with an uppercase letter",
        name.span,
      ));
    }

    let ctx = Context {
      current_func: None,
      current_class: Some(()),
    };
    let methods = self.with_ctx(ctx, |p| {
      let mut methods = vec![];
      while p.current().is(Kw_Def) {
        methods.push(p.func(true)?);
      }
      Ok(methods)
    })?;
    self.expect(Kw_End)?;
    let end = self.previous().span.end;

    Ok(ast::class_stmt(start..end, name, methods))
  }
}
