use super::*;

impl<'src> Parser<'src> {
  pub(super) fn expr(&mut self) -> Result<ast::Expr<'src>> {
    self.eq_expr()
  }

  fn eq_expr(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.comp_expr()?;
    loop {
      let op = match self.current().kind {
        Op_EqualEqual => ast::BinaryOp::Eq,
        Op_BangEqual => ast::BinaryOp::Neq,
        _ => break,
      };
      self.bump(); // bump operator
      let right = self.comp_expr()?;
      left = ast::expr_binary(left.span.start..right.span.end, op, left, right);
    }
    Ok(left)
  }

  fn comp_expr(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.add_expr()?;
    loop {
      let op = match self.current().kind {
        Op_Less => ast::BinaryOp::Less,
        Op_More => ast::BinaryOp::Greater,
        _ => break,
      };
      self.bump(); // bump operator
      let right = self.add_expr()?;
      left = ast::expr_binary(left.span.start..right.span.end, op, left, right);
    }
    Ok(left)
  }

  fn add_expr(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.mul_expr()?;
    loop {
      let op = match self.current().kind {
        Op_Plus => ast::BinaryOp::Add,
        Op_Minus => ast::BinaryOp::Sub,
        _ => break,
      };
      self.bump(); // bump operator
      let right = self.mul_expr()?;
      left = ast::expr_binary(left.span.start..right.span.end, op, left, right);
    }
    Ok(left)
  }

  fn mul_expr(&mut self) -> Result<ast::Expr<'src>> {
    let mut left = self.atom()?;
    loop {
      let op = match self.current().kind {
        Op_Star => ast::BinaryOp::Mul,
        Op_Slash => ast::BinaryOp::Div,
        _ => break,
      };
      self.bump(); // bump operator
      let right = self.atom()?;
      left = ast::expr_binary(left.span.start..right.span.end, op, left, right);
    }
    Ok(left)
  }

  fn atom(&mut self) -> Result<ast::Expr<'src>> {
    check_recursion_limit(self.current().span)?;
    self.check_unknown_token()?;

    if self.current().is(Lit_Num) {
      return self.num_expr();
    }

    if self.bump_if(Lit_Bool) {
      let token = self.previous();
      return Ok(ast::lit::bool(token.span, self.lex.lexeme(token)));
    }

    if self.current().is(Kw_Self) {
      return self.self_expr();
    }

    if self.current().is(Lit_Ident) {
      return self.ident_expr();
    }

    Err(Error::new("unexpected token", self.current().span))
  }

  fn num_expr(&mut self) -> Result<ast::Expr<'src>> {
    self.expect(Lit_Num)?;
    let token = self.previous().clone();
    if !self.bump_if(Op_Range) {
      return ast::lit::int(token.span, self.lex.lexeme(&token));
    }

    let from = ast::lit::num(token.span, self.lex.lexeme(&token))?;
    self.expect(Lit_Num)?;
    let to_token = self.previous().clone();
    let to = ast::lit::num(to_token.span, self.lex.lexeme(&to_token))?;
    Ok(ast::lit::range(token.span.join(to_token.span), from, to))
  }

  fn self_expr(&mut self) -> Result<ast::Expr<'src>> {
    self.expect(Kw_Self)?;
    let start = self.previous().span;
    if self.ctx.current_class.is_none()
      || !matches!(self.ctx.current_func, Some(Func { is_method: true }))
    {
      return Err(Error::new(
        "cannot access `self` outside of a method",
        start,
      ));
    }

    self.expect(Op_Dot)?;
    let name = self.ident()?;
    let mut ident = ast::IdentExpr {
      is_self: true,
      ..ast::IdentExpr::var(name)
    };
    if self.bump_if(Tok_Colon) {
      let (val_type, val_limit) = self.type_marker()?;
      ident.val_type = val_type;
      ident.val_limit = val_limit;
    }

    let end = self.previous().span;
    Ok(ast::Expr::new(
      start.join(end),
      ast::ExprKind::GetVar(Box::new(ident)),
    ))
  }

  fn type_marker(&mut self) -> Result<(ast::ValType, Option<ast::RangeLit>)> {
    if self.bump_if(Ty_Number) {
      return Ok((ast::ValType::Num, None));
    }
    if self.bump_if(Ty_Bool) {
      return Ok((ast::ValType::Bool, None));
    }

    self.expect(Brk_CurlyL)?;
    let val_type = if self.bump_if(Ty_Include) {
      ast::ValType::Include
    } else if self.bump_if(Ty_Exclude) {
      ast::ValType::Exclude
    } else {
      return Err(Error::new(
        "expected `#include` or `#exclude`",
        self.current().span,
      ));
    };
    self.expect(Tok_Colon)?;
    let limit = self.range_limit()?;
    self.expect(Brk_CurlyR)?;
    Ok((val_type, Some(limit)))
  }

  fn range_limit(&mut self) -> Result<ast::RangeLit> {
    self.expect(Lit_Num)?;
    let token = self.previous().clone();
    let from = ast::lit::num(token.span, self.lex.lexeme(&token))?;
    self.expect(Op_Range)?;
    self.expect(Lit_Num)?;
    let token = self.previous().clone();
    let to = ast::lit::num(token.span, self.lex.lexeme(&token))?;
    Ok(ast::RangeLit { from, to })
  }

  fn ident_expr(&mut self) -> Result<ast::Expr<'src>> {
    let name = self.ident()?;

    let mut expr = if self.current().is(Brk_ParenL) {
      let start = name.span;
      let callee = ast::IdentExpr::func(name);
      let args = self.call_args()?;
      ast::expr_call(start.join(self.previous().span), callee, args)
    } else {
      ast::expr_get_var(ast::IdentExpr::var(name))
    };

    // method calls chain off the receiver: `counter.bump()`
    while self.bump_if(Op_Dot) {
      let name = self.ident()?;
      if !self.current().is(Brk_ParenL) {
        return Err(Error::new("expected a method call", self.current().span));
      }
      let start = name.span;
      let callee = ast::IdentExpr::func(name);
      let args = self.call_args()?;
      let call = ast::expr_call(start.join(self.previous().span), callee, args);
      expr = ast::expr_call_method(expr, call);
    }

    Ok(expr)
  }

  fn call_args(&mut self) -> Result<Vec<ast::Expr<'src>>> {
    let mut args = vec![];
    self.expect(Brk_ParenL)?;
    if !self.current().is(Brk_ParenR) {
      args.push(self.expr()?);
      while self.bump_if(Tok_Comma) && !self.current().is(Brk_ParenR) {
        args.push(self.expr()?);
      }
    }
    self.expect(Brk_ParenR)?;
    Ok(args)
  }
}
