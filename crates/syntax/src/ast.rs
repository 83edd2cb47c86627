use std::fmt;

use beef::lean::Cow;
use span::{Span, Spanned};

use crate::{Error, Result};

pub type Ident<'src> = Spanned<Cow<'src, str>>;

/// One parsed program: a flat list of top-level statements. Bare
/// expressions appear wrapped in [`StmtKind::Expr`].
#[derive(Debug, PartialEq, Eq)]
pub struct Module<'src> {
  pub body: Vec<Stmt<'src>>,
}

impl<'src> Module<'src> {
  pub fn new() -> Self {
    Self { body: vec![] }
  }
}

impl<'src> Default for Module<'src> {
  fn default() -> Self {
    Self::new()
  }
}

pub type Stmt<'src> = Spanned<StmtKind<'src>>;

#[derive(Debug, PartialEq, Eq)]
pub enum StmtKind<'src> {
  Assign(Box<Assign<'src>>),
  If(Box<If<'src>>),
  While(Box<While<'src>>),
  Return(Box<Return<'src>>),
  Func(Box<Func<'src>>),
  Class(Box<Class<'src>>),
  Expr(Box<Expr<'src>>),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Assign<'src> {
  pub target: IdentExpr<'src>,
  pub value: Expr<'src>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct If<'src> {
  pub cond: Expr<'src>,
  pub body: Vec<Stmt<'src>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct While<'src> {
  pub cond: Expr<'src>,
  pub body: Vec<Stmt<'src>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Return<'src> {
  pub value: Expr<'src>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Func<'src> {
  pub name: Ident<'src>,
  pub params: Vec<Ident<'src>>,
  pub body: Vec<Stmt<'src>>,
  pub is_method: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Class<'src> {
  pub name: Ident<'src>,
  pub methods: Vec<Func<'src>>,
}

pub type Expr<'src> = Spanned<ExprKind<'src>>;

#[derive(Debug, PartialEq, Eq)]
pub enum ExprKind<'src> {
  Int(u16),
  Bool(bool),
  Range(Box<RangeLit>),
  GetVar(Box<IdentExpr<'src>>),
  Binary(Box<Binary<'src>>),
  Call(Box<Call<'src>>),
  /// Same shape as [`ExprKind::Call`], but the callee name starts with an
  /// uppercase letter.
  Instance(Box<Call<'src>>),
  CallMethod(Box<CallMethod<'src>>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeLit {
  pub from: u16,
  pub to: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentKind {
  Var,
  Func,
}

/// Value constraint attached to an instance variable by a type marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValType {
  #[default]
  Any,
  Num,
  Bool,
  Include,
  Exclude,
}

#[derive(Debug, PartialEq, Eq)]
pub struct IdentExpr<'src> {
  pub kind: IdentKind,
  pub name: Ident<'src>,
  pub is_self: bool,
  pub val_type: ValType,
  pub val_limit: Option<RangeLit>,
}

impl<'src> IdentExpr<'src> {
  pub fn var(name: Ident<'src>) -> Self {
    IdentExpr {
      kind: IdentKind::Var,
      name,
      is_self: false,
      val_type: ValType::Any,
      val_limit: None,
    }
  }

  pub fn func(name: Ident<'src>) -> Self {
    IdentExpr {
      kind: IdentKind::Func,
      ..IdentExpr::var(name)
    }
  }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Binary<'src> {
  pub op: BinaryOp,
  pub left: Expr<'src>,
  pub right: Expr<'src>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Eq,
  Neq,
  Less,
  Greater,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Call<'src> {
  pub callee: IdentExpr<'src>,
  pub args: Vec<Expr<'src>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CallMethod<'src> {
  pub receiver: Expr<'src>,
  pub call: Expr<'src>,
}

pub fn assign_stmt<'src>(target: IdentExpr<'src>, value: Expr<'src>) -> Stmt<'src> {
  Stmt::new(
    target.name.span.start..value.span.end,
    StmtKind::Assign(Box::new(Assign { target, value })),
  )
}

pub fn if_stmt<'src>(s: impl Into<Span>, cond: Expr<'src>, body: Vec<Stmt<'src>>) -> Stmt<'src> {
  Stmt::new(s, StmtKind::If(Box::new(If { cond, body })))
}

pub fn while_stmt<'src>(s: impl Into<Span>, cond: Expr<'src>, body: Vec<Stmt<'src>>) -> Stmt<'src> {
  Stmt::new(s, StmtKind::While(Box::new(While { cond, body })))
}

pub fn return_stmt(s: impl Into<Span>, value: Expr) -> Stmt {
  Stmt::new(s, StmtKind::Return(Box::new(Return { value })))
}

pub fn func_stmt(s: impl Into<Span>, func: Func) -> Stmt {
  Stmt::new(s, StmtKind::Func(Box::new(func)))
}

pub fn class_stmt<'src>(
  s: impl Into<Span>,
  name: Ident<'src>,
  methods: Vec<Func<'src>>,
) -> Stmt<'src> {
  Stmt::new(s, StmtKind::Class(Box::new(Class { name, methods })))
}

pub fn expr_stmt(expr: Expr) -> Stmt {
  Stmt::new(expr.span, StmtKind::Expr(Box::new(expr)))
}

pub fn expr_binary<'src>(
  s: impl Into<Span>,
  op: BinaryOp,
  left: Expr<'src>,
  right: Expr<'src>,
) -> Expr<'src> {
  Expr::new(s, ExprKind::Binary(Box::new(Binary { op, left, right })))
}

pub fn expr_get_var(ident: IdentExpr) -> Expr {
  let span = ident.name.span;
  Expr::new(span, ExprKind::GetVar(Box::new(ident)))
}

pub fn expr_call<'src>(
  s: impl Into<Span>,
  callee: IdentExpr<'src>,
  args: Vec<Expr<'src>>,
) -> Expr<'src> {
  let call = Box::new(Call { callee, args });
  let s = s.into();
  // `Foo()` instantiates, `foo()` calls
  if call
    .callee
    .name
    .as_ref()
    .starts_with(|c: char| c.is_ascii_uppercase())
  {
    Expr::new(s, ExprKind::Instance(call))
  } else {
    Expr::new(s, ExprKind::Call(call))
  }
}

pub fn expr_call_method<'src>(receiver: Expr<'src>, call: Expr<'src>) -> Expr<'src> {
  Expr::new(
    receiver.span.start..call.span.end,
    ExprKind::CallMethod(Box::new(CallMethod { receiver, call })),
  )
}

pub mod lit {
  use super::*;

  /// Parses a digit run as a `u16`. Anything outside `[0, 65536)` is a
  /// constant error at the literal's span.
  pub fn num(s: impl Into<Span>, lexeme: &str) -> Result<u16> {
    let s = s.into();
    lexeme
      .parse::<u16>()
      .map_err(|_| Error::constant("integer constant out of range", s))
  }

  pub fn int<'src>(s: impl Into<Span>, lexeme: &str) -> Result<Expr<'src>> {
    let s = s.into();
    Ok(Expr::new(s, ExprKind::Int(num(s, lexeme)?)))
  }

  pub fn bool<'src>(s: impl Into<Span>, lexeme: &str) -> Expr<'src> {
    let v = match lexeme {
      "true" => true,
      "false" => false,
      _ => unreachable!("bool is only ever `true` or `false`"),
    };
    Expr::new(s, ExprKind::Bool(v))
  }

  pub fn range<'src>(s: impl Into<Span>, from: u16, to: u16) -> Expr<'src> {
    Expr::new(s, ExprKind::Range(Box::new(RangeLit { from, to })))
  }
}

impl fmt::Display for BinaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let op = match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Eq => "==",
      BinaryOp::Neq => "!=",
      BinaryOp::Less => "<",
      BinaryOp::Greater => ">",
    };
    write!(f, "{op}")
  }
}

// The renderings below mirror the tree shapes the tests assert on, e.g.
// `(1 + (2 * 3))` for nested infix expressions.

impl<'src> fmt::Display for IdentExpr<'src> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_self {
      write!(f, "self.{}", self.name)
    } else {
      write!(f, "{}", self.name)
    }
  }
}

impl<'src> fmt::Display for ExprKind<'src> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ExprKind::Int(v) => write!(f, "{v}"),
      ExprKind::Bool(v) => write!(f, "{v}"),
      ExprKind::Range(v) => write!(f, "{}..{}", v.from, v.to),
      ExprKind::GetVar(v) => write!(f, "{v}"),
      ExprKind::Binary(v) => write!(f, "({} {} {})", v.left, v.op, v.right),
      ExprKind::Call(v) | ExprKind::Instance(v) => {
        write!(f, "{}(", v.callee)?;
        for (i, arg) in v.args.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{arg}")?;
        }
        write!(f, ")")
      }
      ExprKind::CallMethod(v) => write!(f, "{}.{}", v.receiver, v.call),
    }
  }
}

impl<'src> fmt::Display for StmtKind<'src> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StmtKind::Assign(v) => write!(f, "{} = {}", v.target, v.value),
      StmtKind::If(v) => {
        writeln!(f, "if {} then", v.cond)?;
        for stmt in v.body.iter() {
          writeln!(f, "  {stmt}")?;
        }
        write!(f, "end")
      }
      StmtKind::While(v) => {
        writeln!(f, "while {} do", v.cond)?;
        for stmt in v.body.iter() {
          writeln!(f, "  {stmt}")?;
        }
        write!(f, "end")
      }
      StmtKind::Return(v) => write!(f, "return {}", v.value),
      StmtKind::Func(v) => {
        write!(f, "def {}(", v.name)?;
        for (i, param) in v.params.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{param}")?;
        }
        writeln!(f, ")")?;
        for stmt in v.body.iter() {
          writeln!(f, "  {stmt}")?;
        }
        write!(f, "end")
      }
      StmtKind::Class(v) => {
        writeln!(f, "class {}", v.name)?;
        for method in v.methods.iter() {
          writeln!(f, "  def {}() ... end", method.name)?;
        }
        write!(f, "end")
      }
      StmtKind::Expr(v) => write!(f, "{v}"),
    }
  }
}
