use indoc::indoc;

use super::*;
use crate::ErrorKind;

fn parse_ok(src: &str) -> ast::Module {
  match parse(src) {
    Ok(module) => module,
    Err(e) => {
      eprintln!("{}", e.report(src));
      panic!("failed to parse source, see error above")
    }
  }
}

/// Rendering of the first top-level statement.
fn first(src: &str) -> String {
  let module = parse_ok(src);
  module.body.first().map(|s| s.to_string()).unwrap_or_default()
}

fn parse_err(src: &str) -> Error {
  match parse(src) {
    Ok(_) => panic!("parsed successfully: {src}"),
    Err(e) => e,
  }
}

#[test]
fn precedence() {
  assert_eq!(first("1+2*3"), "(1 + (2 * 3))");
  assert_eq!(first("1*2+3"), "((1 * 2) + 3)");
  assert_eq!(first("1+2-3"), "((1 + 2) - 3)");
  assert_eq!(first("1 < 2 + 3"), "(1 < (2 + 3))");
  assert_eq!(first("1 == 2 < 3"), "(1 == (2 < 3))");
  assert_eq!(first("1 != 2 > 3"), "(1 != (2 > 3))");
  assert_eq!(first("8 / 2 / 2"), "((8 / 2) / 2)");
}

#[test]
fn literals() {
  assert_eq!(first("23"), "23");
  assert_eq!(first("true"), "true");
  assert_eq!(first("false"), "false");
  assert_eq!(first("1..5"), "1..5");
  assert_eq!(first("65535"), "65535");
}

#[test]
fn integer_literal_out_of_range() {
  let e = parse_err("65536");
  assert_eq!(e.kind, ErrorKind::Constant);
  assert_eq!(e.span, Span::from(0..5));

  let e = parse_err("1 + 99999");
  assert_eq!(e.kind, ErrorKind::Constant);
  assert_eq!(e.span, Span::from(4..9));
}

#[test]
fn assignment() {
  assert_eq!(first("a = 1"), "a = 1");
  assert_eq!(first("abc = 1 + 2"), "abc = (1 + 2)");

  let e = parse_err("1 = 2");
  assert_eq!(e.kind, ErrorKind::Syntax);
}

#[test]
fn if_and_while() {
  let src = indoc! {"
    if a == 1 do
      a = 2
    end
  "};
  assert_eq!(first(src), "if (a == 1) then\n  a = 2\nend");

  let src = indoc! {"
    while a < 10 do
      a = a + 1
    end
  "};
  assert_eq!(first(src), "while (a < 10) do\n  a = (a + 1)\nend");
}

#[test]
fn blocks_nest() {
  let src = indoc! {"
    if 1 > 1 do
      while 1 > 1 do
        1 + 1
      end
    end
  "};
  let module = parse_ok(src);
  assert_eq!(module.body.len(), 1);
}

#[test]
fn missing_end_is_an_error() {
  let e = parse_err("if 1 do 2");
  assert_eq!(e.kind, ErrorKind::Syntax);
  assert_eq!(e.message.as_ref(), "expected `end`");
  assert_eq!(e.span, Span::from(9..9));
}

#[test]
fn function_def() {
  let src = indoc! {"
    def myFunc()
      2 + 3
    end
    myFunc()
  "};
  let module = parse_ok(src);
  assert_eq!(module.body.len(), 2);
  assert_eq!(module.body[0].to_string(), "def myFunc()\n  (2 + 3)\nend");
  assert_eq!(module.body[1].to_string(), "myFunc()");
}

#[test]
fn function_params_up_to_six() {
  let module = parse_ok("def f(a, b, c, d, e, f6) a end f(1, 2, 3, 4, 5, 6)");
  let ast::StmtKind::Func(func) = &**module.body.first().unwrap() else {
    panic!("expected a function definition")
  };
  assert_eq!(func.params.len(), 6);

  let e = parse_err("def f(a, b, c, d, e, f6, g) a end");
  assert_eq!(e.kind, ErrorKind::Syntax);
  assert_eq!(e.message.as_ref(), "too many parameters");
  assert_eq!(e.span, Span::from(25..26));
}

#[test]
fn return_stmt() {
  assert_eq!(first("def f() return 1 end"), "def f()\n  return 1\nend");
}

#[test]
fn call_vs_instantiation() {
  let module = parse_ok("foo() Foo()");
  assert!(matches!(
    &**module.body[0],
    ast::StmtKind::Expr(e) if matches!(&***e, ast::ExprKind::Call(_))
  ));
  assert!(matches!(
    &**module.body[1],
    ast::StmtKind::Expr(e) if matches!(&***e, ast::ExprKind::Instance(_))
  ));
}

#[test]
fn call_args() {
  assert_eq!(first("f(1, 2 + 3, g())"), "f(1, (2 + 3), g())");
}

#[test]
fn method_calls() {
  assert_eq!(first("c.bump()"), "c.bump()");
  assert_eq!(first("Counter().bump()"), "Counter().bump()");
  assert_eq!(first("c.push(1).pop()"), "c.push(1).pop()");

  let e = parse_err("c.bump");
  assert_eq!(e.message.as_ref(), "expected a method call");
}

#[test]
fn class_def() {
  let src = indoc! {"
    class Counter
      def init()
        self.count = 0
      end
      def bump()
        self.count = self.count + 1
      end
    end
  "};
  let module = parse_ok(src);
  let ast::StmtKind::Class(class) = &**module.body.first().unwrap() else {
    panic!("expected a class definition")
  };
  assert_eq!(class.name.as_ref(), "Counter");
  assert_eq!(class.methods.len(), 2);
  assert!(class.methods.iter().all(|m| m.is_method));
}

#[test]
fn empty_class() {
  let module = parse_ok("class C end");
  let ast::StmtKind::Class(class) = &**module.body.first().unwrap() else {
    panic!("expected a class definition")
  };
  assert!(class.methods.is_empty());
}

#[test]
fn class_name_must_be_uppercase() {
  let e = parse_err("class c end");
  assert_eq!(e.message.as_ref(), "class name must start with an uppercase letter");
  assert_eq!(e.span, Span::from(6..7));
}

#[test]
fn self_only_inside_methods() {
  let e = parse_err("self.x = 1");
  assert_eq!(e.message.as_ref(), "cannot access `self` outside of a method");

  let e = parse_err("def f() self.x end");
  assert_eq!(e.message.as_ref(), "cannot access `self` outside of a method");
}

#[test]
fn self_with_type_markers() {
  let src = indoc! {"
    class Pin
      def init()
        self.mode: #bool = 0
        self.level: {#include: 1..10} = 1
        self.other: {#exclude: 3..4} = 1
        self.raw: #number = 0
      end
    end
  "};
  let module = parse_ok(src);
  let ast::StmtKind::Class(class) = &**module.body.first().unwrap() else {
    panic!("expected a class definition")
  };
  let body = &class.methods[0].body;

  let target = |i: usize| -> &ast::IdentExpr {
    let ast::StmtKind::Assign(assign) = &**body[i] else {
      panic!("expected an assignment")
    };
    &assign.target
  };

  assert!(target(0).is_self);
  assert_eq!(target(0).val_type, ast::ValType::Bool);
  assert_eq!(target(1).val_type, ast::ValType::Include);
  assert_eq!(target(1).val_limit, Some(ast::RangeLit { from: 1, to: 10 }));
  assert_eq!(target(2).val_type, ast::ValType::Exclude);
  assert_eq!(target(2).val_limit, Some(ast::RangeLit { from: 3, to: 4 }));
  assert_eq!(target(3).val_type, ast::ValType::Num);
  assert_eq!(target(3).val_limit, None);
}

#[test]
fn comments_are_skipped() {
  let src = indoc! {"
    # sets up the counter
    a = 1 # trailing
    # done
  "};
  let module = parse_ok(src);
  assert_eq!(module.body.len(), 1);
  assert_eq!(module.body[0].to_string(), "a = 1");
}

#[test]
fn undefined_token() {
  let e = parse_err("a = $");
  assert_eq!(e.kind, ErrorKind::Syntax);
  assert_eq!(e.message.as_ref(), "undefined token `$`");
  assert_eq!(e.span, Span::from(4..5));
  assert_eq!(e.report("a = $"), "1:5: undefined token `$`\na = $\n    ^");
}

#[test]
fn error_spans_point_at_the_offender() {
  let e = parse_err("a = )");
  assert_eq!(e.span, Span::from(4..5));

  let src = "a = 1\nb = %";
  let e = parse_err(src);
  assert_eq!(e.span, Span::from(10..11));
  assert_eq!(e.report(src), "2:5: undefined token `%`\nb = %\n    ^");
}
