use super::*;

fn render(src: &str, span: impl Into<Span>, message: &str) -> String {
  Report::error()
    .source(src)
    .message(message.to_string())
    .span(span)
    .build()
    .emit_to_string()
    .unwrap()
}

#[test]
fn caret_on_first_line() {
  assert_eq!(
    render("a = $", 4..5, "undefined token `$`"),
    "1:5: undefined token `$`\na = $\n    ^"
  );
}

#[test]
fn caret_on_second_line() {
  assert_eq!(
    render("a = 1\nb $", 8..9, "undefined token `$`"),
    "2:3: undefined token `$`\nb $\n  ^"
  );
}

#[test]
fn caret_in_first_column() {
  assert_eq!(render("%", 0..1, "undefined token `%`"), "1:1: undefined token `%`\n%\n^");
}

#[test]
fn crlf_advances_line_twice() {
  assert_eq!(render("a\r\nb", 3..4, "oops"), "3:1: oops\nb\n^");
}

#[test]
fn span_at_end_of_input() {
  assert_eq!(render("if 1 do", 7..7, "expected `end`"), "1:8: expected `end`\nif 1 do\n       ^");
}

#[test]
fn span_out_of_bounds() {
  let report = Report::error()
    .source("ab")
    .message("nope")
    .span(5..6)
    .build();
  assert!(matches!(report.emit_to_string(), Err(EmitError::OutOfBounds)));
}
