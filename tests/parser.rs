use molde::{
    error::ParseError,
    interpreter::{lexer::lex, parser::core::Parser},
};

fn parse_display(source: &str) -> String {
    let mut parser = Parser::new(lex(source));
    let program = parser.parse_program();

    assert!(parser.errors().is_empty(),
            "unexpected parse errors for {source:?}: {:?}",
            parser.errors());

    program.to_string()
}

fn parse_errors(source: &str) -> Vec<ParseError> {
    let mut parser = Parser::new(lex(source));
    parser.parse_program();
    parser.errors().to_vec()
}

#[test]
fn operator_precedence() {
    let cases = [("-a * b;", "((-a) * b);"),
                 ("!-a;", "(!(-a));"),
                 ("~a + b;", "((~a) + b);"),
                 ("+a;", "(+a);"),
                 ("a + b + c;", "((a + b) + c);"),
                 ("a + b - c;", "((a + b) - c);"),
                 ("a * b * c;", "((a * b) * c);"),
                 ("a + b * c;", "(a + (b * c));"),
                 ("a * b ** c;", "(a * (b ** c));"),
                 ("5 < 4 != 3 > 4;", "((5 < 4) != (3 > 4));"),
                 ("3 + 4 * 5 == 3 * 1 + 4 * 5;", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)));"),
                 ("a && b || c;", "((a && b) || c);"),
                 ("a == b && c != d;", "((a == b) && (c != d));"),
                 ("a | b ^ c & d;", "(a | (b ^ (c & d)));"),
                 ("a << 1 + 2;", "(a << (1 + 2));"),
                 ("1 .. n + 1;", "(1 .. (n + 1));"),
                 ("x in 1 ..< n;", "(x in (1 ..< n));"),
                 ("a + b; -5 * 5;", "(a + b); ((-5) * 5);")];

    for (source, expected) in cases {
        assert_eq!(parse_display(source), expected, "source: {source:?}");
    }
}

#[test]
fn grouping_overrides_precedence() {
    assert_eq!(parse_display("(a + b) * c;"), "((a + b) * c);");
    assert_eq!(parse_display("-(a + b);"), "(-(a + b));");
    assert_eq!(parse_display("!(true == true);"), "(!(true == true));");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(parse_display("a = b = c;"), "(a = (b = c));");
    assert_eq!(parse_display("x := y + 1;"), "(x := (y + 1));");
    assert_eq!(parse_display("a[0] = 3;"), "((a[0]) = 3);");
    assert_eq!(parse_display("h.f = 3;"), "((h . f) = 3);");
}

#[test]
fn calls_indexing_and_field_access_bind_tightest() {
    assert_eq!(parse_display("a + add(b * c) + d;"), "((a + (add((b * c)))) + d);");
    assert_eq!(parse_display("a * [1, 2][1];"), "(a * (([1, 2])[1]));");
    assert_eq!(parse_display("h.f.g;"), "((h . f) . g);");
    assert_eq!(parse_display("h.f(1);"), "((h . f)(1));");
    assert_eq!(parse_display("-h.f;"), "(-(h . f));");
}

#[test]
fn literal_forms() {
    assert_eq!(parse_display("5;"), "5;");
    assert_eq!(parse_display("3.25;"), "3.25;");
    assert_eq!(parse_display("true; false; null;"), "true; false; null;");
    assert_eq!(parse_display("\"hello\";"), "\"hello\";");
    assert_eq!(parse_display("[1, 2 * 2, 3 + 3];"), "[1, (2 * 2), (3 + 3)];");
    assert_eq!(parse_display("[];"), "[];");
    assert_eq!(parse_display("{a: 1, \"b\": 2};"), "{a: 1, \"b\": 2};");
    assert_eq!(parse_display("{};"), "{};");
}

#[test]
fn conditionals_desugar_elif_into_nested_if() {
    assert_eq!(parse_display("if x < y { x; };"), "(if (x < y) { x; });");
    assert_eq!(parse_display("if x { y; } else { z; };"), "(if x { y; } else { z; });");
    assert_eq!(parse_display("if a { 1; } elif b { 2; } else { 3; };"),
               "(if a { 1; } else { (if b { 2; } else { 3; }); });");
}

#[test]
fn loop_forms() {
    assert_eq!(parse_display("while x < 3 { x; };"), "(while (x < 3) { x; });");
    assert_eq!(parse_display("for (i | [1, 2]) { i; };"), "(for (i | [1, 2]) { i; });");
    // The parentheses around the header are optional.
    assert_eq!(parse_display("for i | [1, 2] { i; };"), "(for (i | [1, 2]) { i; });");
    assert_eq!(parse_display("break;"), "break;");
    assert_eq!(parse_display("next;"), "next;");
}

#[test]
fn function_model_and_lambda_literals() {
    assert_eq!(parse_display("fn (x, y) { x + y; };"), "(fn (x, y) { (x + y); });");
    assert_eq!(parse_display("fn () { };"), "(fn () { });");
    assert_eq!(parse_display("\\(a, b) = a + b;"), "(\\(a, b) = (a + b));");
    assert_eq!(parse_display("model (x, y);"), "(model (x, y));");
    assert_eq!(parse_display("model (z) : p(z, z);"), "(model (z) : p(z, z));");
}

#[test]
fn return_statements() {
    assert_eq!(parse_display("return;"), "return null;");
    assert_eq!(parse_display("return 2 + 3;"), "return (2 + 3);");
}

#[test]
fn stray_semicolons_produce_nothing() {
    assert_eq!(parse_display(";; 5; ;"), "5;");
}

#[test]
fn rendered_programs_reparse_to_themselves() {
    let sources = ["x := 3 + 4 * 2; x;",
                   "fib := fn (n) { if n < 2 { return n; }; fib(n - 1) + fib(n - 2); };",
                   "p := model (x, y); q := model (z) : p(z, z); h := q(4); h.x;",
                   "s := \"\"; for i | [10, 20, 30] { s = s + str(i); }; s;",
                   "add := \\(a, b) = a + b; add(1, 2);",
                   "while x < 3 { x = x + 1; if x == 2 { next; }; };",
                   "h := {a: 1, \"b c\": 2}; h[\"a\"] = h.a + 1;"];

    for source in sources {
        let rendered = parse_display(source);
        let reparsed = parse_display(&rendered);
        assert_eq!(rendered, reparsed, "source: {source:?}");
    }
}

#[test]
fn missing_semicolon_is_reported_and_statement_dropped() {
    let errors = parse_errors("1a");
    assert!(!errors.is_empty());
    assert!(errors.iter()
                  .any(|e| e.to_string().contains("expected next token to be ;, but got id")),
            "errors: {errors:?}");

    let errors = parse_errors("if x { y; }");
    assert!(errors.iter()
                  .any(|e| e.to_string().contains("expected next token to be ;, but got eof")),
            "errors: {errors:?}");
}

#[test]
fn statements_after_an_error_still_parse() {
    let mut parser = Parser::new(lex("1a; b;"));
    let program = parser.parse_program();

    assert!(!parser.errors().is_empty());
    // `1` loses its semicolon to `a`, which then forms its own statement.
    assert_eq!(program.to_string(), "a; b;");
}

#[test]
fn duplicate_parameters_are_rejected() {
    let errors = parse_errors("fn (a, b, a) { a; };");
    assert!(errors.iter()
                  .any(|e| e.to_string().contains("all function parameters must be unique")),
            "errors: {errors:?}");
}

#[test]
fn tokens_without_a_prefix_rule_are_reported() {
    let errors = parse_errors("* 5;");
    assert!(errors.iter()
                  .any(|e| e.to_string().contains("no prefix parse function for * found")),
            "errors: {errors:?}");
}

#[test]
fn errors_carry_line_numbers() {
    let errors = parse_errors("x := 1;\ny := fn (a, a) { a; };");
    assert!(errors.iter().any(|e| e.to_string().contains("line 2")),
            "errors: {errors:?}");
}
