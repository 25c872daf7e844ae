use std::fs;

use molde::{
    interpret,
    interpreter::{env::Env, value::core::Value},
};
use walkdir::WalkDir;

fn eval(source: &str) -> Value {
    let env = Env::global();

    match interpret(source, &env) {
        Ok(value) => value,
        Err(error) => panic!("script failed: {error}\nsource: {source}"),
    }
}

fn assert_result(source: &str, expected: &str) {
    let value = eval(source);
    assert_eq!(value.to_string(), expected, "source: {source}");
}

fn assert_error(source: &str, expected: &str) {
    let env = Env::global();

    match interpret(source, &env) {
        Ok(value) => panic!("script yielded {value}, but an error was expected: {source}"),
        Err(error) => {
            let message = error.to_string();
            assert!(message.contains(expected),
                    "error {message:?} does not contain {expected:?}\nsource: {source}");
        },
    }
}

#[test]
fn arithmetic_follows_precedence() {
    assert_result("x := 3 + 4 * 2; x;", "11");
    assert_result("1 + 2 * 3 - 4;", "3");
    assert_result("10 / 4;", "2.5");
    assert_result("7 % 3;", "1");
    assert_result("2 ** 10;", "1024");
    assert_result("-3 + 1;", "-2");
    assert_result("+5;", "5");
    assert_result("(2 + 3) * 4;", "20");
}

#[test]
fn bit_operators_reinterpret_as_integers() {
    assert_result("1 << 4;", "16");
    assert_result("9 >> 1;", "4");
    assert_result("6 & 3;", "2");
    assert_result("6 | 3;", "7");
    assert_result("~0;", "18446744073709551616");
}

#[test]
fn comparisons_and_equality() {
    assert_result("1 < 2;", "true");
    assert_result("2 <= 2;", "true");
    assert_result("3 > 4;", "false");
    assert_result("3 >= 4;", "false");
    assert_result("1 == 1;", "true");
    assert_result("1 != 1;", "false");
    assert_result("null == null;", "true");
    assert_result("1 == \"1\";", "false");
    assert_result("[1, [2]] == [1, [2]];", "true");
    assert_result("[1, 2] == [1, 2, 3];", "false");
}

#[test]
fn functions_compare_by_rendered_source() {
    assert_result("fn (x) { x; } == fn (x) { x; };", "true");
    assert_result("fn (x) { x; } == fn (y) { y; };", "false");
    assert_result("print == print;", "false");
}

#[test]
fn truthiness_only_rejects_null_and_false() {
    assert_result("!null;", "true");
    assert_result("!false;", "true");
    assert_result("!true;", "false");
    assert_result("!0;", "false");
    assert_result("!\"\";", "false");
    assert_result("![];", "false");
    assert_result("!{};", "false");
    assert_result("!!null;", "false");
}

#[test]
fn logical_operators_use_truthiness_without_model_dispatch() {
    assert_result("true && false;", "false");
    assert_result("true && 1;", "true");
    assert_result("null || false;", "false");
    assert_result("0 || false;", "true");
}

#[test]
fn strings_concatenate_compare_and_index() {
    assert_result("\"foo\" + \"bar\";", "foobar");
    assert_result("\"a\" == \"a\";", "true");
    assert_result("\"a\" != \"b\";", "true");
    assert_result("\"abc\"[1];", "b");
    assert_result("\"abc\"[-1];", "c");
    assert_result("\"abc\"[4];", "b");
}

#[test]
fn arrays_are_reference_shared_and_wrap_indices() {
    assert_result("[10, 20, 30][1];", "20");
    assert_result("[10, 20, 30][-1];", "30");
    assert_result("[10, 20, 30][4];", "20");
    assert_result("a := [1, 2, 3]; a[0] = 9; a[0];", "9");
    assert_result("a := [1, 2, 3]; b := a; b[1] = 7; a;", "[1, 7, 3]");
    assert_result("a := [1, 2]; a[-1] = 5; a;", "[1, 5]");
}

#[test]
fn ranges_build_arrays() {
    assert_result("1..4;", "[1, 2, 3, 4]");
    assert_result("1..<4;", "[1, 2, 3]");
    assert_result("3..3;", "[3]");
    assert_result("3..<3;", "[]");
    assert_result("3..1;", "[]");
}

#[test]
fn membership_operator_by_right_operand() {
    assert_result("2 in [1, 2, 3];", "true");
    assert_result("5 in [1, 2, 3];", "false");
    assert_result("h := {\"a\": 1, \"b\": 2}; \"a\" in h;", "true");
    assert_result("h := {\"a\": 1, \"b\": 2}; \"c\" in h;", "false");
    assert_result("\"bc\" in \"abcd\";", "true");
    assert_result("\"z\" in \"abcd\";", "false");
    assert_result("5 in \"a5b\";", "true");
    assert_result("6 in 12;", "true");
    assert_result("5 in 12;", "false");
}

#[test]
fn hashes_store_and_read_fields() {
    assert_result("h := {a: 1, \"b\": 2}; h.a;", "1");
    assert_result("h := {a: 1}; h[\"a\"];", "1");
    assert_result("h := {a: 1}; h.missing;", "<null>");
    assert_result("h := {}; h.f = 5; h.f;", "5");
    assert_result("h := {}; h[\"f\"] = 5; h.f;", "5");
    assert_result("h := {a: 1}; h.a = h.a + 1; h.a;", "2");
    assert_result("key := \"dynamic\"; h := {key + \"!\": 1}; h[\"dynamic!\"];", "1");
}

#[test]
fn declare_binds_locally_and_assign_rebinds_outward() {
    assert_result("x := 5; f := fn () { x := 9; x; }; f(); x;", "5");
    assert_result("x := 5; f := fn () { x = 9; }; f(); x;", "9");
    assert_result("f := fn () { y = 3; y; }; f();", "3");
    assert_error("f := fn () { y = 3; }; f(); y;", "identifier not found: y");
    assert_result("x := 1; x = x + 1; x;", "2");
}

#[test]
fn functions_close_over_their_environment() {
    assert_result("make := fn (x) { fn (y) { x + y; }; }; add5 := make(5); add5(7);", "12");
    assert_result("counter := fn () { n := 0; fn () { n = n + 1; n; }; }; c := counter(); c(); \
                   c(); c();",
                  "3");
}

#[test]
fn recursion_and_returns() {
    assert_result("fib := fn (n) { if n < 2 { return n; }; fib(n - 1) + fib(n - 2); }; fib(10);",
                  "55");
    assert_result("f := fn () { return 7; 100; }; f();", "7");
    assert_result("f := fn () { return; }; f();", "<null>");
    assert_result("f := fn () { while true { return 7; }; }; f();", "7");
    assert_result("f := fn () { 42; }; f();", "42");
}

#[test]
fn lambdas_are_single_expression_functions() {
    assert_result("add := \\(a, b) = a + b; add(2, 3);", "5");
    assert_result("make := fn (x) { \\(y) = x + y; }; make(2)(3);", "5");
    assert_result("\\() = 1;", "\\() = 1");
}

#[test]
fn this_is_null_outside_method_calls() {
    assert_result("f := fn () { this; }; f();", "<null>");
}

#[test]
fn while_collects_non_null_results() {
    assert_result("x := 0; while x < 3 { x = x + 1; };", "[1, 2, 3]");
    assert_result("x := 0; while x < 3 { x = x + 1; null; };", "[]");
    assert_result("while false { 1; };", "[]");
}

#[test]
fn loops_honor_break_and_next() {
    assert_result("x := 0; while true { x = x + 1; if x == 3 { break; }; }; x;", "3");
    assert_result("x := 0; c := 0; while x < 5 { x = x + 1; if x == 2 { next; }; c = c + x; }; c;",
                  "13");
    assert_result("r := for i | [1, 2, 3, 4] { if i == 2 { break; }; i; }; r;", "[0, 1]");
    assert_result("c := 0; for i | [1, 2, 3] { if i == 1 { next; }; c = c + i; }; c;", "2");
}

#[test]
fn for_iterates_indices_keys_and_bytes() {
    assert_result("for i | [10, 20, 30] { i; };", "[0, 1, 2]");
    assert_result("s := \"\"; for i | [10, 20, 30] { s = s + str(i); }; s;", "012");
    assert_result("r := for k | {a: 1, b: 2} { k; }; r[\"a\"];", "a");
    assert_result("for i | \"ab\" { i; };", "01");
    assert_result("msg := \"\"; for i | \"abc\" { msg = msg + \"abc\"[i]; }; msg;", "abc");
}

#[test]
fn for_loop_variables_live_per_iteration() {
    assert_result("for i | [1, 2] { i; }; x := 9; x;", "9");
    assert_error("for i | [1, 2] { i; }; i;", "identifier not found: i");
}

#[test]
fn stray_loop_controls_squash_to_null_at_program_level() {
    assert_result("break; 5;", "5");
    assert_result("next;", "<null>");
    assert_result("return 3; 5;", "3");
}

#[test]
fn conditionals_evaluate_lazily() {
    assert_result("if 1 < 2 { \"yes\"; } else { \"no\"; };", "yes");
    assert_result("if 1 > 2 { \"yes\"; } else { \"no\"; };", "no");
    assert_result("if false { 1; };", "<null>");
    assert_result("x := 5; if x == 1 { \"a\"; } elif x == 5 { \"b\"; } else { \"c\"; };", "b");
    assert_result("if 0 { \"zero is truthy\"; };", "zero is truthy");
}

#[test]
fn models_instantiate_into_hashes() {
    assert_result("m := model (x, y); h := m(1, 2); h.x;", "1");
    assert_result("m := model (x, y); h := m(1, 2); h.y;", "2");
    assert_result("m := model (); h := m(); h;", "{}");
    assert_result("m := model (x); a := m(1); b := m(2); type(a) == type(b);", "true");
    assert_result("m := model (x); n := model (x); type(m(1)) == type(n(1));", "false");
}

#[test]
fn model_inheritance_constructs_parent_properties() {
    assert_result("p := model (x, y); q := model (z) : p(z, z); h := q(4); h.x;", "4");
    assert_result("p := model (x, y); q := model (z) : p(z, z); h := q(4); h.y;", "4");
    assert_result("p := model (x, y); q := model (z) : p(z + 1, z * 2); h := q(4); h.y;", "8");
    assert_result("p := model (); p.hello = fn () { 1; }; c := model () : p(); c().hello();",
                  "1");
}

#[test]
fn methods_bind_this_to_the_host_hash() {
    assert_result("m := model (x); m.double = fn () { this.x * 2; }; m(21).double();", "42");
    assert_result("m := model (); m.f = fn (v) { v + 1; }; h := m(); h.f(1);", "2");
    assert_result("h := {a: 1}; h.missing;", "<null>");
}

#[test]
fn model_fields_only_accept_functions() {
    assert_error("m := model (); m.f = 5;", "cannot assign a NUMBER to a model field");
    assert_error("m := model (); m.f = \\() = 1;", "cannot assign a LAMBDA to a model field");
}

#[test]
fn hash_fields_cannot_shadow_methods() {
    assert_result("m := model (); m.f = fn () { 1; }; h := m(); h.f = 5; h.f();", "1");
}

#[test]
fn the_new_method_replaces_the_instance() {
    assert_result("m := model (x); m._new = fn () { this.x = this.x * 2; this; }; m(4).x;", "8");
    assert_result("m := model (x); m._new = fn () { \"made\"; }; m(1);", "made");
}

#[test]
fn reflective_methods_and_builtins_report_models() {
    assert_result("m := model (x); h := m(5); h.type() == m;", "true");
    assert_result("m := model (x); h := m(5); type(h) == m;", "true");
    assert_result("h := {}; parent(h);", "<null>");
    assert_result("m := model (); h := m(); parent(h) == object;", "true");
    assert_result("m := model (); h := m(); h.parent() == object;", "true");
    assert_result("p := model (); c := model () : p(); parent(c()) == p;", "true");
}

#[test]
fn operator_overloading_dispatches_to_underscore_methods() {
    assert_result("v := model (x, y); v._plus = fn (o) { v(this.x + o.x, this.y + o.y); }; \
                   (v(1, 2) + v(3, 4)).x;",
                  "4");
    assert_result("v := model (x, y); v._plus = fn (o) { v(this.x + o.x, this.y + o.y); }; \
                   (v(1, 2) + v(3, 4)).y;",
                  "6");
    assert_result("v := model (x); v._eq = fn (o) { this.x == o.x; }; v(1) == v(1);", "true");
    assert_result("v := model (x); v._lt = fn (o) { this.x < o.x; }; v(1) < v(2);", "true");
    assert_result("m := model (); m._in = fn (o) { o == 1; }; h := m(); 1 in h;", "true");
    assert_result("m := model (); m._in = fn (o) { o == 1; }; h := m(); 2 in h;", "false");
}

#[test]
fn missing_overloads_are_errors() {
    assert_error("{} + {};", "operator + not overloaded");
    assert_error("{} + {};", "_plus");
    assert_error("{} ^ {};", "operator ^ cannot be overloaded");
    assert_error("h := {\"_plus\": 1}; h + 1;", "_plus must be a method, not a property");
}

#[test]
fn builtin_functions() {
    assert_result("str(12);", "12");
    assert_result("str(12.5);", "12.5");
    assert_result("str([1, 2]);", "[1, 2]");
    assert_result("str(null);", "<null>");
    assert_result("str(\"already\");", "already");
    assert_result("print(\"from the test suite\");", "<null>");
    assert_error("str(1, 2);", "expected exactly one argument to 'str'");
    assert_error("type(5);", "expected a hash to be passed to 'type'");
    assert_error("sleep(\"no\");", "expected a number to be passed to 'sleep'");
    assert_result("sleep(0);", "<null>");
}

#[test]
fn user_bindings_shadow_builtins() {
    assert_result("print := fn (x) { x; }; print(3);", "3");
}

#[test]
fn the_err_builtin_raises() {
    assert_error("err(\"boom\", 7);", "boom 7");
    assert_error("x := err(\"gone\"); x;", "gone");
}

#[test]
fn runtime_error_taxonomy() {
    assert_error("foobar;", "identifier not found: foobar");
    assert_error("-true;", "unknown operator: -BOOLEAN");
    assert_error("~\"x\";", "unknown operator: ~STRING");
    assert_error("1 + \"a\";", "type mismatch: NUMBER + STRING");
    assert_error("true + false;", "unknown operator: BOOLEAN + BOOLEAN");
    assert_error("\"a\" - \"b\";", "unknown operator: STRING - STRING");
    assert_error("5 ^ 5;", "unknown operator: NUMBER ^ NUMBER");
    assert_error("f := fn (x) { x; }; f(1, 2);", "invalid number of arguments. expected 1, got 2");
    assert_error("m := model (x); m();", "invalid number of arguments. expected 1, got 0");
    assert_error("5(1);", "cannot call a NUMBER");
    assert_error("h := {}; h[\"a\"] := 1;", "cannot declare (:=) a hash field");
    assert_error("5 := 1;", "cannot declare 5");
    assert_error("a := [1]; a[0.5] = 1;", "expected an integral number for an array index");
    assert_error("a := [1]; a[\"x\"] = 1;", "expected a number for an array index");
    assert_error("h := {}; h[0] = 1;", "expected a string for a hash key");
    assert_error("[][0];", "cannot index an empty array");
    assert_error("\"\"[0];", "cannot index an empty string");
    assert_error("[1][\"a\"];", "index operator not supported: ARRAY[STRING]");
    assert_error("5.f;", "cannot access fields of a NUMBER");
    assert_error("5.f = 1;", "cannot assign fields of a NUMBER");
    assert_error("for i | 5 { i; };", "invalid set 5");
    assert_error("q := model (z) : z(1);", "identifier not found: z");
    assert_error("p := 5; q := model (z) : p(1); q(1);", "expected a model as a parent");
    assert_error("1 in {};", "expected a string for a hash key, got 1");
    assert_error("[1, 2][\"0\"];", "index operator not supported");
}

#[test]
fn errors_short_circuit_evaluation() {
    assert_error("x := foobar + 1; x;", "identifier not found: foobar");
    assert_error("[1, missing, 3];", "identifier not found: missing");
    assert_error("f := fn () { err(\"inner\"); }; f(); 5;", "inner");
    assert_error("while true { err(\"stop\"); };", "stop");
}

#[test]
fn parse_failures_skip_evaluation() {
    assert_error("1a", "expected next token to be ;, but got id");
    assert_error("x :=", "parser errors");
}

#[test]
fn demo_scripts_run() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "mld")
                                      })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;

        let env = Env::global();
        if let Err(e) = interpret(&source, &env) {
            panic!("Demo script {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}
