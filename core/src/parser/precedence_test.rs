use pretty_assertions::assert_eq;

use crate::diagnostics::Diagnostics;
use crate::parser::{ParserStrategy, Stmt, parse_source};

// Parses `source` as an expression statement with both strategies and
// returns its S-expression form, checking that the strategies agree.
//
// We test precedence by comparing against hand-written S-expressions; a
// parenthesized source would keep its grouping nodes and never compare equal.
fn sexpr(source: &str) -> String {
    let program = format!("function main(): void {{ {}; }}", source);
    let rendered: Vec<String> = [ParserStrategy::RecursiveDescent, ParserStrategy::Pratt]
        .into_iter()
        .map(|strategy| {
            let mut sink = Diagnostics::new();
            let outcome = parse_source(&program, strategy, &mut sink);
            assert!(outcome.success, "{} failed on {}: {:?}", strategy, source, sink);
            let Some(Stmt::Function(main)) = outcome.statements.first() else {
                panic!("expected function");
            };
            match main.body.first() {
                Some(Stmt::Expression(expr)) => expr.to_string(),
                other => panic!("expected expression statement, got {:?}", other),
            }
        })
        .collect();
    assert_eq!(rendered[0], rendered[1], "strategies disagree on {}", source);
    rendered[0].clone()
}

#[test]
fn test_addition_vs_subtraction() {
    assert_eq!(sexpr("a + b - c"), "(- (+ a b) c)");
    assert_eq!(sexpr("a - b + c"), "(+ (- a b) c)");
    assert_eq!(
        sexpr("a + b - c + d - e + f"),
        "(+ (- (+ (- (+ a b) c) d) e) f)"
    );
}

#[test]
fn test_multiplication_vs_division() {
    assert_eq!(sexpr("a * b / c"), "(/ (* a b) c)");
    assert_eq!(sexpr("a / b * c % d"), "(% (* (/ a b) c) d)");
}

#[test]
fn test_addition_vs_multiplication() {
    assert_eq!(sexpr("a + b * c"), "(+ a (* b c))");
    assert_eq!(sexpr("a * b + c"), "(+ (* a b) c)");
    assert_eq!(sexpr("a - b % c - d"), "(- (- a (% b c)) d)");
}

#[test]
fn test_shift_binds_looser_than_addition() {
    assert_eq!(sexpr("a << b + c"), "(<< a (+ b c))");
    assert_eq!(sexpr("a >> b << c"), "(<< (>> a b) c)");
}

#[test]
fn test_comparison_levels() {
    assert_eq!(sexpr("a < b << c"), "(< a (<< b c))");
    assert_eq!(sexpr("a == b < c"), "(== a (< b c))");
    assert_eq!(sexpr("a != b == c"), "(== (!= a b) c)");
    assert_eq!(sexpr("a <= b >= c"), "(>= (<= a b) c)");
}

#[test]
fn test_bitwise_levels() {
    assert_eq!(sexpr("a & b == c"), "(& a (== b c))");
    assert_eq!(sexpr("a ^ b & c"), "(^ a (& b c))");
    assert_eq!(sexpr("a | b ^ c"), "(| a (^ b c))");
    assert_eq!(sexpr("a & b | c ^ d"), "(| (& a b) (^ c d))");
}

#[test]
fn test_logical_levels() {
    assert_eq!(sexpr("a && b | c"), "(&& a (| b c))");
    assert_eq!(sexpr("a || b && c"), "(|| a (&& b c))");
    assert_eq!(sexpr("a && b || c && d"), "(|| (&& a b) (&& c d))");
    assert_eq!(sexpr("a || b || c"), "(|| (|| a b) c)");
}

#[test]
fn test_unary_binds_tightest() {
    assert_eq!(sexpr("-a * b"), "(* (- a) b)");
    assert_eq!(sexpr("!a && b"), "(&& (! a) b)");
    assert_eq!(sexpr("~a & -b"), "(& (~ a) (- b))");
    assert_eq!(sexpr("- -a"), "(- (- a))");
    assert_eq!(sexpr("!!a"), "(! (! a))");
}

#[test]
fn test_call_binds_tighter_than_unary() {
    assert_eq!(sexpr("-f(x)"), "(- (call f x))");
    assert_eq!(sexpr("f(a, b + c)(d)"), "(call (call f a (+ b c)) d)");
    assert_eq!(sexpr("f() + g()"), "(+ (call f) (call g))");
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(sexpr("(a + b) * c"), "(* (group (+ a b)) c)");
    assert_eq!(sexpr("a - (b - c)"), "(- a (group (- b c)))");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(sexpr("a = b = c"), "(= a (= b c))");
    assert_eq!(sexpr("a = b || c"), "(= a (|| b c))");
    assert_eq!(sexpr("a += b = 1"), "(= a (+ a (= b 1)))");
}

#[test]
fn test_literals() {
    assert_eq!(sexpr("1 + 2.5"), "(+ 1 2.5)");
    assert_eq!(sexpr("\"s\" + null"), "(+ \"s\" null)");
    assert_eq!(sexpr("true == false"), "(== true false)");
}
