//! Deep nesting and deep recursion stay inside the process.

#[macro_use]
mod cases;

use cases::check_output;

test_case!(
    recursion_just_under_default_call_limit,
    input: r#"
        function sum(n: int): int {
            if (n == 0) { return 0; }
            return n + sum(n - 1);
        }
        function main(): void { print(sum(998)); }
    "#,
    output: "498501\n",
);

test_case!(
    recursion_past_default_call_limit,
    input: r#"
        function sum(n: int): int {
            if (n == 0) { return 0; }
            return n + sum(n - 1);
        }
        function main(): void { print(sum(1000)); }
    "#,
    output: "",
    runtime_error: "R008",
);

#[test]
fn deeply_nested_parentheses() {
    let depth = 3000;
    let source = format!(
        "function main(): void {{ print({}1{}); }}",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    check_output(&source, "1\n");
}

#[test]
fn long_unary_chain() {
    let source = format!("function main(): void {{ print({}true); }}", "! ".repeat(3001));
    check_output(&source, "false\n");
}

#[test]
fn long_operator_chain() {
    let source = format!("function main(): void {{ print(0{}); }}", " + 1".repeat(3000));
    check_output(&source, "3000\n");
}

#[test]
fn deeply_nested_blocks() {
    let depth = 2000;
    let source = format!(
        "function main(): void {{ var x = 0; {}x += 1;{} print(x); }}",
        "{ ".repeat(depth),
        " }".repeat(depth)
    );
    check_output(&source, "1\n");
}
