//! Operators under both parsers: arithmetic, bitwise, comparison, logic and
//! string concatenation.

#[macro_use]
mod cases;

test_case!(
    precedence,
    input: "function main(): void { print(1 + 2 * 3); print((1 + 2) * 3); print(10 - 4 - 3); }",
    output: "7\n9\n3\n",
);

test_case!(
    integer_division_truncates,
    input: "function main(): void { print(7 / 2); print(-7 / 2); print(-7 % 3); }",
    output: "3\n-3\n-1\n",
);

test_case!(
    integer_overflow_wraps,
    input: "function main(): void { var max = 9223372036854775807; print(max + 1); print(-max - 2); }",
    output: "-9223372036854775808\n9223372036854775807\n",
);

test_case!(
    bitwise_and_shift,
    input: r#"
        function main(): void {
            print(5 & 3);
            print(5 | 3);
            print(5 ^ 3);
            print(~0);
            print(1 << 4);
            print(-16 >> 2);
        }
    "#,
    output: "1\n7\n6\n-1\n16\n-4\n",
);

test_case!(
    double_arithmetic,
    input: "function main(): void { print(1.5 * 2.0); print(1.0 / 4.0); print(-2.5 + 1.0); }",
    output: "3.0\n0.25\n-1.5\n",
);

test_case!(
    double_division_by_zero_is_infinite,
    input: "function main(): void { print(1.0 / 0.0); }",
    output: "inf\n",
);

test_case!(
    comparisons,
    input: r#"
        function main(): void {
            print(1 < 2);
            print(2 <= 2);
            print(3 > 4);
            print(1.5 >= 2.5);
            print(1 == 1);
            print(true != false);
        }
    "#,
    output: "true\ntrue\nfalse\nfalse\ntrue\ntrue\n",
);

test_case!(
    string_equality_compares_contents,
    input: r#"function main(): void { var a = "ab"; print(a == "a" + "b"); print(a != "ab"); }"#,
    output: "true\nfalse\n",
);

test_case!(
    concatenation_formats_other_operand,
    input: r#"
        function main(): void {
            print("n=" + 1);
            print(2.5 + "!");
            print("flag: " + true);
            print("x" + null);
            print(1 + 2 + "a");
            print("a" + 1 + 2);
        }
    "#,
    output: "n=1\n2.5!\nflag: true\nxnull\n3a\na12\n",
);

test_case!(
    unary_operators,
    input: "function main(): void { print(-(3)); print(!true); print(!!false); print(- -4); }",
    output: "-3\nfalse\nfalse\n4\n",
);

// `&&` and `||` always evaluate both operands.
test_case!(
    logical_operators_evaluate_both_operands,
    input: r#"
        var trace = "";
        function mark(name: String, result: bool): bool {
            trace = trace + name;
            return result;
        }
        function main(): void {
            print(mark("a", false) && mark("b", true));
            print(mark("c", true) || mark("d", false));
            print(trace);
        }
    "#,
    output: "false\ntrue\nabcd\n",
);

test_case!(
    compound_assignment,
    input: r#"
        function main(): void {
            var n = 10;
            n += 5; n -= 3; n *= 2; n /= 4; n %= 4;
            print(n);
            var s = "a";
            s += "b";
            print(s);
        }
    "#,
    output: "2\nab\n",
);

test_case!(
    assignment_yields_assigned_value,
    input: "function main(): void { var a = 0; var b = 0; a = b = 7; print(a); print(b = 8); print(b); }",
    output: "7\n8\n8\n",
);

// An unset bool is null, and null is falsy.
test_case!(
    not_of_unset_bool_is_true,
    input: "function main(): void { var b: bool; print(!b); print(!!b); if (!b) { print(\"unset\"); } }",
    output: "true\nfalse\nunset\n",
);

test_case!(
    null_operand_takes_other_side_type,
    input: r#"
        function main(): void {
            var s: String;
            print(null == s);
            print(s + "!");
        }
    "#,
    output: "true\nnull!\n",
);
