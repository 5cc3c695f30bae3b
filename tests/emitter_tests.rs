// tests/emitter_tests.rs

use simplescript::analyzer::analyze;
use simplescript::emitter::emit;
use simplescript::lexer::tokenize;
use simplescript::parser::parse;

fn emit_source(source: &str) -> String {
    let (program, errors) = parse(tokenize(source));
    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    let diagnostics = analyze(&program);
    assert!(
        diagnostics.is_empty(),
        "unexpected semantic errors: {:?}",
        diagnostics
    );
    emit(&program)
}

// ============================================================================
// Program Shape
// ============================================================================

#[test]
fn test_empty_program() {
    let output = emit_source("");

    assert_eq!(
        output,
        "package main\n\nimport \"fmt\"\n\nfunc main() {\n}\n"
    );
}

#[test]
fn test_preamble_and_main_wrapper() {
    let output = emit_source("say(1)");

    assert!(output.starts_with("package main\n\nimport \"fmt\"\n\nfunc main() {\n"));
    assert!(output.ends_with("}\n"));
}

#[test]
fn test_top_level_statements_indent_one_tab() {
    let output = emit_source("var x: int = 5");

    assert!(output.contains("\tvar x = 5\n"));
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_var_and_const_declarations() {
    let output = emit_source("var x: int = 5\nconst y: float = 3.14");

    assert!(output.contains("var x = 5"));
    assert!(output.contains("const y = 3.140000"));
}

#[test]
fn test_multi_assignment_passes_through() {
    let output = emit_source("var a: int = 1\nvar b: int = 2\na, b = 3, 4");

    assert!(output.contains("\ta, b = 3, 4\n"));
}

#[test]
fn test_say_becomes_println() {
    let output = emit_source("say(\"total:\", 42)");

    assert!(output.contains("\tfmt.Println(\"total:\", 42)\n"));
}

#[test]
fn test_say_with_no_arguments() {
    let output = emit_source("say()");

    assert!(output.contains("\tfmt.Println()\n"));
}

#[test]
fn test_if_else_shape() {
    let output = emit_source(
        "var x: int = 5\nif x > 10 {\n say(\"major\")\n} else {\n say(\"minor\")\n}",
    );

    assert!(output.contains("\tif (x > 10) {\n"));
    assert!(output.contains("\t\tfmt.Println(\"major\")\n"));
    assert!(output.contains("\t} else {\n"));
    assert!(output.contains("\t\tfmt.Println(\"minor\")\n"));
    assert!(output.contains("\t}\n"));
}

#[test]
fn test_else_if_chain() {
    let output = emit_source(
        "var a: int = 1\nif a == 1 {\n say(1)\n} else if a == 2 {\n say(2)\n} else {\n say(3)\n}",
    );

    assert!(output.contains("\t} else if (a == 2) {\n"));
    assert!(output.contains("\t} else {\n"));
}

#[test]
fn test_for_emits_half_open_counted_loop() {
    let output = emit_source("for i in 0..10 {\n say(i)\n}");

    assert!(output.contains("\tfor i := 0; i < 10; i++ {\n"));
    assert!(output.contains("\t\tfmt.Println(i)\n"));
    assert!(output.contains("\t}\n"));
}

#[test]
fn test_nested_blocks_indent_with_tabs() {
    let output = emit_source("for i in 0..3 {\n if i > 1 {\n  say(i)\n }\n}");

    assert!(output.contains("\t\tif (i > 1) {\n"));
    assert!(output.contains("\t\t\tfmt.Println(i)\n"));
}

#[test]
fn test_return_break_continue() {
    let output = emit_source("for i in 0..3 {\n break\n}\nfor j in 0..3 {\n continue\n}");

    assert!(output.contains("\t\tbreak\n"));
    assert!(output.contains("\t\tcontinue\n"));

    let output = emit_source("if true {\n return\n}");
    assert!(output.contains("\t\treturn\n"));
}

#[test]
fn test_free_standing_block_emits_inner_statements() {
    let output = emit_source("{\n say(1)\n}");

    // Blocks contribute no braces of their own
    assert!(output.contains("\tfmt.Println(1)\n"));
    assert!(!output.contains("\t{\n"));
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_literal_formats() {
    let output = emit_source(
        "var i: int = 42\nvar f: float = 3.14\nvar s: str = \"hi\"\nvar b: bool = true",
    );

    assert!(output.contains("var i = 42"));
    assert!(output.contains("var f = 3.140000"));
    assert!(output.contains("var s = \"hi\""));
    assert!(output.contains("var b = true"));
}

#[test]
fn test_infix_is_always_parenthesized() {
    let output = emit_source("var x: int = 1 + 2 * 3");

    assert!(output.contains("var x = (1 + (2 * 3))"));
}

#[test]
fn test_prefix_is_parenthesized() {
    let output = emit_source("var x: int = -5");

    assert!(output.contains("var x = (-5)"));
}

#[test]
fn test_string_escapes_pass_through() {
    let output = emit_source("var s: str = \"line\\nbreak\"");

    assert!(output.contains("var s = \"line\\nbreak\""));
}

#[test]
fn test_identifiers_emit_verbatim() {
    let output = emit_source("var x: int = 1\nvar y: int = x + x");

    assert!(output.contains("var y = (x + x)"));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_emission_is_deterministic() {
    let source = "var x: int = 1\nfor i in 0..3 {\n if i > x {\n  say(i)\n }\n}";
    let (program, _) = parse(tokenize(source));

    assert_eq!(emit(&program), emit(&program));
}

#[test]
fn test_full_program_snapshot() {
    let source = "var x: int = 5\nif x > 3 {\n say(\"big\")\n} else {\n say(\"small\")\n}";

    let expected = "package main\n\n\
                    import \"fmt\"\n\n\
                    func main() {\n\
                    \tvar x = 5\n\
                    \tif (x > 3) {\n\
                    \t\tfmt.Println(\"big\")\n\
                    \t} else {\n\
                    \t\tfmt.Println(\"small\")\n\
                    \t}\n\
                    }\n";

    assert_eq!(emit_source(source), expected);
}
