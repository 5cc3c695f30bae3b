// tests/parser_tests.rs

use simplescript::ast::{BinOp, Expr, Program, Statement, UnOp};
use simplescript::diagnostics::Diagnostic;
use simplescript::lexer::tokenize;
use simplescript::parser::parse;

fn parse_source(source: &str) -> (Program, Vec<Diagnostic>) {
    parse(tokenize(source))
}

fn parse_clean(source: &str) -> Program {
    let (program, errors) = parse_source(source);
    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    program
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_var_declarations() {
    let test_cases = vec![
        ("var x: int = 5", "x", Some("int"), false),
        ("const y: float = 3.14", "y", Some("float"), true),
        ("var name = \"Victor\"", "name", None, false),
    ];

    for (input, expected_name, expected_type, expected_const) in test_cases {
        let program = parse_clean(input);
        assert_eq!(program.statements.len(), 1, "Failed for input: {}", input);

        match &program.statements[0] {
            Statement::VarDecl {
                is_const,
                name,
                declared_type,
                ..
            } => {
                assert_eq!(name, expected_name);
                assert_eq!(declared_type.as_deref(), expected_type);
                assert_eq!(*is_const, expected_const);
            }
            other => panic!("expected VarDecl, got {:?}", other),
        }
    }
}

#[test]
fn test_var_decl_value() {
    let program = parse_clean("var x: int = 5");

    match &program.statements[0] {
        Statement::VarDecl { value, .. } => {
            assert!(matches!(value, Expr::Integer { value: 5, .. }));
        }
        other => panic!("expected VarDecl, got {:?}", other),
    }
}

#[test]
fn test_declared_type_is_captured_verbatim() {
    // The parser stores whatever follows ':'; judging it is the
    // analyzer's job
    let program = parse_clean("var x: whatever = 5");

    match &program.statements[0] {
        Statement::VarDecl { declared_type, .. } => {
            assert_eq!(declared_type.as_deref(), Some("whatever"));
        }
        other => panic!("expected VarDecl, got {:?}", other),
    }
}

// ============================================================================
// Assignments
// ============================================================================

#[test]
fn test_single_assignment() {
    let program = parse_clean("x = 10");

    match &program.statements[0] {
        Statement::Assignment {
            targets, values, ..
        } => {
            assert_eq!(targets, &vec!["x".to_string()]);
            assert_eq!(values.len(), 1);
        }
        other => panic!("expected Assignment, got {:?}", other),
    }
}

#[test]
fn test_multi_assignment() {
    let program = parse_clean("a, b = 1, 2");

    match &program.statements[0] {
        Statement::Assignment {
            targets, values, ..
        } => {
            assert_eq!(targets, &vec!["a".to_string(), "b".to_string()]);
            assert_eq!(values.len(), 2);
        }
        other => panic!("expected Assignment, got {:?}", other),
    }
}

#[test]
fn test_assignment_count_mismatch_is_accepted() {
    // Target/value arity is not the parser's concern
    let program = parse_clean("a, b = 1");

    match &program.statements[0] {
        Statement::Assignment {
            targets, values, ..
        } => {
            assert_eq!(targets.len(), 2);
            assert_eq!(values.len(), 1);
        }
        other => panic!("expected Assignment, got {:?}", other),
    }
}

// ============================================================================
// Say
// ============================================================================

#[test]
fn test_say_statement() {
    let program = parse_clean("say(\"hello\", 10)");

    match &program.statements[0] {
        Statement::Say { args, .. } => assert_eq!(args.len(), 2),
        other => panic!("expected Say, got {:?}", other),
    }
}

#[test]
fn test_say_with_no_arguments() {
    let program = parse_clean("say()");

    match &program.statements[0] {
        Statement::Say { args, .. } => assert!(args.is_empty()),
        other => panic!("expected Say, got {:?}", other),
    }
}

#[test]
fn test_say_requires_parentheses() {
    let (_, errors) = parse_source("say 1");
    assert!(!errors.is_empty());
}

// ============================================================================
// Control Flow
// ============================================================================

#[test]
fn test_if_else() {
    let program = parse_clean("if x > 10 { say(\"major\") } else { say(\"minor\") }");

    match &program.statements[0] {
        Statement::If {
            consequence,
            alternative,
            ..
        } => {
            assert_eq!(consequence.statements.len(), 1);
            match alternative.as_deref() {
                Some(Statement::Block(block)) => assert_eq!(block.statements.len(), 1),
                other => panic!("expected else Block, got {:?}", other),
            }
        }
        other => panic!("expected If, got {:?}", other),
    }
}

#[test]
fn test_else_if_chains_as_nested_if() {
    let program = parse_clean("if a { say(1) } else if b { say(2) } else { say(3) }");

    match &program.statements[0] {
        Statement::If { alternative, .. } => match alternative.as_deref() {
            Some(Statement::If { alternative, .. }) => {
                assert!(matches!(
                    alternative.as_deref(),
                    Some(Statement::Block(_))
                ));
            }
            other => panic!("expected chained If, got {:?}", other),
        },
        other => panic!("expected If, got {:?}", other),
    }
}

#[test]
fn test_if_without_else() {
    let program = parse_clean("if x > 0 { say(x) }");

    match &program.statements[0] {
        Statement::If { alternative, .. } => assert!(alternative.is_none()),
        other => panic!("expected If, got {:?}", other),
    }
}

#[test]
fn test_for_statement() {
    let program = parse_clean("for i in 0..10 { say(i) }");

    match &program.statements[0] {
        Statement::For {
            iterator,
            start,
            end,
            body,
            ..
        } => {
            assert_eq!(iterator, "i");
            assert!(matches!(start, Expr::Integer { value: 0, .. }));
            assert!(matches!(end, Expr::Integer { value: 10, .. }));
            assert_eq!(body.statements.len(), 1);
        }
        other => panic!("expected For, got {:?}", other),
    }
}

#[test]
fn test_for_with_expression_bounds() {
    let program = parse_clean("for i in a + 1..b * 2 { say(i) }");

    match &program.statements[0] {
        Statement::For { start, end, .. } => {
            assert!(matches!(start, Expr::Infix { op: BinOp::Add, .. }));
            assert!(matches!(end, Expr::Infix { op: BinOp::Mul, .. }));
        }
        other => panic!("expected For, got {:?}", other),
    }
}

#[test]
fn test_return_break_continue() {
    let program = parse_clean("for i in 0..3 { break\ncontinue\nreturn i }");

    match &program.statements[0] {
        Statement::For { body, .. } => {
            assert!(matches!(body.statements[0], Statement::Break { .. }));
            assert!(matches!(body.statements[1], Statement::Continue { .. }));
            assert!(matches!(
                body.statements[2],
                Statement::Return { value: Some(_), .. }
            ));
        }
        other => panic!("expected For, got {:?}", other),
    }
}

#[test]
fn test_bare_return() {
    let program = parse_clean("if done { return }");

    match &program.statements[0] {
        Statement::If { consequence, .. } => {
            assert!(matches!(
                consequence.statements[0],
                Statement::Return { value: None, .. }
            ));
        }
        other => panic!("expected If, got {:?}", other),
    }
}

#[test]
fn test_free_standing_block() {
    let program = parse_clean("{ var x: int = 1 }");

    match &program.statements[0] {
        Statement::Block(block) => assert_eq!(block.statements.len(), 1),
        other => panic!("expected Block, got {:?}", other),
    }
}

// ============================================================================
// Expression Precedence
// ============================================================================

#[test]
fn test_factor_binds_tighter_than_term() {
    let program = parse_clean("x = 1 + 2 * 3");

    // Should be: Add(1, Mul(2, 3))
    match &program.statements[0] {
        Statement::Assignment { values, .. } => match &values[0] {
            Expr::Infix {
                op: BinOp::Add,
                left,
                right,
                ..
            } => {
                assert!(matches!(**left, Expr::Integer { value: 1, .. }));
                assert!(matches!(
                    **right,
                    Expr::Infix { op: BinOp::Mul, .. }
                ));
            }
            other => panic!("expected addition at the root, got {:?}", other),
        },
        other => panic!("expected Assignment, got {:?}", other),
    }
}

#[test]
fn test_parentheses_override_precedence() {
    let program = parse_clean("x = (1 + 2) * 3");

    // Should be: Mul(Add(1, 2), 3)
    match &program.statements[0] {
        Statement::Assignment { values, .. } => match &values[0] {
            Expr::Infix {
                op: BinOp::Mul,
                left,
                right,
                ..
            } => {
                assert!(matches!(**left, Expr::Infix { op: BinOp::Add, .. }));
                assert!(matches!(**right, Expr::Integer { value: 3, .. }));
            }
            other => panic!("expected multiplication at the root, got {:?}", other),
        },
        other => panic!("expected Assignment, got {:?}", other),
    }
}

#[test]
fn test_comparison_binds_looser_than_term() {
    let program = parse_clean("x = a + 1 < b - 2");

    match &program.statements[0] {
        Statement::Assignment { values, .. } => match &values[0] {
            Expr::Infix {
                op: BinOp::Lt,
                left,
                right,
                ..
            } => {
                assert!(matches!(**left, Expr::Infix { op: BinOp::Add, .. }));
                assert!(matches!(**right, Expr::Infix { op: BinOp::Sub, .. }));
            }
            other => panic!("expected comparison at the root, got {:?}", other),
        },
        other => panic!("expected Assignment, got {:?}", other),
    }
}

#[test]
fn test_infix_is_left_associative() {
    let program = parse_clean("x = 1 - 2 - 3");

    // Should be: Sub(Sub(1, 2), 3)
    match &program.statements[0] {
        Statement::Assignment { values, .. } => match &values[0] {
            Expr::Infix {
                op: BinOp::Sub,
                left,
                right,
                ..
            } => {
                assert!(matches!(**left, Expr::Infix { op: BinOp::Sub, .. }));
                assert!(matches!(**right, Expr::Integer { value: 3, .. }));
            }
            other => panic!("expected subtraction at the root, got {:?}", other),
        },
        other => panic!("expected Assignment, got {:?}", other),
    }
}

#[test]
fn test_unary_minus_binds_single_operand() {
    let program = parse_clean("x = -5 + 3");

    // Should be: Add(Neg(5), 3)
    match &program.statements[0] {
        Statement::Assignment { values, .. } => match &values[0] {
            Expr::Infix {
                op: BinOp::Add,
                left,
                ..
            } => {
                assert!(matches!(
                    **left,
                    Expr::Prefix { op: UnOp::Neg, .. }
                ));
            }
            other => panic!("expected addition at the root, got {:?}", other),
        },
        other => panic!("expected Assignment, got {:?}", other),
    }
}

#[test]
fn test_boolean_literals() {
    let program = parse_clean("x = true\ny = false");

    match &program.statements[0] {
        Statement::Assignment { values, .. } => {
            assert!(matches!(values[0], Expr::Boolean { value: true, .. }));
        }
        other => panic!("expected Assignment, got {:?}", other),
    }
    match &program.statements[1] {
        Statement::Assignment { values, .. } => {
            assert!(matches!(values[0], Expr::Boolean { value: false, .. }));
        }
        other => panic!("expected Assignment, got {:?}", other),
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn test_missing_equals_in_var_decl() {
    let (_, errors) = parse_source("var x: int 5");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("expected '='"));
    assert!(errors[0].message.contains("'5'"));
}

#[test]
fn test_missing_closing_paren() {
    let (_, errors) = parse_source("say(1, 2");

    assert!(!errors.is_empty());
}

#[test]
fn test_unexpected_token_in_expression() {
    let (_, errors) = parse_source("var x: int = )");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("unexpected token ')'"));
}

#[test]
fn test_error_carries_position() {
    let (_, errors) = parse_source("var x: int =\nvar");

    assert!(!errors.is_empty());
    assert_eq!(errors[0].line, 2);
}

#[test]
fn test_parser_recovers_and_collects_multiple_errors() {
    let (program, errors) = parse_source("var = 1\nvar x: int = 2\nvar = 3");

    assert_eq!(errors.len(), 2);
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_parser_is_total_on_garbage_tokens() {
    // Unparseable input still yields a program, never a panic
    let (program, _) = parse_source(") ( } { .. = ,");
    assert!(program.statements.is_empty());
}

#[test]
fn test_integer_literal_out_of_range() {
    let (_, errors) = parse_source("var x: int = 99999999999999999999");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("out of range"));
}
