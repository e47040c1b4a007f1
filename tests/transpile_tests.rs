use spritescript::transpile;

// ============================================================================
// DECLARATIONS AND STATEMENTS
// ============================================================================

#[test]
fn variable_with_arithmetic_initializer() {
    let ts = transpile("var x = 1 + 2").unwrap();
    assert_eq!(ts, "let x: any = (1 + 2);");
}

#[test]
fn variable_without_initializer_defaults_to_null() {
    let ts = transpile("var y").unwrap();
    assert_eq!(ts, "let y: any = null;");
}

#[test]
fn print_of_member_access() {
    let ts = transpile("print(a.b)").unwrap();
    assert_eq!(ts, "console.log(a.b);");
}

#[test]
fn expression_statement_gets_a_semicolon() {
    let ts = transpile("player.reset()").unwrap();
    assert_eq!(ts, "player.reset();");
}

#[test]
fn statements_join_with_single_newlines() {
    let ts = transpile("var x = 1\nprint(x)").unwrap();
    assert_eq!(ts, "let x: any = 1;\nconsole.log(x);");
}

// ============================================================================
// FUNCTIONS AND RETURN FOLDING
// ============================================================================

#[test]
fn function_with_non_constant_return() {
    let ts = transpile("func add(a, b) return a + b end").unwrap();
    assert_eq!(ts, "function add(a: any, b: any) {\n  return (a + b);\n}");
}

#[test]
fn function_return_folds_literal_arithmetic() {
    let ts = transpile("func add() return 1 + 2 end").unwrap();
    assert_eq!(ts, "function add() {\n  return 3;\n}");
}

#[test]
fn return_folds_mixed_precedence_arithmetic() {
    let ts = transpile("func points() return 2 * 3 + 4 end").unwrap();
    assert!(ts.contains("return 10;"));
}

#[test]
fn return_folding_handles_division_by_zero() {
    let ts = transpile("func boom() return 1 / 0 end").unwrap();
    assert!(ts.contains("return inf;"));
}

#[test]
fn folded_string_return_is_unquoted() {
    let ts = transpile("func greeting() return \"hello\" end").unwrap();
    assert!(ts.contains("return hello;"));
}

#[test]
fn bare_return_before_end() {
    let ts = transpile("func noop() return end").unwrap();
    assert_eq!(ts, "function noop() {\n  return;\n}");
}

#[test]
fn grouping_disables_nothing_but_changes_shape() {
    let ts = transpile("var b = (1 + 2) * 3").unwrap();
    assert_eq!(ts, "let b: any = ((1 + 2) * 3);");
}

// ============================================================================
// EVENT HANDLER REWRITES
// ============================================================================

#[test]
fn on_collision_becomes_host_registration() {
    let ts = transpile("func _on_collision(o) print(o) end").unwrap();
    assert_eq!(ts, "onCollision((o: any) => {\n  console.log(o);\n})");
}

#[test]
fn forever_becomes_host_registration() {
    let ts = transpile("func _forever() x += 1 end").unwrap();
    assert!(ts.starts_with("forever(() => {"));
    assert!(!ts.contains("function _forever"));
}

#[test]
fn on_clone_start_becomes_host_registration() {
    let ts = transpile("func _on_clone_start() print(\"ready\") end").unwrap();
    assert!(ts.starts_with("onCloneStart(() => {"));
    assert!(ts.contains("console.log(\"ready\");"));
}

// ============================================================================
// COMPOUND ASSIGNMENT AND INCREMENT/DECREMENT
// ============================================================================

#[test]
fn compound_add_assign_rewrites_to_plain_assignment() {
    let ts = transpile("x += 5").unwrap();
    assert_eq!(ts, "x = (x + 5);");
}

#[test]
fn compound_sub_assign_on_member() {
    let ts = transpile("player.x -= 2").unwrap();
    assert_eq!(ts, "player.x = (player.x - 2);");
}

#[test]
fn prefix_and_postfix_increment_emit_identically() {
    assert_eq!(transpile("x++").unwrap(), transpile("++x").unwrap());
    assert_eq!(transpile("x++").unwrap(), "x = (x + 1);");
}

#[test]
fn prefix_and_postfix_decrement_emit_identically() {
    assert_eq!(transpile("x--").unwrap(), transpile("--x").unwrap());
    assert_eq!(transpile("x--").unwrap(), "x = (x - 1);");
}

// ============================================================================
// FRONTEND FAILURES
// ============================================================================

#[test]
fn invalid_assignment_target_is_reported() {
    let error = transpile("1 = 2").unwrap_err();
    assert_eq!(error.to_string(), "Invalid assignment target.");
}

#[test]
fn invalid_increment_target_is_reported() {
    let error = transpile("f()++").unwrap_err();
    assert_eq!(error.to_string(), "Invalid increment target.");
}

#[test]
fn missing_variable_name_is_reported_with_lexeme() {
    let error = transpile("var 1 = 2").unwrap_err();
    assert_eq!(error.to_string(), "Expected variable name. Got 1");
}

#[test]
fn unexpected_token_is_reported_with_lexeme() {
    let error = transpile("print(,)").unwrap_err();
    assert_eq!(error.to_string(), "Unexpected token: ,");
}

#[test]
fn unterminated_string_is_reported() {
    let error = transpile("print(\"oops").unwrap_err();
    assert!(error.to_string().contains("Unterminated string literal"));
}
