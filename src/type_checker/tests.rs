//! Unit tests for the type checker module.

use crate::{
    ast::{
        ast::{Decl, FnDef, Module},
        expressions::{Expr, ExprKind, IdentifierRef},
        statements::Stmt,
    },
    errors::errors::{Error, ErrorImpl},
    parser::parser::parse_program,
    session::Session,
    types::types::Type,
    Span,
};

use super::{
    inference::is_valid_cast,
    symbol_table::{DeclConflict, DeclState, GlobalTable, LocalTable},
    type_checker::{type_check, TypeChecker},
};

fn check_source(source: &str) -> (Session, Module, Result<(), Error>) {
    let mut session = Session::default();
    let file = session.sources.add("test.el", source);
    let mut module = parse_program(&mut session, file, "main").expect("parsing should not abort");
    assert!(
        !session.diagnostics.has_errors(),
        "unexpected parse errors: {:?}",
        session.diagnostics.errors()
    );

    let result = type_check(&mut session, &mut module);
    (session, module, result)
}

fn check_clean(source: &str) -> (Session, Module) {
    let (session, module, result) = check_source(source);
    assert!(result.is_ok());
    assert!(
        !session.diagnostics.has_errors(),
        "unexpected diagnostics: {:?}",
        session.diagnostics.errors()
    );
    (session, module)
}

/// Names of every reported diagnostic, in order.
fn error_names(source: &str) -> Vec<&'static str> {
    let (session, _, _) = check_source(source);
    session
        .diagnostics
        .errors()
        .iter()
        .map(|error| error.get_error_name())
        .collect()
}

fn first_error(source: &str) -> ErrorImpl {
    let (session, _, _) = check_source(source);
    session.diagnostics.errors()[0].get_error_impl().clone()
}

fn def<'m>(module: &'m Module, name: &str) -> &'m FnDef {
    module.find_definition(name).expect("definition")
}

fn returned(def: &FnDef) -> &Expr {
    for stmt in def.body.iter() {
        if let Stmt::Return(stmt) = stmt {
            return stmt.value.as_ref().expect("return value");
        }
    }
    panic!("no return statement in {}", def.name);
}

#[test]
fn test_arithmetic_reads_parameters_as_rvalues() {
    let (session, module) = check_clean("func f(a: int) -> int { return a + 1; }");
    let value = returned(def(&module, "f"));

    assert_eq!(value.ty, Some(session.types.int()));
    match &value.kind {
        ExprKind::Binary { lhs, rhs, .. } => {
            assert!(lhs.is_implicit_cast());
            assert_eq!(lhs.ty, Some(session.types.int()));
            let location = lhs.strip_implicit();
            assert!(session.types.is_lvalue(location.ty.unwrap()));
            assert!(!rhs.is_implicit_cast());
        }
        other => panic!("expected a binary expression, found {:?}", other),
    }
}

#[test]
fn test_let_adopts_initializer_type() {
    let (session, module) = check_clean("func f() { let x = 1.5; }");

    match &def(&module, "f").body.body[0] {
        Stmt::Let(stmt) => assert_eq!(stmt.bound_type, Some(session.types.double())),
        other => panic!("expected a let statement, found {:?}", other),
    }
}

#[test]
fn test_let_initializer_mismatch_keeps_declared_type() {
    let (session, module, result) = check_source("func f() { let x = 1.5; let y: int = x; }");

    assert!(result.is_ok());
    assert_eq!(
        session.diagnostics.errors()[0].get_error_impl(),
        &ErrorImpl::TypeMatchError {
            expected: String::from("int"),
            received: String::from("double"),
        }
    );
    match &def(&module, "f").body.body[1] {
        Stmt::Let(stmt) => assert_eq!(stmt.bound_type, Some(session.types.int())),
        other => panic!("expected a let statement, found {:?}", other),
    }
}

#[test]
fn test_assignment_rules() {
    assert_eq!(error_names("func f() { 1 = 2; }"), vec!["AssignToRValue"]);
    assert_eq!(
        first_error("func f() { let x: int; x = true; }"),
        ErrorImpl::AssignmentTypeMatchError {
            expected: String::from("int"),
            received: String::from("bool"),
        }
    );

    let (session, module) = check_clean("func f() -> int { let x: int; return x = 3; }");
    assert_eq!(returned(def(&module, "f")).ty, Some(session.types.int()));
}

#[test]
fn test_undeclared_symbol_is_treated_as_int() {
    assert_eq!(
        first_error("func f() -> int { return y; }"),
        ErrorImpl::SymbolNotDeclared {
            symbol: String::from("y"),
        }
    );
    assert_eq!(error_names("func f() -> int { return y; }").len(), 1);
}

#[test]
fn test_comparisons() {
    check_clean("func f(a: double) -> bool { return a <= 2.0; }");
    check_clean("func f(c: char) -> bool { return c == 'x'; }");

    assert_eq!(
        first_error("func f() -> bool { return 1 < 2.0; }"),
        ErrorImpl::ComparisonTypeMatchError {
            lhs: String::from("int"),
            rhs: String::from("double"),
        }
    );
    assert_eq!(
        error_names("func g(); func f() -> bool { return g() == g(); }"),
        vec!["VoidComparison"]
    );
}

#[test]
fn test_arithmetic_inference() {
    let (session, module) = check_clean("func f(p: *int) -> *int { return p + 1; }");
    assert!(session
        .types
        .is_pointer(returned(def(&module, "f")).ty.unwrap()));

    check_clean("func f(a: double, b: double) -> double { return a * b - a / b; }");
    check_clean("func f(a: int) -> int { return a % 2; }");

    assert_eq!(
        first_error("func f(p: *int) -> *int { return p * 2; }"),
        ErrorImpl::ArithmeticTypeMatchError {
            operator: String::from("*"),
            lhs: String::from("*int"),
            rhs: String::from("int"),
        }
    );
    assert_eq!(
        error_names("func f() -> double { return 1.0 % 2.0; }"),
        vec!["ArithmeticTypeMatchError"]
    );
}

#[test]
fn test_logical_operands_must_be_bool() {
    check_clean("func f(a: bool) -> bool { return a && !a || true; }");
    assert_eq!(
        first_error("func f() -> bool { return 1 && true; }"),
        ErrorImpl::LogicalOperandNotBool {
            received: String::from("int"),
        }
    );
}

#[test]
fn test_unary_operators() {
    check_clean("func f(x: int) -> int { return -x; }");
    check_clean("func f(x: double) -> double { return +x; }");
    check_clean("func f(x: int) -> *int { return &x; }");
    check_clean("func f(p: *int) -> int { *p = 3; return *p; }");

    assert_eq!(
        error_names("func f() { -true; !1; *1; &1; }"),
        vec![
            "InvalidSignOperand",
            "InvalidNotOperand",
            "DerefNonPointer",
            "AddressOfRValue"
        ]
    );
}

#[test]
fn test_address_of_keeps_location() {
    let (session, module) = check_clean("func f(x: int) -> *int { return &x; }");

    match &returned(def(&module, "f")).kind {
        ExprKind::Unary { operand, .. } => {
            assert!(!operand.is_implicit_cast());
            assert!(session.types.is_lvalue(operand.ty.unwrap()));
        }
        other => panic!("expected a unary expression, found {:?}", other),
    }
}

#[test]
fn test_subscripts() {
    let (session, module) = check_clean("func f(a: [int ; 4]) -> int { return a[0]; }");
    let value = returned(def(&module, "f"));
    assert!(value.is_implicit_cast());
    assert_eq!(value.ty, Some(session.types.int()));

    check_clean("func f(s: *char) { s[1] = 'a'; }");

    assert_eq!(
        error_names("func f(a: [int ; 4]) { a[true]; }"),
        vec!["IndexNotInt"]
    );
    assert_eq!(
        first_error("func f() { let x: int; x[0]; }"),
        ErrorImpl::NotSubscriptable {
            received: String::from("int"),
        }
    );
}

#[test]
fn test_calls() {
    let (session, module) =
        check_clean("func g(a: int) -> double; func f() -> double { return g(1); }");
    assert_eq!(
        returned(def(&module, "f")).ty,
        Some(session.types.double())
    );

    assert_eq!(
        first_error("func g(a: int) -> double; func f() -> double { return g(1.0); }"),
        ErrorImpl::ArgumentTypeMatchError {
            expected: String::from("(int)"),
            received: String::from("(double)"),
        }
    );
    assert_eq!(
        error_names("func g(a: int); func f() { g(); }"),
        vec!["ArgumentTypeMatchError"]
    );
    assert_eq!(
        first_error("func f() { let x: int; x(1); }"),
        ErrorImpl::NotCallable {
            received: String::from("int<lval>"),
        }
    );
}

#[test]
fn test_casts() {
    check_clean("func f(x: int) -> double { return x as double; }");
    check_clean("func f(b: bool) -> char { return b as char; }");
    check_clean("func f(p: *int) -> *char { return p as *char; }");
    check_clean("func f(p: *int) -> int { return p as int; }");
    check_clean("func f(x: int) -> *int { return x as *int; }");

    assert_eq!(
        first_error("func f() -> *int { return 1.0 as *int; }"),
        ErrorImpl::InvalidCast {
            from: String::from("double"),
            to: String::from("*int"),
        }
    );
}

#[test]
fn test_cast_validity_table() {
    let mut session = Session::default();
    let types = &mut session.types;
    let int = types.int();
    let double = types.double();
    let void = types.void();
    let pointer = types.pointer(int);
    let array = types.array(int, 2);

    assert!(is_valid_cast(types, int, double));
    assert!(is_valid_cast(types, pointer, int));
    assert!(is_valid_cast(types, array, array));
    assert!(!is_valid_cast(types, double, pointer));
    assert!(!is_valid_cast(types, void, int));
    assert!(!is_valid_cast(types, array, pointer));
}

#[test]
fn test_conditions_must_be_bool() {
    check_clean("func f(a: int) { if a > 0 { } else if a < 0 { } else { } while false { } }");

    assert_eq!(
        first_error("func f() { if 1 { } }"),
        ErrorImpl::ConditionNotBool {
            construct: String::from("if"),
            received: String::from("int"),
        }
    );
    assert_eq!(
        first_error("func f() { while 2.0 { } }"),
        ErrorImpl::ConditionNotBool {
            construct: String::from("while"),
            received: String::from("double"),
        }
    );
}

#[test]
fn test_return_types() {
    check_clean("func f() { return; }");

    assert_eq!(
        first_error("func f() { return 1; }"),
        ErrorImpl::ReturnTypeMatchError {
            expected: String::from("void"),
            received: String::from("int"),
        }
    );
    assert_eq!(
        first_error("func f() -> int { return; }"),
        ErrorImpl::ReturnTypeMatchError {
            expected: String::from("int"),
            received: String::from("void"),
        }
    );
}

#[test]
fn test_function_state_transitions() {
    check_clean("func f(); func f(); func f() { }");

    assert_eq!(
        error_names("func f() { } func f() { }"),
        vec!["FunctionAlreadyDefined"]
    );
    assert_eq!(
        error_names("func f() { } func f();"),
        vec!["FunctionAlreadyDefined"]
    );
    assert_eq!(
        first_error("func f(); func f(a: int);"),
        ErrorImpl::ConflictingDeclaration {
            function: String::from("f"),
            previous: String::from("() -> void"),
            current: String::from("(int) -> void"),
        }
    );
}

#[test]
fn test_rejected_definition_body_is_skipped() {
    let (session, module, _) = check_source("func f() { } func f() { y; }");

    assert_eq!(session.diagnostics.count(), 1);
    match &module.declarations[1] {
        Decl::Definition(def) => match &def.body.body[0] {
            Stmt::Expression(stmt) => assert_eq!(stmt.expression.as_ref().unwrap().ty, None),
            other => panic!("expected an expression statement, found {:?}", other),
        },
        other => panic!("expected a definition, found {:?}", other),
    }
}

#[test]
fn test_same_name_in_sibling_modules() {
    check_clean("mod a { func f() { } } mod b { func f() { } } func f() { }");
}

#[test]
fn test_module_cannot_nest_in_itself() {
    assert_eq!(
        first_error("mod a { mod a { } }"),
        ErrorImpl::ModuleAlreadyInPath {
            module: String::from("a"),
        }
    );
    assert_eq!(error_names("mod main { }"), vec!["ModuleAlreadyInPath"]);
}

#[test]
fn test_qualified_lookup_records_resolved_path() {
    let (_, module) = check_clean(
        "mod a { func g() -> int { return 1; } } func f() -> int { return a::g(); }",
    );

    match &returned(def(&module, "f")).kind {
        ExprKind::Call { callee, .. } => match &callee.kind {
            ExprKind::Identifier(identifier) => assert_eq!(
                identifier.resolved_path,
                Some(vec![String::from("main"), String::from("a")])
            ),
            other => panic!("expected an identifier, found {:?}", other),
        },
        other => panic!("expected a call, found {:?}", other),
    }
}

#[test]
fn test_lookup_walks_enclosing_modules() {
    check_clean("func g() -> int { return 1; } mod a { func f() -> int { return g(); } }");
    check_clean(
        "mod a { func g() { } } mod b { func f() { a::g(); main::a::g(); } }",
    );
    assert_eq!(
        error_names("mod a { func g() { } } func f() { g(); }"),
        vec!["SymbolNotDeclared", "NotCallable"]
    );
}

#[test]
fn test_use_before_declaration_is_unresolved() {
    assert_eq!(
        first_error("func f() -> int { return g(); } func g() -> int { return 1; }"),
        ErrorImpl::SymbolNotDeclared {
            symbol: String::from("g"),
        }
    );
}

#[test]
fn test_recursion_is_visible() {
    check_clean("func f(n: int) -> int { if n == 0 { return 1; } return n * f(n - 1); }");
}

#[test]
fn test_scopes_and_shadowing() {
    assert_eq!(
        error_names("func f() { let x = 1; { let x = true; } let x = 2; }"),
        vec!["VariableAlreadyDeclared"]
    );
    check_clean("func f(x: int) { let x: double = 1.0; }");
    assert_eq!(
        error_names("func f() { { let x = 1; } x; }"),
        vec!["SymbolNotDeclared"]
    );
}

#[test]
fn test_duplicate_parameter() {
    assert_eq!(
        first_error("func f(a: int, a: double) { }"),
        ErrorImpl::DuplicateParameter {
            parameter: String::from("a"),
        }
    );
}

#[test]
fn test_locals_do_not_leak_between_functions() {
    assert_eq!(
        error_names("func f(a: int) { } func g() -> int { return a; }"),
        vec!["SymbolNotDeclared"]
    );
}

#[test]
fn test_error_limit_aborts() {
    let (session, _, result) =
        check_source("func f() { 1 = 1; 1 = 1; 1 = 1; 1 = 1; 1 = 1; 1 = 1; 1 = 1; }");

    assert!(result.unwrap_err().is_abort());
    assert_eq!(session.diagnostics.count(), 5);
    assert!(session.diagnostics.is_aborted());
}

#[test]
fn test_rvalue_conversion_is_idempotent() {
    let mut session = Session::default();
    let int = session.types.int();
    let location = session.types.lvalue(int);

    let mut expr = Expr::new(
        ExprKind::Identifier(IdentifierRef::new(String::from("x"), vec![])),
        Span::null(),
    );
    expr.ty = Some(location);

    let mut type_checker = TypeChecker::new(&mut session);
    assert_eq!(type_checker.rvalue(&mut expr), Some(int));
    assert_eq!(type_checker.rvalue(&mut expr), Some(int));

    match &expr.kind {
        ExprKind::LValueToRValue(inner) => {
            assert!(!inner.is_implicit_cast());
            assert_eq!(inner.ty, Some(location));
        }
        other => panic!("expected a conversion, found {:?}", other),
    }
}

#[test]
fn test_with_scope_is_balanced_on_abort() {
    let mut session = Session::new(crate::config::CompilerConfig::default().with_error_limit(1));
    let mut type_checker = TypeChecker::new(&mut session);

    let result: Result<(), Error> = type_checker.with_scope(|type_checker| {
        type_checker.report(ErrorImpl::AssignToRValue, crate::Position::null())
    });

    assert!(result.is_err());
    assert_eq!(type_checker.locals.depth(), 0);
}

#[test]
fn test_local_table() {
    let mut session = Session::default();
    let int = session.types.int();
    let boolean = session.types.boolean();
    let mut locals = LocalTable::new();

    assert!(!locals.declare("x", int));
    locals.begin_scope();
    assert!(locals.declare("x", int));
    assert!(!locals.declare("x", boolean));
    locals.begin_scope();
    assert!(locals.declare("x", boolean));
    assert_eq!(locals.lookup("x"), Some(boolean));
    locals.end_scope();
    assert_eq!(locals.lookup("x"), Some(int));
    assert_eq!(locals.lookup("y"), None);
}

#[test]
fn test_global_table() {
    let mut session = Session::default();
    let void = session.types.void();
    let first = session.types.function(void, vec![]);
    let int = session.types.int();
    let second = session.types.function(void, vec![int]);

    let mut globals = GlobalTable::new();
    assert!(globals.enter_module("main"));
    assert!(globals.declare_function("f", first).is_ok());
    assert_eq!(globals.state_in_module("f"), (Some(first), DeclState::Declared));
    assert_eq!(
        globals.declare_function("f", second),
        Err(DeclConflict::ConflictingDeclaration { previous: first })
    );
    assert!(globals.define_function("f", first).is_ok());
    assert_eq!(
        globals.define_function("f", first),
        Err(DeclConflict::AlreadyDefined)
    );

    assert!(globals.enter_module("inner"));
    assert!(!globals.enter_module("main"));
    assert_eq!(
        globals.resolve(&[], "f"),
        Some((first, vec![String::from("main")]))
    );
    assert_eq!(
        globals.resolve(&[String::from("main")], "f"),
        Some((first, vec![String::from("main")]))
    );
    assert_eq!(globals.state_in_module("f"), (None, DeclState::None));
    globals.exit_module();
    assert_eq!(globals.module_path(), &[String::from("main")]);
}

#[test]
fn test_string_literal_is_char_pointer() {
    let (session, module) = check_clean("func f() -> *char { return \"hi\"; }");
    let ty = returned(def(&module, "f")).ty.unwrap();

    match session.types.get(ty) {
        Type::Pointer(pointee) => assert_eq!(*pointee, session.types.char()),
        other => panic!("expected a pointer, found {:?}", other),
    }
}
