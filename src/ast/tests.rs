use crate::{
    ast::{
        ast::{Decl, Module},
        display::TreePrinter,
        expressions::{BinaryOp, Expr, ExprKind, IdentifierRef},
        statements::Stmt,
    },
    parser::parser::parse_program,
    session::Session,
    type_checker::type_checker::type_check,
    Span,
};

fn parse(session: &mut Session, source: &str) -> Module {
    let file = session.sources.add("test.el", source);
    let module = parse_program(session, file, "main").expect("parsing should not abort");
    assert!(
        !session.diagnostics.has_errors(),
        "unexpected diagnostics: {:?}",
        session.diagnostics.errors()
    );
    module
}

fn print(source: &str) -> String {
    let mut session = Session::default();
    let module = parse(&mut session, source);
    TreePrinter::new(&session.types).print_program(&module)
}

const PROGRAM: &str = r#"
import util;

extern func puts(s: *char) -> int;
func add(a: int, b: int) -> int;

mod math {
    func square(x: double) -> double { return x * x; }
    mod inner { func nothing() { } }
}

func main() -> int {
    let x: int = 1;
    let p = &x;
    let c = '\n';
    let values: [double ; 3];
    if x < 2 {
        *p = (x + 1) * 2;
    } else if x == 3 {
        ;
    } else {
        return -x;
    }
    while !(x >= 10) && true {
        x = x + 1;
        { let shadow = values[0]; }
    }
    puts("hi\t\"there\"");
    return math::square(x as double) as int;
}
"#;

#[test]
fn test_print_simple_function() {
    let printed = print("func main() -> int { let x: int = 1; x = x + 2 * 3; return x; }");

    assert_eq!(
        printed,
        "func main() -> int {\n    let x: int = 1;\n    x = (x + (2 * 3));\n    return x;\n}\n"
    );
}

#[test]
fn test_print_declarations_and_modules() {
    let printed = print("extern func puts(s: *char) -> int; func f(); mod m { func g(a: [int ; 2]) { } }");

    assert_eq!(
        printed,
        "extern func puts(s: *char) -> int;\nfunc f();\nmod m {\n    func g(a: [int ; 2]) {\n    }\n}\n"
    );
}

#[test]
fn test_print_control_flow() {
    let printed = print("func f(x: int) { if x < 1 { ; } else if x > 2 { return; } else { x = 0; } }");

    assert_eq!(
        printed,
        "func f(x: int) {\n    if x < 1 {\n        ;\n    } else if x > 2 {\n        return;\n    } else {\n        x = 0;\n    }\n}\n"
    );
}

#[test]
fn test_printed_program_parses_back_to_the_same_tree() {
    let first = print(PROGRAM);
    let second = print(&first);

    assert_eq!(first, second);
    assert!(first.starts_with("import util;\n"));
    assert!(first.contains("    return math::square(x as double) as int;\n"));
    assert!(first.contains("    puts(\"hi\\t\\\"there\\\"\");\n"));
    assert!(first.contains("    let c = '\\n';\n"));
    assert!(first.contains("    while !(x >= 10) && true {\n"));
}

#[test]
fn test_print_literals() {
    let session = Session::default();
    let literal = |kind| TreePrinter::new(&session.types).print_expr(&Expr::new(kind, Span::null()));

    assert_eq!(literal(ExprKind::DoubleLiteral(2.0)), "2.0");
    assert_eq!(literal(ExprKind::DoubleLiteral(0.25)), "0.25");
    assert_eq!(literal(ExprKind::CharLiteral('\'')), "'\\''");
    assert_eq!(literal(ExprKind::CharLiteral('\0')), "'\\0'");
    assert_eq!(literal(ExprKind::StringLiteral(String::from("a\\b"))), "\"a\\\\b\"");
    assert_eq!(literal(ExprKind::BoolLiteral(false)), "false");
    assert_eq!(literal(ExprKind::IntLiteral(42)), "42");
}

#[test]
fn test_print_qualified_identifier() {
    let session = Session::default();
    let identifier = IdentifierRef::new(
        String::from("g"),
        vec![String::from("a"), String::from("b")],
    );
    let expr = Expr::new(ExprKind::Identifier(identifier), Span::null());

    assert_eq!(TreePrinter::new(&session.types).print_expr(&expr), "a::b::g");
}

#[test]
fn test_annotated_print_shows_types_and_conversions() {
    let mut session = Session::default();
    let mut module = parse(&mut session, "func f(a: int) -> int { return a + 1; }");
    type_check(&mut session, &mut module).expect("no abort");

    let value = match &module.declarations[0] {
        Decl::Definition(def) => match &def.body.body[0] {
            Stmt::Return(stmt) => stmt.value.clone().expect("value"),
            other => panic!("expected a return, found {:?}", other),
        },
        other => panic!("expected a definition, found {:?}", other),
    };

    assert_eq!(
        TreePrinter::annotated(&session.types).print_expr(&value),
        "rvalue(a /* int<lval> */) + 1 /* int */ /* int */"
    );
    // plain printing hides the inserted conversion
    assert_eq!(TreePrinter::new(&session.types).print_expr(&value), "a + 1");
}

#[test]
fn test_annotated_print_marks_unchecked_nodes() {
    let session = Session::default();
    let expr = Expr::new(
        ExprKind::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(Expr::new(ExprKind::IntLiteral(1), Span::null())),
            rhs: Box::new(Expr::new(ExprKind::IntLiteral(2), Span::null())),
        },
        Span::null(),
    );

    assert_eq!(
        TreePrinter::annotated(&session.types).print_expr(&expr),
        "1 /* ? */ + 2 /* ? */ /* ? */"
    );
}

#[test]
fn test_module_lookups() {
    let mut session = Session::default();
    let module = parse(&mut session, "mod a { func f() { } } func g() { }");

    assert!(module.find_module("a").is_some());
    assert!(module.find_module("g").is_none());
    assert!(module.find_definition("g").is_some());
    assert!(module.find_module("a").unwrap().find_definition("f").is_some());
}
