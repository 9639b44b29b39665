use std::mem;

use crate::{
    ast::{
        ast::{Decl, FnDecl, FnDef, Module},
        expressions::{Expr, ExprKind},
        statements::{BlockStmt, IfStmt, LetStmt, ReturnStmt, Stmt, WhileStmt},
    },
    errors::errors::{Error, ErrorImpl},
    session::Session,
    types::{
        interner::TypeInterner,
        types::{Type, TypeId},
    },
    Position,
};

use super::{
    expr::type_check_expr,
    symbol_table::{DeclConflict, GlobalTable, LocalTable},
};

pub struct TypeChecker<'s> {
    session: &'s mut Session,
    pub locals: LocalTable,
    pub globals: GlobalTable,
    /// Return type of the function whose body is being checked.
    pub return_type: Option<TypeId>,
}

impl<'s> TypeChecker<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        TypeChecker {
            session,
            locals: LocalTable::new(),
            globals: GlobalTable::new(),
            return_type: None,
        }
    }

    pub fn types(&mut self) -> &mut TypeInterner {
        &mut self.session.types
    }

    pub fn display(&self, ty: TypeId) -> String {
        self.session.types.display(ty)
    }

    pub fn report(&mut self, error: ErrorImpl, position: Position) -> Result<(), Error> {
        self.session.report(Error::new(error, position))
    }

    /// Runs `check` inside a fresh local scope, closing it on every path out.
    pub fn with_scope<T>(
        &mut self,
        check: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.locals.begin_scope();
        let result = check(self);
        self.locals.end_scope();
        result
    }

    /// Wraps `expr` in an lvalue-to-rvalue conversion if it denotes a
    /// location. Already converted expressions are left alone.
    pub fn rvalue(&mut self, expr: &mut Expr) -> Option<TypeId> {
        let ty = expr.ty?;
        let subtype = match self.session.types.get(ty) {
            Type::LValue(subtype) => *subtype,
            _ => return Some(ty),
        };

        let span = expr.span;
        let location = mem::replace(expr, Expr::new(ExprKind::BoolLiteral(false), span));
        *expr = Expr {
            kind: ExprKind::LValueToRValue(Box::new(location)),
            span,
            ty: Some(subtype),
        };
        Some(subtype)
    }

    /// Checks `expr` and converts the result to an rvalue.
    pub fn check_rvalue(&mut self, expr: &mut Expr) -> Result<TypeId, Error> {
        let ty = type_check_expr(self, expr)?;
        Ok(self.rvalue(expr).unwrap_or(ty))
    }
}

pub fn type_check_block(type_checker: &mut TypeChecker, block: &mut BlockStmt) -> Result<(), Error> {
    type_checker.with_scope(|type_checker| {
        for stmt in block.iter_mut() {
            type_check_stmt(type_checker, stmt)?;
        }
        Ok(())
    })
}

fn type_check_condition(
    type_checker: &mut TypeChecker,
    condition: &mut Expr,
    construct: &str,
) -> Result<(), Error> {
    let ty = type_checker.check_rvalue(condition)?;
    if ty != type_checker.types().boolean() {
        let received = type_checker.display(ty);
        type_checker.report(
            ErrorImpl::ConditionNotBool {
                construct: construct.to_string(),
                received,
            },
            condition.span.start,
        )?;
    }
    Ok(())
}

fn type_check_let(type_checker: &mut TypeChecker, stmt: &mut LetStmt) -> Result<(), Error> {
    let initializer_type = match &mut stmt.initializer {
        Some(initializer) => Some(type_checker.check_rvalue(initializer)?),
        None => None,
    };

    let bound_type = match (stmt.declared_type, initializer_type) {
        (Some(declared), Some(received)) => {
            if declared != received {
                let error = ErrorImpl::TypeMatchError {
                    expected: type_checker.display(declared),
                    received: type_checker.display(received),
                };
                let position = stmt
                    .initializer
                    .as_ref()
                    .map_or(stmt.span.start, |initializer| initializer.span.start);
                type_checker.report(error, position)?;
            }
            declared
        }
        (Some(declared), None) => declared,
        (None, Some(received)) => received,
        // already reported by the parser
        (None, None) => type_checker.types().int(),
    };

    if !type_checker.locals.declare(&stmt.name, bound_type) {
        type_checker.report(
            ErrorImpl::VariableAlreadyDeclared {
                variable: stmt.name.clone(),
            },
            stmt.span.start,
        )?;
    }

    stmt.bound_type = Some(bound_type);
    Ok(())
}

fn type_check_if(type_checker: &mut TypeChecker, stmt: &mut IfStmt) -> Result<(), Error> {
    for (condition, body) in stmt.branches.iter_mut() {
        type_check_condition(type_checker, condition, "if")?;
        type_check_block(type_checker, body)?;
    }

    if let Some(else_body) = &mut stmt.else_body {
        type_check_block(type_checker, else_body)?;
    }
    Ok(())
}

fn type_check_while(type_checker: &mut TypeChecker, stmt: &mut WhileStmt) -> Result<(), Error> {
    type_check_condition(type_checker, &mut stmt.condition, "while")?;
    type_check_block(type_checker, &mut stmt.body)
}

fn type_check_return(type_checker: &mut TypeChecker, stmt: &mut ReturnStmt) -> Result<(), Error> {
    let void = type_checker.types().void();
    let expected = type_checker.return_type.unwrap_or(void);

    let (received, position) = match &mut stmt.value {
        Some(value) => (type_checker.check_rvalue(value)?, value.span.start),
        None => (void, stmt.span.start),
    };

    if received != expected {
        let error = ErrorImpl::ReturnTypeMatchError {
            expected: type_checker.display(expected),
            received: type_checker.display(received),
        };
        type_checker.report(error, position)?;
    }
    Ok(())
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &mut Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::Block(block) => type_check_block(type_checker, block),
        Stmt::Let(stmt) => type_check_let(type_checker, stmt),
        Stmt::Expression(stmt) => {
            if let Some(expression) = &mut stmt.expression {
                type_check_expr(type_checker, expression)?;
            }
            Ok(())
        }
        Stmt::If(stmt) => type_check_if(type_checker, stmt),
        Stmt::While(stmt) => type_check_while(type_checker, stmt),
        Stmt::Return(stmt) => type_check_return(type_checker, stmt),
    }
}

fn report_conflict(
    type_checker: &mut TypeChecker,
    conflict: DeclConflict,
    function: &str,
    current: TypeId,
    position: Position,
) -> Result<(), Error> {
    let error = match conflict {
        DeclConflict::AlreadyDefined => ErrorImpl::FunctionAlreadyDefined {
            function: function.to_string(),
        },
        DeclConflict::ConflictingDeclaration { previous } => ErrorImpl::ConflictingDeclaration {
            function: function.to_string(),
            previous: type_checker.display(previous),
            current: type_checker.display(current),
        },
    };
    type_checker.report(error, position)
}

fn type_check_fn_decl(type_checker: &mut TypeChecker, decl: &FnDecl) -> Result<(), Error> {
    if let Err(conflict) = type_checker.globals.declare_function(&decl.name, decl.ty) {
        report_conflict(type_checker, conflict, &decl.name, decl.ty, decl.span.start)?;
    }
    Ok(())
}

fn type_check_fn_def(type_checker: &mut TypeChecker, def: &mut FnDef) -> Result<(), Error> {
    if let Err(conflict) = type_checker.globals.define_function(&def.name, def.ty) {
        return report_conflict(type_checker, conflict, &def.name, def.ty, def.span.start);
    }

    let (return_type, param_types) = match type_checker.types().get(def.ty) {
        Type::Function {
            return_type,
            params,
        } => (*return_type, params.clone()),
        _ => return Ok(()),
    };

    let outer_locals = mem::take(&mut type_checker.locals);
    type_checker.return_type = Some(return_type);

    let result = type_checker.with_scope(|type_checker| {
        for (name, ty) in def.params.iter().zip(param_types) {
            if !type_checker.locals.declare(name, ty) {
                type_checker.report(
                    ErrorImpl::DuplicateParameter {
                        parameter: name.clone(),
                    },
                    def.span.start,
                )?;
            }
        }

        type_check_block(type_checker, &mut def.body)
    });

    type_checker.return_type = None;
    type_checker.locals = outer_locals;
    result
}

fn type_check_module(type_checker: &mut TypeChecker, module: &mut Module) -> Result<(), Error> {
    if !type_checker.globals.enter_module(&module.name) {
        return type_checker.report(
            ErrorImpl::ModuleAlreadyInPath {
                module: module.name.clone(),
            },
            module.span.start,
        );
    }

    let result = module
        .declarations
        .iter_mut()
        .try_for_each(|decl| type_check_decl(type_checker, decl));

    type_checker.globals.exit_module();
    result
}

pub fn type_check_decl(type_checker: &mut TypeChecker, decl: &mut Decl) -> Result<(), Error> {
    match decl {
        Decl::Function(decl) => type_check_fn_decl(type_checker, decl),
        Decl::Definition(def) => type_check_fn_def(type_checker, def),
        Decl::Module(module) => type_check_module(type_checker, module),
    }
}

/// Annotates `module` (with its imports already merged in) in place.
///
/// Every problem found is reported through the session. `Err` only comes
/// back once the session gives up on the compilation.
pub fn type_check(session: &mut Session, module: &mut Module) -> Result<(), Error> {
    let errors_before = session.diagnostics.count();
    let mut type_checker = TypeChecker::new(session);

    type_check_module(&mut type_checker, module)?;

    tracing::debug!(
        module = %module.name,
        errors = session.diagnostics.count() - errors_before,
        "type checked module"
    );
    Ok(())
}
