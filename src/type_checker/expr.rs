use crate::{
    ast::expressions::{BinaryOp, Expr, ExprKind, IdentifierRef, UnaryOp},
    errors::errors::{Error, ErrorImpl},
    types::types::{Type, TypeId},
    Position,
};

use super::{
    inference::{infer_binary, infer_unary, is_valid_cast},
    type_checker::TypeChecker,
};

fn type_check_assignment(
    type_checker: &mut TypeChecker,
    lhs: &mut Expr,
    rhs: &mut Expr,
    position: Position,
) -> Result<TypeId, Error> {
    let lhs_type = type_check_expr(type_checker, lhs)?;
    let rhs_type = type_checker.check_rvalue(rhs)?;

    if !type_checker.types().is_lvalue(lhs_type) {
        type_checker.report(ErrorImpl::AssignToRValue, position)?;
        return Ok(lhs_type);
    }

    let target = type_checker.types().lvalue_subtype(lhs_type);
    if rhs_type != target {
        let error = ErrorImpl::AssignmentTypeMatchError {
            expected: type_checker.display(target),
            received: type_checker.display(rhs_type),
        };
        type_checker.report(error, rhs.span.start)?;
    }
    Ok(target)
}

fn type_check_binary(
    type_checker: &mut TypeChecker,
    op: BinaryOp,
    lhs: &mut Expr,
    rhs: &mut Expr,
    position: Position,
) -> Result<TypeId, Error> {
    if op == BinaryOp::Assign {
        return type_check_assignment(type_checker, lhs, rhs, position);
    }

    let lhs_type = type_checker.check_rvalue(lhs)?;
    let rhs_type = type_checker.check_rvalue(rhs)?;

    if let Some(ty) = infer_binary(type_checker.types(), op, lhs_type, rhs_type) {
        return Ok(ty);
    }

    let boolean = type_checker.types().boolean();
    if op.is_logical() {
        let (received, position) = if lhs_type != boolean {
            (lhs_type, lhs.span.start)
        } else {
            (rhs_type, rhs.span.start)
        };
        let received = type_checker.display(received);
        type_checker.report(ErrorImpl::LogicalOperandNotBool { received }, position)?;
        Ok(boolean)
    } else if op.is_comparison() {
        let error = if lhs_type == rhs_type {
            ErrorImpl::VoidComparison
        } else {
            ErrorImpl::ComparisonTypeMatchError {
                lhs: type_checker.display(lhs_type),
                rhs: type_checker.display(rhs_type),
            }
        };
        type_checker.report(error, position)?;
        Ok(boolean)
    } else {
        let error = ErrorImpl::ArithmeticTypeMatchError {
            operator: op.symbol().to_string(),
            lhs: type_checker.display(lhs_type),
            rhs: type_checker.display(rhs_type),
        };
        type_checker.report(error, position)?;
        Ok(lhs_type)
    }
}

fn type_check_unary(
    type_checker: &mut TypeChecker,
    op: UnaryOp,
    operand: &mut Expr,
    position: Position,
) -> Result<TypeId, Error> {
    let operand_type = match op {
        // the address is taken of the location itself
        UnaryOp::AddressOf => type_check_expr(type_checker, operand)?,
        _ => type_checker.check_rvalue(operand)?,
    };

    if let Some(ty) = infer_unary(type_checker.types(), op, operand_type) {
        return Ok(ty);
    }

    let received = type_checker.display(operand_type);
    let (error, ty) = match op {
        UnaryOp::Plus | UnaryOp::Minus => (ErrorImpl::InvalidSignOperand { received }, operand_type),
        UnaryOp::Not => (
            ErrorImpl::InvalidNotOperand { received },
            type_checker.types().boolean(),
        ),
        UnaryOp::Deref => (ErrorImpl::DerefNonPointer { received }, operand_type),
        UnaryOp::AddressOf => (ErrorImpl::AddressOfRValue { received }, operand_type),
    };
    type_checker.report(error, position)?;
    Ok(ty)
}

fn type_check_subscript(
    type_checker: &mut TypeChecker,
    base: &mut Expr,
    index: &mut Expr,
) -> Result<TypeId, Error> {
    let base_type = type_checker.check_rvalue(base)?;
    let index_type = type_checker.check_rvalue(index)?;

    if index_type != type_checker.types().int() {
        let received = type_checker.display(index_type);
        type_checker.report(ErrorImpl::IndexNotInt { received }, index.span.start)?;
    }

    let element = match type_checker.types().get(base_type) {
        Type::Pointer(element) => Some(*element),
        Type::Array { element, .. } => Some(*element),
        _ => None,
    };

    match element {
        Some(element) => Ok(type_checker.types().lvalue(element)),
        None => {
            let received = type_checker.display(base_type);
            type_checker.report(ErrorImpl::NotSubscriptable { received }, base.span.start)?;
            Ok(base_type)
        }
    }
}

fn type_check_call(
    type_checker: &mut TypeChecker,
    callee: &mut Expr,
    arguments: &mut [Expr],
    position: Position,
) -> Result<TypeId, Error> {
    let callee_type = type_check_expr(type_checker, callee)?;

    let mut argument_types = Vec::with_capacity(arguments.len());
    for argument in arguments.iter_mut() {
        argument_types.push(type_checker.check_rvalue(argument)?);
    }

    let signature = match type_checker.types().get(callee_type) {
        Type::Function {
            return_type,
            params,
        } => Some((*return_type, params.clone())),
        _ => None,
    };

    let Some((return_type, params)) = signature else {
        let received = type_checker.display(callee_type);
        type_checker.report(ErrorImpl::NotCallable { received }, callee.span.start)?;
        return Ok(type_checker.types().int());
    };

    if params != argument_types {
        let error = ErrorImpl::ArgumentTypeMatchError {
            expected: type_checker.types().display_list(&params),
            received: type_checker.types().display_list(&argument_types),
        };
        type_checker.report(error, position)?;
    }
    Ok(return_type)
}

fn type_check_cast(
    type_checker: &mut TypeChecker,
    inner: &mut Expr,
    target: TypeId,
    position: Position,
) -> Result<TypeId, Error> {
    let from = type_checker.check_rvalue(inner)?;

    if !is_valid_cast(type_checker.types(), from, target) {
        let error = ErrorImpl::InvalidCast {
            from: type_checker.display(from),
            to: type_checker.display(target),
        };
        type_checker.report(error, position)?;
    }
    Ok(target)
}

fn type_check_identifier(
    type_checker: &mut TypeChecker,
    identifier: &mut IdentifierRef,
    position: Position,
) -> Result<TypeId, Error> {
    let local = if identifier.is_qualified() {
        None
    } else {
        type_checker.locals.lookup(&identifier.name)
    };

    let found = match local {
        Some(ty) => Some(ty),
        None => match type_checker
            .globals
            .resolve(&identifier.module_path, &identifier.name)
        {
            Some((ty, path)) => {
                identifier.resolved_path = Some(path);
                Some(ty)
            }
            None => None,
        },
    };

    let Some(ty) = found else {
        type_checker.report(
            ErrorImpl::SymbolNotDeclared {
                symbol: identifier.qualified_name(),
            },
            position,
        )?;
        return Ok(type_checker.types().int());
    };

    // functions are values, everything else named is a location
    if type_checker.types().is_function(ty) {
        Ok(ty)
    } else {
        Ok(type_checker.types().lvalue(ty))
    }
}

/// Checks `expr` bottom-up, storing the type on every node it visits and
/// inserting lvalue-to-rvalue conversions where a value is read.
pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &mut Expr) -> Result<TypeId, Error> {
    let position = expr.span.start;

    let ty = match &mut expr.kind {
        ExprKind::Binary { op, lhs, rhs } => type_check_binary(type_checker, *op, lhs, rhs, position)?,
        ExprKind::Unary { op, operand } => type_check_unary(type_checker, *op, operand, position)?,
        ExprKind::Subscript { base, index } => type_check_subscript(type_checker, base, index)?,
        ExprKind::Call { callee, arguments } => {
            type_check_call(type_checker, callee, arguments, position)?
        }
        ExprKind::Cast { expr: inner, target } => {
            type_check_cast(type_checker, inner, *target, position)?
        }
        ExprKind::LValueToRValue(inner) => {
            let inner_type = type_check_expr(type_checker, inner)?;
            type_checker.types().lvalue_subtype(inner_type)
        }
        ExprKind::Identifier(identifier) => {
            type_check_identifier(type_checker, identifier, position)?
        }
        ExprKind::IntLiteral(_) => type_checker.types().int(),
        ExprKind::DoubleLiteral(_) => type_checker.types().double(),
        ExprKind::CharLiteral(_) => type_checker.types().char(),
        ExprKind::StringLiteral(_) => {
            let char = type_checker.types().char();
            type_checker.types().pointer(char)
        }
        ExprKind::BoolLiteral(_) => type_checker.types().boolean(),
    };

    expr.ty = Some(ty);
    Ok(ty)
}
