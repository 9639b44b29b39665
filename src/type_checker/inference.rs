//! Result types of operators and validity of casts.
//!
//! Each function answers `None` when the operand types are not accepted.

use crate::{
    ast::expressions::{BinaryOp, UnaryOp},
    types::{
        interner::TypeInterner,
        types::{Type, TypeId},
    },
};

/// Result of a non-assignment binary operator over two rvalue operands.
pub fn infer_binary(
    types: &TypeInterner,
    op: BinaryOp,
    lhs: TypeId,
    rhs: TypeId,
) -> Option<TypeId> {
    let int = types.int();
    let double = types.double();
    let boolean = types.boolean();

    match op {
        BinaryOp::Add | BinaryOp::Subtract => {
            if (lhs == int || lhs == double) && lhs == rhs {
                Some(lhs)
            } else if types.is_pointer(lhs) && rhs == int {
                Some(lhs)
            } else {
                None
            }
        }
        BinaryOp::Multiply | BinaryOp::Divide => {
            ((lhs == int || lhs == double) && lhs == rhs).then_some(lhs)
        }
        BinaryOp::Modulo => (lhs == int && rhs == int).then_some(int),
        BinaryOp::Equal | BinaryOp::NotEqual => {
            (lhs == rhs && lhs != types.void()).then_some(boolean)
        }
        BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
            (lhs == rhs).then_some(boolean)
        }
        BinaryOp::And | BinaryOp::Or => (lhs == boolean && rhs == boolean).then_some(boolean),
        // assignment has its own rules and never reaches here
        BinaryOp::Assign => None,
    }
}

/// Result of a unary operator. Only `&` expects an lvalue operand; every
/// other operator expects it already converted to an rvalue.
pub fn infer_unary(types: &mut TypeInterner, op: UnaryOp, operand: TypeId) -> Option<TypeId> {
    match op {
        UnaryOp::Plus | UnaryOp::Minus => types.is_numeric(operand).then_some(operand),
        UnaryOp::Not => (operand == types.boolean()).then_some(operand),
        UnaryOp::Deref => match types.get(operand) {
            Type::Pointer(pointee) => {
                let pointee = *pointee;
                Some(types.lvalue(pointee))
            }
            _ => None,
        },
        UnaryOp::AddressOf => match types.get(operand) {
            Type::LValue(subtype) => {
                let subtype = *subtype;
                Some(types.pointer(subtype))
            }
            _ => None,
        },
    }
}

/// Scalars convert between each other, pointers between each other and
/// to or from `int`. Anything converts to its own type.
pub fn is_valid_cast(types: &TypeInterner, from: TypeId, to: TypeId) -> bool {
    if from == to {
        return true;
    }

    let int = types.int();
    match (types.get(from), types.get(to)) {
        _ if types.is_scalar(from) && types.is_scalar(to) => true,
        (Type::Pointer(_), Type::Pointer(_)) => true,
        (Type::Pointer(_), _) => to == int,
        (_, Type::Pointer(_)) => from == int,
        _ => false,
    }
}
