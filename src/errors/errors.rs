use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn is_abort(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::CompilationAborted { .. })
    }

    pub fn get_level(&self) -> ErrorLevel {
        match &self.internal_error {
            ErrorImpl::UnreadableFile { .. }
            | ErrorImpl::ImportNotFound { .. }
            | ErrorImpl::CompilationAborted { .. } => ErrorLevel::FatalError,
            _ => ErrorLevel::Error,
        }
    }

    /// Stable key of the message template, shown between brackets.
    pub fn get_error_name(&self) -> &'static str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::MalformedCharLiteral { .. } => "MalformedCharLiteral",
            ErrorImpl::BadEscape { .. } => "BadEscape",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::LetWithoutTypeOrValue { .. } => "LetWithoutTypeOrValue",
            ErrorImpl::AssignToRValue => "AssignToRValue",
            ErrorImpl::AssignmentTypeMatchError { .. } => "AssignmentTypeMatchError",
            ErrorImpl::ComparisonTypeMatchError { .. } => "ComparisonTypeMatchError",
            ErrorImpl::VoidComparison => "VoidComparison",
            ErrorImpl::ArithmeticTypeMatchError { .. } => "ArithmeticTypeMatchError",
            ErrorImpl::LogicalOperandNotBool { .. } => "LogicalOperandNotBool",
            ErrorImpl::InvalidSignOperand { .. } => "InvalidSignOperand",
            ErrorImpl::InvalidNotOperand { .. } => "InvalidNotOperand",
            ErrorImpl::DerefNonPointer { .. } => "DerefNonPointer",
            ErrorImpl::AddressOfRValue { .. } => "AddressOfRValue",
            ErrorImpl::IndexNotInt { .. } => "IndexNotInt",
            ErrorImpl::NotSubscriptable { .. } => "NotSubscriptable",
            ErrorImpl::NotCallable { .. } => "NotCallable",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::InvalidCast { .. } => "InvalidCast",
            ErrorImpl::SymbolNotDeclared { .. } => "SymbolNotDeclared",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::DuplicateParameter { .. } => "DuplicateParameter",
            ErrorImpl::FunctionAlreadyDefined { .. } => "FunctionAlreadyDefined",
            ErrorImpl::ConflictingDeclaration { .. } => "ConflictingDeclaration",
            ErrorImpl::ModuleAlreadyInPath { .. } => "ModuleAlreadyInPath",
            ErrorImpl::ConditionNotBool { .. } => "ConditionNotBool",
            ErrorImpl::ReturnTypeMatchError { .. } => "ReturnTypeMatchError",
            ErrorImpl::CyclicImport { .. } => "CyclicImport",
            ErrorImpl::ImportNotFound { .. } => "ImportNotFound",
            ErrorImpl::UnreadableFile { .. } => "UnreadableFile",
            ErrorImpl::CompilationAborted { .. } => "CompilationAborted",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { token } => {
                ErrorTip::Suggestion(format!("Unrecognised character `{}`", token))
            }
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "String literal is never closed, did you forget a `\"`?",
            )),
            ErrorImpl::MalformedCharLiteral { literal } => ErrorTip::Suggestion(format!(
                "Character literal `{}` must hold exactly one character",
                literal
            )),
            ErrorImpl::BadEscape { escape } => {
                ErrorTip::Suggestion(format!("Unknown escape sequence `\\{}`", escape))
            }
            ErrorImpl::UnexpectedToken { token, expected } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                token, expected
            )),
            ErrorImpl::UnexpectedEndOfInput { expected } => ErrorTip::Suggestion(format!(
                "Unexpected end of input, expected {}",
                expected
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::LetWithoutTypeOrValue { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` needs a type or an initial value",
                variable
            )),
            ErrorImpl::AssignToRValue => ErrorTip::Suggestion(String::from(
                "Left side of an assignment must be an lvalue",
            )),
            ErrorImpl::AssignmentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Cannot assign a value of type `{}` to a location of type `{}`",
                    received, expected
                ))
            }
            ErrorImpl::ComparisonTypeMatchError { lhs, rhs } => ErrorTip::Suggestion(format!(
                "Cannot compare `{}` with `{}`",
                lhs, rhs
            )),
            ErrorImpl::VoidComparison => {
                ErrorTip::Suggestion(String::from("Values of type `void` cannot be compared"))
            }
            ErrorImpl::ArithmeticTypeMatchError { operator, lhs, rhs } => {
                ErrorTip::Suggestion(format!(
                    "Operator `{}` cannot be applied to `{}` and `{}`",
                    operator, lhs, rhs
                ))
            }
            ErrorImpl::LogicalOperandNotBool { received } => ErrorTip::Suggestion(format!(
                "Logical operators expect `bool` operands, received `{}`",
                received
            )),
            ErrorImpl::InvalidSignOperand { received } => ErrorTip::Suggestion(format!(
                "Sign operators expect `int` or `double`, received `{}`",
                received
            )),
            ErrorImpl::InvalidNotOperand { received } => ErrorTip::Suggestion(format!(
                "Operator `!` expects `bool`, received `{}`",
                received
            )),
            ErrorImpl::DerefNonPointer { received } => ErrorTip::Suggestion(format!(
                "Cannot dereference a value of type `{}`",
                received
            )),
            ErrorImpl::AddressOfRValue { received } => ErrorTip::Suggestion(format!(
                "Cannot take the address of a value of type `{}`",
                received
            )),
            ErrorImpl::IndexNotInt { received } => ErrorTip::Suggestion(format!(
                "Index must be of type `int`, received `{}`",
                received
            )),
            ErrorImpl::NotSubscriptable { received } => ErrorTip::Suggestion(format!(
                "Type `{}` cannot be indexed",
                received
            )),
            ErrorImpl::NotCallable { received } => {
                ErrorTip::Suggestion(format!("Type `{}` is not callable", received))
            }
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument types `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::InvalidCast { from, to } => {
                ErrorTip::Suggestion(format!("Cannot cast `{}` to `{}`", from, to))
            }
            ErrorImpl::SymbolNotDeclared { symbol } => {
                ErrorTip::Suggestion(format!("`{}` is not declared", symbol))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::DuplicateParameter { parameter } => ErrorTip::Suggestion(format!(
                "Parameter `{}` appears more than once",
                parameter
            )),
            ErrorImpl::FunctionAlreadyDefined { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already defined", function))
            }
            ErrorImpl::ConflictingDeclaration {
                function,
                previous,
                current,
            } => ErrorTip::Suggestion(format!(
                "Function `{}` was declared as `{}`, now `{}`",
                function, previous, current
            )),
            ErrorImpl::ModuleAlreadyInPath { module } => ErrorTip::Suggestion(format!(
                "Module `{}` cannot be nested inside itself",
                module
            )),
            ErrorImpl::ConditionNotBool {
                construct,
                received,
            } => ErrorTip::Suggestion(format!(
                "Condition of `{}` must be `bool`, received `{}`",
                construct, received
            )),
            ErrorImpl::ReturnTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Function returns `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::CyclicImport { module, chain } => ErrorTip::Suggestion(format!(
                "Module `{}` imports itself through `{}`",
                module, chain
            )),
            ErrorImpl::ImportNotFound { module, path } => ErrorTip::Suggestion(format!(
                "Cannot find module `{}` at `{}`",
                module, path
            )),
            ErrorImpl::UnreadableFile { path, reason } => {
                ErrorTip::Suggestion(format!("Cannot read `{}`: {}", path, reason))
            }
            ErrorImpl::CompilationAborted { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorLevel {
    Warning,
    Error,
    FatalError,
}

impl Display for ErrorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorLevel::Warning => write!(f, "warning"),
            ErrorLevel::Error => write!(f, "error"),
            ErrorLevel::FatalError => write!(f, "fatal error"),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // lexical
    #[error("unrecognised character: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("malformed character literal: {literal:?}")]
    MalformedCharLiteral { literal: String },
    #[error("unknown escape sequence: \\{escape}")]
    BadEscape { escape: char },

    // syntactic
    #[error("unexpected token {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("let binding {variable:?} has neither a type nor an initializer")]
    LetWithoutTypeOrValue { variable: String },

    // semantic
    #[error("assignment to a non-lvalue")]
    AssignToRValue,
    #[error("assignment types do not match: expected {expected:?}, received {received:?}")]
    AssignmentTypeMatchError { expected: String, received: String },
    #[error("comparison operand types do not match: {lhs:?} and {rhs:?}")]
    ComparisonTypeMatchError { lhs: String, rhs: String },
    #[error("comparison of void values")]
    VoidComparison,
    #[error("invalid operands to {operator:?}: {lhs:?} and {rhs:?}")]
    ArithmeticTypeMatchError {
        operator: String,
        lhs: String,
        rhs: String,
    },
    #[error("logical operand is not bool: {received:?}")]
    LogicalOperandNotBool { received: String },
    #[error("invalid operand to unary sign: {received:?}")]
    InvalidSignOperand { received: String },
    #[error("invalid operand to logical not: {received:?}")]
    InvalidNotOperand { received: String },
    #[error("dereference of non-pointer type {received:?}")]
    DerefNonPointer { received: String },
    #[error("address-of applied to non-lvalue of type {received:?}")]
    AddressOfRValue { received: String },
    #[error("index is not int: {received:?}")]
    IndexNotInt { received: String },
    #[error("type {received:?} is not subscriptable")]
    NotSubscriptable { received: String },
    #[error("type {received:?} is not callable")]
    NotCallable { received: String },
    #[error("argument types do not match: expected {expected:?}, received {received:?}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("invalid cast from {from:?} to {to:?}")]
    InvalidCast { from: String, to: String },
    #[error("symbol {symbol:?} not declared")]
    SymbolNotDeclared { symbol: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMatchError { expected: String, received: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("parameter {parameter:?} declared twice")]
    DuplicateParameter { parameter: String },
    #[error("function {function:?} already defined")]
    FunctionAlreadyDefined { function: String },
    #[error("conflicting declaration of {function:?}: {previous:?} vs {current:?}")]
    ConflictingDeclaration {
        function: String,
        previous: String,
        current: String,
    },
    #[error("module {module:?} is already in the current path")]
    ModuleAlreadyInPath { module: String },
    #[error("{construct} condition is not bool: {received:?}")]
    ConditionNotBool { construct: String, received: String },
    #[error("return types do not match: expected {expected:?}, received {received:?}")]
    ReturnTypeMatchError { expected: String, received: String },

    // driver
    #[error("cyclic import of {module:?} through {chain:?}")]
    CyclicImport { module: String, chain: String },
    #[error("module {module:?} not found at {path:?}")]
    ImportNotFound { module: String, path: String },
    #[error("cannot read {path:?}: {reason}")]
    UnreadableFile { path: String, reason: String },
    #[error("compilation aborted after {errors} error(s)")]
    CompilationAborted { errors: usize },
}
