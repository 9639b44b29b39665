use std::fmt::Display;

/// Handle to a type owned by the interner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    Void,
    Int,
    Double,
    Char,
    Bool,
}

impl BuiltinKind {
    pub const ALL: [BuiltinKind; 5] = [
        BuiltinKind::Void,
        BuiltinKind::Int,
        BuiltinKind::Double,
        BuiltinKind::Char,
        BuiltinKind::Bool,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinKind::Void => "void",
            BuiltinKind::Int => "int",
            BuiltinKind::Double => "double",
            BuiltinKind::Char => "char",
            BuiltinKind::Bool => "bool",
        }
    }
}

/// The shape of a type. Sub-parts are handles, never owned types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Builtin(BuiltinKind),
    Array { element: TypeId, size: u64 },
    Pointer(TypeId),
    Function { return_type: TypeId, params: Vec<TypeId> },
    /// A storage location holding a value of the inner type.
    LValue(TypeId),
}
