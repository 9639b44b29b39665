use std::collections::HashMap;

use super::types::{BuiltinKind, Type, TypeId};

/// Owns every type of a compilation and hash-conses them on shape.
#[derive(Debug)]
pub struct TypeInterner {
    types: Vec<Type>,
    lookup: HashMap<Type, TypeId>,
}

impl TypeInterner {
    pub fn new() -> Self {
        let mut interner = TypeInterner {
            types: vec![],
            lookup: HashMap::new(),
        };

        // builtins occupy the first handles, in `BuiltinKind::ALL` order
        for kind in BuiltinKind::ALL {
            interner.intern(Type::Builtin(kind));
        }

        interner
    }

    fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(id) = self.lookup.get(&ty) {
            return *id;
        }

        let id = TypeId(self.types.len() as u32);
        tracing::trace!(%id, shape = ?ty, "interned new type");

        self.types.push(ty.clone());
        self.lookup.insert(ty, id);
        id
    }

    pub fn builtin(&self, kind: BuiltinKind) -> TypeId {
        match kind {
            BuiltinKind::Void => TypeId(0),
            BuiltinKind::Int => TypeId(1),
            BuiltinKind::Double => TypeId(2),
            BuiltinKind::Char => TypeId(3),
            BuiltinKind::Bool => TypeId(4),
        }
    }

    pub fn void(&self) -> TypeId {
        self.builtin(BuiltinKind::Void)
    }

    pub fn int(&self) -> TypeId {
        self.builtin(BuiltinKind::Int)
    }

    pub fn double(&self) -> TypeId {
        self.builtin(BuiltinKind::Double)
    }

    pub fn char(&self) -> TypeId {
        self.builtin(BuiltinKind::Char)
    }

    pub fn boolean(&self) -> TypeId {
        self.builtin(BuiltinKind::Bool)
    }

    pub fn array(&mut self, element: TypeId, size: u64) -> TypeId {
        self.intern(Type::Array { element, size })
    }

    pub fn pointer(&mut self, pointee: TypeId) -> TypeId {
        self.intern(Type::Pointer(pointee))
    }

    pub fn function(&mut self, return_type: TypeId, params: Vec<TypeId>) -> TypeId {
        self.intern(Type::Function {
            return_type,
            params,
        })
    }

    /// Wraps `subtype` as a storage location. Wrapping twice is a no-op.
    pub fn lvalue(&mut self, subtype: TypeId) -> TypeId {
        if self.is_lvalue(subtype) {
            return subtype;
        }
        self.intern(Type::LValue(subtype))
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn is_lvalue(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::LValue(_))
    }

    /// The type stored in an lvalue, or `id` itself for plain values.
    pub fn lvalue_subtype(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            Type::LValue(subtype) => *subtype,
            _ => id,
        }
    }

    pub fn is_numeric(&self, id: TypeId) -> bool {
        id == self.int() || id == self.double()
    }

    /// Builtins other than `void`, which may be converted between each other.
    pub fn is_scalar(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Builtin(kind) if *kind != BuiltinKind::Void)
    }

    pub fn is_pointer(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Pointer(_))
    }

    pub fn is_function(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Function { .. })
    }

    pub fn display(&self, id: TypeId) -> String {
        match self.get(id) {
            Type::Builtin(kind) => kind.name().to_string(),
            Type::Array { element, size } => format!("[{} ; {}]", self.display(*element), size),
            Type::Pointer(pointee) => format!("*{}", self.display(*pointee)),
            Type::Function {
                return_type,
                params,
            } => format!(
                "{} -> {}",
                self.display_list(params),
                self.display(*return_type)
            ),
            Type::LValue(subtype) => format!("{}<lval>", self.display(*subtype)),
        }
    }

    /// Renders a parameter list as `(P1, P2)`.
    pub fn display_list(&self, ids: &[TypeId]) -> String {
        let items: Vec<String> = ids.iter().map(|id| self.display(*id)).collect();
        format!("({})", items.join(", "))
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        TypeInterner::new()
    }
}
