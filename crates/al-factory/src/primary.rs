use std::{
    any::{Any, TypeId},
    fmt::{Debug, Display},
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Opaque identity of a concrete type, stable for the lifetime of the process.
///
/// Equality and hashing only consider the `TypeId`, the names are carried for diagnostics.
#[derive(Clone, Copy)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
    short_name: fn() -> String,
}

impl TypeToken {
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            short_name: tynm::type_name::<T>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, eg. `my_crate::module::MyType<u8>`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without module paths, eg. `MyType<u8>`
    pub fn short_name(&self) -> String {
        (self.short_name)()
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for TypeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TypeToken").field(&self.name).finish()
    }
}

impl Display for TypeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Runtime type identification for objects that drive secondary construction.
///
/// Implemented for every `Any + Send + Sync` type, so a hierarchy opts in by naming
/// `Primary` as a supertrait of its interface: `trait Shape: Primary { .. }`.
/// Calls through `dyn Shape` then report the most-derived type.
///
/// Call these on the pointee, not on a `Box`/`Arc` holding it, as smart pointers are
/// themselves `Primary` and would report their own type.
pub trait Primary: Any + Send + Sync {
    fn type_token(&self) -> TypeToken;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

// Blanket implementation for all compatible types
impl<T: Any + Send + Sync> Primary for T {
    fn type_token(&self) -> TypeToken {
        TypeToken::of::<T>()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}
