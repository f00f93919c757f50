use crate::{
    registry, ConstructFrom, FactoryError, Interface, LockedRegistry, Primary, PrimaryHandle,
    TypeToken,
};
use std::collections::{hash_map::Entry, HashMap};

/// Type alias for a secondary constructor, taking the primary handle and the argument signature.
type SecondaryConstructor<R, H, A> = Box<<H as PrimaryHandle>::Constructor<R, A>>;

/// Secondary registry choosing a constructor from the runtime type of a primary object.
///
/// Constructors are keyed by the concrete primary type they accept. `create` looks up the
/// most-derived type of the primary it is given, with no fallback to ancestor types,
/// and produces a related `R` object, usually wrapping the primary.
///
/// `H` is the ownership form every constructor receives the primary in, see `PrimaryHandle`.
/// Its target must be `Primary`, so handles to types without runtime identification don't compile.
/// With the lent form `&'static P`, `create` takes a `&P` of any lifetime.
///
/// Locking follows `NameRegistry`: the constructor runs while the registry lock is held.
pub struct TypeRegistry<R: ?Sized + 'static, H: PrimaryHandle, A: 'static = ()> {
    constructors: LockedRegistry<TypeToken, SecondaryConstructor<R, H, A>>,
}

impl<R: ?Sized + 'static, H: PrimaryHandle, A: 'static> TypeRegistry<R, H, A> {
    /// Creates an empty registry, independent of the process-wide one
    pub fn new() -> Self {
        Self {
            constructors: LockedRegistry::new(HashMap::new()),
        }
    }

    /// Returns the process-wide registry for this result type, handle and argument signature,
    /// creating it on first access
    pub fn global() -> &'static Self {
        registry::singleton::<Self>()
    }

    /// Registers a constructor for primaries whose runtime type is `C`.
    /// Returns `true` if added, `false` if `C` already had one, keeping the existing constructor.
    pub fn register<C, F>(&self, constructor: F) -> bool
    where
        C: Primary,
        F: for<'p> Fn(H::Handle<'p>, A) -> Box<R> + Send + Sync + 'static,
    {
        self.try_register::<C, F>(constructor).is_ok()
    }

    /// Registers `T` for primaries whose runtime type is `C`.
    ///
    /// The synthesized constructor downcasts the primary to `C` in the registry's ownership form
    /// and builds `T` from it. A failed downcast means the registry dispatched on a type
    /// other than the one it was keyed with, and panics.
    pub fn register_type<T, C>(&self) -> bool
    where
        C: Primary,
        T: for<'p> ConstructFrom<H::Downcast<'p, C>, A> + 'static,
        R: Interface<T>,
    {
        self.insert::<C>(H::synthesize::<T, C, R, A>()).is_ok()
    }

    /// Registers a constructor for `C`, returning `FactoryError::DuplicateKey` if taken
    pub fn try_register<C, F>(&self, constructor: F) -> Result<(), FactoryError>
    where
        C: Primary,
        F: for<'p> Fn(H::Handle<'p>, A) -> Box<R> + Send + Sync + 'static,
    {
        self.insert::<C>(H::erase::<R, A, F>(constructor))
    }

    fn insert<C: Primary>(
        &self,
        constructor: SecondaryConstructor<R, H, A>,
    ) -> Result<(), FactoryError> {
        match self.constructors.lock().entry(TypeToken::of::<C>()) {
            Entry::Occupied(entry) => {
                tracing::debug!(
                    primary = %entry.key(),
                    result = std::any::type_name::<R>(),
                    "rejected duplicate registration"
                );
                Err(FactoryError::DuplicateKey {
                    key: entry.key().name().to_owned(),
                })
            }
            Entry::Vacant(entry) => {
                tracing::debug!(
                    primary = %entry.key(),
                    result = std::any::type_name::<R>(),
                    "registered secondary constructor"
                );
                entry.insert(constructor);
                Ok(())
            }
        }
    }

    /// Removes the constructor registered for `C`, returning `true` if there was one
    pub fn unregister<C: Primary>(&self) -> bool {
        let removed = self
            .constructors
            .lock()
            .remove(&TypeToken::of::<C>())
            .is_some();
        if removed {
            tracing::debug!(
                primary = std::any::type_name::<C>(),
                result = std::any::type_name::<R>(),
                "unregistered secondary constructor"
            );
        }
        removed
    }

    /// Creates the child tied to the runtime type of `primary`, passing it and `args` to
    /// the constructor. The constructor runs while the registry is locked.
    ///
    /// On a miss the handle is dropped, as no constructor took it.
    pub fn create<'p>(&self, primary: H::Handle<'p>, args: A) -> Result<Box<R>, FactoryError> {
        let token = <H::Target as Primary>::type_token(H::primary(&primary));
        let constructors = self.constructors.lock();
        let Some(constructor) = constructors.get(&token) else {
            tracing::debug!(
                primary = %token,
                result = std::any::type_name::<R>(),
                "no constructor for runtime type"
            );
            return Err(FactoryError::UnknownRuntimeType {
                type_name: token.name().to_owned(),
            });
        };
        tracing::trace!(
            primary = %token,
            result = std::any::type_name::<R>(),
            "constructing"
        );
        Ok(H::call(&**constructor, primary, args))
    }

    pub fn contains<C: Primary>(&self) -> bool {
        self.contains_token(&TypeToken::of::<C>())
    }

    pub fn contains_token(&self, token: &TypeToken) -> bool {
        self.constructors.lock().contains_key(token)
    }

    /// Names of the registered primary types in ascending order
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.constructors.lock().keys().map(TypeToken::name).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.constructors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.lock().is_empty()
    }
}

impl<R: ?Sized + 'static, H: PrimaryHandle, A: 'static> Default
    for TypeRegistry<R, H, A>
{
    fn default() -> Self {
        Self::new()
    }
}

/// Impl Debug manually as the constructors don't support `Debug`
impl<R: ?Sized + 'static, H: PrimaryHandle, A: 'static> std::fmt::Debug
    for TypeRegistry<R, H, A>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("result", &std::any::type_name::<R>())
            .field("primary", &std::any::type_name::<H::Target>())
            .field("types", &self.type_names())
            .finish()
    }
}
