use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

/// A generic registry type using a HashMap.
pub type Registry<K, V> = HashMap<K, V>;

/// A registry guarded by its own lock. Every registry instance owns exactly one.
pub type LockedRegistry<K, V> = Mutex<Registry<K, V>>;

// Leaked registry instance, typed by its full generic signature
type Singleton = &'static (dyn Any + Send + Sync);

/// Index of the process-wide registry instances, one per distinct registry type.
/// Only held while locating or creating an instance, never during registry operations.
static SINGLETONS: Lazy<Mutex<Registry<TypeId, Singleton>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Returns the process-wide instance of `T`, creating it on first access.
/// Instances are leaked and live until the process exits.
pub(crate) fn singleton<T: Any + Send + Sync + Default>() -> &'static T {
    let instance = *SINGLETONS
        .lock()
        .entry(TypeId::of::<T>())
        .or_insert_with(|| {
            tracing::debug!(registry = %tynm::type_name::<T>(), "creating process-wide registry");
            let leaked: Singleton = Box::leak(Box::new(T::default()));
            leaked
        });

    match instance.downcast_ref::<T>() {
        Some(instance) => instance,
        None => unreachable!(
            "singleton index holds a different type under the id of {}",
            std::any::type_name::<T>()
        ),
    }
}
