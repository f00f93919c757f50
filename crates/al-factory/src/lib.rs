//! Type-parametric object construction registries.
//!
//! - `NameRegistry` maps names to constructors of an interface, usually a `dyn Trait`
//! - `TypeRegistry` picks a constructor from the runtime type of an already built primary
//!   object, producing a related object that usually wraps it
//!
//! Each distinct registry signature has its own process-wide instance reached through
//! `global()`, created on first access, as well as independent instances from `new()`.

// map `self` to `al_factory` allowing the use of derive macros that use `al_factory::..`
extern crate self as al_factory;
mod error;
mod handle;
mod macros;
mod markers;
mod name_registry;
#[cfg(feature = "plugins")]
mod plugin;
mod primary;
mod registry;
mod type_registry;

pub use error::FactoryError;
pub use handle::PrimaryHandle;
pub use markers::Construct;
pub use markers::ConstructFrom;
pub use markers::Interface;
pub use name_registry::NameRegistry;
#[cfg(feature = "plugins")]
pub use plugin::available_plugins;
#[cfg(feature = "plugins")]
pub use plugin::load_plugins;
#[cfg(feature = "plugins")]
pub use plugin::loaded_plugins;
#[cfg(feature = "plugins")]
pub use plugin::Plugin;
pub use primary::Primary;
pub use primary::TypeToken;
pub use registry::LockedRegistry;
pub use registry::Registry;
pub use type_registry::TypeRegistry;

#[cfg(feature = "derive")]
pub use al_factory_derive::interface;
#[cfg(feature = "derive")]
pub use al_factory_derive::Construct;

#[cfg(feature = "plugins")]
#[doc(hidden)]
pub use inventory;
