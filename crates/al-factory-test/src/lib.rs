//! Demonstration hierarchy exercising the registries across modules.
//!
//! Each concrete type registers itself from its own module through a plugin, as an
//! independently compiled module would. `load_plugins` runs them before first use.

mod test_base;
mod test_derived_1;
mod test_derived_2;
mod test_sub_base;
mod test_sub_derived_1;
mod test_sub_derived_2;

pub use test_base::TestBase;
pub use test_derived_1::TestDerived1;
pub use test_derived_2::TestDerived2;
pub use test_sub_base::TestSubBase;
pub use test_sub_derived_1::TestSubDerived1;
pub use test_sub_derived_2::TestSubDerived2;

use al_factory::{NameRegistry, TypeRegistry};
use std::sync::Arc;

/// Registry of primary objects
pub type SubBaseFactory = NameRegistry<dyn TestSubBase>;

/// Registry of secondary objects, built from a shared primary and a starting value
pub type BaseFactory = TypeRegistry<dyn TestBase, Arc<dyn TestSubBase>, f32>;
