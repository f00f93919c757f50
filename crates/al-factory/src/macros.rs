/// Implement `Interface` for `dyn $trait`, letting every implementor of the trait be
/// registered with `register_type`. Prefer the `#[interface]` attribute when available.
#[macro_export]
macro_rules! impl_interface {
    ($trait:path) => {
        impl<C: $trait + 'static> $crate::Interface<C> for dyn $trait {
            fn upcast(concrete: ::std::boxed::Box<C>) -> ::std::boxed::Box<Self> {
                concrete
            }
        }
    };
}

/// Macro to register a concrete type into a `NameRegistry` under a name, evaluating to
/// `true` if it was added. If the child's name is `"Dummy"`, its type is `ChildDummy`,
/// it's created as a `dyn IChild` and takes `(f32, i32)` as arguments, use:
/// `register_named!(dyn IChild, ChildDummy, "Dummy", (f32, i32))`
///
/// Without an argument type the registry takes `()`.
/// Prefix with `in registry;` to target a specific registry instead of the global one.
#[macro_export]
macro_rules! register_named {
    (in $registry:expr; $concrete:ty, $name:expr) => {
        $registry.register_type::<$concrete>($name)
    };
    ($interface:ty, $concrete:ty, $name:expr) => {
        $crate::register_named!($interface, $concrete, $name, ())
    };
    ($interface:ty, $concrete:ty, $name:expr, $args:ty) => {
        $crate::NameRegistry::<$interface, $args>::global().register_type::<$concrete>($name)
    };
}

/// Macro to register a secondary type into a `TypeRegistry`, evaluating to `true` if it
/// was added. If `DummyGui` is constructed for a primary `Dummy` received as an
/// `Arc<dyn IChild>`, it's created as a `dyn ISecondary` and takes `f32` as argument, use:
/// `register_secondary!(dyn ISecondary, Arc<dyn IChild>, DummyGui, Dummy, f32)`
///
/// Without an argument type the registry takes `()`.
/// Prefix with `in registry;` to target a specific registry instead of the global one.
#[macro_export]
macro_rules! register_secondary {
    (in $registry:expr; $concrete:ty, $primary:ty) => {
        $registry.register_type::<$concrete, $primary>()
    };
    ($result:ty, $handle:ty, $concrete:ty, $primary:ty) => {
        $crate::register_secondary!($result, $handle, $concrete, $primary, ())
    };
    ($result:ty, $handle:ty, $concrete:ty, $primary:ty, $args:ty) => {
        $crate::TypeRegistry::<$result, $handle, $args>::global()
            .register_type::<$concrete, $primary>()
    };
}

/// Submit a plugin, run by `load_plugins` during the startup phase.
/// `$register` is a `fn()` performing the plugin's registrations.
#[cfg(feature = "plugins")]
#[macro_export]
macro_rules! plugin {
    ($name:expr, $register:path) => {
        $crate::inventory::submit! {
            $crate::Plugin::new($name, $register)
        }
    };
}
