/// Construction from the argument signature of a `NameRegistry`.
/// Multiple arguments are passed as a tuple, no arguments as `()`.
///
/// `#[derive(Construct)]` implements `Construct<()>` through `Default`.
pub trait Construct<A>: Sized {
    fn construct(args: A) -> Self;
}

/// Construction of a secondary object from its primary `P` and the argument signature
/// of a `TypeRegistry`. `P` is the concrete primary in the registry's ownership form,
/// eg. `Arc<MyPrimary>` for a registry taking `Arc<dyn PrimaryTrait>`.
pub trait ConstructFrom<P, A>: Sized {
    fn construct_from(primary: P, args: A) -> Self;
}

/// Marks `Self`, usually a `dyn Trait`, as an interface implemented by `C`.
///
/// Generic code can't unsize `Box<C>` into `Box<dyn Trait>` on its own, so the interface
/// provides the conversion once for all of its implementors. Use the `#[interface]`
/// attribute or the `impl_interface!` macro rather than implementing this by hand.
pub trait Interface<C> {
    fn upcast(concrete: Box<C>) -> Box<Self>;
}

#[cfg(test)]
mod tests {
    use super::{Construct, ConstructFrom, Interface};

    trait Greeter {
        fn greet(&self) -> String;
    }
    crate::impl_interface!(Greeter);

    struct Hello(String);
    impl Greeter for Hello {
        fn greet(&self) -> String {
            format!("hello {}", self.0)
        }
    }
    impl Construct<(String,)> for Hello {
        fn construct((name,): (String,)) -> Self {
            Hello(name)
        }
    }

    struct Loud(Box<Hello>, usize);
    impl Greeter for Loud {
        fn greet(&self) -> String {
            self.0.greet().to_uppercase() + &"!".repeat(self.1)
        }
    }
    impl ConstructFrom<Box<Hello>, usize> for Loud {
        fn construct_from(primary: Box<Hello>, args: usize) -> Self {
            Loud(primary, args)
        }
    }

    /// `impl_interface!` upcasts every implementor through the same impl
    #[test]
    fn upcast_implementors() {
        let hello = Hello::construct(("world".to_string(),));
        let greeter: Box<dyn Greeter> = <dyn Greeter>::upcast(Box::new(hello));
        assert_eq!(greeter.greet(), "hello world");

        let loud = Loud::construct_from(Box::new(Hello("you".into())), 2);
        let greeter: Box<dyn Greeter> = <dyn Greeter as Interface<Loud>>::upcast(Box::new(loud));
        assert_eq!(greeter.greet(), "HELLO YOU!!");
    }
}
