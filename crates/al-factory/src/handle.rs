use crate::{ConstructFrom, Interface, Primary};
use std::sync::Arc;

/// Ownership form in which a secondary registry receives its primary object.
///
/// Fixed once per `TypeRegistry` instantiation, every constructor registered into
/// that registry receives the primary in the same form:
/// - `Box<P>` transfers exclusive ownership to the constructed object
/// - `Arc<P>` shares ownership with the caller
/// - `&'static P` names the lent form: the registry accepts `&'a P` for any `'a`, and
///   its constructors are called for every lifetime, so results can't keep the borrow
///
/// The implementing type only names the form. The value handed to `create` is `Handle<'a>`,
/// which is the implementing type itself for the owning forms.
pub trait PrimaryHandle: 'static {
    /// The declared primary type, usually a `dyn Trait` with `Primary` as a supertrait
    type Target: ?Sized + Primary;
    /// The primary as handed to a registry
    type Handle<'a>;
    /// The same ownership form pointing at a concrete primary type `C`
    type Downcast<'a, C: Primary>;
    /// The stored constructor for secondary objects `R` taking arguments `A`
    type Constructor<R: ?Sized + 'static, A: 'static>: ?Sized + Send + Sync;

    /// Borrow the primary object
    fn primary<'b, 'a>(handle: &'b Self::Handle<'a>) -> &'b Self::Target;

    /// Checked downcast keeping the ownership form, `None` if the object is not a `C`
    fn downcast<'a, C: Primary>(handle: Self::Handle<'a>) -> Option<Self::Downcast<'a, C>>;

    /// Box a hand-written constructor
    fn erase<R, A, F>(constructor: F) -> Box<Self::Constructor<R, A>>
    where
        R: ?Sized + 'static,
        A: 'static,
        F: for<'a> Fn(Self::Handle<'a>, A) -> Box<R> + Send + Sync + 'static;

    /// Constructor building `T` from primaries whose runtime type is `C`.
    /// Panics when handed any other runtime type.
    fn synthesize<T, C, R, A>() -> Box<Self::Constructor<R, A>>
    where
        C: Primary,
        T: for<'a> ConstructFrom<Self::Downcast<'a, C>, A> + 'static,
        R: ?Sized + Interface<T> + 'static,
        A: 'static;

    fn call<'a, R, A>(
        constructor: &Self::Constructor<R, A>,
        handle: Self::Handle<'a>,
        args: A,
    ) -> Box<R>
    where
        R: ?Sized + 'static,
        A: 'static;
}

fn type_mismatch<C: Primary>(actual: &str) -> ! {
    panic!(
        "type mismatch: constructor registered for `{}` received a `{}`",
        std::any::type_name::<C>(),
        actual
    )
}

impl<P: ?Sized + Primary> PrimaryHandle for Box<P> {
    type Target = P;
    type Handle<'a> = Box<P>;
    type Downcast<'a, C: Primary> = Box<C>;
    type Constructor<R: ?Sized + 'static, A: 'static> = dyn Fn(Box<P>, A) -> Box<R> + Send + Sync;

    fn primary<'b, 'a>(handle: &'b Self::Handle<'a>) -> &'b P {
        handle
    }

    fn downcast<'a, C: Primary>(handle: Self::Handle<'a>) -> Option<Self::Downcast<'a, C>> {
        <P as Primary>::into_any(handle).downcast::<C>().ok()
    }

    fn erase<R, A, F>(constructor: F) -> Box<Self::Constructor<R, A>>
    where
        R: ?Sized + 'static,
        A: 'static,
        F: for<'a> Fn(Self::Handle<'a>, A) -> Box<R> + Send + Sync + 'static,
    {
        Box::new(constructor)
    }

    fn synthesize<T, C, R, A>() -> Box<Self::Constructor<R, A>>
    where
        C: Primary,
        T: for<'a> ConstructFrom<Self::Downcast<'a, C>, A> + 'static,
        R: ?Sized + Interface<T> + 'static,
        A: 'static,
    {
        Box::new(|primary: Box<P>, args: A| {
            let actual = <P as Primary>::type_name(&*primary);
            match <P as Primary>::into_any(primary).downcast::<C>() {
                Ok(concrete) => R::upcast(Box::new(T::construct_from(concrete, args))),
                Err(_) => type_mismatch::<C>(actual),
            }
        })
    }

    fn call<'a, R, A>(
        constructor: &Self::Constructor<R, A>,
        handle: Self::Handle<'a>,
        args: A,
    ) -> Box<R>
    where
        R: ?Sized + 'static,
        A: 'static,
    {
        constructor(handle, args)
    }
}

impl<P: ?Sized + Primary> PrimaryHandle for Arc<P> {
    type Target = P;
    type Handle<'a> = Arc<P>;
    type Downcast<'a, C: Primary> = Arc<C>;
    type Constructor<R: ?Sized + 'static, A: 'static> = dyn Fn(Arc<P>, A) -> Box<R> + Send + Sync;

    fn primary<'b, 'a>(handle: &'b Self::Handle<'a>) -> &'b P {
        handle
    }

    fn downcast<'a, C: Primary>(handle: Self::Handle<'a>) -> Option<Self::Downcast<'a, C>> {
        <P as Primary>::into_any_arc(handle).downcast::<C>().ok()
    }

    fn erase<R, A, F>(constructor: F) -> Box<Self::Constructor<R, A>>
    where
        R: ?Sized + 'static,
        A: 'static,
        F: for<'a> Fn(Self::Handle<'a>, A) -> Box<R> + Send + Sync + 'static,
    {
        Box::new(constructor)
    }

    fn synthesize<T, C, R, A>() -> Box<Self::Constructor<R, A>>
    where
        C: Primary,
        T: for<'a> ConstructFrom<Self::Downcast<'a, C>, A> + 'static,
        R: ?Sized + Interface<T> + 'static,
        A: 'static,
    {
        Box::new(|primary: Arc<P>, args: A| {
            let actual = <P as Primary>::type_name(&*primary);
            match <P as Primary>::into_any_arc(primary).downcast::<C>() {
                Ok(concrete) => R::upcast(Box::new(T::construct_from(concrete, args))),
                Err(_) => type_mismatch::<C>(actual),
            }
        })
    }

    fn call<'a, R, A>(
        constructor: &Self::Constructor<R, A>,
        handle: Self::Handle<'a>,
        args: A,
    ) -> Box<R>
    where
        R: ?Sized + 'static,
        A: 'static,
    {
        constructor(handle, args)
    }
}

impl<P: ?Sized + Primary> PrimaryHandle for &'static P {
    type Target = P;
    type Handle<'a> = &'a P;
    type Downcast<'a, C: Primary> = &'a C;
    type Constructor<R: ?Sized + 'static, A: 'static> =
        dyn for<'a> Fn(&'a P, A) -> Box<R> + Send + Sync;

    fn primary<'b, 'a>(handle: &'b Self::Handle<'a>) -> &'b P {
        handle
    }

    fn downcast<'a, C: Primary>(handle: Self::Handle<'a>) -> Option<Self::Downcast<'a, C>> {
        <P as Primary>::as_any(handle).downcast_ref::<C>()
    }

    fn erase<R, A, F>(constructor: F) -> Box<Self::Constructor<R, A>>
    where
        R: ?Sized + 'static,
        A: 'static,
        F: for<'a> Fn(Self::Handle<'a>, A) -> Box<R> + Send + Sync + 'static,
    {
        Box::new(constructor)
    }

    fn synthesize<T, C, R, A>() -> Box<Self::Constructor<R, A>>
    where
        C: Primary,
        T: for<'a> ConstructFrom<Self::Downcast<'a, C>, A> + 'static,
        R: ?Sized + Interface<T> + 'static,
        A: 'static,
    {
        Box::new(|primary: &P, args: A| {
            match <P as Primary>::as_any(primary).downcast_ref::<C>() {
                Some(concrete) => R::upcast(Box::new(T::construct_from(concrete, args))),
                None => type_mismatch::<C>(<P as Primary>::type_name(primary)),
            }
        })
    }

    fn call<'a, R, A>(
        constructor: &Self::Constructor<R, A>,
        handle: Self::Handle<'a>,
        args: A,
    ) -> Box<R>
    where
        R: ?Sized + 'static,
        A: 'static,
    {
        constructor(handle, args)
    }
}
