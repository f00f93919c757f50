use crate::{registry, Construct, FactoryError, Interface, LockedRegistry};
use std::collections::{hash_map::Entry, HashMap};

/// Type alias for a constructor producing an `I` from the argument signature `A`.
type Constructor<I, A> = Box<dyn Fn(A) -> Box<I> + Send + Sync>;

/// Registry mapping names to constructors of `I` implementations, usually `dyn Trait`.
/// `A` is the constructor argument signature, a tuple for several arguments.
///
/// Every operation holds the registry lock for its whole duration, `create` included:
/// the constructor runs while the lock is held. Lookups never observe a partial
/// registration, but construction through one registry is serialized, so a slow
/// constructor delays every other `create` on the same registry, whatever the name.
/// A constructor must not call back into the registry that is running it, as that deadlocks.
/// Registries with different signatures never contend.
pub struct NameRegistry<I: ?Sized, A = ()> {
    constructors: LockedRegistry<String, Constructor<I, A>>,
}

impl<I: ?Sized + 'static, A: 'static> NameRegistry<I, A> {
    /// Creates an empty registry, independent of the process-wide one
    pub fn new() -> Self {
        Self {
            constructors: LockedRegistry::new(HashMap::new()),
        }
    }

    /// Returns the process-wide registry for this interface and argument signature,
    /// creating it on first access
    pub fn global() -> &'static Self {
        registry::singleton::<Self>()
    }

    /// Registers a constructor under `name`.
    /// Returns `true` if added, `false` if the name was already taken, keeping the existing constructor.
    pub fn register<F>(&self, name: impl Into<String>, constructor: F) -> bool
    where
        F: Fn(A) -> Box<I> + Send + Sync + 'static,
    {
        self.try_register(name, constructor).is_ok()
    }

    /// Registers `C` under `name`, constructed through `Construct<A>`.
    /// Returns `true` if added, `false` if the name was already taken.
    pub fn register_type<C>(&self, name: impl Into<String>) -> bool
    where
        C: Construct<A> + 'static,
        I: Interface<C>,
    {
        self.register(name, |args: A| I::upcast(Box::new(C::construct(args))))
    }

    /// Registers a constructor under `name`, returning `FactoryError::DuplicateKey` if taken
    pub fn try_register<F>(&self, name: impl Into<String>, constructor: F) -> Result<(), FactoryError>
    where
        F: Fn(A) -> Box<I> + Send + Sync + 'static,
    {
        match self.constructors.lock().entry(name.into()) {
            Entry::Occupied(entry) => {
                tracing::debug!(
                    name = %entry.key(),
                    interface = std::any::type_name::<I>(),
                    "rejected duplicate registration"
                );
                Err(FactoryError::DuplicateKey {
                    key: entry.key().clone(),
                })
            }
            Entry::Vacant(entry) => {
                tracing::debug!(
                    name = %entry.key(),
                    interface = std::any::type_name::<I>(),
                    "registered constructor"
                );
                entry.insert(Box::new(constructor));
                Ok(())
            }
        }
    }

    /// Removes the constructor registered under `name`, returning `true` if there was one
    pub fn unregister(&self, name: &str) -> bool {
        let removed = self.constructors.lock().remove(name).is_some();
        if removed {
            tracing::debug!(name, interface = std::any::type_name::<I>(), "unregistered constructor");
        }
        removed
    }

    /// Creates the child registered under `name`, passing `args` to its constructor.
    /// The constructor runs while the registry is locked.
    pub fn create(&self, name: &str, args: A) -> Result<Box<I>, FactoryError> {
        let constructors = self.constructors.lock();
        let Some(constructor) = constructors.get(name) else {
            tracing::debug!(name, interface = std::any::type_name::<I>(), "no constructor for name");
            return Err(FactoryError::UnknownKey {
                name: name.to_owned(),
            });
        };
        tracing::trace!(name, interface = std::any::type_name::<I>(), "constructing");
        Ok(constructor(args))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.lock().contains_key(name)
    }

    /// Registered names in ascending order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.constructors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.lock().is_empty()
    }
}

impl<I: ?Sized + 'static, A: 'static> Default for NameRegistry<I, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Impl Debug manually as the constructors don't support `Debug`
impl<I: ?Sized + 'static, A: 'static> std::fmt::Debug for NameRegistry<I, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameRegistry")
            .field("interface", &std::any::type_name::<I>())
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Construct, FactoryError, NameRegistry};
    use std::{
        sync::{
            atomic::{AtomicBool, AtomicUsize, Ordering},
            Arc, Barrier,
        },
        time::{Duration, Instant},
    };

    trait Instrument: Send {
        fn play(&self) -> String;
        fn tune(&mut self, pitch: u32);
    }
    crate::impl_interface!(Instrument);

    struct Piano {
        pitch: u32,
    }
    impl Instrument for Piano {
        fn play(&self) -> String {
            format!("piano at {}", self.pitch)
        }
        fn tune(&mut self, pitch: u32) {
            self.pitch = pitch;
        }
    }
    impl Construct<u32> for Piano {
        fn construct(pitch: u32) -> Self {
            Piano { pitch }
        }
    }

    struct Drum {
        pitch: u32,
    }
    impl Instrument for Drum {
        fn play(&self) -> String {
            format!("drum at {}", self.pitch)
        }
        fn tune(&mut self, pitch: u32) {
            self.pitch = pitch / 2;
        }
    }
    impl Construct<u32> for Drum {
        fn construct(pitch: u32) -> Self {
            Drum { pitch }
        }
    }

    type Instruments = NameRegistry<dyn Instrument, u32>;

    /// A created child behaves like the directly constructed type
    #[test]
    fn register_and_create() {
        let registry = Instruments::new();
        assert!(registry.register_type::<Piano>("Piano"));

        let mut created = registry.create("Piano", 440).unwrap();
        let mut direct = Piano::construct(440);
        assert_eq!(created.play(), direct.play());

        created.tune(220);
        direct.tune(220);
        assert_eq!(created.play(), direct.play());
    }

    /// Duplicates are rejected and the first constructor is kept
    #[test]
    fn duplicate_rejected() {
        let registry = Instruments::new();
        assert!(registry.register_type::<Piano>("Keys"));
        assert!(!registry.register_type::<Drum>("Keys"));
        assert!(!registry.register("Keys", |pitch| Box::new(Drum { pitch })));
        assert_eq!(
            registry.try_register("Keys", |pitch| Box::new(Drum { pitch })),
            Err(FactoryError::DuplicateKey { key: "Keys".into() })
        );
        assert_eq!(registry.create("Keys", 1).unwrap().play(), "piano at 1");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unregister() {
        let registry = Instruments::new();
        assert!(registry.register_type::<Drum>("Drum"));
        assert!(registry.unregister("Drum"));
        assert_eq!(
            registry.create("Drum", 1).err(),
            Some(FactoryError::UnknownKey { name: "Drum".into() })
        );
        assert!(!registry.unregister("Drum"));
        assert!(!registry.unregister("Never"));
        assert!(registry.is_empty());

        // Names become available again once removed
        assert!(registry.register_type::<Piano>("Drum"));
        assert_eq!(registry.create("Drum", 2).unwrap().play(), "piano at 2");
    }

    /// A miss never invokes any constructor
    #[test]
    fn unknown_name_constructs_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = Instruments::new();
        let counter = Arc::clone(&calls);
        registry.register("Counted", move |pitch| {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::new(Piano { pitch })
        });

        assert!(registry.create("Missing", 1).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(registry.create("Counted", 1).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// Each create produces an independent object
    #[test]
    fn independent_objects() {
        let registry = Instruments::new();
        registry.register_type::<Piano>("Piano");
        let mut first = registry.create("Piano", 1).unwrap();
        let second = registry.create("Piano", 1).unwrap();
        first.tune(9);
        assert_eq!(first.play(), "piano at 9");
        assert_eq!(second.play(), "piano at 1");
    }

    #[test]
    fn names_sorted() {
        let registry = Instruments::new();
        registry.register_type::<Piano>("b");
        registry.register_type::<Drum>("c");
        registry.register_type::<Piano>("a");
        assert_eq!(registry.names(), vec!["a", "b", "c"]);
        assert!(registry.contains("a"));
        assert!(!registry.contains("d"));
        assert_eq!(
            format!("{registry:?}"),
            format!(
                "NameRegistry {{ interface: {:?}, names: [\"a\", \"b\", \"c\"] }}",
                std::any::type_name::<dyn Instrument>()
            )
        );
    }

    /// Registries with different signatures have separate key spaces
    #[test]
    fn global_per_signature() {
        struct Isolated;
        impl Instrument for Isolated {
            fn play(&self) -> String {
                "isolated".into()
            }
            fn tune(&mut self, _: u32) {}
        }
        impl Construct<u32> for Isolated {
            fn construct(_: u32) -> Self {
                Isolated
            }
        }
        impl Construct<()> for Isolated {
            fn construct(_: ()) -> Self {
                Isolated
            }
        }

        let with_pitch = NameRegistry::<dyn Instrument, u32>::global();
        let without = NameRegistry::<dyn Instrument>::global();
        assert!(std::ptr::eq(
            with_pitch,
            NameRegistry::<dyn Instrument, u32>::global()
        ));

        assert!(with_pitch.register_type::<Isolated>("name_registry::global_per_signature"));
        assert!(!without.contains("name_registry::global_per_signature"));
        assert!(without.register_type::<Isolated>("name_registry::global_per_signature"));
        assert_eq!(
            without
                .create("name_registry::global_per_signature", ())
                .unwrap()
                .play(),
            "isolated"
        );
        assert!(with_pitch.unregister("name_registry::global_per_signature"));
        assert!(without.contains("name_registry::global_per_signature"));
    }

    /// Concurrent registrations of distinct names are all kept, then each creates once
    #[test]
    fn concurrent_register_and_create() {
        const THREADS: usize = 16;
        let registry = Instruments::new();
        let barrier = Barrier::new(THREADS);

        let registered: Vec<bool> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|i| {
                    let registry = &registry;
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        registry.register(format!("instrument-{i}"), move |pitch| {
                            Box::new(Piano { pitch: pitch + i as u32 })
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(registered.iter().all(|r| *r));
        assert_eq!(registry.len(), THREADS);

        let played: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|i| {
                    let registry = &registry;
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        registry
                            .create(&format!("instrument-{i}"), 100)
                            .unwrap()
                            .play()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for (i, play) in played.iter().enumerate() {
            assert_eq!(play, &format!("piano at {}", 100 + i));
        }
    }

    /// Racing registrations of the same name admit exactly one winner
    #[test]
    fn concurrent_duplicate_registration() {
        const THREADS: usize = 16;
        let registry = Instruments::new();
        let barrier = Barrier::new(THREADS);

        let winners = std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        registry.register_type::<Drum>("Contested")
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|won| *won)
                .count()
        });
        assert_eq!(winners, 1);
    }

    /// A panicking constructor doesn't leave the registry locked
    #[test]
    fn panicking_constructor() {
        let registry = Instruments::new();
        registry.register("Broken", |_| panic!("constructor failure"));
        registry.register_type::<Piano>("Piano");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            registry.create("Broken", 1).map(|_| ())
        }));
        assert!(result.is_err());
        assert_eq!(registry.create("Piano", 3).unwrap().play(), "piano at 3");
    }

    /// Constructor blocking inside the registry lock until released, or for five seconds.
    /// A timed out construction plays at pitch 0.
    fn gated(
        started: Arc<Barrier>,
        released: Arc<AtomicBool>,
    ) -> impl Fn(u32) -> Box<dyn Instrument> + Send + Sync + 'static {
        move |pitch: u32| -> Box<dyn Instrument> {
            started.wait();
            let deadline = Instant::now() + Duration::from_secs(5);
            while !released.load(Ordering::SeqCst) && Instant::now() < deadline {
                std::thread::sleep(Duration::from_millis(5));
            }
            let pitch = if released.load(Ordering::SeqCst) { pitch } else { 0 };
            Box::new(Piano { pitch })
        }
    }

    /// Construction holds the instance lock, so unrelated names wait for it
    #[test]
    fn create_serialized_within_instance() {
        let registry = Instruments::new();
        let started = Arc::new(Barrier::new(2));
        let released = Arc::new(AtomicBool::new(false));
        registry.register("Slow", gated(Arc::clone(&started), Arc::clone(&released)));
        registry.register_type::<Piano>("Piano");
        let fast_done = AtomicBool::new(false);

        std::thread::scope(|s| {
            let slow = s.spawn(|| registry.create("Slow", 7).unwrap().play());
            started.wait();
            let fast = s.spawn(|| {
                let played = registry.create("Piano", 1).unwrap().play();
                fast_done.store(true, Ordering::SeqCst);
                played
            });
            std::thread::sleep(Duration::from_millis(100));
            assert!(!fast_done.load(Ordering::SeqCst));

            released.store(true, Ordering::SeqCst);
            assert_eq!(slow.join().unwrap(), "piano at 7");
            assert_eq!(fast.join().unwrap(), "piano at 1");
        });
        assert!(fast_done.load(Ordering::SeqCst));
    }

    /// A busy instance doesn't hold up other instances or other signatures
    #[test]
    fn instances_do_not_contend() {
        let registry = Instruments::new();
        let other = Instruments::new();
        let pairs = NameRegistry::<dyn Instrument, (u32, u32)>::new();
        let started = Arc::new(Barrier::new(2));
        let released = Arc::new(AtomicBool::new(false));
        registry.register("Slow", gated(Arc::clone(&started), Arc::clone(&released)));
        other.register_type::<Piano>("Piano");
        pairs.register("Sum", |(a, b)| Box::new(Piano { pitch: a + b }));

        std::thread::scope(|s| {
            let slow = s.spawn(|| registry.create("Slow", 7).unwrap().play());
            started.wait();
            // Both finish while the slow construction still holds its lock
            assert_eq!(other.create("Piano", 2).unwrap().play(), "piano at 2");
            assert_eq!(pairs.create("Sum", (2, 3)).unwrap().play(), "piano at 5");

            released.store(true, Ordering::SeqCst);
            assert_eq!(slow.join().unwrap(), "piano at 7");
        });
    }
}
