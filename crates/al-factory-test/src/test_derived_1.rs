use crate::{TestBase, TestSubBase, TestSubDerived1};
use al_factory::ConstructFrom;
use std::sync::Arc;

/// Wraps a shared `TestSubDerived1`, counting up on use
pub struct TestDerived1 {
    value: f32,
    sub: Arc<TestSubDerived1>,
}

impl ConstructFrom<Arc<TestSubDerived1>, f32> for TestDerived1 {
    fn construct_from(sub: Arc<TestSubDerived1>, value: f32) -> Self {
        Self { value, sub }
    }
}

impl TestBase for TestDerived1 {
    fn kind(&self) -> String {
        self.sub.name()
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn correct_value(&mut self, correction: f32) {
        self.value += correction;
    }

    fn use_once(&mut self) {
        self.value += 1.0;
    }
}

fn register() {
    al_factory::register_secondary!(
        dyn TestBase,
        Arc<dyn TestSubBase>,
        TestDerived1,
        TestSubDerived1,
        f32
    );
}

al_factory::plugin!("test_derived_1", register);
