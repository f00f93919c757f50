use crate::{TestBase, TestSubBase, TestSubDerived2};
use al_factory::ConstructFrom;
use std::sync::Arc;

/// Wraps a shared `TestSubDerived2`, counting down on use
pub struct TestDerived2 {
    value: f32,
    sub: Arc<TestSubDerived2>,
}

impl ConstructFrom<Arc<TestSubDerived2>, f32> for TestDerived2 {
    fn construct_from(sub: Arc<TestSubDerived2>, value: f32) -> Self {
        Self { value, sub }
    }
}

impl TestBase for TestDerived2 {
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
        self.value -= 1.0;
    }
}

fn register() {
    al_factory::register_secondary!(
        dyn TestBase,
        Arc<dyn TestSubBase>,
        TestDerived2,
        TestSubDerived2,
        f32
    );
}

al_factory::plugin!("test_derived_2", register);
