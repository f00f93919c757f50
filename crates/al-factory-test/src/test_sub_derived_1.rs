use crate::TestSubBase;
use al_factory::Construct;

#[derive(Debug, Clone, PartialEq, Construct)]
pub struct TestSubDerived1 {
    name: String,
}

impl Default for TestSubDerived1 {
    fn default() -> Self {
        Self {
            name: "SubDer1".to_string(),
        }
    }
}

impl TestSubBase for TestSubDerived1 {
    fn name(&self) -> String {
        format!("A SubTestDerived1 named {}", self.name)
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

fn register() {
    al_factory::register_named!(dyn TestSubBase, TestSubDerived1, "TestSubDerived1");
}

al_factory::plugin!("test_sub_derived_1", register);
