use crate::TestSubBase;
use al_factory::Construct;

#[derive(Debug, Clone, PartialEq, Construct)]
pub struct TestSubDerived2 {
    name: String,
}

impl Default for TestSubDerived2 {
    fn default() -> Self {
        Self {
            name: "SubDer2".to_string(),
        }
    }
}

impl TestSubBase for TestSubDerived2 {
    fn name(&self) -> String {
        format!("A SubTestDerived2 named {}", self.name)
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

fn register() {
    al_factory::register_named!(dyn TestSubBase, TestSubDerived2, "TestSubDerived2");
}

al_factory::plugin!("test_sub_derived_2", register);
