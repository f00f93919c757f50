use al_factory::Primary;

/// Primary interface of the demonstration hierarchy, its runtime type drives `TestBase` construction
#[al_factory::interface]
pub trait TestSubBase: Primary {
    fn name(&self) -> String;
    fn set_name(&mut self, name: &str);
}
