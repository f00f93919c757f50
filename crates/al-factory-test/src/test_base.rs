/// Secondary interface of the demonstration hierarchy, built from a `TestSubBase`
#[al_factory::interface]
pub trait TestBase: Send + Sync {
    /// Describes the wrapped primary
    fn kind(&self) -> String;
    fn value(&self) -> f32;
    fn correct_value(&mut self, correction: f32);
    fn use_once(&mut self);
}
