/// Error type for registry operations
///
/// Lookup misses are ordinary runtime conditions (eg. a plugin that was never loaded).
/// Type mismatches are not represented here, they are contract violations and panic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    /// A constructor is already registered under this key
    #[error("a constructor is already registered under `{key}`")]
    DuplicateKey { key: String },
    /// No constructor is registered under this name
    #[error("unknown child: no constructor registered under `{name}`")]
    UnknownKey { name: String },
    /// No constructor is registered for the most-derived type of the primary object
    #[error("unknown child related to type `{type_name}`")]
    UnknownRuntimeType { type_name: String },
}

impl FactoryError {
    /// Whether this error reports a missing constructor rather than a rejected registration
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FactoryError::UnknownKey { .. } | FactoryError::UnknownRuntimeType { .. }
        )
    }
}
