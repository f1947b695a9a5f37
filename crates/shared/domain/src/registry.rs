//! Slice registry for modular features.
//! A minimal type-erased container for pre-initialized feature state.

use std::any::{Any, TypeId};
use std::fmt::Debug;

/// Marker trait for feature state that can be shared across threads.
pub trait FeatureSlice: Any + Debug + Send + Sync {
    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// A container for an initialized feature.
#[derive(Debug)]
pub struct InitializedSlice {
    pub id: TypeId,
    /// Short type name, used in startup logs.
    pub name: &'static str,
    pub state: Box<dyn FeatureSlice>,
}

impl InitializedSlice {
    /// Create a new initialized slice from a concrete state.
    pub fn new<T: FeatureSlice>(state: T) -> Self {
        let full = std::any::type_name::<T>();
        let name = full.rsplit("::").next().unwrap_or(full);
        Self { id: TypeId::of::<T>(), name, state: Box::new(state) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Probe;

    impl FeatureSlice for Probe {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn new_records_type_identity_and_short_name() {
        let slice = InitializedSlice::new(Probe);
        assert_eq!(slice.id, TypeId::of::<Probe>());
        assert_eq!(slice.name, "Probe");
        assert!(slice.state.as_any().downcast_ref::<Probe>().is_some());
    }
}
