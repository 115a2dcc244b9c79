// Modswap Registry
// Index-addressed storage of the configured swap units

use crate::transform::SwapUnit;

/// Largest useful capacity: one slot per `u8` index
pub const MAX_CAPACITY: usize = u8::MAX as usize + 1;

/// Errors raised while registering units at startup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("swap index {index} is out of range (capacity {capacity})")]
    OutOfRange { index: usize, capacity: usize },

    #[error("swap index {0} is already registered")]
    Occupied(usize),
}

/// Fixed-capacity table of swap units.
///
/// Filled once during startup, then only read. Iteration always follows index
/// order, which is the order units are applied to an event.
#[derive(Debug, Clone)]
pub struct SwapRegistry {
    slots: Vec<Option<SwapUnit>>,
}

impl SwapRegistry {
    /// Create an empty registry accepting indices `0..capacity`.
    ///
    /// Capacity is capped at `MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.min(MAX_CAPACITY)],
        }
    }

    /// Store `unit` at `index`
    pub fn register(&mut self, unit: SwapUnit, index: usize) -> Result<(), RegistryError> {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(RegistryError::OutOfRange { index, capacity })?;
        if slot.is_some() {
            return Err(RegistryError::Occupied(index));
        }
        *slot = Some(unit);
        Ok(())
    }

    /// Look up the unit at `index`
    pub fn get(&self, index: usize) -> Option<&SwapUnit> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Registered units in index order, skipping empty slots
    pub fn iter(&self) -> impl Iterator<Item = &SwapUnit> + '_ {
        self.slots.iter().flatten()
    }

    /// Declared index range
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of registered units
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SwapConfig;
    use crate::Mods;

    fn unit(index: u8, first: Mods, second: Mods) -> SwapUnit {
        SwapUnit::new(SwapConfig::new(index, first, second).unwrap())
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = SwapRegistry::new(4);
        assert!(registry.is_empty());
        registry
            .register(unit(2, Mods::LEFT_ALT, Mods::LEFT_SHIFT), 2)
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(2).unwrap().config().first_mod(), Mods::LEFT_ALT);
        assert!(registry.get(0).is_none());
        assert!(registry.get(99).is_none());
    }

    #[test]
    fn test_out_of_range() {
        let mut registry = SwapRegistry::new(2);
        let err = registry
            .register(unit(2, Mods::LEFT_CTRL, Mods::LEFT_GUI), 2)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::OutOfRange {
                index: 2,
                capacity: 2
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_index_keeps_first() {
        let mut registry = SwapRegistry::new(2);
        registry
            .register(unit(0, Mods::LEFT_CTRL, Mods::LEFT_GUI), 0)
            .unwrap();
        let err = registry
            .register(unit(0, Mods::LEFT_ALT, Mods::LEFT_SHIFT), 0)
            .unwrap_err();
        assert_eq!(err, RegistryError::Occupied(0));
        assert_eq!(registry.get(0).unwrap().config().first_mod(), Mods::LEFT_CTRL);
    }

    #[test]
    fn test_iteration_is_index_ordered_and_restartable() {
        let mut registry = SwapRegistry::new(8);
        registry
            .register(unit(5, Mods::RIGHT_CTRL, Mods::RIGHT_GUI), 5)
            .unwrap();
        registry
            .register(unit(1, Mods::LEFT_ALT, Mods::LEFT_SHIFT), 1)
            .unwrap();
        registry
            .register(unit(3, Mods::LEFT_CTRL, Mods::LEFT_GUI), 3)
            .unwrap();

        let first_pass: Vec<u8> = registry.iter().map(SwapUnit::index).collect();
        let second_pass: Vec<u8> = registry.iter().map(SwapUnit::index).collect();
        assert_eq!(first_pass, vec![1, 3, 5]);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_capacity_is_capped() {
        let mut registry = SwapRegistry::new(usize::MAX);
        assert_eq!(registry.capacity(), MAX_CAPACITY);
        registry
            .register(unit(255, Mods::LEFT_CTRL, Mods::LEFT_GUI), 255)
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry
            .register(unit(0, Mods::LEFT_ALT, Mods::LEFT_SHIFT), MAX_CAPACITY)
            .is_err());
    }

    #[test]
    fn test_zero_capacity() {
        let mut registry = SwapRegistry::new(0);
        assert!(registry
            .register(unit(0, Mods::LEFT_CTRL, Mods::LEFT_GUI), 0)
            .is_err());
        assert_eq!(registry.iter().count(), 0);
    }
}
