// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Storage for per-variant state.
//!
//! A variant is one independent what-if scenario.  All variants share the same
//! topology graph, but each one has its own slot of mutable state in a
//! [`VariantStore`].

use crate::Error;

/// The per-variant state kept in a [`VariantStore`].
pub trait VariantState: Sized {
    /// Creates the state of a new variant branched from `self`.
    ///
    /// Implementations copy only what a new scenario should inherit.  Derived
    /// data such as caches must not be carried over.
    fn branch(&self) -> Self;

    /// Called when the slot holding this state is dropped from the store.
    fn release(&mut self) {}
}

/// An indexed array of variant states, with one working variant.
///
/// Deleted slots leave a hole that can be refilled with
/// [`allocate_at`][VariantStore::allocate_at].
#[derive(Debug)]
pub struct VariantStore<S> {
    slots: Vec<Option<S>>,
    working: usize,
}

impl<S: VariantState> VariantStore<S> {
    /// Creates a store with a single variant at index 0, which is also the
    /// working variant.
    pub fn new(initial: S) -> Self {
        Self {
            slots: vec![Some(initial)],
            working: 0,
        }
    }

    /// Returns the number of slots, including deleted ones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a store holds at least its working variant.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the indices of the live variants.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|_| i))
    }

    pub fn working_index(&self) -> usize {
        self.working
    }

    pub fn set_working(&mut self, index: usize) -> Result<(), Error> {
        self.get(index)?;
        self.working = index;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&S, Error> {
        self.slots
            .get(index)
            .and_then(Option::as_ref)
            .ok_or_else(|| Self::bounds_error(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut S, Error> {
        self.slots
            .get_mut(index)
            .and_then(Option::as_mut)
            .ok_or_else(|| Self::bounds_error(index))
    }

    pub fn working(&self) -> Result<&S, Error> {
        self.get(self.working)
    }

    pub fn working_mut(&mut self) -> Result<&mut S, Error> {
        self.get_mut(self.working)
    }

    /// Returns an iterator over all the live variant states.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.slots.iter_mut().flatten()
    }

    /// Appends `count` variants branched from `source`.
    pub fn extend(&mut self, count: usize, source: usize) -> Result<(), Error> {
        let source_state = self.get(source)?;
        let new_states = (0..count)
            .map(|_| Some(source_state.branch()))
            .collect::<Vec<_>>();
        self.slots.extend(new_states);
        tracing::trace!("Extended variant store by {count} from variant {source}.");
        Ok(())
    }

    /// Drops the `count` last slots.
    ///
    /// Fails if that would drop every slot or the working variant.
    pub fn truncate(&mut self, count: usize) -> Result<(), Error> {
        if count >= self.slots.len() {
            return Err(Error::out_of_bounds(format!(
                "Can't drop {count} of {} variant slots.",
                self.slots.len()
            )));
        }
        let new_len = self.slots.len() - count;
        if self.working >= new_len {
            return Err(Error::validation(format!(
                "Can't drop working variant {}.",
                self.working
            )));
        }
        for mut state in self.slots.drain(new_len..).flatten() {
            state.release();
        }
        tracing::trace!("Truncated variant store to {new_len} slots.");
        Ok(())
    }

    /// Deletes the variant at `index`, leaving an empty slot.
    pub fn delete_at(&mut self, index: usize) -> Result<(), Error> {
        self.get(index)?;
        if index == self.working {
            return Err(Error::validation(format!(
                "Can't delete working variant {index}."
            )));
        }
        if let Some(mut state) = self.slots[index].take() {
            state.release();
        }
        tracing::trace!("Deleted variant {index}.");
        Ok(())
    }

    /// Fills the given empty slots with variants branched from `source`.
    ///
    /// Nothing is allocated unless every index is in range and empty.
    pub fn allocate_at(&mut self, indexes: &[usize], source: usize) -> Result<(), Error> {
        let source_state = self.get(source)?;
        for &index in indexes {
            match self.slots.get(index) {
                None => return Err(Self::bounds_error(index)),
                Some(Some(_)) => {
                    return Err(Error::validation(format!(
                        "Variant slot {index} is already allocated."
                    )))
                }
                Some(None) => {}
            }
        }
        if let Some(index) = indexes
            .iter()
            .enumerate()
            .find_map(|(i, index)| indexes[..i].contains(index).then_some(*index))
        {
            return Err(Error::validation(format!(
                "Variant slot {index} is allocated twice."
            )));
        }
        let new_states = indexes
            .iter()
            .map(|&index| (index, source_state.branch()))
            .collect::<Vec<_>>();
        for (index, state) in new_states {
            self.slots[index] = Some(state);
        }
        tracing::trace!("Allocated variants {indexes:?} from variant {source}.");
        Ok(())
    }

    fn bounds_error(index: usize) -> Error {
        Error::out_of_bounds(format!("Variant index {index} is out of bounds."))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::ErrorKind;

    #[derive(Debug)]
    struct TestState {
        value: u32,
        derived: Option<u32>,
        released: Arc<AtomicUsize>,
    }

    impl TestState {
        fn new(value: u32, released: Arc<AtomicUsize>) -> Self {
            Self {
                value,
                derived: Some(value * 10),
                released,
            }
        }
    }

    impl VariantState for TestState {
        fn branch(&self) -> Self {
            Self {
                value: self.value,
                derived: None,
                released: self.released.clone(),
            }
        }

        fn release(&mut self) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn store() -> (VariantStore<TestState>, Arc<AtomicUsize>) {
        let released = Arc::new(AtomicUsize::new(0));
        (
            VariantStore::new(TestState::new(7, released.clone())),
            released,
        )
    }

    #[test]
    fn test_extend_branches_without_derived_state() -> Result<(), Error> {
        let (mut store, _) = store();
        store.extend(2, 0)?;

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(0)?.derived, Some(70));
        for i in 1..3 {
            assert_eq!(store.get(i)?.value, 7);
            assert_eq!(store.get(i)?.derived, None);
        }
        assert!(store
            .extend(1, 5)
            .is_err_and(|e| e == Error::out_of_bounds("Variant index 5 is out of bounds.")));

        Ok(())
    }

    #[test]
    fn test_truncate_and_delete_release_slots() -> Result<(), Error> {
        let (mut store, released) = store();
        store.extend(3, 0)?;

        store.delete_at(2)?;
        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert!(store
            .get(2)
            .is_err_and(|e| e.kind() == ErrorKind::OutOfBounds));
        assert!(store
            .delete_at(2)
            .is_err_and(|e| e.kind() == ErrorKind::OutOfBounds));

        // slot 2 is empty, so only slots 1 and 3 hold a state to release.
        store.truncate(3)?;
        assert_eq!(released.load(Ordering::SeqCst), 3);
        assert_eq!(store.len(), 1);

        assert!(store
            .truncate(1)
            .is_err_and(|e| e.kind() == ErrorKind::OutOfBounds));

        Ok(())
    }

    #[test]
    fn test_working_variant_is_protected() -> Result<(), Error> {
        let (mut store, _) = store();
        store.extend(2, 0)?;
        store.set_working(2)?;
        assert_eq!(store.working_index(), 2);

        assert!(store
            .delete_at(2)
            .is_err_and(|e| e.kind() == ErrorKind::Validation));
        assert!(store
            .truncate(1)
            .is_err_and(|e| e.kind() == ErrorKind::Validation));
        assert!(store
            .set_working(3)
            .is_err_and(|e| e.kind() == ErrorKind::OutOfBounds));

        store.working_mut()?.value = 9;
        assert_eq!(store.get(2)?.value, 9);
        assert_eq!(store.get(0)?.value, 7);

        Ok(())
    }

    #[test]
    fn test_allocate_at() -> Result<(), Error> {
        let (mut store, _) = store();
        store.extend(3, 0)?;
        store.get_mut(1)?.value = 1;
        store.delete_at(2)?;
        store.delete_at(3)?;
        assert!(store.indices().eq([0, 1]));

        assert!(store
            .allocate_at(&[2, 1], 0)
            .is_err_and(|e| e == Error::validation("Variant slot 1 is already allocated.")));
        assert!(store
            .allocate_at(&[2, 4], 0)
            .is_err_and(|e| e.kind() == ErrorKind::OutOfBounds));
        assert!(store
            .allocate_at(&[3, 2, 3], 0)
            .is_err_and(|e| e == Error::validation("Variant slot 3 is allocated twice.")));
        assert!(store.indices().eq([0, 1]));

        store.allocate_at(&[2, 3], 1)?;
        assert!(store.indices().eq([0, 1, 2, 3]));
        assert_eq!(store.get(3)?.value, 1);
        assert_eq!(store.get(3)?.derived, None);

        Ok(())
    }
}
