// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Variant management for a [`VoltageLevel`].
//!
//! New variants inherit the terminal connection states of their source
//! variant, but always start without a bus cache.

use crate::{Error, VoltageLevel};

impl VoltageLevel {
    /// Returns the number of variant slots, including deleted ones.
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Returns the indices of the live variants.
    pub fn variant_indices(&self) -> Vec<usize> {
        self.variants.indices().collect()
    }

    pub fn working_variant(&self) -> usize {
        self.variants.working_index()
    }

    /// Makes `index` the variant that terminal connection changes apply to,
    /// and that [`bus_view`][VoltageLevel::bus_view] looks at.
    pub fn set_working_variant(&mut self, index: usize) -> Result<(), Error> {
        self.variants.set_working(index)
    }

    /// Appends `count` variants branched from `source`.
    pub fn extend_variants(&mut self, count: usize, source: usize) -> Result<(), Error> {
        self.variants.extend(count, source)
    }

    /// Drops the `count` last variant slots.
    pub fn truncate_variants(&mut self, count: usize) -> Result<(), Error> {
        self.variants.truncate(count)
    }

    /// Deletes the variant at `index`.
    pub fn delete_variant(&mut self, index: usize) -> Result<(), Error> {
        self.variants.delete_at(index)
    }

    /// Fills the given deleted variant slots with variants branched from
    /// `source`.
    pub fn allocate_variants(&mut self, indexes: &[usize], source: usize) -> Result<(), Error> {
        self.variants.allocate_at(indexes, source)
    }
}
