// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The read-only merged-bus view of a [`VoltageLevel`].

use std::sync::Arc;

use crate::{Error, MergedBus, VoltageLevel};

/// The bus view of one variant of a [`VoltageLevel`].
///
/// Buses that are connected through closed switches are merged together.
/// Groups rejected by the configured
/// [`BusValidityRule`][crate::BusValidityRule] are not part of the view.
#[derive(Clone, Copy)]
pub struct BusView<'a> {
    pub(super) vl: &'a VoltageLevel,
    pub(super) variant: usize,
}

impl<'a> BusView<'a> {
    /// Returns the index of the variant this view looks at.
    pub fn variant(&self) -> usize {
        self.variant
    }

    /// Returns the merged buses, in the order they were found.
    pub fn buses(&self) -> Result<Vec<Arc<MergedBus>>, Error> {
        Ok(self.vl.bus_cache(self.variant)?.merged_buses().to_vec())
    }

    /// Returns the merged bus with the given id, if there is one.
    pub fn bus(&self, merged_bus_id: &str) -> Result<Option<Arc<MergedBus>>, Error> {
        Ok(self.vl.bus_cache(self.variant)?.merged_bus(merged_bus_id).cloned())
    }

    /// Returns the merged bus that the given configured bus is part of.
    ///
    /// Returns `None` if the bus is part of a group that isn't a valid merged
    /// bus, and an error if the voltage level has no bus with that id.
    pub fn merged_bus_of(&self, bus_id: &str) -> Result<Option<Arc<MergedBus>>, Error> {
        self.vl.vertex(bus_id)?;
        Ok(self.vl.bus_cache(self.variant)?.merged_bus_of(bus_id).cloned())
    }
}
