// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The `MergedBus` type, a bus of the bus view.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::{Error, FeederCounts, TerminalKey};

/// A group of configured buses that are connected to each other through
/// closed switches.
///
/// Merged buses are computed per variant and never change.  When the cache
/// that produced a merged bus is dropped, the merged bus is invalidated and
/// its accessors start returning errors.
#[derive(Debug)]
pub struct MergedBus {
    id: String,
    bus_ids: Vec<String>,
    connected_terminals: Vec<TerminalKey>,
    counts: FeederCounts,
    valid: AtomicBool,
}

impl MergedBus {
    pub(crate) fn new(
        id: String,
        bus_ids: Vec<String>,
        connected_terminals: Vec<TerminalKey>,
        counts: FeederCounts,
    ) -> Self {
        Self {
            id,
            bus_ids,
            connected_terminals,
            counts,
            valid: AtomicBool::new(true),
        }
    }

    /// Returns the id of the merged bus, `<voltage level id>_<n>`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Returns the ids of the configured buses that make up this merged bus.
    pub fn bus_ids(&self) -> Result<&[String], Error> {
        self.check_validity()?;
        Ok(&self.bus_ids)
    }

    pub fn contains_bus(&self, bus_id: &str) -> Result<bool, Error> {
        Ok(self.bus_ids()?.iter().any(|id| id == bus_id))
    }

    /// Returns the terminals that were connected to this merged bus when it
    /// was computed.
    pub fn connected_terminals(&self) -> Result<&[TerminalKey], Error> {
        self.check_validity()?;
        Ok(&self.connected_terminals)
    }

    pub fn feeder_counts(&self) -> Result<FeederCounts, Error> {
        self.check_validity()?;
        Ok(self.counts)
    }

    pub(crate) fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }

    fn check_validity(&self) -> Result<(), Error> {
        if !self.is_valid() {
            tracing::warn!("Merged bus {} used after invalidation.", self.id);
            return Err(Error::validation(format!(
                "Merged bus {} has been invalidated.",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidated_merged_bus_is_unreadable() -> Result<(), Error> {
        let bus = MergedBus::new(
            "VL_0".to_string(),
            vec!["B1".to_string(), "B2".to_string()],
            vec![],
            FeederCounts {
                feeders: 2,
                branches: 0,
            },
        );
        assert!(bus.contains_bus("B2")?);
        assert!(!bus.contains_bus("B3")?);
        assert_eq!(bus.feeder_counts()?.feeders, 2);

        bus.invalidate();
        assert!(!bus.is_valid());
        assert_eq!(bus.id(), "VL_0");
        assert!(bus
            .bus_ids()
            .is_err_and(|e| e == Error::validation("Merged bus VL_0 has been invalidated.")));
        assert!(bus.connected_terminals().is_err());

        Ok(())
    }
}
