// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for a `VoltageLevel`.

use std::sync::Arc;

/// The number of connected feeders and branches found on a group of buses.
///
/// Every branch (line or transformer) also counts as a feeder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeederCounts {
    pub feeders: usize,
    pub branches: usize,
}

/// The rule that decides whether a group of electrically connected buses
/// forms a valid merged bus.
///
/// Invalid groups are not exposed in the bus view.
#[derive(Clone)]
pub struct BusValidityRule {
    name: &'static str,
    predicate: Arc<dyn Fn(FeederCounts) -> bool + Send + Sync>,
}

impl BusValidityRule {
    /// Requires at least one connected feeder.
    pub fn permissive() -> Self {
        Self {
            name: "permissive",
            predicate: Arc::new(|c| c.feeders >= 1),
        }
    }

    /// Requires at least one connected feeder and one connected branch.
    pub fn strict() -> Self {
        Self {
            name: "strict",
            predicate: Arc::new(|c| c.feeders >= 1 && c.branches >= 1),
        }
    }

    /// Requires the given minimum number of feeders and branches.
    pub fn at_least(feeders: usize, branches: usize) -> Self {
        Self {
            name: "at_least",
            predicate: Arc::new(move |c| c.feeders >= feeders && c.branches >= branches),
        }
    }

    /// Uses a custom predicate.
    pub fn from_fn(predicate: impl Fn(FeederCounts) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: "custom",
            predicate: Arc::new(predicate),
        }
    }

    pub fn is_valid(&self, counts: FeederCounts) -> bool {
        (self.predicate)(counts)
    }
}

impl Default for BusValidityRule {
    fn default() -> Self {
        Self::permissive()
    }
}

impl std::fmt::Debug for BusValidityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BusValidityRule").field(&self.name).finish()
    }
}

/// Configuration options for a `VoltageLevel`.
#[derive(Clone, Default, Debug)]
pub struct TopologyConfig {
    /// Decides which groups of buses are exposed as merged buses in the bus
    /// view.
    pub bus_validity: BusValidityRule,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(feeders: usize, branches: usize) -> FeederCounts {
        FeederCounts { feeders, branches }
    }

    #[test]
    fn test_presets() {
        let permissive = BusValidityRule::permissive();
        assert!(!permissive.is_valid(counts(0, 0)));
        assert!(permissive.is_valid(counts(2, 0)));

        let strict = BusValidityRule::strict();
        assert!(!strict.is_valid(counts(2, 0)));
        assert!(strict.is_valid(counts(2, 1)));

        let rule = BusValidityRule::at_least(3, 2);
        assert!(!rule.is_valid(counts(3, 1)));
        assert!(rule.is_valid(counts(4, 2)));

        let rule = BusValidityRule::from_fn(|_| true);
        assert!(rule.is_valid(counts(0, 0)));

        assert_eq!(
            format!("{:?}", TopologyConfig::default()),
            "TopologyConfig { bus_validity: BusValidityRule(\"permissive\") }"
        );
    }
}
