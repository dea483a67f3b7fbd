// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by all tests of the `voltage_level` module.
//!
//! - the `VoltageLevelBuilder`, which can declaratively build voltage level
//!   topologies for use in tests.
//! - the `CountingIndex`, a `ConnectedComponentsIndex` that counts how often
//!   it was invalidated.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::{
    BusValidityRule, ConnectableType, ConnectedComponentsIndex, Error, ObjectStore, Terminal,
    TopologyConfig, VoltageLevel,
};

#[derive(Default)]
pub(super) struct CountingIndex(AtomicUsize);

impl CountingIndex {
    pub(super) fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl ConnectedComponentsIndex for CountingIndex {
    fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A builder for creating voltage level topologies easily, for use in tests.
///
/// Buses are created first, then switches, then terminals.
pub(super) struct VoltageLevelBuilder {
    id: String,
    config: TopologyConfig,
    buses: Vec<String>,
    switches: Vec<(String, String, String, bool)>,
    terminals: Vec<Terminal>,
}

impl VoltageLevelBuilder {
    /// Creates a new `VoltageLevelBuilder`.
    pub(super) fn new(id: &str) -> Self {
        VoltageLevelBuilder {
            id: id.to_string(),
            config: TopologyConfig::default(),
            buses: Vec::new(),
            switches: Vec::new(),
            terminals: Vec::new(),
        }
    }

    /// Sets the rule deciding which merged buses are valid.
    pub(super) fn validity(&mut self, rule: BusValidityRule) -> &mut Self {
        self.config.bus_validity = rule;
        self
    }

    /// Adds a bus.
    pub(super) fn bus(&mut self, id: &str) -> &mut Self {
        self.buses.push(id.to_string());
        self
    }

    /// Adds a breaker between two buses.
    pub(super) fn switch(&mut self, id: &str, bus1: &str, bus2: &str, open: bool) -> &mut Self {
        self.switches
            .push((id.to_string(), bus1.to_string(), bus2.to_string(), open));
        self
    }

    /// Attaches a terminal.
    pub(super) fn terminal(&mut self, terminal: Terminal) -> &mut Self {
        self.terminals.push(terminal);
        self
    }

    /// Attaches a connected load to a bus.
    pub(super) fn load(&mut self, id: &str, bus: &str) -> &mut Self {
        self.terminal(Terminal::new(id, ConnectableType::Load, bus))
    }

    /// Attaches a connected generator to a bus.
    pub(super) fn generator(&mut self, id: &str, bus: &str) -> &mut Self {
        self.terminal(Terminal::new(id, ConnectableType::Generator, bus))
    }

    /// Attaches side 1 of a connected line to a bus.
    pub(super) fn line(&mut self, id: &str, bus: &str) -> &mut Self {
        self.terminal(Terminal::new(id, ConnectableType::Line, bus))
    }

    /// Builds and returns the voltage level, with a fresh identity registry.
    pub(super) fn build(&self) -> Result<VoltageLevel, Error> {
        let mut vl = VoltageLevel::new(
            self.id.clone(),
            Arc::new(ObjectStore::new()),
            self.config.clone(),
        );
        let mut view = vl.bus_breaker_view();
        for bus in &self.buses {
            view.new_bus(bus.as_str())?;
        }
        for (id, bus1, bus2, open) in &self.switches {
            view.new_switch(id.as_str(), bus1, bus2, *open)?;
        }
        for terminal in &self.terminals {
            vl.attach(terminal.clone())?;
        }
        Ok(vl)
    }
}
