// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The vertex and edge objects of the bus/breaker graph: configured buses
//! and switches.

use std::fmt::Display;

use crate::TerminalKey;

/// A bus of the bus/breaker view, that equipment terminals attach to.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfiguredBus {
    id: String,
    name: Option<String>,
    terminals: Vec<TerminalKey>,
}

impl ConfiguredBus {
    pub(crate) fn new(id: String, name: Option<String>) -> Self {
        Self {
            id,
            name,
            terminals: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display name of the bus, which defaults to its id.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Returns the keys of the attached terminals, in attachment order.
    pub fn terminals(&self) -> &[TerminalKey] {
        &self.terminals
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    pub(crate) fn add_terminal(&mut self, key: TerminalKey) {
        self.terminals.push(key);
    }

    pub(crate) fn remove_terminal(&mut self, key: &TerminalKey) -> bool {
        let len = self.terminals.len();
        self.terminals.retain(|k| k != key);
        self.terminals.len() != len
    }
}

/// The kind of a switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchKind {
    Breaker,
    Disconnector,
    LoadBreakSwitch,
}

impl Display for SwitchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwitchKind::Breaker => write!(f, "BREAKER"),
            SwitchKind::Disconnector => write!(f, "DISCONNECTOR"),
            SwitchKind::LoadBreakSwitch => write!(f, "LOAD_BREAK_SWITCH"),
        }
    }
}

/// A switch between two buses.
///
/// The open/closed state is shared by all variants.
#[derive(Clone, Debug, PartialEq)]
pub struct Switch {
    id: String,
    kind: SwitchKind,
    open: bool,
}

impl Switch {
    pub(crate) fn new(id: String, kind: SwitchKind, open: bool) -> Self {
        Self { id, kind, open }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SwitchKind {
        self.kind
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn set_open(&mut self, open: bool) {
        self.open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_terminals() {
        let mut bus = ConfiguredBus::new("B1".to_string(), None);
        assert_eq!(bus.name(), "B1");

        let key = |id: &str| TerminalKey {
            connectable_id: id.to_string(),
            side: 1,
        };
        bus.add_terminal(key("L1"));
        bus.add_terminal(key("G1"));
        assert_eq!(bus.terminals(), &[key("L1"), key("G1")]);

        assert!(bus.remove_terminal(&key("L1")));
        assert!(!bus.remove_terminal(&key("L1")));
        assert_eq!(bus.terminal_count(), 1);

        let bus = ConfiguredBus::new("B2".to_string(), Some("Bus 2".to_string()));
        assert_eq!(bus.name(), "Bus 2");
    }
}
