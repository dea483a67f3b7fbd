// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `ConnectableType` enum and the `Terminal` type,
//! which represent equipment endpoints attached to buses.

use std::fmt::Display;

/// Represents the type of equipment a terminal belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectableType {
    Line,
    TwoWindingsTransformer,
    ThreeWindingsTransformer,
    DanglingLine,
    Load,
    Generator,
    ShuntCompensator,
    BusbarSection,
}

impl Display for ConnectableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectableType::Line => write!(f, "LINE"),
            ConnectableType::TwoWindingsTransformer => write!(f, "TWO_WINDINGS_TRANSFORMER"),
            ConnectableType::ThreeWindingsTransformer => write!(f, "THREE_WINDINGS_TRANSFORMER"),
            ConnectableType::DanglingLine => write!(f, "DANGLING_LINE"),
            ConnectableType::Load => write!(f, "LOAD"),
            ConnectableType::Generator => write!(f, "GENERATOR"),
            ConnectableType::ShuntCompensator => write!(f, "SHUNT_COMPENSATOR"),
            ConnectableType::BusbarSection => write!(f, "BUSBAR_SECTION"),
        }
    }
}

impl ConnectableType {
    /// Lines and transformers.
    pub fn is_branch(&self) -> bool {
        matches!(
            self,
            ConnectableType::Line
                | ConnectableType::TwoWindingsTransformer
                | ConnectableType::ThreeWindingsTransformer
        )
    }

    /// Everything that counts towards the feeder count of a bus.  Branches
    /// are feeders too.
    pub fn is_feeder(&self) -> bool {
        self.is_branch()
            || matches!(
                self,
                ConnectableType::DanglingLine
                    | ConnectableType::Load
                    | ConnectableType::Generator
                    | ConnectableType::ShuntCompensator
            )
    }
}

/// Identifies a terminal: the id of the equipment it belongs to, and which of
/// the equipment's sides it is (1 for single-terminal equipment).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalKey {
    pub connectable_id: String,
    pub side: u8,
}

impl Display for TerminalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.side == 1 {
            write!(f, "{}", self.connectable_id)
        } else {
            write!(f, "{}#{}", self.connectable_id, self.side)
        }
    }
}

/// An equipment terminal with a bus connection.
#[derive(Clone, Debug, PartialEq)]
pub struct Terminal {
    key: TerminalKey,
    connectable_type: ConnectableType,
    bus_id: String,
    connected: bool,
}

impl Terminal {
    /// Creates a connected terminal for side 1 of the given equipment.
    pub fn new(
        connectable_id: impl Into<String>,
        connectable_type: ConnectableType,
        bus_id: impl Into<String>,
    ) -> Self {
        Self {
            key: TerminalKey {
                connectable_id: connectable_id.into(),
                side: 1,
            },
            connectable_type,
            bus_id: bus_id.into(),
            connected: true,
        }
    }

    pub fn with_side(mut self, side: u8) -> Self {
        self.key.side = side;
        self
    }

    /// Sets whether the terminal is connected once attached.
    pub fn with_connected(mut self, connected: bool) -> Self {
        self.connected = connected;
        self
    }

    pub fn key(&self) -> &TerminalKey {
        &self.key
    }

    pub fn connectable_type(&self) -> ConnectableType {
        self.connectable_type
    }

    pub fn bus_id(&self) -> &str {
        &self.bus_id
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feeder_and_branch_types() {
        assert!(ConnectableType::Line.is_branch());
        assert!(ConnectableType::Line.is_feeder());
        assert!(ConnectableType::ThreeWindingsTransformer.is_branch());
        assert!(!ConnectableType::Load.is_branch());
        assert!(ConnectableType::Load.is_feeder());
        assert!(ConnectableType::DanglingLine.is_feeder());
        assert!(!ConnectableType::BusbarSection.is_feeder());
    }

    #[test]
    fn test_terminal_key_display() {
        let t = Terminal::new("L1", ConnectableType::Line, "B1");
        assert_eq!(t.key().to_string(), "L1");
        let t = t.with_side(2);
        assert_eq!(t.key().to_string(), "L1#2");
        assert!(t.is_connected());
        assert!(!t.with_connected(false).is_connected());
    }
}
