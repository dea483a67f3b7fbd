// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Human-readable renderings of the bus/breaker topology of a
//! [`VoltageLevel`].

use std::io::Write;

use crate::{Error, VoltageLevel};

fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn style(solid: bool) -> &'static str {
    if solid {
        "solid"
    } else {
        "dotted"
    }
}

fn io_error(err: Error) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

/// Topology rendering.
impl VoltageLevel {
    /// Writes the bus/breaker topology as a Graphviz graph.
    ///
    /// Terminal connection states are those of the working variant.  The
    /// output is meant for visual inspection and isn't guaranteed to be
    /// stable.
    pub fn export_topology(&self, out: &mut impl Write) -> std::io::Result<()> {
        let working = self.variants.working().map_err(io_error)?;

        writeln!(out, "graph {} {{", quoted(&self.id))?;
        for bus in self.buses() {
            let equipment = bus
                .terminals()
                .iter()
                .map(|key| key.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                out,
                "  {} [label={}]",
                quoted(bus.id()),
                quoted(&format!("BUS\\n{}\\n[{}]", bus.id(), equipment))
            )?;
            for key in bus.terminals() {
                let label = match self.terminals.get(key) {
                    Some(t) => format!("{}\\n{}", t.connectable_type, key),
                    None => key.to_string(),
                };
                writeln!(
                    out,
                    "  {} [label={}, shape=box]",
                    quoted(&key.to_string()),
                    quoted(&label)
                )?;
            }
        }
        for bus in self.buses() {
            for key in bus.terminals() {
                writeln!(
                    out,
                    "  {} -- {} [style={}]",
                    quoted(bus.id()),
                    quoted(&key.to_string()),
                    style(working.is_connected(key))
                )?;
            }
        }
        for (e, switch) in self.graph.edges() {
            let Some((v1, v2)) = self.graph.edge_vertices(e) else {
                continue;
            };
            let (Some(bus1), Some(bus2)) = (self.graph.vertex(v1), self.graph.vertex(v2)) else {
                continue;
            };
            writeln!(
                out,
                "  {} -- {} [label={}, style={}]",
                quoted(bus1.id()),
                quoted(bus2.id()),
                quoted(switch.id()),
                style(!switch.is_open())
            )?;
        }
        writeln!(out, "}}")
    }

    /// Writes a plain-text listing of the buses, the equipment connected to
    /// them in the working variant, and the switches.
    pub fn print_topology(&self, out: &mut impl Write) -> std::io::Result<()> {
        let working = self.variants.working().map_err(io_error)?;

        writeln!(out, "Topology of {}", self.id)?;
        for bus in self.buses() {
            let connected = bus
                .terminals()
                .iter()
                .filter(|key| working.is_connected(key))
                .map(|key| key.to_string())
                .collect::<Vec<_>>();
            writeln!(out, "{} [{}]", bus.id(), connected.join(", "))?;
        }
        for switch in self.switches() {
            let (bus1, bus2) = self.switch_buses(switch.id()).map_err(io_error)?;
            writeln!(
                out,
                "{} -- {} id={} kind={} status={}",
                bus1.id(),
                bus2.id(),
                switch.id(),
                switch.kind(),
                if switch.is_open() { "open" } else { "closed" }
            )?;
        }
        Ok(())
    }
}
