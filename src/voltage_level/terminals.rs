// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Attaching, detaching, connecting and disconnecting equipment terminals.

use crate::{ConnectableType, Error, Terminal, TerminalKey, VoltageLevel};

use super::AttachedTerminal;

/// Terminal lifecycle.
impl VoltageLevel {
    /// Attaches a terminal to the bus it names.
    ///
    /// The terminal's connection state applies to every variant.
    pub fn attach(&mut self, terminal: Terminal) -> Result<(), Error> {
        let key = terminal.key().clone();
        if terminal.connectable_type() == ConnectableType::BusbarSection {
            return Err(Error::validation(format!(
                "{key}: voltage level {} has a bus/breaker topology, busbar sections can't be attached.",
                self.id
            )));
        }
        if self.terminals.contains_key(&key) {
            return Err(Error::duplicate(format!(
                "Terminal {key} is already attached to voltage level {}.",
                self.id
            )));
        }
        let v = self.vertex(terminal.bus_id())?;
        let bus = self.graph.vertex_mut(v).ok_or_else(|| {
            Error::internal(format!(
                "Bus {} has no vertex {}.",
                terminal.bus_id(),
                v.index()
            ))
        })?;
        bus.add_terminal(key.clone());

        for variant in self.variants.iter_mut() {
            variant.set_connected(&key, terminal.is_connected());
        }
        self.terminals.insert(
            key,
            AttachedTerminal {
                connectable_type: terminal.connectable_type(),
                bus_id: terminal.bus_id().to_string(),
            },
        );
        self.invalidate_all_caches();
        Ok(())
    }

    /// Detaches a terminal from its bus, in every variant.
    ///
    /// Returns the terminal, with its connection state in the working
    /// variant.
    pub fn detach(&mut self, key: &TerminalKey) -> Result<Terminal, Error> {
        let attached = self.attached(key)?.clone();
        let v = self.vertex(&attached.bus_id)?;
        let removed = self
            .graph
            .vertex_mut(v)
            .is_some_and(|bus| bus.remove_terminal(key));
        if !removed {
            return Err(Error::internal(format!(
                "Terminal {key} is missing from bus {}.",
                attached.bus_id
            )));
        }

        let connected = self.variants.working()?.is_connected(key);
        for variant in self.variants.iter_mut() {
            variant.set_connected(key, false);
        }
        self.terminals.remove(key);
        self.invalidate_all_caches();

        Ok(Terminal::new(
            key.connectable_id.clone(),
            attached.connectable_type,
            attached.bus_id,
        )
        .with_side(key.side)
        .with_connected(connected))
    }

    /// Connects a terminal in the working variant.
    ///
    /// Returns false, without invalidating anything, if it was already
    /// connected.
    pub fn connect(&mut self, key: &TerminalKey) -> Result<bool, Error> {
        self.set_connected(key, true)
    }

    /// Disconnects a terminal in the working variant.
    ///
    /// Returns false, without invalidating anything, if it was already
    /// disconnected.
    pub fn disconnect(&mut self, key: &TerminalKey) -> Result<bool, Error> {
        self.set_connected(key, false)
    }

    fn set_connected(&mut self, key: &TerminalKey, connected: bool) -> Result<bool, Error> {
        self.attached(key)?;
        if !self.variants.working_mut()?.set_connected(key, connected) {
            return Ok(false);
        }
        self.invalidate_working_cache()?;
        Ok(true)
    }

    /// Returns true if the terminal is connected in the working variant.
    pub fn is_connected(&self, key: &TerminalKey) -> Result<bool, Error> {
        self.attached(key)?;
        Ok(self.variants.working()?.is_connected(key))
    }

    /// Returns the attached terminals, bus by bus, with their connection
    /// state in the working variant.
    pub fn terminals(&self) -> Result<Vec<Terminal>, Error> {
        let working = self.variants.working()?;
        let mut terminals = Vec::with_capacity(self.terminals.len());
        for bus in self.buses() {
            for key in bus.terminals() {
                let attached = self.attached(key)?;
                terminals.push(
                    Terminal::new(
                        key.connectable_id.clone(),
                        attached.connectable_type,
                        bus.id(),
                    )
                    .with_side(key.side)
                    .with_connected(working.is_connected(key)),
                );
            }
        }
        Ok(terminals)
    }

    /// Returns the attached terminals of the given equipment type, with their
    /// connection state in the working variant.
    pub fn terminals_of_type(
        &self,
        connectable_type: ConnectableType,
    ) -> Result<Vec<Terminal>, Error> {
        Ok(self
            .terminals()?
            .into_iter()
            .filter(|t| t.connectable_type() == connectable_type)
            .collect())
    }

    pub fn terminal_count_of_type(&self, connectable_type: ConnectableType) -> usize {
        self.terminals
            .values()
            .filter(|t| t.connectable_type == connectable_type)
            .count()
    }

    fn attached(&self, key: &TerminalKey) -> Result<&AttachedTerminal, Error> {
        self.terminals.get(key).ok_or_else(|| {
            Error::not_found(format!(
                "Terminal {key} is not attached to voltage level {}.",
                self.id
            ))
        })
    }
}
