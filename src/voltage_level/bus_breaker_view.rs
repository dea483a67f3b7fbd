// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for editing the buses and switches of a [`VoltageLevel`].

use crate::{Error, VoltageLevel};

use super::{ConfiguredBus, Switch, SwitchKind};

const BUS: &str = "Bus";
const SWITCH: &str = "Switch";

/// The bus/breaker view of a [`VoltageLevel`], for editing its buses and
/// switches.
///
/// Every successful edit drops the bus caches of all variants.
pub struct BusBreakerView<'a> {
    pub(super) vl: &'a mut VoltageLevel,
}

impl BusBreakerView<'_> {
    /// Adds a bus with the given id.
    pub fn new_bus(&mut self, id: impl Into<String>) -> Result<&ConfiguredBus, Error> {
        self.add_bus(id.into(), None)
    }

    /// Adds a bus with the given id and display name.
    pub fn new_named_bus(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<&ConfiguredBus, Error> {
        self.add_bus(id.into(), Some(name.into()))
    }

    fn add_bus(&mut self, id: String, name: Option<String>) -> Result<&ConfiguredBus, Error> {
        let vl = &mut *self.vl;
        vl.registry.check_and_add(&id, BUS)?;
        let v = vl.graph.add_vertex(ConfiguredBus::new(id.clone(), name));
        vl.buses.insert(id, v);
        vl.invalidate_all_caches();
        vl.graph
            .vertex(v)
            .ok_or_else(|| Error::internal(format!("Bus vertex {} vanished.", v.index())))
    }

    /// Removes the bus with the given id.
    ///
    /// Fails if terminals are still attached to the bus, or if a switch is
    /// connected to it.
    pub fn remove_bus(&mut self, id: &str) -> Result<(), Error> {
        let vl = &mut *self.vl;
        let v = vl.vertex(id)?;
        let bus = vl.bus(id)?;
        if bus.terminal_count() > 0 {
            return Err(Error::validation(format!(
                "Can't remove bus {id} of voltage level {}, equipment is still attached to it.",
                vl.id
            )));
        }
        if let Some(e) = vl.graph.adjacent_edges(v).next() {
            let switch_id = vl.graph.edge(e).map(Switch::id).unwrap_or_default();
            return Err(Error::validation(format!(
                "Can't remove bus {id} of voltage level {}, switch {switch_id} is connected to it.",
                vl.id
            )));
        }

        vl.graph.remove_vertex(v)?;
        vl.buses.remove(id);
        vl.registry.remove(id);
        vl.invalidate_all_caches();
        Ok(())
    }

    /// Removes all buses.
    ///
    /// Fails without removing anything if a switch remains, or if equipment is
    /// still attached to any bus.
    pub fn remove_all_buses(&mut self) -> Result<(), Error> {
        let vl = &mut *self.vl;
        if vl.graph.edge_count() > 0 {
            return Err(Error::validation(format!(
                "Can't remove all buses of voltage level {}, switches remain.",
                vl.id
            )));
        }
        if let Some(bus) = vl.buses().find(|b| b.terminal_count() > 0) {
            return Err(Error::validation(format!(
                "Can't remove bus {} of voltage level {}, equipment is still attached to it.",
                bus.id(),
                vl.id
            )));
        }

        for bus in vl.graph.remove_all_vertices()? {
            vl.registry.remove(bus.id());
        }
        vl.buses.clear();
        vl.invalidate_all_caches();
        Ok(())
    }

    /// Adds a breaker between two existing buses.
    pub fn new_switch(
        &mut self,
        id: impl Into<String>,
        bus1: &str,
        bus2: &str,
        open: bool,
    ) -> Result<&Switch, Error> {
        self.new_switch_of_kind(id, SwitchKind::Breaker, bus1, bus2, open)
    }

    /// Adds a switch of the given kind between two existing buses.
    pub fn new_switch_of_kind(
        &mut self,
        id: impl Into<String>,
        kind: SwitchKind,
        bus1: &str,
        bus2: &str,
        open: bool,
    ) -> Result<&Switch, Error> {
        let vl = &mut *self.vl;
        let id = id.into();
        let end = |bus_id: &str| {
            vl.buses.get(bus_id).copied().ok_or_else(|| {
                Error::validation(format!(
                    "Switch {id} can't connect to bus {bus_id}, it isn't in voltage level {}.",
                    vl.id
                ))
            })
        };
        let v1 = end(bus1)?;
        let v2 = end(bus2)?;

        vl.registry.check_and_add(&id, SWITCH)?;
        let e = match vl.graph.add_edge(v1, v2, Switch::new(id.clone(), kind, open)) {
            Ok(e) => e,
            Err(err) => {
                vl.registry.remove(&id);
                return Err(err);
            }
        };
        vl.switches.insert(id, e);
        vl.invalidate_all_caches();
        vl.graph
            .edge(e)
            .ok_or_else(|| Error::internal(format!("Switch edge {} vanished.", e.index())))
    }

    /// Removes the switch with the given id.
    pub fn remove_switch(&mut self, id: &str) -> Result<(), Error> {
        let vl = &mut *self.vl;
        let e = vl.edge(id)?;
        vl.graph.remove_edge(e)?;
        vl.switches.remove(id);
        vl.registry.remove(id);
        vl.invalidate_all_caches();
        Ok(())
    }

    /// Removes all switches.
    pub fn remove_all_switches(&mut self) {
        let vl = &mut *self.vl;
        for switch in vl.graph.remove_all_edges() {
            vl.registry.remove(switch.id());
        }
        vl.switches.clear();
        vl.invalidate_all_caches();
    }

    /// Opens a switch.  Opening an open switch does nothing.
    pub fn open_switch(&mut self, id: &str) -> Result<(), Error> {
        self.set_switch_open(id, true)
    }

    /// Closes a switch.  Closing a closed switch does nothing.
    pub fn close_switch(&mut self, id: &str) -> Result<(), Error> {
        self.set_switch_open(id, false)
    }

    fn set_switch_open(&mut self, id: &str, open: bool) -> Result<(), Error> {
        let vl = &mut *self.vl;
        let e = vl.edge(id)?;
        let switch = vl
            .graph
            .edge_mut(e)
            .ok_or_else(|| Error::internal(format!("Switch {id} has no edge {}.", e.index())))?;
        if switch.is_open() == open {
            return Ok(());
        }
        switch.set_open(open);
        vl.invalidate_all_caches();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::voltage_level::test_utils::{CountingIndex, VoltageLevelBuilder};
    use crate::{ErrorKind, IdentityRegistry, ObjectStore, TopologyConfig};

    #[test]
    fn test_new_bus_registers_ids() -> Result<(), Error> {
        let registry = Arc::new(ObjectStore::new());
        let mut vl1 = VoltageLevel::new("VL1", registry.clone(), TopologyConfig::default());
        let mut vl2 = VoltageLevel::new("VL2", registry.clone(), TopologyConfig::default());

        assert_eq!(vl1.bus_breaker_view().new_named_bus("B1", "Bus 1")?.name(), "Bus 1");
        assert!(registry.contains("B1"));

        // ids are unique across the network, not just within a voltage level.
        assert!(vl2
            .bus_breaker_view()
            .new_bus("B1")
            .is_err_and(|e| e.kind() == ErrorKind::Duplicate));
        assert!(vl1
            .bus_breaker_view()
            .new_bus("B1")
            .is_err_and(|e| e.kind() == ErrorKind::Duplicate));
        assert_eq!(vl1.bus_count(), 1);
        assert_eq!(vl2.bus_count(), 0);

        vl1.bus_breaker_view().remove_bus("B1")?;
        assert!(!registry.contains("B1"));
        vl2.bus_breaker_view().new_bus("B1")?;

        Ok(())
    }

    #[test]
    fn test_remove_bus_with_references() -> Result<(), Error> {
        let mut builder = VoltageLevelBuilder::new("VL");
        builder.bus("B1").bus("B2").bus("B3");
        builder.switch("S12", "B1", "B2", false).load("LD3", "B3");
        let mut vl = builder.build()?;

        assert!(vl.bus_breaker_view().remove_bus("B1").is_err_and(|e| e
            == Error::validation(
                "Can't remove bus B1 of voltage level VL, switch S12 is connected to it."
            )));
        assert!(vl.bus_breaker_view().remove_bus("B3").is_err_and(|e| e
            == Error::validation(
                "Can't remove bus B3 of voltage level VL, equipment is still attached to it."
            )));
        assert!(vl
            .bus_breaker_view()
            .remove_bus("B9")
            .is_err_and(|e| e.kind() == ErrorKind::NotFound));
        assert_eq!(vl.bus_count(), 3);

        vl.bus_breaker_view().remove_switch("S12")?;
        vl.bus_breaker_view().remove_bus("B1")?;
        assert!(vl.buses().map(|b| b.id()).eq(["B2", "B3"]));

        Ok(())
    }

    #[test]
    fn test_failed_bus_removal_keeps_bus_view() -> Result<(), Error> {
        let mut builder = VoltageLevelBuilder::new("VL");
        builder.bus("B1").bus("B2").switch("S", "B1", "B2", true);
        builder.load("LD1", "B1").load("LD2", "B2");
        let mut vl = builder.build()?;

        let before = vl.bus_view().buses()?.len();
        assert!(vl
            .bus_breaker_view()
            .remove_bus("B1")
            .is_err_and(|e| e.kind() == ErrorKind::Validation));
        assert_eq!(vl.bus_view().buses()?.len(), before);
        assert_eq!(before, 2);

        Ok(())
    }

    #[test]
    fn test_new_switch_requires_known_buses() -> Result<(), Error> {
        let registry = Arc::new(ObjectStore::new());
        let mut vl = VoltageLevel::new("VL", registry.clone(), TopologyConfig::default());
        vl.bus_breaker_view().new_bus("B1")?;

        assert!(vl
            .bus_breaker_view()
            .new_switch("S", "B1", "B2", false)
            .is_err_and(|e| e
                == Error::validation(
                    "Switch S can't connect to bus B2, it isn't in voltage level VL."
                )));
        assert!(!registry.contains("S"));

        registry.check_and_add("LD", "Load")?;
        assert!(vl
            .bus_breaker_view()
            .new_switch("LD", "B1", "B1", false)
            .is_err_and(|e| e.kind() == ErrorKind::Duplicate));
        assert_eq!(vl.switch_count(), 0);

        let kind = vl
            .bus_breaker_view()
            .new_switch_of_kind("D", SwitchKind::Disconnector, "B1", "B1", true)?
            .kind();
        assert_eq!(kind, SwitchKind::Disconnector);
        assert!(registry.contains("D"));

        Ok(())
    }

    #[test]
    fn test_open_close_invalidate_once() -> Result<(), Error> {
        let mut builder = VoltageLevelBuilder::new("VL");
        builder.bus("B1").bus("B2").switch("S", "B1", "B2", false);
        let index = Arc::new(CountingIndex::default());
        let mut vl = builder.build()?.with_components_index(index.clone());

        vl.bus_breaker_view().open_switch("S")?;
        vl.bus_breaker_view().open_switch("S")?;
        assert_eq!(index.count(), 1);
        assert!(vl.switch("S")?.is_open());

        vl.bus_breaker_view().close_switch("S")?;
        vl.bus_breaker_view().close_switch("S")?;
        assert_eq!(index.count(), 2);

        assert!(vl
            .bus_breaker_view()
            .open_switch("S9")
            .is_err_and(|e| e.kind() == ErrorKind::NotFound));

        Ok(())
    }

    #[test]
    fn test_bulk_removal() -> Result<(), Error> {
        let registry = Arc::new(ObjectStore::new());
        let mut vl = VoltageLevel::new("VL", registry.clone(), TopologyConfig::default());
        let mut view = vl.bus_breaker_view();
        view.new_bus("B1")?;
        view.new_bus("B2")?;
        view.new_switch("S", "B1", "B2", false)?;

        assert!(view
            .remove_all_buses()
            .is_err_and(|e| e.kind() == ErrorKind::Validation));
        view.remove_all_switches();
        view.remove_all_buses()?;

        assert_eq!(vl.bus_count(), 0);
        assert_eq!(vl.switch_count(), 0);
        assert!(registry.is_empty());

        Ok(())
    }

    #[test]
    fn test_topology_listener() -> Result<(), Error> {
        let count = Arc::new(AtomicUsize::new(0));
        let mut vl = VoltageLevel::new(
            "VL",
            Arc::new(ObjectStore::new()),
            TopologyConfig::default(),
        );
        let c = count.clone();
        vl.add_topology_listener(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        let mut view = vl.bus_breaker_view();
        view.new_bus("B1")?;
        view.new_bus("B2")?;
        view.new_switch("S", "B1", "B2", false)?;
        // switch state changes aren't structural.
        view.open_switch("S")?;
        view.remove_switch("S")?;
        assert_eq!(count.load(Ordering::SeqCst), 4);

        Ok(())
    }
}
