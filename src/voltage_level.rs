// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A voltage level with a bus/breaker topology.
//!
//! The topology is edited through the [`BusBreakerView`], where buses and
//! switches are manipulated directly, and read through the [`BusView`], where
//! buses connected by closed switches are merged together.

mod bus_breaker_view;
mod bus_cache;
mod bus_view;
mod export;
mod merged_bus;
mod terminals;
mod topology;
mod variants;

#[cfg(test)]
mod test_utils;

pub use bus_breaker_view::BusBreakerView;
pub use bus_view::BusView;
pub use merged_bus::MergedBus;
pub use topology::{ConfiguredBus, Switch, SwitchKind};

use std::collections::HashMap;
use std::sync::Arc;

use bus_cache::TopologyVariant;

use crate::graph::{EdgeIndex, UndirectedGraph, VertexIndex};
use crate::variant::VariantStore;
use crate::{
    ConnectableType, ConnectedComponentsIndex, Error, IdentityRegistry, TerminalKey,
    TopologyConfig,
};

/// What the voltage level knows about an attached terminal, besides its
/// per-variant connection state.
#[derive(Clone, Debug)]
struct AttachedTerminal {
    connectable_type: ConnectableType,
    bus_id: String,
}

/// A voltage level whose topology is described by buses and the switches
/// between them.
pub struct VoltageLevel {
    id: String,
    config: TopologyConfig,
    graph: UndirectedGraph<ConfiguredBus, Switch>,
    buses: HashMap<String, VertexIndex>,
    switches: HashMap<String, EdgeIndex>,
    terminals: HashMap<TerminalKey, AttachedTerminal>,
    variants: VariantStore<TopologyVariant>,
    registry: Arc<dyn IdentityRegistry>,
    components_index: Option<Arc<dyn ConnectedComponentsIndex>>,
}

impl VoltageLevel {
    /// Creates an empty voltage level, with a single variant.
    ///
    /// The ids of the buses and switches created in it are registered with
    /// `registry`.
    pub fn new(
        id: impl Into<String>,
        registry: Arc<dyn IdentityRegistry>,
        config: TopologyConfig,
    ) -> Self {
        Self {
            id: id.into(),
            config,
            graph: UndirectedGraph::new(),
            buses: HashMap::new(),
            switches: HashMap::new(),
            terminals: HashMap::new(),
            variants: VariantStore::new(TopologyVariant::default()),
            registry,
            components_index: None,
        }
    }

    /// Sets the network connectivity index to notify whenever a bus cache of
    /// this voltage level is dropped.
    pub fn with_components_index(mut self, index: Arc<dyn ConnectedComponentsIndex>) -> Self {
        self.components_index = Some(index);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    /// Registers a callback invoked after every bus or switch addition or
    /// removal.
    ///
    /// Listeners only observe changes.  Bus caches are dropped by the voltage
    /// level itself, whether or not listeners are registered.
    pub fn add_topology_listener(&mut self, listener: impl Fn() + Send + Sync + 'static) {
        self.graph.add_listener(listener);
    }

    /// Returns the view for editing buses and switches.
    pub fn bus_breaker_view(&mut self) -> BusBreakerView<'_> {
        BusBreakerView { vl: self }
    }

    /// Returns the merged-bus view of the working variant.
    pub fn bus_view(&self) -> BusView<'_> {
        BusView {
            vl: self,
            variant: self.variants.working_index(),
        }
    }

    /// Returns the merged-bus view of the given variant.
    pub fn bus_view_of(&self, variant: usize) -> Result<BusView<'_>, Error> {
        self.variants.get(variant)?;
        Ok(BusView { vl: self, variant })
    }

    /// Returns the bus with the given id.
    pub fn bus(&self, bus_id: &str) -> Result<&ConfiguredBus, Error> {
        let v = self.vertex(bus_id)?;
        self.graph.vertex(v).ok_or_else(|| {
            Error::internal(format!("Bus {bus_id} has no vertex {}.", v.index()))
        })
    }

    /// Returns the switch with the given id.
    pub fn switch(&self, switch_id: &str) -> Result<&Switch, Error> {
        let e = self.edge(switch_id)?;
        self.graph.edge(e).ok_or_else(|| {
            Error::internal(format!("Switch {switch_id} has no edge {}.", e.index()))
        })
    }

    /// Returns an iterator over the buses of the bus/breaker view.
    pub fn buses(&self) -> impl Iterator<Item = &ConfiguredBus> {
        self.graph.vertices().map(|(_, bus)| bus)
    }

    /// Returns an iterator over the switches of the bus/breaker view.
    pub fn switches(&self) -> impl Iterator<Item = &Switch> {
        self.graph.edges().map(|(_, switch)| switch)
    }

    pub fn bus_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn switch_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the two buses a switch connects.
    pub fn switch_buses(&self, switch_id: &str) -> Result<(&ConfiguredBus, &ConfiguredBus), Error> {
        let e = self.edge(switch_id)?;
        let (v1, v2) = self.graph.edge_vertices(e).ok_or_else(|| {
            Error::internal(format!("Switch {switch_id} has no edge {}.", e.index()))
        })?;
        let bus = |v: VertexIndex| {
            self.graph.vertex(v).ok_or_else(|| {
                Error::internal(format!(
                    "Switch {switch_id} ends at missing vertex {}.",
                    v.index()
                ))
            })
        };
        Ok((bus(v1)?, bus(v2)?))
    }

    fn vertex(&self, bus_id: &str) -> Result<VertexIndex, Error> {
        self.buses.get(bus_id).copied().ok_or_else(|| {
            Error::not_found(format!(
                "Bus {bus_id} not found in voltage level {}.",
                self.id
            ))
        })
    }

    fn edge(&self, switch_id: &str) -> Result<EdgeIndex, Error> {
        self.switches.get(switch_id).copied().ok_or_else(|| {
            Error::not_found(format!(
                "Switch {switch_id} not found in voltage level {}.",
                self.id
            ))
        })
    }

    /// Drops the bus caches of all variants.  Used after changes that are
    /// visible to every variant.
    fn invalidate_all_caches(&mut self) {
        let dropped = self
            .variants
            .iter_mut()
            .map(|v| v.invalidate_cache())
            .filter(|dropped| *dropped)
            .count();
        tracing::trace!(
            "Invalidated {dropped} bus caches of voltage level {}.",
            self.id
        );
        self.notify_components_index();
    }

    /// Drops the bus cache of the working variant only.
    fn invalidate_working_cache(&mut self) -> Result<(), Error> {
        let working = self.variants.working_index();
        if self.variants.working_mut()?.invalidate_cache() {
            tracing::trace!(
                "Invalidated bus cache of voltage level {} for variant {working}.",
                self.id
            );
        }
        self.notify_components_index();
        Ok(())
    }

    fn notify_components_index(&self) {
        if let Some(index) = &self.components_index {
            index.invalidate();
        }
    }
}
