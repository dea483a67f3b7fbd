// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The bus view topology, calculated from the bus/breaker topology and cached
//! per variant.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use crate::graph::TraverseResult;
use crate::variant::VariantState;
use crate::{Error, FeederCounts, MergedBus, TerminalKey, VoltageLevel};

/// The merged buses of one variant.
#[derive(Debug)]
pub(crate) struct BusCache {
    merged_buses: Vec<Arc<MergedBus>>,
    by_id: HashMap<String, usize>,
    /// Configured bus id to merged bus.  Buses that are part of an invalid
    /// group are not in here.
    mapping: HashMap<String, usize>,
}

impl BusCache {
    pub(crate) fn merged_buses(&self) -> &[Arc<MergedBus>] {
        &self.merged_buses
    }

    pub(crate) fn merged_bus(&self, id: &str) -> Option<&Arc<MergedBus>> {
        self.by_id.get(id).map(|&i| &self.merged_buses[i])
    }

    pub(crate) fn merged_bus_of(&self, bus_id: &str) -> Option<&Arc<MergedBus>> {
        self.mapping.get(bus_id).map(|&i| &self.merged_buses[i])
    }

    fn invalidate(&self) {
        for bus in &self.merged_buses {
            bus.invalidate();
        }
    }
}

/// The state a voltage level keeps for each variant.
#[derive(Debug, Default)]
pub(crate) struct TopologyVariant {
    connected: HashSet<TerminalKey>,
    cache: OnceLock<BusCache>,
}

impl TopologyVariant {
    pub(crate) fn is_connected(&self, key: &TerminalKey) -> bool {
        self.connected.contains(key)
    }

    /// Returns true if the connection state changed.
    pub(crate) fn set_connected(&mut self, key: &TerminalKey, connected: bool) -> bool {
        if connected {
            self.connected.insert(key.clone())
        } else {
            self.connected.remove(key)
        }
    }

    #[cfg(test)]
    pub(crate) fn has_cache(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Drops the cache, invalidating all of its merged buses.
    pub(crate) fn invalidate_cache(&mut self) -> bool {
        match self.cache.take() {
            Some(cache) => {
                cache.invalidate();
                true
            }
            None => false,
        }
    }
}

impl VariantState for TopologyVariant {
    fn branch(&self) -> Self {
        Self {
            connected: self.connected.clone(),
            cache: OnceLock::new(),
        }
    }

    fn release(&mut self) {
        self.invalidate_cache();
    }
}

impl VoltageLevel {
    /// Returns the bus cache of the given variant, building it first if
    /// needed.
    pub(crate) fn bus_cache(&self, variant_index: usize) -> Result<&BusCache, Error> {
        let variant = self.variants.get(variant_index)?;
        if let Some(cache) = variant.cache.get() {
            return Ok(cache);
        }

        let cache = self.build_bus_cache(variant)?;
        tracing::debug!(
            "Built bus view of voltage level {} for variant {}: {} merged buses.",
            self.id,
            variant_index,
            cache.merged_buses.len()
        );
        // A concurrent reader of the same variant may have won the race, in
        // which case its cache is kept and ours is dropped unseen.
        let _ = variant.cache.set(cache);
        variant.cache.get().ok_or_else(|| {
            Error::internal(format!(
                "Bus cache of variant {variant_index} missing after build."
            ))
        })
    }

    fn build_bus_cache(&self, variant: &TopologyVariant) -> Result<BusCache, Error> {
        let mut merged_buses = Vec::new();
        let mut by_id = HashMap::new();
        let mut mapping = HashMap::new();

        let mut encountered = self.graph.new_traversal_mask();
        let mut bus_num = 0;
        for (v, _) in self.graph.vertices() {
            if encountered[v.index()] {
                continue;
            }
            let mut members = vec![v];
            self.graph.traverse(
                v,
                |_, switch, v2| {
                    if switch.is_open() {
                        TraverseResult::Terminate
                    } else {
                        members.push(v2);
                        TraverseResult::Continue
                    }
                },
                &mut encountered,
            )?;

            let merged_bus_id = format!("{}_{}", self.id, bus_num);
            bus_num += 1;

            let mut bus_ids = Vec::with_capacity(members.len());
            let mut connected_terminals = Vec::new();
            let mut counts = FeederCounts::default();
            for member in members {
                let bus = self.graph.vertex(member).ok_or_else(|| {
                    Error::internal(format!(
                        "Vertex {} reached by traversal has no bus.",
                        member.index()
                    ))
                })?;
                for key in bus.terminals() {
                    if !variant.is_connected(key) {
                        continue;
                    }
                    let terminal = self.terminals.get(key).ok_or_else(|| {
                        Error::internal(format!(
                            "Terminal {key} of bus {} is not registered.",
                            bus.id()
                        ))
                    })?;
                    let connectable_type = terminal.connectable_type;
                    if connectable_type.is_branch() {
                        counts.branches += 1;
                    }
                    if connectable_type.is_feeder() {
                        counts.feeders += 1;
                    } else {
                        return Err(Error::internal(format!(
                            "{connectable_type} {key} can't be part of a bus/breaker topology."
                        )));
                    }
                    connected_terminals.push(key.clone());
                }
                bus_ids.push(bus.id().to_string());
            }

            if !self.config.bus_validity.is_valid(counts) {
                continue;
            }

            let index = merged_buses.len();
            for bus_id in &bus_ids {
                mapping.insert(bus_id.clone(), index);
            }
            by_id.insert(merged_bus_id.clone(), index);
            merged_buses.push(Arc::new(MergedBus::new(
                merged_bus_id,
                bus_ids,
                connected_terminals,
                counts,
            )));
        }

        Ok(BusCache {
            merged_buses,
            by_id,
            mapping,
        })
    }
}
