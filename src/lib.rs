// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Bus/Breaker Topology

This is a library for representing the bus/breaker topology of a voltage level
in a power network: the configured buses, the switches between them, and the
equipment terminals attached to the buses.

## Two views of one topology

The main struct is [`VoltageLevel`].  It exposes the topology through two
views:

- The [`BusBreakerView`], returned by
  [`bus_breaker_view`][VoltageLevel::bus_breaker_view], is where buses and
  switches are created, removed, opened and closed.
- The [`BusView`], returned by [`bus_view`][VoltageLevel::bus_view], merges
  the buses that are connected through closed switches into [`MergedBus`]es.
  Merged buses are computed lazily and cached until the topology changes.

Which groups of buses make a valid merged bus is decided by the
[`BusValidityRule`] in the [`TopologyConfig`] of the voltage level.

## Variants

Each voltage level keeps a number of variants, which are independent what-if
scenarios over the same buses and switches.  Terminal connection states and
bus caches are kept per variant, and new variants can be branched from existing
ones with [`extend_variants`][VoltageLevel::extend_variants].  The bus views of
different variants can be read concurrently.

## Network integration

Identifiers of buses and switches are registered with an
[`IdentityRegistry`] shared by the whole network, and an optional
[`ConnectedComponentsIndex`] is notified whenever cached connectivity becomes
stale.  [`ObjectStore`] is a simple registry implementation.
*/

mod config;
pub use config::{BusValidityRule, FeederCounts, TopologyConfig};

mod connectable;
pub use connectable::{ConnectableType, Terminal, TerminalKey};

pub mod graph;
pub use graph::iterators;

mod network_traits;
pub use network_traits::{ConnectedComponentsIndex, IdentityRegistry, ObjectStore};

pub mod variant;

mod voltage_level;
pub use voltage_level::{
    BusBreakerView, BusView, ConfiguredBus, MergedBus, Switch, SwitchKind, VoltageLevel,
};

mod error;
pub use error::{Error, ErrorKind};
